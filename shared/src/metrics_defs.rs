//! Common types for metrics definitions.
//!
//! Each crate that emits metrics declares `MetricDef` constants plus an
//! `ALL_METRICS` registry so the full surface is discoverable in one place.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Gauge,
    Histogram,
}

impl MetricType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MetricType::Counter => "Counter",
            MetricType::Gauge => "Gauge",
            MetricType::Histogram => "Histogram",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub description: &'static str,
}

impl MetricDef {
    /// Increment a counter metric by `value`.
    pub fn increment(&self, value: u64) {
        debug_assert_eq!(self.metric_type, MetricType::Counter);
        metrics::counter!(self.name).increment(value);
    }

    /// Increment a counter metric by `value` with a single tag.
    pub fn increment_tagged(&self, tag: (&'static str, &'static str), value: u64) {
        debug_assert_eq!(self.metric_type, MetricType::Counter);
        metrics::counter!(self.name, tag.0 => tag.1).increment(value);
    }

    /// Record a histogram observation.
    pub fn record(&self, value: f64) {
        debug_assert_eq!(self.metric_type, MetricType::Histogram);
        metrics::histogram!(self.name).record(value);
    }
}
