use shared::metrics_defs::{MetricDef, MetricType};

pub const REQUESTS_PROCESSED: MetricDef = MetricDef {
    name: "requests.processed",
    metric_type: MetricType::Counter,
    description: "Requests handed to the processor. Tagged with outcome.",
};

pub const HITS_TRACKED: MetricDef = MetricDef {
    name: "hits.tracked",
    metric_type: MetricType::Counter,
    description: "Hit-count increments written to storage",
};

pub const LOGS_EXPIRED: MetricDef = MetricDef {
    name: "logs.expired",
    metric_type: MetricType::Counter,
    description: "Log rows removed by retention batches",
};

pub const ALL_METRICS: &[MetricDef] = &[REQUESTS_PROCESSED, HITS_TRACKED, LOGS_EXPIRED];
