use shared::metrics_defs::{MetricDef, MetricType};

pub const PIPELINE_MATCHED: MetricDef = MetricDef {
    name: "pipeline.matched",
    metric_type: MetricType::Counter,
    description: "Requests for which a candidate fully resolved",
};

pub const PIPELINE_NO_MATCH: MetricDef = MetricDef {
    name: "pipeline.no_match",
    metric_type: MetricType::Counter,
    description: "Requests for which no candidate fully resolved",
};

pub const ALL_METRICS: &[MetricDef] = &[PIPELINE_MATCHED, PIPELINE_NO_MATCH];
