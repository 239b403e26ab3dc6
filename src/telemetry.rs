//! Telemetry metric name constants.
//!
//! Centralised metric names for muninn operations. Consumers install their
//! own `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `muninn_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `kind` — fragment body: "search_expression", "metric_stat" or
//!   "raw_expression"
//! - `status` — outcome: "ok" or "error"
//! - `limit` — which batch cap was hit: "search_expressions" or
//!   "metric_data_queries"

/// Total metric data query fragments built.
///
/// Labels: `kind` ("search_expression" | "metric_stat" | "raw_expression").
pub const METRIC_DATA_QUERIES_TOTAL: &str = "muninn_metric_data_queries_total";

/// Total batch inputs assembled.
///
/// Labels: `status` ("ok" | "error").
pub const BATCHES_TOTAL: &str = "muninn_batches_total";

/// Batch assembly duration in seconds.
pub const BATCH_BUILD_DURATION_SECONDS: &str = "muninn_batch_build_duration_seconds";

/// Total batch builds rejected for exceeding a per-request cap.
///
/// Labels: `limit` ("search_expressions" | "metric_data_queries").
pub const LIMIT_REJECTIONS_TOTAL: &str = "muninn_limit_rejections_total";
