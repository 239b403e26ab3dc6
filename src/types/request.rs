//! Request fragment types for the batch metric-data call.
//!
//! These structs mirror the shape of the `GetMetricData` request body and
//! serialize with the API's PascalCase field names. The actual wire encoding
//! and transport belong to the SDK client; this crate only populates the
//! fields the translation layer owns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Separator between the fragment-id base and the statistic index.
///
/// Five underscores cannot appear in a well-formed caller-assigned id, so a
/// generated id can always be split back into its parts.
pub const FRAGMENT_ID_SEPARATOR: &str = "_____";

/// `ScanBy` value requesting oldest-first data points.
pub const SCAN_BY_TIMESTAMP_ASCENDING: &str = "TimestampAscending";

/// Build the id for the fragment at `index` within one query's output.
pub fn fragment_id(base: &str, index: usize) -> String {
    format!("{base}{FRAGMENT_ID_SEPARATOR}{index}")
}

/// Recover the base and statistic index from a generated fragment id.
///
/// Splits on the last separator so bases that themselves contain the
/// separator stay intact. Returns `None` for ids that were not generated by
/// [`fragment_id`].
pub fn split_fragment_id(id: &str) -> Option<(&str, usize)> {
    let (base, index) = id.rsplit_once(FRAGMENT_ID_SEPARATOR)?;
    Some((base, index.parse().ok()?))
}

/// One sub-query of a batch metric-data request.
///
/// Exactly one of `expression` and `metric_stat` is populated: a search or
/// math expression resolves server-side, a metric stat names one metric
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricDataQuery {
    /// Unique id within the request; generated ids are `{base}_____{index}`.
    pub id: String,

    /// Search or math expression evaluated server-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,

    /// Direct reference to one metric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_stat: Option<MetricStat>,

    /// Whether this sub-query's series is returned or only referenced by
    /// other expressions in the request.
    pub return_data: bool,
}

/// Direct metric reference with its statistic and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricStat {
    pub metric: Metric,
    /// Sampling period in seconds.
    pub period: i64,
    /// Statistic to compute, e.g. "Average" or "p90.00".
    pub stat: String,
}

/// A single metric, addressed by namespace, name and exact dimension values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Metric {
    pub namespace: String,
    pub metric_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub dimensions: Vec<Dimension>,
}

/// Exact-match dimension pair on a direct metric reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

/// Envelope for one outbound batch metric-data request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricDataInput {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Always [`SCAN_BY_TIMESTAMP_ASCENDING`]; time series consumers expect
    /// oldest-first points.
    pub scan_by: String,
    pub metric_data_queries: Vec<MetricDataQuery>,
}
