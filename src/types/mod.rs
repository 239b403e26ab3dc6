//! Public types for the muninn API.

mod query;
mod request;

pub use query::{MetricQuery, TimeRange};
pub use request::{
    Dimension, FRAGMENT_ID_SEPARATOR, Metric, MetricDataInput, MetricDataQuery, MetricStat,
    SCAN_BY_TIMESTAMP_ASCENDING, fragment_id, split_fragment_id,
};
