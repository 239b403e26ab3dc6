//! Muninn - Query translation for the CloudWatch GetMetricData API
//!
//! This crate turns logical metric queries, the shape a dashboard edits,
//! into the request fragments the batch metric-data API accepts: one
//! fragment per statistic, wildcard dimension filters compiled to
//! `SEARCH(...)` expressions, and the per-request service caps enforced
//! while the batch is assembled.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use muninn::{BatchLimits, MetricDataInputBuilder, MetricQuery, TimeRange};
//!
//! fn main() -> muninn::Result<()> {
//!     let query = MetricQuery::new("us-east-1", "AWS/EC2", "CPUUtilization")
//!         .ref_id("A")
//!         .identifier("cpu")
//!         .dimension("InstanceId", ["i-12345678"])
//!         .statistics(["Average", "Sum"])
//!         .period(300);
//!
//!     let range = TimeRange::new(
//!         Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
//!         Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap(),
//!     );
//!
//!     let input = MetricDataInputBuilder::new(BatchLimits::default())
//!         .build_metric_data_input(&range, &[query])?;
//!
//!     assert_eq!(input.metric_data_queries.len(), 2);
//!     assert_eq!(input.metric_data_queries[0].id, "cpu_____0");
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod error;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use builder::{BatchLimits, MetricDataInputBuilder, build_search_expression};
pub use error::{MuninnError, Result};

// Re-export all types
pub use types::{
    Dimension, FRAGMENT_ID_SEPARATOR, Metric, MetricDataInput, MetricDataQuery, MetricQuery,
    MetricStat, SCAN_BY_TIMESTAMP_ASCENDING, TimeRange, fragment_id, split_fragment_id,
};
