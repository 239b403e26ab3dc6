//! Batch request assembly.
//!
//! [`MetricDataInputBuilder`] expands logical queries into request fragments
//! and enforces the API's per-request caps while doing so. One builder
//! instance covers one outbound batch: the running counters live in the
//! builder, so a new batch starts from a new builder instead of from shared
//! mutable state.

mod search;

pub use search::build_search_expression;

use std::time::Instant;

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::telemetry;
use crate::types::{
    Dimension, Metric, MetricDataInput, MetricDataQuery, MetricQuery, MetricStat,
    SCAN_BY_TIMESTAMP_ASCENDING, TimeRange, fragment_id,
};
use crate::{MuninnError, Result};

/// Per-request caps of the batch metric-data API.
///
/// Defaults follow the documented service limits: 5 search expressions and
/// 100 metric data queries per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BatchLimits {
    /// Maximum generated search expressions per request (default: 5).
    #[serde(default = "default_max_search_expressions")]
    pub max_search_expressions: usize,
    /// Maximum metric data queries per request (default: 100).
    #[serde(default = "default_max_metric_data_queries")]
    pub max_metric_data_queries: usize,
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self {
            max_search_expressions: default_max_search_expressions(),
            max_metric_data_queries: default_max_metric_data_queries(),
        }
    }
}

fn default_max_search_expressions() -> usize {
    5
}

fn default_max_metric_data_queries() -> usize {
    100
}

/// Expands logical metric queries into batch request fragments.
///
/// Each query yields one [`MetricDataQuery`] per requested statistic, with
/// generated ids `{base}_____{index}` in statistics order. The two
/// per-request caps are checked cumulatively across every
/// [`build_metric_data_queries`](Self::build_metric_data_queries) call on the
/// same instance. Counters are not rolled back on failure: a batch that
/// tripped a cap is abandoned, and the caller retries with fewer queries on a
/// fresh builder.
///
/// # Concurrency
///
/// Building is pure CPU-bound string formatting with no suspension points.
/// When one batch is assembled from several threads, wrap the builder in a
/// `Mutex`; the counters need a single mutual-exclusion boundary, nothing
/// finer.
#[derive(Debug)]
pub struct MetricDataInputBuilder {
    limits: BatchLimits,
    search_expression_count: usize,
    metric_data_query_count: usize,
}

impl MetricDataInputBuilder {
    /// Create a builder for one outbound batch.
    pub fn new(limits: BatchLimits) -> Self {
        Self {
            limits,
            search_expression_count: 0,
            metric_data_query_count: 0,
        }
    }

    /// Limits this builder enforces.
    pub fn limits(&self) -> BatchLimits {
        self.limits
    }

    /// Generated search expressions so far in this batch.
    pub fn search_expression_count(&self) -> usize {
        self.search_expression_count
    }

    /// Fragments built so far in this batch.
    pub fn metric_data_query_count(&self) -> usize {
        self.metric_data_query_count
    }

    /// Expand one query into its request fragments.
    ///
    /// Returns exactly one fragment per statistic, in statistics order. A
    /// pre-supplied expression is passed through verbatim; otherwise the
    /// query either becomes a generated search expression or a direct metric
    /// reference, depending on its dimension filters. Only generated search
    /// expressions count against the search-expression cap; every fragment
    /// counts against the total cap.
    pub fn build_metric_data_queries(
        &mut self,
        query: &MetricQuery,
    ) -> Result<Vec<MetricDataQuery>> {
        query.validate()?;

        let base = query.fragment_id_base();
        let mut fragments = Vec::with_capacity(query.statistics.len());
        for (index, stat) in query.statistics.iter().enumerate() {
            let mut fragment = MetricDataQuery {
                id: fragment_id(&base, index),
                expression: None,
                metric_stat: None,
                return_data: query.return_data,
            };

            if !query.expression.is_empty() {
                fragment.expression = Some(query.expression.clone());
                Self::record_fragment("raw_expression");
            } else if query.is_search_expression() {
                self.search_expression_count += 1;
                if self.search_expression_count > self.limits.max_search_expressions {
                    return Err(self.reject_search_expressions(query));
                }
                fragment.expression = Some(build_search_expression(query, stat));
                Self::record_fragment("search_expression");
            } else {
                fragment.metric_stat = Some(metric_stat(query, stat));
                Self::record_fragment("metric_stat");
            }

            fragments.push(fragment);
        }

        self.metric_data_query_count += fragments.len();
        if self.metric_data_query_count > self.limits.max_metric_data_queries {
            return Err(self.reject_metric_data_queries(query));
        }

        debug!(
            ref_id = %query.ref_id,
            fragments = fragments.len(),
            search_expressions = self.search_expression_count,
            metric_data_queries = self.metric_data_query_count,
            "built metric data queries"
        );
        Ok(fragments)
    }

    /// Build the full batch envelope for a set of queries.
    ///
    /// Consumes the builder — one batch per instance. Fragments appear in
    /// query order, each query's statistics kept contiguous.
    #[instrument(skip(self, time_range, queries), fields(batch_size = queries.len()))]
    pub fn build_metric_data_input(
        mut self,
        time_range: &TimeRange,
        queries: &[MetricQuery],
    ) -> Result<MetricDataInput> {
        let start = Instant::now();

        if let Err(e) = time_range.validate() {
            Self::record_batch(start, false);
            return Err(e);
        }

        let mut metric_data_queries = Vec::new();
        for query in queries {
            match self.build_metric_data_queries(query) {
                Ok(fragments) => metric_data_queries.extend(fragments),
                Err(e) => {
                    Self::record_batch(start, false);
                    return Err(e);
                }
            }
        }

        Self::record_batch(start, true);
        Ok(MetricDataInput {
            start_time: time_range.from,
            end_time: time_range.to,
            scan_by: SCAN_BY_TIMESTAMP_ASCENDING.to_string(),
            metric_data_queries,
        })
    }

    fn reject_search_expressions(&self, query: &MetricQuery) -> MuninnError {
        warn!(
            ref_id = %query.ref_id,
            max = self.limits.max_search_expressions,
            "batch exceeds the search expression cap"
        );
        metrics::counter!(telemetry::LIMIT_REJECTIONS_TOTAL, "limit" => "search_expressions")
            .increment(1);
        MuninnError::TooManySearchExpressions {
            ref_id: query.ref_id.clone(),
            max: self.limits.max_search_expressions,
        }
    }

    fn reject_metric_data_queries(&self, query: &MetricQuery) -> MuninnError {
        warn!(
            ref_id = %query.ref_id,
            max = self.limits.max_metric_data_queries,
            "batch exceeds the metric data query cap"
        );
        metrics::counter!(telemetry::LIMIT_REJECTIONS_TOTAL, "limit" => "metric_data_queries")
            .increment(1);
        MuninnError::TooManyMetricDataQueries {
            ref_id: query.ref_id.clone(),
            max: self.limits.max_metric_data_queries,
        }
    }

    fn record_fragment(kind: &'static str) {
        metrics::counter!(telemetry::METRIC_DATA_QUERIES_TOTAL, "kind" => kind).increment(1);
    }

    fn record_batch(start: Instant, ok: bool) {
        let status = if ok { "ok" } else { "error" };
        metrics::counter!(telemetry::BATCHES_TOTAL, "status" => status).increment(1);
        metrics::histogram!(telemetry::BATCH_BUILD_DURATION_SECONDS)
            .record(start.elapsed().as_secs_f64());
    }
}

/// Direct reference to one metric for single-valued exact filters. Each
/// dimension contributes its first candidate value.
fn metric_stat(query: &MetricQuery, stat: &str) -> MetricStat {
    let dimensions = query
        .dimensions
        .iter()
        .filter_map(|(name, values)| {
            values.first().map(|value| Dimension {
                name: name.clone(),
                value: value.clone(),
            })
        })
        .collect();

    MetricStat {
        metric: Metric {
            namespace: query.namespace.clone(),
            metric_name: query.metric_name.clone(),
            dimensions,
        },
        period: query.period,
        stat: stat.to_string(),
    }
}
