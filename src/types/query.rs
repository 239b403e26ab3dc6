//! Logical metric query model.
//!
//! A [`MetricQuery`] is the resolved form of one dashboard query as produced
//! by the host's parsing layer: which metric to read, how to filter it, and
//! which statistics to compute. The builder expands it into the request
//! fragments the batch API understands.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MuninnError, Result};

/// A logical request for one metric's time series.
///
/// Dimension filters map a dimension name to an ordered list of candidate
/// values; the value `"*"` means "any value". The key-ordered map keeps
/// generated expressions deterministic without a separate sorting pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricQuery {
    /// Panel reference id ("A", "B", ...), carried into error values.
    pub ref_id: String,

    /// Region the client should execute the request against. Carried for the
    /// client; the builder does not consume it.
    pub region: String,

    /// Metric namespace, e.g. "AWS/EC2".
    pub namespace: String,

    /// Metric name, e.g. "CPUUtilization".
    pub metric_name: String,

    /// Dimension name to candidate values; `"*"` matches any value.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub dimensions: BTreeMap<String, Vec<String>>,

    /// Statistics to compute, e.g. "Average", "Sum", "p90.00". One request
    /// fragment is built per entry.
    pub statistics: Vec<String>,

    /// Sampling period in seconds.
    pub period: i64,

    /// Caller-assigned identifier.
    pub id: String,

    /// Alias used as the base for generated fragment ids. Usually equal to
    /// `id`; see [`MetricQuery::fragment_id_base`] for the fallback order.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub identifier: String,

    /// Pre-supplied expression. When non-empty it is passed through verbatim
    /// and no expression is generated.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub expression: String,

    /// Strict-namespace matching. When false, generated searches match the
    /// metric across namespaces ("fuzzy" search).
    pub match_exact: bool,

    /// Whether the fragments' series are returned to the caller or only
    /// referenced by other expressions in the batch.
    pub return_data: bool,
}

impl Default for MetricQuery {
    fn default() -> Self {
        Self {
            ref_id: String::new(),
            region: String::new(),
            namespace: String::new(),
            metric_name: String::new(),
            dimensions: BTreeMap::new(),
            statistics: Vec::new(),
            period: 0,
            id: String::new(),
            identifier: String::new(),
            expression: String::new(),
            // Query editors default to strict matching; absent fields in
            // older stored queries must resolve the same way.
            match_exact: true,
            return_data: true,
        }
    }
}

impl MetricQuery {
    /// Create a query for one metric.
    pub fn new(
        region: impl Into<String>,
        namespace: impl Into<String>,
        metric_name: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            namespace: namespace.into(),
            metric_name: metric_name.into(),
            ..Self::default()
        }
    }

    /// Deserialize a resolved query model and validate it.
    ///
    /// This is the construction boundary: malformed queries are rejected
    /// here with a descriptive error instead of surfacing later as
    /// half-built request fragments.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let query: MetricQuery = serde_json::from_value(value)?;
        query.validate()?;
        Ok(query)
    }

    /// Set the panel reference id.
    pub fn ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = ref_id.into();
        self
    }

    /// Set the caller-assigned identifier.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the identifier alias used as the fragment-id base.
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Add a dimension filter.
    pub fn dimension<V, S>(mut self, name: impl Into<String>, values: V) -> Self
    where
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dimensions
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Add a single statistic.
    pub fn statistic(mut self, stat: impl Into<String>) -> Self {
        self.statistics.push(stat.into());
        self
    }

    /// Set the full statistics list.
    pub fn statistics<V, S>(mut self, stats: V) -> Self
    where
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statistics = stats.into_iter().map(Into::into).collect();
        self
    }

    /// Set the sampling period in seconds.
    pub fn period(mut self, seconds: i64) -> Self {
        self.period = seconds;
        self
    }

    /// Set a pre-supplied expression, passed through verbatim.
    pub fn expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = expression.into();
        self
    }

    /// Enable or disable strict-namespace matching.
    pub fn match_exact(mut self, match_exact: bool) -> Self {
        self.match_exact = match_exact;
        self
    }

    /// Control whether the fragments' series are returned to the caller.
    pub fn return_data(mut self, return_data: bool) -> Self {
        self.return_data = return_data;
        self
    }

    /// Caller-contract checks, applied before any fragment is formed.
    ///
    /// A query with a pre-supplied expression only needs statistics; the
    /// remaining fields feed generated expression and metric-reference
    /// bodies, so they are checked only when something will be generated.
    pub fn validate(&self) -> Result<()> {
        if self.statistics.is_empty() {
            return Err(self.invalid("at least one statistic is required"));
        }
        if self.expression.is_empty() {
            if self.namespace.is_empty() {
                return Err(self.invalid("namespace is required"));
            }
            if self.metric_name.is_empty() {
                return Err(self.invalid("metric name is required"));
            }
            if self.period <= 0 {
                return Err(self.invalid("period must be a positive number of seconds"));
            }
            for (name, values) in &self.dimensions {
                if values.is_empty() {
                    return Err(self.invalid(format!("dimension '{name}' has no values")));
                }
            }
        }
        Ok(())
    }

    /// True when the query is sent as a server-side search rather than a
    /// direct metric reference: either the caller supplied a raw
    /// `SEARCH(...)` expression, or the filters cannot name a single metric.
    pub fn is_search_expression(&self) -> bool {
        self.expression.contains("SEARCH(") || self.is_inferred_search_expression()
    }

    /// True when the dimension filters force a generated search expression:
    /// fuzzy namespace matching, a wildcard value, or several candidate
    /// values for one dimension.
    pub fn is_inferred_search_expression(&self) -> bool {
        if !self.match_exact {
            return true;
        }
        self.dimensions
            .values()
            .any(|values| values.len() > 1 || values.iter().any(|v| v == "*"))
    }

    /// Base string for generated fragment ids.
    ///
    /// Prefers the `identifier` alias, then the caller-assigned `id`, then a
    /// name derived from the ref id, so generated ids stay non-empty and
    /// unique per query even when the caller assigned none.
    pub fn fragment_id_base(&self) -> String {
        if !self.identifier.is_empty() {
            self.identifier.clone()
        } else if !self.id.is_empty() {
            self.id.clone()
        } else {
            format!("query{}", self.ref_id)
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> MuninnError {
        MuninnError::InvalidQuery {
            ref_id: self.ref_id.clone(),
            reason: reason.into(),
        }
    }
}

/// Absolute time range covered by one batch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeRange {
    /// Create a time range.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// Reject ranges whose start is not strictly before their end.
    pub fn validate(&self) -> Result<()> {
        if self.from >= self.to {
            return Err(MuninnError::InvalidTimeRange);
        }
        Ok(())
    }
}
