//! Search expression construction.
//!
//! A generated expression has the form
//! `REMOVE_EMPTY(SEARCH('<terms>', '<stat>', <period>))`. The term string is
//! where the dimension filters are encoded, and its two prefixes select the
//! matching mode: a `{namespace,key,...}` scope list for strict matching, a
//! `Namespace="..."` term for fuzzy cross-namespace search. `REMOVE_EMPTY`
//! drops matched series that carry no data points in the requested range.

use crate::types::MetricQuery;

/// Build the search expression for one query and statistic.
///
/// Pure formatting: identical inputs produce byte-identical output, and no
/// validation happens here. Malformed queries are rejected at the
/// construction boundary ([`MetricQuery::validate`]), not in the formatter.
///
/// Dimension keys with a `"*"` candidate are unconstrained. Under strict
/// matching they contribute no term (the scope list already names them);
/// under fuzzy matching each is emitted as a bare quoted key after the
/// valued terms. All other keys become `"<key>"=("v1" OR "v2" ...)` terms
/// in ascending key order, values quoted in the order provided.
///
/// # Example
///
/// ```
/// use muninn::{MetricQuery, build_search_expression};
///
/// let query = MetricQuery::new("us-east-1", "AWS/EC2", "CPUUtilization")
///     .dimension("LoadBalancer", ["lb1", "lb2"])
///     .period(300);
///
/// assert_eq!(
///     build_search_expression(&query, "Average"),
///     r#"REMOVE_EMPTY(SEARCH('{AWS/EC2,LoadBalancer} MetricName="CPUUtilization" "LoadBalancer"=("lb1" OR "lb2")', 'Average', 300))"#,
/// );
/// ```
pub fn build_search_expression(query: &MetricQuery, stat: &str) -> String {
    let mut known: Vec<(&str, &[String])> = Vec::new();
    let mut wildcard: Vec<&str> = Vec::new();
    for (name, values) in &query.dimensions {
        if values.iter().any(|v| v == "*") {
            wildcard.push(name);
        } else if !values.is_empty() {
            known.push((name, values));
        }
    }

    let mut terms = format!("MetricName=\"{}\"", query.metric_name);
    for (name, values) in known {
        terms.push_str(&format!(" \"{name}\"=({})", or_group(values)));
    }

    if query.match_exact {
        format!(
            "REMOVE_EMPTY(SEARCH('{{{}}} {terms}', '{stat}', {}))",
            scope_list(query),
            query.period
        )
    } else {
        for name in wildcard {
            terms.push_str(&format!(" \"{name}\""));
        }
        format!(
            "REMOVE_EMPTY(SEARCH('Namespace=\"{}\" {terms}', '{stat}', {}))",
            query.namespace, query.period
        )
    }
}

/// `"v1" OR "v2" OR ...` in the order provided. Single values keep the
/// surrounding parentheses added by the caller, for uniform terms.
fn or_group(values: &[String]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| format!("\"{v}\"")).collect();
    quoted.join(" OR ")
}

/// `namespace,key1,key2,...` listing every dimension key, wildcard or not,
/// in ascending key order.
fn scope_list(query: &MetricQuery) -> String {
    let mut scope = query.namespace.clone();
    for name in query.dimensions.keys() {
        scope.push(',');
        scope.push_str(name);
    }
    scope
}
