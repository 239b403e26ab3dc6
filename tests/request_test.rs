//! Tests for the wire shape of request fragments.

use chrono::{TimeZone, Utc};
use serde_json::json;

use muninn::{
    Dimension, Metric, MetricDataInput, MetricDataQuery, MetricStat,
    SCAN_BY_TIMESTAMP_ASCENDING,
};

fn cpu_metric_stat() -> MetricStat {
    MetricStat {
        metric: Metric {
            namespace: "AWS/EC2".to_string(),
            metric_name: "CPUUtilization".to_string(),
            dimensions: vec![Dimension {
                name: "InstanceId".to_string(),
                value: "i-12345678".to_string(),
            }],
        },
        period: 300,
        stat: "Average".to_string(),
    }
}

#[test]
fn metric_stat_fragment_serializes_pascal_case() {
    let fragment = MetricDataQuery {
        id: "id1_____0".to_string(),
        expression: None,
        metric_stat: Some(cpu_metric_stat()),
        return_data: true,
    };

    let value = serde_json::to_value(&fragment).unwrap();
    assert_eq!(
        value,
        json!({
            "Id": "id1_____0",
            "MetricStat": {
                "Metric": {
                    "Namespace": "AWS/EC2",
                    "MetricName": "CPUUtilization",
                    "Dimensions": [
                        { "Name": "InstanceId", "Value": "i-12345678" }
                    ]
                },
                "Period": 300,
                "Stat": "Average"
            },
            "ReturnData": true
        })
    );
}

#[test]
fn expression_fragment_omits_metric_stat() {
    let fragment = MetricDataQuery {
        id: "id1_____0".to_string(),
        expression: Some("SUM(METRICS())".to_string()),
        metric_stat: None,
        return_data: false,
    };

    let value = serde_json::to_value(&fragment).unwrap();
    assert_eq!(
        value,
        json!({
            "Id": "id1_____0",
            "Expression": "SUM(METRICS())",
            "ReturnData": false
        })
    );
}

#[test]
fn dimensionless_metric_omits_dimensions_field() {
    let mut stat = cpu_metric_stat();
    stat.metric.dimensions.clear();

    let value = serde_json::to_value(&stat).unwrap();
    assert!(value["Metric"].get("Dimensions").is_none());
}

#[test]
fn batch_envelope_serializes_rfc3339_timestamps() {
    let input = MetricDataInput {
        start_time: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
        end_time: Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap(),
        scan_by: SCAN_BY_TIMESTAMP_ASCENDING.to_string(),
        metric_data_queries: vec![],
    };

    let value = serde_json::to_value(&input).unwrap();
    assert_eq!(value["StartTime"], "2024-05-01T00:00:00Z");
    assert_eq!(value["EndTime"], "2024-05-01T06:00:00Z");
    assert_eq!(value["ScanBy"], "TimestampAscending");
    assert!(value["MetricDataQueries"].as_array().unwrap().is_empty());
}

#[test]
fn fragment_deserializes_from_pascal_case() {
    let fragment: MetricDataQuery = serde_json::from_value(json!({
        "Id": "total_____0",
        "Expression": "SUM(METRICS())",
        "ReturnData": true
    }))
    .unwrap();

    assert_eq!(fragment.id, "total_____0");
    assert_eq!(fragment.expression.as_deref(), Some("SUM(METRICS())"));
    assert!(fragment.metric_stat.is_none());
    assert!(fragment.return_data);
}
