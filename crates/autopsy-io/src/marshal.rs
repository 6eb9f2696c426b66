//! Marshalling reports into host-side structured form
//!
//! Hosts receive the eight report fields under their exact names. JSON has
//! no NaN or infinity, so non-finite floats (including the no-valid-data
//! sentinels) become `null`.

use autopsy_stats::{FieldValue, StatsReport};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

fn field_to_json(value: FieldValue) -> Value {
    match value {
        FieldValue::Count(n) => Value::from(n),
        FieldValue::Float(x) => serde_json::Number::from_f64(x)
            .map(Value::Number)
            .unwrap_or(Value::Null),
    }
}

/// Report as a name -> value record
pub fn to_record(report: &StatsReport) -> BTreeMap<String, Value> {
    report
        .fields()
        .into_iter()
        .map(|(name, value)| (name.to_string(), field_to_json(value)))
        .collect()
}

/// Report as a JSON object
pub fn to_json_value(report: &StatsReport) -> Value {
    let object: Map<String, Value> = report
        .fields()
        .into_iter()
        .map(|(name, value)| (name.to_string(), field_to_json(value)))
        .collect();
    Value::Object(object)
}

/// Report as a JSON string
pub fn to_json(report: &StatsReport) -> String {
    to_json_value(report).to_string()
}
