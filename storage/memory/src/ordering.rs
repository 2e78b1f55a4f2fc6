use std::cmp::Ordering;

use serde_json::Value;

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) if timestamp(value).is_some() => 5,
        Value::Object(_) => 6,
    }
}

/// Seconds and nanoseconds of a serialized timestamp (`{"seconds", "nanoseconds"}`, optionally
/// underscore-prefixed)
fn timestamp(value: &Value) -> Option<(i64, i64)> {
    let object = value.as_object()?;
    let field = |name: &str| object.get(name).or_else(|| object.get(&format!("_{}", name))).and_then(Value::as_i64);
    Some((field("seconds")?, field("nanoseconds").unwrap_or(0)))
}

/// Total order over field values: null, bools, numbers, strings, arrays, timestamps, other
/// objects. Timestamps compare chronologically; other arrays and objects compare equal within
/// their kind.
pub(crate) fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or(f64::NAN), b.as_f64().unwrap_or(f64::NAN));
            a.total_cmp(&b)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Object(_), Value::Object(_)) => match (timestamp(a), timestamp(b)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Order by an optional sort value; records without one go last in either direction
pub(crate) fn compare_sort_keys(a: Option<&Value>, b: Option<&Value>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => compare_values(b, a),
        (Some(a), Some(b)) => compare_values(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
