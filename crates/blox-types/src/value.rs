//! The dynamic value type carried by ports, parameters and variables.

use std::cmp::Ordering;

/// Any value a block can emit or be configured with
pub type Value = serde_json::Value;

/// Order two values of the same kind.
///
/// Numbers compare numerically, strings lexicographically, booleans with
/// `false < true`, and `null` equals `null`. Values of different kinds (or
/// NaN) are incomparable and yield `None`.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            _ => x.as_f64()?.partial_cmp(&y.as_f64()?),
        },
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

/// Sum two values.
///
/// Two numbers add numerically and stay integral while both are integers and
/// the sum fits. A string on either side concatenates with the textual form
/// of the other scalar. Anything else has no sum.
pub fn add_values(a: &Value, b: &Value) -> Option<Value> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                if let Some(sum) = x.checked_add(y) {
                    return Some(Value::from(sum));
                }
            }
            let sum = x.as_f64()? + y.as_f64()?;
            serde_json::Number::from_f64(sum).map(Value::Number)
        }
        (Value::String(_), _) | (_, Value::String(_)) => {
            Some(Value::String(format!("{}{}", scalar_text(a)?, scalar_text(b)?)))
        }
        _ => None,
    }
}

/// Textual form of a scalar, as used for string concatenation
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                Some(format!("{}", f as i64))
            }
            _ => Some(n.to_string()),
        },
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
