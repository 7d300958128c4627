//! Best-effort typing of raw parameter values.

use serde_json::{Number, Value};

use crate::TRACING_TARGET;

/// Recovers the primitive type of a raw parameter value.
///
/// Strings holding an integer, a finite float or a boolean (`true`/`false`,
/// any case) become the corresponding JSON value. Every other value, string
/// or not, is returned unchanged.
pub fn coerce(value: &Value) -> Value {
    match value {
        Value::String(raw) => coerce_str(raw).unwrap_or_else(|| {
            tracing::trace!(
                target: TRACING_TARGET,
                value = %raw,
                "parameter value kept as string"
            );
            value.clone()
        }),
        other => other.clone(),
    }
}

/// Parses a string as an integer, a finite float or a boolean, in that order.
pub fn coerce_str(raw: &str) -> Option<Value> {
    if let Ok(n) = raw.parse::<i64>() {
        return Some(Value::Number(n.into()));
    }
    if let Ok(n) = raw.parse::<u64>() {
        return Some(Value::Number(n.into()));
    }
    if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
        return Some(Value::Number(n));
    }

    if raw.eq_ignore_ascii_case("true") {
        Some(Value::Bool(true))
    } else if raw.eq_ignore_ascii_case("false") {
        Some(Value::Bool(false))
    } else {
        None
    }
}
