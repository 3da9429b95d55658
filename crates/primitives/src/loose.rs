//! Numeric coercion for untrusted JSON field values.
//!
//! Imported and pasted layouts routinely carry numbers as strings, booleans
//! or `null`. These helpers turn any [`Value`] into an `f64` with a fixed set
//! of rules so every normalizer interprets the same input the same way:
//!
//! | input | result |
//! |---|---|
//! | number | the number |
//! | `true` / `false` | `1` / `0` |
//! | `null` | `0` |
//! | string | trimmed; blank is `0`, otherwise parsed as decimal or NaN |
//! | array / object | NaN |

use serde_json::Value;

/// Coerces a JSON value to a number. Non-numeric input yields NaN.
pub fn coerce_number(value: &Value) -> f64 {
	match value {
		Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
		Value::Bool(b) => f64::from(u8::from(*b)),
		Value::Null => 0.0,
		Value::String(s) => {
			let trimmed = s.trim();
			if trimmed.is_empty() {
				0.0
			} else {
				parse_decimal(trimmed)
			}
		}
		Value::Array(_) | Value::Object(_) => f64::NAN,
	}
}

/// Parses a decimal literal, rejecting the spellings Rust accepts but a
/// layout author would not write (`inf`, `nan`, `infinity`).
fn parse_decimal(s: &str) -> f64 {
	let body = s.trim_start_matches(['+', '-']);
	if !body.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
		return f64::NAN;
	}
	s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Rounds to the nearest integer, halves towards positive infinity.
pub fn round_half_up(value: f64) -> f64 {
	(value + 0.5).floor()
}

/// Returns true for `null` and for strings that are empty after trimming.
pub fn is_blank(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::String(s) => s.trim().is_empty(),
		_ => false,
	}
}

/// Converts a coerced number into an `i32` when it is finite.
///
/// Values are rounded half-up and saturate at the `i32` range.
pub fn to_rounded_i32(value: f64) -> Option<i32> {
	if !value.is_finite() {
		return None;
	}
	let rounded = round_half_up(value);
	Some(rounded.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32)
}
