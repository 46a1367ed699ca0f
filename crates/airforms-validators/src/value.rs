//! Field value coercion helpers
//!
//! Inputs hold loosely typed values (text, numbers, booleans). Length and
//! numeric checks all work on the trimmed string form produced here.

use serde_json::Value;

/// The value held by a form input.
pub type FieldValue = Value;

/// Returns the string form of a value.
///
/// `null` becomes the empty string and strings are returned as-is. Numbers
/// print like user-typed numbers: an integral float has no fractional part,
/// so `35.0` becomes `"35"`. Every other value uses its JSON representation.
///
/// # Examples
///
/// ```
/// use airforms_validators::value::as_text;
/// use serde_json::json;
///
/// assert_eq!(as_text(&json!("john")), "john");
/// assert_eq!(as_text(&json!(35)), "35");
/// assert_eq!(as_text(&json!(35.0)), "35");
/// assert_eq!(as_text(&json!(null)), "");
/// ```
pub fn as_text(value: &FieldValue) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		Value::Number(n) => number_text(n),
		other => other.to_string(),
	}
}

fn number_text(n: &serde_json::Number) -> String {
	match n.as_f64() {
		Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
		// Below 1e21 an integral float prints as plain digits.
		Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
		_ => n.to_string(),
	}
}

/// Number of characters in the trimmed string form of a value.
pub fn trimmed_len(value: &FieldValue) -> usize {
	as_text(value).trim().chars().count()
}

/// Whether the value is "empty" in the loose sense used by form inputs:
/// `null`, `false`, `0` or the empty string.
pub fn is_falsy(value: &FieldValue) -> bool {
	match value {
		Value::Null => true,
		Value::Bool(b) => !b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
		Value::String(s) => s.is_empty(),
		Value::Array(_) | Value::Object(_) => false,
	}
}

/// Parses the trimmed string form of a value as a number.
///
/// Returns `None` for blank values and `Some(Err(()))` when the text is not
/// numeric.
pub(crate) fn as_number(value: &FieldValue) -> Option<Result<f64, ()>> {
	if let Value::Number(n) = value {
		return n.as_f64().map(Ok);
	}
	let text = as_text(value);
	let text = text.trim();
	if text.is_empty() {
		return None;
	}
	Some(text.parse::<f64>().map_err(|_| ()))
}
