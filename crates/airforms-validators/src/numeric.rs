//! Numeric validators
//!
//! Blank values pass; combine with [`is_required`](crate::is_required) to
//! make a number mandatory. Text that does not parse as a number fails.

use crate::value::{FieldValue, as_number};
use crate::Validator;
use std::sync::Arc;

/// Requires a numeric value greater than or equal to `min`.
///
/// # Examples
///
/// ```
/// use airforms_validators::has_min_value;
/// use serde_json::json;
///
/// let adult = has_min_value(18.0, "Must be 18 or older");
/// assert!(adult(&json!(35)).is_none());
/// assert!(adult(&json!("12")).is_some());
/// assert!(adult(&json!("")).is_none());
/// ```
pub fn has_min_value(min: f64, error_message: impl Into<String>) -> Validator {
	let error_message = error_message.into();
	Arc::new(move |value: &FieldValue| match as_number(value) {
		None => None,
		Some(Ok(n)) if n >= min => None,
		Some(_) => Some(error_message.clone()),
	})
}

/// Requires a numeric value less than or equal to `max`.
pub fn has_max_value(max: f64, error_message: impl Into<String>) -> Validator {
	let error_message = error_message.into();
	Arc::new(move |value: &FieldValue| match as_number(value) {
		None => None,
		Some(Ok(n)) if n <= max => None,
		Some(_) => Some(error_message.clone()),
	})
}
