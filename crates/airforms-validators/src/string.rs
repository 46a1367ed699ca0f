//! String validators

use crate::errors::ValidatorResult;
use crate::value::{FieldValue, as_text, is_falsy, trimmed_len};
use crate::Validator;
use regex::Regex;
use std::sync::{Arc, LazyLock};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

// HTTP/HTTPS URL: valid domain labels, optional port, path, query and fragment.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^https?://[a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9\-]*[a-zA-Z0-9])?)*(:[0-9]{1,5})?(/[^\s?#]*)?(\?[^\s#]*)?(#[^\s]*)?$",
	)
	.expect("URL_REGEX: invalid regex pattern")
});

/// Requires a non-blank value.
///
/// Fails on `null`, `false` and on values whose trimmed string form is empty.
///
/// # Examples
///
/// ```
/// use airforms_validators::is_required;
/// use serde_json::json;
///
/// let required = is_required("This field is required");
/// assert_eq!(required(&json!("   ")), Some("This field is required".to_string()));
/// assert_eq!(required(&json!("john")), None);
/// ```
pub fn is_required(error_message: impl Into<String>) -> Validator {
	let error_message = error_message.into();
	Arc::new(move |value: &FieldValue| {
		let missing = matches!(value, FieldValue::Null | FieldValue::Bool(false))
			|| as_text(value).trim().is_empty();
		missing.then(|| error_message.clone())
	})
}

/// Requires at least `min_length` characters once trimmed.
///
/// Falsy values (`null`, `false`, `0`, `""`) always fail.
///
/// # Examples
///
/// ```
/// use airforms_validators::has_min_length;
/// use serde_json::json;
///
/// let min = has_min_length(3, "Too short");
/// assert!(min(&json!("ab ")).is_some());
/// assert!(min(&json!("abc")).is_none());
/// ```
pub fn has_min_length(min_length: usize, error_message: impl Into<String>) -> Validator {
	let error_message = error_message.into();
	Arc::new(move |value: &FieldValue| {
		(is_falsy(value) || trimmed_len(value) < min_length).then(|| error_message.clone())
	})
}

/// Rejects values longer than `max_length` characters once trimmed.
///
/// # Examples
///
/// ```
/// use airforms_validators::has_max_length;
/// use serde_json::json;
///
/// let max = has_max_length(8, "Please provide a value of 8 or less characters");
/// assert!(max(&json!("john")).is_none());
/// assert!(max(&json!("johnathan")).is_some());
/// ```
pub fn has_max_length(max_length: usize, error_message: impl Into<String>) -> Validator {
	let error_message = error_message.into();
	Arc::new(move |value: &FieldValue| {
		(trimmed_len(value) > max_length).then(|| error_message.clone())
	})
}

/// Requires exactly `length` characters once trimmed.
pub fn has_length(length: usize, error_message: impl Into<String>) -> Validator {
	let error_message = error_message.into();
	Arc::new(move |value: &FieldValue| {
		(trimmed_len(value) != length).then(|| error_message.clone())
	})
}

/// Requires the trimmed value to match `pattern`. Blank values pass.
///
/// # Errors
///
/// Returns [`ValidatorError::InvalidPattern`](crate::ValidatorError::InvalidPattern)
/// when `pattern` does not compile.
///
/// # Examples
///
/// ```
/// use airforms_validators::matches_pattern;
/// use serde_json::json;
///
/// let code = matches_pattern("^[A-Z]{3}$", "Code must be 3 uppercase letters").unwrap();
/// assert!(code(&json!("ABC")).is_none());
/// assert!(code(&json!("abc")).is_some());
/// assert!(code(&json!("")).is_none());
/// ```
pub fn matches_pattern(
	pattern: &str,
	error_message: impl Into<String>,
) -> ValidatorResult<Validator> {
	let regex = Regex::new(pattern)?;
	Ok(regex_validator(regex, error_message.into()))
}

/// Requires a well-formed email address. Blank values pass.
pub fn is_email(error_message: impl Into<String>) -> Validator {
	regex_validator(EMAIL_REGEX.clone(), error_message.into())
}

/// Requires an `http` or `https` URL. Blank values pass.
pub fn is_url(error_message: impl Into<String>) -> Validator {
	regex_validator(URL_REGEX.clone(), error_message.into())
}

fn regex_validator(regex: Regex, error_message: String) -> Validator {
	Arc::new(move |value: &FieldValue| {
		let text = as_text(value);
		let text = text.trim();
		if text.is_empty() || regex.is_match(text) {
			None
		} else {
			Some(error_message.clone())
		}
	})
}
