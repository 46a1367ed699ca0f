//! Error types for validator construction

/// Errors raised while building a validator.
///
/// A failing validation is never an error: validators report failures as
/// `Some(message)`. These variants only cover misconfiguration, such as an
/// unknown validator id or a malformed pattern.
#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
	#[error("Validator '{0}' not found")]
	UnknownValidator(String),
	#[error("{validator} validator requires '{param}' parameter")]
	MissingParam { validator: String, param: String },
	#[error("Invalid '{param}' parameter for {validator} validator: {reason}")]
	InvalidParam {
		validator: String,
		param: String,
		reason: String,
	},
	#[error("Invalid pattern: {0}")]
	InvalidPattern(#[from] regex::Error),
}

pub type ValidatorResult<T> = Result<T, ValidatorError>;
