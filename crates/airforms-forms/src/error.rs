use airforms_validators::ValidatorError;
use uuid::Uuid;

/// Usage errors raised by the form controller.
///
/// Validation failures are not errors; they are collected in the form's
/// error map.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Field name must be a non-empty string, got {0:?}")]
	BlankFieldName(Option<String>),
	#[error("Form has been disposed")]
	Disposed,
	#[error("No entry with id {id} in field array {array}")]
	UnknownEntry { array: String, id: Uuid },
	#[error("Invalid rule: {0}")]
	Validator(#[from] ValidatorError),
}

pub type FormResult<T> = Result<T, FormError>;
