//! Validators for airforms
//!
//! A validator is a pure function from a field value to an optional error
//! message: `None` means the value passes. Factories in this crate are
//! configured with their parameters and message up front:
//!
//! ```
//! use airforms_validators::{has_min_length, is_required};
//! use serde_json::json;
//!
//! let required = is_required("This field is required");
//! let min = has_min_length(3, "At least 3 characters");
//!
//! assert!(required(&json!("")).is_some());
//! assert!(min(&json!("  ab  ")).is_some());
//! assert!(min(&json!("abc")).is_none());
//! ```
//!
//! Validators hold no shared mutable state and are `Send + Sync`, so one rule
//! set can be shared between forms.

pub mod errors;
pub mod numeric;
pub mod registry;
pub mod rules;
pub mod string;
pub mod value;

pub use errors::{ValidatorError, ValidatorResult};
pub use numeric::{has_max_value, has_min_value};
pub use registry::{RuleSpec, ValidatorFactory, ValidatorRegistry};
pub use rules::{RuleErrors, Rules};
pub use string::{
	has_length, has_max_length, has_min_length, is_email, is_required, is_url, matches_pattern,
};
pub use value::FieldValue;

use std::sync::Arc;

/// A configured validation function: `Some(message)` on failure.
pub type Validator = Arc<dyn Fn(&FieldValue) -> Option<String> + Send + Sync>;

/// Re-export commonly used items
pub mod prelude {
	pub use crate::errors::*;
	pub use crate::numeric::*;
	pub use crate::registry::*;
	pub use crate::rules::*;
	pub use crate::string::*;
	pub use crate::value::FieldValue;
	pub use crate::Validator;
}
