//! Form state management for airforms
//!
//! This crate tracks field registration, values, validation rules and error
//! state for HTML-style form inputs, independently of any rendering
//! framework:
//!
//! - [`FormController`]: field registry, per-field and cross-field
//!   validation, submit handling, change listeners
//! - [`FieldArray`]: ordered, resizable groups of fields sharing one name
//! - [`InputBinding`]: mount/unmount/change glue for rendered inputs
//! - [`FormConfig`]: explicit profile and validation triggers
//!
//! Validators come from [`airforms_validators`].

pub mod binding;
pub mod config;
pub mod error;
pub mod event;
pub mod field;
pub mod field_array;
pub mod form;

pub use binding::{FieldConfig, InputBinding};
pub use config::{FormConfig, PROFILE_ENV_VAR, Profile};
pub use error::{FormError, FormResult};
pub use event::{FormEvent, SubmitEvent};
pub use field::{FieldName, FieldReference, InputElement};
pub use field_array::{FieldArray, FieldArrayConfig, FieldArrayEntry};
pub use form::{
	FieldErrors, FormController, FormErrors, FormState, FormValues, Registration, SubscriptionId,
};
