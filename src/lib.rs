//! # airforms
//!
//! Form state management for Rust, independent of any rendering framework.
//!
//! airforms keeps a registry of form inputs, runs their validation rules and
//! exposes the resulting error map, values and validity to whatever UI layer
//! drives the inputs.
//!
//! ## Feature Flags
//!
//! - `validators` - Validator factories and the named-validator registry
//! - `forms` - Form controller, input bindings and field arrays
//! - `full` (default) - All features enabled
//!
//! ## Quick Example
//!
//! ```
//! use airforms::prelude::*;
//! use serde_json::json;
//!
//! let form = FormController::new();
//! let first_name = form.bind(
//!     FieldConfig::new("firstName")
//!         .with_rule("required", is_required("This field is required"))
//!         .with_rule("maxLength", has_max_length(8, "Please provide a value of 8 or less characters")),
//! )?;
//! first_name.mount();
//! assert!(!form.is_valid());
//!
//! first_name.on_input("john");
//! let values = form.handle_submit(&mut FormEvent::new());
//! assert!(form.is_valid());
//! assert_eq!(values["firstName"], json!("john"));
//! # Ok::<(), airforms::forms::FormError>(())
//! ```

#[cfg(feature = "forms")]
pub mod forms;
#[cfg(feature = "validators")]
pub mod validators;

#[cfg(feature = "forms")]
pub use airforms_forms::{
	FieldArray, FieldConfig, FormConfig, FormController, FormError, FormEvent, FormResult,
	InputBinding, Profile,
};

#[cfg(feature = "validators")]
pub use airforms_validators::{FieldValue, Rules, Validator, ValidatorError};

/// Re-export commonly used items
pub mod prelude {
	#[cfg(feature = "forms")]
	pub use airforms_forms::{
		FieldArray, FieldArrayConfig, FieldArrayEntry, FieldConfig, FieldReference, FormConfig,
		FormController, FormError, FormEvent, FormResult, FormState, InputBinding, InputElement,
		Profile, SubmitEvent,
	};

	#[cfg(feature = "validators")]
	pub use airforms_validators::prelude::*;
}
