//! Validators module.
//!
//! Validator factories, rule sets and the named-validator registry.
//!
//! # Examples
//!
//! ```
//! use airforms::validators::{Rules, has_min_length, is_required};
//! use serde_json::json;
//!
//! let rules = Rules::new()
//!     .with("required", is_required("This field is required"))
//!     .with("minLength", has_min_length(3, "Too short"));
//!
//! assert_eq!(rules.evaluate(&json!("ab")).len(), 1);
//! ```

pub use airforms_validators::*;
