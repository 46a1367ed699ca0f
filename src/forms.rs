//! Forms module.
//!
//! Form controller, input bindings and field arrays.
//!
//! # Examples
//!
//! ```rust,no_run
//! use airforms::forms::{FieldArray, FormController, InputBinding};
//! ```

pub use airforms_forms::*;
