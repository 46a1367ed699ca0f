//! Input bindings
//!
//! The glue between rendered inputs and a [`FormController`]. A host UI
//! creates one [`InputBinding`] per input from a [`FieldConfig`], then calls
//! its lifecycle hooks:
//!
//! ```text
//! FieldConfig ──bind()──▶ InputBinding
//!                           │ mount()      ──▶ register_form_field
//!                           │ on_input(v)  ──▶ element value (+ validate_field)
//!                           │ unmount()    ──▶ unregister_form_field
//! ```
//!
//! ## Example
//!
//! ```
//! use airforms_forms::{FieldConfig, FormConfig, FormController};
//! use airforms_validators::{has_max_length, is_required};
//!
//! let form = FormController::init(FormConfig::default().with_validate_on_change(true));
//! let first_name = form.bind(
//!     FieldConfig::new("firstName")
//!         .with_default_value("john")
//!         .with_rule("required", is_required("This field is required"))
//!         .with_rule("maxLength", has_max_length(8, "Please provide a value of 8 or less characters")),
//! )?;
//!
//! first_name.mount();
//! assert!(form.is_valid());
//!
//! first_name.on_input("johnathan-the-third");
//! assert!(first_name.errors().unwrap().contains_key("maxLength"));
//! # Ok::<(), airforms_forms::FormError>(())
//! ```

use crate::error::FormResult;
use crate::field::{FieldReference, InputElement};
use crate::form::{FieldErrors, FormController, Registration};
use airforms_validators::{FieldValue, RuleSpec, Rules, Validator, ValidatorRegistry};
use serde::{Deserialize, Serialize};
use std::cell::Cell;

fn default_input_type() -> String {
	"text".to_string()
}

/// Description of one input.
///
/// Declarative rules (`rules`) are resolved against the global
/// [`ValidatorRegistry`]; programmatic ones (`validators`) are added with
/// [`FieldConfig::with_rule`] and take precedence on name clashes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldConfig {
	pub name: String,
	#[serde(default)]
	pub id: Option<String>,
	#[serde(rename = "type", default = "default_input_type")]
	pub input_type: String,
	#[serde(default)]
	pub default_value: FieldValue,
	#[serde(default)]
	pub rules: Vec<RuleSpec>,
	#[serde(skip)]
	pub validators: Rules,
}

impl FieldConfig {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			input_type: default_input_type(),
			..Self::default()
		}
	}

	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn with_input_type(mut self, input_type: impl Into<String>) -> Self {
		self.input_type = input_type.into();
		self
	}

	pub fn with_default_value(mut self, value: impl Into<FieldValue>) -> Self {
		self.default_value = value.into();
		self
	}

	pub fn with_rule(mut self, name: impl Into<String>, validator: Validator) -> Self {
		self.validators.insert(name, validator);
		self
	}

	pub fn with_rule_spec(mut self, spec: RuleSpec) -> Self {
		self.rules.push(spec);
		self
	}

	/// Resolve declarative and programmatic rules into one set.
	pub fn resolve_rules(&self) -> FormResult<Rules> {
		let mut rules = if self.rules.is_empty() {
			Rules::new()
		} else {
			let registry = ValidatorRegistry::global();
			let registry = registry.lock().unwrap_or_else(|e| e.into_inner());
			Rules::from_specs(&self.rules, &registry)?
		};
		for (name, validator) in self.validators.iter() {
			rules.insert(name, validator.clone());
		}
		Ok(rules)
	}
}

/// One input bound to a form.
#[derive(Debug)]
pub struct InputBinding {
	id: String,
	input_type: String,
	rules: Rules,
	element: InputElement,
	registration: Registration,
	mounted: Cell<bool>,
}

impl InputBinding {
	pub(crate) fn new(
		registration: Registration,
		id: String,
		input_type: String,
		rules: Rules,
		element: InputElement,
	) -> Self {
		Self {
			id,
			input_type,
			rules,
			element,
			registration,
			mounted: Cell::new(false),
		}
	}

	pub fn name(&self) -> &str {
		self.registration.name()
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn input_type(&self) -> &str {
		&self.input_type
	}

	pub fn element(&self) -> &InputElement {
		&self.element
	}

	pub fn value(&self) -> FieldValue {
		self.element.value()
	}

	/// Whether the input is registered on its form. Turns false once the
	/// field is removed from the form by other means, such as
	/// [`FieldArray::remove`](crate::FieldArray::remove).
	pub fn is_mounted(&self) -> bool {
		self.mounted.get() && self.registration.form().contains_field(self.name())
	}

	/// Register the input with the form. Calling it again re-registers the
	/// same reference.
	pub fn mount(&self) {
		let field = FieldReference::new(self.name(), self.element.clone()).with_rules(self.rules.clone());
		self.registration.register_form_field(field);
		self.mounted.set(true);
	}

	/// Remove the input from the form. A field already removed from the form
	/// is left alone.
	pub fn unmount(&self) {
		if self.mounted.replace(false) && self.registration.form().contains_field(self.name()) {
			self.registration.unregister_form_field(self.name());
		}
	}

	/// Change event: store the new value and, when the form validates on
	/// change, validate the field.
	pub fn on_input(&self, value: impl Into<FieldValue>) {
		self.element.set_value(value);
		let form = self.registration.form();
		if self.is_mounted() && form.config().validate_on_change {
			form.validate_field(self.name());
		}
	}

	/// Current errors of the field, if any rule fails.
	pub fn errors(&self) -> Option<FieldErrors> {
		self.registration.form().field_errors(self.name())
	}
}

impl FormController {
	/// Create an input binding from a field description.
	///
	/// # Errors
	///
	/// Fails on a blank name, a disposed form, or an unresolvable rule spec.
	pub fn bind(&self, config: FieldConfig) -> FormResult<InputBinding> {
		let rules = config.resolve_rules()?;
		let element = InputElement::new(config.default_value);
		self.bind_element(config.name, config.id, config.input_type, rules, element)
	}

	pub(crate) fn bind_element(
		&self,
		name: String,
		id: Option<String>,
		input_type: String,
		rules: Rules,
		element: InputElement,
	) -> FormResult<InputBinding> {
		let registration = self.register(&name)?;
		let id = id.unwrap_or(name);
		Ok(InputBinding::new(registration, id, input_type, rules, element))
	}
}
