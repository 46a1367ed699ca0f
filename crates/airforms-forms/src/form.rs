//! Form controller
//!
//! [`FormController`] owns the field registry of one form instance, runs the
//! rules of each field and keeps the aggregate error map in sync.
//!
//! ```text
//! register(name) ──▶ Registration ──register_form_field(ref)──▶ registry
//!                                                                 │
//!            validate_field(name) / handle_submit(event) ◀────────┘
//!                         │
//!                         ▼
//!                 errors ──▶ FormState ──▶ listeners
//! ```
//!
//! The controller is a cheap handle: clones share the same form, which is how
//! several bindings (inputs, field arrays) cooperate on one form.
//!
//! ## Example
//!
//! ```
//! use airforms_forms::{FieldReference, FormController, FormEvent, InputElement};
//! use airforms_validators::is_required;
//! use serde_json::json;
//!
//! let form = FormController::new();
//! let first_name = InputElement::new("");
//!
//! form.register("firstName")?
//!     .register_form_field(
//!         FieldReference::new("firstName", first_name.clone())
//!             .with_rule("required", is_required("This field is required")),
//!     );
//! assert!(!form.is_valid());
//!
//! first_name.set_value("john");
//! let values = form.handle_submit(&mut FormEvent::new());
//! assert_eq!(values["firstName"], json!("john"));
//! assert!(form.is_valid());
//! # Ok::<(), airforms_forms::FormError>(())
//! ```

use crate::config::FormConfig;
use crate::error::{FormError, FormResult};
use crate::event::SubmitEvent;
use crate::field::{FieldName, FieldReference};
use airforms_validators::{FieldValue, RuleErrors, Rules};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub(crate) const LOG_TARGET: &str = "airforms::form";

/// Failing rules of one field: rule name -> message.
pub type FieldErrors = RuleErrors;

/// Errors of the whole form: field name -> failing rules.
pub type FormErrors = HashMap<String, FieldErrors>;

/// Current values of the form: field name -> value.
pub type FormValues = HashMap<String, FieldValue>;

/// Snapshot of a form, derived from its registry.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FormState {
	pub values: FormValues,
	pub errors: FormErrors,
	pub is_valid: bool,
}

/// Handle returned by [`FormController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type CrossFieldCheck = Rc<dyn Fn(&FormValues) -> Option<String>>;
type Listener = Rc<dyn Fn(&FormState)>;

#[derive(Clone)]
struct CrossFieldRule {
	name: String,
	target: String,
	check: CrossFieldCheck,
}

struct FormInner {
	config: FormConfig,
	fields: HashMap<String, FieldReference>,
	errors: FormErrors,
	cross_field_rules: Vec<CrossFieldRule>,
	listeners: Vec<(SubscriptionId, Listener)>,
	next_subscription: u64,
	disposed: bool,
}

impl FormInner {
	fn new(config: FormConfig) -> Self {
		Self {
			config,
			fields: HashMap::new(),
			errors: HashMap::new(),
			cross_field_rules: Vec::new(),
			listeners: Vec::new(),
			next_subscription: 0,
			disposed: false,
		}
	}

	fn values(&self) -> FormValues {
		self.fields
			.iter()
			.map(|(name, field)| (name.clone(), field.value()))
			.collect()
	}

	fn state(&self) -> FormState {
		FormState {
			values: self.values(),
			errors: self.errors.clone(),
			is_valid: self.errors.is_empty(),
		}
	}

	/// Replaces the errors of one field; an empty map removes the entry.
	/// Returns whether anything changed.
	fn set_field_errors(&mut self, name: &str, errors: FieldErrors) -> bool {
		if errors.is_empty() {
			self.errors.remove(name).is_some()
		} else if self.errors.get(name) == Some(&errors) {
			false
		} else {
			self.errors.insert(name.to_string(), errors);
			true
		}
	}

	/// Sets or clears one rule's error on a field, leaving its other rules
	/// alone. Returns whether anything changed.
	fn set_rule_error(&mut self, name: &str, rule: &str, message: Option<String>) -> bool {
		match message {
			Some(message) => {
				let field_errors = self.errors.entry(name.to_string()).or_default();
				if field_errors.get(rule) == Some(&message) {
					return false;
				}
				field_errors.insert(rule.to_string(), message);
				true
			}
			None => {
				let Some(field_errors) = self.errors.get_mut(name) else {
					return false;
				};
				let removed = field_errors.remove(rule).is_some();
				if field_errors.is_empty() {
					self.errors.remove(name);
				}
				removed
			}
		}
	}

	fn warn_unreferenced(&self, action: &str, name: &str) {
		if !self.config.profile.is_production() {
			tracing::warn!(
				target: LOG_TARGET,
				field = name,
				"tried to {} unreferenced field {}",
				action,
				name
			);
		}
	}
}

/// Form state controller.
///
/// Owns the field registry, the error map and the change listeners of one
/// form. Created with [`FormController::init`] and torn down with
/// [`FormController::dispose`].
#[derive(Clone)]
pub struct FormController {
	inner: Rc<RefCell<FormInner>>,
}

impl FormController {
	/// Create a form with the default configuration
	pub fn new() -> Self {
		Self::init(FormConfig::default())
	}

	/// Create a form with an explicit configuration
	pub fn init(config: FormConfig) -> Self {
		tracing::debug!(target: LOG_TARGET, profile = ?config.profile, "form initialised");
		Self {
			inner: Rc::new(RefCell::new(FormInner::new(config))),
		}
	}

	pub fn config(&self) -> FormConfig {
		self.inner.borrow().config.clone()
	}

	/// Drop every field, error, cross-field rule and listener.
	///
	/// Further calls to [`FormController::register`] fail with
	/// [`FormError::Disposed`].
	pub fn dispose(&self) {
		let mut inner = self.inner.borrow_mut();
		inner.fields.clear();
		inner.errors.clear();
		inner.cross_field_rules.clear();
		inner.listeners.clear();
		inner.disposed = true;
		tracing::debug!(target: LOG_TARGET, "form disposed");
	}

	pub fn is_disposed(&self) -> bool {
		self.inner.borrow().disposed
	}

	/// Reserve a field name and get the functions used to (un)register its
	/// reference.
	///
	/// # Errors
	///
	/// - [`FormError::BlankFieldName`] when `name` is empty or whitespace-only
	/// - [`FormError::Disposed`] after [`FormController::dispose`]
	///
	/// # Examples
	///
	/// ```
	/// use airforms_forms::FormController;
	///
	/// let form = FormController::new();
	/// assert_eq!(form.register("valid-name").unwrap().name(), "valid-name");
	/// assert!(form.register("     ").is_err());
	/// ```
	pub fn register(&self, name: &str) -> FormResult<Registration> {
		let name = FieldName::parse(name)?;
		if self.is_disposed() {
			return Err(FormError::Disposed);
		}
		Ok(Registration {
			name,
			form: self.clone(),
		})
	}

	/// Insert or replace a field reference and validate it.
	///
	/// A reference without a name is ignored with a warning. Validation is
	/// skipped when `validate_on_register` is disabled; the field's previous
	/// errors are then dropped.
	pub fn register_form_field(&self, field: FieldReference) {
		let Some(name) = field.name.clone() else {
			tracing::warn!(
				target: LOG_TARGET,
				"tried to register a field reference without a name attribute"
			);
			return;
		};

		let validate = {
			let mut inner = self.inner.borrow_mut();
			if inner.disposed {
				tracing::warn!(
					target: LOG_TARGET,
					field = %name,
					"tried to register field {} on a disposed form",
					name
				);
				return;
			}
			let replaced = inner.fields.insert(name.clone(), field).is_some();
			tracing::debug!(target: LOG_TARGET, field = %name, replaced, "field registered");
			inner.config.validate_on_register
		};

		if validate {
			self.validate_field(&name);
		} else {
			let changed = self.inner.borrow_mut().set_field_errors(&name, FieldErrors::new());
			if changed {
				self.notify();
			}
		}
	}

	/// Remove a field reference and its errors; unknown names are ignored.
	pub fn unregister_form_field(&self, name: &str) {
		let changed = {
			let mut inner = self.inner.borrow_mut();
			if inner.fields.remove(name).is_none() {
				inner.warn_unreferenced("unregister", name);
				return;
			}
			tracing::debug!(target: LOG_TARGET, field = name, "field unregistered");
			inner.errors.remove(name).is_some()
		};

		if changed {
			self.notify();
		}
	}

	/// Snapshot of the registry
	pub fn get_fields_refs(&self) -> HashMap<String, FieldReference> {
		self.inner.borrow().fields.clone()
	}

	/// Current value of every registered field
	///
	/// # Examples
	///
	/// ```
	/// use airforms_forms::{FieldReference, FormController, InputElement};
	/// use serde_json::json;
	///
	/// let form = FormController::new();
	/// assert!(form.get_form_values().is_empty());
	///
	/// form.register("age")?
	///     .register_form_field(FieldReference::new("age", InputElement::new(35)));
	/// assert_eq!(form.get_form_values()["age"], json!(35));
	/// # Ok::<(), airforms_forms::FormError>(())
	/// ```
	pub fn get_form_values(&self) -> FormValues {
		self.inner.borrow().values()
	}

	pub fn contains_field(&self, name: &str) -> bool {
		self.inner.borrow().fields.contains_key(name)
	}

	pub fn field_count(&self) -> usize {
		self.inner.borrow().fields.len()
	}

	/// Run the rules of one field against its current value.
	///
	/// Passing rules clear their previous error and failing rules record
	/// their message under `errors[name][rule]`. Every cross-field rule is
	/// re-checked in the same pass; on fields other than `name` only the
	/// `(target, rule)` entries of those rules are touched. An unknown name is
	/// a no-op, reported with a warning outside the production profile.
	pub fn validate_field(&self, name: &str) {
		let (value, rules, cross_field, values) = {
			let inner = self.inner.borrow();
			let Some(field) = inner.fields.get(name) else {
				inner.warn_unreferenced("apply form validation on", name);
				return;
			};
			let cross_field = inner.cross_field_rules.clone();
			let values = (!cross_field.is_empty()).then(|| inner.values());
			(field.value(), field.rules.clone(), cross_field, values)
		};

		// Rules run with the registry released so checks may read the form.
		let mut errors = rules.evaluate(&value);
		let mut other_fields = Vec::new();
		if let Some(values) = values {
			for rule in &cross_field {
				if !values.contains_key(&rule.target) {
					continue;
				}
				let outcome = (rule.check)(&values);
				if rule.target == name {
					if let Some(message) = outcome {
						errors.insert(rule.name.clone(), message);
					}
				} else {
					other_fields.push((rule.target.as_str(), rule.name.as_str(), outcome));
				}
			}
		}

		tracing::debug!(
			target: LOG_TARGET,
			field = name,
			failing = errors.len(),
			"field validated"
		);

		let changed = {
			let mut inner = self.inner.borrow_mut();
			let mut changed = inner.set_field_errors(name, errors);
			for (target, rule, outcome) in other_fields {
				// A check may have removed its target meanwhile.
				if inner.fields.contains_key(target) {
					changed |= inner.set_rule_error(target, rule, outcome);
				}
			}
			changed
		};
		if changed {
			self.notify();
		}
	}

	/// Validate every registered field and every cross-field rule in one
	/// pass. Returns whether the form is valid.
	pub fn validate_all(&self) -> bool {
		let (fields, cross_field, values) = {
			let inner = self.inner.borrow();
			let fields: Vec<(String, FieldValue, Rules)> = inner
				.fields
				.iter()
				.map(|(name, field)| (name.clone(), field.value(), field.rules.clone()))
				.collect();
			(fields, inner.cross_field_rules.clone(), inner.values())
		};

		let mut errors: FormErrors = fields
			.iter()
			.map(|(name, value, rules)| (name.clone(), rules.evaluate(value)))
			.filter(|(_, field_errors)| !field_errors.is_empty())
			.collect();
		collect_cross_field_errors(&cross_field, &values, |target, rule, message| {
			errors
				.entry(target.to_string())
				.or_default()
				.insert(rule.to_string(), message);
		});

		let changed = {
			let mut inner = self.inner.borrow_mut();
			// Fields removed by a check while we were validating keep no errors.
			errors.retain(|name, _| inner.fields.contains_key(name));
			let changed = inner.errors != errors;
			inner.errors = errors;
			changed
		};
		if changed {
			self.notify();
		}
		self.is_valid()
	}

	/// Handle a submit event: prevent the default submission, validate every
	/// field and return the form values whether or not the form is valid.
	///
	/// Gating on validity is up to the caller, through [`FormController::is_valid`]
	/// or [`FormController::errors`].
	pub fn handle_submit<E: SubmitEvent + ?Sized>(&self, event: &mut E) -> FormValues {
		event.prevent_default();
		let valid = self.validate_all();
		tracing::debug!(target: LOG_TARGET, valid, "form submitted");
		self.get_form_values()
	}

	/// Wrap a submit callback into an event handler that runs
	/// [`FormController::handle_submit`] and forwards the values.
	pub fn submit_handler<E, F>(&self, mut on_submit: F) -> impl FnMut(&mut E) + use<E, F>
	where
		E: SubmitEvent + ?Sized,
		F: FnMut(FormValues),
	{
		let form = self.clone();
		move |event: &mut E| {
			let values = form.handle_submit(event);
			on_submit(values);
		}
	}

	/// Write a value through the field's element.
	///
	/// Validates the field when `validate_on_change` is enabled. Returns
	/// `false` for an unknown field.
	pub fn set_value(&self, name: &str, value: impl Into<FieldValue>) -> bool {
		let validate = {
			let inner = self.inner.borrow();
			let Some(field) = inner.fields.get(name) else {
				inner.warn_unreferenced("set a value on", name);
				return false;
			};
			field.element.set_value(value);
			inner.config.validate_on_change
		};
		if validate {
			self.validate_field(name);
		}
		true
	}

	/// Add a rule reading several fields at once.
	///
	/// Its failure message is recorded under `errors[target_field][rule_name]`
	/// when the target field is registered. Adding a rule with the same name
	/// and target replaces the previous one.
	///
	/// # Examples
	///
	/// ```
	/// use airforms_forms::{FieldReference, FormController, FormEvent, InputElement};
	///
	/// let form = FormController::new();
	/// form.add_cross_field_rule("matches", "confirm", |values| {
	///     (values.get("password") != values.get("confirm"))
	///         .then(|| "Passwords do not match".to_string())
	/// });
	/// for (name, value) in [("password", "secret"), ("confirm", "typo")] {
	///     form.register(name)?
	///         .register_form_field(FieldReference::new(name, InputElement::new(value)));
	/// }
	///
	/// form.handle_submit(&mut FormEvent::new());
	/// assert_eq!(form.field_errors("confirm").unwrap()["matches"], "Passwords do not match");
	/// # Ok::<(), airforms_forms::FormError>(())
	/// ```
	pub fn add_cross_field_rule<F>(
		&self,
		rule_name: impl Into<String>,
		target_field: impl Into<String>,
		check: F,
	) where
		F: Fn(&FormValues) -> Option<String> + 'static,
	{
		let rule = CrossFieldRule {
			name: rule_name.into(),
			target: target_field.into(),
			check: Rc::new(check),
		};
		let mut inner = self.inner.borrow_mut();
		let existing = inner
			.cross_field_rules
			.iter()
			.position(|existing| existing.name == rule.name && existing.target == rule.target);
		match existing {
			Some(index) => inner.cross_field_rules[index] = rule,
			None => inner.cross_field_rules.push(rule),
		}
	}

	/// Remove a cross-field rule and the error it recorded. Returns `false`
	/// when no such rule exists.
	pub fn remove_cross_field_rule(&self, rule_name: &str, target_field: &str) -> bool {
		let changed = {
			let mut inner = self.inner.borrow_mut();
			let before = inner.cross_field_rules.len();
			inner
				.cross_field_rules
				.retain(|rule| !(rule.name == rule_name && rule.target == target_field));
			if inner.cross_field_rules.len() == before {
				return false;
			}
			inner.set_rule_error(target_field, rule_name, None)
		};
		if changed {
			self.notify();
		}
		true
	}

	pub fn errors(&self) -> FormErrors {
		self.inner.borrow().errors.clone()
	}

	pub fn field_errors(&self, name: &str) -> Option<FieldErrors> {
		self.inner.borrow().errors.get(name).cloned()
	}

	pub fn is_valid(&self) -> bool {
		self.inner.borrow().errors.is_empty()
	}

	pub fn form_state(&self) -> FormState {
		self.inner.borrow().state()
	}

	/// Call `listener` with the new state after every change of the error map.
	pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
	where
		F: Fn(&FormState) + 'static,
	{
		let mut inner = self.inner.borrow_mut();
		let id = SubscriptionId(inner.next_subscription);
		inner.next_subscription += 1;
		inner.listeners.push((id, Rc::new(listener)));
		id
	}

	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut inner = self.inner.borrow_mut();
		let before = inner.listeners.len();
		inner.listeners.retain(|(existing, _)| *existing != id);
		inner.listeners.len() != before
	}

	fn notify(&self) {
		let (state, listeners) = {
			let inner = self.inner.borrow();
			if inner.listeners.is_empty() {
				return;
			}
			let listeners: Vec<Listener> = inner
				.listeners
				.iter()
				.map(|(_, listener)| listener.clone())
				.collect();
			(inner.state(), listeners)
		};
		for listener in listeners {
			listener(&state);
		}
	}
}

impl Default for FormController {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for FormController {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let inner = self.inner.borrow();
		let mut fields: Vec<&String> = inner.fields.keys().collect();
		fields.sort();
		f.debug_struct("FormController")
			.field("config", &inner.config)
			.field("fields", &fields)
			.field("errors", &inner.errors)
			.field("disposed", &inner.disposed)
			.finish()
	}
}

fn collect_cross_field_errors(
	rules: &[CrossFieldRule],
	values: &FormValues,
	mut record: impl FnMut(&str, &str, String),
) {
	for rule in rules {
		if !values.contains_key(&rule.target) {
			continue;
		}
		if let Some(message) = (rule.check)(values) {
			record(&rule.target, &rule.name, message);
		}
	}
}

/// Functions bound to one reserved field name, returned by
/// [`FormController::register`].
#[derive(Clone)]
pub struct Registration {
	name: FieldName,
	form: FormController,
}

impl Registration {
	pub fn name(&self) -> &str {
		self.name.as_str()
	}

	/// See [`FormController::register_form_field`].
	pub fn register_form_field(&self, field: FieldReference) {
		self.form.register_form_field(field);
	}

	/// See [`FormController::unregister_form_field`].
	pub fn unregister_form_field(&self, name: &str) {
		self.form.unregister_form_field(name);
	}

	pub fn form(&self) -> &FormController {
		&self.form
	}
}

impl fmt::Debug for Registration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registration")
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::event::FormEvent;
	use crate::field::InputElement;
	use airforms_validators::{Validator, has_max_length, is_required};
	use rstest::{fixture, rstest};
	use serde_json::json;
	use std::cell::Cell;
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[fixture]
	fn form() -> FormController {
		FormController::new()
	}

	fn counting(calls: &Arc<AtomicUsize>, inner: Validator) -> Validator {
		let calls = calls.clone();
		Arc::new(move |value: &FieldValue| {
			calls.fetch_add(1, Ordering::SeqCst);
			inner(value)
		})
	}

	fn register(form: &FormController, field: FieldReference) {
		let name = field.name.clone().unwrap();
		form.register(&name).unwrap().register_form_field(field);
	}

	#[rstest]
	#[case("")]
	#[case("     ")]
	fn test_register_rejects_blank_name(form: FormController, #[case] name: &str) {
		assert!(matches!(
			form.register(name),
			Err(FormError::BlankFieldName(_))
		));
	}

	#[rstest]
	fn test_register_returns_registration(form: FormController) {
		let registration = form.register("valid-name").unwrap();
		assert_eq!(registration.name(), "valid-name");
	}

	#[rstest]
	fn test_register_form_field_adds_reference(form: FormController) {
		let field = FieldReference::new("dummy_field", InputElement::new(""));
		register(&form, field.clone());

		assert_eq!(
			form.get_fields_refs(),
			HashMap::from([("dummy_field".to_string(), field)])
		);
	}

	#[rstest]
	fn test_register_form_field_ignores_unnamed(form: FormController) {
		form.register("test")
			.unwrap()
			.register_form_field(FieldReference::unnamed(InputElement::new("")));

		assert!(form.get_fields_refs().is_empty());
	}

	#[rstest]
	fn test_register_form_field_replaces_existing(form: FormController) {
		let field = FieldReference::new("dummy_field", InputElement::new(""));
		let updated = field
			.clone()
			.with_rule("required", is_required("required"));

		register(&form, field);
		register(&form, updated.clone());

		assert_eq!(form.field_count(), 1);
		assert_eq!(form.get_fields_refs()["dummy_field"], updated);
	}

	#[rstest]
	fn test_unregister_form_field(form: FormController) {
		let field = FieldReference::new("dummy_field", InputElement::new(""));
		let registration = form.register("dummy_field").unwrap();
		registration.register_form_field(field.clone());

		registration.unregister_form_field("an_unknown_ref_name");
		assert_eq!(form.get_fields_refs()["dummy_field"], field);

		registration.unregister_form_field("dummy_field");
		assert!(form.get_fields_refs().is_empty());
	}

	#[rstest]
	fn test_unregister_drops_field_errors(form: FormController) {
		register(
			&form,
			FieldReference::new("dummy_field", InputElement::new(""))
				.with_rule("required", is_required("required")),
		);
		assert!(!form.is_valid());

		form.unregister_form_field("dummy_field");

		assert!(form.errors().is_empty());
		assert!(form.is_valid());
	}

	#[rstest]
	fn test_get_form_values(form: FormController) {
		for (name, value) in [
			("firstname", json!("john")),
			("lastname", json!("doe")),
			("age", json!(35)),
			("unfilledInput", json!("")),
		] {
			register(&form, FieldReference::new(name, InputElement::new(value)));
		}

		assert_eq!(
			form.get_form_values(),
			HashMap::from([
				("firstname".to_string(), json!("john")),
				("lastname".to_string(), json!("doe")),
				("age".to_string(), json!(35)),
				("unfilledInput".to_string(), json!("")),
			])
		);
		assert!(!form.errors().contains_key("age"));
	}

	#[rstest]
	fn test_validate_field_calls_rules_on_register_and_validate(form: FormController) {
		let required_calls = Arc::new(AtomicUsize::new(0));
		let length_calls = Arc::new(AtomicUsize::new(0));
		register(
			&form,
			FieldReference::new("dummy_field", InputElement::new(""))
				.with_rule("isRequired", counting(&required_calls, is_required("required")))
				.with_rule("maxLength", counting(&length_calls, has_max_length(6, "too long"))),
		);

		form.validate_field("dummy_field");

		assert_eq!(required_calls.load(Ordering::SeqCst), 2);
		assert_eq!(length_calls.load(Ordering::SeqCst), 2);
	}

	#[rstest]
	fn test_validate_field_without_eager_validation() {
		let form = FormController::init(FormConfig::default().with_validate_on_register(false));
		let calls = Arc::new(AtomicUsize::new(0));
		register(
			&form,
			FieldReference::new("dummy_field", InputElement::new(""))
				.with_rule("isRequired", counting(&calls, is_required("required"))),
		);
		assert_eq!(calls.load(Ordering::SeqCst), 0);
		assert!(form.is_valid());

		form.validate_field("dummy_field");

		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert!(!form.is_valid());
	}

	#[rstest]
	fn test_validate_field_records_only_failures_and_clears_fixed(form: FormController) {
		let element = InputElement::new("");
		register(
			&form,
			FieldReference::new("dummy_field", element.clone())
				.with_rule("isRequired", is_required("required"))
				.with_rule("maxLength", has_max_length(6, "must be less than 6 characters")),
		);
		form.validate_field("dummy_field");

		assert_eq!(
			form.field_errors("dummy_field"),
			Some(HashMap::from([("isRequired".to_string(), "required".to_string())]))
		);

		element.set_value("abcdefgh");
		form.validate_field("dummy_field");
		assert_eq!(
			form.field_errors("dummy_field"),
			Some(HashMap::from([(
				"maxLength".to_string(),
				"must be less than 6 characters".to_string()
			)]))
		);

		element.set_value("abcd");
		form.validate_field("dummy_field");
		assert_eq!(form.field_errors("dummy_field"), None);
		assert!(form.is_valid());
	}

	#[rstest]
	fn test_handle_submit_prevents_default_and_returns_values(form: FormController) {
		register(&form, FieldReference::new("firstname", InputElement::new("john")));
		register(&form, FieldReference::new("age", InputElement::new(35)));
		let mut event = FormEvent::new();

		let values = form.handle_submit(&mut event);

		assert_eq!(event.prevent_default_count(), 1);
		assert_eq!(values, form.get_form_values());
	}

	#[rstest]
	fn test_handle_submit_returns_values_of_invalid_form(form: FormController) {
		register(
			&form,
			FieldReference::new("firstname", InputElement::new(""))
				.with_rule("required", is_required("required")),
		);

		let values = form.handle_submit(&mut FormEvent::new());

		assert_eq!(values["firstname"], json!(""));
		assert!(!form.is_valid());
	}

	#[rstest]
	fn test_submit_handler_forwards_values(form: FormController) {
		register(&form, FieldReference::new("firstname", InputElement::new("john")));
		let submitted = Rc::new(RefCell::new(None));
		let sink = submitted.clone();

		let mut on_submit = form.submit_handler(move |values| {
			*sink.borrow_mut() = Some(values);
		});
		let mut event = FormEvent::new();
		on_submit(&mut event);

		assert!(event.default_prevented());
		assert_eq!(
			submitted.borrow().as_ref().map(|values| values["firstname"].clone()),
			Some(json!("john"))
		);
	}

	#[rstest]
	fn test_set_value_with_validate_on_change() {
		let form = FormController::init(FormConfig::default().with_validate_on_change(true));
		register(
			&form,
			FieldReference::new("name", InputElement::new("john"))
				.with_rule("maxLength", has_max_length(4, "too long")),
		);
		assert!(form.is_valid());

		assert!(form.set_value("name", "johnathan"));

		assert!(!form.is_valid());
		assert!(!form.set_value("unknown", "x"));
	}

	#[rstest]
	fn test_set_value_without_validate_on_change(form: FormController) {
		register(
			&form,
			FieldReference::new("name", InputElement::new("john"))
				.with_rule("maxLength", has_max_length(4, "too long")),
		);

		form.set_value("name", "johnathan");

		assert!(form.is_valid());
		assert_eq!(form.get_form_values()["name"], json!("johnathan"));
	}

	#[rstest]
	fn test_cross_field_rule_clears_when_fixed(form: FormController) {
		let confirm = InputElement::new("typo");
		form.add_cross_field_rule("matches", "confirm", |values| {
			(values.get("password") != values.get("confirm"))
				.then(|| "Passwords do not match".to_string())
		});
		register(&form, FieldReference::new("password", InputElement::new("secret")));
		register(&form, FieldReference::new("confirm", confirm.clone()));

		assert!(!form.validate_all());
		assert_eq!(
			form.field_errors("confirm").unwrap()["matches"],
			"Passwords do not match"
		);

		confirm.set_value("secret");
		form.validate_field("confirm");
		assert!(form.is_valid());
	}

	#[rstest]
	fn test_cross_field_rule_rechecked_when_read_field_changes() {
		let form = FormController::init(FormConfig::default().with_validate_on_change(true));
		form.add_cross_field_rule("matches", "confirm", |values| {
			(values.get("password") != values.get("confirm")).then(|| "mismatch".to_string())
		});
		register(
			&form,
			FieldReference::new("confirm", InputElement::new("b"))
				.with_rule("maxLength", has_max_length(0, "too long")),
		);
		register(&form, FieldReference::new("password", InputElement::new("a")));
		form.validate_field("confirm");
		assert_eq!(form.field_errors("confirm").unwrap()["matches"], "mismatch");

		form.set_value("password", "b");

		assert_eq!(
			form.field_errors("confirm"),
			Some(HashMap::from([("maxLength".to_string(), "too long".to_string())]))
		);
		assert_eq!(form.errors().len(), 1);
	}

	#[rstest]
	fn test_cross_field_rule_error_appears_when_read_field_changes() {
		let form = FormController::init(FormConfig::default().with_validate_on_change(true));
		form.add_cross_field_rule("matches", "confirm", |values| {
			(values.get("password") != values.get("confirm")).then(|| "mismatch".to_string())
		});
		register(&form, FieldReference::new("password", InputElement::new("b")));
		register(&form, FieldReference::new("confirm", InputElement::new("b")));
		assert!(form.is_valid());

		form.set_value("password", "c");

		assert_eq!(form.field_errors("confirm").unwrap()["matches"], "mismatch");
		assert!(form.field_errors("password").is_none());
	}

	#[rstest]
	fn test_add_cross_field_rule_replaces_same_name_and_target(form: FormController) {
		let calls = Rc::new(Cell::new(0));
		for message in ["first", "second"] {
			let calls = calls.clone();
			form.add_cross_field_rule("check", "name", move |_| {
				calls.set(calls.get() + 1);
				Some(message.to_string())
			});
		}

		register(&form, FieldReference::new("name", InputElement::new("")));

		assert_eq!(calls.get(), 1);
		assert_eq!(form.field_errors("name").unwrap()["check"], "second");
	}

	#[rstest]
	fn test_remove_cross_field_rule_clears_its_error(form: FormController) {
		form.add_cross_field_rule("always", "name", |_| Some("failing".to_string()));
		register(
			&form,
			FieldReference::new("name", InputElement::new(""))
				.with_rule("required", is_required("required")),
		);
		assert_eq!(form.field_errors("name").unwrap().len(), 2);

		assert!(form.remove_cross_field_rule("always", "name"));
		assert!(!form.remove_cross_field_rule("always", "name"));

		assert_eq!(
			form.field_errors("name"),
			Some(HashMap::from([("required".to_string(), "required".to_string())]))
		);
	}

	#[rstest]
	fn test_validate_all_replaces_stale_errors(form: FormController) {
		let element = InputElement::new("");
		register(
			&form,
			FieldReference::new("name", element.clone())
				.with_rule("required", is_required("required")),
		);
		assert!(!form.is_valid());

		element.set_value("john");

		assert!(form.validate_all());
		assert!(form.errors().is_empty());
	}

	#[rstest]
	fn test_listeners_notified_on_error_change(form: FormController) {
		let notified = Rc::new(Cell::new(0));
		let counter = notified.clone();
		let reader = form.clone();
		let id = form.subscribe(move |state| {
			// Listeners may call back into the form.
			assert_eq!(reader.is_valid(), state.is_valid);
			counter.set(counter.get() + 1);
		});
		let element = InputElement::new("");
		register(
			&form,
			FieldReference::new("name", element.clone())
				.with_rule("required", is_required("required")),
		);
		assert_eq!(notified.get(), 1);

		// Same errors again: nothing to re-render.
		form.validate_field("name");
		assert_eq!(notified.get(), 1);

		element.set_value("john");
		form.validate_field("name");
		assert_eq!(notified.get(), 2);

		assert!(form.unsubscribe(id));
		assert!(!form.unsubscribe(id));
		element.set_value("");
		form.validate_field("name");
		assert_eq!(notified.get(), 2);
	}

	#[rstest]
	fn test_form_state_snapshot(form: FormController) {
		register(
			&form,
			FieldReference::new("name", InputElement::new(""))
				.with_rule("required", is_required("required")),
		);

		let state = form.form_state();

		assert!(!state.is_valid);
		assert_eq!(state.values["name"], json!(""));
		assert_eq!(state.errors["name"]["required"], "required");
	}

	#[rstest]
	fn test_dispose(form: FormController) {
		register(&form, FieldReference::new("name", InputElement::new("john")));

		form.dispose();

		assert!(form.is_disposed());
		assert!(form.get_fields_refs().is_empty());
		assert!(matches!(form.register("name"), Err(FormError::Disposed)));
	}
}
