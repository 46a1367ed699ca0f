//! Dynamic field arrays
//!
//! A [`FieldArray`] manages an ordered, growable group of inputs sharing one
//! logical name and one rule set. Every entry gets a generated id that never
//! changes, so removing an entry does not shift the identity of the others:
//! entry fields are registered on the form as `"{array}[{id}]"`.
//!
//! ## Example
//!
//! ```
//! use airforms_forms::{FieldArray, FieldArrayConfig, FormController};
//! use airforms_validators::{Rules, is_required};
//!
//! let form = FormController::new();
//! let emails = FieldArray::new(
//!     FieldArrayConfig::new("emails")
//!         .with_rules(Rules::new().with("required", is_required("This field is required"))),
//!     &form,
//! )?;
//!
//! let first = emails.append();
//! let second = emails.append();
//! for entry in emails.fields() {
//!     emails.register(&entry)?.mount();
//! }
//! assert!(!form.is_valid());
//!
//! emails.remove(&first);
//! assert_eq!(emails.len(), 1);
//! assert_eq!(emails.fields()[0].id, second.id);
//! # Ok::<(), airforms_forms::FormError>(())
//! ```

use crate::binding::InputBinding;
use crate::error::{FormError, FormResult};
use crate::field::{FieldName, InputElement};
use crate::form::{FieldErrors, FormController, LOG_TARGET};
use airforms_validators::{FieldValue, Rules};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

/// Description of a field array.
#[derive(Debug, Clone, Default)]
pub struct FieldArrayConfig {
	pub name: String,
	pub rules: Rules,
	pub default_value: FieldValue,
}

impl FieldArrayConfig {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			rules: Rules::new(),
			default_value: FieldValue::String(String::new()),
		}
	}

	pub fn with_rules(mut self, rules: Rules) -> Self {
		self.rules = rules;
		self
	}

	pub fn with_default_value(mut self, value: impl Into<FieldValue>) -> Self {
		self.default_value = value.into();
		self
	}
}

/// One entry of a field array, as seen by the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldArrayEntry {
	pub id: Uuid,
	/// Name under which the entry is registered on the form.
	pub name: String,
	pub errors: FieldErrors,
}

struct EntrySlot {
	id: Uuid,
	name: String,
	element: InputElement,
}

/// Field-array controller bound to a form.
///
/// Clones share the same entries.
#[derive(Clone)]
pub struct FieldArray {
	name: FieldName,
	rules: Rules,
	default_value: FieldValue,
	form: FormController,
	entries: Rc<RefCell<Vec<EntrySlot>>>,
}

impl FieldArray {
	/// # Errors
	///
	/// [`FormError::BlankFieldName`] when the array name is blank.
	pub fn new(config: FieldArrayConfig, form: &FormController) -> FormResult<Self> {
		Ok(Self {
			name: FieldName::parse(config.name)?,
			rules: config.rules,
			default_value: config.default_value,
			form: form.clone(),
			entries: Rc::new(RefCell::new(Vec::new())),
		})
	}

	pub fn name(&self) -> &str {
		self.name.as_str()
	}

	pub fn len(&self) -> usize {
		self.entries.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}

	/// Add an entry with a freshly generated id.
	pub fn append(&self) -> FieldArrayEntry {
		let id = Uuid::new_v4();
		let name = format!("{}[{}]", self.name, id);
		self.entries.borrow_mut().push(EntrySlot {
			id,
			name: name.clone(),
			element: InputElement::new(self.default_value.clone()),
		});
		tracing::debug!(target: LOG_TARGET, array = %self.name, %id, "field array entry appended");
		FieldArrayEntry {
			id,
			name,
			errors: FieldErrors::new(),
		}
	}

	/// Remove an entry by id and unregister its field. Returns `false` when
	/// the id is unknown.
	///
	/// A binding created for the entry reports `is_mounted() == false`
	/// afterwards and its `unmount` does nothing.
	pub fn remove(&self, entry: &FieldArrayEntry) -> bool {
		let removed = {
			let mut entries = self.entries.borrow_mut();
			let Some(pos) = entries.iter().position(|slot| slot.id == entry.id) else {
				return false;
			};
			entries.remove(pos)
		};
		if self.form.contains_field(&removed.name) {
			self.form.unregister_form_field(&removed.name);
		}
		tracing::debug!(target: LOG_TARGET, array = %self.name, id = %removed.id, "field array entry removed");
		true
	}

	/// Entries in insertion order, with their current errors.
	pub fn fields(&self) -> Vec<FieldArrayEntry> {
		self.entries
			.borrow()
			.iter()
			.map(|slot| FieldArrayEntry {
				id: slot.id,
				name: slot.name.clone(),
				errors: self.form.field_errors(&slot.name).unwrap_or_default(),
			})
			.collect()
	}

	pub fn entry(&self, id: Uuid) -> Option<FieldArrayEntry> {
		self.fields().into_iter().find(|entry| entry.id == id)
	}

	/// Entry values in insertion order.
	pub fn values(&self) -> Vec<FieldValue> {
		self.entries
			.borrow()
			.iter()
			.map(|slot| slot.element.value())
			.collect()
	}

	/// Create the input binding of an entry, carrying the array's rules.
	///
	/// # Errors
	///
	/// [`FormError::UnknownEntry`] when the entry was removed, or
	/// [`FormError::Disposed`] when the form is gone.
	pub fn register(&self, entry: &FieldArrayEntry) -> FormResult<InputBinding> {
		let (name, element) = {
			let entries = self.entries.borrow();
			let slot = entries
				.iter()
				.find(|slot| slot.id == entry.id)
				.ok_or_else(|| FormError::UnknownEntry {
					array: self.name.to_string(),
					id: entry.id,
				})?;
			(slot.name.clone(), slot.element.clone())
		};
		self.form.bind_element(
			name,
			Some(entry.id.to_string()),
			"text".to_string(),
			self.rules.clone(),
			element,
		)
	}
}

impl fmt::Debug for FieldArray {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let ids: Vec<Uuid> = self.entries.borrow().iter().map(|slot| slot.id).collect();
		f.debug_struct("FieldArray")
			.field("name", &self.name)
			.field("rules", &self.rules)
			.field("entries", &ids)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::FormConfig;
	use airforms_validators::is_required;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn form() -> FormController {
		FormController::new()
	}

	fn required_array(form: &FormController) -> FieldArray {
		FieldArray::new(
			FieldArrayConfig::new("field-array")
				.with_rules(Rules::new().with("required", is_required("This field is required"))),
			form,
		)
		.unwrap()
	}

	#[rstest]
	fn test_new_rejects_blank_name(form: FormController) {
		assert!(matches!(
			FieldArray::new(FieldArrayConfig::new(" "), &form),
			Err(FormError::BlankFieldName(_))
		));
	}

	#[rstest]
	fn test_append_generates_unique_ids(form: FormController) {
		let array = required_array(&form);

		let first = array.append();
		let second = array.append();

		assert_ne!(first.id, second.id);
		assert_eq!(first.name, format!("field-array[{}]", first.id));
		assert_eq!(array.len(), 2);
		assert!(first.errors.is_empty());
	}

	#[rstest]
	fn test_register_validates_entry(form: FormController) {
		let array = required_array(&form);
		let entry = array.append();

		array.register(&entry).unwrap().mount();

		assert_eq!(
			array.fields()[0].errors["required"],
			"This field is required"
		);
		assert!(!form.is_valid());
	}

	#[rstest]
	fn test_remove_by_id_keeps_other_entries(form: FormController) {
		let array = required_array(&form);
		let first = array.append();
		let second = array.append();
		let third = array.append();
		let bindings: Vec<InputBinding> = [&first, &second, &third]
			.into_iter()
			.map(|entry| array.register(entry).unwrap())
			.collect();
		for (binding, value) in bindings.iter().zip(["a", "b", "c"]) {
			binding.on_input(value);
			binding.mount();
		}

		assert!(array.remove(&second));

		let remaining: Vec<Uuid> = array.fields().iter().map(|entry| entry.id).collect();
		assert_eq!(remaining, vec![first.id, third.id]);
		assert_eq!(array.values(), vec![json!("a"), json!("c")]);
		assert!(!form.contains_field(&second.name));
		assert_eq!(form.get_form_values()[&third.name], json!("c"));
	}

	#[rstest]
	fn test_remove_drops_entry_errors(form: FormController) {
		let array = required_array(&form);
		let entry = array.append();
		array.register(&entry).unwrap().mount();
		assert!(!form.is_valid());

		assert!(array.remove(&entry));

		assert!(form.is_valid());
		assert!(array.is_empty());
	}

	#[rstest]
	fn test_remove_releases_entry_binding(form: FormController) {
		let array = required_array(&form);
		let kept = array.append();
		let dropped = array.append();
		let kept_binding = array.register(&kept).unwrap();
		let dropped_binding = array.register(&dropped).unwrap();
		kept_binding.mount();
		dropped_binding.mount();

		array.remove(&dropped);

		assert!(!dropped_binding.is_mounted());
		assert!(kept_binding.is_mounted());
		dropped_binding.unmount();
		assert!(form.contains_field(&kept.name));
		assert_eq!(form.field_count(), 1);
	}

	#[rstest]
	fn test_remove_unknown_entry(form: FormController) {
		let array = required_array(&form);
		let entry = array.append();
		assert!(array.remove(&entry));

		assert!(!array.remove(&entry));
		assert!(matches!(
			array.register(&entry),
			Err(FormError::UnknownEntry { .. })
		));
	}

	#[rstest]
	fn test_removed_entry_is_not_submitted(form: FormController) {
		let array = required_array(&form);
		let kept = array.append();
		let dropped = array.append();
		array.register(&kept).unwrap().mount();
		array.register(&dropped).unwrap().mount();

		array.remove(&dropped);

		let values = form.handle_submit(&mut crate::event::FormEvent::new());
		assert_eq!(values.len(), 1);
		assert!(values.contains_key(&kept.name));
	}

	#[rstest]
	fn test_entry_errors_follow_validation() {
		let form = FormController::init(FormConfig::default().with_validate_on_change(true));
		let array = required_array(&form);
		let entry = array.append();
		let binding = array.register(&entry).unwrap();
		binding.mount();
		assert!(!array.entry(entry.id).unwrap().errors.is_empty());

		binding.on_input("filled");

		assert!(array.entry(entry.id).unwrap().errors.is_empty());
	}
}
