//! Field references held by the form registry

use crate::error::{FormError, FormResult};
use airforms_validators::{FieldValue, Rules, Validator};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A validated, non-blank field name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldName(String);

impl FieldName {
	/// # Errors
	///
	/// [`FormError::BlankFieldName`] when `name` is empty or whitespace-only.
	///
	/// # Examples
	///
	/// ```
	/// use airforms_forms::FieldName;
	///
	/// assert!(FieldName::parse("firstName").is_ok());
	/// assert!(FieldName::parse("   ").is_err());
	/// ```
	pub fn parse(name: impl Into<String>) -> FormResult<Self> {
		let name = name.into();
		if name.trim().is_empty() {
			return Err(FormError::BlankFieldName(Some(name)));
		}
		Ok(Self(name))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_inner(self) -> String {
		self.0
	}
}

impl TryFrom<Option<&str>> for FieldName {
	type Error = FormError;

	fn try_from(name: Option<&str>) -> FormResult<Self> {
		match name {
			Some(name) => Self::parse(name),
			None => Err(FormError::BlankFieldName(None)),
		}
	}
}

impl AsRef<str> for FieldName {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for FieldName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Live value cell of an input.
///
/// Clones share the same cell: a value written through any handle is what
/// the next validation of the owning field observes.
#[derive(Clone, Default)]
pub struct InputElement {
	value: Rc<RefCell<FieldValue>>,
}

impl InputElement {
	pub fn new(value: impl Into<FieldValue>) -> Self {
		Self {
			value: Rc::new(RefCell::new(value.into())),
		}
	}

	pub fn value(&self) -> FieldValue {
		self.value.borrow().clone()
	}

	pub fn set_value(&self, value: impl Into<FieldValue>) {
		*self.value.borrow_mut() = value.into();
	}

	/// Whether both handles point at the same cell.
	pub fn same_element(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.value, &other.value)
	}
}

impl PartialEq for InputElement {
	fn eq(&self, other: &Self) -> bool {
		self.same_element(other)
	}
}

impl fmt::Debug for InputElement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("InputElement")
			.field("value", &*self.value.borrow())
			.finish()
	}
}

/// Registry entry of one form input: its name, rules and live value.
///
/// `name` is optional so that a reference produced by a host without a name
/// attribute can be represented; the controller ignores such references.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldReference {
	pub name: Option<String>,
	pub rules: Rules,
	pub element: InputElement,
}

impl FieldReference {
	pub fn new(name: impl Into<String>, element: InputElement) -> Self {
		Self {
			name: Some(name.into()),
			rules: Rules::new(),
			element,
		}
	}

	/// A reference without a name attribute.
	pub fn unnamed(element: InputElement) -> Self {
		Self {
			name: None,
			rules: Rules::new(),
			element,
		}
	}

	pub fn with_rules(mut self, rules: Rules) -> Self {
		self.rules = rules;
		self
	}

	pub fn with_rule(mut self, name: impl Into<String>, validator: Validator) -> Self {
		self.rules.insert(name, validator);
		self
	}

	pub fn value(&self) -> FieldValue {
		self.element.value()
	}
}
