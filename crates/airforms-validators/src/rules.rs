//! Named rule sets bound to a field

use crate::errors::ValidatorResult;
use crate::registry::{RuleSpec, ValidatorRegistry};
use crate::value::FieldValue;
use crate::Validator;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Failing rules of a single field: rule name -> error message.
pub type RuleErrors = HashMap<String, String>;

/// Ordered set of named validators.
///
/// Rule names are unique; inserting an existing name replaces its validator
/// and keeps its position.
///
/// # Examples
///
/// ```
/// use airforms_validators::{Rules, has_max_length, is_required};
/// use serde_json::json;
///
/// let rules = Rules::new()
///     .with("required", is_required("This field is required"))
///     .with("maxLength", has_max_length(8, "Too long"));
///
/// let errors = rules.evaluate(&json!(""));
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors["required"], "This field is required");
/// ```
#[derive(Clone, Default)]
pub struct Rules {
	entries: Vec<(String, Validator)>,
}

impl Rules {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder form of [`Rules::insert`].
	pub fn with(mut self, name: impl Into<String>, validator: Validator) -> Self {
		self.insert(name, validator);
		self
	}

	/// Adds or replaces the rule called `name`.
	pub fn insert(&mut self, name: impl Into<String>, validator: Validator) {
		let name = name.into();
		match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
			Some(entry) => entry.1 = validator,
			None => self.entries.push((name, validator)),
		}
	}

	pub fn remove(&mut self, name: &str) -> Option<Validator> {
		let pos = self.entries.iter().position(|(existing, _)| existing == name)?;
		Some(self.entries.remove(pos).1)
	}

	pub fn get(&self, name: &str) -> Option<&Validator> {
		self.entries
			.iter()
			.find(|(existing, _)| existing == name)
			.map(|(_, validator)| validator)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(name, _)| name.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Validator)> {
		self.entries
			.iter()
			.map(|(name, validator)| (name.as_str(), validator))
	}

	/// Runs every rule against `value` and collects the failing ones.
	///
	/// Each validator is invoked exactly once.
	pub fn evaluate(&self, value: &FieldValue) -> RuleErrors {
		self.entries
			.iter()
			.filter_map(|(name, validator)| validator(value).map(|message| (name.clone(), message)))
			.collect()
	}

	/// Builds a rule set from declarative specs.
	///
	/// # Errors
	///
	/// Fails on the first spec naming an unknown validator or carrying
	/// invalid parameters.
	///
	/// # Examples
	///
	/// ```
	/// use airforms_validators::{RuleSpec, Rules, ValidatorRegistry};
	/// use serde_json::json;
	///
	/// let specs: Vec<RuleSpec> = serde_json::from_value(json!([
	///     {"validator": "required", "message": "This field is required"},
	///     {"name": "maxLength", "validator": "max_length", "params": {"max": 8}, "message": "Too long"},
	/// ])).unwrap();
	///
	/// let rules = Rules::from_specs(&specs, &ValidatorRegistry::with_defaults()).unwrap();
	/// assert_eq!(rules.names().collect::<Vec<_>>(), vec!["required", "maxLength"]);
	/// ```
	pub fn from_specs(specs: &[RuleSpec], registry: &ValidatorRegistry) -> ValidatorResult<Self> {
		let mut rules = Self::new();
		for spec in specs {
			rules.insert(spec.rule_name(), spec.build(registry)?);
		}
		Ok(rules)
	}
}

impl fmt::Debug for Rules {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.names()).finish()
	}
}

/// Two rule sets are equal when they hold the same names in the same order,
/// each bound to the same validator instance.
impl PartialEq for Rules {
	fn eq(&self, other: &Self) -> bool {
		self.entries.len() == other.entries.len()
			&& self
				.entries
				.iter()
				.zip(&other.entries)
				.all(|((a_name, a), (b_name, b))| a_name == b_name && Arc::ptr_eq(a, b))
	}
}

impl<N: Into<String>> FromIterator<(N, Validator)> for Rules {
	fn from_iter<I: IntoIterator<Item = (N, Validator)>>(iter: I) -> Self {
		let mut rules = Self::new();
		for (name, validator) in iter {
			rules.insert(name, validator);
		}
		rules
	}
}
