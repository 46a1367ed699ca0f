//! Named validator registry
//!
//! Rules can be declared as data (for instance in a JSON form description)
//! and resolved against this registry. Each registered id maps to a factory
//! that turns JSON parameters plus an error message into a [`Validator`].
//!
//! ```text
//! RuleSpec { validator: "max_length", params: {"max": 8}, message }
//!     │
//!     ▼
//! ValidatorRegistry::build() ──▶ Validator
//! ```

use crate::errors::{ValidatorError, ValidatorResult};
use crate::{
	Validator, has_length, has_max_length, has_max_value, has_min_length, has_min_value,
	is_email, is_required, is_url, matches_pattern,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

/// Builds a validator from JSON parameters and an error message.
pub type ValidatorFactory =
	Arc<dyn Fn(&serde_json::Value, &str) -> ValidatorResult<Validator> + Send + Sync>;

static VALIDATOR_REGISTRY: OnceLock<Arc<Mutex<ValidatorRegistry>>> = OnceLock::new();

/// Registry of validator factories indexed by id.
pub struct ValidatorRegistry {
	factories: HashMap<String, ValidatorFactory>,
}

impl ValidatorRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self {
			factories: HashMap::new(),
		}
	}

	/// Create a registry holding the built-in validators:
	/// `required`, `min_length`, `max_length`, `length`, `pattern`, `email`,
	/// `url`, `min_value` and `max_value`.
	pub fn with_defaults() -> Self {
		let mut registry = Self::new();
		initialize_default_validators(&mut registry);
		registry
	}

	/// Get the process-wide registry, initialised with the built-in validators.
	pub fn global() -> Arc<Mutex<ValidatorRegistry>> {
		VALIDATOR_REGISTRY
			.get_or_init(|| Arc::new(Mutex::new(Self::with_defaults())))
			.clone()
	}

	/// Register a factory under `id`, replacing any previous one.
	pub fn register<F>(&mut self, id: impl Into<String>, factory: F)
	where
		F: Fn(&serde_json::Value, &str) -> ValidatorResult<Validator> + Send + Sync + 'static,
	{
		self.factories.insert(id.into(), Arc::new(factory));
	}

	pub fn get(&self, id: &str) -> Option<ValidatorFactory> {
		self.factories.get(id).cloned()
	}

	pub fn contains(&self, id: &str) -> bool {
		self.factories.contains_key(id)
	}

	/// Build a validator from a registered factory.
	///
	/// # Errors
	///
	/// [`ValidatorError::UnknownValidator`] when `id` is not registered, or
	/// whatever the factory reports for bad parameters.
	pub fn build(
		&self,
		id: &str,
		params: &serde_json::Value,
		error_message: &str,
	) -> ValidatorResult<Validator> {
		let factory = self
			.get(id)
			.ok_or_else(|| ValidatorError::UnknownValidator(id.to_string()))?;
		factory(params, error_message)
	}
}

impl Default for ValidatorRegistry {
	fn default() -> Self {
		Self::with_defaults()
	}
}

/// Declarative description of one rule.
///
/// `name` is the key under which failures are reported; it defaults to the
/// validator id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
	#[serde(default)]
	pub name: Option<String>,
	pub validator: String,
	#[serde(default)]
	pub params: serde_json::Value,
	pub message: String,
}

impl RuleSpec {
	pub fn new(validator: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			name: None,
			validator: validator.into(),
			params: serde_json::Value::Null,
			message: message.into(),
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn with_params(mut self, params: serde_json::Value) -> Self {
		self.params = params;
		self
	}

	pub fn rule_name(&self) -> &str {
		self.name.as_deref().unwrap_or(&self.validator)
	}

	pub fn build(&self, registry: &ValidatorRegistry) -> ValidatorResult<Validator> {
		registry.build(&self.validator, &self.params, &self.message)
	}
}

fn param<'a>(
	params: &'a serde_json::Value,
	validator: &str,
	key: &str,
) -> ValidatorResult<&'a serde_json::Value> {
	params.get(key).ok_or_else(|| ValidatorError::MissingParam {
		validator: validator.to_string(),
		param: key.to_string(),
	})
}

fn usize_param(params: &serde_json::Value, validator: &str, key: &str) -> ValidatorResult<usize> {
	param(params, validator, key)?
		.as_u64()
		.map(|n| n as usize)
		.ok_or_else(|| ValidatorError::InvalidParam {
			validator: validator.to_string(),
			param: key.to_string(),
			reason: "expected a non-negative integer".to_string(),
		})
}

fn f64_param(params: &serde_json::Value, validator: &str, key: &str) -> ValidatorResult<f64> {
	param(params, validator, key)?
		.as_f64()
		.ok_or_else(|| ValidatorError::InvalidParam {
			validator: validator.to_string(),
			param: key.to_string(),
			reason: "expected a number".to_string(),
		})
}

fn str_param<'a>(
	params: &'a serde_json::Value,
	validator: &str,
	key: &str,
) -> ValidatorResult<&'a str> {
	param(params, validator, key)?
		.as_str()
		.ok_or_else(|| ValidatorError::InvalidParam {
			validator: validator.to_string(),
			param: key.to_string(),
			reason: "expected a string".to_string(),
		})
}

fn initialize_default_validators(registry: &mut ValidatorRegistry) {
	registry.register("required", |_, message| Ok(is_required(message)));
	registry.register("min_length", |params, message| {
		Ok(has_min_length(usize_param(params, "min_length", "min")?, message))
	});
	registry.register("max_length", |params, message| {
		Ok(has_max_length(usize_param(params, "max_length", "max")?, message))
	});
	registry.register("length", |params, message| {
		Ok(has_length(usize_param(params, "length", "length")?, message))
	});
	registry.register("pattern", |params, message| {
		matches_pattern(str_param(params, "pattern", "pattern")?, message)
	});
	registry.register("email", |_, message| Ok(is_email(message)));
	registry.register("url", |_, message| Ok(is_url(message)));
	registry.register("min_value", |params, message| {
		Ok(has_min_value(f64_param(params, "min_value", "min")?, message))
	});
	registry.register("max_value", |params, message| {
		Ok(has_max_value(f64_param(params, "max_value", "max")?, message))
	});
}
