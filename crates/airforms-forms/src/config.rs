//! Form configuration
//!
//! Diagnostics and validation triggers are driven by an explicit
//! [`FormConfig`] handed to [`FormController::init`](crate::FormController::init)
//! rather than by a process-wide mode flag.

use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable read by [`Profile::from_env`].
pub const PROFILE_ENV_VAR: &str = "AIRFORMS_ENV";

/// Runtime profile of the host application.
///
/// Diagnostic warnings about mis-referenced fields are only emitted outside
/// [`Profile::Production`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
	#[default]
	Development,
	Test,
	Production,
}

impl Profile {
	/// Parse a profile name. Unknown names fall back to development.
	///
	/// # Examples
	///
	/// ```
	/// use airforms_forms::Profile;
	///
	/// assert_eq!(Profile::parse("production"), Profile::Production);
	/// assert_eq!(Profile::parse("PROD"), Profile::Production);
	/// assert_eq!(Profile::parse("whatever"), Profile::Development);
	/// ```
	pub fn parse(value: &str) -> Self {
		match value.trim().to_ascii_lowercase().as_str() {
			"production" | "prod" => Self::Production,
			"test" | "testing" => Self::Test,
			_ => Self::Development,
		}
	}

	/// Read the profile from `AIRFORMS_ENV`, defaulting to development.
	pub fn from_env() -> Self {
		env::var(PROFILE_ENV_VAR)
			.map(|value| Self::parse(&value))
			.unwrap_or_default()
	}

	pub fn is_production(self) -> bool {
		self == Self::Production
	}
}

/// Behaviour switches of a form instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
	pub profile: Profile,
	/// Validate a field as soon as it is registered.
	pub validate_on_register: bool,
	/// Validate a field on every input change.
	pub validate_on_change: bool,
}

impl Default for FormConfig {
	fn default() -> Self {
		Self {
			profile: Profile::Development,
			validate_on_register: true,
			validate_on_change: false,
		}
	}
}

impl FormConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// Default configuration with the profile taken from `AIRFORMS_ENV`.
	pub fn from_env() -> Self {
		Self::default().with_profile(Profile::from_env())
	}

	pub fn with_profile(mut self, profile: Profile) -> Self {
		self.profile = profile;
		self
	}

	pub fn with_validate_on_register(mut self, enabled: bool) -> Self {
		self.validate_on_register = enabled;
		self
	}

	pub fn with_validate_on_change(mut self, enabled: bool) -> Self {
		self.validate_on_change = enabled;
		self
	}
}
