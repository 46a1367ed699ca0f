//! Submit events

/// A form submission event raised by the host UI.
pub trait SubmitEvent {
	/// Stop the host from performing its default submission.
	fn prevent_default(&mut self);
}

/// Plain submit event for hosts without a native event type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormEvent {
	prevent_default_calls: usize,
}

impl FormEvent {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn default_prevented(&self) -> bool {
		self.prevent_default_calls > 0
	}

	pub fn prevent_default_count(&self) -> usize {
		self.prevent_default_calls
	}
}

impl SubmitEvent for FormEvent {
	fn prevent_default(&mut self) {
		self.prevent_default_calls += 1;
	}
}
