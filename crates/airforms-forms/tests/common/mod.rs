//! Shared helpers for airforms-forms integration tests

use std::sync::{Arc, Mutex};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// A tracing layer that captures `[LEVEL] message` lines.
#[derive(Clone, Default)]
pub struct LogCapture {
	logs: Arc<Mutex<Vec<String>>>,
}

impl LogCapture {
	/// Install the layer for the current thread until the guard is dropped.
	pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
		let capture = Self::default();
		let guard = tracing_subscriber::registry()
			.with(capture.clone())
			.set_default();
		(capture, guard)
	}

	pub fn lines(&self) -> Vec<String> {
		self.logs.lock().unwrap().clone()
	}

	pub fn warnings(&self) -> Vec<String> {
		self.lines()
			.into_iter()
			.filter_map(|line| line.strip_prefix("[WARN] ").map(str::to_string))
			.collect()
	}
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
	fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
		struct MessageVisitor {
			message: String,
		}

		impl tracing::field::Visit for MessageVisitor {
			fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
				if field.name() == "message" {
					self.message = format!("{:?}", value);
				}
			}
		}

		let mut visitor = MessageVisitor {
			message: String::new(),
		};
		event.record(&mut visitor);

		self.logs.lock().unwrap().push(format!(
			"[{}] {}",
			event.metadata().level(),
			visitor.message
		));
	}
}
