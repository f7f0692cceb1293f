use std::sync::Mutex;

/// Sink for non-fatal decode warnings such as unknown section names.
pub trait Diagnostics: Send + Sync {
	/// Report one warning. Decoding continues regardless.
	fn warn(&self, message: &str);
}

/// Forwards warnings to `tracing` at WARN level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
	fn warn(&self, message: &str) {
		tracing::warn!("{message}");
	}
}

/// Discards every warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentDiagnostics;

impl Diagnostics for SilentDiagnostics {
	fn warn(&self, _message: &str) {}
}

/// Records warnings in order for later inspection.
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
	messages: Mutex<Vec<String>>,
}

impl CollectedDiagnostics {
	/// Create an empty collector.
	pub fn new() -> Self {
		Self::default()
	}

	/// Return a copy of every recorded message.
	pub fn messages(&self) -> Vec<String> {
		self.messages.lock().map(|items| items.clone()).unwrap_or_default()
	}

	/// Consume the collector and return its messages.
	pub fn into_messages(self) -> Vec<String> {
		self.messages.into_inner().unwrap_or_default()
	}
}

impl Diagnostics for CollectedDiagnostics {
	fn warn(&self, message: &str) {
		tracing::debug!(warning = message, "collected decode warning");
		if let Ok(mut items) = self.messages.lock() {
			items.push(message.to_owned());
		}
	}
}
