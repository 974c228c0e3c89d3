//! Blocking user notifications.

use log::warn;

/// Shows a message the user has to acknowledge.
pub trait Notifier {
	/// Show `message` and wait for the user to dismiss it.
	fn alert(&self, message: &str);
}

/// Uses `window.alert`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
	fn alert(&self, message: &str) {
		let shown = web_sys::window().map(|w| w.alert_with_message(message).is_ok());
		if shown != Some(true) {
			warn!("study-planner: could not show alert: {}", message);
		}
	}
}
