//! Client configuration.
//!
//! The host page may embed a JSON object in a
//! `<script id="planner-config" type="application/json">` element. Every field
//! is optional; anything left out falls back to the defaults below.

use std::time::Duration;

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::error::Result;
use crate::graph::GridLayout;

/// Address of the planning service when none is configured.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";

/// Id of the inline script element holding the JSON configuration.
const CONFIG_ELEMENT_ID: &str = "planner-config";

/// Runtime configuration for the planner client.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
	/// Base URL of the planning service, without a trailing slash.
	pub api_base: String,
	/// Per-request timeout in milliseconds.
	pub request_timeout_ms: u64,
	/// Scores strictly below this value render as weak.
	pub weak_threshold: f64,
	/// Grid constants for laying out subject nodes.
	pub layout: GridLayout,
}

impl Default for PlannerConfig {
	fn default() -> Self {
		Self {
			api_base: DEFAULT_API_BASE.to_string(),
			request_timeout_ms: 10_000,
			weak_threshold: 50.0,
			layout: GridLayout::default(),
		}
	}
}

impl PlannerConfig {
	/// Parse a configuration document. Missing fields take their defaults.
	pub fn from_json(text: &str) -> Result<Self> {
		let mut config: Self = serde_json::from_str(text)?;
		config.api_base = config.api_base.trim_end_matches('/').to_string();
		Ok(config)
	}

	/// Timeout applied to every request.
	pub fn request_timeout(&self) -> Duration {
		Duration::from_millis(self.request_timeout_ms)
	}

	/// Load configuration from the host page, falling back to defaults.
	pub fn load() -> Self {
		let Some(text) = config_element_text() else {
			return Self::default();
		};
		match Self::from_json(&text) {
			Ok(config) => {
				info!("study-planner: using service at {}", config.api_base);
				config
			}
			Err(e) => {
				warn!("study-planner: ignoring invalid config: {}", e);
				Self::default()
			}
		}
	}
}

fn config_element_text() -> Option<String> {
	let document = web_sys::window()?.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}
