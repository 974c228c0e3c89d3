//! study-planner: single-page client for the study planning service.
//!
//! Three independent editors share one page: a prerequisite graph between
//! subjects, a marks form with the service's weakness ranking, and a syllabus
//! tree builder. Each editor is a plain state object in this crate that talks
//! to the service through [`api::PlannerApi`]; the Leptos views in
//! [`components`] only read that state and trigger its operations.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod api;
pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod graph;
pub mod marks;
pub mod notify;
pub mod pending;
pub mod syllabus;

#[cfg(test)]
mod testing;

use api::HttpApi;
use components::{
	GraphPane, GraphSidebar, MarksPane, MarksSidebar, PlannerContext, SyllabusPane,
	SyllabusSidebar, TabBar,
};
use config::PlannerConfig;
use controller::{Planner, Tab};
use notify::BrowserNotifier;

pub use error::{Error, Result};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("study-planner: logging initialized");
}

/// Main application component.
///
/// Reads configuration from the host page, wires the editors to the service
/// and fetches the graph once on mount.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = PlannerConfig::load();
	let api = Rc::new(HttpApi::from_config(&config));
	info!("study-planner: talking to {}", api.base_url());
	let ctx = PlannerContext::new(Planner::new(api, Rc::new(BrowserNotifier), &config));
	let revisions = ctx.revisions;

	ctx.spawn(&[revisions.graph], |p| async move {
		let _ = p.graph().refresh().await;
	});

	let sidebar = move || {
		revisions.tab.track();
		match ctx.planner().active_tab() {
			Tab::Graph => view! { <GraphSidebar ctx=ctx /> }.into_any(),
			Tab::Marks => view! { <MarksSidebar ctx=ctx /> }.into_any(),
			Tab::Syllabus => view! { <SyllabusSidebar ctx=ctx /> }.into_any(),
		}
	};

	let main_area = move || {
		revisions.tab.track();
		match ctx.planner().active_tab() {
			Tab::Graph => view! { <GraphPane ctx=ctx /> }.into_any(),
			Tab::Marks => view! { <MarksPane ctx=ctx /> }.into_any(),
			Tab::Syllabus => view! { <SyllabusPane ctx=ctx /> }.into_any(),
		}
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Study Planner" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="app-container">
			<div class="sidebar">
				<h1>"🎓 Study Planner"</h1>
				<TabBar ctx=ctx />
				{sidebar}
			</div>
			<div class="graph-area">{main_area}</div>
		</div>
	}
}
