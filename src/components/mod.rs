//! Leptos views for the planner.
//!
//! The editors in [`Planner`] are plain Rust state objects. Views read them
//! through a [`PlannerContext`] and re-run when the revision signal of the
//! editor they show is bumped, which happens when an action starts and again
//! when it settles.

pub mod graph_canvas;
mod graph_panel;
mod marks_panel;
mod syllabus_panel;
mod tabs;

use std::future::{Future, poll_fn};
use std::pin::pin;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::controller::Planner;

pub use graph_canvas::GraphCanvas;
pub use graph_panel::{GraphPane, GraphSidebar};
pub use marks_panel::{MarksPane, MarksSidebar};
pub use syllabus_panel::{SyllabusPane, SyllabusSidebar};
pub use tabs::TabBar;

/// One change counter per editor plus one for the active tab.
#[derive(Clone, Copy, Debug)]
pub struct Revisions {
	/// Graph view, path, graph fields.
	pub graph: RwSignal<u64>,
	/// Marks map and ranking.
	pub marks: RwSignal<u64>,
	/// Syllabus fields, working structure, loaded tree.
	pub syllabus: RwSignal<u64>,
	/// Active tab.
	pub tab: RwSignal<u64>,
}

impl Revisions {
	fn new() -> Self {
		Self {
			graph: RwSignal::new(0),
			marks: RwSignal::new(0),
			syllabus: RwSignal::new(0),
			tab: RwSignal::new(0),
		}
	}
}

pub(crate) fn bump(revision: RwSignal<u64>) {
	revision.update(|r| *r = r.wrapping_add(1));
}

/// Handle shared by every view: the planner and its revision signals.
#[derive(Clone, Copy)]
pub struct PlannerContext {
	planner: StoredValue<Rc<Planner>, LocalStorage>,
	/// Change counters the views track.
	pub revisions: Revisions,
}

impl PlannerContext {
	/// Store `planner` in the current reactive owner.
	pub fn new(planner: Planner) -> Self {
		Self {
			planner: StoredValue::new_local(Rc::new(planner)),
			revisions: Revisions::new(),
		}
	}

	/// Shared handle to the editors.
	pub fn planner(&self) -> Rc<Planner> {
		self.planner.get_value()
	}

	/// Run an editor action in the background.
	///
	/// Each revision in `touched` is bumped after the action's first poll and
	/// again when it settles. The editor marks itself in flight before its first
	/// await, so the first bump already sees it busy. The action's own error
	/// handling has logged or alerted by the time it resolves.
	pub fn spawn<F, Fut>(&self, touched: &[RwSignal<u64>], action: F)
	where
		F: FnOnce(Rc<Planner>) -> Fut + 'static,
		Fut: Future<Output = ()> + 'static,
	{
		let touched = touched.to_vec();
		let planner = self.planner();
		spawn_local(async move {
			let mut task = pin!(action(planner));
			let mut started = false;
			poll_fn(|cx| {
				let poll = task.as_mut().poll(cx);
				if !started {
					started = true;
					for revision in &touched {
						bump(*revision);
					}
				}
				poll
			})
			.await;
			for revision in touched {
				bump(revision);
			}
		});
	}
}
