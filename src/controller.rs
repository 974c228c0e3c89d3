//! View controller: which editor is showing, and the wiring between editors.

use std::cell::Cell;
use std::rc::Rc;

use crate::api::PlannerApi;
use crate::config::PlannerConfig;
use crate::error::Result;
use crate::graph::GraphEditor;
use crate::marks::WeaknessPresenter;
use crate::notify::Notifier;
use crate::syllabus::SyllabusBuilder;

/// The three mutually exclusive editors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
	/// Prerequisite graph and path.
	#[default]
	Graph,
	/// Marks entry and weakness ranking.
	Marks,
	/// Syllabus tree builder.
	Syllabus,
}

impl Tab {
	/// Tabs in display order.
	pub const ALL: [Tab; 3] = [Tab::Graph, Tab::Marks, Tab::Syllabus];

	/// Button text.
	pub fn label(self) -> &'static str {
		match self {
			Tab::Graph => "🕸️ Graph",
			Tab::Marks => "📊 Marks",
			Tab::Syllabus => "🌳 Syllabus",
		}
	}
}

/// Owns the three editors for the lifetime of the page.
///
/// Switching tabs only changes which editor is shown; each editor keeps its
/// own state regardless.
pub struct Planner {
	active: Cell<Tab>,
	graph: GraphEditor,
	marks: WeaknessPresenter,
	syllabus: SyllabusBuilder,
}

impl Planner {
	/// All three editors share `api` and `notifier`.
	pub fn new(api: Rc<dyn PlannerApi>, notifier: Rc<dyn Notifier>, config: &PlannerConfig) -> Self {
		Self {
			active: Cell::new(Tab::default()),
			graph: GraphEditor::new(api.clone(), notifier.clone(), config.layout.clone()),
			marks: WeaknessPresenter::new(api.clone(), config.weak_threshold),
			syllabus: SyllabusBuilder::new(api, notifier),
		}
	}

	/// Editor currently shown.
	pub fn active_tab(&self) -> Tab {
		self.active.get()
	}

	/// Show another editor. Never touches editor state or the network.
	pub fn select(&self, tab: Tab) {
		self.active.set(tab);
	}

	/// Graph editor.
	pub fn graph(&self) -> &GraphEditor {
		&self.graph
	}

	/// Marks form and ranking.
	pub fn marks(&self) -> &WeaknessPresenter {
		&self.marks
	}

	/// Syllabus tree builder.
	pub fn syllabus(&self) -> &SyllabusBuilder {
		&self.syllabus
	}

	/// Generate a study path and start a fresh marks map for it.
	///
	/// Any marks entered for the previous path are discarded. On failure
	/// neither the path nor the marks change.
	pub async fn generate_path(&self) -> Result<()> {
		let path = self.graph.generate_path().await?;
		self.marks.reset_for_path(&path);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{FakeService, RecordingNotifier};

	fn planner(service: &Rc<FakeService>) -> Planner {
		Planner::new(
			service.clone(),
			Rc::new(RecordingNotifier::default()),
			&PlannerConfig::default(),
		)
	}

	#[test]
	fn switching_tabs_keeps_editor_state() {
		let service = Rc::new(FakeService::new());
		let planner = planner(&service);
		assert_eq!(planner.active_tab(), Tab::Graph);

		planner.select(Tab::Syllabus);
		planner.syllabus().add_topic("Functions", "Limits");
		planner.select(Tab::Marks);
		planner.select(Tab::Syllabus);

		assert_eq!(planner.active_tab(), Tab::Syllabus);
		assert_eq!(planner.syllabus().working().modules().len(), 1);
		assert_eq!(service.total_calls(), 0);
	}

	#[tokio::test]
	async fn form_fields_survive_tab_switches() {
		let service = Rc::new(FakeService::new());
		let planner = planner(&service);
		planner.graph().add_subject("Algebra").await.unwrap();
		planner.generate_path().await.unwrap();

		planner.graph().set_subject("Calculus");
		planner.graph().set_prerequisite("Algebra");
		planner.graph().set_dependent("Calculus");
		planner.marks().set_score("Algebra", "64");
		planner.syllabus().set_subject("Maths");
		planner.syllabus().set_module("Functions");
		let graph_fields = planner.graph().fields();
		let syllabus_fields = planner.syllabus().fields();
		let calls = service.total_calls();

		for tab in [Tab::Marks, Tab::Syllabus, Tab::Graph, Tab::Syllabus, Tab::Graph] {
			planner.select(tab);
		}

		assert_eq!(planner.graph().fields(), graph_fields);
		assert_eq!(planner.graph().fields().prerequisite, "Algebra");
		assert_eq!(planner.marks().marks().get("Algebra"), Some(64.0));
		assert_eq!(planner.syllabus().fields(), syllabus_fields);
		assert_eq!(service.total_calls(), calls);
	}

	#[tokio::test]
	async fn new_path_resets_marks_to_zero() {
		let service = Rc::new(FakeService::new());
		let planner = planner(&service);
		planner.graph().add_subject("Algebra").await.unwrap();
		planner.graph().add_subject("Calculus").await.unwrap();
		planner.generate_path().await.unwrap();
		planner.marks().set_score("Algebra", "40");

		planner.graph().add_subject("Physics").await.unwrap();
		planner.generate_path().await.unwrap();

		let marks = planner.marks().marks();
		let entries: Vec<_> = marks.iter().collect();
		assert_eq!(
			entries,
			[("Algebra", 0.0), ("Calculus", 0.0), ("Physics", 0.0)]
		);
	}

	#[tokio::test]
	async fn failed_path_keeps_marks() {
		let service = Rc::new(FakeService::new());
		let planner = planner(&service);
		planner.graph().add_subject("A").await.unwrap();
		planner.graph().add_subject("B").await.unwrap();
		planner.generate_path().await.unwrap();
		planner.marks().set_score("A", "12");

		planner.graph().add_dependency("A", "B").await.unwrap();
		planner.graph().add_dependency("B", "A").await.unwrap();
		assert!(planner.generate_path().await.is_err());

		assert_eq!(planner.marks().marks().get("A"), Some(12.0));
	}
}
