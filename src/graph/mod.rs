//! Subject dependency graph: reconciliation of canonical state into positioned
//! visual nodes and edges, plus the mutations that feed it.
//!
//! Every successful mutation is followed by a full refetch. Local visual state
//! is rebuilt from scratch on each refresh; nothing about node positions
//! survives one.

mod layout;

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use log::{error, info, warn};

pub use layout::{GridLayout, Position};

use crate::api::{Ack, GraphPayload, PlannerApi};
use crate::error::{Error, Result};
use crate::notify::Notifier;
use crate::pending::InFlight;

/// Box dimensions of a subject node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
	/// Box width in canvas units.
	pub width: f64,
	/// Box height in canvas units.
	pub height: f64,
}

impl Default for NodeStyle {
	fn default() -> Self {
		Self {
			width: 150.0,
			height: 40.0,
		}
	}
}

/// A subject placed on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualNode {
	/// Subject name, unique within the graph.
	pub id: String,
	/// Text drawn inside the box.
	pub label: String,
	/// Top-left corner of the box.
	pub position: Position,
	/// Box size.
	pub style: NodeStyle,
}

/// A directed prerequisite edge between two placed subjects.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualEdge {
	/// `e{index}` in fetch order.
	pub id: String,
	/// Prerequisite subject.
	pub source: String,
	/// Dependent subject.
	pub target: String,
	/// Drawn with a flowing dash.
	pub animated: bool,
}

/// Text typed into the graph forms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphFields {
	/// New subject name.
	pub subject: String,
	/// Prerequisite end of a new dependency.
	pub prerequisite: String,
	/// Dependent end of a new dependency.
	pub dependent: String,
}

/// Everything the canvas draws.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphView {
	/// Subjects in fetch order.
	pub nodes: Vec<VisualNode>,
	/// Edges whose endpoints are both in `nodes`.
	pub edges: Vec<VisualEdge>,
}

impl GraphView {
	/// Build visual state from canonical graph data.
	///
	/// Nodes are positioned by fetch order. Edges naming an unknown subject are dropped.
	pub fn reconcile(payload: GraphPayload, layout: &GridLayout) -> Self {
		let nodes: Vec<VisualNode> = payload
			.nodes
			.into_iter()
			.enumerate()
			.map(|(i, n)| VisualNode {
				id: n.id,
				label: n.label,
				position: layout.position(i),
				style: NodeStyle::default(),
			})
			.collect();

		let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
		let mut edges = Vec::with_capacity(payload.edges.len());
		for (i, e) in payload.edges.into_iter().enumerate() {
			if !known.contains(e.source.as_str()) || !known.contains(e.target.as_str()) {
				warn!(
					"study-planner: dropping edge {} -> {} with unknown endpoint",
					e.source, e.target
				);
				continue;
			}
			edges.push(VisualEdge {
				id: format!("e{}", i),
				source: e.source,
				target: e.target,
				animated: true,
			});
		}

		Self { nodes, edges }
	}

	/// True when there are no subjects to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

/// Owns the graph editor's state and talks to the service on its behalf.
pub struct GraphEditor {
	api: Rc<dyn PlannerApi>,
	notifier: Rc<dyn Notifier>,
	layout: GridLayout,
	view: RefCell<GraphView>,
	path: RefCell<Vec<String>>,
	fields: RefCell<GraphFields>,
	in_flight: InFlight,
}

impl GraphEditor {
	/// Editor with an empty view, no path and blank fields.
	pub fn new(api: Rc<dyn PlannerApi>, notifier: Rc<dyn Notifier>, layout: GridLayout) -> Self {
		Self {
			api,
			notifier,
			layout,
			view: RefCell::new(GraphView::default()),
			path: RefCell::new(Vec::new()),
			fields: RefCell::new(GraphFields::default()),
			in_flight: InFlight::new(),
		}
	}

	/// Refetch the graph and replace all visual state.
	///
	/// On failure the current view is left as it was.
	pub async fn refresh(&self) -> Result<()> {
		let _pending = self.in_flight.begin();
		let payload = self.api.fetch_graph().await.inspect_err(|e| {
			error!("study-planner: error connecting to backend: {}", e);
		})?;
		let view = GraphView::reconcile(payload, &self.layout);
		info!(
			"study-planner: graph has {} nodes, {} edges",
			view.nodes.len(),
			view.edges.len()
		);
		*self.view.borrow_mut() = view;
		Ok(())
	}

	/// Create a subject, then refresh. Empty names are refused without a request.
	pub async fn add_subject(&self, name: &str) -> Result<()> {
		if name.is_empty() {
			return Err(Error::MissingField("subject"));
		}
		let ack = {
			let _pending = self.in_flight.begin();
			self.api.add_subject(name).await
		};
		self.after_mutation("add subject", ack).await
	}

	/// Record that `from` is a prerequisite of `to`, then refresh.
	///
	/// Cycles and duplicates are the service's concern.
	pub async fn add_dependency(&self, from: &str, to: &str) -> Result<()> {
		if from.is_empty() {
			return Err(Error::MissingField("prerequisite"));
		}
		if to.is_empty() {
			return Err(Error::MissingField("dependent"));
		}
		let ack = {
			let _pending = self.in_flight.begin();
			self.api.add_dependency(from, to).await
		};
		self.after_mutation("add dependency", ack).await
	}

	/// Add the subject typed in the form. The field clears once the service accepts it.
	pub async fn add_subject_from_fields(&self) -> Result<()> {
		let name = self.fields.borrow().subject.clone();
		self.add_subject(&name).await?;
		self.fields.borrow_mut().subject.clear();
		Ok(())
	}

	/// Link the two subjects typed in the form, clearing both fields on success.
	pub async fn add_dependency_from_fields(&self) -> Result<()> {
		let GraphFields {
			prerequisite,
			dependent,
			..
		} = self.fields();
		self.add_dependency(&prerequisite, &dependent).await?;
		let mut fields = self.fields.borrow_mut();
		fields.prerequisite.clear();
		fields.dependent.clear();
		Ok(())
	}

	async fn after_mutation(&self, action: &str, ack: Result<Ack>) -> Result<()> {
		let ack = ack.inspect_err(|e| {
			error!("study-planner: {} failed: {}", action, e);
		})?;
		if let Some(reason) = ack.error {
			warn!("study-planner: service rejected {}: {}", action, reason);
		}
		self.refresh().await
	}

	/// Ask the service for a study order and keep it as the current path.
	///
	/// A service-side error is shown to the user and leaves the previous path in place.
	pub async fn generate_path(&self) -> Result<Vec<String>> {
		let outcome = {
			let _pending = self.in_flight.begin();
			self.api.generate_path().await.inspect_err(|e| {
				error!("study-planner: generating path failed: {}", e);
			})?
		};
		match outcome.path {
			Some(path) => {
				info!("study-planner: path has {} subjects", path.len());
				*self.path.borrow_mut() = path.clone();
				Ok(path)
			}
			None => {
				let reason = outcome.error.unwrap_or_else(|| "unknown error".to_string());
				self.notifier.alert(&format!("Error: {}", reason));
				Err(Error::Service(reason))
			}
		}
	}

	/// Snapshot of what the canvas should draw.
	pub fn view(&self) -> GraphView {
		self.view.borrow().clone()
	}

	/// Last successfully generated study order.
	pub fn path(&self) -> Vec<String> {
		self.path.borrow().clone()
	}

	/// Current form text.
	pub fn fields(&self) -> GraphFields {
		self.fields.borrow().clone()
	}

	/// Replace the subject field.
	pub fn set_subject(&self, subject: &str) {
		self.fields.borrow_mut().subject = subject.to_string();
	}

	/// Replace the prerequisite field.
	pub fn set_prerequisite(&self, prerequisite: &str) {
		self.fields.borrow_mut().prerequisite = prerequisite.to_string();
	}

	/// Replace the dependent field.
	pub fn set_dependent(&self, dependent: &str) {
		self.fields.borrow_mut().dependent = dependent.to_string();
	}

	/// Requests currently outstanding for this editor.
	pub fn in_flight(&self) -> &InFlight {
		&self.in_flight
	}
}
