//! Request and response bodies exchanged with the planning service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::syllabus::tree::{ModuleEntry, SyllabusNode, SyllabusTree};

/// A subject as returned by `/get-graph`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SubjectNode {
	/// Subject name.
	pub id: String,
	/// Display text, the same name in practice.
	pub label: String,
}

/// A prerequisite relation as returned by `/get-graph`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DependencyEdge {
	/// Prerequisite subject id.
	pub source: String,
	/// Dependent subject id.
	pub target: String,
}

/// Canonical graph state.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphPayload {
	/// Subjects in insertion order.
	#[serde(default)]
	pub nodes: Vec<SubjectNode>,
	/// Prerequisite relations.
	#[serde(default)]
	pub edges: Vec<DependencyEdge>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddSubjectRequest<'a> {
	pub subject: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddDependencyRequest<'a> {
	pub prerequisite: &'a str,
	pub dependent: &'a str,
}

/// Body of `/add-syllabus`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SyllabusRequest {
	/// Root of the tree.
	pub subject: String,
	/// Modules in insertion order.
	pub modules: Vec<ModuleEntry>,
}

/// Acknowledgement of a mutation.
///
/// The service answers mutations with `{"message": ..}` or `{"error": ..}`;
/// any other body still counts as acknowledged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ack {
	/// Success text, if any.
	pub message: Option<String>,
	/// Rejection reason, if any.
	pub error: Option<String>,
}

impl Ack {
	/// Pick the known fields out of an arbitrary JSON body.
	pub fn from_value(value: &Value) -> Self {
		let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
		Self {
			message: field("message"),
			error: field("error"),
		}
	}
}

/// Answer of `/generate-path`: either a path or an error message.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PathOutcome {
	/// Study order, prerequisites first.
	#[serde(default)]
	pub path: Option<Vec<String>>,
	/// Shown to the user when there is no path.
	#[serde(default)]
	pub error: Option<String>,
}

/// One entry of the weakness ranking, sent as a `[score, subject]` pair.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "(f64, String)")]
pub struct WeakTopic {
	/// Percentage.
	pub score: f64,
	/// Subject the score belongs to.
	pub subject: String,
}

impl From<(f64, String)> for WeakTopic {
	fn from((score, subject): (f64, String)) -> Self {
		Self { score, subject }
	}
}

/// Answer of `/get-syllabus/{subject}`.
///
/// A missing subject comes back as `{"error": ..}` with no root name.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SyllabusLookup {
	/// Root name; absent when the subject has no syllabus.
	#[serde(default)]
	pub name: Option<String>,
	/// Module nodes.
	#[serde(default)]
	pub children: Vec<SyllabusNode>,
	/// Set instead of `name` on a miss.
	#[serde(default)]
	pub error: Option<String>,
}

impl SyllabusLookup {
	/// The saved tree, if the lookup carries a recognizable root name.
	pub fn into_tree(self) -> Option<SyllabusTree> {
		let name = self.name.filter(|n| !n.is_empty())?;
		Some(SyllabusTree::from_root(SyllabusNode {
			name,
			children: self.children,
		}))
	}
}
