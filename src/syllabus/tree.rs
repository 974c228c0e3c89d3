//! Flat and nested syllabus representations and the conversions between them.
//!
//! The working structure is an insertion-ordered list of modules, each with an
//! ordered list of topics. The service stores the same data as a three-level
//! tree: subject root, module branches, topic leaves. Nothing here touches the
//! network or the DOM.

use serde::{Deserialize, Serialize};

/// A module and its topics, in the shape the save endpoint expects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
	/// Module name, unique within a syllabus.
	pub name: String,
	/// Topics in insertion order.
	pub topics: Vec<String>,
}

/// Syllabus assembled locally before it is saved.
///
/// Modules keep first-seen order and topics keep insertion order; both orders
/// are part of what gets persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkingStructure {
	modules: Vec<ModuleEntry>,
}

impl WorkingStructure {
	/// No modules.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append `topic` under `module`, creating the module on first use.
	///
	/// Returns `false` and leaves the structure untouched if either name is empty.
	pub fn add_topic(&mut self, module: &str, topic: &str) -> bool {
		if module.is_empty() || topic.is_empty() {
			return false;
		}
		self.module_mut(module).topics.push(topic.to_string());
		true
	}

	/// Modules in first-seen order.
	pub fn modules(&self) -> &[ModuleEntry] {
		&self.modules
	}

	/// True when no topic has been added.
	pub fn is_empty(&self) -> bool {
		self.modules.is_empty()
	}

	/// Drop every module.
	pub fn clear(&mut self) {
		self.modules.clear();
	}

	fn module_mut(&mut self, name: &str) -> &mut ModuleEntry {
		let idx = match self.modules.iter().position(|m| m.name == name) {
			Some(idx) => idx,
			None => {
				self.modules.push(ModuleEntry {
					name: name.to_string(),
					topics: Vec::new(),
				});
				self.modules.len() - 1
			}
		};
		&mut self.modules[idx]
	}
}

/// Convert the working structure into the ordered module list sent on save.
pub fn flatten(structure: &WorkingStructure) -> Vec<ModuleEntry> {
	structure.modules.clone()
}

/// Rebuild a working structure from a module list.
///
/// Entries naming the same module are merged in order of appearance.
pub fn unflatten(entries: &[ModuleEntry]) -> WorkingStructure {
	let mut structure = WorkingStructure::new();
	for entry in entries {
		structure
			.module_mut(&entry.name)
			.topics
			.extend(entry.topics.iter().cloned());
	}
	structure
}

/// A node of a persisted syllabus tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllabusNode {
	/// Subject, module or topic name depending on depth.
	pub name: String,
	/// Empty for topics.
	#[serde(default)]
	pub children: Vec<SyllabusNode>,
}

impl SyllabusNode {
	fn leaf(name: &str) -> Self {
		Self {
			name: name.to_string(),
			children: Vec::new(),
		}
	}
}

/// A saved syllabus: subject at the root, modules below it, topics as leaves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyllabusTree {
	root: SyllabusNode,
}

impl SyllabusTree {
	/// Build the nested form of `modules` under a `subject` root.
	pub fn build(subject: &str, modules: &[ModuleEntry]) -> Self {
		let children = modules
			.iter()
			.map(|m| SyllabusNode {
				name: m.name.clone(),
				children: m.topics.iter().map(|t| SyllabusNode::leaf(t)).collect(),
			})
			.collect();
		Self {
			root: SyllabusNode {
				name: subject.to_string(),
				children,
			},
		}
	}

	/// Wrap a root node returned by the service.
	pub fn from_root(root: SyllabusNode) -> Self {
		Self { root }
	}

	/// Root name.
	pub fn subject(&self) -> &str {
		&self.root.name
	}

	/// The nested form as stored by the service.
	pub fn root(&self) -> &SyllabusNode {
		&self.root
	}

	/// Flatten back to the module list. Anything below the topic level is ignored.
	pub fn modules(&self) -> Vec<ModuleEntry> {
		self.root
			.children
			.iter()
			.map(|m| ModuleEntry {
				name: m.name.clone(),
				topics: m.children.iter().map(|t| t.name.clone()).collect(),
			})
			.collect()
	}
}
