//! Syllabus tree builder.
//!
//! Building and loading are independent. Topics are collected into a local
//! [`WorkingStructure`] and saved in one request, which ends the session.
//! Loading fetches a saved tree for display only and never touches the
//! working structure.

pub mod tree;

use std::cell::RefCell;
use std::rc::Rc;

use log::{error, info, warn};

use crate::api::{PlannerApi, SyllabusRequest};
use crate::error::{Error, Result};
use crate::notify::Notifier;
use crate::pending::InFlight;

pub use tree::{ModuleEntry, SyllabusNode, SyllabusTree, WorkingStructure, flatten, unflatten};

/// Text of the syllabus form fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyllabusFields {
	/// Root subject, used by save and load.
	pub subject: String,
	/// Module the next topic goes into.
	pub module: String,
	/// Topic to add.
	pub topic: String,
}

/// Owns the syllabus working session and the last loaded tree.
pub struct SyllabusBuilder {
	api: Rc<dyn PlannerApi>,
	notifier: Rc<dyn Notifier>,
	working: RefCell<WorkingStructure>,
	fields: RefCell<SyllabusFields>,
	loaded: RefCell<Option<SyllabusTree>>,
	in_flight: InFlight,
}

impl SyllabusBuilder {
	/// Empty session with nothing loaded.
	pub fn new(api: Rc<dyn PlannerApi>, notifier: Rc<dyn Notifier>) -> Self {
		Self {
			api,
			notifier,
			working: RefCell::new(WorkingStructure::new()),
			fields: RefCell::new(SyllabusFields::default()),
			loaded: RefCell::new(None),
			in_flight: InFlight::new(),
		}
	}

	/// Current form text.
	pub fn fields(&self) -> SyllabusFields {
		self.fields.borrow().clone()
	}

	/// Replace the subject field.
	pub fn set_subject(&self, subject: &str) {
		self.fields.borrow_mut().subject = subject.to_string();
	}

	/// Replace the module field.
	pub fn set_module(&self, module: &str) {
		self.fields.borrow_mut().module = module.to_string();
	}

	/// Replace the topic field.
	pub fn set_topic(&self, topic: &str) {
		self.fields.borrow_mut().topic = topic.to_string();
	}

	/// Append `topic` to `module`. Does nothing unless both are non-empty.
	pub fn add_topic(&self, module: &str, topic: &str) -> bool {
		self.working.borrow_mut().add_topic(module, topic)
	}

	/// Add the topic currently typed in the form, then clear the topic field.
	pub fn add_topic_from_fields(&self) -> bool {
		let SyllabusFields { module, topic, .. } = self.fields();
		let added = self.add_topic(&module, &topic);
		if added {
			self.fields.borrow_mut().topic.clear();
		}
		added
	}

	/// Submit the working structure under `subject`.
	///
	/// On success the working structure, the subject and module fields and
	/// any loaded tree are all cleared.
	pub async fn save(&self, subject: &str) -> Result<()> {
		if subject.is_empty() {
			self.notifier.alert("Please enter a Subject Name first.");
			return Err(Error::MissingField("subject"));
		}
		let request = SyllabusRequest {
			subject: subject.to_string(),
			modules: flatten(&self.working.borrow()),
		};

		let ack = {
			let _pending = self.in_flight.begin();
			self.api.save_syllabus(&request).await.inspect_err(|e| {
				error!("study-planner: saving syllabus failed: {}", e);
			})?
		};
		if let Some(reason) = ack.error {
			warn!("study-planner: service rejected syllabus: {}", reason);
		}

		info!(
			"study-planner: saved syllabus '{}' with {} modules",
			subject,
			request.modules.len()
		);
		self.working.borrow_mut().clear();
		{
			let mut fields = self.fields.borrow_mut();
			fields.module.clear();
			fields.subject.clear();
		}
		*self.loaded.borrow_mut() = None;
		self.notifier
			.alert(&format!("Syllabus Tree for '{}' saved successfully!", subject));
		Ok(())
	}

	/// Fetch the saved tree for `subject` into the loaded view.
	pub async fn load(&self, subject: &str) -> Result<()> {
		if subject.is_empty() {
			self.notifier
				.alert("Enter a subject name (e.g. Maths) to load.");
			return Err(Error::MissingField("subject"));
		}
		let lookup = {
			let _pending = self.in_flight.begin();
			self.api.fetch_syllabus(subject).await.inspect_err(|e| {
				error!("study-planner: loading syllabus failed: {}", e);
			})?
		};
		match lookup.into_tree() {
			Some(tree) => {
				info!("study-planner: loaded syllabus '{}'", tree.subject());
				*self.loaded.borrow_mut() = Some(tree);
				Ok(())
			}
			None => {
				self.notifier.alert("Syllabus not found!");
				Err(Error::SyllabusNotFound(subject.to_string()))
			}
		}
	}

	/// Modules and topics added since the last save.
	pub fn working(&self) -> WorkingStructure {
		self.working.borrow().clone()
	}

	/// Tree from the last successful load.
	pub fn loaded(&self) -> Option<SyllabusTree> {
		self.loaded.borrow().clone()
	}

	/// Requests currently outstanding for the syllabus.
	pub fn in_flight(&self) -> &InFlight {
		&self.in_flight
	}
}
