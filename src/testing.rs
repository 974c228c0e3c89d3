//! In-memory stand-ins for the planning service and the alert dialog.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::future::poll_fn;
use std::task::Poll;

use async_trait::async_trait;

use crate::api::{
	Ack, DependencyEdge, GraphPayload, PathOutcome, PlannerApi, SubjectNode, SyllabusLookup,
	SyllabusRequest, WeakTopic,
};
use crate::error::{Error, Result};
use crate::marks::MarksMap;
use crate::notify::Notifier;
use crate::syllabus::tree::SyllabusTree;

/// Behaves like the planning service, keeping everything in memory.
#[derive(Default)]
pub struct FakeService {
	graph: RefCell<Vec<(String, Vec<String>)>>,
	scores: RefCell<Vec<(String, f64)>>,
	syllabi: RefCell<HashMap<String, SyllabusTree>>,
	calls: RefCell<Vec<&'static str>>,
	offline: Cell<bool>,
	slow: Cell<bool>,
	last_marks: RefCell<Option<MarksMap>>,
	last_syllabus: RefCell<Option<SyllabusRequest>>,
	ranking_override: RefCell<Option<Vec<WeakTopic>>>,
}

impl FakeService {
	pub fn new() -> Self {
		Self::default()
	}

	/// Fail every subsequent call as if the service were unreachable.
	pub fn set_offline(&self, offline: bool) {
		self.offline.set(offline);
	}

	/// Make every call suspend once before it answers.
	pub fn set_slow(&self, slow: bool) {
		self.slow.set(slow);
	}

	pub fn set_ranking_override(&self, ranking: Vec<WeakTopic>) {
		*self.ranking_override.borrow_mut() = Some(ranking);
	}

	pub fn calls_to(&self, endpoint: &str) -> usize {
		self.calls.borrow().iter().filter(|c| **c == endpoint).count()
	}

	pub fn total_calls(&self) -> usize {
		self.calls.borrow().len()
	}

	pub fn last_marks(&self) -> Option<MarksMap> {
		self.last_marks.borrow().clone()
	}

	pub fn last_syllabus(&self) -> Option<SyllabusRequest> {
		self.last_syllabus.borrow().clone()
	}

	async fn respond(&self, endpoint: &'static str) -> Result<()> {
		if self.slow.get() {
			let mut suspended = false;
			poll_fn(|cx| {
				if suspended {
					return Poll::Ready(());
				}
				suspended = true;
				cx.waker().wake_by_ref();
				Poll::Pending
			})
			.await;
		}
		self.calls.borrow_mut().push(endpoint);
		if self.offline.get() {
			return Err(Error::Timeout {
				endpoint: endpoint.to_string(),
			});
		}
		Ok(())
	}

	fn topological_order(&self) -> Option<Vec<String>> {
		let graph = self.graph.borrow();
		let mut in_degree: HashMap<&str, usize> =
			graph.iter().map(|(s, _)| (s.as_str(), 0)).collect();
		for (_, deps) in graph.iter() {
			for d in deps {
				*in_degree.entry(d.as_str()).or_insert(0) += 1;
			}
		}
		let mut queue: VecDeque<&str> = graph
			.iter()
			.map(|(s, _)| s.as_str())
			.filter(|s| in_degree[s] == 0)
			.collect();
		let mut order = Vec::new();
		while let Some(subject) = queue.pop_front() {
			order.push(subject.to_string());
			if let Some((_, deps)) = graph.iter().find(|(s, _)| s == subject) {
				for d in deps {
					let degree = in_degree.entry(d.as_str()).or_insert(0);
					*degree -= 1;
					if *degree == 0 {
						queue.push_back(d.as_str());
					}
				}
			}
		}
		(!order.is_empty() && order.len() == graph.len()).then_some(order)
	}
}

fn ack(message: &str) -> Ack {
	Ack {
		message: Some(message.to_string()),
		error: None,
	}
}

fn rejection(reason: &str) -> Ack {
	Ack {
		message: None,
		error: Some(reason.to_string()),
	}
}

#[async_trait(?Send)]
impl PlannerApi for FakeService {
	async fn fetch_graph(&self) -> Result<GraphPayload> {
		self.respond("/get-graph").await?;
		let graph = self.graph.borrow();
		Ok(GraphPayload {
			nodes: graph
				.iter()
				.map(|(s, _)| SubjectNode {
					id: s.clone(),
					label: s.clone(),
				})
				.collect(),
			edges: graph
				.iter()
				.flat_map(|(s, deps)| {
					deps.iter().map(move |d| DependencyEdge {
						source: s.clone(),
						target: d.clone(),
					})
				})
				.collect(),
		})
	}

	async fn add_subject(&self, subject: &str) -> Result<Ack> {
		self.respond("/add-subject").await?;
		let mut graph = self.graph.borrow_mut();
		if graph.iter().any(|(s, _)| s == subject) {
			return Ok(rejection("Exists"));
		}
		graph.push((subject.to_string(), Vec::new()));
		Ok(ack("Added"))
	}

	async fn add_dependency(&self, prerequisite: &str, dependent: &str) -> Result<Ack> {
		self.respond("/add-dependency").await?;
		let mut graph = self.graph.borrow_mut();
		if !graph.iter().any(|(s, _)| s == dependent) {
			return Ok(rejection("Subject not found"));
		}
		let Some((_, deps)) = graph.iter_mut().find(|(s, _)| s == prerequisite) else {
			return Ok(rejection("Subject not found"));
		};
		if deps.iter().any(|d| d == dependent) {
			return Ok(rejection("Relation already exists"));
		}
		deps.push(dependent.to_string());
		Ok(ack("Added"))
	}

	async fn generate_path(&self) -> Result<PathOutcome> {
		self.respond("/generate-path").await?;
		Ok(match self.topological_order() {
			Some(path) => PathOutcome {
				path: Some(path),
				error: None,
			},
			None => PathOutcome {
				path: None,
				error: Some("Cycle detected!".to_string()),
			},
		})
	}

	async fn submit_marks(&self, marks: &MarksMap) -> Result<Ack> {
		self.respond("/submit-marks").await?;
		let mut scores = self.scores.borrow_mut();
		for (subject, score) in marks.iter() {
			match scores.iter_mut().find(|(s, _)| s == subject) {
				Some(entry) => entry.1 = score,
				None => scores.push((subject.to_string(), score)),
			}
		}
		*self.last_marks.borrow_mut() = Some(marks.clone());
		Ok(ack("Marks updated!"))
	}

	async fn fetch_weak_topics(&self) -> Result<Vec<WeakTopic>> {
		self.respond("/get-weak-topics").await?;
		if let Some(ranking) = self.ranking_override.borrow().clone() {
			return Ok(ranking);
		}
		let mut ranking: Vec<WeakTopic> = self
			.scores
			.borrow()
			.iter()
			.map(|(subject, score)| WeakTopic {
				score: *score,
				subject: subject.clone(),
			})
			.collect();
		ranking.sort_by(|a, b| {
			a.score
				.total_cmp(&b.score)
				.then_with(|| a.subject.cmp(&b.subject))
		});
		Ok(ranking)
	}

	async fn save_syllabus(&self, request: &SyllabusRequest) -> Result<Ack> {
		self.respond("/add-syllabus").await?;
		self.syllabi.borrow_mut().insert(
			request.subject.clone(),
			SyllabusTree::build(&request.subject, &request.modules),
		);
		*self.last_syllabus.borrow_mut() = Some(request.clone());
		Ok(ack("Syllabus Tree Created"))
	}

	async fn fetch_syllabus(&self, subject: &str) -> Result<SyllabusLookup> {
		self.respond("/get-syllabus").await?;
		Ok(match self.syllabi.borrow().get(subject) {
			Some(tree) => SyllabusLookup {
				name: Some(tree.subject().to_string()),
				children: tree.root().children.clone(),
				error: None,
			},
			None => SyllabusLookup {
				error: Some("Syllabus not found".to_string()),
				..SyllabusLookup::default()
			},
		})
	}
}

/// Collects alert messages instead of showing them.
#[derive(Default)]
pub struct RecordingNotifier {
	messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
	pub fn messages(&self) -> Vec<String> {
		self.messages.borrow().clone()
	}
}

impl Notifier for RecordingNotifier {
	fn alert(&self, message: &str) {
		self.messages.borrow_mut().push(message.to_string());
	}
}
