//! Remote sync client for the planning service.
//!
//! [`PlannerApi`] is the seam between the editors and the network. The
//! browser build talks to the service through [`HttpApi`]; tests substitute an
//! in-memory implementation.

mod http;
mod types;

use async_trait::async_trait;

pub use http::HttpApi;
pub use types::{
	Ack, DependencyEdge, GraphPayload, PathOutcome, SubjectNode, SyllabusLookup, SyllabusRequest,
	WeakTopic,
};

use crate::error::Result;
use crate::marks::MarksMap;

/// Endpoint paths, relative to the service base address.
pub mod endpoints {
	/// GET, canonical nodes and edges.
	pub const GET_GRAPH: &str = "/get-graph";
	/// POST `{"subject"}`.
	pub const ADD_SUBJECT: &str = "/add-subject";
	/// POST `{"prerequisite", "dependent"}`.
	pub const ADD_DEPENDENCY: &str = "/add-dependency";
	/// GET, topological study order.
	pub const GENERATE_PATH: &str = "/generate-path";
	/// POST, the whole marks map.
	pub const SUBMIT_MARKS: &str = "/submit-marks";
	/// GET, `[score, subject]` pairs.
	pub const GET_WEAK_TOPICS: &str = "/get-weak-topics";
	/// POST `{"subject", "modules"}`.
	pub const ADD_SYLLABUS: &str = "/add-syllabus";
	/// GET, followed by `/{subject}`.
	pub const GET_SYLLABUS: &str = "/get-syllabus";
}

/// Calls exposed by the planning service.
///
/// Futures are not `Send`: everything runs on the browser's single thread.
#[async_trait(?Send)]
pub trait PlannerApi {
	/// `GET /get-graph`
	async fn fetch_graph(&self) -> Result<GraphPayload>;

	/// `POST /add-subject`
	async fn add_subject(&self, subject: &str) -> Result<Ack>;

	/// `POST /add-dependency`
	async fn add_dependency(&self, prerequisite: &str, dependent: &str) -> Result<Ack>;

	/// `GET /generate-path`
	async fn generate_path(&self) -> Result<PathOutcome>;

	/// `POST /submit-marks`
	async fn submit_marks(&self, marks: &MarksMap) -> Result<Ack>;

	/// `GET /get-weak-topics`
	async fn fetch_weak_topics(&self) -> Result<Vec<WeakTopic>>;

	/// `POST /add-syllabus`
	async fn save_syllabus(&self, request: &SyllabusRequest) -> Result<Ack>;

	/// `GET /get-syllabus/{subject}`
	async fn fetch_syllabus(&self, subject: &str) -> Result<SyllabusLookup>;
}
