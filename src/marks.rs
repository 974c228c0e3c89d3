//! Marks entry and the weakness ranking.
//!
//! The marks map is keyed by the subjects of the last generated path and is
//! submitted whole. The ranking that comes back is displayed in the order the
//! service returns it; the service is trusted to sort weakest first.

use std::cell::RefCell;
use std::rc::Rc;

use log::{error, info, warn};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::api::{PlannerApi, WeakTopic};
use crate::error::Result;
use crate::pending::InFlight;

/// Per-subject scores, in path order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarksMap {
	entries: Vec<(String, f64)>,
}

impl MarksMap {
	/// One zero score per subject of `path`.
	pub fn for_path(path: &[String]) -> Self {
		let mut entries: Vec<(String, f64)> = Vec::with_capacity(path.len());
		for subject in path {
			if !entries.iter().any(|(s, _)| s == subject) {
				entries.push((subject.clone(), 0.0));
			}
		}
		Self { entries }
	}

	/// Score of `subject`, if it is on the path.
	pub fn get(&self, subject: &str) -> Option<f64> {
		self.entries
			.iter()
			.find(|(s, _)| s == subject)
			.map(|(_, score)| *score)
	}

	/// Set the score of a subject already in the map. Unknown subjects are refused.
	pub fn set(&mut self, subject: &str, score: f64) -> bool {
		match self.entries.iter_mut().find(|(s, _)| s == subject) {
			Some(entry) => {
				entry.1 = score;
				true
			}
			None => false,
		}
	}

	/// Set a score from raw field text. Text that is not a finite number is ignored.
	pub fn set_from_input(&mut self, subject: &str, input: &str) -> bool {
		match input.trim().parse::<f64>() {
			Ok(score) if score.is_finite() => self.set(subject, score),
			_ => false,
		}
	}

	/// Subjects and scores in path order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
		self.entries.iter().map(|(s, score)| (s.as_str(), *score))
	}

	/// Number of subjects.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True before the first successful path.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl Serialize for MarksMap {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.entries.len()))?;
		for (subject, score) in &self.entries {
			map.serialize_entry(subject, score)?;
		}
		map.end()
	}
}

/// Presentation-only classification of a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Standing {
	/// Below the threshold.
	Weak,
	/// At or above the threshold.
	Strong,
}

impl Standing {
	/// Scores strictly below `threshold` are weak.
	pub fn classify(score: f64, threshold: f64) -> Self {
		if score < threshold {
			Standing::Weak
		} else {
			Standing::Strong
		}
	}

	/// Badge text.
	pub fn label(self) -> &'static str {
		match self {
			Standing::Weak => "WEAK",
			Standing::Strong => "STRONG",
		}
	}
}

/// A ranking entry ready to render.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedTopic {
	/// Subject name.
	pub subject: String,
	/// Percentage as returned by the service.
	pub score: f64,
	/// Weak or strong against the configured threshold.
	pub standing: Standing,
}

/// Holds the marks being entered and the last ranking received.
pub struct WeaknessPresenter {
	api: Rc<dyn PlannerApi>,
	marks: RefCell<MarksMap>,
	ranking: RefCell<Vec<WeakTopic>>,
	threshold: f64,
	in_flight: InFlight,
}

impl WeaknessPresenter {
	/// Empty map and ranking. Scores below `threshold` are shown as weak.
	pub fn new(api: Rc<dyn PlannerApi>, threshold: f64) -> Self {
		Self {
			api,
			marks: RefCell::new(MarksMap::default()),
			ranking: RefCell::new(Vec::new()),
			threshold,
			in_flight: InFlight::new(),
		}
	}

	/// Replace the marks map with zero scores for every subject of `path`.
	pub fn reset_for_path(&self, path: &[String]) {
		*self.marks.borrow_mut() = MarksMap::for_path(path);
	}

	/// Snapshot of the marks being entered.
	pub fn marks(&self) -> MarksMap {
		self.marks.borrow().clone()
	}

	/// Update one score from field text.
	pub fn set_score(&self, subject: &str, input: &str) -> bool {
		self.marks.borrow_mut().set_from_input(subject, input)
	}

	/// Whether the view should offer the analyze action.
	pub fn can_submit(&self) -> bool {
		!self.marks.borrow().is_empty()
	}

	/// Submit every mark, then replace the ranking with the service's answer.
	///
	/// An empty map is submitted like any other.
	pub async fn submit(&self) -> Result<()> {
		let marks = self.marks();
		let _pending = self.in_flight.begin();

		let ack = self.api.submit_marks(&marks).await.inspect_err(|e| {
			error!("study-planner: submitting marks failed: {}", e);
		})?;
		if let Some(reason) = ack.error {
			warn!("study-planner: service rejected marks: {}", reason);
		}

		let ranking = self.api.fetch_weak_topics().await.inspect_err(|e| {
			error!("study-planner: fetching weak topics failed: {}", e);
		})?;
		info!("study-planner: ranking has {} topics", ranking.len());
		*self.ranking.borrow_mut() = ranking;
		Ok(())
	}

	/// The last ranking, in service order, with standings applied.
	pub fn ranking(&self) -> Vec<RankedTopic> {
		self.ranking
			.borrow()
			.iter()
			.map(|t| RankedTopic {
				subject: t.subject.clone(),
				score: t.score,
				standing: Standing::classify(t.score, self.threshold),
			})
			.collect()
	}

	/// Requests currently outstanding for marks.
	pub fn in_flight(&self) -> &InFlight {
		&self.in_flight
	}
}
