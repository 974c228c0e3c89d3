//! Canvas scene state and interaction tracking.
//!
//! Holds the laid-out subject boxes copied from a [`GraphView`], the pan/zoom
//! transform, drag and pan gestures, and hover highlighting with smooth
//! intensity transitions. Dragging moves boxes locally only; the next
//! refresh replaces the scene.

use std::collections::{HashMap, HashSet};

use crate::graph::GraphView;

/// A subject box in graph space. `(x, y)` is the top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	pub id: String,
	pub label: String,
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl SceneNode {
	pub fn contains(&self, gx: f64, gy: f64) -> bool {
		gx >= self.x && gx <= self.x + self.width && gy >= self.y && gy <= self.y + self.height
	}

	/// Where outgoing edges leave the box.
	pub fn bottom_center(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y + self.height)
	}

	/// Where incoming edges enter the box.
	pub fn top_center(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y)
	}
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Hover highlight for a node and its direct neighbours.
///
/// Each node's intensity (0.0 to 1.0) eases towards 1.0 while it is in the
/// target set and decays otherwise, using exponential smoothing.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	pub hovered: Option<usize>,
	target_set: HashSet<usize>,
	intensity: HashMap<usize, f64>,
	cached_max: f64,
}

impl HighlightState {
	pub fn set_hover(&mut self, node: Option<usize>, edges: &[(usize, usize)]) {
		if self.hovered == node {
			return;
		}
		self.hovered = node;
		self.target_set.clear();
		if let Some(idx) = node {
			self.target_set.insert(idx);
			for &(src, tgt) in edges {
				if src == idx {
					self.target_set.insert(tgt);
				} else if tgt == idx {
					self.target_set.insert(src);
				}
			}
		}
	}

	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 6.0;
		const FADE_OUT_SPEED: f64 = 4.0;

		let fade_in = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out = (-FADE_OUT_SPEED * dt).exp();

		for &idx in &self.target_set {
			let value = self.intensity.entry(idx).or_insert(0.0);
			*value += (1.0 - *value) * fade_in;
		}

		let mut new_max: f64 = 0.0;
		self.intensity.retain(|idx, value| {
			if !self.target_set.contains(idx) {
				*value *= fade_out;
			}
			new_max = new_max.max(*value);
			*value > 0.005
		});
		self.cached_max = new_max;
	}

	pub fn node_intensity(&self, idx: usize) -> f64 {
		self.intensity.get(&idx).copied().unwrap_or(0.0)
	}

	/// Geometric mean of the endpoint intensities.
	pub fn edge_intensity(&self, a: usize, b: usize) -> f64 {
		(self.node_intensity(a) * self.node_intensity(b)).sqrt()
	}

	pub fn max_intensity(&self) -> f64 {
		self.cached_max
	}
}

/// Everything the renderer needs for one frame.
pub struct SceneState {
	pub nodes: Vec<SceneNode>,
	pub edges: Vec<(usize, usize)>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

/// Padding kept around the graph when fitting it to the canvas.
const FIT_PADDING: f64 = 40.0;

impl SceneState {
	pub fn new(view: &GraphView, width: f64, height: f64) -> Self {
		let nodes: Vec<SceneNode> = view
			.nodes
			.iter()
			.map(|n| SceneNode {
				id: n.id.clone(),
				label: n.label.clone(),
				x: n.position.x,
				y: n.position.y,
				width: n.style.width,
				height: n.style.height,
			})
			.collect();
		let index: HashMap<&str, usize> = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();
		let edges = view
			.edges
			.iter()
			.filter_map(|e| Some((*index.get(e.source.as_str())?, *index.get(e.target.as_str())?)))
			.collect();

		let mut scene = Self {
			nodes,
			edges,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			width,
			height,
			flow_time: 0.0,
		};
		scene.fit_view();
		scene
	}

	/// Scale and center the graph so every box is visible. Never zooms past 100%.
	pub fn fit_view(&mut self) {
		let Some((min_x, min_y, max_x, max_y)) = self.bounds() else {
			self.transform = ViewTransform::default();
			return;
		};
		let (graph_w, graph_h) = (max_x - min_x, max_y - min_y);
		let avail_w = (self.width - 2.0 * FIT_PADDING).max(1.0);
		let avail_h = (self.height - 2.0 * FIT_PADDING).max(1.0);
		let k = (avail_w / graph_w.max(1.0))
			.min(avail_h / graph_h.max(1.0))
			.clamp(0.1, 1.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - (min_x + graph_w / 2.0) * k,
			y: self.height / 2.0 - (min_y + graph_h / 2.0) * k,
			k,
		};
	}

	fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
		let first = self.nodes.first()?;
		let init = (first.x, first.y, first.x + first.width, first.y + first.height);
		Some(self.nodes.iter().fold(init, |(x0, y0, x1, y1), n| {
			(
				x0.min(n.x),
				y0.min(n.y),
				x1.max(n.x + n.width),
				y1.max(n.y + n.height),
			)
		}))
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost box under a screen point. Later boxes are drawn on top.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.nodes.iter().rposition(|n| n.contains(gx, gy))
	}

	/// Start dragging the box under the pointer, or panning if there is none.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				start_x: x,
				start_y: y,
				node_start_x: self.nodes[idx].x,
				node_start_y: self.nodes[idx].y,
			};
		} else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			if let Some(idx) = self.drag.node_idx {
				let k = self.transform.k;
				let node = &mut self.nodes[idx];
				node.x = self.drag.node_start_x + (x - self.drag.start_x) / k;
				node.y = self.drag.node_start_y + (y - self.drag.start_y) / k;
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	pub fn pointer_up(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
	}

	pub fn pointer_leave(&mut self) {
		self.pointer_up();
		self.set_hover(None);
	}

	/// Zoom around a screen point. Positive `delta_y` zooms out.
	pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		self.highlight.set_hover(node, &self.edges);
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
		self.highlight.tick(dt);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::{DependencyEdge, GraphPayload, SubjectNode};
	use crate::graph::GridLayout;

	fn scene(subjects: &[&str], edges: &[(&str, &str)]) -> SceneState {
		let payload = GraphPayload {
			nodes: subjects
				.iter()
				.map(|s| SubjectNode {
					id: s.to_string(),
					label: s.to_string(),
				})
				.collect(),
			edges: edges
				.iter()
				.map(|(s, t)| DependencyEdge {
					source: s.to_string(),
					target: t.to_string(),
				})
				.collect(),
		};
		SceneState::new(&GraphView::reconcile(payload, &GridLayout::default()), 1000.0, 600.0)
	}

	fn center_on_screen(scene: &SceneState, idx: usize) -> (f64, f64) {
		let n = &scene.nodes[idx];
		let t = &scene.transform;
		(
			(n.x + n.width / 2.0) * t.k + t.x,
			(n.y + n.height / 2.0) * t.k + t.y,
		)
	}

	#[test]
	fn edges_resolve_to_node_indices() {
		let s = scene(&["Algebra", "Calculus"], &[("Algebra", "Calculus")]);
		assert_eq!(s.edges, [(0, 1)]);
	}

	#[test]
	fn fit_view_keeps_every_node_on_screen() {
		let s = scene(&["A", "B", "C", "D", "E", "F", "G", "H", "I"], &[]);
		assert!(s.transform.k <= 1.0);
		for i in 0..s.nodes.len() {
			let (x, y) = center_on_screen(&s, i);
			assert!(x > 0.0 && x < s.width, "node {} x = {}", i, x);
			assert!(y > 0.0 && y < s.height, "node {} y = {}", i, y);
		}
	}

	#[test]
	fn empty_scene_uses_identity_transform() {
		let s = scene(&[], &[]);
		assert_eq!(s.transform, ViewTransform::default());
		assert_eq!(s.node_at_position(10.0, 10.0), None);
	}

	#[test]
	fn hit_test_finds_box_under_pointer() {
		let s = scene(&["A", "B"], &[]);
		let (x, y) = center_on_screen(&s, 1);
		assert_eq!(s.node_at_position(x, y), Some(1));
		assert_eq!(s.node_at_position(1.0, 1.0), None);
	}

	#[test]
	fn dragging_moves_only_the_grabbed_node() {
		let mut s = scene(&["A", "B"], &[]);
		let before_b = s.nodes[1].clone();
		let (x, y) = center_on_screen(&s, 0);
		let k = s.transform.k;

		s.pointer_down(x, y);
		s.pointer_move(x + 20.0, y + 10.0);
		s.pointer_up();

		let a = &s.nodes[0];
		assert!((a.x - (50.0 + 20.0 / k)).abs() < 1e-9);
		assert!((a.y - (50.0 + 10.0 / k)).abs() < 1e-9);
		assert_eq!(s.nodes[1], before_b);
		assert!(!s.drag.active);
	}

	#[test]
	fn background_drag_pans() {
		let mut s = scene(&["A"], &[]);
		let start = s.transform.clone();
		s.pointer_down(1.0, 1.0);
		s.pointer_move(31.0, -9.0);
		assert_eq!(s.transform.x, start.x + 30.0);
		assert_eq!(s.transform.y, start.y - 10.0);
	}

	#[test]
	fn zoom_is_clamped_and_anchored() {
		let mut s = scene(&["A"], &[]);
		let anchor = s.screen_to_graph(200.0, 100.0);
		s.zoom_at(200.0, 100.0, -1.0);
		let after = s.screen_to_graph(200.0, 100.0);
		assert!((anchor.0 - after.0).abs() < 1e-9 && (anchor.1 - after.1).abs() < 1e-9);

		for _ in 0..100 {
			s.zoom_at(0.0, 0.0, 1.0);
		}
		assert!((s.transform.k - 0.1).abs() < 1e-9);
	}

	#[test]
	fn hover_highlights_neighbours() {
		let mut s = scene(&["A", "B", "C"], &[("A", "B")]);
		s.set_hover(Some(0));
		s.tick(0.5);
		assert!(s.highlight.node_intensity(0) > 0.5);
		assert!(s.highlight.node_intensity(1) > 0.5);
		assert_eq!(s.highlight.node_intensity(2), 0.0);

		s.pointer_leave();
		for _ in 0..60 {
			s.tick(0.1);
		}
		assert_eq!(s.highlight.max_intensity(), 0.0);
	}
}
