//! Deterministic grid placement for subject nodes.
//!
//! The service returns nodes without coordinates. Each node is placed purely
//! from its index in the fetched list, so a refresh always produces the same
//! picture for the same data. The rule only keeps boxes from overlapping; it
//! says nothing about dependency depth.

use serde::Deserialize;

/// A point in graph space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Horizontal, growing right.
	pub x: f64,
	/// Vertical, growing down.
	pub y: f64,
}

/// Grid constants.
///
/// `x = (i * spacing_x) mod row_wrap + margin_x`,
/// `y = floor(i / columns) * row_height + margin_y`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridLayout {
	/// Horizontal step between consecutive nodes.
	pub spacing_x: u32,
	/// Width after which `x` wraps back to the margin.
	pub row_wrap: u32,
	/// Vertical step between rows.
	pub row_height: u32,
	/// Nodes per row.
	pub columns: u32,
	/// Left margin.
	pub margin_x: u32,
	/// Top margin.
	pub margin_y: u32,
}

impl Default for GridLayout {
	fn default() -> Self {
		Self {
			spacing_x: 200,
			row_wrap: 800,
			row_height: 150,
			columns: 4,
			margin_x: 50,
			margin_y: 50,
		}
	}
}

impl GridLayout {
	/// Position of the node at fetch-order index `index`.
	pub fn position(&self, index: usize) -> Position {
		let i = index as u64;
		let wrap = u64::from(self.row_wrap.max(1));
		let columns = u64::from(self.columns.max(1));
		let x = (i * u64::from(self.spacing_x)) % wrap + u64::from(self.margin_x);
		let y = (i / columns) * u64::from(self.row_height) + u64::from(self.margin_y);
		Position {
			x: x as f64,
			y: y as f64,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn first_row_spreads_horizontally() {
		let layout = GridLayout::default();
		let xs: Vec<f64> = (0..4).map(|i| layout.position(i).x).collect();
		assert_eq!(xs, [50.0, 250.0, 450.0, 650.0]);
		assert!((0..4).all(|i| layout.position(i).y == 50.0));
	}

	#[test]
	fn fifth_node_wraps_to_next_row() {
		let layout = GridLayout::default();
		assert_eq!(layout.position(4), Position { x: 50.0, y: 200.0 });
		assert_eq!(layout.position(9), Position { x: 250.0, y: 350.0 });
	}

	#[test]
	fn horizontal_spread_is_bounded_by_row_wrap() {
		let layout = GridLayout::default();
		for i in 0..100 {
			let p = layout.position(i);
			assert!(p.x >= 50.0 && p.x < 850.0);
		}
	}

	#[test]
	fn default_grid_never_overlaps() {
		let layout = GridLayout::default();
		let positions: Vec<Position> = (0..40).map(|i| layout.position(i)).collect();
		for (a, pa) in positions.iter().enumerate() {
			for pb in &positions[a + 1..] {
				assert!(pa != pb);
			}
		}
	}

	#[test]
	fn zero_constants_do_not_panic() {
		let layout = GridLayout {
			row_wrap: 0,
			columns: 0,
			..GridLayout::default()
		};
		assert_eq!(layout.position(3).x, 50.0);
	}
}
