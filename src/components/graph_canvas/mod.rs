//! Subject graph canvas.
//!
//! Renders the reconciled [`GraphView`](crate::graph::GraphView) on an HTML
//! canvas with:
//! - Rounded subject boxes at their grid positions
//! - Directed edges with flowing dashes and closed arrowheads
//! - Pan, zoom, and node dragging interactions
//! - Smooth highlight transitions on hover

mod component;
mod render;
mod scene;
pub mod theme;

pub use component::GraphCanvas;
pub use theme::Theme;
