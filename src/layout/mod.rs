//! Node placement strategies.
//!
//! Each diagram picks one provider when it is built. Both hand back a map
//! from node id to diagram coordinates; nodes without a position are not
//! drawn.

mod force;
mod grid;

use std::collections::HashMap;

pub use force::{ForceConfig, ForceLayout};
pub use grid::GridLayout;

use crate::graph::{GraphModel, NodeId};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

pub type Positions = HashMap<NodeId, Point>;

/// Produces coordinates for the nodes of a graph.
pub trait LayoutProvider {
	fn compute_positions(&mut self, graph: &GraphModel) -> Positions;
}
