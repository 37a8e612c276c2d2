use log::warn;

use super::{LayoutProvider, Point, Positions};
use crate::catalog::BookId;
use crate::graph::{GraphModel, GraphNode, NodeId};

/// Book ids per grid row, top to bottom.
pub const BOOK_ROWS: [&[BookId]; 6] = [
	&[1, 2, 3, 4, 5, 6, 7, 8],
	&[9, 10, 11, 12, 13, 14, 15, 16],
	&[17, 18, 19, 20, 21, 22, 23],
	&[24, 25, 26, 27, 28, 29],
	&[30, 31, 32, 33, 34, 35],
	&[36, 37, 38, 39, 40, 41],
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
	pub margin_left: f64,
	pub margin_top: f64,
	pub column_spacing: f64,
	pub row_spacing: f64,
	pub book_width: f64,
	pub book_height: f64,
}

impl Default for GridConfig {
	fn default() -> Self {
		Self {
			margin_left: 100.0,
			margin_top: 30.0,
			column_spacing: 120.0,
			row_spacing: 100.0,
			book_width: 100.0,
			book_height: 60.0,
		}
	}
}

/// Places books on fixed rows, right-aligned against the longest row.
#[derive(Clone, Debug)]
pub struct GridLayout {
	pub config: GridConfig,
	rows: Vec<Vec<BookId>>,
}

impl Default for GridLayout {
	fn default() -> Self {
		Self::new(GridConfig::default(), BOOK_ROWS.iter().map(|r| r.to_vec()).collect())
	}
}

impl GridLayout {
	pub fn new(config: GridConfig, rows: Vec<Vec<BookId>>) -> Self {
		Self { config, rows }
	}

	fn max_row_len(&self) -> usize {
		self.rows.iter().map(Vec::len).max().unwrap_or(0)
	}

	/// Horizontal shift that right-aligns `row`.
	pub fn row_offset(&self, row: usize) -> f64 {
		let len = self.rows.get(row).map_or(0, Vec::len);
		(self.max_row_len() - len) as f64 * self.config.column_spacing
	}

	/// Top-left corner of the cell at `row`, `col`.
	pub fn cell(&self, row: usize, col: usize) -> Point {
		Point::new(
			self.config.margin_left + self.row_offset(row) + col as f64 * self.config.column_spacing,
			self.config.margin_top + row as f64 * self.config.row_spacing,
		)
	}
}

impl LayoutProvider for GridLayout {
	fn compute_positions(&mut self, graph: &GraphModel) -> Positions {
		let mut positions = Positions::new();
		for (row, ids) in self.rows.iter().enumerate() {
			for (col, &id) in ids.iter().enumerate() {
				let node = NodeId::book(id);
				if !graph.contains(&node) {
					warn!("grid: book {id} is not in the catalog, skipping");
					continue;
				}
				positions.insert(node, self.cell(row, col));
			}
		}

		for node in graph.nodes() {
			if let GraphNode::Book(id) = node {
				if !positions.contains_key(&node.id()) {
					warn!("grid: book {id} has no grid cell");
				}
			}
		}
		positions
	}
}
