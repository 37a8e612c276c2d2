//! The "show genres" / "show series" switches.

use crate::graph::{EdgeKind, NodeKind};
use crate::legend::LegendRow;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Toggles {
	pub show_genres: bool,
	pub show_series: bool,
}

impl Default for Toggles {
	fn default() -> Self {
		Self {
			show_genres: true,
			show_series: true,
		}
	}
}

impl Toggles {
	pub fn node_visible(&self, kind: NodeKind) -> bool {
		match kind {
			NodeKind::Genre => self.show_genres,
			NodeKind::SeriesCenter => self.show_series,
			NodeKind::Book | NodeKind::Character => true,
		}
	}

	pub fn edge_visible(&self, kind: EdgeKind) -> bool {
		match kind {
			EdgeKind::BookGenre => self.show_genres,
			EdgeKind::BookSeries => self.show_series,
			EdgeKind::BookCharacter => true,
		}
	}

	pub fn legend_row_visible(&self, row: &LegendRow) -> bool {
		match row {
			LegendRow::Genre(_) | LegendRow::Kind(NodeKind::Genre) => self.show_genres,
			LegendRow::Series(_) | LegendRow::Kind(NodeKind::SeriesCenter) => self.show_series,
			LegendRow::Character(_) | LegendRow::Kind(_) => true,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::{Genre, Series};

	#[test]
	fn genre_switch_leaves_other_kinds_alone() {
		let off = Toggles {
			show_genres: false,
			..Toggles::default()
		};
		assert!(!off.node_visible(NodeKind::Genre));
		assert!(!off.edge_visible(EdgeKind::BookGenre));
		assert!(!off.legend_row_visible(&LegendRow::Genre(Genre::Heist)));
		assert!(off.node_visible(NodeKind::Book));
		assert!(off.node_visible(NodeKind::SeriesCenter));
		assert!(off.edge_visible(EdgeKind::BookSeries));
		assert!(off.legend_row_visible(&LegendRow::Series(Series::Death)));
		assert!(off.legend_row_visible(&LegendRow::Character(1)));
	}
}
