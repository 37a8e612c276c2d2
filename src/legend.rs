//! Legend rows, their mapping to selections, and panel placement.

use std::collections::HashSet;

use crate::catalog::{Catalog, CharacterId, Genre, Series};
use crate::graph::{GraphModel, GraphNode, NodeKind, Variant};
use crate::highlight::Selection;
use crate::layout::Point;
use crate::visibility::Toggles;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LegendRow {
	Kind(NodeKind),
	Character(CharacterId),
	Series(Series),
	Genre(Genre),
}

impl LegendRow {
	/// What clicking or hovering the row selects.
	pub fn selection(&self) -> Selection {
		match *self {
			LegendRow::Kind(kind) => Selection::Kind(kind),
			LegendRow::Character(id) => Selection::Character(id),
			LegendRow::Series(series) => Selection::Series(series),
			LegendRow::Genre(genre) => Selection::Genre(genre),
		}
	}

	pub fn section(&self) -> LegendSection {
		match self {
			LegendRow::Kind(_) => LegendSection::Kinds,
			LegendRow::Character(_) => LegendSection::Characters,
			LegendRow::Series(_) => LegendSection::Series,
			LegendRow::Genre(_) => LegendSection::Genres,
		}
	}

	pub fn label(&self, catalog: &Catalog) -> String {
		match *self {
			LegendRow::Kind(kind) => kind.label().to_string(),
			LegendRow::Character(id) => catalog
				.character(id)
				.map_or_else(|| format!("#{id}"), |c| c.name.clone()),
			LegendRow::Series(series) => series.name().to_string(),
			LegendRow::Genre(genre) => genre.name().to_string(),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LegendSection {
	Kinds,
	Characters,
	Series,
	Genres,
}

impl LegendSection {
	pub fn title(self) -> &'static str {
		match self {
			LegendSection::Kinds => "Node Types",
			LegendSection::Characters => "Main Characters",
			LegendSection::Series => "Series",
			LegendSection::Genres => "Genres",
		}
	}

	/// The node-type strip has no title to click.
	pub fn collapsible(self) -> bool {
		self != LegendSection::Kinds
	}
}

/// Spacing of the legend panels, in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendMetrics {
	pub characters_origin: Point,
	/// Vertical position of the centred node-type strip.
	pub kinds_top: f64,
	pub kind_spacing: f64,
	/// Distance of the right column from the right edge.
	pub right_inset: f64,
	pub right_top: f64,
	pub panel_gap: f64,
	pub title_height: f64,
	pub first_row: f64,
	pub row_step: f64,
	pub swatch: f64,
	pub row_width: f64,
}

impl LegendMetrics {
	pub const GRID: Self = Self {
		characters_origin: Point::new(50.0, 30.0),
		kinds_top: 20.0,
		kind_spacing: 90.0,
		right_inset: 230.0,
		right_top: 30.0,
		panel_gap: 20.0,
		title_height: 16.0,
		first_row: 20.0,
		row_step: 25.0,
		swatch: 16.0,
		row_width: 200.0,
	};

	pub const FORCE: Self = Self {
		characters_origin: Point::new(20.0, 80.0),
		kinds_top: 20.0,
		kind_spacing: 90.0,
		right_inset: 180.0,
		right_top: 80.0,
		panel_gap: 30.0,
		title_height: 16.0,
		first_row: 20.0,
		row_step: 20.0,
		swatch: 15.0,
		row_width: 160.0,
	};

	pub fn for_variant(variant: Variant) -> Self {
		match variant {
			Variant::Grid => Self::GRID,
			Variant::Force => Self::FORCE,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelPlacement {
	pub section: LegendSection,
	pub origin: Point,
}

/// Screen placement of every panel and row. Rows that are collapsed or
/// switched off have no position.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendLayout {
	pub panels: Vec<PanelPlacement>,
	pub rows: Vec<Option<Point>>,
	widths: Vec<f64>,
	metrics: LegendMetrics,
}

impl LegendLayout {
	/// Index of the row under `p`.
	pub fn row_at(&self, p: Point) -> Option<usize> {
		self.rows.iter().zip(&self.widths).position(|(origin, &w)| {
			origin.is_some_and(|o| {
				p.x >= o.x && p.x < o.x + w && p.y >= o.y && p.y < o.y + self.metrics.row_step
			})
		})
	}

	/// Section whose title is under `p`.
	pub fn title_at(&self, p: Point) -> Option<LegendSection> {
		self.panels
			.iter()
			.find(|panel| {
				let o = panel.origin;
				panel.section.collapsible()
					&& p.x >= o.x && p.x < o.x + self.metrics.row_width
					&& p.y >= o.y && p.y < o.y + self.metrics.title_height
			})
			.map(|panel| panel.section)
	}
}

/// The rows of one diagram's legends, in drawing order, plus which panels
/// are collapsed.
#[derive(Clone, Debug)]
pub struct LegendIndex {
	rows: Vec<LegendRow>,
	sections: Vec<LegendSection>,
	collapsed: HashSet<LegendSection>,
	pub metrics: LegendMetrics,
}

impl LegendIndex {
	/// Grid legends list characters by name; the force legends keep
	/// catalogue order and add the node-type strip.
	pub fn new(catalog: &Catalog, variant: Variant) -> Self {
		let mut rows = Vec::new();
		let sections = match variant {
			Variant::Grid => {
				let mut characters: Vec<_> = catalog.characters().iter().collect();
				characters.sort_by(|a, b| a.name.cmp(&b.name));
				rows.extend(characters.into_iter().map(|c| LegendRow::Character(c.id)));
				vec![LegendSection::Characters, LegendSection::Series, LegendSection::Genres]
			}
			Variant::Force => {
				rows.extend(NodeKind::ALL.iter().map(|&k| LegendRow::Kind(k)));
				rows.extend(catalog.characters().iter().map(|c| LegendRow::Character(c.id)));
				vec![
					LegendSection::Kinds,
					LegendSection::Characters,
					LegendSection::Series,
					LegendSection::Genres,
				]
			}
		};
		rows.extend(Series::ALL.iter().map(|&s| LegendRow::Series(s)));
		rows.extend(catalog.genres().into_iter().map(LegendRow::Genre));

		Self {
			rows,
			sections,
			collapsed: HashSet::new(),
			metrics: LegendMetrics::for_variant(variant),
		}
	}

	pub fn rows(&self) -> &[LegendRow] {
		&self.rows
	}

	pub fn row(&self, idx: usize) -> Option<&LegendRow> {
		self.rows.get(idx)
	}

	pub fn position(&self, row: &LegendRow) -> Option<usize> {
		self.rows.iter().position(|r| r == row)
	}

	pub fn is_collapsed(&self, section: LegendSection) -> bool {
		self.collapsed.contains(&section)
	}

	/// Flips a panel between collapsed and expanded. Returns the new
	/// collapsed state.
	pub fn toggle(&mut self, section: LegendSection) -> bool {
		if !section.collapsible() {
			return false;
		}
		if !self.collapsed.remove(&section) {
			self.collapsed.insert(section);
		}
		self.is_collapsed(section)
	}

	/// Rows that correspond to `selection`: its own row for legend
	/// selections, and for a node its type row plus the row of its
	/// character, series or genre.
	pub fn rows_for(&self, selection: &Selection, catalog: &Catalog, graph: &GraphModel) -> Vec<usize> {
		let wanted: Vec<LegendRow> = match selection {
			Selection::Character(id) => vec![LegendRow::Character(*id)],
			Selection::Series(series) => vec![LegendRow::Series(*series)],
			Selection::Genre(genre) => vec![LegendRow::Genre(*genre)],
			Selection::Kind(kind) => vec![LegendRow::Kind(*kind)],
			Selection::Node(id) => match graph.node(id) {
				None => Vec::new(),
				Some(node) => {
					let related = match *node {
						GraphNode::Character(c) => Some(LegendRow::Character(c)),
						GraphNode::SeriesCenter(s) => Some(LegendRow::Series(s)),
						GraphNode::Book(b) => catalog.book(b).map(|b| LegendRow::Series(b.series)),
						GraphNode::Genre(g) => Some(LegendRow::Genre(g)),
					};
					std::iter::once(LegendRow::Kind(node.kind())).chain(related).collect()
				}
			},
		};
		wanted.iter().filter_map(|row| self.position(row)).collect()
	}

	/// Places the panels for a viewport `width` pixels wide. Pure in its
	/// inputs, so re-running it after a resize is idempotent.
	pub fn layout(&self, width: f64, toggles: Toggles) -> LegendLayout {
		let m = self.metrics;
		let mut panels = Vec::new();
		let mut rows = vec![None; self.rows.len()];
		let widths = self
			.rows
			.iter()
			.map(|r| match r {
				LegendRow::Kind(_) => m.kind_spacing,
				_ => m.row_width,
			})
			.collect();
		let mut right_y = m.right_top;

		for &section in &self.sections {
			let members: Vec<usize> = self
				.rows
				.iter()
				.enumerate()
				.filter(|(_, row)| row.section() == section && toggles.legend_row_visible(row))
				.map(|(i, _)| i)
				.collect();
			if members.is_empty() {
				continue;
			}
			let expanded = !self.is_collapsed(section);

			match section {
				LegendSection::Kinds => {
					let span = members.len() as f64 * m.kind_spacing;
					let origin = Point::new(width / 2.0 - span / 2.0, m.kinds_top);
					panels.push(PanelPlacement { section, origin });
					for (slot, &i) in members.iter().enumerate() {
						rows[i] = Some(Point::new(origin.x + slot as f64 * m.kind_spacing, origin.y));
					}
				}
				LegendSection::Characters => {
					let origin = m.characters_origin;
					panels.push(PanelPlacement { section, origin });
					if expanded {
						place_column(&mut rows, &members, origin, &m);
					}
				}
				LegendSection::Series | LegendSection::Genres => {
					let origin = Point::new(width - m.right_inset, right_y);
					panels.push(PanelPlacement { section, origin });
					let content = if expanded {
						place_column(&mut rows, &members, origin, &m);
						members.len() as f64 * m.row_step
					} else {
						0.0
					};
					right_y += m.title_height + content + m.panel_gap;
				}
			}
		}

		LegendLayout {
			panels,
			rows,
			widths,
			metrics: m,
		}
	}
}

fn place_column(rows: &mut [Option<Point>], members: &[usize], origin: Point, m: &LegendMetrics) {
	for (slot, &i) in members.iter().enumerate() {
		rows[i] = Some(Point::new(origin.x, origin.y + m.first_row + slot as f64 * m.row_step));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::NodeId;

	fn grid() -> (Catalog, LegendIndex) {
		let catalog = Catalog::discworld().unwrap();
		let legend = LegendIndex::new(&catalog, Variant::Grid);
		(catalog, legend)
	}

	fn panel(layout: &LegendLayout, section: LegendSection) -> Point {
		layout
			.panels
			.iter()
			.find(|p| p.section == section)
			.map(|p| p.origin)
			.unwrap()
	}

	#[test]
	fn grid_rows_are_sorted() {
		let (catalog, legend) = grid();
		let names: Vec<String> = legend
			.rows()
			.iter()
			.filter(|r| r.section() == LegendSection::Characters)
			.map(|r| r.label(&catalog))
			.collect();
		assert_eq!(names.len(), 21);
		assert_eq!(names[0], "City Watch");
		assert!(names.windows(2).all(|w| w[0] <= w[1]));

		let series: Vec<_> = legend
			.rows()
			.iter()
			.filter_map(|r| match r {
				LegendRow::Series(s) => Some(*s),
				_ => None,
			})
			.collect();
		assert_eq!(series, Series::ALL.to_vec());

		let genres: Vec<_> = legend
			.rows()
			.iter()
			.filter_map(|r| match r {
				LegendRow::Genre(g) => Some(g.name()),
				_ => None,
			})
			.collect();
		assert_eq!(genres.first(), Some(&"Action"));
		assert!(genres.windows(2).all(|w| w[0] < w[1]));
	}

	#[test]
	fn right_column_tracks_viewport_width() {
		let (_, legend) = grid();
		let wide = legend.layout(1800.0, Toggles::default());
		assert_eq!(panel(&wide, LegendSection::Series), Point::new(1570.0, 30.0));
		assert_eq!(panel(&wide, LegendSection::Characters), Point::new(50.0, 30.0));
		assert_eq!(
			panel(&wide, LegendSection::Genres).y,
			30.0 + 16.0 + 8.0 * 25.0 + 20.0
		);

		let narrow = legend.layout(900.0, Toggles::default());
		assert_eq!(panel(&narrow, LegendSection::Series).x, 670.0);
		assert_eq!(legend.layout(1800.0, Toggles::default()), wide);
	}

	#[test]
	fn collapsing_series_lifts_genres() {
		let (_, mut legend) = grid();
		let before = panel(&legend.layout(1800.0, Toggles::default()), LegendSection::Genres);
		assert!(legend.toggle(LegendSection::Series));
		let layout = legend.layout(1800.0, Toggles::default());
		assert_eq!(panel(&layout, LegendSection::Genres).y, before.y - 8.0 * 25.0);

		let death = legend.position(&LegendRow::Series(Series::Death)).unwrap();
		assert_eq!(layout.rows[death], None);
		assert!(!legend.toggle(LegendSection::Series));
		assert!(legend.layout(1800.0, Toggles::default()).rows[death].is_some());
	}

	#[test]
	fn hit_testing_finds_rows_and_titles() {
		let (_, legend) = grid();
		let layout = legend.layout(1800.0, Toggles::default());
		let first = layout.rows[0].unwrap();
		assert_eq!(layout.row_at(Point::new(first.x + 5.0, first.y + 5.0)), Some(0));
		assert_eq!(
			layout.title_at(Point::new(1575.0, 35.0)),
			Some(LegendSection::Series)
		);
		assert_eq!(layout.row_at(Point::new(900.0, 500.0)), None);
	}

	#[test]
	fn switched_off_genres_drop_their_rows() {
		let catalog = Catalog::discworld().unwrap();
		let legend = LegendIndex::new(&catalog, Variant::Force);
		let toggles = Toggles {
			show_genres: false,
			show_series: true,
		};
		let layout = legend.layout(1200.0, toggles);
		for (row, pos) in legend.rows().iter().zip(&layout.rows) {
			let hidden = matches!(row, LegendRow::Genre(_) | LegendRow::Kind(NodeKind::Genre));
			assert_eq!(pos.is_none(), hidden, "{row:?}");
		}
		assert!(!layout.panels.iter().any(|p| p.section == LegendSection::Genres));
	}

	#[test]
	fn node_selection_maps_to_type_and_series_rows() {
		let catalog = Catalog::discworld().unwrap();
		let graph = GraphModel::force(&catalog);
		let legend = LegendIndex::new(&catalog, Variant::Force);
		let rows = legend.rows_for(&Selection::Node(NodeId::book(8)), &catalog, &graph);
		let rows: Vec<_> = rows.iter().map(|&i| legend.rows()[i]).collect();
		assert_eq!(
			rows,
			vec![LegendRow::Kind(NodeKind::Book), LegendRow::Series(Series::Guards)]
		);
	}
}
