//! Tooltip text assembled for nodes, journey curves and legend rows.

use crate::catalog::{Catalog, Character};
use crate::graph::GraphNode;
use crate::layout::Point;
use crate::legend::LegendRow;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TooltipContent {
	pub title: String,
	pub lines: Vec<(String, String)>,
}

impl TooltipContent {
	fn titled(title: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			lines: Vec::new(),
		}
	}

	fn line(mut self, label: &str, value: impl Into<String>) -> Self {
		self.lines.push((label.into(), value.into()));
		self
	}
}

/// Where tooltips are presented.
pub trait TooltipSurface {
	fn show(&mut self, content: TooltipContent, anchor: Point);
	fn hide(&mut self);
}

/// Holds the tooltip currently on display, if any.
#[derive(Clone, Debug, Default)]
pub struct TooltipSlot {
	current: Option<(TooltipContent, Point)>,
}

impl TooltipSlot {
	pub fn current(&self) -> Option<&(TooltipContent, Point)> {
		self.current.as_ref()
	}
}

impl TooltipSurface for TooltipSlot {
	fn show(&mut self, content: TooltipContent, anchor: Point) {
		self.current = Some((content, anchor));
	}

	fn hide(&mut self) {
		self.current = None;
	}
}

pub fn node_tooltip(catalog: &Catalog, node: &GraphNode) -> Option<TooltipContent> {
	Some(match *node {
		GraphNode::Book(id) => {
			let book = catalog.book(id)?;
			let genres = if book.genres.is_empty() {
				"N/A".to_string()
			} else {
				book.genres.iter().map(|g| g.name()).collect::<Vec<_>>().join(", ")
			};
			TooltipContent::titled(&book.title)
				.line("Serie", book.series.name())
				.line("Genres", genres)
		}
		GraphNode::Character(id) => character_tooltip(catalog.character(id)?),
		GraphNode::Genre(genre) => TooltipContent::titled(genre.name()).line("Type", "Genre"),
		GraphNode::SeriesCenter(series) => {
			TooltipContent::titled(series.name()).line("Type", "Serie Center")
		}
	})
}

/// Name, members and appearance count of a character.
pub fn character_tooltip(character: &Character) -> TooltipContent {
	let mut content = TooltipContent::titled(&character.name).line("Type", "Character");
	if character.is_group() {
		content = content.line("Members", character.members.join(", "));
	}
	content.line("Appears in", format!("{} book(s)", character.journey().len()))
}

pub fn legend_tooltip(catalog: &Catalog, row: &LegendRow) -> Option<TooltipContent> {
	Some(match *row {
		LegendRow::Character(id) => character_tooltip(catalog.character(id)?),
		LegendRow::Series(series) => TooltipContent::titled(series.name()).line("Serie", series.name()),
		LegendRow::Genre(genre) => TooltipContent::titled(genre.name()).line("Genre", genre.name()),
		LegendRow::Kind(kind) => TooltipContent::titled(kind.label()).line("Node Type", kind.label()),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::Series;

	#[test]
	fn book_tooltip_lists_series_and_genres() {
		let catalog = Catalog::discworld().unwrap();
		let tip = node_tooltip(&catalog, &GraphNode::Book(8)).unwrap();
		assert_eq!(tip.title, "Guards! Guards!");
		assert_eq!(
			tip.lines,
			vec![
				("Serie".to_string(), "Guards".to_string()),
				("Genres".to_string(), "Crime, Mystery".to_string()),
			]
		);
	}

	#[test]
	fn group_tooltip_names_members_and_count() {
		let catalog = Catalog::discworld().unwrap();
		let tip = node_tooltip(&catalog, &GraphNode::Character(7)).unwrap();
		assert_eq!(tip.title, "Postman crew");
		assert!(tip.lines.iter().any(|(k, v)| k == "Members" && v.starts_with("Moist von Lipwig")));
		assert!(tip.lines.contains(&("Appears in".into(), "3 book(s)".into())));

		let single = node_tooltip(&catalog, &GraphNode::Character(14)).unwrap();
		assert!(!single.lines.iter().any(|(k, _)| k == "Members"));
	}

	#[test]
	fn every_character_tooltip_counts_appearances() {
		let catalog = Catalog::discworld().unwrap();
		let tiffany = catalog.character(10).unwrap();
		let count = ("Appears in".to_string(), format!("{} book(s)", tiffany.journey().len()));

		assert!(character_tooltip(tiffany).lines.contains(&count));
		let row = legend_tooltip(&catalog, &LegendRow::Character(10)).unwrap();
		assert!(row.lines.contains(&count));
	}

	#[test]
	fn unknown_ids_yield_nothing() {
		let catalog = Catalog::discworld().unwrap();
		assert!(node_tooltip(&catalog, &GraphNode::Book(404)).is_none());
		assert!(legend_tooltip(&catalog, &LegendRow::Character(404)).is_none());
		assert!(legend_tooltip(&catalog, &LegendRow::Series(Series::Death)).is_some());
	}

	#[test]
	fn slot_shows_and_hides() {
		let mut slot = TooltipSlot::default();
		slot.show(TooltipContent::titled("x"), Point::new(1.0, 2.0));
		assert_eq!(slot.current().map(|(c, _)| c.title.as_str()), Some("x"));
		slot.hide();
		assert!(slot.current().is_none());
	}
}
