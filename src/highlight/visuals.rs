//! Per-element opacity, stroke and layering derived from the highlight
//! state. Everything here is recomputed from scratch, so returning to idle
//! reproduces the initial visuals exactly.

use std::collections::HashMap;

use super::{Selection, relevance};
use crate::catalog::{Catalog, FALLBACK_COLOR, PaintTarget};
use crate::graph::{EdgeIdx, GraphEdge, GraphModel, GraphNode, NodeId, NodeKind, Variant};
use crate::legend::LegendIndex;
use crate::visibility::Toggles;

/// Draw order bucket. Raised elements are painted after base ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
	Base,
	Raised,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
	pub color: String,
	pub width: f64,
}

impl Stroke {
	fn new(color: impl Into<String>, width: f64) -> Self {
		Self {
			color: color.into(),
			width,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeVisual {
	pub opacity: f64,
	pub stroke: Stroke,
	pub layer: Layer,
	pub visible: bool,
	pub interactive: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeVisual {
	pub opacity: f64,
	pub stroke: Stroke,
	pub layer: Layer,
	pub visible: bool,
	pub interactive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
	Normal,
	Highlighted,
	Dimmed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendVisual {
	pub emphasis: Emphasis,
	pub opacity: f64,
	pub visible: bool,
}

/// Opacity levels and emphasis strokes of one diagram.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualTheme {
	pub node_idle: f64,
	pub node_dimmed: f64,
	pub edge_idle: f64,
	pub edge_dimmed: f64,
	pub relevant: f64,
	pub legend_dimmed: f64,
	/// Minimum stroke width of a highlighted edge. Must exceed every
	/// resting width so emphasis stays visible.
	pub edge_emphasis_width: f64,
	pub node_emphasis: Option<(&'static str, f64)>,
	/// Highlighted edge colour when a node was selected.
	pub node_selection_edge: Option<&'static str>,
	/// Highlighted edge colour when a legend row was selected. Series
	/// edges keep their own colour.
	pub legend_selection_edge: Option<&'static str>,
}

impl VisualTheme {
	pub const GRID: Self = Self {
		node_idle: 1.0,
		node_dimmed: 0.2,
		edge_idle: 0.4,
		edge_dimmed: 0.05,
		relevant: 1.0,
		legend_dimmed: 0.5,
		edge_emphasis_width: 4.5,
		node_emphasis: None,
		node_selection_edge: None,
		legend_selection_edge: None,
	};

	pub const FORCE: Self = Self {
		node_idle: 1.0,
		node_dimmed: 0.1,
		edge_idle: 1.0,
		edge_dimmed: 0.1,
		relevant: 1.0,
		legend_dimmed: 0.5,
		edge_emphasis_width: 2.5,
		node_emphasis: Some(("black", 3.0)),
		node_selection_edge: Some("red"),
		legend_selection_edge: Some("orange"),
	};

	pub fn for_variant(variant: Variant) -> Self {
		match variant {
			Variant::Grid => Self::GRID,
			Variant::Force => Self::FORCE,
		}
	}
}

/// Visual state of every node, edge and legend row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneVisuals {
	pub nodes: HashMap<NodeId, NodeVisual>,
	pub edges: Vec<EdgeVisual>,
	pub legend: Vec<LegendVisual>,
}

impl SceneVisuals {
	pub fn node(&self, id: &NodeId) -> Option<&NodeVisual> {
		self.nodes.get(id)
	}

	/// Edge indices with raised edges last, otherwise in graph order.
	pub fn edge_order(&self) -> Vec<EdgeIdx> {
		let mut order: Vec<EdgeIdx> = (0..self.edges.len()).collect();
		order.sort_by_key(|&i| self.edges[i].layer);
		order
	}
}

fn node_stroke(node: &GraphNode, catalog: &Catalog, variant: Variant) -> Stroke {
	match (variant, node) {
		(Variant::Grid, GraphNode::Book(id)) => {
			let color = catalog
				.book(*id)
				.map_or(FALLBACK_COLOR, |b| catalog.series_color(b.series));
			Stroke::new(color, 4.0)
		}
		_ => Stroke::new("#fff", 1.5),
	}
}

fn edge_stroke(edge: &GraphEdge, catalog: &Catalog, variant: Variant) -> Stroke {
	match *edge {
		GraphEdge::BookCharacter { character, .. } => {
			let Some(character) = catalog.character(character) else {
				return Stroke::new(FALLBACK_COLOR, 1.0);
			};
			let color = catalog.character_color(character, PaintTarget::Stroke).value;
			let width = match variant {
				Variant::Grid if catalog.uses_pattern(character) => 3.0,
				Variant::Grid => 1.5,
				Variant::Force => 1.0,
			};
			Stroke::new(color, width)
		}
		GraphEdge::BookSeries { series, .. } => Stroke::new(catalog.series_color(series), 2.0),
		GraphEdge::BookGenre { .. } => Stroke::new("lightgray", 1.0),
	}
}

/// Computes the visuals for `selection` (idle when `None`). A selection
/// that names nothing in `graph` renders as idle.
pub fn compute(
	catalog: &Catalog,
	graph: &GraphModel,
	legend: &LegendIndex,
	theme: &VisualTheme,
	selection: Option<&Selection>,
	toggles: Toggles,
) -> SceneVisuals {
	let variant = graph.variant();
	let relevant = selection.and_then(|s| relevance(catalog, graph, s));
	let node_selected = matches!(selection, Some(Selection::Node(_)));

	let nodes = graph
		.nodes()
		.iter()
		.map(|node| {
			let id = node.id();
			let base = node_stroke(node, catalog, variant);
			// Grid characters are reached through the legend only.
			let visible = toggles.node_visible(node.kind())
				&& !(variant == Variant::Grid && node.kind() == NodeKind::Character);
			let (opacity, stroke, layer) = match &relevant {
				None => (theme.node_idle, base, Layer::Base),
				Some(r) if r.nodes.contains(&id) => {
					let stroke = theme
						.node_emphasis
						.map_or(base, |(color, width)| Stroke::new(color, width));
					(theme.relevant, stroke, Layer::Raised)
				}
				Some(_) => (theme.node_dimmed, base, Layer::Base),
			};
			let visual = NodeVisual {
				opacity,
				stroke,
				layer,
				visible,
				interactive: visible,
			};
			(id, visual)
		})
		.collect();

	let edges = graph
		.edges()
		.iter()
		.enumerate()
		.map(|(i, edge)| {
			let base = edge_stroke(edge, catalog, variant);
			let visible = toggles.edge_visible(edge.kind());
			let (opacity, stroke, layer) = match &relevant {
				None => (theme.edge_idle, base, Layer::Base),
				Some(r) if r.edges.contains(&i) => {
					let color = match edge {
						_ if node_selected => theme.node_selection_edge,
						GraphEdge::BookSeries { .. } => None,
						_ => theme.legend_selection_edge,
					};
					let stroke = Stroke::new(
						color.map_or(base.color, str::to_string),
						base.width.max(theme.edge_emphasis_width),
					);
					(theme.relevant, stroke, Layer::Raised)
				}
				Some(_) => (theme.edge_dimmed, base, Layer::Base),
			};
			EdgeVisual {
				opacity,
				stroke,
				layer,
				visible,
				interactive: visible,
			}
		})
		.collect();

	let highlighted = match (selection, &relevant) {
		(Some(s), Some(_)) => legend.rows_for(s, catalog, graph),
		_ => Vec::new(),
	};
	let legend = legend
		.rows()
		.iter()
		.enumerate()
		.map(|(i, row)| {
			let (emphasis, opacity) = if highlighted.is_empty() {
				(Emphasis::Normal, 1.0)
			} else if highlighted.contains(&i) {
				(Emphasis::Highlighted, 1.0)
			} else {
				(Emphasis::Dimmed, theme.legend_dimmed)
			};
			LegendVisual {
				emphasis,
				opacity,
				visible: toggles.legend_row_visible(row),
			}
		})
		.collect();

	SceneVisuals {
		nodes,
		edges,
		legend,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::Series;
	use crate::highlight::HighlightState;
	use crate::legend::LegendRow;

	struct Fixture {
		catalog: Catalog,
		graph: GraphModel,
		legend: LegendIndex,
		theme: VisualTheme,
	}

	impl Fixture {
		fn new(variant: Variant) -> Self {
			let catalog = Catalog::discworld().unwrap();
			let graph = match variant {
				Variant::Grid => GraphModel::grid(&catalog),
				Variant::Force => GraphModel::force(&catalog),
			};
			let legend = LegendIndex::new(&catalog, variant);
			Self {
				catalog,
				graph,
				legend,
				theme: VisualTheme::for_variant(variant),
			}
		}

		fn visuals(&self, selection: Option<&Selection>, toggles: Toggles) -> SceneVisuals {
			compute(
				&self.catalog,
				&self.graph,
				&self.legend,
				&self.theme,
				selection,
				toggles,
			)
		}
	}

	#[test]
	fn idle_grid_uses_resting_opacities() {
		let f = Fixture::new(Variant::Grid);
		let v = f.visuals(None, Toggles::default());
		assert!(v.edges.iter().all(|e| e.opacity == 0.4 && e.layer == Layer::Base));
		assert!(v.nodes.values().all(|n| n.opacity == 1.0));
		assert!(v.legend.iter().all(|l| l.emphasis == Emphasis::Normal));
		assert!(!v.node(&NodeId::character(1)).unwrap().visible);
	}

	#[test]
	fn pattern_journeys_draw_wider() {
		let f = Fixture::new(Variant::Grid);
		let v = f.visuals(None, Toggles::default());
		for (edge, visual) in f.graph.edges().iter().zip(&v.edges) {
			let expected = match edge.owner() {
				Some(7 | 9 | 20) => 3.0,
				_ => 1.5,
			};
			assert_eq!(visual.stroke.width, expected, "{edge:?}");
		}
	}

	#[test]
	fn highlighted_journeys_outgrow_their_resting_stroke() {
		let f = Fixture::new(Variant::Grid);
		let idle = f.visuals(None, Toggles::default());
		// Tiffany draws plain, the wizards as a dotted group.
		for character in [10, 20] {
			let v = f.visuals(Some(&Selection::Character(character)), Toggles::default());
			let owned: Vec<_> = (0..f.graph.edges().len())
				.filter(|&i| f.graph.edges()[i].owner() == Some(character))
				.collect();
			assert!(!owned.is_empty());
			for i in owned {
				assert!(
					v.edges[i].stroke.width > idle.edges[i].stroke.width,
					"character {character} edge {i}: {:?} vs {:?}",
					v.edges[i].stroke,
					idle.edges[i].stroke
				);
			}
		}
	}

	#[test]
	fn active_character_raises_its_books() {
		let f = Fixture::new(Variant::Grid);
		let selection = Selection::Character(10);
		let v = f.visuals(Some(&selection), Toggles::default());
		let tiffany = f.catalog.character(10).unwrap();

		for node in f.graph.nodes() {
			let visual = v.node(&node.id()).unwrap();
			let relevant = match node {
				GraphNode::Character(10) => true,
				GraphNode::Book(b) => tiffany.journey().contains(b),
				_ => false,
			};
			if relevant {
				assert_eq!(visual.opacity, f.theme.relevant);
				assert_eq!(visual.layer, Layer::Raised);
			} else {
				assert!(visual.opacity > 0.0 && visual.opacity < f.theme.relevant);
			}
		}
		for (edge, visual) in f.graph.edges().iter().zip(&v.edges) {
			if edge.owner() == Some(10) {
				assert_eq!(visual.opacity, 1.0);
				assert!(visual.stroke.width > 1.5);
			} else {
				assert!(visual.opacity > 0.0 && visual.opacity < 1.0);
			}
		}
		let order = v.edge_order();
		let first_raised = order.iter().position(|&i| v.edges[i].layer == Layer::Raised).unwrap();
		assert!(order[first_raised..].iter().all(|&i| v.edges[i].layer == Layer::Raised));

		let row = f.legend.position(&LegendRow::Character(10)).unwrap();
		assert_eq!(v.legend[row].emphasis, Emphasis::Highlighted);
		assert!(v.legend.iter().filter(|l| l.emphasis == Emphasis::Dimmed).count() > 0);
	}

	#[test]
	fn double_click_restores_idle_exactly() {
		let f = Fixture::new(Variant::Force);
		let idle = f.visuals(None, Toggles::default());
		let mut state = HighlightState::default();
		let target = Selection::Node(NodeId::book(30));

		state.click(target.clone(), &f.catalog, &f.graph);
		let active = f.visuals(state.effective(), Toggles::default());
		assert_ne!(active, idle);
		state.click(target, &f.catalog, &f.graph);
		assert_eq!(f.visuals(state.effective(), Toggles::default()), idle);
	}

	#[test]
	fn force_edge_colours_follow_the_selection_source() {
		let f = Fixture::new(Variant::Force);
		let by_node = f.visuals(Some(&Selection::Node(NodeId::book(30))), Toggles::default());
		let raised: Vec<_> = by_node.edges.iter().filter(|e| e.layer == Layer::Raised).collect();
		assert!(!raised.is_empty());
		assert!(raised.iter().all(|e| e.stroke.color == "red" && e.stroke.width == 2.5));
		let book = by_node.node(&NodeId::book(30)).unwrap();
		assert_eq!(book.stroke, Stroke::new("black", 3.0));

		let series = Selection::Series(Series::TiffanyAching);
		let by_legend = f.visuals(Some(&series), Toggles::default());
		for (edge, visual) in f.graph.edges().iter().zip(&by_legend.edges) {
			if visual.layer == Layer::Raised {
				assert!(matches!(edge, GraphEdge::BookSeries { .. }));
				assert_eq!(visual.stroke.color, f.catalog.series_color(Series::TiffanyAching));
			}
		}
	}

	#[test]
	fn genre_switch_hides_genre_elements_only() {
		let f = Fixture::new(Variant::Force);
		let toggles = Toggles {
			show_genres: false,
			show_series: true,
		};
		let v = f.visuals(None, toggles);
		for node in f.graph.nodes() {
			let visual = v.node(&node.id()).unwrap();
			let genre = node.kind() == NodeKind::Genre;
			assert_eq!(visual.visible, !genre);
			assert_eq!(visual.interactive, !genre);
		}
		for (edge, visual) in f.graph.edges().iter().zip(&v.edges) {
			assert_eq!(visual.visible, !matches!(edge, GraphEdge::BookGenre { .. }));
		}
		// Opacity is untouched by the switch.
		assert_eq!(
			v.edges.iter().map(|e| e.opacity).collect::<Vec<_>>(),
			f.visuals(None, Toggles::default())
				.edges
				.iter()
				.map(|e| e.opacity)
				.collect::<Vec<_>>()
		);
	}

	#[test]
	fn unmatched_node_selection_leaves_legend_normal() {
		let f = Fixture::new(Variant::Grid);
		let v = f.visuals(Some(&Selection::Node(NodeId::book(404))), Toggles::default());
		assert_eq!(v, f.visuals(None, Toggles::default()));
	}
}
