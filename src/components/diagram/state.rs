use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info};

use crate::catalog::Catalog;
use crate::graph::{
	CharacterLink, EdgeIdx, GraphEdge, GraphModel, GraphNode, NodeId, NodeKind, Variant,
};
use crate::highlight::{self, HighlightState, SceneVisuals, Selection, Transition, VisualTheme};
use crate::layout::{ForceConfig, ForceLayout, GridLayout, LayoutProvider, Point, Positions};
use crate::legend::{LegendIndex, LegendLayout, LegendSection};
use crate::router::{self, CurveSpec, RouterConfig};
use crate::tooltip::{self, TooltipContent, TooltipSlot, TooltipSurface};
use crate::visibility::Toggles;

/// Pointer travel, in pixels, after which a press counts as a drag.
pub const DRAG_THRESHOLD: f64 = 5.0;
/// Pick distance around a journey curve, in screen pixels.
pub const CURVE_HIT_WIDTH: f64 = 6.0;
/// Screen offset of the grid so the character legend stays clear of it.
const GRID_ORIGIN: Point = Point::new(260.0, 40.0);

/// Drawn half-size of a force node.
pub fn shape_radius(kind: NodeKind) -> f64 {
	match kind {
		NodeKind::Book => 15.0,
		NodeKind::Character => 12.0,
		NodeKind::Genre => 10.0,
		NodeKind::SeriesCenter => 20.0,
	}
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<NodeId>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Point,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// What sits under the pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hit {
	LegendTitle(LegendSection),
	LegendRow(usize),
	Node(NodeId),
	/// A routed journey curve, by index into the curve list.
	Curve(usize),
}

enum Placement {
	Grid {
		layout: GridLayout,
		curves: Vec<CurveSpec>,
		/// Graph edge drawn by each curve.
		curve_edges: Vec<EdgeIdx>,
	},
	Force(ForceLayout),
}

pub struct DiagramState {
	pub catalog: Arc<Catalog>,
	pub graph: GraphModel,
	placement: Placement,
	pub positions: Positions,
	pub highlight: HighlightState,
	pub theme: VisualTheme,
	pub visuals: SceneVisuals,
	pub legend: LegendIndex,
	pub legend_layout: LegendLayout,
	pub toggles: Toggles,
	pub tooltip: TooltipSlot,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	moved: bool,
}

impl DiagramState {
	pub fn new(catalog: Arc<Catalog>, variant: Variant, width: f64, height: f64) -> Self {
		let (graph, placement, positions, transform) = match variant {
			Variant::Grid => {
				let graph = GraphModel::grid(&catalog);
				let mut layout = GridLayout::default();
				let positions = layout.compute_positions(&graph);
				let curves = router::route(
					&positions,
					&router::journey_links(&catalog),
					&RouterConfig::default(),
				);
				let curve_edges = curve_edges(&graph, &curves);
				let transform = ViewTransform {
					x: GRID_ORIGIN.x,
					y: GRID_ORIGIN.y,
					k: 1.0,
				};
				let placement = Placement::Grid {
					layout,
					curves,
					curve_edges,
				};
				(graph, placement, positions, transform)
			}
			Variant::Force => {
				let graph = GraphModel::force(&catalog);
				let mut layout = ForceLayout::new(ForceConfig {
					width,
					height,
					..ForceConfig::default()
				});
				let positions = layout.compute_positions(&graph);
				let transform = ViewTransform { x: 0.0, y: 0.0, k: 1.0 };
				(graph, Placement::Force(layout), positions, transform)
			}
		};
		info!(
			"diagram: {variant:?} with {} nodes, {} edges",
			graph.nodes().len(),
			graph.edges().len()
		);

		let legend = LegendIndex::new(&catalog, variant);
		let toggles = Toggles::default();
		let legend_layout = legend.layout(width, toggles);
		let theme = VisualTheme::for_variant(variant);
		let mut state = Self {
			catalog,
			graph,
			placement,
			positions,
			highlight: HighlightState::default(),
			theme,
			visuals: SceneVisuals::default(),
			legend,
			legend_layout,
			toggles,
			tooltip: TooltipSlot::default(),
			transform,
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			animation_running: variant == Variant::Force,
			moved: false,
		};
		state.refresh_visuals();
		state
	}

	pub fn variant(&self) -> Variant {
		self.graph.variant()
	}

	pub fn curves(&self) -> &[CurveSpec] {
		match &self.placement {
			Placement::Grid { curves, .. } => curves,
			Placement::Force(_) => &[],
		}
	}

	/// Graph edge behind curve `i`.
	pub fn curve_edge(&self, i: usize) -> Option<EdgeIdx> {
		match &self.placement {
			Placement::Grid { curve_edges, .. } => curve_edges.get(i).copied(),
			Placement::Force(_) => None,
		}
	}

	/// Size of a grid book cell, if this is the grid diagram.
	pub fn book_size(&self) -> Option<(f64, f64)> {
		match &self.placement {
			Placement::Grid { layout, .. } => Some((layout.config.book_width, layout.config.book_height)),
			Placement::Force(_) => None,
		}
	}

	fn refresh_visuals(&mut self) {
		self.visuals = highlight::visuals::compute(
			&self.catalog,
			&self.graph,
			&self.legend,
			&self.theme,
			self.highlight.effective(),
			self.toggles,
		);
	}

	fn apply(&mut self, transition: Transition) {
		if transition == Transition::Changed {
			self.refresh_visuals();
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Point {
		Point::new(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	fn node_hit(&self, node: &GraphNode, p: Point) -> bool {
		let id = node.id();
		if !self.visuals.node(&id).is_some_and(|v| v.interactive) {
			return false;
		}
		let Some(&at) = self.positions.get(&id) else {
			return false;
		};
		match self.book_size() {
			Some((w, h)) => p.x >= at.x && p.x <= at.x + w && p.y >= at.y && p.y <= at.y + h,
			None => at.distance(p) <= shape_radius(node.kind()),
		}
	}

	/// Legend first, then nodes (topmost drawn first), then curves.
	pub fn hit_test(&self, sx: f64, sy: f64) -> Option<Hit> {
		let screen = Point::new(sx, sy);
		if let Some(section) = self.legend_layout.title_at(screen) {
			return Some(Hit::LegendTitle(section));
		}
		if let Some(row) = self.legend_layout.row_at(screen) {
			return Some(Hit::LegendRow(row));
		}

		let p = self.screen_to_graph(sx, sy);
		if let Some(node) = self.graph.nodes().iter().rev().find(|n| self.node_hit(n, p)) {
			return Some(Hit::Node(node.id()));
		}

		let reach = CURVE_HIT_WIDTH / self.transform.k;
		self.curves()
			.iter()
			.enumerate()
			.filter(|(i, _)| {
				self.curve_edge(*i)
					.and_then(|e| self.visuals.edges.get(e))
					.is_some_and(|v| v.interactive)
			})
			.map(|(i, c)| (i, c.distance_to(p)))
			.filter(|&(_, d)| d <= reach)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(i, _)| Hit::Curve(i))
	}

	fn selection_for(&self, hit: &Hit) -> Option<Selection> {
		match hit {
			Hit::LegendTitle(_) => None,
			Hit::LegendRow(i) => self.legend.row(*i).map(|r| r.selection()),
			Hit::Node(id) => Some(Selection::Node(id.clone())),
			Hit::Curve(i) => self.curves().get(*i).map(|c| Selection::Character(c.link.character)),
		}
	}

	fn tooltip_for(&self, hit: &Hit) -> Option<TooltipContent> {
		match hit {
			Hit::LegendTitle(_) => None,
			Hit::LegendRow(i) => tooltip::legend_tooltip(&self.catalog, self.legend.row(*i)?),
			Hit::Node(id) => tooltip::node_tooltip(&self.catalog, self.graph.node(id)?),
			Hit::Curve(i) => {
				let character = self.catalog.character(self.curves().get(*i)?.link.character)?;
				Some(tooltip::character_tooltip(character))
			}
		}
	}

	pub fn pointer_down(&mut self, x: f64, y: f64) {
		self.moved = false;
		match self.hit_test(x, y) {
			Some(Hit::LegendTitle(_) | Hit::LegendRow(_)) => {}
			Some(Hit::Node(id)) if self.variant() == Variant::Force => {
				let start = self.positions.get(&id).copied().unwrap_or_default();
				self.drag = DragState {
					active: true,
					node: Some(id),
					start_x: x,
					start_y: y,
					node_start: start,
				};
			}
			_ => {
				self.pan = PanState {
					active: true,
					start_x: x,
					start_y: y,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				};
			}
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if self.drag.active || self.pan.active {
			let (sx, sy) = if self.drag.active {
				(self.drag.start_x, self.drag.start_y)
			} else {
				(self.pan.start_x, self.pan.start_y)
			};
			if Point::new(x, y).distance(Point::new(sx, sy)) > DRAG_THRESHOLD {
				self.moved = true;
			}
		}

		if self.drag.active {
			let (dx, dy) = (
				(x - self.drag.start_x) / self.transform.k,
				(y - self.drag.start_y) / self.transform.k,
			);
			let at = Point::new(self.drag.node_start.x + dx, self.drag.node_start.y + dy);
			if let (Some(id), Placement::Force(layout)) = (&self.drag.node, &mut self.placement) {
				if layout.pin(id, at) {
					self.positions.insert(id.clone(), at);
				}
			}
			return;
		}
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
			return;
		}

		let hit = self.hit_test(x, y);
		match hit.as_ref().and_then(|h| self.selection_for(h).map(|s| (h, s))) {
			Some((hit, selection)) => {
				let content = self.tooltip_for(hit);
				let transition = self.highlight.hover(selection, &self.catalog, &self.graph);
				if let Some(content) = content {
					if self.highlight.is_idle() {
						self.tooltip.show(content, Point::new(x, y));
					}
				}
				self.apply(transition);
			}
			None => self.end_hover(),
		}
	}

	fn end_hover(&mut self) {
		let transition = self.highlight.hover_end();
		if self.highlight.is_idle() {
			self.tooltip.hide();
		}
		self.apply(transition);
	}

	pub fn pointer_up(&mut self) {
		if self.drag.active {
			if let Some(id) = &self.drag.node {
				debug!("diagram: {id} pinned at {:?}", self.positions.get(id));
			}
		}
		self.drag = DragState::default();
		self.pan.active = false;
	}

	pub fn pointer_leave(&mut self) {
		self.pointer_up();
		self.end_hover();
	}

	/// A click that did not follow a drag.
	pub fn click(&mut self, x: f64, y: f64) {
		if std::mem::take(&mut self.moved) {
			return;
		}
		let hit = self.hit_test(x, y);
		if let Some(Hit::LegendTitle(section)) = hit {
			let collapsed = self.legend.toggle(section);
			debug!("legend: {section:?} collapsed={collapsed}");
			self.legend_layout = self.legend.layout(self.width, self.toggles);
			return;
		}

		match hit.as_ref().and_then(|h| self.selection_for(h).map(|s| (h, s))) {
			Some((hit, selection)) => {
				let content = self.tooltip_for(hit);
				let transition = self.highlight.click(selection, &self.catalog, &self.graph);
				match content {
					Some(content) if !self.highlight.is_idle() => {
						self.tooltip.show(content, Point::new(x, y));
					}
					_ if self.highlight.is_idle() => self.tooltip.hide(),
					_ => {}
				}
				self.apply(transition);
			}
			None => {
				let transition = self.highlight.click_background();
				self.tooltip.hide();
				self.apply(transition);
			}
		}
		debug!("diagram: active selection {:?}", self.highlight.active());
	}

	/// Releases a pinned force node back to the simulation.
	pub fn double_click(&mut self, x: f64, y: f64) {
		let Some(Hit::Node(id)) = self.hit_test(x, y) else {
			return;
		};
		if let Placement::Force(layout) = &mut self.placement {
			if layout.unpin(&id) {
				debug!("diagram: {id} released");
			}
		}
	}

	pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn set_toggles(&mut self, toggles: Toggles) {
		if toggles == self.toggles {
			return;
		}
		info!("diagram: genres={} series={}", toggles.show_genres, toggles.show_series);
		self.toggles = toggles;
		self.legend_layout = self.legend.layout(self.width, toggles);
		self.refresh_visuals();
	}

	pub fn tick(&mut self, dt: f32) {
		if let Placement::Force(layout) = &mut self.placement {
			if self.animation_running {
				layout.tick(dt);
				self.positions = layout.positions();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		if let Placement::Force(layout) = &mut self.placement {
			layout.resize(width, height);
		}
		self.legend_layout = self.legend.layout(width, self.toggles);
	}
}

fn curve_edges(graph: &GraphModel, curves: &[CurveSpec]) -> Vec<EdgeIdx> {
	let index: HashMap<_, EdgeIdx> = graph
		.edges()
		.iter()
		.enumerate()
		.filter_map(|(i, e)| match *e {
			GraphEdge::BookCharacter {
				character,
				link: CharacterLink::Journey { from, to },
			} => Some(((character, from, to), i)),
			_ => None,
		})
		.collect();
	curves
		.iter()
		.filter_map(|c| index.get(&(c.link.character, c.link.source, c.link.target)).copied())
		.collect()
}
