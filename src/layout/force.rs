use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::{debug, warn};

use super::{LayoutProvider, Point, Positions};
use crate::graph::{EdgeKind, GraphModel, NodeId, NodeKind};

/// Link pull applied per step on top of the simulation's springs.
const LINK_STRENGTH: f64 = 0.1;
/// Fraction of an overlap resolved per step.
const COLLIDE_STRENGTH: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceConfig {
	pub series_distance: f64,
	pub character_distance: f64,
	pub genre_distance: f64,
	/// Many-body strength; negative repels.
	pub charge: f64,
	pub book_radius: f64,
	pub character_radius: f64,
	pub genre_radius: f64,
	pub series_radius: f64,
	pub width: f64,
	pub height: f64,
	/// Steps run before the first positions are handed out.
	pub warmup_steps: usize,
	pub dt: f32,
}

impl Default for ForceConfig {
	fn default() -> Self {
		Self {
			series_distance: 50.0,
			character_distance: 80.0,
			genre_distance: 100.0,
			charge: -300.0,
			book_radius: 25.0,
			character_radius: 20.0,
			genre_radius: 15.0,
			series_radius: 40.0,
			width: 1200.0,
			height: 800.0,
			warmup_steps: 300,
			dt: 0.016,
		}
	}
}

impl ForceConfig {
	pub fn distance(&self, kind: EdgeKind) -> f64 {
		match kind {
			EdgeKind::BookSeries => self.series_distance,
			EdgeKind::BookCharacter => self.character_distance,
			EdgeKind::BookGenre => self.genre_distance,
		}
	}

	pub fn radius(&self, kind: NodeKind) -> f64 {
		match kind {
			NodeKind::Book => self.book_radius,
			NodeKind::Character => self.character_radius,
			NodeKind::Genre => self.genre_radius,
			NodeKind::SeriesCenter => self.series_radius,
		}
	}

	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinkConstraint {
	pub source: NodeId,
	pub target: NodeId,
	pub distance: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSpec {
	pub id: NodeId,
	pub radius: f64,
	pub start: Point,
}

/// Everything the oracle needs to simulate one graph.
#[derive(Clone, Debug, PartialEq)]
pub struct ForceConstraints {
	pub particles: Vec<ParticleSpec>,
	pub links: Vec<LinkConstraint>,
	pub charge: f64,
	pub center: Point,
}

impl ForceConstraints {
	/// Seeds particles on a circle around the centre, in node order.
	pub fn from_graph(graph: &GraphModel, config: &ForceConfig) -> Self {
		let center = config.center();
		let n = graph.nodes().len().max(1) as f64;
		let particles = graph
			.nodes()
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let angle = i as f64 * 2.0 * PI / n;
				ParticleSpec {
					id: node.id(),
					radius: config.radius(node.kind()),
					start: Point::new(center.x + 100.0 * angle.cos(), center.y + 100.0 * angle.sin()),
				}
			})
			.collect();
		let links = graph
			.edges()
			.iter()
			.map(|edge| LinkConstraint {
				source: edge.source(),
				target: edge.target(),
				distance: config.distance(edge.kind()),
			})
			.collect();

		Self {
			particles,
			links,
			charge: config.charge,
			center,
		}
	}
}

/// A physics backend that relaxes particles under [`ForceConstraints`].
pub trait LayoutOracle {
	fn load(&mut self, constraints: &ForceConstraints);
	fn step(&mut self, dt: f32);
	fn positions(&self) -> Positions;
	fn recenter(&mut self, center: Point);
	/// Fixes a node at `at` until unpinned. Returns false for unknown ids.
	fn pin(&mut self, node: &NodeId, at: Point) -> bool;
	fn unpin(&mut self, node: &NodeId) -> bool;
}

#[derive(Clone, Debug, Default)]
struct Particle {
	id: NodeId,
	radius: f64,
}

/// [`force_graph`] supplies charge, springs and damping; link distance,
/// collision and centering are projected after every step.
pub struct ForceGraphOracle {
	graph: ForceGraph<Particle, ()>,
	index: HashMap<NodeId, DefaultNodeIdx>,
	links: Vec<(DefaultNodeIdx, DefaultNodeIdx, f64)>,
	center: Point,
}

impl Default for ForceGraphOracle {
	fn default() -> Self {
		Self {
			graph: ForceGraph::new(simulation_parameters(-300.0)),
			index: HashMap::new(),
			links: Vec::new(),
			center: Point::default(),
		}
	}
}

fn simulation_parameters(charge: f64) -> SimulationParameters {
	SimulationParameters {
		force_charge: (charge.abs() / 2.0) as f32,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	}
}

impl ForceGraphOracle {
	fn project(&mut self) {
		let mut snapshot: HashMap<DefaultNodeIdx, (f64, f64, f64, bool)> = HashMap::new();
		self.graph.visit_nodes(|node| {
			snapshot.insert(
				node.index(),
				(
					node.x() as f64,
					node.y() as f64,
					node.data.user_data.radius,
					node.data.is_anchor,
				),
			);
		});
		let mut shift: HashMap<DefaultNodeIdx, (f64, f64)> = HashMap::new();
		let mut nudge = |idx: DefaultNodeIdx, dx: f64, dy: f64| {
			let entry = shift.entry(idx).or_insert((0.0, 0.0));
			entry.0 += dx;
			entry.1 += dy;
		};

		for &(a, b, distance) in &self.links {
			let (Some(&(ax, ay, ..)), Some(&(bx, by, ..))) = (snapshot.get(&a), snapshot.get(&b)) else {
				continue;
			};
			let (dx, dy) = (bx - ax, by - ay);
			let d = (dx * dx + dy * dy).sqrt();
			if d < 1e-6 {
				continue;
			}
			let k = (d - distance) / d * LINK_STRENGTH * 0.5;
			nudge(a, dx * k, dy * k);
			nudge(b, -dx * k, -dy * k);
		}

		let entries: Vec<_> = snapshot.iter().map(|(&i, &v)| (i, v)).collect();
		for (i, &(a, (ax, ay, ar, _))) in entries.iter().enumerate() {
			for &(b, (bx, by, br, _)) in &entries[i + 1..] {
				let (dx, dy) = (bx - ax, by - ay);
				let d = (dx * dx + dy * dy).sqrt();
				let min = ar + br;
				if d >= min || d < 1e-6 {
					continue;
				}
				let k = (min - d) / d * COLLIDE_STRENGTH * 0.5;
				nudge(a, -dx * k, -dy * k);
				nudge(b, dx * k, dy * k);
			}
		}

		let free: Vec<_> = entries.iter().filter(|(_, v)| !v.3).collect();
		let (cx, cy) = if free.is_empty() {
			(0.0, 0.0)
		} else {
			let n = free.len() as f64;
			let (sx, sy) = free.iter().fold((0.0, 0.0), |acc, (_, v)| (acc.0 + v.0, acc.1 + v.1));
			(self.center.x - sx / n, self.center.y - sy / n)
		};

		self.graph.visit_nodes_mut(|node| {
			if node.data.is_anchor {
				return;
			}
			let (dx, dy) = shift.get(&node.index()).copied().unwrap_or((0.0, 0.0));
			node.data.x += (dx + cx) as f32;
			node.data.y += (dy + cy) as f32;
		});
	}
}

impl LayoutOracle for ForceGraphOracle {
	fn load(&mut self, constraints: &ForceConstraints) {
		let mut graph = ForceGraph::new(simulation_parameters(constraints.charge));
		let mut index = HashMap::new();
		for particle in &constraints.particles {
			let idx = graph.add_node(NodeData {
				x: particle.start.x as f32,
				y: particle.start.y as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: Particle {
					id: particle.id.clone(),
					radius: particle.radius,
				},
			});
			index.insert(particle.id.clone(), idx);
		}

		let mut links = Vec::with_capacity(constraints.links.len());
		for link in &constraints.links {
			match (index.get(&link.source), index.get(&link.target)) {
				(Some(&src), Some(&tgt)) => {
					graph.add_edge(src, tgt, EdgeData::default());
					links.push((src, tgt, link.distance));
				}
				_ => warn!("force: link {} -> {} has a missing endpoint", link.source, link.target),
			}
		}

		debug!("force: loaded {} particles, {} links", index.len(), links.len());
		self.graph = graph;
		self.index = index;
		self.links = links;
		self.center = constraints.center;
	}

	fn step(&mut self, dt: f32) {
		self.graph.update(dt);
		self.project();
	}

	fn positions(&self) -> Positions {
		let mut positions = Positions::with_capacity(self.index.len());
		self.graph.visit_nodes(|node| {
			positions.insert(
				node.data.user_data.id.clone(),
				Point::new(node.x() as f64, node.y() as f64),
			);
		});
		positions
	}

	fn recenter(&mut self, center: Point) {
		self.center = center;
	}

	fn pin(&mut self, node: &NodeId, at: Point) -> bool {
		let Some(&idx) = self.index.get(node) else {
			return false;
		};
		self.graph.visit_nodes_mut(|n| {
			if n.index() == idx {
				n.data.x = at.x as f32;
				n.data.y = at.y as f32;
				n.data.is_anchor = true;
			}
		});
		true
	}

	fn unpin(&mut self, node: &NodeId) -> bool {
		let Some(&idx) = self.index.get(node) else {
			return false;
		};
		self.graph.visit_nodes_mut(|n| {
			if n.index() == idx {
				n.data.is_anchor = false;
			}
		});
		true
	}
}

/// Physics placement of every node kind. Coordinates differ from run to
/// run in general; only the structure of the result is stable.
pub struct ForceLayout<O: LayoutOracle = ForceGraphOracle> {
	pub config: ForceConfig,
	oracle: O,
}

impl ForceLayout {
	pub fn new(config: ForceConfig) -> Self {
		Self::with_oracle(config, ForceGraphOracle::default())
	}
}

impl<O: LayoutOracle> ForceLayout<O> {
	pub fn with_oracle(config: ForceConfig, oracle: O) -> Self {
		Self { config, oracle }
	}

	/// Advances the simulation by one frame.
	pub fn tick(&mut self, dt: f32) {
		self.oracle.step(dt);
	}

	pub fn positions(&self) -> Positions {
		self.oracle.positions()
	}

	pub fn pin(&mut self, node: &NodeId, at: Point) -> bool {
		self.oracle.pin(node, at)
	}

	pub fn unpin(&mut self, node: &NodeId) -> bool {
		self.oracle.unpin(node)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.config.width = width;
		self.config.height = height;
		self.oracle.recenter(self.config.center());
	}
}

impl<O: LayoutOracle> LayoutProvider for ForceLayout<O> {
	fn compute_positions(&mut self, graph: &GraphModel) -> Positions {
		let constraints = ForceConstraints::from_graph(graph, &self.config);
		self.oracle.load(&constraints);
		for _ in 0..self.config.warmup_steps {
			self.oracle.step(self.config.dt);
		}
		self.oracle.positions()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::{Catalog, Series};
	use crate::graph::GraphNode;

	fn small_config() -> ForceConfig {
		ForceConfig {
			warmup_steps: 40,
			..ForceConfig::default()
		}
	}

	#[test]
	fn link_distances_follow_visual_hierarchy() {
		let c = ForceConfig::default();
		assert!(c.distance(EdgeKind::BookSeries) < c.distance(EdgeKind::BookCharacter));
		assert!(c.distance(EdgeKind::BookCharacter) < c.distance(EdgeKind::BookGenre));
		assert!(c.radius(NodeKind::SeriesCenter) > c.radius(NodeKind::Book));
	}

	#[test]
	fn constraints_tie_every_book_to_its_series() {
		let catalog = Catalog::discworld().unwrap();
		let graph = GraphModel::force(&catalog);
		let constraints = ForceConstraints::from_graph(&graph, &ForceConfig::default());

		assert_eq!(constraints.particles.len(), graph.nodes().len());
		assert_eq!(constraints.links.len(), graph.edges().len());
		for book in catalog.books() {
			let link = constraints
				.links
				.iter()
				.find(|l| {
					l.source == NodeId::book(book.id) && l.target == NodeId::series_center(book.series)
				})
				.unwrap();
			assert_eq!(link.distance, 50.0);
		}
	}

	#[test]
	fn every_node_gets_a_finite_position() {
		let catalog = Catalog::discworld().unwrap();
		let graph = GraphModel::force(&catalog);
		let mut layout = ForceLayout::new(small_config());
		let positions = layout.compute_positions(&graph);

		assert_eq!(positions.len(), graph.nodes().len());
		for node in graph.nodes() {
			let p = positions[&node.id()];
			assert!(p.x.is_finite() && p.y.is_finite(), "{node:?} at {p:?}");
		}
	}

	#[test]
	fn pinned_node_holds_its_coordinate() {
		let catalog = Catalog::discworld().unwrap();
		let graph = GraphModel::force(&catalog);
		let mut layout = ForceLayout::new(small_config());
		layout.compute_positions(&graph);

		let hub = GraphNode::SeriesCenter(Series::Guards).id();
		let at = Point::new(42.0, 24.0);
		assert!(layout.pin(&hub, at));
		for _ in 0..10 {
			layout.tick(0.016);
		}
		assert_eq!(layout.positions()[&hub], at);

		assert!(layout.unpin(&hub));
		assert!(!layout.pin(&NodeId::book(999), at));
	}
}
