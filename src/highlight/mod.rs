//! Selection state and the relevant subgraph of a selection.
//!
//! [`HighlightState`] is the only place a selection lives. Handlers receive
//! it by reference; visuals are recomputed from it with [`visuals::compute`].

pub mod visuals;

use std::collections::HashSet;

use log::{debug, warn};

use crate::catalog::{Catalog, CharacterId, Genre, Series};
use crate::graph::{EdgeIdx, GraphModel, GraphNode, NodeId, NodeKind};

pub use visuals::{Emphasis, Layer, SceneVisuals, VisualTheme};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
	Character(CharacterId),
	Series(Series),
	Genre(Genre),
	Node(NodeId),
	/// Every node of one kind, from the node-type legend.
	Kind(NodeKind),
}

/// Node and edge sets a selection brings to the foreground.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Relevance {
	pub nodes: HashSet<NodeId>,
	pub edges: HashSet<EdgeIdx>,
}

impl Relevance {
	fn with_internal_edges(graph: &GraphModel, nodes: HashSet<NodeId>) -> Self {
		let edges = graph
			.edges()
			.iter()
			.enumerate()
			.filter(|(_, e)| nodes.contains(&e.source()) && nodes.contains(&e.target()))
			.map(|(i, _)| i)
			.collect();
		Self { nodes, edges }
	}
}

/// Computes what `selection` highlights in `graph`. `None` when the
/// selection names something the graph does not hold.
pub fn relevance(catalog: &Catalog, graph: &GraphModel, selection: &Selection) -> Option<Relevance> {
	let relevance = match selection {
		Selection::Character(id) => {
			let node = NodeId::character(*id);
			if !graph.contains(&node) {
				return None;
			}
			let character = catalog.character(*id)?;
			let mut nodes: HashSet<NodeId> = character
				.journey()
				.iter()
				.map(|&b| NodeId::book(b))
				.filter(|b| graph.contains(b))
				.collect();
			nodes.insert(node);
			let edges = graph
				.edges()
				.iter()
				.enumerate()
				.filter(|(_, e)| e.owner() == Some(*id))
				.map(|(i, _)| i)
				.collect();
			Relevance { nodes, edges }
		}
		Selection::Series(series) => {
			let nodes = graph
				.nodes()
				.iter()
				.filter(|n| match n {
					GraphNode::Book(b) => catalog.book(*b).is_some_and(|b| b.series == *series),
					GraphNode::SeriesCenter(s) => s == series,
					GraphNode::Character(_) | GraphNode::Genre(_) => false,
				})
				.map(GraphNode::id)
				.collect();
			Relevance::with_internal_edges(graph, nodes)
		}
		Selection::Genre(genre) => {
			let nodes = graph
				.nodes()
				.iter()
				.filter(|n| match n {
					GraphNode::Book(b) => catalog.book(*b).is_some_and(|b| b.genres.contains(genre)),
					GraphNode::Genre(g) => g == genre,
					GraphNode::Character(_) | GraphNode::SeriesCenter(_) => false,
				})
				.map(GraphNode::id)
				.collect();
			Relevance::with_internal_edges(graph, nodes)
		}
		Selection::Node(id) => {
			if !graph.contains(id) {
				return None;
			}
			let mut nodes = graph.neighbors(id);
			nodes.insert(id.clone());
			let edges = graph.incident_edges(id).collect();
			Relevance { nodes, edges }
		}
		Selection::Kind(kind) => {
			let nodes = graph
				.nodes()
				.iter()
				.filter(|n| n.kind() == *kind)
				.map(GraphNode::id)
				.collect();
			Relevance::with_internal_edges(graph, nodes)
		}
	};

	if relevance.nodes.is_empty() {
		None
	} else {
		Some(relevance)
	}
}

/// Outcome of an input event on the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
	/// The visible highlight changed.
	Changed,
	/// Nothing to redo.
	Unchanged,
	/// The target was not found; the event was dropped.
	Ignored,
}

/// `Idle` when nothing is active, `Active(selection)` after a click. A
/// hover highlight is layered on top while idle and never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightState {
	active: Option<Selection>,
	hover: Option<Selection>,
}

impl HighlightState {
	pub fn is_idle(&self) -> bool {
		self.active.is_none()
	}

	/// The click selection, if any.
	pub fn active(&self) -> Option<&Selection> {
		self.active.as_ref()
	}

	/// What is drawn: the click selection, else the hover target.
	pub fn effective(&self) -> Option<&Selection> {
		self.active.as_ref().or(self.hover.as_ref())
	}

	pub fn click(&mut self, target: Selection, catalog: &Catalog, graph: &GraphModel) -> Transition {
		if relevance(catalog, graph, &target).is_none() {
			warn!("highlight: click on unknown target {target:?} ignored");
			return Transition::Ignored;
		}
		let before = self.effective().cloned();
		self.hover = None;
		if self.active.as_ref() == Some(&target) {
			debug!("highlight: {target:?} toggled off");
			self.active = None;
		} else {
			debug!("highlight: {target:?} activated");
			self.active = Some(target);
		}
		self.changed_from(before)
	}

	pub fn click_background(&mut self) -> Transition {
		let before = self.effective().cloned();
		self.active = None;
		self.hover = None;
		self.changed_from(before)
	}

	pub fn hover(&mut self, target: Selection, catalog: &Catalog, graph: &GraphModel) -> Transition {
		if self.active.is_some() {
			// Click selections win over hover.
			return Transition::Unchanged;
		}
		if relevance(catalog, graph, &target).is_none() {
			warn!("highlight: hover on unknown target {target:?} ignored");
			return Transition::Ignored;
		}
		let before = self.effective().cloned();
		self.hover = Some(target);
		self.changed_from(before)
	}

	pub fn hover_end(&mut self) -> Transition {
		if self.active.is_some() {
			return Transition::Unchanged;
		}
		let before = self.effective().cloned();
		self.hover = None;
		self.changed_from(before)
	}

	fn changed_from(&self, before: Option<Selection>) -> Transition {
		if self.effective() == before.as_ref() {
			Transition::Unchanged
		} else {
			Transition::Changed
		}
	}
}
