//! Derived diagram graph: tagged nodes and edges built from the catalog.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::catalog::{BookId, Catalog, CharacterId, Genre, Series};

/// Stable string id of a node, unique across node kinds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
	pub fn book(id: BookId) -> Self {
		Self(format!("book-{id}"))
	}

	pub fn character(id: CharacterId) -> Self {
		Self(format!("character-{id}"))
	}

	pub fn genre(genre: Genre) -> Self {
		Self(format!("genre-{}", genre.name()))
	}

	pub fn series_center(series: Series) -> Self {
		Self(format!("serie-center-{}", series.name()))
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Book,
	Character,
	Genre,
	SeriesCenter,
}

impl NodeKind {
	pub const ALL: [NodeKind; 4] = [
		NodeKind::Book,
		NodeKind::Character,
		NodeKind::Genre,
		NodeKind::SeriesCenter,
	];

	pub fn label(self) -> &'static str {
		match self {
			NodeKind::Book => "Book",
			NodeKind::Character => "Character",
			NodeKind::Genre => "Genre",
			NodeKind::SeriesCenter => "Serie",
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphNode {
	Book(BookId),
	Character(CharacterId),
	Genre(Genre),
	SeriesCenter(Series),
}

impl GraphNode {
	pub fn id(&self) -> NodeId {
		match *self {
			GraphNode::Book(id) => NodeId::book(id),
			GraphNode::Character(id) => NodeId::character(id),
			GraphNode::Genre(genre) => NodeId::genre(genre),
			GraphNode::SeriesCenter(series) => NodeId::series_center(series),
		}
	}

	pub fn kind(&self) -> NodeKind {
		match self {
			GraphNode::Book(_) => NodeKind::Book,
			GraphNode::Character(_) => NodeKind::Character,
			GraphNode::Genre(_) => NodeKind::Genre,
			GraphNode::SeriesCenter(_) => NodeKind::SeriesCenter,
		}
	}
}

/// How a character is tied to its books.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharacterLink {
	/// One step of a journey, from the earlier to the later book.
	Journey { from: BookId, to: BookId },
	/// The character node attached directly to a book.
	Appearance { book: BookId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphEdge {
	BookCharacter {
		character: CharacterId,
		link: CharacterLink,
	},
	BookGenre {
		book: BookId,
		genre: Genre,
	},
	BookSeries {
		book: BookId,
		series: Series,
	},
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
	BookCharacter,
	BookGenre,
	BookSeries,
}

impl GraphEdge {
	pub fn kind(&self) -> EdgeKind {
		match self {
			GraphEdge::BookCharacter { .. } => EdgeKind::BookCharacter,
			GraphEdge::BookGenre { .. } => EdgeKind::BookGenre,
			GraphEdge::BookSeries { .. } => EdgeKind::BookSeries,
		}
	}

	pub fn source(&self) -> NodeId {
		match *self {
			GraphEdge::BookCharacter {
				link: CharacterLink::Journey { from, .. },
				..
			} => NodeId::book(from),
			GraphEdge::BookCharacter {
				character,
				link: CharacterLink::Appearance { .. },
			} => NodeId::character(character),
			GraphEdge::BookGenre { book, .. } | GraphEdge::BookSeries { book, .. } => {
				NodeId::book(book)
			}
		}
	}

	pub fn target(&self) -> NodeId {
		match *self {
			GraphEdge::BookCharacter {
				link: CharacterLink::Journey { to, .. },
				..
			} => NodeId::book(to),
			GraphEdge::BookCharacter {
				link: CharacterLink::Appearance { book },
				..
			} => NodeId::book(book),
			GraphEdge::BookGenre { genre, .. } => NodeId::genre(genre),
			GraphEdge::BookSeries { series, .. } => NodeId::series_center(series),
		}
	}

	pub fn touches(&self, node: &NodeId) -> bool {
		self.source() == *node || self.target() == *node
	}

	pub fn owner(&self) -> Option<CharacterId> {
		match *self {
			GraphEdge::BookCharacter { character, .. } => Some(character),
			_ => None,
		}
	}
}

/// Which diagram a graph is derived for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
	/// Books on a fixed grid joined by routed journey curves.
	Grid,
	/// Every entity is a simulated particle.
	Force,
}

pub type EdgeIdx = usize;

/// Nodes and edges of one diagram, with lookups by id.
#[derive(Clone, Debug)]
pub struct GraphModel {
	variant: Variant,
	nodes: Vec<GraphNode>,
	edges: Vec<GraphEdge>,
	index: HashMap<NodeId, usize>,
}

impl GraphModel {
	/// Books and characters joined by journey segments. Characters are
	/// present as nodes but only reached through the legend.
	pub fn grid(catalog: &Catalog) -> Self {
		let mut nodes: Vec<GraphNode> = catalog.books().iter().map(|b| GraphNode::Book(b.id)).collect();
		nodes.extend(catalog.characters().iter().map(|c| GraphNode::Character(c.id)));

		let edges = catalog
			.characters()
			.iter()
			.flat_map(|c| {
				c.journey_pairs().map(move |(from, to)| GraphEdge::BookCharacter {
					character: c.id,
					link: CharacterLink::Journey { from, to },
				})
			})
			.collect();

		Self::assemble(Variant::Grid, nodes, edges)
	}

	/// Series centres, books, characters and genres, each edge kind present.
	pub fn force(catalog: &Catalog) -> Self {
		let mut nodes: Vec<GraphNode> = Series::ALL.iter().map(|&s| GraphNode::SeriesCenter(s)).collect();
		let mut edges = Vec::new();

		for book in catalog.books() {
			nodes.push(GraphNode::Book(book.id));
			edges.push(GraphEdge::BookSeries {
				book: book.id,
				series: book.series,
			});
		}
		for character in catalog.characters() {
			nodes.push(GraphNode::Character(character.id));
			edges.extend(character.journey().iter().map(|&book| GraphEdge::BookCharacter {
				character: character.id,
				link: CharacterLink::Appearance { book },
			}));
		}
		let mut seen = HashSet::new();
		for book in catalog.books() {
			for &genre in &book.genres {
				if seen.insert(genre) {
					nodes.push(GraphNode::Genre(genre));
				}
				edges.push(GraphEdge::BookGenre { book: book.id, genre });
			}
		}

		Self::assemble(Variant::Force, nodes, edges)
	}

	fn assemble(variant: Variant, nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
		let index = nodes.iter().enumerate().map(|(i, n)| (n.id(), i)).collect();
		Self {
			variant,
			nodes,
			edges,
			index,
		}
	}

	pub fn variant(&self) -> Variant {
		self.variant
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	pub fn contains(&self, id: &NodeId) -> bool {
		self.index.contains_key(id)
	}

	/// Edges with `node` as an endpoint.
	pub fn incident_edges<'a>(&'a self, node: &'a NodeId) -> impl Iterator<Item = EdgeIdx> + 'a {
		self.edges
			.iter()
			.enumerate()
			.filter(move |(_, e)| e.touches(node))
			.map(|(i, _)| i)
	}

	/// Direct neighbours of `node`, excluding itself.
	pub fn neighbors(&self, node: &NodeId) -> HashSet<NodeId> {
		let mut out = HashSet::new();
		for edge in &self.edges {
			let (source, target) = (edge.source(), edge.target());
			if source == *node {
				out.insert(target);
			} else if target == *node {
				out.insert(source);
			}
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn node_ids_are_unique_across_kinds() {
		let catalog = Catalog::discworld().unwrap();
		let graph = GraphModel::force(&catalog);
		let ids: HashSet<NodeId> = graph.nodes().iter().map(GraphNode::id).collect();
		assert_eq!(ids.len(), graph.nodes().len());
		assert_eq!(graph.nodes().len(), 8 + 41 + 21 + 19);
	}

	#[test]
	fn grid_edges_follow_journeys() {
		let catalog = Catalog::discworld().unwrap();
		let graph = GraphModel::grid(&catalog);
		for character in catalog.characters() {
			let owned: Vec<_> = graph
				.edges()
				.iter()
				.filter(|e| e.owner() == Some(character.id))
				.collect();
			assert_eq!(owned.len(), character.journey().len().saturating_sub(1));
			for edge in owned {
				let GraphEdge::BookCharacter {
					link: CharacterLink::Journey { from, to },
					..
				} = *edge
				else {
					panic!("grid edge is not a journey segment: {edge:?}");
				};
				let journey = character.journey();
				let pos = journey.iter().position(|&b| b == from).unwrap();
				assert_eq!(journey[pos + 1], to);
			}
		}
	}

	#[test]
	fn every_book_touches_its_series_center() {
		let catalog = Catalog::discworld().unwrap();
		let graph = GraphModel::force(&catalog);
		for book in catalog.books() {
			let node = NodeId::book(book.id);
			assert!(graph.neighbors(&node).contains(&NodeId::series_center(book.series)));
		}
	}

	#[test]
	fn force_edges_connect_character_to_books() {
		let catalog = Catalog::discworld().unwrap();
		let graph = GraphModel::force(&catalog);
		let mort = NodeId::character(1);
		let neighbors = graph.neighbors(&mort);
		assert_eq!(
			neighbors,
			HashSet::from([NodeId::book(4), NodeId::book(16)])
		);
		assert_eq!(graph.incident_edges(&mort).count(), 2);
	}

	#[test]
	fn ids_render_kind_and_identity() {
		assert_eq!(NodeId::book(9).to_string(), "book-9");
		assert_eq!(NodeId::genre(Genre::TimeTravel).to_string(), "genre-Time Travel");
		assert_eq!(
			NodeId::series_center(Series::OneOffs).to_string(),
			"serie-center-One Offs"
		);
	}
}
