//! Curve routing for character journeys on the fixed grid.
//!
//! Several characters often travel between the same two books. Each such
//! bundle is fanned out by a perpendicular offset so every journey stays
//! visible. Bundles between different book pairs are not separated.

use std::collections::HashMap;

use crate::catalog::{BookId, Catalog, CharacterId};
use crate::graph::NodeId;
use crate::layout::{Point, Positions};

/// Routing constants, in diagram units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouterConfig {
	/// Horizontal distance from a book's position to its anchor dot.
	pub anchor_dx: f64,
	/// Spacing between parallel curves of one bundle.
	pub spacing: f64,
	/// Below this horizontal separation a curve bows sideways.
	pub vertical_threshold: f64,
	/// Sideways bow of near-vertical curves.
	pub side_bow: f64,
	/// Anchors left of this x bow to the left.
	pub left_edge: f64,
	/// Lift of the control points for arcs between distant books.
	pub arc_height: f64,
}

impl Default for RouterConfig {
	fn default() -> Self {
		Self {
			anchor_dx: 50.0,
			spacing: 10.0,
			vertical_threshold: 30.0,
			side_bow: 30.0,
			left_edge: 50.0,
			arc_height: 40.0,
		}
	}
}

/// One step of a character's journey.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JourneyLink {
	pub character: CharacterId,
	pub source: BookId,
	pub target: BookId,
}

/// Adjacent book pairs of every character, in catalogue order.
pub fn journey_links(catalog: &Catalog) -> Vec<JourneyLink> {
	catalog
		.characters()
		.iter()
		.flat_map(|c| {
			c.journey_pairs().map(move |(source, target)| JourneyLink {
				character: c.id,
				source,
				target,
			})
		})
		.collect()
}

/// A routed cubic Bézier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveSpec {
	pub link: JourneyLink,
	pub offset: f64,
	pub start: Point,
	pub control1: Point,
	pub control2: Point,
	pub end: Point,
}

impl CurveSpec {
	pub fn point_at(&self, t: f64) -> Point {
		let u = 1.0 - t;
		let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
		Point::new(
			a * self.start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
			a * self.start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
		)
	}

	/// Approximate distance from `p` to the curve, sampled along its length.
	pub fn distance_to(&self, p: Point) -> f64 {
		const SAMPLES: usize = 32;
		(0..=SAMPLES)
			.map(|i| self.point_at(i as f64 / SAMPLES as f64).distance(p))
			.fold(f64::INFINITY, f64::min)
	}
}

/// Offset index of member `i` in a bundle of `n`: symmetric around zero,
/// integers for odd `n` and halves for even `n`.
pub fn offset_index(i: usize, n: usize) -> f64 {
	if n % 2 == 1 {
		i as f64 - (n / 2) as f64
	} else {
		i as f64 - n as f64 / 2.0 + 0.5
	}
}

/// Routes every link whose endpoints are positioned. Output follows the
/// order of `links`; links with a missing endpoint are skipped.
pub fn route(positions: &Positions, links: &[JourneyLink], config: &RouterConfig) -> Vec<CurveSpec> {
	let offsets = bundle_offsets(links, config.spacing);

	links
		.iter()
		.zip(offsets)
		.filter_map(|(link, offset)| {
			let source = positions.get(&NodeId::book(link.source))?;
			let target = positions.get(&NodeId::book(link.target))?;
			Some(curve(*link, *source, *target, offset, config))
		})
		.collect()
}

fn bundle_offsets(links: &[JourneyLink], spacing: f64) -> Vec<f64> {
	let mut bundles: HashMap<(BookId, BookId), Vec<usize>> = HashMap::new();
	for (i, link) in links.iter().enumerate() {
		bundles.entry((link.source, link.target)).or_default().push(i);
	}

	let mut offsets = vec![0.0; links.len()];
	for members in bundles.values_mut() {
		members.sort_by_key(|&i| (links[i].character, i));
		let n = members.len();
		for (rank, &i) in members.iter().enumerate() {
			offsets[i] = offset_index(rank, n) * spacing;
		}
	}
	offsets
}

fn curve(link: JourneyLink, source: Point, target: Point, offset: f64, config: &RouterConfig) -> CurveSpec {
	let (x1, y1) = (source.x + config.anchor_dx, source.y);
	let (x2, y2) = (target.x + config.anchor_dx, target.y);

	let (start, control1, control2, end) = if (x1 - x2).abs() < config.vertical_threshold {
		let bow = if x1 < config.left_edge {
			-config.side_bow
		} else {
			config.side_bow
		};
		let third = (y2 - y1) / 3.0;
		(
			Point::new(x1 + offset, y1),
			Point::new(x1 + offset + bow, y1 + third),
			Point::new(x2 + offset + bow, y2 - third),
			Point::new(x2 + offset, y2),
		)
	} else {
		let dx = (x2 - x1) / 2.0;
		(
			Point::new(x1, y1),
			Point::new(x1 + dx, y1 - config.arc_height + offset),
			Point::new(x2 - dx, y2 - config.arc_height + offset),
			Point::new(x2, y2),
		)
	};

	CurveSpec {
		link,
		offset,
		start,
		control1,
		control2,
		end,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::GraphModel;
	use crate::layout::{GridLayout, LayoutProvider};

	fn grid_positions(catalog: &Catalog) -> Positions {
		GridLayout::default().compute_positions(&GraphModel::grid(catalog))
	}

	fn link(character: CharacterId, source: BookId, target: BookId) -> JourneyLink {
		JourneyLink {
			character,
			source,
			target,
		}
	}

	#[test]
	fn offsets_are_symmetric_and_distinct() {
		assert_eq!(offset_index(0, 1), 0.0);
		for n in 1..=7 {
			let idx: Vec<f64> = (0..n).map(|i| offset_index(i, n)).collect();
			assert!(idx.windows(2).all(|w| w[0] < w[1]), "n={n}: {idx:?}");
			let sum: f64 = idx.iter().sum();
			assert!(sum.abs() < 1e-9, "n={n}: {idx:?}");
			assert_eq!(idx[0], -idx[n - 1]);
		}
		assert_eq!(
			(0..3).map(|i| offset_index(i, 3)).collect::<Vec<_>>(),
			vec![-1.0, 0.0, 1.0]
		);
		assert_eq!(
			(0..2).map(|i| offset_index(i, 2)).collect::<Vec<_>>(),
			vec![-0.5, 0.5]
		);
	}

	#[test]
	fn journey_edge_count_matches_books() {
		let catalog = Catalog::discworld().unwrap();
		let curves = route(
			&grid_positions(&catalog),
			&journey_links(&catalog),
			&RouterConfig::default(),
		);
		for character in catalog.characters() {
			let mine: Vec<_> = curves
				.iter()
				.filter(|c| c.link.character == character.id)
				.collect();
			assert_eq!(mine.len(), character.journey().len().saturating_sub(1));
			let pairs: Vec<_> = character.journey_pairs().collect();
			let routed: Vec<_> = mine.iter().map(|c| (c.link.source, c.link.target)).collect();
			assert_eq!(pairs, routed);
		}
	}

	#[test]
	fn bundles_are_ordered_by_owner() {
		let catalog = Catalog::discworld().unwrap();
		let positions = grid_positions(&catalog);
		// Deliberately out of owner order.
		let links = [link(21, 1, 2), link(3, 1, 2), link(14, 1, 2), link(8, 2, 17)];
		let curves = route(&positions, &links, &RouterConfig::default());

		assert_eq!(curves.len(), 4);
		assert_eq!(curves[0].offset, 10.0);
		assert_eq!(curves[1].offset, -10.0);
		assert_eq!(curves[2].offset, 0.0);
		assert_eq!(curves[3].offset, 0.0);
	}

	#[test]
	fn distant_books_arc_upwards() {
		let catalog = Catalog::discworld().unwrap();
		let positions = grid_positions(&catalog);
		let config = RouterConfig::default();
		let links = [link(1, 1, 2), link(2, 1, 2)];
		let curves = route(&positions, &links, &config);

		let book1 = positions[&NodeId::book(1)];
		let first = curves[0];
		assert_eq!(first.start, Point::new(book1.x + 50.0, book1.y));
		assert_eq!(first.control1.y, book1.y - 40.0 - 5.0);
		assert_eq!(curves[1].control1.y, book1.y - 40.0 + 5.0);
		// Arcs keep their endpoints on the anchors.
		assert_eq!(first.start, curves[1].start);
		assert_eq!(first.end, curves[1].end);
	}

	#[test]
	fn stacked_books_bow_sideways() {
		let catalog = Catalog::discworld().unwrap();
		let positions = grid_positions(&catalog);
		let config = RouterConfig::default();
		// Book 1 sits directly above book 9 on the grid.
		let curves = route(&positions, &[link(4, 1, 9), link(5, 1, 9)], &config);
		let (a, b) = (curves[0], curves[1]);

		assert_eq!(a.start.x + 10.0, b.start.x);
		assert_eq!(a.control1.x, a.start.x + 30.0);
		assert_eq!(a.control2.y, a.end.y - (a.end.y - a.start.y) / 3.0);
	}

	#[test]
	fn unpositioned_links_are_skipped() {
		let mut positions = Positions::new();
		positions.insert(NodeId::book(1), Point::new(0.0, 0.0));
		let curves = route(&positions, &[link(1, 1, 2)], &RouterConfig::default());
		assert!(curves.is_empty());
	}

	#[test]
	fn routing_is_deterministic() {
		let catalog = Catalog::discworld().unwrap();
		let positions = grid_positions(&catalog);
		let links = journey_links(&catalog);
		let a = route(&positions, &links, &RouterConfig::default());
		let b = route(&positions, &links, &RouterConfig::default());
		assert_eq!(a, b);
	}

	#[test]
	fn curve_passes_through_its_endpoints() {
		let curve = CurveSpec {
			link: link(1, 1, 2),
			offset: 0.0,
			start: Point::new(0.0, 0.0),
			control1: Point::new(1.0, -40.0),
			control2: Point::new(2.0, -40.0),
			end: Point::new(3.0, 0.0),
		};
		assert!(curve.distance_to(Point::new(0.0, 0.0)) < 1e-9);
		assert!(curve.distance_to(Point::new(3.0, 0.0)) < 1e-9);
		assert_eq!(curve.point_at(0.5), Point::new(1.5, -30.0));
	}
}
