use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{DiagramState, shape_radius};
use crate::catalog::{Catalog, FALLBACK_COLOR, PaintTarget};
use crate::graph::{GraphNode, NodeKind, Variant};
use crate::highlight::{Emphasis, Layer};
use crate::legend::{LegendRow, LegendSection};

const BACKGROUND: &str = "#fafafa";
const GENRE_FILL: &str = "#9e9e9e";
const LABEL: &str = "#222";

pub fn render(state: &DiagramState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	match state.variant() {
		Variant::Grid => {
			draw_curves(state, ctx);
			draw_books(state, ctx);
		}
		Variant::Force => {
			draw_lines(state, ctx);
			draw_shapes(state, ctx);
		}
	}
	ctx.restore();
	ctx.set_global_alpha(1.0);
	draw_legend(state, ctx);
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: Option<(f64, f64)>) {
	let pattern = match dash {
		Some((on, off)) => js_sys::Array::of2(&JsValue::from_f64(on), &JsValue::from_f64(off)),
		None => js_sys::Array::new(),
	};
	let _ = ctx.set_line_dash(&pattern);
}

fn draw_curves(state: &DiagramState, ctx: &CanvasRenderingContext2d) {
	let curve_of: std::collections::HashMap<_, _> = (0..state.curves().len())
		.filter_map(|i| state.curve_edge(i).map(|e| (e, i)))
		.collect();

	for edge in state.visuals.edge_order() {
		let (Some(visual), Some(&c)) = (state.visuals.edges.get(edge), curve_of.get(&edge)) else {
			continue;
		};
		if !visual.visible {
			continue;
		}
		let curve = &state.curves()[c];
		let trace = || {
			ctx.begin_path();
			ctx.move_to(curve.start.x, curve.start.y);
			ctx.bezier_curve_to(
				curve.control1.x,
				curve.control1.y,
				curve.control2.x,
				curve.control2.y,
				curve.end.x,
				curve.end.y,
			);
		};

		ctx.set_global_alpha(visual.opacity);
		ctx.set_stroke_style_str(&visual.stroke.color);
		ctx.set_line_width(visual.stroke.width);
		trace();
		ctx.stroke();

		// Dotted groups get their second colour laid over the first.
		let pattern = state
			.catalog
			.character(curve.link.character)
			.and_then(|ch| state.catalog.palette().pattern(&ch.color));
		if let Some(pattern) = pattern {
			ctx.set_stroke_style_str(&pattern.secondary);
			set_dash(ctx, Some((visual.stroke.width, visual.stroke.width)));
			trace();
			ctx.stroke();
			set_dash(ctx, None);
		}
	}
	ctx.set_global_alpha(1.0);
}

fn draw_books(state: &DiagramState, ctx: &CanvasRenderingContext2d) {
	let Some((w, h)) = state.book_size() else {
		return;
	};
	let mut books: Vec<_> = state
		.graph
		.nodes()
		.iter()
		.filter_map(|n| match n {
			GraphNode::Book(id) => Some((*id, n.id())),
			_ => None,
		})
		.filter_map(|(id, node)| {
			let visual = state.visuals.node(&node).filter(|v| v.visible)?;
			Some((id, *state.positions.get(&node)?, visual))
		})
		.collect();
	books.sort_by_key(|(_, _, v)| v.layer);

	for (id, at, visual) in books {
		let Some(book) = state.catalog.book(id) else {
			continue;
		};
		ctx.set_global_alpha(visual.opacity);
		ctx.set_fill_style_str("#fff");
		ctx.fill_rect(at.x, at.y, w, h);
		ctx.set_stroke_style_str(&visual.stroke.color);
		ctx.set_line_width(visual.stroke.width);
		ctx.stroke_rect(at.x, at.y, w, h);

		ctx.set_fill_style_str(LABEL);
		ctx.set_text_align("center");
		ctx.set_font("10px sans-serif");
		let _ = ctx.fill_text_with_max_width(&book.title, at.x + w / 2.0, at.y + h / 2.0, w - 8.0);
		ctx.set_font("8px sans-serif");
		let _ = ctx.fill_text(&book.genre_tags().join(" "), at.x + w / 2.0, at.y + h - 6.0);
	}
	ctx.set_text_align("start");
	ctx.set_global_alpha(1.0);
}

fn draw_lines(state: &DiagramState, ctx: &CanvasRenderingContext2d) {
	for idx in state.visuals.edge_order() {
		let (Some(edge), Some(visual)) = (state.graph.edges().get(idx), state.visuals.edges.get(idx))
		else {
			continue;
		};
		if !visual.visible {
			continue;
		}
		let (Some(a), Some(b)) = (state.positions.get(&edge.source()), state.positions.get(&edge.target()))
		else {
			continue;
		};
		ctx.set_global_alpha(visual.opacity);
		ctx.set_stroke_style_str(&visual.stroke.color);
		ctx.set_line_width(visual.stroke.width);
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn node_fill(catalog: &Catalog, node: &GraphNode) -> String {
	match *node {
		GraphNode::Book(id) => catalog
			.book(id)
			.map_or(FALLBACK_COLOR, |b| catalog.series_color(b.series))
			.to_string(),
		GraphNode::Character(id) => catalog
			.character(id)
			.map(|c| catalog.character_color(c, PaintTarget::Stroke).value)
			.unwrap_or_else(|| FALLBACK_COLOR.to_string()),
		GraphNode::Genre(_) => GENRE_FILL.to_string(),
		GraphNode::SeriesCenter(series) => catalog.series_color(series).to_string(),
	}
}

fn node_label(catalog: &Catalog, node: &GraphNode) -> Option<String> {
	match *node {
		GraphNode::Book(id) => catalog.book(id).map(|b| b.title.clone()),
		GraphNode::Character(id) => catalog.character(id).map(|c| c.name.clone()),
		GraphNode::Genre(genre) => Some(genre.name().to_string()),
		GraphNode::SeriesCenter(series) => Some(series.name().to_string()),
	}
}

fn trace_shape(ctx: &CanvasRenderingContext2d, kind: NodeKind, x: f64, y: f64, r: f64) {
	ctx.begin_path();
	match kind {
		NodeKind::Book => {
			let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
		}
		NodeKind::Character => {
			ctx.move_to(x, y - r);
			ctx.line_to(x + r, y);
			ctx.line_to(x, y + r);
			ctx.line_to(x - r, y);
		}
		NodeKind::Genre => {
			ctx.move_to(x, y - r);
			ctx.line_to(x + r, y + r * 0.8);
			ctx.line_to(x - r, y + r * 0.8);
		}
		NodeKind::SeriesCenter => ctx.rect(x - r, y - r, 2.0 * r, 2.0 * r),
	}
	ctx.close_path();
}

fn draw_shapes(state: &DiagramState, ctx: &CanvasRenderingContext2d) {
	for layer in [Layer::Base, Layer::Raised] {
		for node in state.graph.nodes() {
			let id = node.id();
			let Some(visual) = state.visuals.node(&id).filter(|v| v.visible && v.layer == layer)
			else {
				continue;
			};
			let Some(&at) = state.positions.get(&id) else {
				continue;
			};
			let kind = node.kind();
			ctx.set_global_alpha(visual.opacity);
			trace_shape(ctx, kind, at.x, at.y, shape_radius(kind));
			ctx.set_fill_style_str(&node_fill(&state.catalog, node));
			ctx.fill();
			ctx.set_stroke_style_str(&visual.stroke.color);
			ctx.set_line_width(visual.stroke.width);
			ctx.stroke();

			if let Some(label) = node_label(&state.catalog, node) {
				ctx.set_fill_style_str(LABEL);
				ctx.set_font("10px sans-serif");
				let _ = ctx.fill_text(&label, at.x + shape_radius(kind) + 3.0, at.y + 3.0);
			}
		}
	}
	ctx.set_global_alpha(1.0);
}

fn swatch(catalog: &Catalog, row: &LegendRow) -> String {
	match *row {
		LegendRow::Kind(NodeKind::Book) => "#bbb".to_string(),
		LegendRow::Kind(NodeKind::Character) => "#777".to_string(),
		LegendRow::Kind(NodeKind::Genre) => GENRE_FILL.to_string(),
		LegendRow::Kind(NodeKind::SeriesCenter) => "#555".to_string(),
		LegendRow::Character(id) => node_fill(catalog, &GraphNode::Character(id)),
		LegendRow::Series(series) => catalog
			.color_of(series.name())
			.map_or_else(|| FALLBACK_COLOR.to_string(), |paint| paint.css(PaintTarget::Fill)),
		LegendRow::Genre(_) => GENRE_FILL.to_string(),
	}
}

fn draw_legend(state: &DiagramState, ctx: &CanvasRenderingContext2d) {
	let m = state.legend.metrics;
	ctx.set_fill_style_str(LABEL);
	ctx.set_font("bold 14px sans-serif");
	for panel in &state.legend_layout.panels {
		if panel.section == LegendSection::Kinds {
			continue;
		}
		let mark = if state.legend.is_collapsed(panel.section) { "+" } else { "-" };
		let title = format!("{} {mark}", panel.section.title());
		let _ = ctx.fill_text(&title, panel.origin.x, panel.origin.y + m.title_height - 2.0);
	}

	for (i, row) in state.legend.rows().iter().enumerate() {
		let (Some(Some(at)), Some(visual)) = (state.legend_layout.rows.get(i), state.visuals.legend.get(i))
		else {
			continue;
		};
		if !visual.visible {
			continue;
		}
		ctx.set_global_alpha(visual.opacity);
		match row {
			LegendRow::Kind(kind) => {
				let r = m.swatch / 2.0;
				trace_shape(ctx, *kind, at.x + r, at.y + r, r);
				ctx.set_fill_style_str(&swatch(&state.catalog, row));
				ctx.fill();
			}
			_ => {
				ctx.set_fill_style_str(&swatch(&state.catalog, row));
				ctx.fill_rect(at.x, at.y, m.swatch, m.swatch);
			}
		}
		let weight = if visual.emphasis == Emphasis::Highlighted { "bold " } else { "" };
		ctx.set_font(&format!("{weight}12px sans-serif"));
		ctx.set_fill_style_str(LABEL);
		let _ = ctx.fill_text(&row.label(&state.catalog), at.x + m.swatch + 6.0, at.y + m.swatch - 3.0);
	}
	ctx.set_global_alpha(1.0);
}

