//! Colour tables and the character colour fallback chain.

use std::collections::HashMap;

use super::Series;

/// Used when no tier of the fallback chain yields a colour.
pub const FALLBACK_COLOR: &str = "#00FF00";

/// A two-colour dotted fill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternDef {
	pub id: String,
	pub primary: String,
	pub secondary: String,
}

impl PatternDef {
	pub fn dotted(id: &str, primary: &str, secondary: &str) -> Self {
		Self {
			id: id.into(),
			primary: primary.into(),
			secondary: secondary.into(),
		}
	}

	/// Paint-server reference for fills, e.g. `url(#pattern-white-red-dotted)`.
	pub fn fill_ref(&self) -> String {
		format!("url(#{})", self.id)
	}
}

/// A resolved display paint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Paint {
	Solid(String),
	Pattern(PatternDef),
}

impl Paint {
	/// CSS value for the given use. Patterns stroke with their primary colour.
	pub fn css(&self, target: PaintTarget) -> String {
		match (self, target) {
			(Paint::Solid(c), _) => c.clone(),
			(Paint::Pattern(p), PaintTarget::Stroke) => p.primary.clone(),
			(Paint::Pattern(p), PaintTarget::Fill) => p.fill_ref(),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintTarget {
	Fill,
	Stroke,
}

/// Which step of the fallback chain produced a character colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorTier {
	Simple,
	Pattern,
	SeriesFallback,
	Fallback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedColor {
	pub tier: ColorTier,
	pub value: String,
}

/// Series colours, simple named colours and dotted patterns.
#[derive(Clone, Debug, Default)]
pub struct Palette {
	series: HashMap<Series, String>,
	simple: HashMap<String, String>,
	patterns: Vec<PatternDef>,
}

impl Palette {
	pub fn new(
		series: impl IntoIterator<Item = (Series, String)>,
		simple: impl IntoIterator<Item = (String, String)>,
		patterns: Vec<PatternDef>,
	) -> Self {
		Self {
			series: series.into_iter().collect(),
			simple: simple.into_iter().collect(),
			patterns,
		}
	}

	pub fn series(&self, series: Series) -> Option<&str> {
		self.series.get(&series).map(String::as_str)
	}

	pub fn simple(&self, token: &str) -> Option<&str> {
		self.simple.get(token).map(String::as_str)
	}

	/// Looks a colour token up among the dotted patterns by its slug.
	pub fn pattern(&self, token: &str) -> Option<&PatternDef> {
		let id = pattern_id(token);
		self.patterns.iter().find(|p| p.id == id)
	}
}

/// Kebab-case slug of a colour token: camel-case word boundaries and every
/// non-alphanumeric become `-`, letters are lower-cased.
///
/// `GreenYellowDotted` and `green yellow dotted` both map to
/// `green-yellow-dotted`.
pub fn slug(token: &str) -> String {
	let mut out = String::with_capacity(token.len() + 4);
	let mut prev_lower = false;
	for ch in token.chars() {
		if ch.is_ascii_alphanumeric() {
			if ch.is_ascii_uppercase() && prev_lower {
				out.push('-');
			}
			out.push(ch.to_ascii_lowercase());
			prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
		} else {
			out.push('-');
			prev_lower = false;
		}
	}
	out
}

pub fn pattern_id(token: &str) -> String {
	format!("pattern-{}", slug(token))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn slug_splits_camel_case() {
		assert_eq!(slug("GreenYellowDotted"), "green-yellow-dotted");
		assert_eq!(slug("WhiteRedDotted"), "white-red-dotted");
		assert_eq!(slug("white red/dotted"), "white-red-dotted");
		assert_eq!(pattern_id("Black"), "pattern-black");
	}

	#[test]
	fn pattern_paint_depends_on_target() {
		let paint = Paint::Pattern(PatternDef::dotted("pattern-a-b", "green", "yellow"));
		assert_eq!(paint.css(PaintTarget::Stroke), "green");
		assert_eq!(paint.css(PaintTarget::Fill), "url(#pattern-a-b)");

		let solid = Paint::Solid("#000000".into());
		assert_eq!(solid.css(PaintTarget::Fill), solid.css(PaintTarget::Stroke));
	}
}
