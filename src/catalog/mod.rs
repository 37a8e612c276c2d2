//! The static entity catalog: books, running characters, series and genres.
//!
//! The catalog is validated eagerly when it is built and is read-only
//! afterwards. Everything the diagrams draw is derived from it.

mod color;
pub mod data;

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::warn;

pub use color::{ColorTier, FALLBACK_COLOR, Paint, PaintTarget, Palette, ResolvedColor};

use crate::error::{CatalogError, Result};

pub type BookId = u32;
pub type CharacterId = u32;

/// Base for ids handed to characters that were catalogued without one.
pub const FALLBACK_CHARACTER_ID_BASE: CharacterId = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Series {
	Wizards,
	Witches,
	Death,
	OneOffs,
	Guards,
	SomethingNewComes,
	TiffanyAching,
	IndustrialRevolution,
}

impl Series {
	pub const ALL: [Series; 8] = [
		Series::Wizards,
		Series::Witches,
		Series::Death,
		Series::OneOffs,
		Series::Guards,
		Series::SomethingNewComes,
		Series::TiffanyAching,
		Series::IndustrialRevolution,
	];

	pub fn name(self) -> &'static str {
		match self {
			Series::Wizards => "Wizards",
			Series::Witches => "Witches",
			Series::Death => "Death",
			Series::OneOffs => "One Offs",
			Series::Guards => "Guards",
			Series::SomethingNewComes => "Something new comes",
			Series::TiffanyAching => "Tiffany Aching",
			Series::IndustrialRevolution => "Industrial Revolution",
		}
	}
}

impl fmt::Display for Series {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Genre {
	Parody,
	Adventure,
	Satire,
	BuddyComedy,
	ComingOfAge,
	Drama,
	Action,
	Crime,
	Mystery,
	SliceOfLife,
	Fairytale,
	Holiday,
	Horror,
	Thriller,
	TimeTravel,
	MilitaryFiction,
	SchoolStory,
	Heist,
	Sports,
}

impl Genre {
	pub fn name(self) -> &'static str {
		match self {
			Genre::Parody => "Parody",
			Genre::Adventure => "Adventure",
			Genre::Satire => "Satire",
			Genre::BuddyComedy => "Buddy Comedy",
			Genre::ComingOfAge => "Coming of age",
			Genre::Drama => "Drama",
			Genre::Action => "Action",
			Genre::Crime => "Crime",
			Genre::Mystery => "Mystery",
			Genre::SliceOfLife => "Slice of Life",
			Genre::Fairytale => "Fairytale",
			Genre::Holiday => "Holiday",
			Genre::Horror => "Horror",
			Genre::Thriller => "Thriller",
			Genre::TimeTravel => "Time Travel",
			Genre::MilitaryFiction => "Military Fiction",
			Genre::SchoolStory => "School Story",
			Genre::Heist => "Heist",
			Genre::Sports => "Sports",
		}
	}

	/// Two-letter upper-case tag shown in the corner of a book box.
	pub fn abbreviation(self) -> String {
		self.name().chars().take(2).collect::<String>().to_uppercase()
	}
}

impl fmt::Display for Genre {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Book {
	pub id: BookId,
	pub title: String,
	pub series: Series,
	pub genres: Vec<Genre>,
}

impl Book {
	/// Abbreviations of the first two genres.
	pub fn genre_tags(&self) -> Vec<String> {
		self.genres.iter().take(2).map(|g| g.abbreviation()).collect()
	}
}

/// A character as catalogued, before validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterRecord {
	pub id: Option<CharacterId>,
	pub name: String,
	pub members: Vec<String>,
	pub color: String,
	pub books: Vec<BookId>,
}

/// A validated character whose journey is sorted by book id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Character {
	pub id: CharacterId,
	pub name: String,
	pub members: Vec<String>,
	pub color: String,
	journey: Vec<BookId>,
}

impl Character {
	/// Books in ascending id order.
	pub fn journey(&self) -> &[BookId] {
		&self.journey
	}

	pub fn first_book(&self) -> Option<BookId> {
		self.journey.first().copied()
	}

	pub fn is_group(&self) -> bool {
		!self.members.is_empty()
	}

	/// Chronologically adjacent book pairs; `n` books give `n - 1` pairs.
	pub fn journey_pairs(&self) -> impl Iterator<Item = (BookId, BookId)> + '_ {
		self.journey.windows(2).map(|w| (w[0], w[1]))
	}
}

/// Non-fatal findings made while loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogWarning {
	MissingCharacterId { name: String, assigned: CharacterId },
	RepeatedJourneyBook { character: CharacterId, book: BookId },
}

impl fmt::Display for CatalogWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			CatalogWarning::MissingCharacterId { name, assigned } => {
				write!(f, "character {name:?} has no id, assigned {assigned}")
			}
			CatalogWarning::RepeatedJourneyBook { character, book } => {
				write!(f, "character {character} lists book {book} more than once")
			}
		}
	}
}

pub struct Catalog {
	books: Vec<Book>,
	characters: Vec<Character>,
	book_index: HashMap<BookId, usize>,
	palette: Palette,
	warnings: Vec<CatalogWarning>,
}

impl Catalog {
	/// The compiled-in Discworld corpus.
	pub fn discworld() -> Result<Self> {
		Self::new(data::books(), data::characters(), data::palette())
	}

	pub fn new(
		mut books: Vec<Book>,
		records: Vec<CharacterRecord>,
		palette: Palette,
	) -> Result<Self> {
		books.sort_by_key(|b| b.id);
		let mut book_index = HashMap::with_capacity(books.len());
		for (i, book) in books.iter().enumerate() {
			if book_index.insert(book.id, i).is_some() {
				return Err(CatalogError::DuplicateBook(book.id));
			}
			if palette.series(book.series).is_none() {
				return Err(CatalogError::MissingSeriesColor(book.series));
			}
		}

		let mut warnings = Vec::new();
		let mut seen = HashSet::new();
		let mut characters = Vec::with_capacity(records.len());
		for (i, record) in records.into_iter().enumerate() {
			let id = match record.id {
				Some(id) => id,
				None => {
					let assigned = FALLBACK_CHARACTER_ID_BASE + i as CharacterId;
					warnings.push(CatalogWarning::MissingCharacterId {
						name: record.name.clone(),
						assigned,
					});
					assigned
				}
			};
			if !seen.insert(id) {
				return Err(CatalogError::DuplicateCharacter(id));
			}

			let mut journey = record.books;
			if let Some(&book) = journey.iter().find(|b| !book_index.contains_key(b)) {
				return Err(CatalogError::UnknownBook {
					character: id,
					name: record.name,
					book,
				});
			}
			journey.sort_unstable();
			if let Some(book) = journey.windows(2).find(|w| w[0] == w[1]).map(|w| w[0]) {
				warnings.push(CatalogWarning::RepeatedJourneyBook {
					character: id,
					book,
				});
				journey.dedup();
			}

			characters.push(Character {
				id,
				name: record.name,
				members: record.members,
				color: record.color,
				journey,
			});
		}

		for warning in &warnings {
			warn!("catalog: {warning}");
		}

		Ok(Self {
			books,
			characters,
			book_index,
			palette,
			warnings,
		})
	}

	/// Books sorted by id.
	pub fn books(&self) -> &[Book] {
		&self.books
	}

	/// Characters in catalogue order.
	pub fn characters(&self) -> &[Character] {
		&self.characters
	}

	pub fn book(&self, id: BookId) -> Option<&Book> {
		self.book_index.get(&id).map(|&i| &self.books[i])
	}

	pub fn character(&self, id: CharacterId) -> Option<&Character> {
		self.characters.iter().find(|c| c.id == id)
	}

	/// Distinct genres carried by at least one book, sorted by name.
	pub fn genres(&self) -> Vec<Genre> {
		let mut genres: Vec<Genre> = self
			.books
			.iter()
			.flat_map(|b| b.genres.iter().copied())
			.collect::<HashSet<_>>()
			.into_iter()
			.collect();
		genres.sort_by_key(|g| g.name());
		genres
	}

	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	pub fn warnings(&self) -> &[CatalogWarning] {
		&self.warnings
	}

	/// Colour of a series. Validated at load for every series in use.
	pub fn series_color(&self, series: Series) -> &str {
		self.palette.series(series).unwrap_or(FALLBACK_COLOR)
	}

	/// Resolves a series name or a colour token to a paint.
	pub fn color_of(&self, token: &str) -> Option<Paint> {
		if let Some(series) = Series::ALL.iter().find(|s| s.name() == token) {
			return self.palette.series(*series).map(|c| Paint::Solid(c.into()));
		}
		if let Some(color) = self.palette.simple(token) {
			return Some(Paint::Solid(color.into()));
		}
		self.palette.pattern(token).cloned().map(Paint::Pattern)
	}

	/// Walks the colour fallback chain for a character: simple colour,
	/// dotted pattern, series of the first book, then [`FALLBACK_COLOR`].
	pub fn character_color(&self, character: &Character, target: PaintTarget) -> ResolvedColor {
		if let Some(color) = self.palette.simple(&character.color) {
			return ResolvedColor {
				tier: ColorTier::Simple,
				value: color.into(),
			};
		}
		if let Some(pattern) = self.palette.pattern(&character.color) {
			return ResolvedColor {
				tier: ColorTier::Pattern,
				value: Paint::Pattern(pattern.clone()).css(target),
			};
		}
		let series_color = character
			.first_book()
			.and_then(|id| self.book(id))
			.and_then(|book| self.palette.series(book.series));
		match series_color {
			Some(color) => ResolvedColor {
				tier: ColorTier::SeriesFallback,
				value: color.into(),
			},
			None => ResolvedColor {
				tier: ColorTier::Fallback,
				value: FALLBACK_COLOR.into(),
			},
		}
	}

	pub fn uses_pattern(&self, character: &Character) -> bool {
		self.palette.pattern(&character.color).is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record(id: Option<CharacterId>, color: &str, books: &[BookId]) -> CharacterRecord {
		CharacterRecord {
			id,
			name: format!("c{}", id.unwrap_or_default()),
			members: Vec::new(),
			color: color.into(),
			books: books.to_vec(),
		}
	}

	#[test]
	fn discworld_catalog_loads() {
		let catalog = Catalog::discworld().unwrap();
		assert_eq!(catalog.books().len(), 41);
		assert_eq!(catalog.characters().len(), 21);
		assert!(catalog.warnings().is_empty());
		assert!(catalog.books().windows(2).all(|w| w[0].id < w[1].id));
		assert_eq!(catalog.genres().len(), 19);
		assert_eq!(catalog.genres()[0], Genre::Action);
	}

	#[test]
	fn journeys_are_sorted_by_book_id() {
		let catalog = Catalog::discworld().unwrap();
		let watch = catalog.character(18).unwrap();
		assert!(watch.journey().windows(2).all(|w| w[0] < w[1]));
		assert_eq!(watch.journey().first(), Some(&8));
		assert_eq!(watch.journey().last(), Some(&40));
		assert_eq!(watch.journey_pairs().count(), watch.journey().len() - 1);
	}

	#[test]
	fn unknown_book_is_fatal() {
		let err = Catalog::new(
			data::books(),
			vec![record(Some(1), "Black", &[4, 99])],
			data::palette(),
		)
		.err()
		.unwrap();
		assert!(matches!(err, CatalogError::UnknownBook { book: 99, .. }));
	}

	#[test]
	fn duplicate_ids_are_fatal() {
		let mut books = data::books();
		books.push(books[0].clone());
		assert_eq!(
			Catalog::new(books, Vec::new(), data::palette()).err(),
			Some(CatalogError::DuplicateBook(1))
		);

		let err = Catalog::new(
			data::books(),
			vec![record(Some(3), "Red", &[1]), record(Some(3), "Red", &[2])],
			data::palette(),
		)
		.err();
		assert_eq!(err, Some(CatalogError::DuplicateCharacter(3)));
	}

	#[test]
	fn series_without_colour_is_fatal() {
		let palette = Palette::new(
			[(Series::Wizards, "#800080".to_string())],
			Vec::new(),
			Vec::new(),
		);
		let err = Catalog::new(data::books(), Vec::new(), palette).err();
		assert_eq!(err, Some(CatalogError::MissingSeriesColor(Series::Witches)));
	}

	#[test]
	fn missing_character_id_is_reported() {
		let catalog = Catalog::new(
			data::books(),
			vec![record(Some(1), "Black", &[1]), record(None, "Black", &[2, 3])],
			data::palette(),
		)
		.unwrap();
		assert_eq!(catalog.characters()[1].id, FALLBACK_CHARACTER_ID_BASE + 1);
		assert!(matches!(
			catalog.warnings(),
			[CatalogWarning::MissingCharacterId { assigned: 1001, .. }]
		));
	}

	#[test]
	fn repeated_books_collapse_with_warning() {
		let catalog = Catalog::new(
			data::books(),
			vec![record(Some(1), "Black", &[5, 2, 5])],
			data::palette(),
		)
		.unwrap();
		assert_eq!(catalog.characters()[0].journey(), &[2, 5]);
		assert_eq!(
			catalog.warnings(),
			&[CatalogWarning::RepeatedJourneyBook { character: 1, book: 5 }]
		);
	}

	#[test]
	fn colour_chain_tiers() {
		let catalog = Catalog::new(
			data::books(),
			vec![
				record(Some(1), "Black", &[4]),
				record(Some(2), "GreenYellowDotted", &[33, 36]),
				record(Some(3), "Teal", &[8, 3]),
				record(Some(4), "Teal", &[]),
			],
			data::palette(),
		)
		.unwrap();
		let chars = catalog.characters();

		let simple = catalog.character_color(&chars[0], PaintTarget::Stroke);
		assert_eq!(simple.tier, ColorTier::Simple);
		assert_eq!(simple.value, "#000000");

		let stroke = catalog.character_color(&chars[1], PaintTarget::Stroke);
		let fill = catalog.character_color(&chars[1], PaintTarget::Fill);
		assert_eq!(stroke.tier, ColorTier::Pattern);
		assert_eq!(stroke.value, "green");
		assert_eq!(fill.tier, ColorTier::Pattern);
		assert_eq!(fill.value, "url(#pattern-green-yellow-dotted)");

		// First chronological book is 3 (Witches), not the first listed.
		let series = catalog.character_color(&chars[2], PaintTarget::Stroke);
		assert_eq!(series.tier, ColorTier::SeriesFallback);
		assert_eq!(series.value, "#008000");

		let fallback = catalog.character_color(&chars[3], PaintTarget::Fill);
		assert_eq!(fallback.tier, ColorTier::Fallback);
		assert_eq!(fallback.value, FALLBACK_COLOR);
	}

	#[test]
	fn color_of_resolves_series_and_tokens() {
		let catalog = Catalog::discworld().unwrap();
		assert_eq!(catalog.color_of("Witches"), Some(Paint::Solid("#008000".into())));
		assert_eq!(catalog.color_of("Gold"), Some(Paint::Solid("#FFD700".into())));
		assert!(matches!(
			catalog.color_of("WhiteRedDotted"),
			Some(Paint::Pattern(p)) if p.primary == "white"
		));
		assert_eq!(catalog.color_of("Teal"), None);
	}

	#[test]
	fn groups_use_patterns() {
		let catalog = Catalog::discworld().unwrap();
		let wizards = catalog.character(20).unwrap();
		assert!(wizards.is_group());
		assert!(catalog.uses_pattern(wizards));
		assert!(!catalog.uses_pattern(catalog.character(14).unwrap()));
	}

	#[test]
	fn genre_tags_use_first_two_genres() {
		let catalog = Catalog::discworld().unwrap();
		assert_eq!(catalog.book(4).unwrap().genre_tags(), vec!["AD", "CO"]);
		assert_eq!(Genre::BuddyComedy.abbreviation(), "BU");
	}
}
