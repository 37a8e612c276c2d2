//! Error types for catalog loading and the drawing surface.

use crate::catalog::{BookId, CharacterId, Series};

/// Result alias for catalog construction.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Configuration errors. Any of these aborts catalog construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
	/// Two books share the same id.
	#[error("book id {0} is defined more than once")]
	DuplicateBook(BookId),

	/// Two characters share the same id.
	#[error("character id {0} is defined more than once")]
	DuplicateCharacter(CharacterId),

	/// A character's journey names a book the catalog does not hold.
	#[error("character {character} ({name}) references unknown book {book}")]
	UnknownBook {
		character: CharacterId,
		name: String,
		book: BookId,
	},

	/// A book belongs to a series that has no registered colour.
	#[error("series {0} has no registered colour")]
	MissingSeriesColor(Series),
}

/// Failures of the rendering surface. These are reported once and the
/// affected drawing is skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
	/// No browser window is available.
	#[error("window is not available")]
	NoWindow,

	/// The 2d context could not be acquired.
	#[error("2d rendering context unavailable: {0}")]
	ContextUnavailable(String),
}
