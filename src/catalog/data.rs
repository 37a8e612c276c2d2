//! The compiled-in Discworld corpus and its colour tables.

use super::color::{Palette, PatternDef};
use super::{Book, BookId, CharacterRecord, Genre, Series};

fn book(id: BookId, title: &str, series: Series, genres: &[Genre]) -> Book {
	Book {
		id,
		title: title.into(),
		series,
		genres: genres.to_vec(),
	}
}

fn character(
	id: u32,
	name: &str,
	color: &str,
	members: &[&str],
	books: &[BookId],
) -> CharacterRecord {
	CharacterRecord {
		id: Some(id),
		name: name.into(),
		members: members.iter().map(|m| (*m).into()).collect(),
		color: color.into(),
		books: books.to_vec(),
	}
}

/// All 41 novels in publication order.
pub fn books() -> Vec<Book> {
	vec![
		book(1, "The Colour of Magic", Series::Wizards, &[Genre::Parody, Genre::Adventure]),
		book(2, "The Light Fantastic", Series::Wizards, &[Genre::Parody, Genre::Adventure]),
		book(3, "Equal Rites", Series::Witches, &[Genre::BuddyComedy, Genre::Satire]),
		book(4, "Mort", Series::Death, &[Genre::Adventure, Genre::ComingOfAge]),
		book(5, "Sourcery", Series::Wizards, &[Genre::Adventure, Genre::ComingOfAge]),
		book(6, "Wyrd Sisters", Series::Witches, &[Genre::Parody, Genre::Drama]),
		book(7, "Pyramids", Series::OneOffs, &[Genre::ComingOfAge, Genre::Action]),
		book(8, "Guards! Guards!", Series::Guards, &[Genre::Crime, Genre::Mystery]),
		book(9, "-Faust- Eric", Series::Wizards, &[Genre::Parody, Genre::Adventure]),
		book(10, "Moving Pictures", Series::SomethingNewComes, &[Genre::Parody, Genre::Satire]),
		book(11, "Reaper Man", Series::Death, &[Genre::SliceOfLife, Genre::Satire]),
		book(12, "Witches Abroad", Series::Witches, &[Genre::BuddyComedy, Genre::Fairytale]),
		book(13, "Small Gods", Series::OneOffs, &[Genre::BuddyComedy, Genre::Satire]),
		book(14, "Lords And Ladies", Series::Witches, &[Genre::Fairytale, Genre::Drama]),
		book(15, "Men at Arms", Series::Guards, &[Genre::Crime, Genre::Mystery]),
		book(16, "Soul Music", Series::Death, &[Genre::Parody, Genre::Satire]),
		book(17, "Interesting Times", Series::Wizards, &[Genre::Parody, Genre::Adventure]),
		book(18, "Maskerade", Series::Witches, &[Genre::Parody, Genre::Drama]),
		book(19, "Feet of Clay", Series::Guards, &[Genre::Crime, Genre::Mystery]),
		book(20, "Hogfather", Series::Death, &[Genre::Holiday, Genre::Satire]),
		book(21, "Jingo", Series::Guards, &[Genre::Action, Genre::Satire]),
		book(22, "The Last Continent", Series::Wizards, &[Genre::Adventure, Genre::Parody]),
		book(23, "Carpe Jugulum", Series::Witches, &[Genre::Horror, Genre::Drama]),
		book(24, "The Fifth Elephant", Series::Guards, &[Genre::Mystery, Genre::Thriller]),
		book(25, "The Truth", Series::SomethingNewComes, &[Genre::Mystery, Genre::Thriller]),
		book(26, "Thief of Time", Series::Death, &[Genre::TimeTravel, Genre::ComingOfAge]),
		book(27, "The Last Hero", Series::Wizards, &[Genre::Adventure, Genre::Action]),
		book(28, "The Amazing Maurice", Series::OneOffs, &[Genre::Mystery, Genre::Horror]),
		book(29, "Night Watch", Series::Guards, &[Genre::TimeTravel, Genre::Action]),
		book(30, "The Wee Free Men", Series::TiffanyAching, &[Genre::ComingOfAge, Genre::Fairytale]),
		book(31, "Monstrous Regiment", Series::OneOffs, &[Genre::MilitaryFiction, Genre::Satire]),
		book(32, "A Hat Full of Sky", Series::TiffanyAching, &[Genre::ComingOfAge, Genre::SchoolStory]),
		book(33, "Going Postal", Series::IndustrialRevolution, &[Genre::Heist, Genre::Thriller]),
		book(34, "Thud!", Series::Guards, &[Genre::Mystery, Genre::Thriller]),
		book(35, "Wintersmith", Series::TiffanyAching, &[Genre::ComingOfAge, Genre::SchoolStory]),
		book(36, "Making Money", Series::IndustrialRevolution, &[Genre::Heist, Genre::Thriller]),
		book(37, "Unseen Academicals", Series::Wizards, &[Genre::Sports, Genre::Satire]),
		book(38, "I Shall Wear Midnight", Series::TiffanyAching, &[Genre::ComingOfAge, Genre::Horror]),
		book(39, "Snuff", Series::Guards, &[Genre::Mystery, Genre::Thriller]),
		book(40, "Raising Steam", Series::IndustrialRevolution, &[Genre::Heist, Genre::Action]),
		book(41, "The Shepherd's Crown", Series::TiffanyAching, &[Genre::Drama, Genre::ComingOfAge]),
	]
}

/// The running characters and character groups. Book lists are given in
/// the order they were catalogued, not necessarily chronologically.
pub fn characters() -> Vec<CharacterRecord> {
	vec![
		character(1, "Mort and Isabelle", "Black", &[], &[4, 16]),
		character(2, "Eskarina Smith", "Pink", &[], &[3, 38]),
		character(3, "Twoflower", "Pink", &[], &[1, 2, 17]),
		character(4, "Lobsang Ludd", "LightBlue", &[], &[13, 26, 29]),
		character(5, "Susan Sto Helit", "Black", &[], &[16, 20, 26]),
		character(6, "Queen of the Elves", "Purple", &[], &[14, 30, 41]),
		character(
			7,
			"Postman crew",
			"GreenYellowDotted",
			&[
				"Moist von Lipwig",
				"Stanley Howler",
				"Tolliver Groat",
				"Adora Belle Dearheart",
			],
			&[33, 36, 40],
		),
		character(8, "Cohen the Barbarian", "Gold", &[], &[2, 17, 21, 27]),
		character(
			9,
			"Newspaper crew",
			"GreenYellowDotted",
			&["William de Worde", "Sacharissa Cripslock", "Otto von Chriek"],
			&[25, 31, 33, 36, 40],
		),
		character(10, "Tiffany Aching", "LightPurple", &[], &[30, 32, 35, 38, 41]),
		character(
			11,
			"Pictsies / Nac Mac Feegle",
			"Blue",
			&["Wee Mad Arthur"],
			&[23, 30, 32, 35, 38, 41],
		),
		character(
			12,
			"Gaspode the Wonder Dog",
			"Red",
			&[],
			&[10, 15, 16, 19, 20, 24, 25],
		),
		character(
			13,
			"Leonard of Quirm",
			"LightBlue",
			&[],
			&[6, 15, 16, 21, 24, 25, 27, 31],
		),
		character(
			14,
			"Rincewind",
			"Purple",
			&[],
			&[1, 2, 5, 9, 17, 22, 27, 37],
		),
		character(
			15,
			"Death of Rats / The Grim Squeaker",
			"Red",
			&[],
			&[11, 13, 16, 18, 20, 22, 23, 26, 28],
		),
		character(
			16,
			"The Witches",
			"Purple",
			&["Granny Weatherwax", "Nanny Ogg", "Magrat Garlic", "Agnes Nitt"],
			&[3, 6, 12, 14, 18, 23, 30, 35, 37, 41],
		),
		character(
			17,
			"Cut-Me-Own-Throat Dibbler",
			"Orange",
			&[],
			&[8, 10, 16, 19, 21, 25, 29, 36, 37, 41],
		),
		character(
			18,
			"City Watch",
			"Yellow",
			&[
				"Samuel Vimes",
				"Carrot Ironfoundersson",
				"Nobby Nobbs",
				"Fred Colon",
				"Lady Sybil Ramkin",
				"Angua von Überwald",
				"Detritus",
				"Cheery Littlebottom",
				"Dorfl",
			],
			&[8, 15, 19, 29, 21, 24, 33, 36, 37, 39, 40, 31, 38],
		),
		// White does not read on the canvas background.
		character(
			19,
			"Lord Vetinari",
			"DarkGrey",
			&[],
			&[
				1, 2, 8, 10, 11, 15, 16, 17, 19, 21, 24, 25, 27, 29, 33, 34, 36, 39, 37, 40, 41,
			],
		),
		character(
			20,
			"Wizards",
			"WhiteRedDotted",
			&[
				"The Archchancellor Mustrum Ridcully",
				"The Dean of Pentacles",
				"Bursar A.A. Dinwiddie",
				"The Librarian",
				"Ponder Stibbons",
				"Hex",
			],
			&[
				1, 2, 3, 5, 8, 9, 10, 11, 14, 15, 16, 17, 18, 19, 20, 21, 22, 25, 27, 29, 33, 34,
				36, 37, 40, 41,
			],
		),
		// Not in The Wee Free Men (30) or Snuff (39).
		character(
			21,
			"Death",
			"Black",
			&[],
			&[
				1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23,
				24, 25, 26, 27, 28, 29, 31, 32, 33, 34, 35, 36, 37, 38, 40, 41,
			],
		),
	]
}

/// Series colours, simple character colours and the dotted group patterns.
pub fn palette() -> Palette {
	let series = [
		(Series::Wizards, "#800080"),
		(Series::Witches, "#008000"),
		(Series::Death, "#000000"),
		(Series::OneOffs, "#FFFF00"),
		(Series::Guards, "#FFA500"),
		(Series::SomethingNewComes, "#FFC0CB"),
		(Series::TiffanyAching, "#0000FF"),
		(Series::IndustrialRevolution, "#FF0000"),
	];
	let simple = [
		("LightPurple", "#b19cd9"),
		("Orange", "#FFA500"),
		("Purple", "#800080"),
		("Blue", "#0000FF"),
		("DarkGrey", "#7f8c8d"),
		("Black", "#000000"),
		("Pink", "#FFC0CB"),
		("LightBlue", "#ADD8E6"),
		("Gold", "#FFD700"),
		("Red", "#FF0000"),
		("Yellow", "#FFFF00"),
	];
	let patterns = vec![
		PatternDef::dotted("pattern-white-red-dotted", "white", "red"),
		PatternDef::dotted("pattern-green-yellow-dotted", "green", "yellow"),
	];

	Palette::new(
		series.into_iter().map(|(s, c)| (s, c.to_string())),
		simple
			.into_iter()
			.map(|(name, c)| (name.to_string(), c.to_string())),
		patterns,
	)
}
