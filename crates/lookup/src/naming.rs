//! Canonical names for generated notes and slugs for link titles.

use chrono::NaiveDateTime;

use crate::config::{AddBehavior, NoteNameConfig};

/// Builds the name of a generated (journal/scratch) note.
///
/// `current` is the hierarchical name of the note open in the editor. Without
/// one, placement falls back to [`AddBehavior::AsOwnDomain`].
pub fn generate_note_name(cfg: &NoteNameConfig, current: Option<&str>, now: NaiveDateTime) -> String {
	let date = now.format(&cfg.date_format).to_string();
	let current = current.filter(|c| !c.is_empty());

	let prefix = match (cfg.add_behavior, current) {
		(AddBehavior::ChildOfDomain, Some(current)) => current.split('.').next(),
		(AddBehavior::ChildOfCurrent, Some(current)) => Some(current),
		_ => None,
	};

	[prefix, Some(cfg.name.as_str()), Some(date.as_str())]
		.into_iter()
		.flatten()
		.filter(|part| !part.is_empty())
		.collect::<Vec<_>>()
		.join(".")
}

/// Slugifies `text` for use as a note name segment (e.g. "Hello World!" -> "hello-world").
///
/// GitHub heading-anchor rules: lowercase, each space becomes `-`, letters,
/// digits, `-` and `_` are kept, everything else (tabs and newlines included)
/// is dropped. The text is not trimmed, so `" World"` gives `"-world"`.
pub fn slugify(text: &str) -> String {
	text.to_lowercase()
		.chars()
		.filter_map(|c| match c {
			' ' => Some('-'),
			'-' | '_' => Some(c),
			c if c.is_alphanumeric() => Some(c),
			_ => None,
		})
		.collect()
}
