use ropey::Rope;

use crate::edit::EditError;
use crate::range::{CharIdx, Range};


/// A tendril is the owned text carried by a change.
pub type Tendril = String;

/// Represents a single text change operation.
///
/// A change describes replacing the text range `[start, end)` with the optional
/// `replacement` text. If `replacement` is [`None`], this represents a deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
	/// The starting character index of the change.
	pub start: CharIdx,
	/// The ending character index of the change (exclusive).
	pub end: CharIdx,
	/// The replacement text, or [`None`] for deletion.
	pub replacement: Option<Tendril>,
}

impl Change {
	/// Deletes the text covered by `range`.
	pub fn delete(range: Range) -> Self {
		Self {
			start: range.from(),
			end: range.to(),
			replacement: None,
		}
	}

	/// Replaces the text covered by `range` with `text`.
	pub fn replace(range: Range, text: impl Into<Tendril>) -> Self {
		Self {
			start: range.from(),
			end: range.to(),
			replacement: Some(text.into()),
		}
	}
}

/// An ordered batch of non-overlapping changes applied all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
	changes: Vec<Change>,
}

impl ChangeSet {
	/// Builds a change set, sorting changes by start position.
	pub fn new(changes: impl IntoIterator<Item = Change>) -> Self {
		let mut changes: Vec<Change> = changes.into_iter().collect();
		changes.sort_by_key(|c| (c.start, c.end));
		Self { changes }
	}

	/// Change set with a single change.
	pub fn single(change: Change) -> Self {
		Self { changes: vec![change] }
	}

	/// Checks every change against `doc` without touching it.
	pub fn validate(&self, doc: &Rope) -> Result<(), EditError> {
		let len = doc.len_chars();
		let mut prev_end = 0;
		for (i, change) in self.changes.iter().enumerate() {
			if change.start > change.end || change.end > len {
				return Err(EditError::OutOfBounds {
					start: change.start,
					end: change.end,
					len,
				});
			}
			if i > 0 && change.start < prev_end {
				return Err(EditError::Overlapping { at: change.start });
			}
			prev_end = change.end;
		}
		Ok(())
	}

	/// Applies the change set to `doc`.
	///
	/// Validation runs over the whole set first, so a rejected set leaves
	/// `doc` exactly as it was.
	pub fn apply(&self, doc: &mut Rope) -> Result<(), EditError> {
		self.validate(doc)?;

		// Back to front keeps earlier offsets valid.
		for change in self.changes.iter().rev() {
			if change.start < change.end {
				doc.remove(change.start..change.end);
			}
			if let Some(text) = &change.replacement {
				doc.insert(change.start, text);
			}
		}
		Ok(())
	}

	/// Maps a position in the original document to the edited one.
	pub fn map_pos(&self, pos: CharIdx) -> CharIdx {
		let mut shift: isize = 0;
		for change in &self.changes {
			if change.start >= pos {
				break;
			}
			let inserted = change.replacement.as_ref().map_or(0, |t| t.chars().count());
			if pos < change.end {
				return (change.start as isize + shift) as usize + inserted;
			}
			shift += inserted as isize - (change.end - change.start) as isize;
		}
		(pos as isize + shift) as usize
	}
}
