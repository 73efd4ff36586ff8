use thiserror::Error;

use crate::range::CharIdx;

/// Reasons a [`ChangeSet`](crate::ChangeSet) was rejected.
///
/// A rejected change set leaves the document untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
	/// A change reaches past the end of the document.
	#[error("change {start}..{end} is out of bounds for a document of {len} chars")]
	OutOfBounds {
		/// Start of the offending change.
		start: CharIdx,
		/// End of the offending change.
		end: CharIdx,
		/// Document length in chars.
		len: usize,
	},

	/// Two changes touch the same span of text.
	#[error("changes overlap at char {at}")]
	Overlapping {
		/// Position where the second change starts.
		at: CharIdx,
	},
}
