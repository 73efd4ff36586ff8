use ropey::Rope;

use crate::range::Range;

/// Returns the text covered by `range`, clamped to the rope.
pub fn range_text(doc: &Rope, range: Range) -> String {
	let len = doc.len_chars();
	let from = range.from().min(len);
	let to = range.to().min(len);
	doc.slice(from..to).to_string()
}
