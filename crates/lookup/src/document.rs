//! Read access to the active editor document and transactional edits.

use std::path::{Path, PathBuf};

use nook_primitives::rope::range_text;
use nook_primitives::{ChangeSet, EditError, Range, Rope};

/// The document focused in the host editor.
pub trait ActiveDocument {
	/// File backing the document, if any.
	fn path(&self) -> Option<&Path>;

	fn content(&self) -> &Rope;

	/// Primary selection, if the editor has one.
	fn selection(&self) -> Option<Range>;

	/// Applies `changes` entirely or not at all.
	fn apply(&mut self, changes: &ChangeSet) -> Result<(), EditError>;

	/// File name without extension.
	fn stem(&self) -> Option<String> {
		self.path()
			.and_then(Path::file_stem)
			.map(|s| s.to_string_lossy().into_owned())
	}

	/// Text under the primary selection.
	fn selected_text(&self) -> Option<String> {
		self.selection().map(|range| range_text(self.content(), range))
	}
}

/// Selection range and text captured at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
	pub range: Range,
	pub text: String,
}

impl SelectionSnapshot {
	/// Captures the primary selection of `doc`.
	///
	/// No document and no selection are both valid and yield `None`.
	pub fn capture(doc: Option<&dyn ActiveDocument>) -> Option<Self> {
		let doc = doc?;
		Some(Self {
			range: doc.selection()?,
			text: doc.selected_text()?,
		})
	}

	pub fn is_empty(&self) -> bool {
		self.range.is_empty() || self.text.is_empty()
	}
}

/// In-memory [`ActiveDocument`] backed by a rope.
#[derive(Debug, Clone, Default)]
pub struct Buffer {
	path: Option<PathBuf>,
	content: Rope,
	selection: Option<Range>,
	/// Incremented on every applied change set.
	pub version: u64,
}

impl Buffer {
	pub fn new(path: Option<PathBuf>, text: &str) -> Self {
		Self {
			path,
			content: Rope::from(text),
			selection: None,
			version: 0,
		}
	}

	pub fn with_selection(mut self, range: Range) -> Self {
		self.selection = Some(range);
		self
	}

	pub fn text(&self) -> String {
		self.content.to_string()
	}
}

impl ActiveDocument for Buffer {
	fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	fn content(&self) -> &Rope {
		&self.content
	}

	fn selection(&self) -> Option<Range> {
		self.selection
	}

	fn apply(&mut self, changes: &ChangeSet) -> Result<(), EditError> {
		changes.apply(&mut self.content)?;
		self.version += 1;
		if let Some(sel) = self.selection {
			let pos = changes.map_pos(sel.from());
			self.selection = Some(Range::point(pos));
		}
		Ok(())
	}
}
