//! Modifier controls: toggleable options shown alongside the lookup picker.
//!
//! Every control has a closed [`ControlKind`] identity and a [`Category`]
//! derived from it. Within the `note`, `selection` and `filter` categories at
//! most one control may be pressed; `effect` controls combine freely and carry
//! an [`EffectHandler`] that runs on every picker update.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{LookupError, Result};

pub mod effects;
pub mod registry;

pub use effects::{EffectHandler, EffectPatch, OpenTarget, SplitDirection};
pub use registry::ControlRegistry;


/// Identity of a modifier control.
///
/// Declaration order is display order.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, AsRefStr, EnumString, EnumIter, Serialize, Deserialize,
)]
pub enum ControlKind {
	#[strum(serialize = "journal")]
	#[serde(rename = "journal")]
	Journal,
	#[strum(serialize = "scratch")]
	#[serde(rename = "scratch")]
	Scratch,
	#[strum(serialize = "plain")]
	#[serde(rename = "plain")]
	Plain,
	#[strum(serialize = "selectionExtract")]
	#[serde(rename = "selectionExtract")]
	SelectionExtract,
	#[strum(serialize = "selection2link")]
	#[serde(rename = "selection2link")]
	SelectionToLink,
	#[strum(serialize = "directChildOnly")]
	#[serde(rename = "directChildOnly")]
	DirectChildOnly,
	#[strum(serialize = "multiSelect")]
	#[serde(rename = "multiSelect")]
	MultiSelect,
	#[strum(serialize = "copyNoteLink")]
	#[serde(rename = "copyNoteLink")]
	CopyNoteLink,
	#[strum(serialize = "horizontalSplit")]
	#[serde(rename = "horizontalSplit")]
	HorizontalSplit,
}

impl ControlKind {
	/// All kinds in display order.
	pub fn all() -> impl Iterator<Item = ControlKind> {
		Self::iter()
	}

	/// Parses a kind from its tag, e.g. `"selection2link"`.
	pub fn parse(name: &str) -> Result<Self> {
		name.parse().map_err(|_| LookupError::InvalidKind(name.to_string()))
	}

	pub fn category(self) -> Category {
		category_of(self)
	}

	/// Note kinds whose name is synthesized rather than typed.
	pub fn is_generative(self) -> bool {
		matches!(self, Self::Journal | Self::Scratch)
	}
}

/// Grouping that decides how controls interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Category {
	Note,
	Selection,
	Filter,
	Effect,
}

impl Category {
	/// Whether pressing one control unpresses its siblings.
	pub fn is_exclusive(self) -> bool {
		self != Category::Effect
	}
}

/// Maps a kind to its category.
pub fn category_of(kind: ControlKind) -> Category {
	match kind {
		ControlKind::Journal | ControlKind::Scratch | ControlKind::Plain => Category::Note,
		ControlKind::SelectionExtract | ControlKind::SelectionToLink => Category::Selection,
		ControlKind::DirectChildOnly => Category::Filter,
		ControlKind::MultiSelect | ControlKind::CopyNoteLink | ControlKind::HorizontalSplit => Category::Effect,
	}
}

/// Maps a kind tag to its category, failing on unknown tags.
pub fn category_of_name(name: &str) -> Result<Category> {
	ControlKind::parse(name).map(category_of)
}

/// A toggleable option bound to one picker session.
#[derive(Clone)]
pub struct ModifierControl {
	kind: ControlKind,
	/// Whether the control is currently active.
	pub pressed: bool,
	handler: Option<Rc<dyn EffectHandler>>,
}

impl ModifierControl {
	pub(crate) fn new(kind: ControlKind, pressed: bool, handler: Option<Rc<dyn EffectHandler>>) -> Self {
		debug_assert_eq!(handler.is_some(), kind.category() == Category::Effect);
		Self { kind, pressed, handler }
	}

	pub fn kind(&self) -> ControlKind {
		self.kind
	}

	pub fn category(&self) -> Category {
		self.kind.category()
	}

	/// Effect handler, present only for effect-category controls.
	pub fn handler(&self) -> Option<&Rc<dyn EffectHandler>> {
		self.handler.as_ref()
	}
}

impl fmt::Debug for ModifierControl {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ModifierControl")
			.field("kind", &self.kind)
			.field("pressed", &self.pressed)
			.field("has_handler", &self.handler.is_some())
			.finish()
	}
}

/// Returns the first pressed control in `category`.
pub fn pressed_in(controls: &[ModifierControl], category: Category) -> Option<ControlKind> {
	controls.iter().find(|c| c.pressed && c.category() == category).map(|c| c.kind)
}

/// Returns true if the control of `kind` is pressed.
pub fn is_pressed(controls: &[ModifierControl], kind: ControlKind) -> bool {
	controls.iter().any(|c| c.kind == kind && c.pressed)
}
