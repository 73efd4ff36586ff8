use std::rc::Rc;

use super::effects::{CopyNoteLinkEffect, EffectHandler, HorizontalSplitEffect, MultiSelectEffect};
use super::{ControlKind, ModifierControl};
use crate::error::{LookupError, Result};
use crate::session::Flavor;

/// Builds the control set for a lookup session.
///
/// Holds one [`EffectHandler`] per effect kind. The built-in handlers can be
/// swapped out with [`ControlRegistry::with_handler`].
#[derive(Clone)]
pub struct ControlRegistry {
	multi_select: Rc<dyn EffectHandler>,
	copy_note_link: Rc<dyn EffectHandler>,
	horizontal_split: Rc<dyn EffectHandler>,
}

impl Default for ControlRegistry {
	fn default() -> Self {
		Self {
			multi_select: Rc::new(MultiSelectEffect),
			copy_note_link: Rc::new(CopyNoteLinkEffect),
			horizontal_split: Rc::new(HorizontalSplitEffect),
		}
	}
}

impl ControlRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces the handler of an effect kind.
	pub fn with_handler(mut self, kind: ControlKind, handler: Rc<dyn EffectHandler>) -> Result<Self> {
		match self.slot_mut(kind) {
			Some(slot) => *slot = handler,
			None => return Err(LookupError::InvalidKind(format!("{kind} is not an effect control"))),
		}
		Ok(self)
	}

	/// Creates one control per known kind, in display order.
	///
	/// Schema lookups carry no controls. Kinds listed in `initially_active`
	/// start pressed; an unknown kind name fails with
	/// [`LookupError::InvalidKind`].
	pub fn create_controls<I, S>(&self, flavor: Flavor, initially_active: I) -> Result<Vec<ModifierControl>>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let active = initially_active
			.into_iter()
			.map(|name| ControlKind::parse(name.as_ref()))
			.collect::<Result<Vec<_>>>()?;
		Ok(self.build(flavor, &active))
	}

	/// Builds the control set from already-resolved kinds.
	pub(crate) fn build(&self, flavor: Flavor, active: &[ControlKind]) -> Vec<ModifierControl> {
		if flavor == Flavor::Schema {
			return Vec::new();
		}
		ControlKind::all()
			.map(|kind| ModifierControl::new(kind, active.contains(&kind), self.handler_for(kind)))
			.collect()
	}

	/// Handler of an effect kind; `None` for every other category.
	fn handler_for(&self, kind: ControlKind) -> Option<Rc<dyn EffectHandler>> {
		match kind {
			ControlKind::MultiSelect => Some(Rc::clone(&self.multi_select)),
			ControlKind::CopyNoteLink => Some(Rc::clone(&self.copy_note_link)),
			ControlKind::HorizontalSplit => Some(Rc::clone(&self.horizontal_split)),
			ControlKind::Journal
			| ControlKind::Scratch
			| ControlKind::Plain
			| ControlKind::SelectionExtract
			| ControlKind::SelectionToLink
			| ControlKind::DirectChildOnly => None,
		}
	}

	fn slot_mut(&mut self, kind: ControlKind) -> Option<&mut Rc<dyn EffectHandler>> {
		match kind {
			ControlKind::MultiSelect => Some(&mut self.multi_select),
			ControlKind::CopyNoteLink => Some(&mut self.copy_note_link),
			ControlKind::HorizontalSplit => Some(&mut self.horizontal_split),
			ControlKind::Journal
			| ControlKind::Scratch
			| ControlKind::Plain
			| ControlKind::SelectionExtract
			| ControlKind::SelectionToLink
			| ControlKind::DirectChildOnly => None,
		}
	}
}
