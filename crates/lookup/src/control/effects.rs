//! Effect-category handlers.
//!
//! Handlers run on every picker update, pressed or not, and decide for
//! themselves what that means. They read the session and return an
//! [`EffectPatch`]; the controller applies patches only once every handler
//! of the batch has finished, so a partially-updated session is never
//! observable.

use async_trait::async_trait;

use crate::session::PickerSession;

/// Where the resolved note should be opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpenTarget {
	/// Replace the current editor.
	#[default]
	Current,
	/// Open next to the current editor.
	Split(SplitDirection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDirection {
	Horizontal,
	Vertical,
}

/// Session mutation requested by an effect handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectPatch {
	/// Nothing to change.
	None,
	/// Allow or forbid selecting several items.
	SelectMany(bool),
	/// Copy a link to the resolved note when the session is accepted.
	CopyLinkOnAccept(bool),
	/// Where to open the resolved note.
	OpenTarget(OpenTarget),
}

impl EffectPatch {
	pub(crate) fn apply(self, session: &mut PickerSession) {
		match self {
			Self::None => {}
			Self::SelectMany(on) => session.can_select_many = on,
			Self::CopyLinkOnAccept(on) => session.copy_link_on_accept = on,
			Self::OpenTarget(target) => session.open_target = target,
		}
	}
}

/// Side-effect handler attached to an effect control.
///
/// Must be idempotent: it runs on every keystroke-driven or toggle-driven
/// update of an open session, not only at confirmation.
#[async_trait(?Send)]
pub trait EffectHandler {
	async fn handle(&self, pressed: bool, session: &PickerSession) -> anyhow::Result<EffectPatch>;
}

/// `multiSelect`: toggles multi-selection in the picker.
pub struct MultiSelectEffect;

#[async_trait(?Send)]
impl EffectHandler for MultiSelectEffect {
	async fn handle(&self, pressed: bool, _session: &PickerSession) -> anyhow::Result<EffectPatch> {
		Ok(EffectPatch::SelectMany(pressed))
	}
}

/// `copyNoteLink`: copies a link to the accepted note.
pub struct CopyNoteLinkEffect;

#[async_trait(?Send)]
impl EffectHandler for CopyNoteLinkEffect {
	async fn handle(&self, pressed: bool, _session: &PickerSession) -> anyhow::Result<EffectPatch> {
		Ok(EffectPatch::CopyLinkOnAccept(pressed))
	}
}

/// `horizontalSplit`: opens the accepted note in a horizontal split.
pub struct HorizontalSplitEffect;

#[async_trait(?Send)]
impl EffectHandler for HorizontalSplitEffect {
	async fn handle(&self, pressed: bool, _session: &PickerSession) -> anyhow::Result<EffectPatch> {
		let target = if pressed {
			OpenTarget::Split(SplitDirection::Horizontal)
		} else {
			OpenTarget::Current
		};
		Ok(EffectPatch::OpenTarget(target))
	}
}
