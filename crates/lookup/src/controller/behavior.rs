//! Pure pieces of the picker update: query derivation and confirmation hooks.

use std::rc::Rc;

use chrono::NaiveDateTime;
use futures::future::join_all;
use nook_primitives::{Change, ChangeSet};

use crate::config::LookupConfig;
use crate::control::{ControlKind, EffectHandler};
use crate::document::{ActiveDocument, SelectionSnapshot};
use crate::error::{LookupError, Result};
use crate::naming::{generate_note_name, slugify};
use crate::provider::{Note, RefreshReason};
use crate::session::{Flavor, OnCreate, PickerSession};

/// Joins the base query and the slug suffix.
const SUFFIX_SEPARATOR: &str = ".";

/// Everything the query value depends on.
#[derive(Debug, Clone)]
pub struct QueryInputs<'a> {
	pub flavor: Flavor,
	/// Pressed note-category control.
	pub note_control: Option<ControlKind>,
	/// Whether `selection2link` is pressed.
	pub link_pressed: bool,
	pub selection_text: Option<&'a str>,
	/// Value passed by the caller when the session opened.
	pub explicit: Option<&'a str>,
	/// Base name of the active document.
	pub document_stem: Option<&'a str>,
	pub now: NaiveDateTime,
}

/// Derived query value and the refresh label it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedQuery {
	pub value: String,
	pub reason: RefreshReason,
}

/// Computes the picker value for the current control state.
///
/// Deterministic for fixed inputs.
pub fn derive_query_value(inputs: &QueryInputs<'_>, config: &LookupConfig) -> DerivedQuery {
	let suffix = inputs
		.selection_text
		.filter(|text| inputs.link_pressed && config.slug_titles() && !text.is_empty())
		.map(slugify);

	let (base, reason) = match inputs.note_control {
		Some(ControlKind::Journal) => (
			generate_note_name(&config.journal, inputs.document_stem, inputs.now),
			RefreshReason::Journal,
		),
		Some(ControlKind::Scratch) => (
			generate_note_name(&config.scratch, inputs.document_stem, inputs.now),
			RefreshReason::Scratch,
		),
		_ => {
			let base = match (inputs.explicit.filter(|v| !v.is_empty()), inputs.document_stem) {
				(Some(explicit), _) => explicit.to_string(),
				(None, Some(stem)) if inputs.flavor != Flavor::Schema => stem.to_string(),
				_ => String::new(),
			};
			(base, RefreshReason::Normal)
		}
	};

	let value = match suffix {
		Some(suffix) => [base.as_str(), suffix.as_str()].join(SUFFIX_SEPARATOR),
		None => base,
	};
	DerivedQuery { value, reason }
}

/// Runs every effect control's handler against `session`, then applies their patches.
///
/// Handlers run concurrently and are all awaited; patches are applied only
/// after the whole batch finished. A failing handler does not stop the
/// others. Every failure is logged and the first one is returned.
pub async fn update_behavior_by_effect(session: &mut PickerSession) -> Result<()> {
	let effects: Vec<(ControlKind, bool, Rc<dyn EffectHandler>)> = session
		.controls
		.iter()
		.filter_map(|c| c.handler().map(|h| (c.kind(), c.pressed, Rc::clone(h))))
		.collect();
	if effects.is_empty() {
		return Ok(());
	}

	let results = {
		let view: &PickerSession = session;
		join_all(
			effects
				.iter()
				.map(|(kind, pressed, handler)| async move { (*kind, handler.handle(*pressed, view).await) }),
		)
		.await
	};

	let mut first_err = None;
	for (kind, result) in results {
		match result {
			Ok(patch) => patch.apply(session),
			Err(source) => {
				tracing::warn!(kind = %kind, error = %source, "lookup.effect.failed");
				if first_err.is_none() {
					first_err = Some(LookupError::EffectFailure { kind, source });
				}
			}
		}
	}
	first_err.map_or(Ok(()), Err)
}

fn hook<F>(f: F) -> OnCreate
where
	F: FnOnce(&mut Note, Option<&mut dyn ActiveDocument>) -> Result<()> + 'static,
{
	Box::new(f)
}

/// Builds the confirmation hook for the pressed selection-category control.
pub fn on_create_hook(selection_control: Option<ControlKind>, selection: Option<SelectionSnapshot>) -> OnCreate {
	match selection_control {
		Some(ControlKind::SelectionExtract) => hook(move |note, doc| {
			let (Some(doc), Some(selection)) = (doc, selection) else {
				return Ok(());
			};
			if selection.is_empty() {
				return Ok(());
			}
			doc.apply(&ChangeSet::single(Change::delete(selection.range)))?;
			note.body = format!("\n{}", selection.text.trim());
			Ok(())
		}),
		Some(ControlKind::SelectionToLink) => hook(|note, doc| {
			let Some(doc) = doc else {
				return Ok(());
			};
			let (Some(range), Some(text)) = (doc.selection().filter(|r| !r.is_empty()), doc.selected_text()) else {
				return Ok(());
			};
			let link = format!("[[{text}|{}]]", note.fname);
			doc.apply(&ChangeSet::single(Change::replace(range, link)))?;
			Ok(())
		}),
		_ => hook(|_, _| Ok(())),
	}
}
