use proptest::prelude::*;

use crate::config::LookupConfig;
use crate::control::{Category, ControlKind, ControlRegistry, ModifierControl};
use crate::controller::{LookupOpts, QueryInputs, ShowOpts, derive_query_value, on_create_hook};
use crate::provider::{NoteItem, RefreshReason};
use crate::session::{Flavor, PickerSession};
use crate::state::LookupState;
use crate::testing::{controller, test_clock, workspace};

fn pressed_count(controls: &[ModifierControl], category: Category) -> usize {
	controls.iter().filter(|c| c.pressed && c.category() == category).count()
}

/// Must keep at most one pressed control per non-effect category after any toggle.
///
/// - Enforced in: `LookupController::on_trigger_control`
/// - Failure symptom: Journal and scratch both pressed; the query value flips
///   between two generated names.
#[cfg_attr(test, tokio::test)]
pub(crate) async fn test_category_exclusivity() {
	let mut ws = workspace();
	let (mut ctl, _, _) = controller(&ws, LookupOpts::default(), &[]);
	ctl.show(&mut ws, ShowOpts::default()).await.unwrap();

	let sequence = [
		ControlKind::Journal,
		ControlKind::Scratch,
		ControlKind::SelectionExtract,
		ControlKind::SelectionToLink,
		ControlKind::Plain,
		ControlKind::DirectChildOnly,
		ControlKind::Plain,
		ControlKind::Journal,
	];
	for kind in sequence {
		ctl.on_trigger_control(&ws, kind).await.unwrap();
		for category in [Category::Note, Category::Selection, Category::Filter] {
			assert!(pressed_count(ctl.controls(), category) <= 1, "{category} after {kind}");
		}
	}
}

/// Must leave other categories untouched when an effect control toggles.
///
/// - Enforced in: `LookupController::trigger`
/// - Failure symptom: Pressing copyNoteLink silently drops the journal control.
#[cfg_attr(test, tokio::test)]
pub(crate) async fn test_effect_toggle_isolated() {
	let mut ws = workspace();
	let opts = LookupOpts {
		note_type: Some(ControlKind::Journal),
		selection_type: Some(ControlKind::SelectionToLink),
		..LookupOpts::default()
	};
	let (mut ctl, _, _) = controller(&ws, opts, &[]);
	ctl.show(&mut ws, ShowOpts::default()).await.unwrap();

	let snapshot = |controls: &[ModifierControl]| -> Vec<(ControlKind, bool)> {
		controls
			.iter()
			.filter(|c| c.category() != Category::Effect)
			.map(|c| (c.kind(), c.pressed))
			.collect()
	};
	let before = snapshot(ctl.controls());
	for kind in [ControlKind::CopyNoteLink, ControlKind::MultiSelect, ControlKind::CopyNoteLink] {
		ctl.on_trigger_control(&ws, kind).await.unwrap();
		assert_eq!(snapshot(ctl.controls()), before);
	}
	assert!(ctl.controls().iter().any(|c| c.kind() == ControlKind::MultiSelect && c.pressed));
}

/// Must derive the same query value for the same inputs.
///
/// - Enforced in: `derive_query_value`
/// - Failure symptom: Re-running the update on an unchanged session changes
///   the query and triggers spurious refreshes.
#[cfg_attr(test, test)]
pub(crate) fn test_query_derivation_idempotent() {
	let mut config = LookupConfig::default();
	config.lookup.link_select_auto_title = crate::config::AutoTitle::Slug;
	for note_control in [None, Some(ControlKind::Journal), Some(ControlKind::Scratch), Some(ControlKind::Plain)] {
		let inputs = QueryInputs {
			flavor: Flavor::Note,
			note_control,
			link_pressed: true,
			selection_text: Some("Some Title"),
			explicit: Some("base"),
			document_stem: Some("proj.notes"),
			now: test_clock(),
		};
		let first = derive_query_value(&inputs, &config);
		let second = derive_query_value(&inputs, &config);
		assert_eq!(first, second);
		assert!(first.value.ends_with(".some-title"), "{}", first.value);
	}
}

/// Must install refresh results only from the latest issued ticket.
///
/// - Enforced in: `PickerSession::apply_refresh`
/// - Failure symptom: A slow provider response overwrites the items of a
///   newer query.
#[cfg_attr(test, test)]
pub(crate) fn test_stale_refresh_discarded() {
	let mut session = PickerSession::new(Flavor::Note, "t");
	let old = session.begin_refresh();
	let new = session.begin_refresh();

	assert!(!session.apply_refresh(old, vec![NoteItem::new("stale")]));
	assert!(session.items.is_empty());
	assert!(session.apply_refresh(new, vec![NoteItem::new("fresh")]));
	assert_eq!(session.items[0].fname, "fresh");
}

/// Must keep exactly one confirmation hook armed, replaced on every update.
///
/// - Enforced in: `PickerSession::arm_on_create`
/// - Failure symptom: Extract and link hooks both run on accept and edit the
///   document twice.
#[cfg_attr(test, tokio::test)]
pub(crate) async fn test_single_on_create_hook() {
	let mut ws = workspace();
	let (mut ctl, _, _) = controller(&ws, LookupOpts::default(), &[]);
	ctl.show(&mut ws, ShowOpts::default()).await.unwrap();
	assert!(ctl.session().unwrap().has_on_create());

	ctl.on_trigger_control(&ws, ControlKind::SelectionExtract).await.unwrap();
	ctl.on_trigger_control(&ws, ControlKind::SelectionToLink).await.unwrap();
	assert!(ctl.session().unwrap().has_on_create());

	let mut session = PickerSession::new(Flavor::Note, "t");
	session.arm_on_create(on_create_hook(Some(ControlKind::SelectionExtract), None));
	session.arm_on_create(on_create_hook(None, None));
	assert!(session.take_on_create().is_some());
	assert!(session.take_on_create().is_none());
}

/// Must refresh with the manual tag only when the direct-children flag changes.
///
/// - Enforced in: `LookupController::update_picker_behavior`
/// - Failure symptom: Every toggle re-queries the provider, or the filter
///   toggle leaves stale unfiltered items.
#[cfg_attr(test, tokio::test)]
pub(crate) async fn test_manual_refresh_on_filter_change_only() {
	let mut ws = workspace();
	let (mut ctl, provider, _) = controller(&ws, LookupOpts::default(), &[]);
	ctl.show(&mut ws, ShowOpts::default()).await.unwrap();

	ctl.on_trigger_control(&ws, ControlKind::CopyNoteLink).await.unwrap();
	ctl.on_trigger_control(&ws, ControlKind::SelectionExtract).await.unwrap();
	assert_eq!(provider.refresh_count(RefreshReason::Manual), 0);

	ctl.on_trigger_control(&ws, ControlKind::DirectChildOnly).await.unwrap();
	assert_eq!(provider.refresh_count(RefreshReason::Manual), 1);
}

/// Must discard host events once the session is closed.
///
/// - Enforced in: `LookupState::next`
/// - Failure symptom: A late toggle mutates a disposed session or reopens it.
#[cfg_attr(test, tokio::test)]
pub(crate) async fn test_closed_session_discards_events() {
	let mut ws = workspace();
	let (mut ctl, _, _) = controller(&ws, LookupOpts::default(), &[]);
	ctl.show(&mut ws, ShowOpts::default()).await.unwrap();
	ctl.accept(&mut ws).await.unwrap();
	assert_eq!(ctl.state(), LookupState::Closed);

	assert!(!ctl.on_trigger_control(&ws, ControlKind::Journal).await.unwrap());
	assert!(!ctl.on_hide());
	assert_eq!(ctl.state(), LookupState::Closed);
}

/// Must start every session from the initial control set.
///
/// - Enforced in: `LookupController::show` (`reset_controls`)
/// - Failure symptom: Reopening the lookup keeps the last session's journal
///   and filter toggles, so the query and candidates are wrong from the start.
#[cfg_attr(test, tokio::test)]
pub(crate) async fn test_controls_recreated_per_session() {
	let mut ws = workspace();
	let opts = LookupOpts {
		selection_type: Some(ControlKind::SelectionExtract),
		..LookupOpts::default()
	};
	let (mut ctl, _, _) = controller(&ws, opts, &[]);
	let initial: Vec<(ControlKind, bool)> = ctl.controls().iter().map(|c| (c.kind(), c.pressed)).collect();

	ctl.show(&mut ws, ShowOpts::default()).await.unwrap();
	for kind in [ControlKind::Scratch, ControlKind::SelectionToLink, ControlKind::MultiSelect] {
		ctl.on_trigger_control(&ws, kind).await.unwrap();
	}
	ctl.on_hide();
	ctl.show(&mut ws, ShowOpts::default()).await.unwrap();

	let reopened: Vec<(ControlKind, bool)> = ctl.controls().iter().map(|c| (c.kind(), c.pressed)).collect();
	assert_eq!(reopened, initial);
	assert!(!ctl.session().unwrap().can_select_many);
}

proptest! {
	/// Must press exactly the requested kinds when creating note controls.
	///
	/// - Enforced in: `ControlRegistry::create_controls`
	/// - Failure symptom: Initial note or selection type is ignored at open.
	#[test]
	fn test_create_controls_presses_requested(mask in 0u16..(1 << 9)) {
		let kinds: Vec<ControlKind> = ControlKind::all()
			.enumerate()
			.filter(|(i, _)| mask & (1 << i) != 0)
			.map(|(_, k)| k)
			.collect();
		let registry = ControlRegistry::default();

		let controls = registry.create_controls(Flavor::Note, kinds.iter().copied()).unwrap();
		prop_assert_eq!(controls.len(), ControlKind::all().count());
		for control in &controls {
			prop_assert_eq!(control.pressed, kinds.contains(&control.kind()));
		}

		let schema = registry.create_controls(Flavor::Schema, kinds.iter().copied()).unwrap();
		prop_assert!(schema.is_empty());
	}
}
