//! The lookup controller: owns one picker session at a time and turns host
//! events into control state, query values, provider refreshes and
//! confirmation effects.
//!
//! Every public entry point checks the session state first. Events that
//! arrive outside their legal state are discarded and logged; only `show` on
//! an already open session is reported as an error.

use crate::context::LookupContext;
use crate::control::{
	Category, ControlKind, ControlRegistry, ModifierControl, OpenTarget, is_pressed, pressed_in,
};
use crate::document::SelectionSnapshot;
use crate::error::{LookupError, Result};
use crate::host::PickerHost;
use crate::provider::{AcceptOpts, CandidateProvider, Note, ProviderOpts, RefreshReason};
use crate::session::{Flavor, PickerSession, StatusKind};
use crate::state::{LookupEvent, LookupState};

pub mod behavior;

pub use behavior::{DerivedQuery, QueryInputs, derive_query_value, on_create_hook, update_behavior_by_effect};


const PLACEHOLDER: &str = "eg. hello.world";

/// Construction options for a [`LookupController`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupOpts {
	pub flavor: Flavor,
	/// Selection behavior pressed at open; falls back to
	/// `lookup.default-create-behavior`.
	pub selection_type: Option<ControlKind>,
	pub note_type: Option<ControlKind>,
	pub effect_type: Option<ControlKind>,
}

/// Options for [`LookupController::show`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowOpts {
	/// Initial query value.
	pub value: Option<String>,
	pub ignore_focus_out: bool,
	/// Accept all current items immediately instead of showing the picker.
	pub no_confirm: bool,
}

impl Default for ShowOpts {
	fn default() -> Self {
		Self {
			value: None,
			ignore_focus_out: true,
			no_confirm: false,
		}
	}
}

/// Result of a confirmed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
	pub note: Note,
	pub open_target: OpenTarget,
	/// Link written to the clipboard, if `copyNoteLink` was active.
	pub copied_link: Option<String>,
}

/// Outcome of [`LookupController::accept`].
#[derive(Debug)]
pub enum AcceptOutcome {
	/// The session resolved a note and closed.
	Resolved(Resolution),
	/// The provider failed; the session stays open for another attempt.
	Retry(LookupError),
	/// No open session to accept.
	Discarded,
}

/// Input for one unified picker update.
struct PickerUpdate<'a> {
	selection: Option<SelectionSnapshot>,
	value: Option<&'a str>,
	changed: Option<ControlKind>,
}

/// Drives the interactive note lookup.
pub struct LookupController {
	flavor: Flavor,
	state: LookupState,
	registry: ControlRegistry,
	/// Kinds pressed at the start of every session.
	initial: Vec<ControlKind>,
	controls: Vec<ModifierControl>,
	session: Option<PickerSession>,
	provider: Box<dyn CandidateProvider>,
	provider_opts: ProviderOpts,
	host: Box<dyn PickerHost>,
}

impl LookupController {
	/// Creates a controller and its control set.
	///
	/// Initially pressed kinds are the selection behavior (explicit or from
	/// config), then the note and effect types. They are re-applied to a
	/// fresh control set on every [`show`](Self::show).
	pub fn new(
		ctx: &dyn LookupContext,
		registry: &ControlRegistry,
		opts: LookupOpts,
		provider: Box<dyn CandidateProvider>,
		host: Box<dyn PickerHost>,
	) -> Result<Self> {
		let selection_type = match opts.selection_type {
			Some(kind) => Some(kind),
			None => ctx.config().default_create_behavior()?,
		};
		let initial: Vec<ControlKind> = [selection_type, opts.note_type, opts.effect_type]
			.into_iter()
			.flatten()
			.collect();

		Ok(Self {
			flavor: opts.flavor,
			state: LookupState::Idle,
			controls: registry.build(opts.flavor, &initial),
			registry: registry.clone(),
			initial,
			session: None,
			provider,
			provider_opts: ProviderOpts { flavor: opts.flavor },
			host,
		})
	}

	pub fn flavor(&self) -> Flavor {
		self.flavor
	}

	pub fn state(&self) -> LookupState {
		self.state
	}

	pub fn controls(&self) -> &[ModifierControl] {
		&self.controls
	}

	/// The open session, if any.
	pub fn session(&self) -> Option<&PickerSession> {
		self.session.as_ref()
	}

	/// Drops the previous session's control state.
	fn reset_controls(&mut self) {
		self.controls = self.registry.build(self.flavor, &self.initial);
	}

	fn transition(&mut self, event: LookupEvent) -> bool {
		match self.state.next(event) {
			Some(next) => {
				tracing::trace!(from = %self.state, to = %next, event = %event, "lookup.transition");
				self.state = next;
				true
			}
			None => {
				tracing::debug!(state = %self.state, event = %event, "lookup.event.discarded");
				false
			}
		}
	}

	/// Opens a new session.
	///
	/// With `no_confirm`, every current item is selected and the session is
	/// accepted right away; the outcome is returned. A scripted accept that
	/// fails closes the session instead of leaving it open.
	pub async fn show(&mut self, ctx: &mut dyn LookupContext, opts: ShowOpts) -> Result<Option<AcceptOutcome>> {
		if !self.state.accepts(LookupEvent::Show) {
			return Err(LookupError::IllegalTransition {
				state: self.state,
				event: LookupEvent::Show,
			});
		}
		tracing::info!(flavor = %self.flavor, value = ?opts.value, no_confirm = opts.no_confirm, "lookup.show");

		let selection = SelectionSnapshot::capture(ctx.active_document());
		let title = format!("Lookup ({}) - version: {}", self.flavor, ctx.version());
		let mut session = PickerSession::new(self.flavor, title);
		session.placeholder = PLACEHOLDER.to_string();
		session.ignore_focus_out = opts.ignore_focus_out;
		session.can_select_many = false;
		self.transition(LookupEvent::Show);
		self.reset_controls();

		session.publish_controls(&self.controls);
		self.update_picker_behavior(
			ctx,
			&mut session,
			PickerUpdate {
				selection,
				value: opts.value.as_deref(),
				changed: None,
			},
		)
		.await;

		if let Err(source) = self.provider.provide(&session).await {
			report(&mut session, &LookupError::ProviderFailure { context: "provide", source });
		}

		if opts.no_confirm {
			session.selected_items = session.items.clone();
			self.session = Some(session);
			let outcome = self.accept(ctx).await?;
			if matches!(outcome, AcceptOutcome::Retry(_)) {
				self.on_hide();
			}
			return Ok(Some(outcome));
		}

		self.host.show(&session);
		self.session = Some(session);
		Ok(None)
	}

	/// Handles a control press from the host.
	///
	/// Returns `Ok(false)` when the event was discarded because no session is
	/// open. A kind the session does not carry is a stale callback and fails
	/// with [`LookupError::NoActiveControl`].
	pub async fn on_trigger_control(&mut self, ctx: &dyn LookupContext, kind: ControlKind) -> Result<bool> {
		if !self.state.accepts(LookupEvent::Trigger) {
			tracing::debug!(state = %self.state, kind = %kind, "lookup.trigger.discarded");
			return Ok(false);
		}
		let Some(mut session) = self.session.take() else {
			return Ok(false);
		};
		let result = self.trigger(ctx, &mut session, kind).await;
		self.session = Some(session);
		result.map(|()| true)
	}

	async fn trigger(&mut self, ctx: &dyn LookupContext, session: &mut PickerSession, kind: ControlKind) -> Result<()> {
		let selection = SelectionSnapshot::capture(ctx.active_document());

		let control = self
			.controls
			.iter_mut()
			.find(|c| c.kind() == kind)
			.ok_or(LookupError::NoActiveControl(kind))?;
		control.pressed = !control.pressed;
		let pressed = control.pressed;

		let category = kind.category();
		if category.is_exclusive() {
			for other in self.controls.iter_mut().filter(|c| c.kind() != kind && c.category() == category) {
				other.pressed = false;
			}
		}
		tracing::debug!(kind = %kind, pressed, "lookup.trigger");

		session.publish_controls(&self.controls);
		self.host.update(session);

		self.update_picker_behavior(
			ctx,
			session,
			PickerUpdate {
				selection,
				value: None,
				changed: Some(kind),
			},
		)
		.await;
		Ok(())
	}

	/// Handles a query edit from the host.
	pub async fn on_did_change_value(&mut self, value: impl Into<String>) -> bool {
		if !self.transition(LookupEvent::ValueChange) {
			return false;
		}
		let Some(mut session) = self.session.take() else {
			return false;
		};
		session.value = value.into();
		session.clear_status();
		self.refresh(&mut session, RefreshReason::ValueChange).await;
		self.session = Some(session);
		true
	}

	/// Confirms the current selection.
	///
	/// A provider failure leaves the session open. Once a note is resolved
	/// the session always closes, even if the confirmation hook fails.
	pub async fn accept(&mut self, ctx: &mut dyn LookupContext) -> Result<AcceptOutcome> {
		if !self.state.accepts(LookupEvent::Accept) {
			tracing::debug!(state = %self.state, "lookup.accept.discarded");
			return Ok(AcceptOutcome::Discarded);
		}
		let Some(mut session) = self.session.take() else {
			return Ok(AcceptOutcome::Discarded);
		};

		let opts = AcceptOpts { flavor: self.flavor };
		let mut note = match self.provider.on_did_accept(&session, opts).await {
			Ok(note) => note,
			Err(source) => {
				let err = LookupError::ProviderFailure { context: "accept", source };
				tracing::warn!(value = %session.value, error = %err, "lookup.accept.failed");
				session.set_status(StatusKind::Error, err.to_string());
				self.host.update(&session);
				self.session = Some(session);
				return Ok(AcceptOutcome::Retry(err));
			}
		};
		self.transition(LookupEvent::Accept);
		tracing::info!(fname = %note.fname, "lookup.accept");

		if let Some(on_create) = session.take_on_create()
			&& let Err(err) = on_create(&mut note, ctx.active_document_mut())
		{
			report(&mut session, &err);
		}

		let copied_link = session.copy_link_on_accept.then(|| note.link());
		if let Some(link) = &copied_link {
			self.host.write_clipboard(link);
		}

		let resolution = Resolution {
			note,
			open_target: session.open_target,
			copied_link,
		};
		self.host.dispose(&session);
		self.transition(LookupEvent::Resolved);
		self.reset_controls();
		Ok(AcceptOutcome::Resolved(resolution))
	}

	/// Handles the picker being hidden: disposes and forgets the session.
	pub fn on_hide(&mut self) -> bool {
		if !self.transition(LookupEvent::Hide) {
			return false;
		}
		if let Some(session) = self.session.take() {
			self.host.dispose(&session);
		}
		self.reset_controls();
		true
	}

	/// Unified update run on open and on every control toggle.
	async fn update_picker_behavior(
		&mut self,
		ctx: &dyn LookupContext,
		session: &mut PickerSession,
		update: PickerUpdate<'_>,
	) {
		let note_control = pressed_in(&self.controls, Category::Note);
		let selection_control = pressed_in(&self.controls, Category::Selection);
		let filter_on = pressed_in(&self.controls, Category::Filter).is_some();
		tracing::debug!(
			note = ?note_control,
			selection = ?selection_control,
			filter = filter_on,
			changed = ?update.changed,
			"lookup.update"
		);

		if let Err(err) = update_behavior_by_effect(session).await {
			report(session, &err);
		}

		let derive = match update.changed {
			None => true,
			Some(kind) => kind.category() == Category::Note || kind == ControlKind::SelectionToLink,
		};
		if derive {
			self.update_behavior_by_note_type(ctx, session, note_control, update.selection.as_ref(), update.value)
				.await;
		}

		session.arm_on_create(on_create_hook(selection_control, update.selection));

		let before = session.show_direct_children_only;
		session.show_direct_children_only = filter_on;
		if before != filter_on {
			tracing::info!(show_direct_children_only = filter_on, "lookup.filter.toggled");
			self.refresh(session, RefreshReason::Manual).await;
		}
	}

	/// Derives the query value and refreshes candidates for it.
	async fn update_behavior_by_note_type(
		&mut self,
		ctx: &dyn LookupContext,
		session: &mut PickerSession,
		note_control: Option<ControlKind>,
		selection: Option<&SelectionSnapshot>,
		explicit: Option<&str>,
	) {
		let stem = ctx.active_document().and_then(|doc| doc.stem());
		let inputs = QueryInputs {
			flavor: self.flavor,
			note_control,
			link_pressed: is_pressed(&self.controls, ControlKind::SelectionToLink),
			selection_text: selection.map(|s| s.text.as_str()),
			explicit,
			document_stem: stem.as_deref(),
			now: ctx.now(),
		};
		let derived = derive_query_value(&inputs, ctx.config());
		session.value = derived.value;
		self.refresh(session, derived.reason).await;
	}

	/// Asks the provider for fresh items; stale results are dropped.
	async fn refresh(&mut self, session: &mut PickerSession, reason: RefreshReason) -> bool {
		let ticket = session.begin_refresh();
		tracing::debug!(reason = %reason, value = %session.value, "lookup.refresh");
		match self.provider.on_update_picker_item(session, &self.provider_opts, reason).await {
			Ok(items) => {
				let applied = session.apply_refresh(ticket, items);
				if applied {
					self.host.update(session);
				}
				applied
			}
			Err(source) => {
				report(session, &LookupError::ProviderFailure { context: "refresh", source });
				false
			}
		}
	}
}

/// Logs a recoverable failure and surfaces it in the session status.
///
/// Effect failures are warnings; the session keeps working without them.
fn report(session: &mut PickerSession, err: &LookupError) {
	tracing::warn!(error = %err, "lookup.failure");
	let kind = match err {
		LookupError::EffectFailure { .. } => StatusKind::Warn,
		_ => StatusKind::Error,
	};
	session.set_status(kind, err.to_string());
}
