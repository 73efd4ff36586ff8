use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::control::{ModifierControl, OpenTarget};
use crate::document::ActiveDocument;
use crate::error::Result;
use crate::provider::{Note, NoteItem};

/// What a lookup session looks up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
	#[default]
	Note,
	Schema,
}

/// One-shot hook run against the resolved note at confirmation.
///
/// The active document is `None` when no editor is focused.
pub type OnCreate = Box<dyn FnOnce(&mut Note, Option<&mut dyn ActiveDocument>) -> Result<()>>;

/// Identifies one provider refresh.
///
/// Only the most recently issued ticket may install items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket(u64);

/// Severity kind for session status messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
	Warn,
	Error,
}

/// State of one interactive lookup, from show to close.
///
/// A `PickerSession` is created and exclusively owned by the
/// [`LookupController`](crate::LookupController). Hosts and providers only
/// ever see it by shared reference for the duration of a call.
pub struct PickerSession {
	pub flavor: Flavor,
	pub title: String,
	pub placeholder: String,
	/// Current query text.
	pub value: String,
	/// Published controls in display order.
	pub controls: Vec<ModifierControl>,
	/// Controls as published before the last change. Inspection only.
	pub controls_prev: Vec<ModifierControl>,
	/// Candidate items from the latest refresh.
	pub items: Vec<NoteItem>,
	pub selected_items: Vec<NoteItem>,
	pub can_select_many: bool,
	/// Restrict candidates to direct children of the query path.
	pub show_direct_children_only: bool,
	pub ignore_focus_out: bool,
	pub copy_link_on_accept: bool,
	pub open_target: OpenTarget,
	on_create: Option<OnCreate>,
	generation: u64,
	status: Option<(StatusKind, String)>,
}

impl PickerSession {
	pub fn new(flavor: Flavor, title: impl Into<String>) -> Self {
		Self {
			flavor,
			title: title.into(),
			placeholder: String::new(),
			value: String::new(),
			controls: Vec::new(),
			controls_prev: Vec::new(),
			items: Vec::new(),
			selected_items: Vec::new(),
			can_select_many: false,
			show_direct_children_only: false,
			ignore_focus_out: true,
			copy_link_on_accept: false,
			open_target: OpenTarget::Current,
			on_create: None,
			generation: 0,
			status: None,
		}
	}

	/// Publishes a new control list, keeping the old one in `controls_prev`.
	pub fn publish_controls(&mut self, controls: &[ModifierControl]) {
		self.controls_prev = std::mem::replace(&mut self.controls, controls.to_vec());
	}

	/// Arms the confirmation hook, dropping any previously armed one.
	pub fn arm_on_create(&mut self, hook: OnCreate) {
		self.on_create = Some(hook);
	}

	pub fn has_on_create(&self) -> bool {
		self.on_create.is_some()
	}

	/// Takes the armed hook, leaving none armed.
	pub fn take_on_create(&mut self) -> Option<OnCreate> {
		self.on_create.take()
	}

	/// Issues a ticket for a new refresh, invalidating older ones.
	pub fn begin_refresh(&mut self) -> RefreshTicket {
		self.generation = self.generation.wrapping_add(1);
		RefreshTicket(self.generation)
	}

	/// Installs refresh results if `ticket` is still the latest.
	///
	/// Returns `false` and drops `items` for stale tickets.
	pub fn apply_refresh(&mut self, ticket: RefreshTicket, items: Vec<NoteItem>) -> bool {
		if ticket.0 != self.generation {
			tracing::trace!(ticket = ticket.0, latest = self.generation, "lookup.refresh.stale");
			return false;
		}
		self.items = items;
		true
	}

	/// Sets the session status message.
	pub fn set_status(&mut self, kind: StatusKind, msg: impl Into<String>) {
		self.status = Some((kind, msg.into()));
	}

	/// Clears the session status message, e.g. once the user edits the query.
	pub fn clear_status(&mut self) {
		self.status = None;
	}

	pub fn status(&self) -> Option<(StatusKind, &str)> {
		self.status.as_ref().map(|(kind, msg)| (*kind, msg.as_str()))
	}
}

impl fmt::Debug for PickerSession {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PickerSession")
			.field("flavor", &self.flavor)
			.field("title", &self.title)
			.field("value", &self.value)
			.field("controls", &self.controls)
			.field("items", &self.items.len())
			.field("show_direct_children_only", &self.show_direct_children_only)
			.field("on_create", &self.on_create.is_some())
			.field("generation", &self.generation)
			.finish_non_exhaustive()
	}
}
