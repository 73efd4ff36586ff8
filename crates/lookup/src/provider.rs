//! Candidate provider contract.
//!
//! The provider owns ranking and note resolution; the controller only tells
//! it when the query or filter state changed and when the user accepted.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::session::{Flavor, PickerSession};

/// A note resolved from the user's selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
	pub id: String,
	/// Hierarchical file name, e.g. `project.tasks.today`.
	pub fname: String,
	pub title: String,
	pub body: String,
}

impl Note {
	/// Wiki-style link to this note.
	pub fn link(&self) -> String {
		format!("[[{}|{}]]", self.title, self.fname)
	}
}

/// A candidate row shown in the picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteItem {
	pub fname: String,
	pub label: String,
	pub detail: Option<String>,
	/// Placeholder for a note that does not exist yet.
	pub is_stub: bool,
}

impl NoteItem {
	pub fn new(fname: impl Into<String>) -> Self {
		let fname = fname.into();
		Self {
			label: fname.clone(),
			fname,
			detail: None,
			is_stub: false,
		}
	}
}

/// Options the provider was configured with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProviderOpts {
	pub flavor: Flavor,
}

/// Options for [`CandidateProvider::on_did_accept`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptOpts {
	pub flavor: Flavor,
}

/// Label describing why a refresh was requested.
///
/// Informational only; providers must not branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "camelCase")]
pub enum RefreshReason {
	Journal,
	Scratch,
	Normal,
	Manual,
	ValueChange,
}

/// Supplies and filters candidate items for a picker session.
#[async_trait(?Send)]
pub trait CandidateProvider {
	/// Called once per session after setup, before the first user input.
	async fn provide(&self, session: &PickerSession) -> anyhow::Result<()> {
		let _ = session;
		Ok(())
	}

	/// Recomputes candidates for the current query and filter state.
	async fn on_update_picker_item(
		&self,
		session: &PickerSession,
		opts: &ProviderOpts,
		reason: RefreshReason,
	) -> anyhow::Result<Vec<NoteItem>>;

	/// Resolves the current selection into a note. Called at most once per
	/// successful session.
	async fn on_did_accept(&self, session: &PickerSession, opts: AcceptOpts) -> anyhow::Result<Note>;
}
