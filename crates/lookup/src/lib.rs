//! Interactive note lookup.
//!
//! A [`LookupController`] drives one incremental-search picker session at a
//! time. Modifier controls ([`ModifierControl`]) shown next to the picker are
//! grouped by [`Category`]:
//!
//! - **note**: `journal`, `scratch`, `plain`. Generative kinds synthesize the
//!   query value.
//! - **selection**: `selectionExtract`, `selection2link`. Decide what happens to
//!   the editor selection when the lookup is confirmed.
//! - **filter**: `directChildOnly`. Restricts candidates to direct children.
//! - **effect**: `multiSelect`, `copyNoteLink`, `horizontalSplit`. Independent
//!   toggles with their own [`EffectHandler`].
//!
//! At most one control per category is pressed, except for effects which
//! combine freely.
//!
//! The picker widget, candidate ranking, and note storage live outside this
//! crate and are reached through [`PickerHost`], [`CandidateProvider`] and
//! [`ActiveDocument`].

pub mod config;
pub mod context;
pub mod control;
pub mod controller;
pub mod document;
pub mod error;
pub mod host;
pub mod naming;
pub mod provider;
pub mod session;
pub mod state;

#[cfg(test)]
mod invariants;
#[cfg(test)]
pub(crate) mod testing;

pub use config::{AddBehavior, AutoTitle, LookupConfig, NoteNameConfig};
pub use context::{LookupContext, Workspace};
pub use control::{
	Category, ControlKind, ControlRegistry, EffectHandler, EffectPatch, ModifierControl, OpenTarget, SplitDirection,
	category_of, category_of_name,
};
pub use controller::{AcceptOutcome, LookupController, LookupOpts, Resolution, ShowOpts};
pub use document::{ActiveDocument, Buffer, SelectionSnapshot};
pub use error::{ConfigError, LookupError, Result};
pub use host::PickerHost;
pub use provider::{AcceptOpts, CandidateProvider, Note, NoteItem, ProviderOpts, RefreshReason};
pub use session::{Flavor, OnCreate, PickerSession, RefreshTicket, StatusKind};
pub use state::{LookupEvent, LookupState};
