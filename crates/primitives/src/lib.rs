//! Core text types for the active document: ranges, change sets, and edit errors.

/// Edit errors raised when a change set cannot be applied.
pub mod edit;
/// Text range types measured in characters.
pub mod range;
/// Rope utilities.
pub mod rope;
/// Transactional change sets.
pub mod transaction;

pub use edit::EditError;
pub use range::{CharIdx, Range};
pub use ropey::{Rope, RopeSlice};
pub use transaction::{Change, ChangeSet};
