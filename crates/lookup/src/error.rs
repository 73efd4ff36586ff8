//! Error types for lookup sessions and configuration.

use std::path::PathBuf;

use nook_primitives::EditError;
use thiserror::Error;

use crate::control::ControlKind;
use crate::state::{LookupEvent, LookupState};

/// Errors raised by the lookup controller and its registry.
///
/// `InvalidKind` and `NoActiveControl` indicate programming errors (a kind
/// name that does not exist, or a host callback for a control the session
/// never published). Everything else is recoverable and is normally logged
/// and recorded in the session status rather than returned.
#[derive(Debug, Error)]
pub enum LookupError {
	/// A control kind name is not part of the known set.
	#[error("invalid control kind: {0}")]
	InvalidKind(String),

	/// A trigger referenced a control that is not in the session.
	#[error("no active control of kind {0}")]
	NoActiveControl(ControlKind),

	/// The candidate provider rejected a refresh or accept call.
	#[error("candidate provider failed during {context}: {source}")]
	ProviderFailure {
		/// Operation that was in flight.
		context: &'static str,
		/// Error reported by the provider.
		source: anyhow::Error,
	},

	/// An effect control's handler failed.
	#[error("effect {kind} failed: {source}")]
	EffectFailure {
		/// Kind of the failing control.
		kind: ControlKind,
		/// Error reported by the handler.
		source: anyhow::Error,
	},

	/// An event arrived in a state that does not accept it.
	#[error("event {event:?} is not valid in state {state:?}")]
	IllegalTransition {
		/// State the session was in.
		state: LookupState,
		/// Rejected event.
		event: LookupEvent,
	},

	/// A document edit was rejected.
	#[error("document edit failed: {0}")]
	Edit(#[from] EditError),

	/// Configuration could not be loaded.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Errors that can occur when loading lookup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A control kind named in the configuration does not exist.
	#[error("invalid control kind in {field}: {value}")]
	InvalidKind {
		/// Config key holding the value.
		field: &'static str,
		/// The rejected value.
		value: String,
	},
}

/// Result type for lookup operations.
pub type Result<T> = std::result::Result<T, LookupError>;
