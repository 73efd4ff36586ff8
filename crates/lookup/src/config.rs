//! Lookup configuration, read from TOML.
//!
//! ```toml
//! [lookup]
//! default-create-behavior = "selection2link"
//! link-select-auto-title = "slug"
//!
//! [journal]
//! name = "journal"
//! date-format = "%Y.%m.%d"
//! add-behavior = "childOfDomain"
//!
//! [scratch]
//! name = "scratch"
//! date-format = "%Y.%m.%d.%H%M%S"
//! add-behavior = "asOwnDomain"
//! ```
//!
//! Every table is optional, as is every `[lookup]` key. A `[journal]` or
//! `[scratch]` table that is present must set all three keys.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::control::ControlKind;
use crate::error::ConfigError;

/// Full lookup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LookupConfig {
	pub lookup: LookupSection,
	pub journal: NoteNameConfig,
	pub scratch: NoteNameConfig,
}

/// `[lookup]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LookupSection {
	/// Control kind pressed when a lookup opens without an explicit selection behavior.
	pub default_create_behavior: Option<String>,
	/// How links created from a selection seed the note name.
	pub link_select_auto_title: AutoTitle,
}

/// Title derivation for `selection2link`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoTitle {
	/// Append a slug of the selected text to the query.
	Slug,
	#[default]
	None,
}

/// Where generated notes are placed in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddBehavior {
	/// `<domain of current note>.<name>.<date>`
	ChildOfDomain,
	/// `<current note>.<name>.<date>`
	ChildOfCurrent,
	/// `<name>.<date>`
	AsOwnDomain,
}

/// Naming rules for one generated note kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NoteNameConfig {
	pub name: String,
	/// chrono strftime format.
	pub date_format: String,
	pub add_behavior: AddBehavior,
}

impl NoteNameConfig {
	pub fn journal() -> Self {
		Self {
			name: "journal".into(),
			date_format: "%Y.%m.%d".into(),
			add_behavior: AddBehavior::ChildOfDomain,
		}
	}

	pub fn scratch() -> Self {
		Self {
			name: "scratch".into(),
			date_format: "%Y.%m.%d.%H%M%S".into(),
			add_behavior: AddBehavior::AsOwnDomain,
		}
	}
}

impl Default for LookupConfig {
	fn default() -> Self {
		Self {
			lookup: LookupSection::default(),
			journal: NoteNameConfig::journal(),
			scratch: NoteNameConfig::scratch(),
		}
	}
}

impl LookupConfig {
	/// Parses configuration from TOML text.
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		let raw: RawConfig = toml::from_str(text)?;
		let config = Self {
			lookup: raw.lookup.unwrap_or_default(),
			journal: raw.journal.unwrap_or_else(NoteNameConfig::journal),
			scratch: raw.scratch.unwrap_or_else(NoteNameConfig::scratch),
		};
		config.validate()?;
		Ok(config)
	}

	/// Reads and parses a configuration file.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&text)
	}

	/// Default create behavior as a control kind.
	pub fn default_create_behavior(&self) -> Result<Option<ControlKind>, ConfigError> {
		self.lookup
			.default_create_behavior
			.as_deref()
			.map(|name| {
				ControlKind::parse(name).map_err(|_| ConfigError::InvalidKind {
					field: "lookup.default-create-behavior",
					value: name.to_string(),
				})
			})
			.transpose()
	}

	pub fn slug_titles(&self) -> bool {
		self.lookup.link_select_auto_title == AutoTitle::Slug
	}

	fn validate(&self) -> Result<(), ConfigError> {
		self.default_create_behavior().map(|_| ())
	}
}

/// On-disk shape; absent tables fall back to per-kind defaults.
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawConfig {
	lookup: Option<LookupSection>,
	journal: Option<NoteNameConfig>,
	scratch: Option<NoteNameConfig>,
}
