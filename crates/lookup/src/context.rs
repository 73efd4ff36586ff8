use chrono::NaiveDateTime;

use crate::config::LookupConfig;
use crate::document::{ActiveDocument, Buffer};

/// Editor-side services the controller reads from on every call.
pub trait LookupContext {
	/// Document focused in the editor, if any.
	fn active_document(&self) -> Option<&dyn ActiveDocument>;

	fn active_document_mut(&mut self) -> Option<&mut dyn ActiveDocument>;

	fn config(&self) -> &LookupConfig;

	/// Version string shown in the picker title.
	fn version(&self) -> &str {
		env!("CARGO_PKG_VERSION")
	}

	/// Local wall-clock time used for generated note names.
	fn now(&self) -> NaiveDateTime {
		chrono::Local::now().naive_local()
	}
}

/// Plain [`LookupContext`] holding an optional in-memory document.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
	pub document: Option<Buffer>,
	pub config: LookupConfig,
	/// Fixed clock; `None` reads the system clock.
	pub clock: Option<NaiveDateTime>,
}

impl Workspace {
	pub fn new(config: LookupConfig) -> Self {
		Self {
			document: None,
			config,
			clock: None,
		}
	}

	pub fn with_document(mut self, document: Buffer) -> Self {
		self.document = Some(document);
		self
	}

	pub fn with_clock(mut self, now: NaiveDateTime) -> Self {
		self.clock = Some(now);
		self
	}
}

impl LookupContext for Workspace {
	fn active_document(&self) -> Option<&dyn ActiveDocument> {
		self.document.as_ref().map(|doc| doc as &dyn ActiveDocument)
	}

	fn active_document_mut(&mut self) -> Option<&mut dyn ActiveDocument> {
		self.document.as_mut().map(|doc| doc as &mut dyn ActiveDocument)
	}

	fn config(&self) -> &LookupConfig {
		&self.config
	}

	fn now(&self) -> NaiveDateTime {
		self.clock.unwrap_or_else(|| chrono::Local::now().naive_local())
	}
}
