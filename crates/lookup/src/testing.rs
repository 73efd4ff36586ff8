//! Recording test doubles for the provider, host and effect handlers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::control::{ControlRegistry, EffectHandler, EffectPatch};
use crate::controller::{LookupController, LookupOpts};
use crate::host::PickerHost;
use crate::provider::{AcceptOpts, CandidateProvider, Note, NoteItem, ProviderOpts, RefreshReason};
use crate::session::PickerSession;
use crate::{LookupConfig, Workspace};

pub(crate) fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Fixed clock used by scenario tests.
pub(crate) fn test_clock() -> NaiveDateTime {
	NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(8, 5, 7).unwrap()
}

pub(crate) fn workspace() -> Workspace {
	Workspace::new(LookupConfig::default()).with_clock(test_clock())
}

/// One provider refresh as observed by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RefreshCall {
	pub reason: RefreshReason,
	pub value: String,
	pub direct_children_only: bool,
}

#[derive(Default)]
pub(crate) struct ProviderState {
	pub notes: Vec<String>,
	pub refreshes: Vec<RefreshCall>,
	pub provided: usize,
	pub accepts: usize,
	pub fail_refresh: Cell<bool>,
	pub fail_accept: Cell<bool>,
}

/// Provider over a fixed list of note names.
///
/// Refresh filters by prefix; accept resolves the first selected item or the
/// query value as a new note.
#[derive(Clone, Default)]
pub(crate) struct MockProvider {
	pub state: Rc<RefCell<ProviderState>>,
}

impl MockProvider {
	pub fn with_notes(notes: &[&str]) -> Self {
		let provider = Self::default();
		provider.state.borrow_mut().notes = notes.iter().map(|n| n.to_string()).collect();
		provider
	}

	pub fn refreshes(&self) -> Vec<RefreshCall> {
		self.state.borrow().refreshes.clone()
	}

	pub fn refresh_count(&self, reason: RefreshReason) -> usize {
		self.state.borrow().refreshes.iter().filter(|c| c.reason == reason).count()
	}

	pub fn fail_accept(&self, fail: bool) {
		self.state.borrow().fail_accept.set(fail);
	}

	pub fn fail_refresh(&self, fail: bool) {
		self.state.borrow().fail_refresh.set(fail);
	}
}

#[async_trait(?Send)]
impl CandidateProvider for MockProvider {
	async fn provide(&self, _session: &PickerSession) -> anyhow::Result<()> {
		self.state.borrow_mut().provided += 1;
		Ok(())
	}

	async fn on_update_picker_item(
		&self,
		session: &PickerSession,
		_opts: &ProviderOpts,
		reason: RefreshReason,
	) -> anyhow::Result<Vec<NoteItem>> {
		let mut state = self.state.borrow_mut();
		state.refreshes.push(RefreshCall {
			reason,
			value: session.value.clone(),
			direct_children_only: session.show_direct_children_only,
		});
		if state.fail_refresh.get() {
			anyhow::bail!("index unavailable");
		}

		let query = session.value.as_str();
		let depth = query.split('.').count();
		Ok(state
			.notes
			.iter()
			.filter(|n| n.starts_with(query))
			.filter(|n| !session.show_direct_children_only || n.split('.').count() == depth + 1)
			.map(|n| NoteItem::new(n.as_str()))
			.collect())
	}

	async fn on_did_accept(&self, session: &PickerSession, _opts: AcceptOpts) -> anyhow::Result<Note> {
		let mut state = self.state.borrow_mut();
		state.accepts += 1;
		if state.fail_accept.get() {
			anyhow::bail!("engine rejected note");
		}
		let fname = session
			.selected_items
			.first()
			.map(|item| item.fname.clone())
			.unwrap_or_else(|| session.value.clone());
		Ok(Note {
			id: format!("id-{fname}"),
			title: fname.rsplit('.').next().unwrap_or_default().to_string(),
			fname,
			body: String::new(),
		})
	}
}

#[derive(Debug, Default)]
pub(crate) struct HostState {
	pub shown: usize,
	pub updates: usize,
	pub disposed: usize,
	pub clipboard: Vec<String>,
}

#[derive(Clone, Default)]
pub(crate) struct MockHost {
	pub state: Rc<RefCell<HostState>>,
}

impl PickerHost for MockHost {
	fn show(&mut self, _session: &PickerSession) {
		self.state.borrow_mut().shown += 1;
	}

	fn update(&mut self, _session: &PickerSession) {
		self.state.borrow_mut().updates += 1;
	}

	fn dispose(&mut self, _session: &PickerSession) {
		self.state.borrow_mut().disposed += 1;
	}

	fn write_clipboard(&mut self, text: &str) {
		self.state.borrow_mut().clipboard.push(text.to_string());
	}
}

/// Controller wired to fresh mocks.
pub(crate) fn controller(ws: &Workspace, opts: LookupOpts, notes: &[&str]) -> (LookupController, MockProvider, MockHost) {
	controller_with(ws, &ControlRegistry::default(), opts, notes)
}

pub(crate) fn controller_with(
	ws: &Workspace,
	registry: &ControlRegistry,
	opts: LookupOpts,
	notes: &[&str],
) -> (LookupController, MockProvider, MockHost) {
	let provider = MockProvider::with_notes(notes);
	let host = MockHost::default();
	let ctl = LookupController::new(ws, registry, opts, Box::new(provider.clone()), Box::new(host.clone()))
		.expect("controller builds");
	(ctl, provider, host)
}

/// Effect handler that always fails.
pub(crate) struct FailingEffect;

#[async_trait(?Send)]
impl EffectHandler for FailingEffect {
	async fn handle(&self, _pressed: bool, _session: &PickerSession) -> anyhow::Result<EffectPatch> {
		anyhow::bail!("clipboard unavailable")
	}
}

/// Effect handler that counts invocations and yields once before answering.
#[derive(Default)]
pub(crate) struct CountingEffect {
	pub calls: Cell<usize>,
}

#[async_trait(?Send)]
impl EffectHandler for CountingEffect {
	async fn handle(&self, pressed: bool, _session: &PickerSession) -> anyhow::Result<EffectPatch> {
		self.calls.set(self.calls.get() + 1);
		tokio::task::yield_now().await;
		Ok(EffectPatch::SelectMany(pressed))
	}
}
