//! Session lifecycle state machine.

use strum::Display;

/// Lifecycle state of a lookup session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum LookupState {
	/// No picker open.
	#[default]
	Idle,
	/// Picker visible, awaiting input.
	Open,
	/// Selection accepted, effects running.
	Resolving,
	/// Session finished.
	Closed,
}

/// Host or controller event driving [`LookupState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LookupEvent {
	Show,
	Trigger,
	ValueChange,
	Refresh,
	Accept,
	Resolved,
	Hide,
}

impl LookupState {
	/// Transition table. Returns `None` for events the state does not accept.
	pub fn next(self, event: LookupEvent) -> Option<LookupState> {
		use LookupEvent as E;
		use LookupState as S;

		match (self, event) {
			(S::Idle | S::Closed, E::Show) => Some(S::Open),
			(S::Open, E::Trigger | E::ValueChange | E::Refresh) => Some(S::Open),
			(S::Open, E::Accept) => Some(S::Resolving),
			(S::Resolving, E::Resolved) => Some(S::Closed),
			(S::Open, E::Hide) => Some(S::Closed),
			_ => None,
		}
	}

	/// Whether `event` is legal in this state.
	pub fn accepts(self, event: LookupEvent) -> bool {
		self.next(event).is_some()
	}
}
