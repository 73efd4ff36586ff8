use crate::session::PickerSession;

/// Façade over the host's interactive picker widget.
///
/// The controller pushes state through these calls; the host routes user
/// events back through [`LookupController`](crate::LookupController) methods
/// (`on_trigger_control`, `on_did_change_value`, `accept`, `on_hide`).
/// Implementations must not retain the session past a call.
pub trait PickerHost {
	/// Makes the picker visible.
	fn show(&mut self, session: &PickerSession);

	/// Re-renders after the session changed (controls, value, items).
	fn update(&mut self, session: &PickerSession) {
		let _ = session;
	}

	/// Tears down the picker widget.
	fn dispose(&mut self, session: &PickerSession);

	/// Places `text` on the system clipboard.
	fn write_clipboard(&mut self, text: &str) {
		let _ = text;
	}
}
