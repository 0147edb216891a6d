//! Bindings between form controls and the validation logic
//!
//! A [`FieldBinding`] wraps one user-editable control behind the
//! [`FieldControl`] capability. It tracks the value the user actually entered
//! separately from the text the control displays: programmatic
//! [`FieldBinding::set_value`] calls update the display but reset the tracked
//! value, so a field pre-filled by code and never touched by the user reads as
//! empty. Only the user-driven [`FieldBinding::record_input`] path populates
//! the value that validation sees.

use parking_lot::RwLock;
use std::sync::Arc;

/// Visual validity state of a field
///
/// A single three-state value replaces independent "valid" and "invalid"
/// markers; setting one state removes the other, so a field can never carry
/// both at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidityMark {
	#[default]
	Neutral,
	Valid,
	Invalid,
}

/// Capability surface of one editable control in the excluded rendering layer
pub trait FieldControl {
	/// Replace the text the control displays.
	fn set_text(&mut self, text: &str);
	/// Enable or disable the control.
	fn set_enabled(&mut self, enabled: bool);
	/// Replace the control's validity marker.
	fn set_validity(&mut self, mark: ValidityMark);
}

/// Capability surface of the exemption toggle control
pub trait ToggleControl {
	/// Show or hide the toggle's active marker.
	fn set_active(&mut self, active: bool);
}

/// Binding for one editable field
///
/// # Examples
///
/// ```
/// use formgate::binding::{FieldBinding, MemoryControl};
///
/// let mut field = FieldBinding::new(Box::new(MemoryControl::new()));
///
/// field.record_input("typed by the user");
/// assert_eq!(field.value(), "typed by the user");
///
/// // Programmatic sets update the display but reset the tracked value.
/// field.set_value("prefilled");
/// assert_eq!(field.value(), "");
/// ```
pub struct FieldBinding {
	control: Box<dyn FieldControl>,
	user_text: String,
	disabled: bool,
	mark: ValidityMark,
}

impl FieldBinding {
	/// Creates a binding over the given control.
	pub fn new(control: Box<dyn FieldControl>) -> Self {
		Self {
			control,
			user_text: String::new(),
			disabled: false,
			mark: ValidityMark::Neutral,
		}
	}

	/// Replaces the displayed text and resets the tracked value to empty.
	///
	/// Only user input recorded through [`FieldBinding::record_input`]
	/// populates the value returned by [`FieldBinding::value`].
	pub fn set_value(&mut self, text: &str) {
		self.user_text.clear();
		self.control.set_text(text);
	}

	/// Records a user-driven change event.
	pub fn record_input(&mut self, text: &str) {
		self.user_text = text.to_string();
	}

	/// Returns the last user-entered text, or `""` if none was entered since
	/// the last [`FieldBinding::set_value`].
	pub fn value(&self) -> &str {
		&self.user_text
	}

	/// Sets the control's disabled state and records it.
	pub fn disable_input(&mut self, disabled: bool) {
		self.control.set_enabled(!disabled);
		self.disabled = disabled;
	}

	/// Returns the last-recorded disabled state.
	pub fn is_disabled(&self) -> bool {
		self.disabled
	}

	/// Replaces the validity marker on the control and in the binding.
	pub fn set_validity(&mut self, mark: ValidityMark) {
		self.control.set_validity(mark);
		self.mark = mark;
	}

	/// Removes any validity marker. Idempotent.
	pub fn clear_validation(&mut self) {
		self.set_validity(ValidityMark::Neutral);
	}

	/// Returns the current validity marker.
	pub fn mark(&self) -> ValidityMark {
		self.mark
	}
}

/// Binding for the exemption toggle
pub struct ToggleBinding {
	control: Box<dyn ToggleControl>,
	checked: bool,
}

impl ToggleBinding {
	pub fn new(control: Box<dyn ToggleControl>) -> Self {
		Self {
			control,
			checked: false,
		}
	}

	/// Records the checked state and mirrors it onto the control's active
	/// marker.
	pub fn set_checked(&mut self, checked: bool) {
		self.control.set_active(checked);
		self.checked = checked;
	}

	pub fn is_checked(&self) -> bool {
		self.checked
	}
}

/// Mirrored state of a [`MemoryControl`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
	pub text: String,
	pub enabled: bool,
	pub mark: ValidityMark,
}

impl Default for ControlState {
	fn default() -> Self {
		Self {
			text: String::new(),
			enabled: true,
			mark: ValidityMark::Neutral,
		}
	}
}

/// In-memory field control
///
/// Mirrors every capability call into shared state so tests and headless
/// callers can observe what a real control would display.
///
/// # Examples
///
/// ```
/// use formgate::binding::{FieldBinding, MemoryControl, ValidityMark};
///
/// let control = MemoryControl::new();
/// let state = control.state();
///
/// let mut field = FieldBinding::new(Box::new(control));
/// field.set_value("shown to the user");
/// field.set_validity(ValidityMark::Invalid);
///
/// assert_eq!(state.read().text, "shown to the user");
/// assert_eq!(state.read().mark, ValidityMark::Invalid);
/// ```
#[derive(Clone, Default)]
pub struct MemoryControl {
	state: Arc<RwLock<ControlState>>,
}

impl MemoryControl {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a handle to the mirrored state, usable after the control has
	/// been boxed into a binding.
	pub fn state(&self) -> Arc<RwLock<ControlState>> {
		Arc::clone(&self.state)
	}
}

impl FieldControl for MemoryControl {
	fn set_text(&mut self, text: &str) {
		self.state.write().text = text.to_string();
	}

	fn set_enabled(&mut self, enabled: bool) {
		self.state.write().enabled = enabled;
	}

	fn set_validity(&mut self, mark: ValidityMark) {
		self.state.write().mark = mark;
	}
}

/// In-memory exemption toggle control
#[derive(Clone, Default)]
pub struct MemoryToggle {
	active: Arc<RwLock<bool>>,
}

impl MemoryToggle {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a handle to the mirrored active state.
	pub fn active(&self) -> Arc<RwLock<bool>> {
		Arc::clone(&self.active)
	}
}

impl ToggleControl for MemoryToggle {
	fn set_active(&mut self, active: bool) {
		*self.active.write() = active;
	}
}
