//! Form field binding, validation, and submission orchestration
//!
//! This crate implements the decision logic of a personal-data form (name,
//! email, phone, national ID, postal code):
//! - Field bindings tracking user-entered values separately from displayed
//!   text, with a three-state validity marker
//! - Pure per-field format rules
//! - A submission orchestrator aggregating rule outcomes into a single
//!   submit/reject decision, with an explicit in-flight guard
//! - A conditional exemption that lifts the national-ID requirement while a
//!   companion toggle is active
//! - A transport capability delivering the validated record to a remote
//!   collector as JSON
//!
//! Rendering and networking stay behind the [`binding::FieldControl`],
//! [`binding::ToggleControl`], and [`transport::SubmissionBackend`]
//! capability traits; in-memory implementations of all three are provided for
//! tests and headless use.

pub mod binding;
pub mod events;
pub mod form;
pub mod record;
pub mod transport;
pub mod validators;

pub use binding::{
	ControlState, FieldBinding, FieldControl, MemoryControl, MemoryToggle, ToggleBinding,
	ToggleControl, ValidityMark,
};
pub use events::{EventSource, FieldId, FormEvent, QueuedEvents};
pub use form::{
	ContactForm, FormControls, FormError, FormResult, RuleOutcome, SubmitOutcome, SubmitPhase,
	ValidationReport,
};
pub use record::SubmissionRecord;
pub use transport::{
	HttpBackend, MemoryBackend, SubmissionBackend, TransportError, TransportResult,
};
pub use validators::{
	EmailValidator, NameValidator, NationalIdValidator, PhoneValidator, PostalCodeValidator,
	ValidationError, ValidationResult, Validator,
};
