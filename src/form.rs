//! Submission orchestration for the personal-data form
//!
//! [`ContactForm`] owns the five field bindings, the exemption state, the
//! validation rules, and the transport backend. A submit trigger clears the
//! previous validity marks, evaluates every rule against its bound value
//! (skipping the phone rule when the field is empty and the national-ID rule
//! while the exemption is active), and either marks the fields with the
//! per-rule outcomes or hands the aggregated record to the backend.

use crate::binding::{FieldBinding, FieldControl, ToggleBinding, ToggleControl, ValidityMark};
use crate::events::{FieldId, FormEvent};
use crate::record::SubmissionRecord;
use crate::transport::{SubmissionBackend, TransportError};
use crate::validators::{
	EmailValidator, NameValidator, NationalIdValidator, PhoneValidator, PostalCodeValidator,
	ValidationResult, Validator,
};

/// Errors surfaced by the orchestrator
#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("submission transport failed: {0}")]
	Transport(#[from] TransportError),
}

pub type FormResult<T> = Result<T, FormError>;

/// Result of applying one rule during a submission attempt
///
/// `Skipped` counts as passing for the aggregate decision and suppresses any
/// marker change on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
	Passed,
	Failed,
	Skipped,
}

impl RuleOutcome {
	fn from_result(result: ValidationResult<()>) -> Self {
		match result {
			Ok(()) => RuleOutcome::Passed,
			Err(_) => RuleOutcome::Failed,
		}
	}

	/// Whether this outcome lets the submission proceed.
	pub fn is_passing(&self) -> bool {
		!matches!(self, RuleOutcome::Failed)
	}
}

/// Per-field outcomes of one submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationReport {
	pub name: RuleOutcome,
	pub email: RuleOutcome,
	pub phone: RuleOutcome,
	pub national_id: RuleOutcome,
	pub postal_code: RuleOutcome,
}

impl ValidationReport {
	/// True when no rule failed.
	pub fn all_passed(&self) -> bool {
		FieldId::ALL.iter().all(|field| self.outcome(*field).is_passing())
	}

	/// The outcome recorded for one field.
	pub fn outcome(&self, field: FieldId) -> RuleOutcome {
		match field {
			FieldId::Name => self.name,
			FieldId::Email => self.email,
			FieldId::Phone => self.phone,
			FieldId::NationalId => self.national_id,
			FieldId::PostalCode => self.postal_code,
		}
	}
}

/// Orchestrator state across one submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
	#[default]
	Idle,
	Submitting,
}

/// What a submit trigger produced
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
	/// All active rules passed; the collector accepted the record and replied.
	Accepted(serde_json::Value),
	/// At least one rule failed; fields were marked, the transport was not
	/// invoked.
	Rejected(ValidationReport),
	/// A previous submission is still awaiting its reply; nothing was done.
	InFlight,
}

/// The controls the form binds to at startup
pub struct FormControls {
	pub name: Box<dyn FieldControl>,
	pub email: Box<dyn FieldControl>,
	pub phone: Box<dyn FieldControl>,
	pub national_id: Box<dyn FieldControl>,
	pub postal_code: Box<dyn FieldControl>,
	pub exemption: Box<dyn ToggleControl>,
}

impl FormControls {
	/// Controls backed by in-memory state, for tests and headless use.
	pub fn in_memory() -> Self {
		use crate::binding::{MemoryControl, MemoryToggle};

		Self {
			name: Box::new(MemoryControl::new()),
			email: Box::new(MemoryControl::new()),
			phone: Box::new(MemoryControl::new()),
			national_id: Box::new(MemoryControl::new()),
			postal_code: Box::new(MemoryControl::new()),
			exemption: Box::new(MemoryToggle::new()),
		}
	}
}

/// The form context: bindings, rules, exemption, and transport
///
/// # Examples
///
/// ```
/// use formgate::events::FieldId;
/// use formgate::form::{ContactForm, FormControls, SubmitOutcome};
/// use formgate::transport::MemoryBackend;
///
/// #[tokio::main]
/// async fn main() {
///     let backend = MemoryBackend::new();
///     let mut form = ContactForm::new(FormControls::in_memory(), Box::new(backend.clone()));
///
///     form.handle_input(FieldId::Name, "Jan");
///     form.handle_input(FieldId::Email, "jan@example.com");
///     form.handle_input(FieldId::NationalId, "12345678901");
///     form.handle_input(FieldId::PostalCode, "00-950");
///
///     let outcome = form.handle_submit().await.unwrap();
///     assert!(matches!(outcome, SubmitOutcome::Accepted(_)));
///     assert_eq!(backend.count(), 1);
/// }
/// ```
pub struct ContactForm {
	name: FieldBinding,
	email: FieldBinding,
	phone: FieldBinding,
	national_id: FieldBinding,
	postal_code: FieldBinding,
	toggle: ToggleBinding,
	exempt: bool,
	phase: SubmitPhase,
	backend: Box<dyn SubmissionBackend>,
	name_rule: NameValidator,
	email_rule: EmailValidator,
	phone_rule: PhoneValidator,
	national_id_rule: NationalIdValidator,
	postal_code_rule: PostalCodeValidator,
}

impl ContactForm {
	/// Creates the form bound to the given controls and backend.
	pub fn new(controls: FormControls, backend: Box<dyn SubmissionBackend>) -> Self {
		Self {
			name: FieldBinding::new(controls.name),
			email: FieldBinding::new(controls.email),
			phone: FieldBinding::new(controls.phone),
			national_id: FieldBinding::new(controls.national_id),
			postal_code: FieldBinding::new(controls.postal_code),
			toggle: ToggleBinding::new(controls.exemption),
			exempt: false,
			phase: SubmitPhase::Idle,
			backend,
			name_rule: NameValidator::new(),
			email_rule: EmailValidator::new(),
			phone_rule: PhoneValidator::new(),
			national_id_rule: NationalIdValidator::new(),
			postal_code_rule: PostalCodeValidator::new(),
		}
	}

	/// Read access to one field's binding.
	pub fn binding(&self, field: FieldId) -> &FieldBinding {
		match field {
			FieldId::Name => &self.name,
			FieldId::Email => &self.email,
			FieldId::Phone => &self.phone,
			FieldId::NationalId => &self.national_id,
			FieldId::PostalCode => &self.postal_code,
		}
	}

	fn binding_mut(&mut self, field: FieldId) -> &mut FieldBinding {
		match field {
			FieldId::Name => &mut self.name,
			FieldId::Email => &mut self.email,
			FieldId::Phone => &mut self.phone,
			FieldId::NationalId => &mut self.national_id,
			FieldId::PostalCode => &mut self.postal_code,
		}
	}

	/// Whether the national-ID exemption is active.
	pub fn is_exempt(&self) -> bool {
		self.exempt
	}

	/// Current orchestrator phase.
	pub fn phase(&self) -> SubmitPhase {
		self.phase
	}

	/// Records a user-driven change event for one field.
	///
	/// Input to a disabled field is ignored, matching a real control that
	/// cannot emit change events while disabled.
	pub fn handle_input(&mut self, field: FieldId, text: &str) {
		let binding = self.binding_mut(field);
		if binding.is_disabled() {
			tracing::debug!("ignoring input to disabled field {:?}", field);
			return;
		}
		binding.record_input(text);
	}

	/// Applies the exemption checkbox state.
	///
	/// This is the only path that mutates the exemption flag, the national-ID
	/// disabled state, and the toggle's visual state; the three always move
	/// together.
	pub fn handle_exemption_toggle(&mut self, checked: bool) {
		self.national_id.set_value("");
		self.national_id.disable_input(checked);
		self.toggle.set_checked(checked);
		self.exempt = checked;
	}

	/// Runs one submission attempt.
	pub async fn handle_submit(&mut self) -> FormResult<SubmitOutcome> {
		if self.phase == SubmitPhase::Submitting {
			tracing::warn!("submission already in flight, ignoring trigger");
			return Ok(SubmitOutcome::InFlight);
		}

		self.clear_validation();

		let report = self.evaluate();
		if !report.all_passed() {
			tracing::warn!("submission rejected by validation: {:?}", report);
			self.show_validation(&report);
			return Ok(SubmitOutcome::Rejected(report));
		}

		let record = self.build_record();
		self.phase = SubmitPhase::Submitting;
		let result = self.backend.submit(&record).await;
		self.phase = SubmitPhase::Idle;

		match result {
			Ok(reply) => {
				tracing::info!("submission accepted by collector");
				Ok(SubmitOutcome::Accepted(reply))
			}
			// Field state is left untouched so the user can retry.
			Err(e) => Err(FormError::Transport(e)),
		}
	}

	/// Routes one event to its handler.
	pub async fn dispatch(&mut self, event: FormEvent) -> FormResult<Option<SubmitOutcome>> {
		match event {
			FormEvent::Input { field, text } => {
				self.handle_input(field, &text);
				Ok(None)
			}
			FormEvent::ExemptionToggled { checked } => {
				self.handle_exemption_toggle(checked);
				Ok(None)
			}
			FormEvent::SubmitClicked => self.handle_submit().await.map(Some),
		}
	}

	fn clear_validation(&mut self) {
		for field in FieldId::ALL {
			self.binding_mut(field).clear_validation();
		}
	}

	fn evaluate(&self) -> ValidationReport {
		let phone = if self.phone.value().is_empty() {
			RuleOutcome::Skipped
		} else {
			RuleOutcome::from_result(self.phone_rule.validate(self.phone.value()))
		};

		let national_id = if self.exempt {
			RuleOutcome::Skipped
		} else {
			RuleOutcome::from_result(self.national_id_rule.validate(self.national_id.value()))
		};

		ValidationReport {
			name: RuleOutcome::from_result(self.name_rule.validate(self.name.value())),
			email: RuleOutcome::from_result(self.email_rule.validate(self.email.value())),
			phone,
			national_id,
			postal_code: RuleOutcome::from_result(
				self.postal_code_rule.validate(self.postal_code.value()),
			),
		}
	}

	fn show_validation(&mut self, report: &ValidationReport) {
		for field in FieldId::ALL {
			let mark = match report.outcome(field) {
				RuleOutcome::Passed => ValidityMark::Valid,
				RuleOutcome::Failed => ValidityMark::Invalid,
				// Skipped fields keep the neutral mark from the clearing pass
				RuleOutcome::Skipped => continue,
			};
			self.binding_mut(field).set_validity(mark);
		}
	}

	fn build_record(&self) -> SubmissionRecord {
		SubmissionRecord {
			name: self.name.value().to_string(),
			email: self.email.value().to_string(),
			phone: self.phone.value().to_string(),
			national_id: self.national_id.value().to_string(),
			postal_code: self.postal_code.value().to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::transport::{MemoryBackend, TransportResult};
	use async_trait::async_trait;

	fn filled_form(backend: Box<dyn SubmissionBackend>) -> ContactForm {
		let mut form = ContactForm::new(FormControls::in_memory(), backend);
		form.handle_input(FieldId::Name, "Jan");
		form.handle_input(FieldId::Email, "jan@example.com");
		form.handle_input(FieldId::Phone, "123 456 789");
		form.handle_input(FieldId::NationalId, "12345678901");
		form.handle_input(FieldId::PostalCode, "00-950");
		form
	}

	#[tokio::test]
	async fn test_submit_passes_and_invokes_backend_once() {
		let backend = MemoryBackend::new();
		let mut form = filled_form(Box::new(backend.clone()));

		let outcome = form.handle_submit().await.unwrap();

		assert!(matches!(outcome, SubmitOutcome::Accepted(_)));
		assert_eq!(backend.count(), 1);
		assert_eq!(backend.submitted()[0].name, "Jan");
		assert_eq!(form.phase(), SubmitPhase::Idle);
	}

	#[tokio::test]
	async fn test_submit_success_applies_no_markers() {
		let backend = MemoryBackend::new();
		let mut form = filled_form(Box::new(backend));

		form.handle_submit().await.unwrap();

		for field in FieldId::ALL {
			assert_eq!(form.binding(field).mark(), ValidityMark::Neutral);
		}
	}

	#[tokio::test]
	async fn test_submit_rejects_and_marks_fields() {
		let backend = MemoryBackend::new();
		let mut form = filled_form(Box::new(backend.clone()));
		form.handle_input(FieldId::PostalCode, "abc");

		let outcome = form.handle_submit().await.unwrap();

		match outcome {
			SubmitOutcome::Rejected(report) => {
				assert_eq!(report.postal_code, RuleOutcome::Failed);
				assert_eq!(report.name, RuleOutcome::Passed);
			}
			other => panic!("Expected Rejected, got {:?}", other),
		}
		assert_eq!(backend.count(), 0);
		assert_eq!(form.binding(FieldId::PostalCode).mark(), ValidityMark::Invalid);
		assert_eq!(form.binding(FieldId::Name).mark(), ValidityMark::Valid);
	}

	#[tokio::test]
	async fn test_empty_phone_is_skipped_and_unmarked() {
		let backend = MemoryBackend::new();
		let mut form = filled_form(Box::new(backend));
		form.handle_input(FieldId::Phone, "");
		form.handle_input(FieldId::PostalCode, "bad");

		let outcome = form.handle_submit().await.unwrap();

		match outcome {
			SubmitOutcome::Rejected(report) => {
				assert_eq!(report.phone, RuleOutcome::Skipped);
			}
			other => panic!("Expected Rejected, got {:?}", other),
		}
		assert_eq!(form.binding(FieldId::Phone).mark(), ValidityMark::Neutral);
	}

	#[tokio::test]
	async fn test_bad_phone_fails_and_is_marked() {
		let backend = MemoryBackend::new();
		let mut form = filled_form(Box::new(backend.clone()));
		form.handle_input(FieldId::Phone, "123 45 6789");

		let outcome = form.handle_submit().await.unwrap();

		assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
		assert_eq!(backend.count(), 0);
		assert_eq!(form.binding(FieldId::Phone).mark(), ValidityMark::Invalid);
	}

	#[tokio::test]
	async fn test_exemption_skips_national_id_rule() {
		let backend = MemoryBackend::new();
		let mut form = filled_form(Box::new(backend.clone()));
		form.handle_exemption_toggle(true);

		// The exemption cleared the tracked value; the rule would fail it
		let outcome = form.handle_submit().await.unwrap();

		assert!(matches!(outcome, SubmitOutcome::Accepted(_)));
		assert_eq!(backend.count(), 1);
		assert_eq!(backend.submitted()[0].national_id, "");
	}

	#[tokio::test]
	async fn test_exemption_toggle_lockstep() {
		let backend = MemoryBackend::new();
		let mut form = filled_form(Box::new(backend));

		form.handle_exemption_toggle(true);
		assert!(form.is_exempt());
		assert!(form.binding(FieldId::NationalId).is_disabled());
		assert_eq!(form.binding(FieldId::NationalId).value(), "");

		form.handle_exemption_toggle(false);
		assert!(!form.is_exempt());
		assert!(!form.binding(FieldId::NationalId).is_disabled());
		// Value stays empty until the user types again
		assert_eq!(form.binding(FieldId::NationalId).value(), "");
	}

	#[tokio::test]
	async fn test_input_to_disabled_field_is_ignored() {
		let backend = MemoryBackend::new();
		let mut form = filled_form(Box::new(backend));

		form.handle_exemption_toggle(true);
		form.handle_input(FieldId::NationalId, "99999999999");

		assert_eq!(form.binding(FieldId::NationalId).value(), "");
	}

	#[tokio::test]
	async fn test_submit_while_in_flight_is_rejected() {
		let backend = MemoryBackend::new();
		let mut form = filled_form(Box::new(backend.clone()));

		form.phase = SubmitPhase::Submitting;
		let outcome = form.handle_submit().await.unwrap();

		assert_eq!(outcome, SubmitOutcome::InFlight);
		assert_eq!(backend.count(), 0);
	}

	struct FailingBackend;

	#[async_trait]
	impl SubmissionBackend for FailingBackend {
		async fn submit(&self, _record: &SubmissionRecord) -> TransportResult<serde_json::Value> {
			Err(TransportError::Request("connection refused".to_string()))
		}
	}

	#[tokio::test]
	async fn test_transport_failure_keeps_state_actionable() {
		let mut form = filled_form(Box::new(FailingBackend));

		let result = form.handle_submit().await;

		assert!(matches!(result, Err(FormError::Transport(_))));
		// The form returns to Idle with all values intact for a retry
		assert_eq!(form.phase(), SubmitPhase::Idle);
		assert_eq!(form.binding(FieldId::Name).value(), "Jan");
		assert_eq!(form.binding(FieldId::PostalCode).value(), "00-950");
	}

	#[tokio::test]
	async fn test_resubmission_after_fix_clears_stale_marks() {
		let backend = MemoryBackend::new();
		let mut form = filled_form(Box::new(backend.clone()));
		form.handle_input(FieldId::PostalCode, "bad");

		form.handle_submit().await.unwrap();
		assert_eq!(form.binding(FieldId::PostalCode).mark(), ValidityMark::Invalid);

		form.handle_input(FieldId::PostalCode, "00-950");
		let outcome = form.handle_submit().await.unwrap();

		assert!(matches!(outcome, SubmitOutcome::Accepted(_)));
		assert_eq!(form.binding(FieldId::PostalCode).mark(), ValidityMark::Neutral);
		assert_eq!(form.binding(FieldId::Name).mark(), ValidityMark::Neutral);
	}

	#[tokio::test]
	async fn test_dispatch_routes_events() {
		let backend = MemoryBackend::new();
		let mut form = ContactForm::new(FormControls::in_memory(), Box::new(backend.clone()));

		form.dispatch(FormEvent::Input {
			field: FieldId::Name,
			text: "Jan".to_string(),
		})
		.await
		.unwrap();
		form.dispatch(FormEvent::Input {
			field: FieldId::Email,
			text: "jan@example.com".to_string(),
		})
		.await
		.unwrap();
		form.dispatch(FormEvent::ExemptionToggled { checked: true })
			.await
			.unwrap();
		form.dispatch(FormEvent::Input {
			field: FieldId::PostalCode,
			text: "00-950".to_string(),
		})
		.await
		.unwrap();

		let outcome = form.dispatch(FormEvent::SubmitClicked).await.unwrap();

		assert!(matches!(outcome, Some(SubmitOutcome::Accepted(_))));
		assert_eq!(backend.count(), 1);
	}

	#[test]
	fn test_report_all_passed_treats_skipped_as_passing() {
		let report = ValidationReport {
			name: RuleOutcome::Passed,
			email: RuleOutcome::Passed,
			phone: RuleOutcome::Skipped,
			national_id: RuleOutcome::Skipped,
			postal_code: RuleOutcome::Passed,
		};
		assert!(report.all_passed());

		let failing = ValidationReport {
			postal_code: RuleOutcome::Failed,
			..report
		};
		assert!(!failing.all_passed());
	}

	#[test]
	fn test_untouched_fields_read_as_empty() {
		let backend = MemoryBackend::new();
		let mut form = ContactForm::new(FormControls::in_memory(), Box::new(backend));

		// Only fields the user actually edited satisfy their rules
		form.handle_input(FieldId::Name, "Jan");
		let report = form.evaluate();
		assert_eq!(report.name, RuleOutcome::Passed);
		assert_eq!(report.email, RuleOutcome::Failed);
	}
}
