//! Format rules for the personal-data form fields
//!
//! Each rule is a pure validator over the field's current text. Rules have no
//! shared state and no knowledge of the bindings they are applied to; the
//! orchestrator in [`crate::form`] decides which rules run for a given
//! submission attempt.

use regex::Regex;
use std::sync::LazyLock;

/// Result type for validation rules
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation failures, one variant per rule
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
	#[error("name must be between {min} and {max} characters (it has {length})")]
	NameLength { length: usize, min: usize, max: usize },
	#[error("enter a valid email address")]
	Email,
	#[error("enter a phone number such as 123 456 789 or +48 123 456 789")]
	Phone,
	#[error("identity number must be exactly 11 digits")]
	NationalId,
	#[error("enter a postal code such as 00-950")]
	PostalCode,
}

/// Trait for validation rules
pub trait Validator<T: ?Sized> {
	fn validate(&self, value: &T) -> ValidationResult<()>;
}

// Restricted-character-set address pattern. The final domain segment must be
// non-numeric with at least 2 letters.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^[-!#$%&'*+/0-9=?A-Z^_a-z`{|}~](\.?[-!#$%&'*+/0-9=?A-Z^_a-z`{|}~])*@[a-zA-Z0-9](-*\.?[a-zA-Z0-9])*\.[a-zA-Z](-?[a-zA-Z0-9])+$",
	)
	.expect("EMAIL_REGEX: invalid regex pattern")
});

// The six accepted phone layouts: 9 digits in groups of three, optionally
// prefixed by +DD or (DD), with space or hyphen group separators.
static PHONE_PATTERNS: LazyLock<[Regex; 6]> = LazyLock::new(|| {
	[
		r"^\d{3}\s\d{3}\s\d{3}$",
		r"^\d{3}-\d{3}-\d{3}$",
		r"^\+\d{2}\s\d{3}\s\d{3}\s\d{3}$",
		r"^\+\d{2}\s\d{3}-\d{3}-\d{3}$",
		r"^\(\d{2}\)\s\d{3}\s\d{3}\s\d{3}$",
		r"^\(\d{2}\)\s\d{3}-\d{3}-\d{3}$",
	]
	.map(|p| Regex::new(p).expect("PHONE_PATTERNS: invalid regex pattern"))
});

static NATIONAL_ID_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\d{11}$").expect("NATIONAL_ID_REGEX: invalid regex pattern"));

// Two digits, hyphen, three digits.
static POSTAL_CODE_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\d{2}-\d{3}$").expect("POSTAL_CODE_REGEX: invalid regex pattern"));

/// Validates the name field: 1 to 39 characters inclusive.
///
/// Lengths are counted in characters, not bytes, so multi-byte names are
/// measured the way a user perceives them.
///
/// # Examples
///
/// ```
/// use formgate::validators::{NameValidator, Validator};
///
/// let validator = NameValidator::new();
/// assert!(validator.validate("Jan").is_ok());
/// assert!(validator.validate("").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct NameValidator {
	min: usize,
	max: usize,
}

impl NameValidator {
	/// Creates a validator with the form's bounds (1–39 characters).
	pub fn new() -> Self {
		Self { min: 1, max: 39 }
	}
}

impl Default for NameValidator {
	fn default() -> Self {
		Self::new()
	}
}

impl Validator<str> for NameValidator {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		let length = value.chars().count();
		if length >= self.min && length <= self.max {
			Ok(())
		} else {
			Err(ValidationError::NameLength {
				length,
				min: self.min,
				max: self.max,
			})
		}
	}
}

impl Validator<String> for NameValidator {
	fn validate(&self, value: &String) -> ValidationResult<()> {
		Validator::<str>::validate(self, value.as_str())
	}
}

/// Validates the email field.
///
/// The address must split on a single `@` into a local part of at most 64
/// characters and a domain of at most 255 characters, no dot-separated domain
/// label may exceed 63 characters, and the whole string must match the
/// restricted-character-set address pattern. The first failing condition
/// short-circuits.
///
/// # Examples
///
/// ```
/// use formgate::validators::{EmailValidator, Validator};
///
/// let validator = EmailValidator::new();
/// assert!(validator.validate("a@b.co").is_ok());
/// assert!(validator.validate("@b.co").is_err());
/// assert!(validator.validate("a@").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmailValidator;

impl EmailValidator {
	pub fn new() -> Self {
		Self
	}
}

impl Validator<str> for EmailValidator {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		if value.is_empty() {
			return Err(ValidationError::Email);
		}

		let mut parts = value.split('@');
		let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
			(Some(local), Some(domain), None) => (local, domain),
			_ => return Err(ValidationError::Email),
		};

		if local.chars().count() > 64 {
			return Err(ValidationError::Email);
		}
		if domain.chars().count() > 255 {
			return Err(ValidationError::Email);
		}
		if domain.split('.').any(|label| label.chars().count() > 63) {
			return Err(ValidationError::Email);
		}
		if !EMAIL_REGEX.is_match(value) {
			return Err(ValidationError::Email);
		}

		Ok(())
	}
}

impl Validator<String> for EmailValidator {
	fn validate(&self, value: &String) -> ValidationResult<()> {
		Validator::<str>::validate(self, value.as_str())
	}
}

/// Validates the phone field.
///
/// The phone number is optional: the empty string is accepted. A non-empty
/// value must match one of the six accepted layouts.
///
/// # Examples
///
/// ```
/// use formgate::validators::{PhoneValidator, Validator};
///
/// let validator = PhoneValidator::new();
/// assert!(validator.validate("").is_ok());
/// assert!(validator.validate("123 456 789").is_ok());
/// assert!(validator.validate("+48 123-456-789").is_ok());
/// assert!(validator.validate("123 45 6789").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PhoneValidator;

impl PhoneValidator {
	pub fn new() -> Self {
		Self
	}
}

impl Validator<str> for PhoneValidator {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		if value.is_empty() {
			return Ok(());
		}

		if PHONE_PATTERNS.iter().any(|pattern| pattern.is_match(value)) {
			Ok(())
		} else {
			Err(ValidationError::Phone)
		}
	}
}

impl Validator<String> for PhoneValidator {
	fn validate(&self, value: &String) -> ValidationResult<()> {
		Validator::<str>::validate(self, value.as_str())
	}
}

/// Validates the national identity number: exactly 11 digits, nothing else.
///
/// Exemption handling lives in the orchestrator; this rule always evaluates
/// the text it is given.
///
/// # Examples
///
/// ```
/// use formgate::validators::{NationalIdValidator, Validator};
///
/// let validator = NationalIdValidator::new();
/// assert!(validator.validate("12345678901").is_ok());
/// assert!(validator.validate("1234567890").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct NationalIdValidator;

impl NationalIdValidator {
	pub fn new() -> Self {
		Self
	}
}

impl Validator<str> for NationalIdValidator {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		if NATIONAL_ID_REGEX.is_match(value) {
			Ok(())
		} else {
			Err(ValidationError::NationalId)
		}
	}
}

impl Validator<String> for NationalIdValidator {
	fn validate(&self, value: &String) -> ValidationResult<()> {
		Validator::<str>::validate(self, value.as_str())
	}
}

/// Validates the postal code: `DD-DDD`.
///
/// # Examples
///
/// ```
/// use formgate::validators::{PostalCodeValidator, Validator};
///
/// let validator = PostalCodeValidator::new();
/// assert!(validator.validate("00-950").is_ok());
/// assert!(validator.validate("00950").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PostalCodeValidator;

impl PostalCodeValidator {
	pub fn new() -> Self {
		Self
	}
}

impl Validator<str> for PostalCodeValidator {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		if POSTAL_CODE_REGEX.is_match(value) {
			Ok(())
		} else {
			Err(ValidationError::PostalCode)
		}
	}
}

impl Validator<String> for PostalCodeValidator {
	fn validate(&self, value: &String) -> ValidationResult<()> {
		Validator::<str>::validate(self, value.as_str())
	}
}
