//! The payload sent to the remote collector

use serde::{Deserialize, Serialize};

/// Aggregated field values for one submission
///
/// Built from the five bindings at the moment all active validations pass,
/// and never mutated afterwards. The national-ID value is carried verbatim
/// even when its validation was skipped by an active exemption.
///
/// # Examples
///
/// ```
/// use formgate::record::SubmissionRecord;
///
/// let record = SubmissionRecord {
///     name: "Jan".to_string(),
///     email: "jan@example.com".to_string(),
///     phone: String::new(),
///     national_id: String::new(),
///     postal_code: "00-950".to_string(),
/// };
///
/// let json = serde_json::to_value(&record).unwrap();
/// assert_eq!(json["name"], "Jan");
/// assert_eq!(json["postal_code"], "00-950");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
	pub name: String,
	pub email: String,
	pub phone: String,
	pub national_id: String,
	pub postal_code: String,
}
