//! Transport backends delivering submissions to the remote collector
//!
//! The orchestrator only knows the [`SubmissionBackend`] capability: submit a
//! record, get back the collector's decoded reply or a typed failure.
//! [`HttpBackend`] posts JSON to a configured endpoint; [`MemoryBackend`]
//! stores submissions for tests and development.

use crate::record::SubmissionRecord;
use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

/// Failures at the submission boundary
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
	#[error("collector request failed: {0}")]
	Request(String),
	#[error("collector rejected the submission ({status}): {body}")]
	Rejected { status: u16, body: String },
	#[error("collector reply could not be decoded: {0}")]
	Decode(String),
}

/// Capability surface of the excluded network layer
#[async_trait]
pub trait SubmissionBackend: Send + Sync {
	/// Delivers one record to the collector and returns its decoded reply.
	async fn submit(&self, record: &SubmissionRecord) -> TransportResult<serde_json::Value>;
}

/// HTTP submission backend
///
/// Posts the record as JSON to the configured collector endpoint and decodes
/// the JSON reply.
///
/// # Examples
///
/// ```no_run
/// use formgate::record::SubmissionRecord;
/// use formgate::transport::{HttpBackend, SubmissionBackend};
///
/// #[tokio::main]
/// async fn main() {
///     let backend = HttpBackend::new("https://collector.example.com/submissions");
///
///     let record = SubmissionRecord {
///         name: "Jan".to_string(),
///         email: "jan@example.com".to_string(),
///         phone: String::new(),
///         national_id: String::new(),
///         postal_code: "00-950".to_string(),
///     };
///
///     let reply = backend.submit(&record).await.unwrap();
///     println!("collector replied: {reply}");
/// }
/// ```
pub struct HttpBackend {
	endpoint: String,
	client: Client,
}

impl HttpBackend {
	/// Creates a backend posting to the given endpoint address.
	pub fn new(endpoint: impl Into<String>) -> Self {
		let client = Client::builder()
			.timeout(DEFAULT_TIMEOUT)
			.build()
			.expect("Failed to create HTTP client");

		Self {
			endpoint: endpoint.into(),
			client,
		}
	}

	/// Creates a backend with a caller-supplied client.
	///
	/// # Examples
	///
	/// ```no_run
	/// use formgate::transport::HttpBackend;
	/// use reqwest::Client;
	///
	/// let client = Client::new();
	/// let backend = HttpBackend::with_client("https://collector.example.com/submissions", client);
	/// ```
	pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
		Self {
			endpoint: endpoint.into(),
			client,
		}
	}

	/// Returns the configured endpoint address.
	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}
}

#[async_trait]
impl SubmissionBackend for HttpBackend {
	async fn submit(&self, record: &SubmissionRecord) -> TransportResult<serde_json::Value> {
		let response = self
			.client
			.post(&self.endpoint)
			.header("Content-Type", "application/json")
			.json(record)
			.send()
			.await
			.map_err(|e| TransportError::Request(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			let body = response
				.text()
				.await
				.unwrap_or_else(|_| "Unknown error".to_string());
			tracing::error!("collector rejected submission: {} {}", status, body);
			return Err(TransportError::Rejected {
				status: status.as_u16(),
				body,
			});
		}

		response
			.json::<serde_json::Value>()
			.await
			.map_err(|e| TransportError::Decode(e.to_string()))
	}
}

/// In-memory submission backend
///
/// Stores records without sending them anywhere. Useful for tests and
/// development.
///
/// # Examples
///
/// ```
/// use formgate::record::SubmissionRecord;
/// use formgate::transport::{MemoryBackend, SubmissionBackend};
///
/// #[tokio::main]
/// async fn main() {
///     let backend = MemoryBackend::new();
///
///     let record = SubmissionRecord {
///         name: "Jan".to_string(),
///         email: "jan@example.com".to_string(),
///         phone: String::new(),
///         national_id: String::new(),
///         postal_code: "00-950".to_string(),
///     };
///
///     backend.submit(&record).await.unwrap();
///     assert_eq!(backend.count(), 1);
///     assert_eq!(backend.submitted()[0].name, "Jan");
/// }
/// ```
#[derive(Clone, Default)]
pub struct MemoryBackend {
	records: Arc<RwLock<Vec<SubmissionRecord>>>,
}

impl MemoryBackend {
	pub fn new() -> Self {
		Self {
			records: Arc::new(RwLock::new(Vec::new())),
		}
	}

	/// Returns all records submitted so far.
	pub fn submitted(&self) -> Vec<SubmissionRecord> {
		self.records.read().clone()
	}

	/// Counts submitted records.
	pub fn count(&self) -> usize {
		self.records.read().len()
	}

	/// Clears all stored records.
	pub fn clear(&self) {
		self.records.write().clear();
	}
}

#[async_trait]
impl SubmissionBackend for MemoryBackend {
	async fn submit(&self, record: &SubmissionRecord) -> TransportResult<serde_json::Value> {
		self.records.write().push(record.clone());
		Ok(serde_json::json!({ "status": "stored" }))
	}
}
