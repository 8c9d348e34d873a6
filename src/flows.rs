//! Relay orchestration: webhook handling and the staged intake pipeline.

pub mod jwt_bearer;
pub mod submit;

pub use jwt_bearer::*;

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	config::RelayConfig,
	crm::{LeadRecord, SubmissionReceipt},
	http::RelayHttpClient,
	intake::{ClientData, FormSubmission, FormSubmissionEvent},
	obs::{self, StageKind, StageOutcome, StageSpan},
	secrets::SecretStore,
};

/// Coordinates one webhook invocation end to end.
///
/// The relay owns the secret store handle, HTTP client, and validated configuration so
/// the staged operations stay free of wiring concerns. Invocations are stateless and
/// sequential: secrets are fetched fresh every time and, unless the token cache is
/// enabled, so is the bearer token. There is no retry layer; every failure propagates
/// to the triggering infrastructure.
#[derive(Clone)]
pub struct Relay {
	/// Secret store handle injected by the embedding application.
	pub secret_store: Arc<dyn SecretStore>,
	/// HTTP client wrapper used for every outbound request.
	pub http_client: RelayHttpClient,
	/// Validated relay configuration.
	pub config: RelayConfig,
	pub(crate) token_cache: Arc<Mutex<Option<CachedToken>>>,
	pub(crate) exchange_guard: Arc<AsyncMutex<()>>,
}
impl Relay {
	/// Creates a relay with the crate's default reqwest transport.
	pub fn new(secret_store: Arc<dyn SecretStore>, config: RelayConfig) -> Self {
		Self::with_http_client(secret_store, config, RelayHttpClient::default())
	}

	/// Creates a relay that reuses a caller-provided transport.
	pub fn with_http_client(
		secret_store: Arc<dyn SecretStore>,
		config: RelayConfig,
		http_client: RelayHttpClient,
	) -> Self {
		Self {
			secret_store,
			http_client,
			config,
			token_cache: Default::default(),
			exchange_guard: Default::default(),
		}
	}

	/// Handles one raw webhook body and produces the success response.
	///
	/// Failures propagate unchanged; the triggering layer decides how to surface them.
	pub async fn handle(&self, body: &Value) -> Result<WebhookResponse> {
		let event = FormSubmissionEvent::from_value(body)?;
		let receipt = self.process(&event).await?;

		Ok(WebhookResponse::success(&receipt))
	}

	/// Runs the staged pipeline for one decoded event.
	///
	/// Field extraction runs first so a malformed submission never reaches the network;
	/// the secret fetch, token exchange, and lead POST follow in order.
	pub async fn process(&self, event: &FormSubmissionEvent) -> Result<SubmissionReceipt> {
		let client_data = self.extract(&event.submission)?;
		let lead = LeadRecord::from_client_data(&client_data);
		let credentials = self.fetch_credentials().await?;
		let token = self.bearer_token(&credentials).await?;

		self.create_lead(&token, &lead).await
	}

	/// Extracts the applicant record from the submission.
	pub fn extract(&self, submission: &FormSubmission) -> Result<ClientData> {
		const KIND: StageKind = StageKind::FieldExtraction;

		let _guard = StageSpan::new(KIND, "extract").entered();

		obs::record_stage_outcome(KIND, StageOutcome::Attempt);

		finish_stage(KIND, ClientData::from_submission(submission))
	}
}
impl Debug for Relay {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Relay").field("config", &self.config).finish()
	}
}

/// Cached bearer token plus the instant its cache window closes.
#[derive(Clone)]
pub(crate) struct CachedToken {
	pub token: AccessToken,
	pub expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Returns `true` once the cache window has elapsed.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant >= self.expires_at
	}
}

/// Records the final outcome labels for a stage and logs failures.
pub(crate) fn finish_stage<T>(kind: StageKind, result: Result<T>) -> Result<T> {
	match &result {
		Ok(_) => obs::record_stage_outcome(kind, StageOutcome::Success),
		Err(err) => {
			obs::record_stage_outcome(kind, StageOutcome::Failure);
			obs::log_stage_failure(kind, err);
		},
	}

	result
}

/// Webhook-layer response produced after a successful invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResponse {
	/// HTTP status code for the triggering layer.
	#[serde(rename = "statusCode")]
	pub status_code: u16,
	/// JSON-encoded response body.
	pub body: String,
}
impl WebhookResponse {
	/// Builds the canonical success response for a completed submission.
	pub fn success(receipt: &SubmissionReceipt) -> Self {
		let body = serde_json::to_string(receipt.message())
			.expect("Success message is a plain string and always serializes.");

		Self { status_code: 200, body }
	}
}
