//! Relay-level error types shared across secrets, intake, and flow stages.
//!
//! Every stage logs a diagnostic and rethrows unchanged: there is no local recovery,
//! no retry, and no partial-success handling anywhere in the pipeline.

// self
use crate::_prelude::*;

/// Relay-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical relay error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Secret retrieval failure.
	#[error("{0}")]
	Retrieval(
		#[from]
		#[source]
		crate::secrets::RetrievalError,
	),
	/// Token exchange failure.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// A required question is absent from the inbound submission.
	#[error(transparent)]
	MissingField(#[from] crate::intake::MissingFieldError),
	/// A state name fell outside the closed lookup table.
	#[error(transparent)]
	UnknownState(#[from] crate::intake::UnknownStateError),
	/// Inbound event payload failed to decode.
	#[error(transparent)]
	Event(#[from] EventError),
	/// Lead creation failure.
	#[error(transparent)]
	Submission(#[from] SubmissionError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] crate::config::ConfigError),
}

/// Token exchange failures raised while assembling or exchanging the signed assertion.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Signing key is not usable RSA private key material.
	#[error("Signing key is not a usable RSA private key.")]
	Key {
		/// Underlying key parsing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Assertion signing failed.
	#[error("Assertion could not be signed.")]
	Sign {
		/// Underlying signing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Token endpoint path could not be joined onto the login URL.
	#[error("Token endpoint path could not be joined onto the login URL.")]
	Endpoint {
		/// Underlying URL joining failure.
		#[source]
		source: url::ParseError,
	},
	/// Transport failure while calling the token endpoint.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token endpoint rejected the exchange.
	#[error("Token endpoint rejected the exchange ({status}): {message}.")]
	Rejected {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// OAuth error description, or a body preview when none was supplied.
		message: String,
	},
	/// Token endpoint returned malformed JSON.
	#[error("Token endpoint returned malformed JSON.")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Token response omitted the instance URL.
	///
	/// The relay fails here instead of falling back to a default host; leads must never
	/// be routed to an instance the token endpoint did not issue.
	#[error("Token response did not include an instance URL.")]
	MissingInstanceUrl,
}

/// Lead submission failures raised while calling the CRM REST endpoint.
#[derive(Debug, ThisError)]
pub enum SubmissionError {
	/// Lead endpoint path could not be joined onto the instance URL.
	#[error("Lead endpoint path could not be joined onto the instance URL.")]
	Endpoint {
		/// Underlying URL joining failure.
		#[source]
		source: url::ParseError,
	},
	/// Transport failure while calling the lead endpoint.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// CRM endpoint rejected the lead record.
	#[error("Lead endpoint rejected the record ({status}): {message}.")]
	Rejected {
		/// HTTP status code returned by the lead endpoint.
		status: u16,
		/// Body preview of the rejection response.
		message: String,
	},
	/// CRM endpoint returned malformed JSON.
	#[error("Lead endpoint returned malformed JSON.")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
}

/// Inbound webhook payloads that do not match the expected submission shape.
#[derive(Debug, ThisError)]
pub enum EventError {
	/// The event envelope failed to decode.
	#[error("Submission payload does not match the expected shape.")]
	Envelope {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
	},
	/// An answer value failed to decode into its expected shape.
	#[error("Answer for question `{name}` does not match the expected shape.")]
	Answer {
		/// Question whose answer failed to decode.
		name: String,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred during the outbound request.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The outbound request timed out.
	#[error("Outbound request timed out.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::Timeout { source: Box::new(e) } } else { Self::network(e) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn retrieval_error_preserves_source() {
		let retrieval = crate::secrets::RetrievalError::NotFound { name: "crm/creds".into() };
		let error: Error = retrieval.into();

		assert!(matches!(error, Error::Retrieval(_)));
		assert!(error.to_string().contains("crm/creds"));
		assert!(StdError::source(&error).is_some());
	}

	#[test]
	fn auth_rejection_carries_status_and_message() {
		let error: Error =
			AuthError::Rejected { status: 400, message: "invalid_grant".into() }.into();

		assert!(matches!(error, Error::Auth(AuthError::Rejected { status: 400, .. })));
		assert!(error.to_string().contains("invalid_grant"));
	}
}
