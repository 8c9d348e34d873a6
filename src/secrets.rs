//! Secret retrieval contracts and built-in store backends.

pub mod env;
pub mod memory;

pub use env::EnvSecretStore;
pub use memory::MemorySecretStore;

// self
use crate::_prelude::*;

/// Future type returned by [`SecretStore`] operations.
pub type SecretFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, RetrievalError>> + 'a + Send>>;

/// Retrieval contract implemented by secret store backends.
///
/// Handles are injected into the relay as `Arc<dyn SecretStore>` so the embedding
/// application chooses the backing service; the relay never constructs a process-global
/// client. Secrets are fetched fresh on every invocation and never cached inside the
/// relay. Implementations must not log secret values.
pub trait SecretStore
where
	Self: Send + Sync,
{
	/// Fetches the named secret, failing when it is absent or empty.
	fn fetch<'a>(&'a self, name: &'a str) -> SecretFuture<'a, String>;
}

/// Error type produced by [`SecretStore`] implementations and credential decoding.
#[derive(Debug, ThisError)]
pub enum RetrievalError {
	/// No secret exists under the requested name.
	#[error("Secret `{name}` was not found.")]
	NotFound {
		/// Requested secret name.
		name: String,
	},
	/// The secret exists but holds no usable value.
	#[error("Secret `{name}` is empty.")]
	Empty {
		/// Requested secret name.
		name: String,
	},
	/// Backend-level failure for the secret service.
	#[error("Secret backend failure for `{name}`: {message}.")]
	Backend {
		/// Requested secret name.
		name: String,
		/// Human-readable error payload.
		message: String,
	},
	/// The credentials secret did not decode into the expected JSON shape.
	#[error("Secret `{name}` does not match the expected credential shape.")]
	Malformed {
		/// Requested secret name.
		name: String,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
	},
}

/// Rejects empty or whitespace-only secret values.
pub(crate) fn reject_empty(name: &str, value: String) -> Result<String, RetrievalError> {
	if value.trim().is_empty() {
		return Err(RetrievalError::Empty { name: name.to_owned() });
	}

	Ok(value)
}
