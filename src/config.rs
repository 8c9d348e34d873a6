//! Relay configuration and validation.

// self
use crate::_prelude::*;

/// Default CRM REST API version used for lead creation.
pub const DEFAULT_API_VERSION: &str = "v61.0";

/// Errors raised while constructing or validating relay configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum ConfigError {
	/// Credentials secret name is required.
	#[error("Missing credentials secret name.")]
	MissingCredentialsSecret,
	/// Signing-key secret name is required.
	#[error("Missing signing-key secret name.")]
	MissingSigningKeySecret,
	/// API version must look like `v<major>.<minor>`.
	#[error("API version `{value}` must look like `v61.0`.")]
	InvalidApiVersion {
		/// Rejected version string.
		value: String,
	},
	/// Non-loopback endpoints must use HTTPS.
	#[error("The {endpoint} URL must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// URL that failed validation.
		url: String,
	},
}

/// Validated relay configuration consumed by the flows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayConfig {
	/// Secret name holding the JSON credentials blob.
	pub credentials_secret: String,
	/// Secret name holding the PEM signing key.
	pub signing_key_secret: String,
	/// CRM REST API version segment, e.g. `v61.0`.
	pub api_version: String,
	/// Optional in-process token cache TTL; `None` exchanges on every invocation.
	pub token_cache: Option<Duration>,
}
impl RelayConfig {
	/// Creates a new builder.
	pub fn builder() -> RelayConfigBuilder {
		RelayConfigBuilder::default()
	}
}

/// Builder for [`RelayConfig`] values.
#[derive(Clone, Debug, Default)]
pub struct RelayConfigBuilder {
	credentials_secret: Option<String>,
	signing_key_secret: Option<String>,
	api_version: Option<String>,
	token_cache: Option<Duration>,
}
impl RelayConfigBuilder {
	/// Sets the secret name holding the JSON credentials blob.
	pub fn credentials_secret(mut self, name: impl Into<String>) -> Self {
		self.credentials_secret = Some(name.into());

		self
	}

	/// Sets the secret name holding the PEM signing key.
	pub fn signing_key_secret(mut self, name: impl Into<String>) -> Self {
		self.signing_key_secret = Some(name.into());

		self
	}

	/// Overrides the CRM REST API version (defaults to [`DEFAULT_API_VERSION`]).
	pub fn api_version(mut self, version: impl Into<String>) -> Self {
		self.api_version = Some(version.into());

		self
	}

	/// Enables the in-process token cache with the provided TTL.
	pub fn token_cache(mut self, ttl: Duration) -> Self {
		self.token_cache = if ttl.is_positive() { Some(ttl) } else { None };

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<RelayConfig, ConfigError> {
		let credentials_secret =
			non_empty(self.credentials_secret).ok_or(ConfigError::MissingCredentialsSecret)?;
		let signing_key_secret =
			non_empty(self.signing_key_secret).ok_or(ConfigError::MissingSigningKeySecret)?;
		let api_version = self.api_version.unwrap_or_else(|| DEFAULT_API_VERSION.to_owned());

		validate_api_version(&api_version)?;

		Ok(RelayConfig {
			credentials_secret,
			signing_key_secret,
			api_version,
			token_cache: self.token_cache,
		})
	}
}

fn non_empty(value: Option<String>) -> Option<String> {
	value.filter(|name| !name.trim().is_empty())
}

fn validate_api_version(value: &str) -> Result<(), ConfigError> {
	let invalid = || ConfigError::InvalidApiVersion { value: value.to_owned() };
	let rest = value.strip_prefix('v').ok_or_else(invalid)?;
	let (major, minor) = rest.split_once('.').ok_or_else(invalid)?;
	let numeric = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

	if !numeric(major) || !numeric(minor) {
		return Err(invalid());
	}

	Ok(())
}

/// Enforces the endpoint scheme policy: HTTPS everywhere except loopback hosts.
///
/// Loopback hosts stay exempt so local development and mock-server tests run without
/// TLS; any other plain-HTTP endpoint fails before a request is made.
pub(crate) fn validate_endpoint(endpoint: &'static str, url: &Url) -> Result<(), ConfigError> {
	if url.scheme() == "https" || is_loopback(url) {
		return Ok(());
	}

	Err(ConfigError::InsecureEndpoint { endpoint, url: url.to_string() })
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(url::Host::Domain(domain)) => domain == "localhost",
		Some(url::Host::Ipv4(address)) => address.is_loopback(),
		Some(url::Host::Ipv6(address)) => address.is_loopback(),
		None => false,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn builder() -> RelayConfigBuilder {
		RelayConfig::builder()
			.credentials_secret("crm/api-credentials")
			.signing_key_secret("crm/jwt-signing-key")
	}

	#[test]
	fn builder_applies_defaults() {
		let config = builder().build().expect("Minimal configuration should build.");

		assert_eq!(config.api_version, DEFAULT_API_VERSION);
		assert_eq!(config.token_cache, None);
	}

	#[test]
	fn builder_rejects_missing_secret_names() {
		let err = RelayConfig::builder()
			.signing_key_secret("crm/jwt-signing-key")
			.build()
			.expect_err("Missing credentials secret name should be rejected.");

		assert_eq!(err, ConfigError::MissingCredentialsSecret);

		let err = RelayConfig::builder()
			.credentials_secret("crm/api-credentials")
			.signing_key_secret("   ")
			.build()
			.expect_err("Blank signing-key secret name should be rejected.");

		assert_eq!(err, ConfigError::MissingSigningKeySecret);
	}

	#[test]
	fn builder_validates_api_versions() {
		for version in ["v61.0", "v58.0", "v100.2"] {
			builder()
				.api_version(version)
				.build()
				.unwrap_or_else(|_| panic!("Version `{version}` should be accepted."));
		}
		for version in ["61.0", "v61", "v.0", "vabc.0", "v61.x", ""] {
			let err = builder()
				.api_version(version)
				.build()
				.expect_err("Malformed version should be rejected.");

			assert!(matches!(err, ConfigError::InvalidApiVersion { .. }));
		}
	}

	#[test]
	fn non_positive_cache_ttls_disable_the_cache() {
		let config = builder()
			.token_cache(Duration::seconds(-5))
			.build()
			.expect("Configuration with a negative TTL should still build.");

		assert_eq!(config.token_cache, None);

		let config = builder()
			.token_cache(Duration::seconds(120))
			.build()
			.expect("Configuration with a positive TTL should build.");

		assert_eq!(config.token_cache, Some(Duration::seconds(120)));
	}

	#[test]
	fn endpoint_policy_requires_https_off_loopback() {
		let secure = Url::parse("https://login.example.com").expect("HTTPS URL should parse.");
		let local = Url::parse("http://127.0.0.1:8080").expect("Loopback URL should parse.");
		let named_local = Url::parse("http://localhost:8080").expect("Localhost URL should parse.");
		let remote = Url::parse("http://login.example.com").expect("HTTP URL should parse.");

		assert!(validate_endpoint("login", &secure).is_ok());
		assert!(validate_endpoint("login", &local).is_ok());
		assert!(validate_endpoint("login", &named_local).is_ok());
		assert!(matches!(
			validate_endpoint("login", &remote),
			Err(ConfigError::InsecureEndpoint { endpoint: "login", .. }),
		));
	}
}
