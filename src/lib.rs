//! Webhook-triggered lead intake relay: extract form answers by question name, run the
//! OAuth 2.0 JWT-bearer exchange, and create CRM lead records in one linear pipeline.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod crm;
pub mod error;
#[cfg(feature = "reqwest")] pub mod flows;
#[cfg(feature = "reqwest")] pub mod http;
pub mod intake;
pub mod obs;
pub mod secrets;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience fixtures and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::RelayConfig, flows::Relay, http::RelayHttpClient, secrets::MemorySecretStore,
	};

	/// Name of the credentials secret used by test relays.
	pub const TEST_CREDENTIALS_SECRET: &str = "crm/api-credentials";
	/// Name of the signing-key secret used by test relays.
	pub const TEST_SIGNING_KEY_SECRET: &str = "crm/jwt-signing-key";
	/// RSA private key (PKCS#8 PEM) used to sign test assertions.
	pub const TEST_SIGNING_KEY_PEM: &str = include_str!("../tests/fixtures/signing_key.pem");
	/// Public half of [`TEST_SIGNING_KEY_PEM`] for verifying test assertions.
	pub const TEST_VERIFYING_KEY_PEM: &str = include_str!("../tests/fixtures/signing_key.pub.pem");

	/// Builds the JSON credentials blob pointing at the provided login URL.
	pub fn test_credentials_json(login_url: &str) -> String {
		serde_json::json!({
			"consumerKey": "3MVG9.test-consumer-key",
			"username": "integration@example.com",
			"loginUrl": login_url,
		})
		.to_string()
	}

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_relay_http_client() -> RelayHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		RelayHttpClient::with_client(client)
	}

	/// Constructs a [`Relay`] backed by an in-memory secret store seeded with the test
	/// credentials and signing key.
	pub fn build_test_relay(login_url: &str, config: RelayConfig) -> (Relay, Arc<MemorySecretStore>) {
		let store_backend = Arc::new(MemorySecretStore::new());

		store_backend.insert(TEST_CREDENTIALS_SECRET, test_credentials_json(login_url));
		store_backend.insert(TEST_SIGNING_KEY_SECRET, TEST_SIGNING_KEY_PEM);

		let store = store_backend.clone();
		let relay = Relay::with_http_client(store, config, test_relay_http_client());

		(relay, store_backend)
	}

	/// Default configuration pointing at the test secret names.
	pub fn test_relay_config() -> RelayConfig {
		RelayConfig::builder()
			.credentials_secret(TEST_CREDENTIALS_SECRET)
			.signing_key_secret(TEST_SIGNING_KEY_SECRET)
			.build()
			.expect("Test relay configuration should be valid.")
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {httpmock as _, lead_relay as _};
