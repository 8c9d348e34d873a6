//! Environment-variable secret store for local development.

// std
use std::env;
// self
use crate::secrets::{RetrievalError, SecretFuture, SecretStore, reject_empty};

/// Environment variable prefix applied to every secret name.
const SECRET_PREFIX: &str = "LEAD_RELAY_SECRET_";

/// Environment-backed [`SecretStore`] intended for local development only.
///
/// Secret names map to `LEAD_RELAY_SECRET_*` variables: the name is uppercased and every
/// non-alphanumeric character becomes `_`, so `crm/api-credentials` reads
/// `LEAD_RELAY_SECRET_CRM_API_CREDENTIALS`. Values are visible to the whole process;
/// production deployments inject a managed-store backend instead.
#[derive(Clone, Debug, Default)]
pub struct EnvSecretStore;
impl EnvSecretStore {
	/// Creates a new environment-backed store.
	pub fn new() -> Self {
		Self
	}

	fn variable_for(name: &str) -> String {
		let mut variable = String::with_capacity(SECRET_PREFIX.len() + name.len());

		variable.push_str(SECRET_PREFIX);

		for ch in name.chars() {
			if ch.is_ascii_alphanumeric() {
				variable.push(ch.to_ascii_uppercase());
			} else {
				variable.push('_');
			}
		}

		variable
	}
}
impl SecretStore for EnvSecretStore {
	fn fetch<'a>(&'a self, name: &'a str) -> SecretFuture<'a, String> {
		Box::pin(async move {
			let variable = Self::variable_for(name);
			let value = env::var(&variable)
				.map_err(|_| RetrievalError::NotFound { name: name.to_owned() })?;

			reject_empty(name, value)
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn names_map_to_prefixed_variables() {
		assert_eq!(
			EnvSecretStore::variable_for("crm/api-credentials"),
			"LEAD_RELAY_SECRET_CRM_API_CREDENTIALS",
		);
		assert_eq!(
			EnvSecretStore::variable_for("jwt_signing_key"),
			"LEAD_RELAY_SECRET_JWT_SIGNING_KEY",
		);
	}

	#[tokio::test]
	async fn fetch_reads_from_the_environment() {
		unsafe { env::set_var("LEAD_RELAY_SECRET_ENV_FETCH_TEST", "env-value") };

		let store = EnvSecretStore::new();
		let value = store
			.fetch("env/fetch-test")
			.await
			.expect("Secret exported to the environment should be retrievable.");

		assert_eq!(value, "env-value");

		unsafe { env::remove_var("LEAD_RELAY_SECRET_ENV_FETCH_TEST") };
	}

	#[tokio::test]
	async fn fetch_fails_for_unset_variables() {
		let store = EnvSecretStore::new();
		let result = store.fetch("env/never-set").await;

		assert!(matches!(result, Err(RetrievalError::NotFound { .. })));
	}
}
