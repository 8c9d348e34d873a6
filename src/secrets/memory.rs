//! In-memory secret store used by tests and local development.

// std
use std::collections::HashMap;
// self
use crate::{
	_prelude::*,
	secrets::{RetrievalError, SecretFuture, SecretStore, reject_empty},
};

/// Map-backed [`SecretStore`] for tests and local development.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
	entries: Mutex<HashMap<String, String>>,
}
impl MemorySecretStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces a named secret.
	pub fn insert(&self, name: impl Into<String>, value: impl Into<String>) {
		self.entries.lock().insert(name.into(), value.into());
	}

	/// Removes a named secret, returning the previous value if any.
	pub fn remove(&self, name: &str) -> Option<String> {
		self.entries.lock().remove(name)
	}
}
impl SecretStore for MemorySecretStore {
	fn fetch<'a>(&'a self, name: &'a str) -> SecretFuture<'a, String> {
		Box::pin(async move {
			let value = self
				.entries
				.lock()
				.get(name)
				.cloned()
				.ok_or_else(|| RetrievalError::NotFound { name: name.to_owned() })?;

			reject_empty(name, value)
		})
	}
}
