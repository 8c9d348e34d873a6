//! Bearer token material returned by the token endpoint.

// self
use crate::_prelude::*;

/// Redacted token secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Wire shape of the token endpoint response.
///
/// `instance_url` stays optional here so its absence maps to a dedicated error instead
/// of a decode failure.
#[derive(Debug, Deserialize)]
pub(crate) struct AccessTokenReply {
	pub access_token: String,
	pub instance_url: Option<Url>,
	pub id: Option<String>,
	pub token_type: Option<String>,
}

/// Ephemeral bearer token, valid for one invocation or one cache window.
///
/// Never persisted; the relay re-exchanges on every invocation unless the optional
/// in-process cache is enabled.
#[derive(Clone)]
pub struct AccessToken {
	/// Bearer secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// API host issued for this session; lead submissions target this URL.
	pub instance_url: Url,
	/// Identity URL reported by the token endpoint.
	pub id: Option<String>,
	/// Token type label, normally `Bearer`.
	pub token_type: String,
	/// Instant the exchange completed.
	pub obtained_at: OffsetDateTime,
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &"<redacted>")
			.field("instance_url", &self.instance_url.as_str())
			.field("id", &self.id)
			.field("token_type", &self.token_type)
			.field("obtained_at", &self.obtained_at)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn access_token_debug_redacts_the_secret() {
		let token = AccessToken {
			access_token: TokenSecret::new("00D-session-secret"),
			instance_url: Url::parse("https://example.my.salesforce.com")
				.expect("Instance URL fixture should parse."),
			id: Some("https://login.example.com/id/00D/005".into()),
			token_type: "Bearer".into(),
			obtained_at: OffsetDateTime::UNIX_EPOCH,
		};
		let rendered = format!("{token:?}");

		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains("00D-session-secret"));
	}
}
