//! JWT-bearer exchange: credential retrieval, assertion signing, and the token
//! endpoint call.
//!
//! The relay builds an RS256-signed assertion (issuer = consumer key, subject =
//! username, audience = login URL) and trades it for a bearer token at
//! `{loginUrl}/services/oauth2/token`. With the optional token cache enabled, a
//! still-fresh token is reused and concurrent exchanges collapse onto a single
//! in-flight request; the default remains one exchange per invocation.

// crates.io
use jsonwebtoken::{Algorithm, EncodingKey, Header};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AccessTokenReply, Credentials, CredentialsBlob, SigningKey, TokenSecret},
	config,
	error::AuthError,
	flows::{CachedToken, Relay, finish_stage},
	http::HttpReply,
	obs::{self, StageKind, StageOutcome, StageSpan},
	secrets::RetrievalError,
};

/// JWT-bearer grant type identifier sent to the token endpoint.
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
/// Token endpoint path appended to the login URL.
pub const TOKEN_ENDPOINT_PATH: &str = "/services/oauth2/token";
/// Assertion lifetime; `exp` is always `iat` plus this window.
pub const ASSERTION_TTL: Duration = Duration::seconds(180);

/// Claims carried by the signed assertion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
	/// Issuer: the OAuth consumer key.
	pub iss: String,
	/// Subject: the integration username.
	pub sub: String,
	/// Audience: the identity-provider login URL.
	pub aud: String,
	/// Issued-at, seconds since the Unix epoch.
	pub iat: i64,
	/// Expiry, always `iat` plus [`ASSERTION_TTL`].
	pub exp: i64,
}
impl AssertionClaims {
	/// Builds claims for the provided credentials at the given instant.
	pub fn at(credentials: &Credentials, now: OffsetDateTime) -> Self {
		let iat = now.unix_timestamp();

		Self {
			iss: credentials.consumer_key.clone(),
			sub: credentials.username.clone(),
			aud: credentials.login_url.to_string(),
			iat,
			exp: iat + ASSERTION_TTL.whole_seconds(),
		}
	}
}

impl Relay {
	/// Fetches and decodes the two credential secrets.
	///
	/// The credentials blob and the signing key are retrieved fresh on every call;
	/// nothing is cached between invocations.
	pub async fn fetch_credentials(&self) -> Result<Credentials> {
		const KIND: StageKind = StageKind::SecretFetch;

		let span = StageSpan::new(KIND, "fetch_credentials");

		obs::record_stage_outcome(KIND, StageOutcome::Attempt);

		let result = span
			.instrument(async move {
				let blob_name = self.config.credentials_secret.as_str();
				let raw_blob = self.secret_store.fetch(blob_name).await?;
				let raw_key = self.secret_store.fetch(&self.config.signing_key_secret).await?;
				let mut deserializer = serde_json::Deserializer::from_str(&raw_blob);
				let blob: CredentialsBlob = serde_path_to_error::deserialize(&mut deserializer)
					.map_err(|source| RetrievalError::Malformed {
						name: blob_name.to_owned(),
						source,
					})?;

				config::validate_endpoint("login", &blob.login_url)?;

				Ok(Credentials {
					consumer_key: blob.consumer_key,
					username: blob.username,
					login_url: blob.login_url,
					signing_key: SigningKey::from_stored(&raw_key),
				})
			})
			.await;

		finish_stage(KIND, result)
	}

	/// Exchanges a signed assertion for a bearer token.
	pub async fn bearer_token(&self, credentials: &Credentials) -> Result<AccessToken> {
		const KIND: StageKind = StageKind::TokenExchange;

		let span = StageSpan::new(KIND, "bearer_token");

		obs::record_stage_outcome(KIND, StageOutcome::Attempt);

		let result = span
			.instrument(async move {
				let Some(ttl) = self.config.token_cache else {
					return self.exchange(credentials).await;
				};
				let _singleflight = self.exchange_guard.lock().await;
				let now = OffsetDateTime::now_utc();

				if let Some(cached) = self
					.token_cache
					.lock()
					.clone()
					.filter(|cached| !cached.is_expired_at(now))
				{
					return Ok(cached.token);
				}

				let token = self.exchange(credentials).await?;

				*self.token_cache.lock() = Some(CachedToken {
					token: token.clone(),
					expires_at: token.obtained_at + ttl,
				});

				Ok(token)
			})
			.await;

		finish_stage(KIND, result)
	}

	async fn exchange(&self, credentials: &Credentials) -> Result<AccessToken> {
		let assertion = sign_assertion(credentials, OffsetDateTime::now_utc())?;
		let token_url = credentials
			.login_url
			.join(TOKEN_ENDPOINT_PATH)
			.map_err(|source| AuthError::Endpoint { source })?;
		let form = [("grant_type", JWT_BEARER_GRANT_TYPE), ("assertion", assertion.as_str())];
		let reply =
			self.http_client.post_form(token_url, &form).await.map_err(AuthError::from)?;

		if !reply.is_success() {
			return Err(AuthError::Rejected {
				status: reply.status,
				message: oauth_error_message(&reply),
			}
			.into());
		}

		let token_reply = decode_token_reply(&reply)?;
		let instance_url = token_reply.instance_url.ok_or(AuthError::MissingInstanceUrl)?;

		Ok(AccessToken {
			access_token: TokenSecret::new(token_reply.access_token),
			instance_url,
			id: token_reply.id,
			token_type: token_reply.token_type.unwrap_or_else(|| "Bearer".to_owned()),
			obtained_at: OffsetDateTime::now_utc(),
		})
	}
}

/// Signs the assertion claims with the credentials' RS256 key.
pub(crate) fn sign_assertion(
	credentials: &Credentials,
	now: OffsetDateTime,
) -> Result<String> {
	let claims = AssertionClaims::at(credentials, now);
	let key = EncodingKey::from_rsa_pem(credentials.signing_key.expose().as_bytes())
		.map_err(|source| AuthError::Key { source })?;
	let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
		.map_err(|source| AuthError::Sign { source })?;

	Ok(assertion)
}

#[derive(Debug, Deserialize)]
struct OAuthErrorBody {
	error: Option<String>,
	error_description: Option<String>,
}

/// Prefers the OAuth error description, then the error code, then a body preview.
fn oauth_error_message(reply: &HttpReply) -> String {
	if let Ok(body) = serde_json::from_slice::<OAuthErrorBody>(&reply.body) {
		if let Some(description) = body.error_description {
			return description;
		}
		if let Some(error) = body.error {
			return error;
		}
	}

	reply.body_preview()
}

fn decode_token_reply(reply: &HttpReply) -> Result<AccessTokenReply> {
	let mut deserializer = serde_json::Deserializer::from_slice(&reply.body);
	let decoded = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| AuthError::ResponseParse { source, status: reply.status })?;

	Ok(decoded)
}
