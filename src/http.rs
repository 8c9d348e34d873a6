//! Transport primitives shared by the relay flows.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError};

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Outbound calls rely on the wrapped client's default timeouts; there is no retry
/// layer, so a transport failure surfaces directly as a stage error. Configure a custom
/// [`ReqwestClient`] before wrapping it when stricter timeouts are required.
#[derive(Clone, Default)]
pub struct RelayHttpClient(pub ReqwestClient);
impl RelayHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Sends a form-encoded POST and captures the reply status + body.
	pub(crate) async fn post_form(
		&self,
		url: Url,
		form: &[(&str, &str)],
	) -> Result<HttpReply, TransportError> {
		let response = self.0.post(url).form(form).send().await?;

		HttpReply::read(response).await
	}

	/// Sends a bearer-authenticated JSON POST and captures the reply status + body.
	pub(crate) async fn post_json<T>(
		&self,
		url: Url,
		bearer: &str,
		body: &T,
	) -> Result<HttpReply, TransportError>
	where
		T: Serialize + ?Sized,
	{
		let response = self.0.post(url).bearer_auth(bearer).json(body).send().await?;

		HttpReply::read(response).await
	}
}
impl AsRef<ReqwestClient> for RelayHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for RelayHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Captured reply from an outbound call, preserving the status for error mapping.
#[derive(Clone, Debug)]
pub(crate) struct HttpReply {
	pub status: u16,
	pub body: Vec<u8>,
}
impl HttpReply {
	async fn read(response: reqwest::Response) -> Result<Self, TransportError> {
		let status = response.status().as_u16();
		let body = response.bytes().await?.to_vec();

		Ok(Self { status, body })
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns a trimmed text preview of the body for error messages.
	pub fn body_preview(&self) -> String {
		const PREVIEW_LIMIT: usize = 256;

		let text = String::from_utf8_lossy(&self.body);
		let trimmed = text.trim();

		if trimmed.len() <= PREVIEW_LIMIT {
			return trimmed.to_owned();
		}

		let mut end = PREVIEW_LIMIT;

		while !trimmed.is_char_boundary(end) {
			end -= 1;
		}

		format!("{}…", &trimmed[..end])
	}
}
