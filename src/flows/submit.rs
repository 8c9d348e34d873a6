//! Lead creation against the CRM REST endpoint.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	crm::{CreateLeadReply, LeadRecord, SubmissionReceipt},
	error::SubmissionError,
	flows::{Relay, finish_stage},
	http::HttpReply,
	obs::{self, StageKind, StageOutcome, StageSpan},
};

impl Relay {
	/// POSTs the lead payload with bearer auth and returns the receipt.
	///
	/// There is no retry and no idempotency key: a transient failure after a
	/// successful exchange can at worst produce a duplicate lead on manual retry.
	pub async fn create_lead(
		&self,
		token: &AccessToken,
		lead: &LeadRecord,
	) -> Result<SubmissionReceipt> {
		const KIND: StageKind = StageKind::LeadSubmission;

		let span = StageSpan::new(KIND, "create_lead");

		obs::record_stage_outcome(KIND, StageOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = lead_endpoint(&token.instance_url, &self.config.api_version)?;
				let reply = self
					.http_client
					.post_json(url, token.access_token.expose(), lead)
					.await
					.map_err(SubmissionError::from)?;

				if !reply.is_success() {
					return Err(SubmissionError::Rejected {
						status: reply.status,
						message: reply.body_preview(),
					}
					.into());
				}

				let created = decode_create_reply(&reply)?;

				Ok(SubmissionReceipt { lead_id: created.id })
			})
			.await;

		finish_stage(KIND, result)
	}
}

/// Joins the versioned object path onto the instance URL issued by the token endpoint.
fn lead_endpoint(instance_url: &Url, api_version: &str) -> Result<Url, SubmissionError> {
	instance_url
		.join(&format!("/services/data/{api_version}/sobjects/Lead"))
		.map_err(|source| SubmissionError::Endpoint { source })
}

fn decode_create_reply(reply: &HttpReply) -> Result<CreateLeadReply> {
	let mut deserializer = serde_json::Deserializer::from_slice(&reply.body);
	let decoded = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| SubmissionError::ResponseParse { source, status: reply.status })?;

	Ok(decoded)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn lead_endpoint_joins_the_versioned_object_path() {
		let instance = Url::parse("https://example.my.salesforce.com")
			.expect("Instance URL fixture should parse.");
		let url = lead_endpoint(&instance, "v61.0")
			.expect("Lead endpoint should join onto the instance URL.");

		assert_eq!(
			url.as_str(),
			"https://example.my.salesforce.com/services/data/v61.0/sobjects/Lead",
		);
	}

	#[test]
	fn lead_endpoint_replaces_any_instance_path() {
		let instance = Url::parse("https://example.my.salesforce.com/existing/path")
			.expect("Instance URL fixture should parse.");
		let url = lead_endpoint(&instance, "v58.0")
			.expect("Lead endpoint should join onto the instance URL.");

		assert_eq!(
			url.as_str(),
			"https://example.my.salesforce.com/services/data/v58.0/sobjects/Lead",
		);
	}

	#[test]
	fn create_replies_decode_with_and_without_ids() {
		let with_id = HttpReply {
			status: 201,
			body: b"{\"id\":\"00Q000000000001AAA\",\"success\":true,\"errors\":[]}".to_vec(),
		};
		let decoded =
			decode_create_reply(&with_id).expect("Reply with an id should decode.");

		assert_eq!(decoded.id.as_deref(), Some("00Q000000000001AAA"));

		let without_id = HttpReply { status: 201, body: b"{\"success\":true}".to_vec() };
		let decoded =
			decode_create_reply(&without_id).expect("Reply without an id should decode.");

		assert_eq!(decoded.id, None);

		let malformed = HttpReply { status: 201, body: b"created".to_vec() };
		let err = decode_create_reply(&malformed)
			.expect_err("Non-JSON reply should fail decoding.");

		assert!(matches!(
			err,
			Error::Submission(SubmissionError::ResponseParse { status: 201, .. }),
		));
	}
}
