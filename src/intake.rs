//! Inbound form-submission decoding and field extraction.
//!
//! Answers are addressed by human-readable question name. Lookup is by exact string
//! match and the first match wins; no trimming or case folding is applied. Extraction
//! runs entirely offline, so a malformed submission fails the invocation before any
//! outbound request is made.

pub mod state;

pub use state::{UnknownStateError, state_code};

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, error::EventError};

/// Question label for the applicant's first name.
pub const FIRST_NAME: &str = "First Name";
/// Question label for the applicant's last name.
pub const LAST_NAME: &str = "Last Name";
/// Question label for the applicant's email address.
pub const EMAIL: &str = "Email";
/// Question label for the applicant's phone number.
pub const PHONE: &str = "Phone";
/// Question label carrying the street-address answer object.
pub const ADDRESS: &str = "Your address";
/// Question label for the applicant's primary language.
pub const PRIMARY_LANGUAGE: &str = "Primary Language";
/// Question label for the household size.
pub const HOUSEHOLD_SIZE: &str = "Number of family members in your household";
/// Question label for the estimated monthly household income.
pub const MONTHLY_INCOME: &str = "Estimated Monthly Household Income";

/// Error raised when a required question is absent from the submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
#[error("Required question `{name}` is missing from the submission.")]
pub struct MissingFieldError {
	/// Question name that had no exact match.
	pub name: String,
}

/// Inbound webhook event carrying one form submission.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FormSubmissionEvent {
	/// Submitted form payload.
	pub submission: FormSubmission,
}
impl FormSubmissionEvent {
	/// Decodes a raw webhook body, reporting the failing JSON path on mismatch.
	pub fn from_value(body: &Value) -> Result<Self, EventError> {
		serde_path_to_error::deserialize(body).map_err(|source| EventError::Envelope { source })
	}
}

/// Ordered question/answer payload addressed by question name.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct FormSubmission {
	/// Ordered question list as supplied by the form builder.
	pub questions: Vec<Question>,
}
impl FormSubmission {
	/// Returns the value of the first question whose name matches exactly.
	pub fn answer(&self, name: &str) -> Result<&Value, MissingFieldError> {
		self.questions
			.iter()
			.find(|question| question.name == name)
			.map(|question| &question.value)
			.ok_or_else(|| MissingFieldError { name: name.to_owned() })
	}

	fn typed_answer<T>(&self, name: &str) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let value = self.answer(name)?;
		let decoded = serde_path_to_error::deserialize(value)
			.map_err(|source| EventError::Answer { name: name.to_owned(), source })?;

		Ok(decoded)
	}
}

/// Single named answer from the inbound form payload.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Question {
	/// Human-readable field label used for lookups.
	pub name: String,
	/// Raw answer value; its shape depends on the question.
	pub value: Value,
}

/// Street-address answer object shipped under the address question.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AddressAnswer {
	/// Street line.
	pub address: String,
	/// City name.
	pub city: String,
	/// Full state name, matched against the closed table.
	pub state: String,
	/// Postal code.
	pub zipcode: String,
}

/// Name fields of the applicant record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Personal {
	/// First name.
	pub first_name: String,
	/// Last name.
	pub last_name: String,
}

/// Contact fields of the applicant record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Contact {
	/// Email address.
	pub email: String,
	/// Phone number.
	pub phone: String,
	/// Primary language.
	pub primary_language: String,
}

/// Street-address fields of the applicant record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Address {
	/// Street line.
	pub street_address: String,
	/// City name.
	pub city: String,
	/// Full state name as submitted.
	pub state: String,
	/// Two-letter USPS code resolved from the state name.
	pub state_code: String,
	/// Postal code.
	pub zipcode: String,
}

/// Household composition fields of the applicant record.
///
/// Form builders emit either numbers or strings here, so the raw values pass through
/// untouched and serialize verbatim into the lead payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Household {
	/// Household member count.
	pub size: Value,
	/// Estimated monthly income.
	pub monthly_income: Value,
}

/// Applicant record assembled from the inbound event and discarded after submission.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClientData {
	/// Name fields.
	pub personal: Personal,
	/// Contact fields.
	pub contact: Contact,
	/// Street-address fields.
	pub address: Address,
	/// Household composition fields.
	pub household: Household,
}
impl ClientData {
	/// Extracts every required field from the submission.
	pub fn from_submission(submission: &FormSubmission) -> Result<Self> {
		let first_name: String = submission.typed_answer(FIRST_NAME)?;
		let last_name: String = submission.typed_answer(LAST_NAME)?;
		let email: String = submission.typed_answer(EMAIL)?;
		let phone: String = submission.typed_answer(PHONE)?;
		let address: AddressAnswer = submission.typed_answer(ADDRESS)?;
		let primary_language: String = submission.typed_answer(PRIMARY_LANGUAGE)?;
		let size = submission.answer(HOUSEHOLD_SIZE)?.clone();
		let monthly_income = submission.answer(MONTHLY_INCOME)?.clone();
		let state_code = state_code(&address.state)?.to_owned();

		Ok(Self {
			personal: Personal { first_name, last_name },
			contact: Contact { email, phone, primary_language },
			address: Address {
				street_address: address.address,
				city: address.city,
				state: address.state,
				state_code,
				zipcode: address.zipcode,
			},
			household: Household { size, monthly_income },
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	fn question(name: &str, value: Value) -> Question {
		Question { name: name.to_owned(), value }
	}

	fn full_submission() -> FormSubmission {
		FormSubmission {
			questions: vec![
				question(FIRST_NAME, json!("Jane")),
				question(LAST_NAME, json!("Doe")),
				question(EMAIL, json!("jane.doe@example.com")),
				question(PHONE, json!("512-555-0188")),
				question(
					ADDRESS,
					json!({
						"address": "1 Main St",
						"city": "Austin",
						"state": "Texas",
						"zipcode": "78701",
					}),
				),
				question(PRIMARY_LANGUAGE, json!("Spanish")),
				question(HOUSEHOLD_SIZE, json!(4)),
				question(MONTHLY_INCOME, json!("2500")),
			],
		}
	}

	#[test]
	fn answer_returns_the_first_exact_match() {
		let submission = FormSubmission {
			questions: vec![
				question("Email", json!("first@example.com")),
				question("Email", json!("second@example.com")),
			],
		};
		let value = submission.answer("Email").expect("Duplicate question should resolve.");

		assert_eq!(value, &json!("first@example.com"));
	}

	#[test]
	fn answer_fails_without_an_exact_match() {
		let empty = FormSubmission::default();

		assert_eq!(
			empty.answer("Phone"),
			Err(MissingFieldError { name: "Phone".into() }),
		);

		let submission =
			FormSubmission { questions: vec![question("phone", json!("512-555-0188"))] };

		// Exact match only: case and whitespace differences do not resolve.
		assert!(submission.answer("Phone").is_err());
		assert!(submission.answer("phone ").is_err());
	}

	#[test]
	fn extraction_maps_every_field() {
		let data = ClientData::from_submission(&full_submission())
			.expect("Well-formed submission should extract.");

		assert_eq!(data.personal.first_name, "Jane");
		assert_eq!(data.personal.last_name, "Doe");
		assert_eq!(data.contact.email, "jane.doe@example.com");
		assert_eq!(data.contact.phone, "512-555-0188");
		assert_eq!(data.contact.primary_language, "Spanish");
		assert_eq!(data.address.street_address, "1 Main St");
		assert_eq!(data.address.city, "Austin");
		assert_eq!(data.address.state, "Texas");
		assert_eq!(data.address.state_code, "TX");
		assert_eq!(data.address.zipcode, "78701");
		assert_eq!(data.household.size, json!(4));
		assert_eq!(data.household.monthly_income, json!("2500"));
	}

	#[test]
	fn extraction_fails_on_a_missing_question() {
		let mut submission = full_submission();

		submission.questions.retain(|question| question.name != PHONE);

		let err = ClientData::from_submission(&submission)
			.expect_err("Missing phone question should fail extraction.");

		assert!(matches!(
			err,
			Error::MissingField(MissingFieldError { ref name }) if name == PHONE,
		));
	}

	#[test]
	fn extraction_fails_on_an_unknown_state() {
		let mut submission = full_submission();

		for entry in &mut submission.questions {
			if entry.name == ADDRESS {
				entry.value["state"] = json!("Tejas");
			}
		}

		let err = ClientData::from_submission(&submission)
			.expect_err("Unknown state name should fail extraction.");

		assert!(matches!(err, Error::UnknownState(_)));
	}

	#[test]
	fn extraction_fails_on_a_malformed_address_answer() {
		let mut submission = full_submission();

		for entry in &mut submission.questions {
			if entry.name == ADDRESS {
				entry.value = json!("1 Main St, Austin");
			}
		}

		let err = ClientData::from_submission(&submission)
			.expect_err("Malformed address answer should fail extraction.");

		assert!(matches!(
			err,
			Error::Event(crate::error::EventError::Answer { ref name, .. }) if name == ADDRESS,
		));
	}

	#[test]
	fn event_decoding_reports_envelope_mismatches() {
		let err = FormSubmissionEvent::from_value(&json!({"submission": {"questions": 7}}))
			.expect_err("Malformed envelope should fail decoding.");

		assert!(matches!(err, crate::error::EventError::Envelope { .. }));

		let event = FormSubmissionEvent::from_value(&json!({
			"submission": {"questions": [{"name": "Email", "value": "a@b.c"}]},
		}))
		.expect("Well-formed envelope should decode.");

		assert_eq!(event.submission.questions.len(), 1);
	}
}
