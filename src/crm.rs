//! CRM lead payload mapping and the submission receipt.

// self
use crate::{_prelude::*, intake::ClientData};

/// Company value stamped on every self-service lead.
pub const LEAD_COMPANY: &str = "Self";
/// Status value stamped on newly created leads.
pub const LEAD_STATUS: &str = "Open - Not Contacted";
/// Country code stamped on every lead.
pub const LEAD_COUNTRY_CODE: &str = "US";
/// Success body returned by the webhook layer after a lead is created.
pub const SUCCESS_MESSAGE: &str = "Client Loaded to Salesforce Successfully!";

/// Fixed-schema lead payload POSTed to the CRM REST endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
	/// Applicant first name.
	#[serde(rename = "FirstName")]
	pub first_name: String,
	/// Applicant last name.
	#[serde(rename = "LastName")]
	pub last_name: String,
	/// Street line.
	#[serde(rename = "Street")]
	pub street: String,
	/// City name.
	#[serde(rename = "City")]
	pub city: String,
	/// Postal code.
	#[serde(rename = "PostalCode")]
	pub postal_code: String,
	/// Country code, always [`LEAD_COUNTRY_CODE`].
	#[serde(rename = "CountryCode")]
	pub country_code: String,
	/// Two-letter state code resolved during extraction.
	#[serde(rename = "StateCode")]
	pub state_code: String,
	/// Phone number.
	#[serde(rename = "Phone")]
	pub phone: String,
	/// Email address.
	#[serde(rename = "Email")]
	pub email: String,
	/// Primary language custom field.
	#[serde(rename = "Primary_Language__c")]
	pub primary_language: String,
	/// Household size custom field; passes through the submitted value verbatim.
	#[serde(rename = "Household_Size__c")]
	pub household_size: Value,
	/// Monthly income custom field; passes through the submitted value verbatim.
	#[serde(rename = "Estimated_Monthly_Household_Income__c")]
	pub monthly_income: Value,
	/// Company value, always [`LEAD_COMPANY`] for self-service submissions.
	#[serde(rename = "Company")]
	pub company: String,
	/// Lead status, always [`LEAD_STATUS`] on creation.
	#[serde(rename = "Status")]
	pub status: String,
}
impl LeadRecord {
	/// Maps extracted client data onto the CRM schema.
	pub fn from_client_data(data: &ClientData) -> Self {
		Self {
			first_name: data.personal.first_name.clone(),
			last_name: data.personal.last_name.clone(),
			street: data.address.street_address.clone(),
			city: data.address.city.clone(),
			postal_code: data.address.zipcode.clone(),
			country_code: LEAD_COUNTRY_CODE.to_owned(),
			state_code: data.address.state_code.clone(),
			phone: data.contact.phone.clone(),
			email: data.contact.email.clone(),
			primary_language: data.contact.primary_language.clone(),
			household_size: data.household.size.clone(),
			monthly_income: data.household.monthly_income.clone(),
			company: LEAD_COMPANY.to_owned(),
			status: LEAD_STATUS.to_owned(),
		}
	}
}

/// Wire shape of the CRM create-record response.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateLeadReply {
	pub id: Option<String>,
}

/// Outcome of a successful lead submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionReceipt {
	/// Identifier of the created lead, when the CRM returned one.
	pub lead_id: Option<String>,
}
impl SubmissionReceipt {
	/// Returns the canonical success message for the webhook response body.
	pub fn message(&self) -> &'static str {
		SUCCESS_MESSAGE
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::intake::{Address, Contact, Household, Personal};

	fn client_data() -> ClientData {
		ClientData {
			personal: Personal { first_name: "Jane".into(), last_name: "Doe".into() },
			contact: Contact {
				email: "jane.doe@example.com".into(),
				phone: "512-555-0188".into(),
				primary_language: "Spanish".into(),
			},
			address: Address {
				street_address: "1 Main St".into(),
				city: "Austin".into(),
				state: "Texas".into(),
				state_code: "TX".into(),
				zipcode: "78701".into(),
			},
			household: Household { size: json!(4), monthly_income: json!("2500") },
		}
	}

	#[test]
	fn mapping_stamps_the_fixed_members() {
		let lead = LeadRecord::from_client_data(&client_data());

		assert_eq!(lead.company, LEAD_COMPANY);
		assert_eq!(lead.status, LEAD_STATUS);
		assert_eq!(lead.country_code, LEAD_COUNTRY_CODE);
		assert_eq!(lead.postal_code, "78701");
		assert_eq!(lead.state_code, "TX");
	}

	#[test]
	fn serialization_uses_the_crm_field_names() {
		let lead = LeadRecord::from_client_data(&client_data());
		let value = serde_json::to_value(&lead).expect("Lead record should serialize.");

		assert_eq!(value["FirstName"], json!("Jane"));
		assert_eq!(value["LastName"], json!("Doe"));
		assert_eq!(value["Street"], json!("1 Main St"));
		assert_eq!(value["City"], json!("Austin"));
		assert_eq!(value["PostalCode"], json!("78701"));
		assert_eq!(value["CountryCode"], json!("US"));
		assert_eq!(value["StateCode"], json!("TX"));
		assert_eq!(value["Phone"], json!("512-555-0188"));
		assert_eq!(value["Email"], json!("jane.doe@example.com"));
		assert_eq!(value["Primary_Language__c"], json!("Spanish"));
		assert_eq!(value["Household_Size__c"], json!(4));
		assert_eq!(value["Estimated_Monthly_Household_Income__c"], json!("2500"));
		assert_eq!(value["Company"], json!("Self"));
		assert_eq!(value["Status"], json!("Open - Not Contacted"));
	}

	#[test]
	fn receipt_exposes_the_canonical_message() {
		let receipt = SubmissionReceipt { lead_id: Some("00Q000000000001AAA".into()) };

		assert_eq!(receipt.message(), "Client Loaded to Salesforce Successfully!");
	}
}
