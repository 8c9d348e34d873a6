//! Closed state-name lookup table: the 50 states plus the District of Columbia.

// self
use crate::_prelude::*;

/// Error raised when a state name falls outside the closed table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
#[error("State name `{name}` is not in the lookup table.")]
pub struct UnknownStateError {
	/// State name that had no exact match.
	pub name: String,
}

/// Full-name to USPS-code pairs; exact match only, no case folding.
const STATE_CODES: [(&str, &str); 51] = [
	("Alabama", "AL"),
	("Alaska", "AK"),
	("Arizona", "AZ"),
	("Arkansas", "AR"),
	("California", "CA"),
	("Colorado", "CO"),
	("Connecticut", "CT"),
	("Delaware", "DE"),
	("District of Columbia", "DC"),
	("Florida", "FL"),
	("Georgia", "GA"),
	("Hawaii", "HI"),
	("Idaho", "ID"),
	("Illinois", "IL"),
	("Indiana", "IN"),
	("Iowa", "IA"),
	("Kansas", "KS"),
	("Kentucky", "KY"),
	("Louisiana", "LA"),
	("Maine", "ME"),
	("Maryland", "MD"),
	("Massachusetts", "MA"),
	("Michigan", "MI"),
	("Minnesota", "MN"),
	("Mississippi", "MS"),
	("Missouri", "MO"),
	("Montana", "MT"),
	("Nebraska", "NE"),
	("Nevada", "NV"),
	("New Hampshire", "NH"),
	("New Jersey", "NJ"),
	("New Mexico", "NM"),
	("New York", "NY"),
	("North Carolina", "NC"),
	("North Dakota", "ND"),
	("Ohio", "OH"),
	("Oklahoma", "OK"),
	("Oregon", "OR"),
	("Pennsylvania", "PA"),
	("Rhode Island", "RI"),
	("South Carolina", "SC"),
	("South Dakota", "SD"),
	("Tennessee", "TN"),
	("Texas", "TX"),
	("Utah", "UT"),
	("Vermont", "VT"),
	("Virginia", "VA"),
	("Washington", "WA"),
	("West Virginia", "WV"),
	("Wisconsin", "WI"),
	("Wyoming", "WY"),
];

/// Resolves a full state name to its two-letter USPS code.
pub fn state_code(name: &str) -> Result<&'static str, UnknownStateError> {
	STATE_CODES
		.iter()
		.find(|(full, _)| *full == name)
		.map(|(_, code)| *code)
		.ok_or_else(|| UnknownStateError { name: name.to_owned() })
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashSet;
	// self
	use super::*;

	#[test]
	fn every_entry_resolves_to_its_code() {
		for (full, code) in STATE_CODES {
			assert_eq!(
				state_code(full),
				Ok(code),
				"Entry `{full}` should resolve to `{code}`.",
			);
		}
	}

	#[test]
	fn table_holds_51_distinct_entries() {
		let names: HashSet<_> = STATE_CODES.iter().map(|(full, _)| *full).collect();
		let codes: HashSet<_> = STATE_CODES.iter().map(|(_, code)| *code).collect();

		assert_eq!(names.len(), 51);
		assert_eq!(codes.len(), 51);
	}

	#[test]
	fn known_names_resolve() {
		assert_eq!(state_code("Texas"), Ok("TX"));
		assert_eq!(state_code("District of Columbia"), Ok("DC"));
		assert_eq!(state_code("New Hampshire"), Ok("NH"));
	}

	#[test]
	fn unmatched_names_fail() {
		for name in ["texas", "TEXAS", " Texas", "Tex", "Puerto Rico", ""] {
			assert_eq!(
				state_code(name),
				Err(UnknownStateError { name: name.to_owned() }),
				"Name `{name}` should not resolve.",
			);
		}
	}
}
