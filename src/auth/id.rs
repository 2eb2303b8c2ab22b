//! Strongly typed identifiers enforced across the broker domain.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (tenant, workspace, report, dataset).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (tenant, workspace, report, dataset).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (tenant, workspace, report, dataset).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

def_id! { TenantId, "Directory tenant the service principal authenticates against.", "Tenant" }
def_id! { WorkspaceId, "Workspace hosting reports and datasets.", "Workspace" }
def_id! { ReportId, "Report resource inside a workspace.", "Report" }
def_id! { DatasetId, "Dataset backing a report.", "Dataset" }

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_reject_empty_and_whitespace() {
		assert!(WorkspaceId::new("").is_err(), "Empty identifiers must be rejected.");
		assert!(WorkspaceId::new("ws 1").is_err(), "Embedded whitespace must be rejected.");
		assert!(ReportId::new(" r1").is_err(), "Leading whitespace must be rejected.");

		let workspace = WorkspaceId::new("f089354e-8366-4e18-aea3-4cb4a3a50b48")
			.expect("GUID-shaped workspace identifier should be considered valid.");

		assert_eq!(workspace.as_ref(), "f089354e-8366-4e18-aea3-4cb4a3a50b48");
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let report: ReportId = serde_json::from_str("\"report-42\"")
			.expect("Report identifier should deserialize successfully.");

		assert_eq!(report.as_ref(), "report-42");
		assert!(serde_json::from_str::<ReportId>("\"with space\"").is_err());
		assert!(serde_json::from_str::<TenantId>("\"\"").is_err());
	}

	#[test]
	fn length_limit_is_enforced() {
		let exact = "a".repeat(IDENTIFIER_MAX_LEN);

		DatasetId::new(&exact).expect("Exact length should succeed.");

		let too_long = "a".repeat(IDENTIFIER_MAX_LEN + 1);

		assert!(DatasetId::new(&too_long).is_err());
	}
}
