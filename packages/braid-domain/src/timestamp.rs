use std::{cmp::Ordering, fmt};

use crate::{Error, Result};

/// A store-native message timestamp: fractional seconds since the epoch,
/// kept verbatim as the archive produced it, e.g. `"1712345678.000200"`.
///
/// Equality and hashing match the store byte-for-byte. Ordering is numeric,
/// with byte order breaking exact-value ties so the total order stays
/// consistent with equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
	pub fn new(raw: impl Into<String>) -> Self {
		Self(raw.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Seconds since the epoch, for range-query anchoring.
	pub fn seconds(&self) -> Result<f64> {
		self.0.parse::<f64>().map_err(|_| Error::MalformedTimestamp { raw: self.0.clone() })
	}
}

impl fmt::Display for Timestamp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for Timestamp {
	fn from(raw: &str) -> Self {
		Self(raw.to_string())
	}
}

impl From<String> for Timestamp {
	fn from(raw: String) -> Self {
		Self(raw)
	}
}

impl Ord for Timestamp {
	fn cmp(&self, other: &Self) -> Ordering {
		match (self.0.parse::<f64>(), other.0.parse::<f64>()) {
			(Ok(lhs), Ok(rhs)) => lhs.total_cmp(&rhs).then_with(|| self.0.cmp(&other.0)),
			_ => self.0.cmp(&other.0),
		}
	}
}

impl PartialOrd for Timestamp {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}
