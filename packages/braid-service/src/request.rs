use time::Date;

use braid_domain::Timestamp;

/// A text search over the archive: query, inclusive day range, channel scope
/// and pagination offset. An empty channel scope applies no channel filter.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
	pub query: String,
	#[serde(with = "crate::date_serde")]
	pub from: Date,
	#[serde(with = "crate::date_serde")]
	pub to: Date,
	#[serde(default)]
	pub channels: Vec<String>,
	#[serde(default)]
	pub start: usize,
}

impl SearchRequest {
	pub fn window(&self) -> RequestWindow {
		RequestWindow::from_dates(self.from, self.to)
	}
}

/// Direction an incremental context fetch extends in: `Older` reaches
/// backward from the base message, `Newer` forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
	Older,
	Newer,
}

/// One "load more context" request anchored at a known base message.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MoreRequest {
	pub channel: String,
	pub base_ts: Timestamp,
	pub direction: Direction,
	#[serde(with = "crate::date_serde")]
	pub from: Date,
	#[serde(with = "crate::date_serde")]
	pub to: Date,
}

impl MoreRequest {
	pub fn window(&self) -> RequestWindow {
		RequestWindow::from_dates(self.from, self.to)
	}
}

/// The request's time range in whole epoch seconds. The end date is
/// inclusive through end of day, so `to` is the following midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestWindow {
	pub from: i64,
	pub to: i64,
}

impl RequestWindow {
	pub fn from_dates(from: Date, to: Date) -> Self {
		Self {
			from: from.midnight().assume_utc().unix_timestamp(),
			to: to.midnight().assume_utc().unix_timestamp() + 24 * 60 * 60,
		}
	}
}
