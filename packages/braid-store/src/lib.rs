pub mod client;
pub mod models;
pub mod query;

mod error;

pub use error::Error;

use std::{future::Future, pin::Pin};

use braid_domain::Message;

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Sort order on the store's timestamp field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
	Ascending,
	Descending,
}

/// Bounds on the timestamp field, in fractional seconds since the epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TsRange {
	pub gt: Option<f64>,
	pub gte: Option<f64>,
	pub lte: Option<f64>,
}

/// One store query: optional full-text match on the body, OR-filter across a
/// channel set, timestamp range, time sort, pagination and score tracking.
///
/// Relevance scores only come back when `track_scores` is set alongside a
/// text match; windowed context fetches leave every hit at score zero.
#[derive(Debug, Clone)]
pub struct SearchQuery {
	pub text: Option<String>,
	pub channels: Vec<String>,
	pub ts_range: Option<TsRange>,
	pub sort: Sort,
	pub from: usize,
	pub size: u32,
	pub track_scores: bool,
}

impl SearchQuery {
	/// A scored full-text query, newest hits first.
	pub fn text_match(
		text: impl Into<String>,
		channels: Vec<String>,
		ts_range: TsRange,
		from: usize,
		size: u32,
	) -> Self {
		Self {
			text: Some(text.into()),
			channels,
			ts_range: Some(ts_range),
			sort: Sort::Descending,
			from,
			size,
			track_scores: true,
		}
	}

	/// An unscored context fetch around a window anchor.
	pub fn window(channel: impl Into<String>, ts_range: TsRange, sort: Sort, size: u32) -> Self {
		Self {
			text: None,
			channels: vec![channel.into()],
			ts_range: Some(ts_range),
			sort,
			from: 0,
			size,
			track_scores: false,
		}
	}

	/// The newest messages across the channel scope, no text filter.
	pub fn recent(channels: Vec<String>, size: u32) -> Self {
		Self {
			text: None,
			channels,
			ts_range: None,
			sort: Sort::Descending,
			from: 0,
			size,
			track_scores: false,
		}
	}
}

/// The external message archive: queryable by full-text match, timestamp
/// range and channel filter, returning time-ordered hits.
pub trait MessageStore
where
	Self: Send + Sync,
{
	fn search<'a>(&'a self, query: &'a SearchQuery) -> BoxFuture<'a, Result<Vec<Message>>>;

	/// Total number of indexed messages.
	fn count<'a>(&'a self) -> BoxFuture<'a, Result<u64>>;
}
