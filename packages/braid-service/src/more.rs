use braid_domain::Message;
use braid_store::{MessageStore, SearchQuery, Sort, TsRange};

use crate::{Result, request::{Direction, MoreRequest}};

/// Incremental context fetcher: the window-expansion technique applied in a
/// single direction, for the "load more context" operation.
pub struct MoreMessages {
	min_context: usize,
	base_window_secs: i64,
	limit: usize,
	probe_size: u32,
}

impl MoreMessages {
	pub fn new(search: &braid_config::Search, page_size: u32) -> Self {
		Self {
			min_context: search.min_context,
			base_window_secs: search.base_window_secs,
			limit: search.more_limit,
			probe_size: page_size,
		}
	}

	/// Extends from the base message until enough non-blank context is
	/// gathered or the doubling window crosses the request range on that
	/// side. The base message itself is stripped, the rest capped at the
	/// configured limit and returned oldest to newest. No further context
	/// within range is an empty result, not an error.
	pub async fn fetch(
		&self,
		store: &dyn MessageStore,
		request: &MoreRequest,
	) -> Result<Vec<Message>> {
		let window = request.window();
		let base_at = request.base_ts.seconds()?;
		let mut kept: Vec<Message> = Vec::new();
		let mut span = self.base_window_secs;

		loop {
			let headroom = match request.direction {
				Direction::Older => base_at - window.from as f64,
				Direction::Newer => window.to as f64 - base_at,
			};

			if kept.len() > self.min_context || (span as f64) >= headroom {
				break;
			}

			let query = match request.direction {
				Direction::Older => SearchQuery::window(
					&request.channel,
					TsRange {
						gte: Some(base_at - span as f64),
						lte: Some(base_at),
						..TsRange::default()
					},
					Sort::Descending,
					self.probe_size,
				),
				Direction::Newer => SearchQuery::window(
					&request.channel,
					TsRange {
						gte: Some(base_at),
						lte: Some(base_at + span as f64),
						..TsRange::default()
					},
					Sort::Ascending,
					self.probe_size,
				),
			};

			kept = store
				.search(&query)
				.await?
				.into_iter()
				.filter(|message| !message.is_blank())
				.collect();
			span *= 2;
		}

		if kept.is_empty() {
			return Ok(kept);
		}

		// The first element is the base message the caller already has.
		kept.remove(0);
		kept.truncate(self.limit);

		if request.direction == Direction::Older {
			kept.reverse();
		}

		Ok(kept)
	}
}
