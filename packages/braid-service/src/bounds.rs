use std::sync::Arc;

use braid_domain::{Conversation, Message};
use braid_store::{MessageStore, SearchQuery, Sort, TsRange};

use crate::{BoxFuture, Result, request::RequestWindow};

/// Strategy contract for expanding one matched message into its context
/// window.
pub trait BoundsStrategy
where
	Self: Send + Sync,
{
	fn expand<'a>(
		&'a self,
		store: &'a dyn MessageStore,
		channel: &'a str,
		anchor: &'a Message,
		window: RequestWindow,
	) -> BoxFuture<'a, Result<Conversation>>;
}

/// Maps a configured strategy name to its implementation. Unknown names fall
/// back to the default rather than failing.
pub fn resolve(name: &str, search: &braid_config::Search, page_size: u32) -> Arc<dyn BoundsStrategy> {
	match name {
		_ => Arc::new(TimeBounds::new(search, page_size)),
	}
}

#[derive(Debug, Clone, Copy)]
enum Side {
	Backward,
	Forward,
}

/// Time-anchored window expansion: a capped fetch on each side of the match,
/// then an exponentially growing re-query on any side that came back short,
/// bounded by the request's time range.
pub struct TimeBounds {
	before: usize,
	after: usize,
	min_context: usize,
	base_window_secs: i64,
	probe_size: u32,
}

impl TimeBounds {
	pub fn new(search: &braid_config::Search, page_size: u32) -> Self {
		Self {
			before: search.context_before,
			after: search.context_after,
			min_context: search.min_context,
			base_window_secs: search.base_window_secs,
			probe_size: page_size,
		}
	}

	async fn expand_inner(
		&self,
		store: &dyn MessageStore,
		channel: &str,
		anchor: &Message,
		window: RequestWindow,
	) -> Result<Conversation> {
		let anchor_at = anchor.ts.seconds()?;

		// Backward context, newest first. The range is inclusive at the
		// anchor, so the match itself leads the list.
		let backward_query = SearchQuery::window(
			channel,
			TsRange { gte: Some(window.from as f64), lte: Some(anchor_at), ..TsRange::default() },
			Sort::Descending,
			self.before as u32,
		);
		let mut backward = keep_text(store.search(&backward_query).await?);

		if backward.len() < self.min_context {
			let grown =
				self.grow_side(store, channel, anchor_at, window, Side::Backward).await?;

			if grown.len() > backward.len() {
				backward = grown;
			}
		}

		backward.truncate(self.before);

		// The match's relevance lands on the context copy that coincides
		// with it in time; window fetches scored it zero.
		if let Some(own) = backward.iter_mut().find(|message| message.ts == anchor.ts) {
			own.score = anchor.score;
		}

		backward.reverse();

		let forward_query = SearchQuery::window(
			channel,
			TsRange { gt: Some(anchor_at), lte: Some(window.to as f64), ..TsRange::default() },
			Sort::Ascending,
			self.after as u32,
		);
		let mut forward = keep_text(store.search(&forward_query).await?);

		if forward.len() < self.after {
			let grown = self.grow_side(store, channel, anchor_at, window, Side::Forward).await?;

			if grown.len() > forward.len() {
				forward = grown;
			}
		}

		forward.truncate(self.after);
		backward.append(&mut forward);

		Ok(Conversation::from_messages(backward))
	}

	/// Re-queries one side with a doubling window anchored at the match until
	/// enough context is kept or the window would cross the request range.
	/// Each probe replaces the last; blank events never count.
	async fn grow_side(
		&self,
		store: &dyn MessageStore,
		channel: &str,
		anchor_at: f64,
		window: RequestWindow,
		side: Side,
	) -> Result<Vec<Message>> {
		let mut kept = Vec::new();
		let mut span = self.base_window_secs;

		loop {
			let headroom = match side {
				Side::Backward => anchor_at - window.from as f64,
				Side::Forward => window.to as f64 - anchor_at,
			};

			if kept.len() >= self.min_context || (span as f64) >= headroom {
				break;
			}

			let query = match side {
				Side::Backward => SearchQuery::window(
					channel,
					TsRange {
						gte: Some(anchor_at - span as f64),
						lte: Some(anchor_at),
						..TsRange::default()
					},
					Sort::Descending,
					self.probe_size,
				),
				Side::Forward => SearchQuery::window(
					channel,
					TsRange {
						gt: Some(anchor_at),
						lte: Some(anchor_at + span as f64),
						..TsRange::default()
					},
					Sort::Ascending,
					self.probe_size,
				),
			};

			kept = keep_text(store.search(&query).await?);
			span *= 2;
		}

		Ok(kept)
	}
}

impl BoundsStrategy for TimeBounds {
	fn expand<'a>(
		&'a self,
		store: &'a dyn MessageStore,
		channel: &'a str,
		anchor: &'a Message,
		window: RequestWindow,
	) -> BoxFuture<'a, Result<Conversation>> {
		Box::pin(self.expand_inner(store, channel, anchor, window))
	}
}

fn keep_text(messages: Vec<Message>) -> Vec<Message> {
	messages.into_iter().filter(|message| !message.is_blank()).collect()
}
