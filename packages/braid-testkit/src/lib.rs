use std::sync::Mutex;

use braid_domain::{Message, Timestamp};
use braid_store::{
	BoxFuture, Error as StoreError, MessageStore, Result as StoreResult, SearchQuery, Sort,
};

/// A matched-message fixture: carries the relevance a text query would
/// surface for it.
pub fn scored_message(channel: &str, ts: &str, text: &str, score: f64) -> Message {
	Message {
		score,
		channel: channel.to_string(),
		ts: Timestamp::from(ts),
		text: text.to_string(),
		..Message::default()
	}
}

pub fn message(channel: &str, ts: &str, text: &str) -> Message {
	scored_message(channel, ts, text, 0.0)
}

/// A non-text event (join, topic change); context windows must skip these.
pub fn blank_event(channel: &str, ts: &str) -> Message {
	Message {
		channel: channel.to_string(),
		subtype: Some("channel_join".to_string()),
		ts: Timestamp::from(ts),
		..Message::default()
	}
}

/// Deterministic in-memory message archive.
///
/// Text matching is a case-insensitive substring check. Fixture scores are
/// only surfaced on tracked text queries; windowed context fetches come back
/// zeroed, exactly like the real store's hit metadata.
pub struct MemoryStore {
	messages: Vec<Message>,
	budget: Mutex<Option<usize>>,
}

impl MemoryStore {
	pub fn new(mut messages: Vec<Message>) -> Self {
		messages.sort_by(|lhs, rhs| lhs.ts.cmp(&rhs.ts));

		Self { messages, budget: Mutex::new(None) }
	}

	/// Makes the store fail every query after the first `calls` succeed.
	pub fn fail_after(self, calls: usize) -> Self {
		*self.budget.lock().unwrap_or_else(|err| err.into_inner()) = Some(calls);

		self
	}

	fn spend(&self) -> StoreResult<()> {
		let mut budget = self.budget.lock().unwrap_or_else(|err| err.into_inner());

		match budget.as_mut() {
			Some(0) => Err(StoreError::Decode { message: "Injected store failure.".to_string() }),
			Some(remaining) => {
				*remaining -= 1;

				Ok(())
			},
			None => Ok(()),
		}
	}

	fn matches(message: &Message, query: &SearchQuery) -> bool {
		if !query.channels.is_empty() && !query.channels.contains(&message.channel) {
			return false;
		}
		if let Some(text) = query.text.as_deref()
			&& !message.text.to_lowercase().contains(&text.to_lowercase())
		{
			return false;
		}
		if let Some(range) = query.ts_range.as_ref() {
			let Ok(at) = message.ts.seconds() else {
				return false;
			};

			if let Some(gt) = range.gt
				&& at <= gt
			{
				return false;
			}
			if let Some(gte) = range.gte
				&& at < gte
			{
				return false;
			}
			if let Some(lte) = range.lte
				&& at > lte
			{
				return false;
			}
		}

		true
	}

	fn run(&self, query: &SearchQuery) -> StoreResult<Vec<Message>> {
		self.spend()?;

		let mut hits: Vec<Message> = self
			.messages
			.iter()
			.filter(|message| Self::matches(message, query))
			.cloned()
			.collect();

		if query.sort == Sort::Descending {
			hits.reverse();
		}

		let scored = query.track_scores && query.text.is_some();

		for hit in &mut hits {
			if !scored {
				hit.score = 0.0;
			}
		}

		Ok(hits.into_iter().skip(query.from).take(query.size as usize).collect())
	}
}

impl MessageStore for MemoryStore {
	fn search<'a>(&'a self, query: &'a SearchQuery) -> BoxFuture<'a, StoreResult<Vec<Message>>> {
		Box::pin(std::future::ready(self.run(query)))
	}

	fn count<'a>(&'a self) -> BoxFuture<'a, StoreResult<u64>> {
		Box::pin(std::future::ready(self.spend().map(|()| self.messages.len() as u64)))
	}
}
