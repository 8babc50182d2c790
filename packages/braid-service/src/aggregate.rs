use std::{collections::HashMap, sync::Arc};

use braid_domain::{Conversation, Timestamp};

use crate::Result;

/// Strategy contract for collapsing per-match windows into merged threads.
pub trait AggregateStrategy
where
	Self: Send + Sync,
{
	fn merge(&self, conversations: Vec<Conversation>) -> Result<Vec<Conversation>>;
}

/// Maps a configured strategy name to its implementation. Unknown names fall
/// back to the default rather than failing.
pub fn resolve(name: &str) -> Arc<dyn AggregateStrategy> {
	match name {
		_ => Arc::new(TimeAggregate),
	}
}

/// Merges windows from the same channel that overlap in time into single
/// ordered threads, keeping the relevance the original matches carried.
///
/// Windows are processed in input order (newest match first), so a merged
/// thread grows backward in time; a window disjoint from the thread starts a
/// fresh entry for that channel. Deterministic for a given input order.
pub struct TimeAggregate;

impl AggregateStrategy for TimeAggregate {
	fn merge(&self, conversations: Vec<Conversation>) -> Result<Vec<Conversation>> {
		let mut merged: Vec<Conversation> = Vec::new();
		let mut channel_index: HashMap<String, usize> = HashMap::new();

		for window in conversations {
			// Empty windows carry nothing worth keeping.
			let Some(first) = window.messages.first() else {
				continue;
			};
			let channel = first.channel.clone();

			match channel_index.get(&channel).copied() {
				Some(index) if overlaps(&window, &merged[index]) => {
					merge_into(&mut merged[index], window);
				},
				_ => {
					channel_index.insert(channel, merged.len());
					merged.push(window);
				},
			}
		}

		Ok(merged)
	}
}

/// A window continues the thread when its newest message is no older than
/// the thread's head.
fn overlaps(window: &Conversation, thread: &Conversation) -> bool {
	match (window.last_timestamp(), thread.first_timestamp()) {
		(Some(newest), Some(head)) => newest >= head,
		_ => false,
	}
}

/// Folds an overlapping window into the thread. Messages strictly older than
/// the thread's head extend it backward; a positively-scored message
/// replaces the context copy with the same timestamp and text, so relevance
/// is not lost to an unscored duplicate. Zero-score messages never replace
/// anything.
fn merge_into(thread: &mut Conversation, window: Conversation) {
	let Some(head) = thread.first_timestamp().cloned() else {
		return;
	};
	let slots: HashMap<(Timestamp, String), usize> = thread
		.messages
		.iter()
		.enumerate()
		.map(|(index, message)| ((message.ts.clone(), message.text.clone()), index))
		.collect();
	let mut older = Vec::new();

	for message in window.messages {
		if message.ts < head {
			older.push(message);
		} else if message.score > 0.0
			&& let Some(&index) = slots.get(&(message.ts.clone(), message.text.clone()))
		{
			thread.messages[index] = message;
		}
	}

	// The older run is already ascending; splice it in as a block so the
	// thread stays time-ordered.
	thread.messages.splice(0..0, older);
}
