use std::sync::Arc;

use braid_domain::Conversation;

use crate::Result;

/// Strategy contract for computing aggregate conversation scores.
pub trait ScoreStrategy
where
	Self: Send + Sync,
{
	fn score(&self, conversations: Vec<Conversation>) -> Result<Vec<Conversation>>;
}

/// Maps a configured strategy name to its implementation. Unknown names fall
/// back to the default rather than failing.
pub fn resolve(name: &str) -> Arc<dyn ScoreStrategy> {
	match name {
		_ => Arc::new(MessageScore),
	}
}

/// Scores a conversation as the sum of its message scores. Context messages
/// contribute nothing unless a merge handed them a match's score.
pub struct MessageScore;

impl ScoreStrategy for MessageScore {
	fn score(&self, mut conversations: Vec<Conversation>) -> Result<Vec<Conversation>> {
		for conversation in &mut conversations {
			conversation.score = conversation.messages.iter().map(|message| message.score).sum();
		}

		Ok(conversations)
	}
}

/// Orders conversations by descending score. The sort is stable and no
/// secondary key is defined, so ties keep their input order.
pub fn rank(conversations: &mut [Conversation]) {
	conversations.sort_by(|lhs, rhs| rhs.score.total_cmp(&lhs.score));
}
