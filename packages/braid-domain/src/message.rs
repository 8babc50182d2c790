use crate::Timestamp;

/// A single text event from the archive.
///
/// Field names follow the store's document shape. The score never appears in
/// a document source; it is attached from hit metadata on text-match queries
/// and defaults to zero on windowed context fetches.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Message {
	#[serde(default)]
	pub score: f64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub subtype: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub previous_message: Option<Box<Message>>,
	#[serde(default, rename = "message", skip_serializing_if = "Option::is_none")]
	pub sub_message: Option<Box<Message>>,
	#[serde(default)]
	pub channel: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub channel_name: Option<String>,
	#[serde(default, rename = "event_ts", skip_serializing_if = "Option::is_none")]
	pub event_timestamp: Option<String>,
	pub ts: Timestamp,
	#[serde(default)]
	pub text: String,
}

impl Message {
	/// Non-text events (joins, topic changes, attachments-only) carry no
	/// body and are excluded from context windows.
	pub fn is_blank(&self) -> bool {
		self.text.trim().is_empty()
	}
}

/// An ordered run of messages believed to belong together, plus the
/// aggregate relevance score used for ranking.
///
/// Messages are in non-decreasing timestamp order.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Conversation {
	pub score: f64,
	pub messages: Vec<Message>,
}

impl Conversation {
	pub fn from_messages(messages: Vec<Message>) -> Self {
		Self { score: 0.0, messages }
	}

	/// Timestamp of the oldest message, if any.
	pub fn first_timestamp(&self) -> Option<&Timestamp> {
		self.messages.first().map(|message| &message.ts)
	}

	/// Timestamp of the newest message, if any.
	pub fn last_timestamp(&self) -> Option<&Timestamp> {
		self.messages.last().map(|message| &message.ts)
	}
}
