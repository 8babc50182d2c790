use serde::Deserialize;
use serde_json::Value;
use time::{Duration, OffsetDateTime, format_description::well_known::Rfc2822};

use braid_domain::Message;

use crate::{Error, Result};

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
	#[serde(default)]
	pub hits: Hits,
}

#[derive(Debug, Default, Deserialize)]
pub struct Hits {
	#[serde(default)]
	pub hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
pub struct Hit {
	#[serde(rename = "_id")]
	pub id: String,
	#[serde(rename = "_score", default)]
	pub score: Option<f64>,
	#[serde(rename = "_source")]
	pub source: Value,
}

#[derive(Debug, Deserialize)]
pub struct CountResponse {
	pub count: u64,
}

/// Maps a store response onto domain messages, leaving channel and user ids
/// unresolved. Hit scores are only present on text-match queries.
pub fn messages_from_response(response: SearchResponse) -> Result<Vec<Message>> {
	let mut messages = Vec::with_capacity(response.hits.hits.len());

	for hit in response.hits.hits {
		let mut message: Message = serde_json::from_value(hit.source)
			.map_err(|err| Error::Decode { message: format!("Invalid hit source: {err}") })?;

		message.id = Some(hit.id);
		message.score = hit.score.unwrap_or(0.0);

		// Rewrite the event timestamp into something readable when it has
		// the expected sec.nsec shape; anything else passes through.
		if let Some(formatted) =
			message.event_timestamp.as_deref().and_then(format_event_timestamp)
		{
			message.event_timestamp = Some(formatted);
		}

		messages.push(message);
	}

	Ok(messages)
}

fn format_event_timestamp(raw: &str) -> Option<String> {
	let (sec, nsec) = raw.split_once('.')?;
	let sec: i64 = sec.parse().ok()?;
	let nsec: i64 = nsec.parse().ok()?;
	let at = OffsetDateTime::from_unix_timestamp(sec).ok()? + Duration::nanoseconds(nsec);

	at.format(&Rfc2822).ok()
}
