use braid_domain::{Conversation, Error, Message, Timestamp};

fn message(channel: &str, ts: &str, text: &str) -> Message {
	Message {
		channel: channel.to_string(),
		ts: Timestamp::from(ts),
		text: text.to_string(),
		..Message::default()
	}
}

#[test]
fn timestamps_order_numerically() {
	let older = Timestamp::from("99.000100");
	let newer = Timestamp::from("100.000200");

	assert!(older < newer);
	assert!(Timestamp::from("1712345678.000200") < Timestamp::from("1712345679.000100"));
}

#[test]
fn equal_values_tie_on_bytes() {
	let plain = Timestamp::from("100");
	let fractional = Timestamp::from("100.0");

	assert_ne!(plain, fractional);
	assert!(plain < fractional);
}

#[test]
fn seconds_parses_fractional_epochs() {
	let ts = Timestamp::from("1712345678.000200");

	assert_eq!(ts.seconds().expect("parse failed"), 1_712_345_678.000_2);
}

#[test]
fn seconds_rejects_garbage() {
	let err = Timestamp::from("not-a-number").seconds().expect_err("parse succeeded");

	assert!(matches!(err, Error::MalformedTimestamp { raw } if raw == "not-a-number"));
}

#[test]
fn blank_messages_have_no_body() {
	assert!(message("general", "100", "").is_blank());
	assert!(message("general", "100", "   ").is_blank());
	assert!(!message("general", "100", "hello").is_blank());
}

#[test]
fn conversation_span_follows_message_order() {
	let conversation = Conversation::from_messages(vec![
		message("general", "100", "first"),
		message("general", "150", "second"),
		message("general", "200", "third"),
	]);

	assert_eq!(conversation.first_timestamp(), Some(&Timestamp::from("100")));
	assert_eq!(conversation.last_timestamp(), Some(&Timestamp::from("200")));
	assert_eq!(Conversation::default().first_timestamp(), None);
}

#[test]
fn message_deserializes_from_store_source() {
	let raw = serde_json::json!({
		"channel": "C024BE91L",
		"user": "U2147483697",
		"ts": "1355517523.000005",
		"event_ts": "1355517523.000005",
		"text": "Hello world",
		"message": {
			"channel": "C024BE91L",
			"ts": "1355517523.000005",
			"text": "Hello, world"
		}
	});
	let message: Message = serde_json::from_value(raw).expect("decode failed");

	assert_eq!(message.score, 0.0);
	assert_eq!(message.channel, "C024BE91L");
	assert_eq!(message.ts, Timestamp::from("1355517523.000005"));
	assert_eq!(message.sub_message.as_ref().map(|sub| sub.text.as_str()), Some("Hello, world"));
}
