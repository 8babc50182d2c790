use braid_domain::{Conversation, Message};

use crate::Directory;

/// Applies resolved display names to one message: the sender, the senders of
/// carried-through thread edits, and the channel.
pub async fn message(directory: &dyn Directory, message: &mut Message) {
	if let Some(user) = message.user.clone().filter(|user| !user.is_empty()) {
		message.user = Some(directory.resolve_user(&user).await);
	}
	if let Some(previous) = message.previous_message.as_deref_mut()
		&& let Some(user) = previous.user.clone().filter(|user| !user.is_empty())
	{
		previous.user = Some(directory.resolve_user(&user).await);
	}
	if let Some(sub) = message.sub_message.as_deref_mut()
		&& let Some(user) = sub.user.clone().filter(|user| !user.is_empty())
	{
		sub.user = Some(directory.resolve_user(&user).await);
	}

	message.channel_name = Some(directory.resolve_channel(&message.channel).await);
}

pub async fn messages(directory: &dyn Directory, messages: &mut [Message]) {
	for entry in messages {
		message(directory, entry).await;
	}
}

pub async fn conversations(directory: &dyn Directory, conversations: &mut [Conversation]) {
	for conversation in conversations {
		messages(directory, &mut conversation.messages).await;
	}
}
