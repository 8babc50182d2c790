mod error;
mod message;
mod timestamp;

pub use error::{Error, Result};
pub use message::{Conversation, Message};
pub use timestamp::Timestamp;
