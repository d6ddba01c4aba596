//! # Transcript
//!
//! The append-only conversation log. A [`Message`] is immutable once
//! appended; insertion order is display order. The transcript exposes no
//! mutable element access and no removal, so every past exchange stays
//! exactly as it was rendered.

use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Author {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

/// One utterance in the conversation. Created by the local input event or
/// the remote reply, never mutated afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub author: Author,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            author: Author::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            author: Author::Assistant,
            text: text.into(),
        }
    }
}

/// Ordered, append-only sequence of messages.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message and return a reference to it.
    pub fn push_user(&mut self, text: impl Into<String>) -> &Message {
        self.push(Message::user(text))
    }

    /// Append an assistant message and return a reference to it.
    pub fn push_assistant(&mut self, text: impl Into<String>) -> &Message {
        self.push(Message::assistant(text))
    }

    fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        self.messages.last().expect("just pushed")
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
