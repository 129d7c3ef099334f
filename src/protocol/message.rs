//! Message definitions
//!
//! A message is whatever one read returned.

use std::borrow::Cow;

use bytes::Bytes;

use super::{EXIT_TOKEN, MAX_MESSAGE_LEN};

/// Bytes received in a single read, at most [`MAX_MESSAGE_LEN`] long
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message(Bytes);

impl Message {
    /// Wrap the bytes of one read.
    ///
    /// Anything past [`MAX_MESSAGE_LEN`] is dropped, mirroring what a
    /// capacity-limited read would have delivered.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        let mut bytes = bytes.into();
        bytes.truncate(MAX_MESSAGE_LEN);
        Self(bytes)
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The message as text, with invalid UTF-8 replaced
    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact, case-sensitive match against the exit token
    pub fn is_exit(&self) -> bool {
        self.0.as_ref() == EXIT_TOKEN.as_bytes()
    }
}

impl From<&[u8]> for Message {
    fn from(bytes: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(bytes))
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::from(text.as_bytes())
    }
}

/// What the server makes of a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Peer asked to end the exchange
    Exit,

    /// Anything else is echoed back
    Echo(Message),
}

impl Request {
    /// Classify a received message
    pub fn parse(message: Message) -> Self {
        if message.is_exit() {
            Request::Exit
        } else {
            Request::Echo(message)
        }
    }
}
