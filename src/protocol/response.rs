//! Response definitions
//!
//! Builds the server's answer to a request.

use bytes::{BufMut, Bytes, BytesMut};

use super::{Message, Request, EXIT_ACK, MAX_MESSAGE_LEN, RESPONSE_MARKER};

/// A response to send to the peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Bytes to write, never longer than [`MAX_MESSAGE_LEN`]
    pub payload: Bytes,

    /// Close the connection once the payload is written
    pub close_after: bool,
}

impl Reply {
    /// A reply that keeps the connection open
    pub fn echo(payload: Bytes) -> Self {
        Self {
            payload,
            close_after: false,
        }
    }

    /// The acknowledgment for an exit request
    pub fn exit_ack() -> Self {
        Self {
            payload: Bytes::from_static(EXIT_ACK.as_bytes()),
            close_after: true,
        }
    }
}

/// Produce the reply for a request
pub fn respond(request: Request) -> Reply {
    match request {
        Request::Exit => Reply::exit_ack(),
        Request::Echo(message) => Reply::echo(build_response(&message)),
    }
}

/// Marker followed by the message, cut to fit the buffer
pub fn build_response(message: &Message) -> Bytes {
    let len = (RESPONSE_MARKER.len() + message.len()).min(MAX_MESSAGE_LEN);
    let mut out = BytesMut::with_capacity(len);
    out.put_slice(RESPONSE_MARKER.as_bytes());
    out.put_slice(message.as_bytes());
    out.truncate(len);
    out.freeze()
}
