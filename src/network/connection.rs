//! Connection Handler
//!
//! Serves one accepted client until it leaves.
//!
//! ```text
//! AWAIT_REQUEST ──▶ PROCESS ──▶ RESPOND ──┐
//!      ▲                                  │
//!      └──────────────────────────────────┤
//!                                         ▼
//!                                       CLOSE
//! ```

use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;

use crate::error::Result;
use crate::protocol::{respond, Message, Reply, Request, BUFFER_SIZE, MAX_MESSAGE_LEN};

/// Why a connection ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Peer closed its side (zero-length read)
    PeerClosed,

    /// Peer sent the exit token and got its acknowledgment
    ExitRequested,

    /// Reading from the peer failed
    ReadFailed,

    /// Writing to the peer failed
    WriteFailed,
}

/// Handler states
enum State {
    AwaitRequest,
    Process(Message),
    Respond(Reply),
    Close(CloseReason),
}

/// Handles a single client connection
pub struct Connection<S = TcpStream> {
    /// The socket, owned by this handler alone
    stream: S,

    /// Peer address for logging
    peer_addr: String,

    /// Read buffer, reused across requests
    buffer: [u8; BUFFER_SIZE],
}

impl Connection<TcpStream> {
    /// Create a new connection handler
    pub fn new(stream: TcpStream) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Replies are small and latency bound
        stream.set_nodelay(true)?;

        Ok(Self::with_peer(stream, peer_addr))
    }
}

impl<S: Read + Write> Connection<S> {
    /// Wrap an already accepted stream, labelled `peer_addr` in logs
    pub fn with_peer(stream: S, peer_addr: impl Into<String>) -> Self {
        Self {
            stream,
            peer_addr: peer_addr.into(),
            buffer: [0; BUFFER_SIZE],
        }
    }

    /// Handle the connection (blocking until closed).
    ///
    /// Consumes the handler so the socket is closed exactly once, when this
    /// returns.
    pub fn handle(mut self) -> CloseReason {
        tracing::info!("Client {} connected", self.peer_addr);

        let mut state = State::AwaitRequest;
        let reason = loop {
            state = match state {
                State::AwaitRequest => self.await_request(),
                State::Process(message) => self.process(message),
                State::Respond(reply) => self.send_reply(reply),
                State::Close(reason) => break reason,
            };
        };

        drop(self.stream);
        tracing::info!("Client {} connection closed ({:?})", self.peer_addr, reason);
        reason
    }

    /// Block for the next request
    fn await_request(&mut self) -> State {
        self.buffer.fill(0);

        loop {
            match self.stream.read(&mut self.buffer[..MAX_MESSAGE_LEN]) {
                Ok(0) => {
                    tracing::info!("Client {} disconnected", self.peer_addr);
                    return State::Close(CloseReason::PeerClosed);
                }
                Ok(n) => return State::Process(Message::from(&self.buffer[..n])),
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                    return State::Close(CloseReason::ReadFailed);
                }
            }
        }
    }

    /// Turn a message into a reply
    fn process(&self, message: Message) -> State {
        tracing::info!("Message from {}: {}", self.peer_addr, message.as_text());

        let request = Request::parse(message);
        if request == Request::Exit {
            tracing::info!("Client {} requested exit", self.peer_addr);
        }
        State::Respond(respond(request))
    }

    /// Write a reply, then either wait for the next request or close
    fn send_reply(&mut self, reply: Reply) -> State {
        if let Err(e) = self.stream.write_all(&reply.payload) {
            tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
            return State::Close(CloseReason::WriteFailed);
        }

        if reply.close_after {
            State::Close(CloseReason::ExitRequested)
        } else {
            State::AwaitRequest
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
