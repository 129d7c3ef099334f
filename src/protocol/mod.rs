//! Protocol Module
//!
//! Defines the in-band text protocol spoken between client and server.
//!
//! ## Wire Format
//!
//! There is no framing: one `write` on the sender is one message on the
//! receiver, read with a single `read` of at most [`MAX_MESSAGE_LEN`] bytes.
//!
//! ```text
//! client                                server
//!   │ ── "hello" ─────────────────────────▶ │
//!   │ ◀──────────────── "received: hello" ── │
//!   │ ── "/exit" ─────────────────────────▶ │
//!   │ ◀──── "exit command received, ..." ─── │
//!   │ ◀──────────────────────────── FIN ──── │
//! ```
//!
//! ### Control Tokens
//! - `/exit`: ends the exchange; the server acknowledges and closes
//! - `/help`: client-local, never transmitted

mod command;
mod message;
mod response;

pub use command::{Input, USAGE};
pub use message::{Message, Request};
pub use response::{build_response, respond, Reply};

/// Fixed buffer capacity; one slot is kept free, so a message is at most
/// one byte shorter
pub const BUFFER_SIZE: usize = 1024;

/// Largest message a single read can carry
pub const MAX_MESSAGE_LEN: usize = BUFFER_SIZE - 1;

/// Prefix the server puts in front of every echoed message
pub const RESPONSE_MARKER: &str = "received: ";

/// Sent by the server in reply to [`EXIT_TOKEN`], right before it closes
pub const EXIT_ACK: &str = "exit command received, closing connection";

/// Ends the exchange on both sides
pub const EXIT_TOKEN: &str = "/exit";

/// Shows usage on the client
pub const HELP_TOKEN: &str = "/help";
