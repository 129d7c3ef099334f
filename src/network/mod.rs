//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor thread
//! - One detached thread per accepted connection, no pool
//! - Client session is single threaded, one request in flight

mod client;
mod connection;
mod server;

pub use client::{Session, SessionEnd};
pub use connection::{CloseReason, Connection};
pub use server::Server;
