//! # echoline
//!
//! A minimal synchronous TCP request/response system:
//! - A listener that serves every connection on its own thread
//! - A connection handler that echoes each message behind a fixed marker
//! - An interactive client that sends one line and prints one reply
//! - A shutdown controller that closes the live socket on Ctrl+C
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌───────────────────────┐        ┌──────────────────────────────┐
//! │    Client Session     │  TCP   │           Listener           │
//! │ (stdin ▸ send ▸ read) │───────▶│      (accept, backlog 5)     │
//! └───────────────────────┘        └──────────────┬───────────────┘
//!                                                 │ spawn (detached)
//!                                   ┌─────────────┼─────────────┐
//!                                   ▼             ▼             ▼
//!                             ┌──────────┐  ┌──────────┐  ┌──────────┐
//!                             │ Handler  │  │ Handler  │  │ Handler  │
//!                             └──────────┘  └──────────┘  └──────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod network;
pub mod protocol;
pub mod shutdown;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::Config;
pub use error::{EchoError, Result};
pub use network::{Server, Session, SessionEnd};
pub use shutdown::ShutdownController;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of echoline
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
