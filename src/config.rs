//! Configuration for echoline
//!
//! Centralized configuration with the fixed defaults both binaries run with
//! when started without arguments.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::{EchoError, Result};

/// Port shared by the server and the client
pub const DEFAULT_PORT: u16 = 8080;

/// Listen backlog passed to `listen(2)`
pub const DEFAULT_BACKLOG: i32 = 5;

/// Main configuration for a server or client process
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Server Configuration
    // -------------------------------------------------------------------------
    /// Address the listener binds to (all interfaces by default)
    pub listen_addr: SocketAddr,

    /// Maximum number of established connections queued for accept
    pub backlog: i32,

    /// Enable SO_REUSEADDR (and SO_REUSEPORT on unix) before binding
    pub reuse_address: bool,

    // -------------------------------------------------------------------------
    // Client Configuration
    // -------------------------------------------------------------------------
    /// Address the client session connects to
    pub server_addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            backlog: DEFAULT_BACKLOG,
            reuse_address: true,
            server_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Parse a `host:port` string into a socket address
pub fn parse_addr(addr: &str) -> Result<SocketAddr> {
    addr.parse()
        .map_err(|e| EchoError::Config(format!("invalid address '{}': {}", addr, e)))
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the address the listener binds to
    pub fn listen_addr(mut self, addr: SocketAddr) -> Self {
        self.config.listen_addr = addr;
        self
    }

    /// Set the listen backlog
    pub fn backlog(mut self, backlog: i32) -> Self {
        self.config.backlog = backlog;
        self
    }

    /// Enable or disable address/port reuse on the listener
    pub fn reuse_address(mut self, reuse: bool) -> Self {
        self.config.reuse_address = reuse;
        self
    }

    /// Set the address the client connects to
    pub fn server_addr(mut self, addr: SocketAddr) -> Self {
        self.config.server_addr = addr;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
