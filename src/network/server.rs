//! TCP Server
//!
//! Accepts connections and dispatches each to its own thread.

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use socket2::{Domain, Protocol, Socket, Type};

use crate::config::Config;
use crate::error::{EchoError, Result};
use crate::shutdown::ShutdownController;

use super::Connection;

/// TCP server for echoline
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    shutdown: Arc<ShutdownController>,
}

impl Server {
    /// Bind and start listening.
    ///
    /// The listening socket is handed to `shutdown` so an interrupt can
    /// close it.
    pub fn bind(config: &Config, shutdown: Arc<ShutdownController>) -> Result<Self> {
        let addr = config.listen_addr;
        let listener = bind_listener(addr, config.backlog, config.reuse_address)?;
        let local_addr = listener.local_addr()?;

        shutdown.track(listener.try_clone()?);

        tracing::info!("Listening on {} (backlog {})", local_addr, config.backlog);

        Ok(Self {
            listener,
            local_addr,
            shutdown,
        })
    }

    /// Address actually bound
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Run the accept loop (blocking).
    ///
    /// Returns once the shutdown controller has closed the listener.
    pub fn run(&self) -> Result<()> {
        loop {
            match self.listener.accept() {
                Ok((stream, peer)) => {
                    if self.shutdown.is_shutdown() {
                        break;
                    }
                    dispatch(stream, peer);
                }
                Err(_) if self.shutdown.is_shutdown() => break,
                Err(e) => {
                    tracing::warn!("Failed to accept connection: {}", e);
                }
            }
        }

        tracing::info!("Accept loop stopped");
        Ok(())
    }
}

/// Hand a connection to a fresh, detached thread
fn dispatch(stream: TcpStream, peer: SocketAddr) {
    let spawned = thread::Builder::new()
        .name(format!("conn-{}", peer))
        .spawn(move || match Connection::new(stream) {
            Ok(conn) => {
                conn.handle();
            }
            Err(e) => tracing::warn!("Failed to set up connection from {}: {}", peer, e),
        });

    // The stream moved into the closure is dropped with it on failure.
    if let Err(e) = spawned {
        tracing::error!("Failed to spawn handler for {}: {}", peer, e);
    }
}

/// Create, configure, bind and listen.
fn bind_listener(addr: SocketAddr, backlog: i32, reuse: bool) -> Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;

    if reuse {
        socket.set_reuse_address(true)?;
        #[cfg(unix)]
        socket.set_reuse_port(true)?;
    }

    socket
        .bind(&addr.into())
        .map_err(|source| EchoError::Bind { addr, source })?;
    socket
        .listen(backlog)
        .map_err(|source| EchoError::Listen { addr, source })?;

    Ok(socket.into())
}
