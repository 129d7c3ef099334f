//! Shutdown Controller
//!
//! Process-wide context reached from the interrupt handler. It tracks the
//! one descriptor that must be closed when the operator hits Ctrl+C: the
//! listening socket on the server, the connection on the client.

use std::net::Shutdown;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use socket2::Socket;

use crate::error::{EchoError, Result};

/// Shared shutdown state
#[derive(Debug, Default)]
pub struct ShutdownController {
    /// Duplicate of the tracked descriptor; `None` once closed
    handle: Mutex<Option<Socket>>,

    /// Set once shutdown has started
    shutdown: AtomicBool,
}

impl ShutdownController {
    /// Create a controller with nothing tracked
    pub fn new() -> Self {
        Self::default()
    }

    /// Track the descriptor to close on shutdown.
    ///
    /// Pass a `try_clone` of the listener or stream: shutting the duplicate
    /// down wakes whoever is blocked on the original.
    pub fn track(&self, handle: impl Into<Socket>) {
        *self.handle.lock() = Some(handle.into());
    }

    /// Start shutdown.
    ///
    /// Returns `true` if a tracked descriptor was open and is now closed.
    pub fn shutdown(&self) -> bool {
        self.shutdown.store(true, Ordering::SeqCst);

        let Some(socket) = self.handle.lock().take() else {
            return false;
        };

        // A listening socket reports ENOTCONN on some platforms; the accept
        // is woken either way.
        if let Err(e) = socket.shutdown(Shutdown::Both) {
            tracing::debug!("shutdown on tracked socket: {}", e);
        }
        true
    }

    /// Whether shutdown has started
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Register the Ctrl+C handler for this process.
    ///
    /// The handler closes the tracked descriptor, prints a notice and exits
    /// with status 0. Only one handler can be installed per process.
    pub fn install(self: &Arc<Self>) -> Result<()> {
        let controller = Arc::clone(self);
        ctrlc::set_handler(move || {
            if controller.shutdown() {
                tracing::info!("Closed tracked socket");
            }
            println!("\nInterrupt received, shutting down...");
            std::process::exit(0);
        })
        .map_err(|e| EchoError::Signal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    #[test]
    fn test_shutdown_without_handle() {
        let controller = ShutdownController::new();
        assert!(!controller.is_shutdown());

        assert!(!controller.shutdown());
        assert!(controller.is_shutdown());
    }

    #[test]
    fn test_shutdown_closes_once() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let controller = ShutdownController::new();
        controller.track(listener.try_clone().unwrap());

        assert!(controller.shutdown());
        assert!(!controller.shutdown());
    }

    #[test]
    fn test_shutdown_wakes_blocked_reader() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let mut client = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
        let (_server_side, _) = listener.accept().unwrap();

        let controller = Arc::new(ShutdownController::new());
        controller.track(client.try_clone().unwrap());

        let reader = thread::spawn(move || {
            let mut buf = [0u8; 16];
            client.read(&mut buf).unwrap()
        });

        assert!(controller.shutdown());
        assert_eq!(reader.join().unwrap(), 0);
    }
}
