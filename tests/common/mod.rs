//! Shared helpers for echoline integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::rc::Rc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use echoline::{Config, Server, ShutdownController};

/// Config bound to an OS-picked loopback port, so tests can run in parallel
pub fn loopback_config() -> Config {
    Config::builder()
        .listen_addr("127.0.0.1:0".parse().unwrap())
        .build()
}

/// A server running its accept loop on a background thread
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Arc<ShutdownController>,
    pub handle: JoinHandle<echoline::Result<()>>,
}

/// Bind with `config` and run the accept loop on a background thread
pub fn spawn_server_with(config: Config) -> TestServer {
    let shutdown = Arc::new(ShutdownController::new());
    let server = Server::bind(&config, Arc::clone(&shutdown)).unwrap();
    let addr = server.local_addr();
    let handle = thread::spawn(move || server.run());

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

pub fn spawn_server() -> TestServer {
    spawn_server_with(loopback_config())
}

/// Send one message and read exactly `expected_len` bytes back
pub fn exchange(stream: &mut TcpStream, message: &[u8], expected_len: usize) -> Vec<u8> {
    stream.write_all(message).unwrap();
    let mut reply = vec![0u8; expected_len];
    stream.read_exact(&mut reply).unwrap();
    reply
}

/// Byte stream that records writes and serves canned reads
#[derive(Clone, Default)]
pub struct MockStream {
    pub written: Rc<RefCell<Vec<u8>>>,
    pub write_calls: Rc<RefCell<usize>>,
    pub reply: Vec<u8>,

    /// Reads left to fail with `Interrupted` before serving `reply`
    pub interrupts: Rc<RefCell<usize>>,

    /// Every read fails with `ConnectionReset`
    pub fail_reads: bool,

    /// Every write fails with `BrokenPipe`
    pub fail_writes: bool,
}

impl MockStream {
    /// Every read returns `reply` in full
    pub fn replying(reply: &[u8]) -> Self {
        Self {
            reply: reply.to_vec(),
            ..Self::default()
        }
    }

    /// Reads fail as if the peer reset the connection
    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Writes fail as if the peer went away
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// The first `count` reads are interrupted by a signal
    pub fn interrupted(count: usize, reply: &[u8]) -> Self {
        Self {
            interrupts: Rc::new(RefCell::new(count)),
            ..Self::replying(reply)
        }
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        {
            let mut interrupts = self.interrupts.borrow_mut();
            if *interrupts > 0 {
                *interrupts -= 1;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
        }
        if self.fail_reads {
            return Err(io::Error::from(io::ErrorKind::ConnectionReset));
        }

        let n = self.reply.len().min(buf.len());
        buf[..n].copy_from_slice(&self.reply[..n]);
        Ok(n)
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        *self.write_calls.borrow_mut() += 1;
        if self.fail_writes {
            return Err(io::Error::from(io::ErrorKind::BrokenPipe));
        }
        self.written.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
