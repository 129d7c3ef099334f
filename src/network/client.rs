//! Client Session
//!
//! Interactive loop: one operator line out, one server reply back.

use std::io::{BufRead, ErrorKind, Read, Write};
use std::net::TcpStream;

use crate::config::Config;
use crate::error::{EchoError, Result};
use crate::protocol::{Input, BUFFER_SIZE, MAX_MESSAGE_LEN, USAGE};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Operator typed `/exit`
    LocalExit,

    /// Operator input reached end of file
    InputClosed,

    /// Server closed the connection (zero-length read)
    ServerClosed,

    /// Sending the message failed
    SendFailed,

    /// Reading the reply failed
    ReadFailed,
}

/// A client session over any duplex byte stream
pub struct Session<S> {
    stream: S,
    buffer: [u8; BUFFER_SIZE],
}

impl Session<TcpStream> {
    /// Connect to the configured server
    pub fn connect(config: &Config) -> Result<Self> {
        let addr = config.server_addr;
        let stream =
            TcpStream::connect(addr).map_err(|source| EchoError::Connect { addr, source })?;

        tracing::info!("Connected to {}", addr);
        Ok(Self::new(stream))
    }
}

impl<S: Read + Write> Session<S> {
    /// Wrap an already connected stream
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            buffer: [0; BUFFER_SIZE],
        }
    }

    /// The underlying stream
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Run the loop until the operator leaves or the exchange breaks.
    ///
    /// The stream is dropped (closed) on every return path. `Err` means the
    /// operator's own terminal failed.
    pub fn run<R: BufRead, W: Write>(mut self, mut input: R, mut output: W) -> Result<SessionEnd> {
        writeln!(output, "{}", USAGE)?;

        let mut line = String::new();
        let end = loop {
            write!(output, "\n> ")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break SessionEnd::InputClosed;
            }

            match Input::parse(&line) {
                Input::Exit => {
                    writeln!(output, "Disconnecting...")?;
                    break SessionEnd::LocalExit;
                }
                Input::Help => writeln!(output, "{}", USAGE)?,
                Input::Empty => {}
                Input::Send(text) => {
                    if let Some(end) = self.exchange(text, &mut output)? {
                        break end;
                    }
                }
            }
        };

        drop(self.stream);
        writeln!(output, "Disconnected")?;
        Ok(end)
    }

    /// Send one message and print the one reply.
    ///
    /// Returns `Some` when the session has to end.
    fn exchange<W: Write>(&mut self, text: &str, output: &mut W) -> Result<Option<SessionEnd>> {
        if let Err(e) = self.stream.write_all(text.as_bytes()) {
            tracing::error!("Failed to send message: {}", e);
            return Ok(Some(SessionEnd::SendFailed));
        }

        let n = loop {
            match self.stream.read(&mut self.buffer[..MAX_MESSAGE_LEN]) {
                Ok(n) => break n,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::error!("Failed to read response: {}", e);
                    return Ok(Some(SessionEnd::ReadFailed));
                }
            }
        };

        if n == 0 {
            tracing::warn!("Server closed the connection");
            return Ok(Some(SessionEnd::ServerClosed));
        }

        writeln!(
            output,
            "Server: {}",
            String::from_utf8_lossy(&self.buffer[..n])
        )?;
        self.buffer[..n].fill(0);
        Ok(None)
    }
}
