//! Operator input
//!
//! Classifies the lines typed into the client.

use super::{EXIT_TOKEN, HELP_TOKEN};

/// Usage text shown by `/help` and once after connecting
pub const USAGE: &str = "\
Usage:
  type a message and press Enter to send it to the server
  type \"/exit\" to quit
  type \"/help\" to show this help";

/// One line of operator input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    /// Leave the session without contacting the server
    Exit,

    /// Print usage locally
    Help,

    /// Nothing to send
    Empty,

    /// Text to transmit
    Send(&'a str),
}

impl<'a> Input<'a> {
    /// Classify a line read from the terminal.
    ///
    /// Only the line terminator is stripped; tokens must match exactly.
    pub fn parse(line: &'a str) -> Self {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        match line {
            EXIT_TOKEN => Input::Exit,
            HELP_TOKEN => Input::Help,
            "" => Input::Empty,
            text => Input::Send(text),
        }
    }
}
