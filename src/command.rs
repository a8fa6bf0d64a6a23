//! In-client commands, read one per line.
//!
//! Lines look like `/vpn` or `vpn`; the leading slash is optional. Output
//! for the invoking context goes to the writer passed to
//! [`CommandRegistry::dispatch`].

use std::io::Write;
use std::str::FromStr;

use anyhow::Result;
use log::debug;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;

use crate::config::{COMMAND_NAME, REFRESH_ACK};
use crate::monitor::{MonitorHandle, RefreshSource};

/// Commands understood by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum CommandKind {
    /// Refresh the VPN status now
    Vpn,
    Help,
    Quit,
}

/// Registration record of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub kind: CommandKind,
    pub name: &'static str,
    pub description: &'static str,
    pub args: &'static str,
    pub args_description: &'static str,
    pub completion: &'static str,
}

/// One input line, parsed.
#[derive(Debug, PartialEq, Eq)]
pub enum ParsedLine<'a> {
    Empty,
    Known { kind: CommandKind, args: &'a str },
    Unknown(&'a str),
}

/// What the reader should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    Quit,
}

/// Why the command loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEnd {
    Quit,
    Eof,
    Cancelled,
}

/// The registered commands.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    specs: Vec<CommandSpec>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        let specs = CommandKind::iter().map(spec_for).collect();
        Self { specs }
    }

    pub fn specs(&self) -> &[CommandSpec] {
        &self.specs
    }

    /// Splits a line into command name and arguments.
    pub fn parse<'a>(&self, line: &'a str) -> ParsedLine<'a> {
        let line = line.trim();
        let line = line.strip_prefix('/').unwrap_or(line);
        if line.is_empty() {
            return ParsedLine::Empty;
        }

        let (name, args) = match line.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (line, ""),
        };
        match CommandKind::from_str(name) {
            Ok(kind) => ParsedLine::Known { kind, args },
            Err(_) => ParsedLine::Unknown(name),
        }
    }

    /// Runs one line.
    ///
    /// `vpn` queues exactly one refresh and prints one acknowledgement,
    /// whatever the current state. Arguments are ignored.
    ///
    /// # Errors
    ///
    /// Fails if the monitor has stopped or `out` cannot be written.
    pub async fn dispatch<W: Write>(
        &self,
        line: &str,
        out: &mut W,
        handle: &MonitorHandle,
    ) -> Result<Dispatch> {
        match self.parse(line) {
            ParsedLine::Empty => {}
            ParsedLine::Known {
                kind: CommandKind::Vpn,
                ..
            } => {
                handle.refresh(RefreshSource::Command).await?;
                writeln!(out, "{}", REFRESH_ACK)?;
            }
            ParsedLine::Known {
                kind: CommandKind::Help,
                ..
            } => {
                for spec in &self.specs {
                    writeln!(out, "/{:<6} {}", spec.name, spec.description)?;
                }
            }
            ParsedLine::Known {
                kind: CommandKind::Quit,
                ..
            } => return Ok(Dispatch::Quit),
            ParsedLine::Unknown(name) => {
                writeln!(out, "Unknown command: {}", name)?;
            }
        }
        out.flush()?;
        Ok(Dispatch::Continue)
    }

    /// Reads commands from `reader` until `quit`, end of input, or `cancel`.
    pub async fn run_loop<R, W>(
        &self,
        reader: R,
        out: &mut W,
        handle: &MonitorHandle,
        cancel: &CancellationToken,
    ) -> Result<LoopEnd>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = reader.lines();
        loop {
            let line = tokio::select! {
                _ = cancel.cancelled() => return Ok(LoopEnd::Cancelled),
                line = lines.next_line() => line?,
            };
            let Some(line) = line else {
                return Ok(LoopEnd::Eof);
            };
            debug!("Command line: {:?}", line);
            if self.dispatch(&line, out, handle).await? == Dispatch::Quit {
                return Ok(LoopEnd::Quit);
            }
        }
    }
}

fn spec_for(kind: CommandKind) -> CommandSpec {
    match kind {
        CommandKind::Vpn => CommandSpec {
            kind,
            name: COMMAND_NAME,
            description: "Refresh VPN status",
            args: "",
            args_description: "",
            completion: "",
        },
        CommandKind::Help => CommandSpec {
            kind,
            name: kind.into(),
            description: "List commands",
            args: "",
            args_description: "",
            completion: "",
        },
        CommandKind::Quit => CommandSpec {
            kind,
            name: kind.into(),
            description: "Stop vpn_status",
            args: "",
            args_description: "",
            completion: "",
        },
    }
}
