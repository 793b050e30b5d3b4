//! The AGI command/acknowledgment dialogue.
//!
//! One invocation walks a fixed sequence of states:
//!
//! ```text
//! Start -> AwaitingArguments -> InvokingResolver -> ParsingResponse
//!       -> Unresolved(ok) | Resolved -> EmittingDestination(ok)
//!       |  ArgError(fail) | InvokeError(fail) | ParseError(fail)
//! ```
//!
//! Nothing is retried; every failure ends the invocation. After each
//! command line the engine sends exactly one acknowledgment line, so
//! command emission and acknowledgment consumption live in a single
//! method and cannot get out of step.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::address::ResolvedAddress;
use crate::args::AgiVariables;
use crate::error::{AgiError, Result};
use crate::exec::CommandExecutor;
use crate::resolver::LookupRequest;

pub const VAR_STATUS: &str = "SDNAAGI_STATUS";
pub const VAR_DEST: &str = "SDNAAGI_DEST";
pub const STATUS_RESOLVED: &str = "RESOLVED";
pub const STATUS_UNRESOLVED: &str = "UNRESOLVED";

/// Both halves of the AGI channel plus the diagnostics toggle.
///
/// Diagnostics are an explicit construction-time flag, not process
/// state; they ride the same output stream as commands but under the
/// `VERBOSE` prefix, which the engine does not answer.
pub struct Responder<R, W> {
    input: R,
    output: W,
    debug: bool,
    ack: String,
}

impl<R: BufRead, W: Write> Responder<R, W> {
    pub fn new(input: R, output: W, debug: bool) -> Self {
        Responder {
            input,
            output,
            debug,
            ack: String::new(),
        }
    }

    /// Emit an in-band diagnostic. No acknowledgment follows these.
    pub fn verbose(&mut self, message: &str) -> io::Result<()> {
        if !self.debug {
            return Ok(());
        }
        writeln!(self.output, "VERBOSE \"{message}\"")?;
        self.output.flush()
    }

    /// Emit a SET VARIABLE command and consume the engine's one-line
    /// acknowledgment.
    pub fn set_variable(&mut self, name: &str, value: &str) -> io::Result<()> {
        writeln!(self.output, "SET VARIABLE \"{name}\" \"{value}\"")?;
        self.output.flush()?;
        self.read_ack()
    }

    fn read_ack(&mut self) -> io::Result<()> {
        self.ack.clear();
        self.input.read_line(&mut self.ack)?;
        Ok(())
    }

    /// Consume the variable preamble up to its blank-line terminator.
    ///
    /// The blank line is the protocol's end-of-preamble marker, not end
    /// of stream; the channel stays open for acknowledgments afterwards.
    pub fn read_variables(&mut self) -> io::Result<AgiVariables> {
        let mut vars = AgiVariables::default();
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }
            self.verbose(trimmed)?;
            vars.insert_line(trimmed);
        }
        debug!(count = vars.len(), "preamble consumed");
        Ok(vars)
    }
}

/// Drive one complete invocation over the given channel endpoints.
pub fn run<R: BufRead, W: Write>(
    input: R,
    output: W,
    executor: &dyn CommandExecutor,
    debug: bool,
) -> Result<()> {
    let mut agi = Responder::new(input, output, debug);
    agi.verbose("started")?;

    let vars = agi.read_variables()?;
    let request = match LookupRequest::from_variables(&vars) {
        Ok(request) => request,
        Err(err) => {
            agi.verbose(
                "Not enough arguments, need resolver binary path, \
                 instance directory and number to look up",
            )?;
            return Err(err);
        }
    };

    let captured = match request.resolve(executor) {
        Ok(stdout) => stdout,
        Err(err) => {
            agi.verbose(&err.to_string())?;
            return Err(err);
        }
    };

    // Only the first record is consulted; multiple matches are not
    // disambiguated at this layer.
    let first = captured.lines().next().unwrap_or("");
    agi.verbose(&format!("Looking at {first}"))?;

    match ResolvedAddress::parse(first) {
        ResolvedAddress::Unresolved => {
            agi.set_variable(VAR_STATUS, STATUS_UNRESOLVED)?;
            Ok(())
        }
        ResolvedAddress::UnknownScheme(raw) => {
            agi.verbose(&format!("Unknown method for URI {raw}"))?;
            Err(AgiError::UnknownScheme(raw))
        }
        addr @ (ResolvedAddress::Sip(_) | ResolvedAddress::Sid(_)) => {
            agi.verbose("Resolved it!")?;
            agi.set_variable(VAR_STATUS, STATUS_RESOLVED)?;
            if let Some(dest) = addr.destination() {
                agi.set_variable(VAR_DEST, &dest)?;
            }
            Ok(())
        }
    }
}
