/*!
 * Process Grammar Driver
 * Shared state machine for both process file grammars
 *
 * Every line is `Identifier Integer Integer <tail>`; the variants differ only
 * in the tail. After a line closes, parsing continues only when the next token
 * is an identifier.
 */

use super::cursor::TokenCursor;
use super::lexer::{Token, TokenClass};
use crate::core::config::ConfigError;
use crate::process::Process;
use miette::Diagnostic;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Parser state machine position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserState {
    /// Start of a process line
    Line,
    /// Arrival time
    At,
    /// Burst time
    Bt,
    /// I/O start or end of line
    Io,
    /// Colon of an I/O pair
    Io1,
    /// Duration of an I/O pair
    Io2,
    /// Line close and lookahead for the next process
    CheckNext,
}

impl ParserState {
    /// What this state requires, phrased for error messages
    pub const fn expectation(&self) -> &'static str {
        match self {
            Self::Line => "a process line must start with an identifier",
            Self::At => "after an identifier, the arrival time integer is required",
            Self::Bt => "after the arrival time, the burst time integer is required",
            Self::Io => {
                "after the burst time, an I/O start integer or the end of the line is required"
            }
            Self::Io1 => "after an I/O start, a colon is required",
            Self::Io2 => "after a colon, the I/O duration integer is required",
            Self::CheckNext => "the process line must end after the burst time",
        }
    }
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Line => "line",
            Self::At => "arrival time",
            Self::Bt => "burst time",
            Self::Io => "io",
            Self::Io1 => "io colon",
            Self::Io2 => "io duration",
            Self::CheckNext => "check next",
        };
        f.write_str(name)
    }
}

/// Token of the wrong kind, or end of stream, at a parser state
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
#[error(
    "syntax error on process line {line} ({state} state): {}, found {}",
    ParserState::expectation(.state),
    found_text(.found)
)]
#[diagnostic(
    code(parser::syntax_error),
    help("Each process line reads `<name> <arrival> <burst> [<io start> : <io duration>]*`.")
)]
pub struct SyntaxError {
    pub state: ParserState,
    pub expected: TokenClass,
    /// `None` when the token stream ended
    pub found: Option<TokenClass>,
    /// Index of the offending token
    pub position: usize,
    /// 1-based process line, counting only lines that produced tokens
    pub line: usize,
}

fn found_text(found: &Option<TokenClass>) -> &'static str {
    match found {
        Some(class) => class.as_str(),
        None => "end of input",
    }
}

/// Which grammar to parse a process file with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrammarVariant {
    /// `name arrival burst (start : duration)*`
    #[default]
    WithIo,
    /// `name arrival burst`
    WithoutIo,
}

impl GrammarVariant {
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "io" | "with_io" | "withio" => Ok(Self::WithIo),
            "no_io" | "noio" | "without_io" | "withoutio" => Ok(Self::WithoutIo),
            _ => Err(ConfigError::InvalidGrammar(s.to_string())),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WithIo => "with_io",
            Self::WithoutIo => "without_io",
        }
    }
}

impl Serialize for GrammarVariant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GrammarVariant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Grammar-specific part of a process line
pub trait Grammar {
    /// Parse everything after the burst time, including the closing end of line
    fn parse_tail(
        &self,
        cursor: &mut TokenCursor<'_>,
        process: &mut Process,
    ) -> Result<(), SyntaxError>;
}

/// Shared driver: `Line -> At -> Bt -> <tail> -> CheckNext`
pub struct ProcessParser<'a, G> {
    cursor: TokenCursor<'a>,
    grammar: G,
    processes: Vec<Process>,
}

impl<'a, G: Grammar> ProcessParser<'a, G> {
    pub fn new(tokens: &'a [Token], grammar: G) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            grammar,
            processes: Vec::new(),
        }
    }

    /// Run the state machine to completion; the first error aborts the parse
    pub fn parse(mut self) -> Result<Vec<Process>, SyntaxError> {
        let name = self.cursor.expect_identifier(ParserState::Line)?;
        self.parse_from(name)?;

        loop {
            match self.cursor.peek() {
                Some(Token::Identifier(_)) => {
                    let name = self.cursor.expect_identifier(ParserState::CheckNext)?;
                    self.parse_from(name)?;
                }
                Some(token) => {
                    warn!(
                        line = self.cursor.line(),
                        next = %token,
                        ignored = self.cursor.remaining().len(),
                        "process list ends before a line not starting with an identifier"
                    );
                    break;
                }
                None => break,
            }
        }

        Ok(self.processes)
    }

    fn parse_from(&mut self, name: &str) -> Result<(), SyntaxError> {
        let arrived_at = self.cursor.expect_integer(ParserState::At)?;
        let burst_time = self.cursor.expect_integer(ParserState::Bt)?;

        let mut process = Process::new(name, arrived_at, burst_time);
        self.grammar.parse_tail(&mut self.cursor, &mut process)?;

        debug!(
            name = %process.name,
            arrived_at = process.arrived_at,
            burst_time = process.burst_time,
            io_cycles = process.io.len(),
            "parsed process"
        );
        self.processes.push(process);
        Ok(())
    }
}
