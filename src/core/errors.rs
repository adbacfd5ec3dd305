/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use miette::Diagnostic;
use thiserror::Error;

pub use super::config::ConfigError;
pub use crate::parser::{LexError, SyntaxError};
pub use crate::session::SessionError;

/// Unified simulator error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum SimError {
    #[error("Lexical error: {0}")]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error("Syntax error: {0}")]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    #[diagnostic(transparent)]
    Session(#[from] SessionError),

    #[error("I/O error on {path}: {source}")]
    #[diagnostic(
        code(sim::io_error),
        help("Check that the file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SimError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
