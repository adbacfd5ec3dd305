/*!
 * Parser Module
 * Process description language: lexer, cursor and the two line grammars
 */

pub mod cursor;
pub mod grammar;
pub mod lexer;
pub mod render;
pub mod with_io;
pub mod without_io;

// Re-export public API
pub use cursor::TokenCursor;
pub use grammar::{Grammar, GrammarVariant, ParserState, ProcessParser, SyntaxError};
pub use lexer::{tokenize, LexError, LexErrorKind, Token, TokenClass};
pub use render::{render_process, render_processes};
pub use with_io::IoGrammar;
pub use without_io::PlainGrammar;

use crate::core::types::SimResult;
use crate::process::Process;

/// Parse a token sequence with the chosen grammar
pub fn parse(tokens: &[Token], variant: GrammarVariant) -> Result<Vec<Process>, SyntaxError> {
    match variant {
        GrammarVariant::WithIo => ProcessParser::new(tokens, IoGrammar).parse(),
        GrammarVariant::WithoutIo => ProcessParser::new(tokens, PlainGrammar).parse(),
    }
}

/// Tokenize and parse a process description
pub fn parse_source(source: &str, variant: GrammarVariant) -> SimResult<Vec<Process>> {
    let tokens = tokenize(source)?;
    let processes = parse(&tokens, variant)?;
    tracing::debug!(
        processes = processes.len(),
        grammar = variant.as_str(),
        "parsed process source"
    );
    Ok(processes)
}
