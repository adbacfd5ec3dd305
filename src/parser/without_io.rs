/*!
 * Plain Grammar
 * `Identifier Integer Integer EndOfLine`
 */

use super::cursor::TokenCursor;
use super::grammar::{Grammar, ParserState, SyntaxError};
use super::lexer::TokenClass;
use crate::process::Process;

/// Grammar without I/O descriptors
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainGrammar;

impl Grammar for PlainGrammar {
    fn parse_tail(
        &self,
        cursor: &mut TokenCursor<'_>,
        _process: &mut Process,
    ) -> Result<(), SyntaxError> {
        cursor.expect(TokenClass::EndOfLine, ParserState::CheckNext)
    }
}
