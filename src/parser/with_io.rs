/*!
 * I/O Grammar
 * `Identifier Integer Integer (Integer Colon Integer)* EndOfLine`
 */

use super::cursor::TokenCursor;
use super::grammar::{Grammar, ParserState, SyntaxError};
use super::lexer::{Token, TokenClass};
use crate::process::{IoCycle, Process};

/// Grammar with trailing `start : duration` I/O pairs
#[derive(Debug, Clone, Copy, Default)]
pub struct IoGrammar;

impl Grammar for IoGrammar {
    fn parse_tail(
        &self,
        cursor: &mut TokenCursor<'_>,
        process: &mut Process,
    ) -> Result<(), SyntaxError> {
        // Pairs are only attached once the whole line closes
        let mut cycles = Vec::new();

        loop {
            match cursor.peek() {
                Some(Token::Integer(_)) => {
                    let start_at = cursor.expect_integer(ParserState::Io)?;
                    cursor.expect(TokenClass::Colon, ParserState::Io1)?;
                    let duration = cursor.expect_integer(ParserState::Io2)?;
                    cycles.push(IoCycle::new(start_at, duration));
                }
                Some(Token::EndOfLine) => {
                    cursor.advance();
                    process.io.extend(cycles);
                    return Ok(());
                }
                other => {
                    return Err(cursor.unexpected(ParserState::Io, TokenClass::EndOfLine, other))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::grammar::ProcessParser;
    use crate::parser::lexer::tokenize;

    fn parse(source: &str) -> Result<Vec<Process>, SyntaxError> {
        let tokens = tokenize(source).unwrap();
        ProcessParser::new(&tokens, IoGrammar).parse()
    }

    #[test]
    fn test_line_without_io() {
        let processes = parse("A 0 3").unwrap();
        assert_eq!(processes, vec![Process::new("A", 0, 3)]);
    }

    #[test]
    fn test_io_pairs_in_order() {
        let processes = parse("A 0 6 1:2 4:1\nB 2 3").unwrap();
        assert_eq!(
            processes[0].io,
            vec![IoCycle::new(1, 2), IoCycle::new(4, 1)]
        );
        assert!(processes[1].io.is_empty());
    }

    #[test]
    fn test_missing_colon() {
        let err = parse("A 0 6 1 2").unwrap_err();
        assert_eq!(err.state, ParserState::Io1);
        assert_eq!(err.expected, TokenClass::Colon);
        assert_eq!(err.found, Some(TokenClass::Integer));
    }

    #[test]
    fn test_missing_duration() {
        let err = parse("A 0 6 1:").unwrap_err();
        assert_eq!(err.state, ParserState::Io2);
        assert_eq!(err.found, Some(TokenClass::EndOfLine));
    }

    #[test]
    fn test_identifier_after_burst_time() {
        let err = parse("A 0 6 B").unwrap_err();
        assert_eq!(err.state, ParserState::Io);
        assert_eq!(err.found, Some(TokenClass::Identifier));
    }

    #[test]
    fn test_truncated_stream_fails_in_io_state() {
        let tokens = vec![
            Token::Identifier("A".into()),
            Token::Integer(0),
            Token::Integer(1),
        ];
        let err = ProcessParser::new(&tokens, IoGrammar).parse().unwrap_err();
        assert_eq!(err.state, ParserState::Io);
        assert_eq!(err.found, None);
    }
}
