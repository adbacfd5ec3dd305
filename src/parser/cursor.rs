/*!
 * Token Cursor
 * Read cursor over an immutable token sequence
 */

use super::grammar::{ParserState, SyntaxError};
use super::lexer::{Token, TokenClass};

/// Front-to-back reader with one token of lookahead
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    position: usize,
    lines_closed: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            lines_closed: 0,
        }
    }

    #[inline]
    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    /// Consume and return the next token
    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        if matches!(token, Token::EndOfLine) {
            self.lines_closed += 1;
        }
        Some(token)
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// 1-based index of the process line currently being read
    #[inline]
    pub fn line(&self) -> usize {
        self.lines_closed + 1
    }

    #[inline]
    pub fn remaining(&self) -> &'a [Token] {
        &self.tokens[self.position..]
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Consume an identifier or fail in `state`
    pub fn expect_identifier(&mut self, state: ParserState) -> Result<&'a str, SyntaxError> {
        match self.peek() {
            Some(Token::Identifier(name)) => {
                self.advance();
                Ok(name.as_str())
            }
            other => Err(self.unexpected(state, TokenClass::Identifier, other)),
        }
    }

    /// Consume an integer or fail in `state`
    pub fn expect_integer(&mut self, state: ParserState) -> Result<u64, SyntaxError> {
        match self.peek() {
            Some(Token::Integer(value)) => {
                self.advance();
                Ok(*value)
            }
            other => Err(self.unexpected(state, TokenClass::Integer, other)),
        }
    }

    /// Consume a payload-free token of `class` or fail in `state`
    pub fn expect(&mut self, class: TokenClass, state: ParserState) -> Result<(), SyntaxError> {
        match self.peek() {
            Some(token) if token.class() == class => {
                self.advance();
                Ok(())
            }
            other => Err(self.unexpected(state, class, other)),
        }
    }

    pub fn unexpected(
        &self,
        state: ParserState,
        expected: TokenClass,
        found: Option<&Token>,
    ) -> SyntaxError {
        SyntaxError {
            state,
            expected,
            found: found.map(Token::class),
            position: self.position,
            line: self.line(),
        }
    }
}
