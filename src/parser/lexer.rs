/*!
 * Process File Lexer
 * Line-oriented tokenization of process descriptions using logos
 *
 * Blank lines and lines starting with `#` are skipped without emitting anything.
 * Every other line yields its identifiers, integers and colons followed by one
 * `EndOfLine` token. The first unrecognized input aborts the whole scan.
 */

use logos::Logos;
use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

/// Marks a line as a comment when it is the first non-blank character
pub const COMMENT_PREFIX: char = '#';

/// Raw lexemes recognized inside a single line
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"\s+")]
enum Lexeme {
    #[regex("[A-Za-z_][A-Za-z_0-9]*", |lex| lex.slice().to_owned())]
    Identifier(String),

    // Overflowing literals fail the callback and surface as lexing errors
    #[regex("[0-9]+", |lex| lex.slice().parse::<u64>().ok())]
    Integer(u64),

    #[token(":")]
    Colon,
}

/// Token of the process description language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Identifier(String),
    Integer(u64),
    Colon,
    EndOfLine,
}

impl Token {
    pub const fn class(&self) -> TokenClass {
        match self {
            Self::Identifier(_) => TokenClass::Identifier,
            Self::Integer(_) => TokenClass::Integer,
            Self::Colon => TokenClass::Colon,
            Self::EndOfLine => TokenClass::EndOfLine,
        }
    }
}

impl From<Lexeme> for Token {
    fn from(lexeme: Lexeme) -> Self {
        match lexeme {
            Lexeme::Identifier(name) => Self::Identifier(name),
            Lexeme::Integer(value) => Self::Integer(value),
            Lexeme::Colon => Self::Colon,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(name) => write!(f, "identifier `{}`", name),
            Self::Integer(value) => write!(f, "integer `{}`", value),
            Self::Colon => f.write_str("`:`"),
            Self::EndOfLine => f.write_str("end of line"),
        }
    }
}

/// Token kind without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Identifier,
    Integer,
    Colon,
    EndOfLine,
}

impl TokenClass {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Integer => "integer",
            Self::Colon => "colon",
            Self::EndOfLine => "end of line",
        }
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the lexer gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// No rule matches at the current position
    UnrecognizedInput,
    /// Digits that do not fit a 64-bit tick count
    IntegerOutOfRange,
}

/// Unrecognized character sequence in the source text
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
#[error("{kind} at line {line}, column {column}: `{remainder}`")]
#[diagnostic(
    code(lexer::unrecognized_input),
    help("Only identifiers, non-negative integers, colons and whitespace are allowed.")
)]
pub struct LexError {
    pub kind: LexErrorKind,
    /// 1-based line in the source text
    pub line: usize,
    /// 1-based byte column in the source line
    pub column: usize,
    /// Unmatched rest of the line
    pub remainder: String,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnrecognizedInput => "unrecognized input",
            Self::IntegerOutOfRange => "integer out of range",
        })
    }
}

/// Tokenize a whole process description
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();

    for (index, raw_line) in source.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let indent = raw_line.len() - raw_line.trim_start().len();
        let mut lexer = Lexeme::lexer(line);

        while let Some(result) = lexer.next() {
            match result {
                Ok(lexeme) => tokens.push(lexeme.into()),
                Err(()) => {
                    let span = lexer.span();
                    let kind = if lexer.slice().bytes().all(|b| b.is_ascii_digit()) {
                        LexErrorKind::IntegerOutOfRange
                    } else {
                        LexErrorKind::UnrecognizedInput
                    };
                    return Err(LexError {
                        kind,
                        line: index + 1,
                        column: indent + span.start + 1,
                        remainder: line[span.start..].to_string(),
                    });
                }
            }
        }

        tokens.push(Token::EndOfLine);
    }

    tracing::trace!(tokens = tokens.len(), "tokenized process source");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Token {
        Token::Identifier(name.to_string())
    }

    #[test]
    fn test_single_line() {
        let tokens = tokenize("P1 0 5").unwrap();
        assert_eq!(
            tokens,
            vec![ident("P1"), Token::Integer(0), Token::Integer(5), Token::EndOfLine]
        );
    }

    #[test]
    fn test_io_pairs_with_and_without_spaces() {
        let tokens = tokenize("A 1 4 2:3 5 : 1").unwrap();
        assert_eq!(
            tokens,
            vec![
                ident("A"),
                Token::Integer(1),
                Token::Integer(4),
                Token::Integer(2),
                Token::Colon,
                Token::Integer(3),
                Token::Integer(5),
                Token::Colon,
                Token::Integer(1),
                Token::EndOfLine,
            ]
        );
    }

    #[test]
    fn test_comments_and_blank_lines_emit_nothing() {
        let source = "# header\n\n   \n  # indented comment\nA 0 1\n";
        let tokens = tokenize(source).unwrap();
        assert_eq!(
            tokens,
            vec![ident("A"), Token::Integer(0), Token::Integer(1), Token::EndOfLine]
        );
    }

    #[test]
    fn test_empty_source() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("# only a comment").unwrap().is_empty());
    }

    #[test]
    fn test_digits_then_letters_split() {
        let tokens = tokenize("12ab").unwrap();
        assert_eq!(tokens, vec![Token::Integer(12), ident("ab"), Token::EndOfLine]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let tokens = tokenize("A 0 1\r\nB 1 2\r\n").unwrap();
        assert_eq!(tokens.iter().filter(|t| **t == Token::EndOfLine).count(), 2);
    }

    #[test]
    fn test_unrecognized_character() {
        let err = tokenize("A 0 1\n  B 1 -2").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnrecognizedInput);
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 7);
        assert_eq!(err.remainder, "-2");
    }

    #[test]
    fn test_integer_overflow() {
        let err = tokenize("A 0 99999999999999999999999").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::IntegerOutOfRange);
        assert_eq!(err.remainder, "99999999999999999999999");
    }

    #[test]
    fn test_unicode_whitespace_separates_tokens() {
        let tokens = tokenize("A\u{00A0}0 1").unwrap();
        assert_eq!(
            tokens,
            vec![ident("A"), Token::Integer(0), Token::Integer(1), Token::EndOfLine]
        );
        assert_eq!(tokenize("\u{00A0}A 0 1").unwrap(), tokens);
    }

    #[test]
    fn test_hash_inside_line_is_an_error() {
        let err = tokenize("A 0 1 # trailing").unwrap_err();
        assert_eq!(err.remainder, "# trailing");
    }
}
