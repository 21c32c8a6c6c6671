pub mod cursor;
pub mod token;

use crate::error::{ParseError, ScanError};
use cursor::Cursor;
pub use token::{Basic, Token};

/// Character-stream-to-token-stream scanner with one-token lookahead.
///
/// Holds the "current" token set by the most recent `scan_token` call.
/// `None` is the end-of-input sentinel spec.md describes — idiomatic Rust
/// has no need for a dedicated marker value when `Option` already says it.
pub struct Scanner<'src> {
    cursor: Cursor<'src>,
    current: Option<Token>,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Scanner {
            cursor: Cursor::new(source),
            current: None,
        }
    }

    /// Advance past the current token and return the new one (or `None`
    /// at end of input). The new token also becomes `get_token`'s result.
    pub fn scan_token(&mut self) -> Result<Option<&Token>, ScanError> {
        self.current = self.lex_token()?;
        Ok(self.current.as_ref())
    }

    /// The current token without advancing. May be the end-of-input
    /// sentinel if `scan_token` hasn't been called yet or already hit EOF.
    pub fn get_token(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    /// Like `get_token`, but fails with `UnexpectedEof` at end of input.
    pub fn expect_token(&self) -> Result<&Token, ParseError> {
        self.current.as_ref().ok_or(ParseError::UnexpectedEof)
    }

    fn next_char(&mut self) -> Option<char> {
        self.cursor.next()
    }

    fn put_back(&mut self, c: char) {
        self.cursor.put_back(c);
    }

    fn lex_token(&mut self) -> Result<Option<Token>, ScanError> {
        self.skip_whitespace_and_comments();

        match self.next_char() {
            None => Ok(None),
            Some(c) if c.is_ascii_digit() => Ok(Some(self.scan_integer(c))),
            Some(c) if c.is_alphabetic() || c == '_' => Ok(Some(self.scan_word(c))),
            Some(c) => Ok(Some(self.scan_symbol(c)?)),
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.next_char() {
                None => return,
                Some(c) if c.is_whitespace() => continue,
                Some('/') => match self.next_char() {
                    Some('/') => {
                        // Line comment: skip to the next newline or EOF.
                        loop {
                            match self.next_char() {
                                None => return,
                                Some('\n') => break,
                                Some(_) => continue,
                            }
                        }
                    }
                    Some(other) => {
                        self.put_back(other);
                        self.put_back('/');
                        return;
                    }
                    None => {
                        self.put_back('/');
                        return;
                    }
                },
                Some(c) => {
                    self.put_back(c);
                    return;
                }
            }
        }
    }

    /// Consume digits, base-10 accumulate, put back the first non-digit.
    fn scan_integer(&mut self, first: char) -> Token {
        let mut value: i32 = first.to_digit(10).unwrap() as i32;

        loop {
            match self.next_char() {
                Some(c) if c.is_ascii_digit() => {
                    value = value.wrapping_mul(10).wrapping_add(c.to_digit(10).unwrap() as i32);
                }
                Some(c) => {
                    self.put_back(c);
                    break;
                }
                None => break,
            }
        }

        Token::IntegerLiteral(value)
    }

    /// Consume letters/digits/underscores, then classify the whole word as
    /// a keyword or a plain identifier.
    fn scan_word(&mut self, first: char) -> Token {
        let mut word = String::new();
        word.push(first);

        loop {
            match self.next_char() {
                Some(c) if c.is_alphanumeric() || c == '_' => word.push(c),
                Some(c) => {
                    self.put_back(c);
                    break;
                }
                None => break,
            }
        }

        match Basic::from_keyword(&word) {
            Some(kind) => Token::Basic(kind),
            None => Token::Identifier(word),
        }
    }

    /// Maximal munch: grow `buffer` while it stays a prefix of some
    /// symbol's lexeme; once extending fails, put back the offending
    /// character and backtrack one character at a time until `buffer`
    /// exactly matches a symbol.
    fn scan_symbol(&mut self, first: char) -> Result<Token, ScanError> {
        let mut buffer = String::new();
        buffer.push(first);

        loop {
            match self.next_char() {
                Some(c) => {
                    let mut candidate = buffer.clone();
                    candidate.push(c);

                    if Basic::is_symbol_prefix(&candidate) {
                        buffer = candidate;
                    } else {
                        self.put_back(c);
                        break;
                    }
                }
                None => break,
            }
        }

        loop {
            if let Some(kind) = Basic::from_symbol(&buffer) {
                return Ok(Token::Basic(kind));
            }

            match buffer.pop() {
                Some(c) => self.put_back(c),
                None => return Err(ScanError::UnexpectedCharacter(first)),
            }
        }
    }
}
