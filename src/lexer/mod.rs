//! Converts mylang source text into a flat stream of `Token`s.
mod error;
mod token;
mod token_kind;

pub use error::LexError;
pub use token::{Position, Token};
pub use token_kind::{keyword_or_ident, TokenKind};

use std::iter::Peekable;
use std::str::Chars;

pub type LexResult<T> = Result<T, LexError>;

/// Scans source text once, left to right, producing the longest token match at each position.
#[derive(Debug)]
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            col: 1,
        }
    }

    pub fn lex(source: &'a str) -> LexResult<Vec<Token>> {
        let mut lexer = Self::new(source);
        let mut tokens = Vec::new();

        while let Some(token) = lexer.next_token()? {
            tokens.push(token);
        }

        tokens.push(Token::new(TokenKind::Eof, (lexer.line, lexer.col)));
        Ok(tokens)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next();
        match c {
            Some('\n') => {
                self.line += 1;
                self.col = 1;
            }
            Some(_) => self.col += 1,
            None => {}
        }
        c
    }

    fn eat_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('#') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> LexResult<Option<Token>> {
        self.eat_whitespace_and_comments();

        let position = (self.line, self.col);

        let Some(c) = self.peek() else {
            return Ok(None);
        };

        let token = match c {
            'a'..='z' | 'A'..='Z' | '_' => self.lex_ident(position),
            '0'..='9' => self.lex_number(position),
            '"' => self.lex_string(position)?,
            _ => self.lex_operator(position)?,
        };

        Ok(Some(token))
    }

    fn lex_ident(&mut self, position: Position) -> Token {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                word.push(c);
                self.advance();
            } else {
                break;
            }
        }
        Token::new(keyword_or_ident(&word), position)
    }

    fn lex_number(&mut self, position: Position) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if self.peek() == Some('.') {
            text.push('.');
            self.advance();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    text.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        let value: f64 = text.parse().expect("number lexeme must parse as f64");
        Token::new(TokenKind::Number(value), position)
    }

    fn lex_string(&mut self, position: Position) -> LexResult<Token> {
        self.advance(); // opening quote
        let mut value = String::new();
        loop {
            match self.advance() {
                Some('"') => break,
                Some(c) => value.push(c),
                None => {
                    return Err(LexError::new("unterminated string literal", position));
                }
            }
        }
        Ok(Token::new(TokenKind::Str(value), position))
    }

    /// Two-character operators are attempted before their one-character prefixes
    /// (`==`/`!=`/`<=`/`>=` before `=`/`!`/`<`/`>`), since a greedy single-character match
    /// would otherwise shadow them.
    fn lex_operator(&mut self, position: Position) -> LexResult<Token> {
        let c = self.advance().expect("caller already peeked a character");
        let kind = match c {
            '=' if self.peek() == Some('=') => {
                self.advance();
                TokenKind::Eq
            }
            '!' if self.peek() == Some('=') => {
                self.advance();
                TokenKind::Ne
            }
            '<' if self.peek() == Some('=') => {
                self.advance();
                TokenKind::Le
            }
            '>' if self.peek() == Some('=') => {
                self.advance();
                TokenKind::Ge
            }
            '=' => TokenKind::Assign,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '!' => TokenKind::Not,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Mul,
            '/' => TokenKind::Div,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            other => return Err(LexError::new(format!("unexpected character '{other}'"), position)),
        };
        Ok(Token::new(kind, position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::lex(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_numbers_integer_and_fractional() {
        assert_eq!(
            kinds("1 2.5"),
            vec![TokenKind::Number(1.0), TokenKind::Number(2.5), TokenKind::Eof]
        );
    }

    #[test]
    fn lexes_strings_without_escapes() {
        assert_eq!(
            kinds(r#""hello world""#),
            vec![TokenKind::Str("hello world".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn two_char_operators_win_over_their_prefix() {
        assert_eq!(
            kinds("== != <= >= < > ="),
            vec![
                TokenKind::Eq,
                TokenKind::Ne,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Assign,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keywords_and_booleans_resolve_from_identifiers() {
        assert_eq!(
            kinds("if true and false"),
            vec![
                TokenKind::If,
                TokenKind::Boolean(true),
                TokenKind::And,
                TokenKind::Boolean(false),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_and_whitespace_are_discarded() {
        assert_eq!(
            kinds("# a full comment\nprint 1; # trailing"),
            vec![
                TokenKind::Print,
                TokenKind::Number(1.0),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unknown_character_is_a_lex_error() {
        let err = Lexer::lex("1 @ 2").unwrap_err();
        assert!(err.message.contains('@'));
    }

    #[test]
    fn every_token_position_points_at_a_distinct_non_overlapping_column() {
        // Each token covers a contiguous, non-overlapping slice of source, so positions
        // strictly increase token over token on a single line.
        let tokens = Lexer::lex("a = 1 + 2;").unwrap();
        let cols: Vec<usize> = tokens.iter().map(|t| t.position.1).collect();
        for pair in cols.windows(2) {
            assert!(pair[0] < pair[1], "columns did not advance: {cols:?}");
        }
    }
}
