//! Tokenizer for the DEPS dialect.
//!
//! Follows Python's lexical rules closely enough for real gclient files:
//! `#` comments, single/double/triple-quoted strings with `r`/`u` prefixes,
//! backslash continuation, and implicit line joining inside brackets. Newline
//! tokens are only produced at bracket depth zero, where they terminate a
//! statement.

use super::SyntaxError;
use crate::constants::MAX_NESTING;

/// Line/column of a token, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    Str(String),
    Int(i64),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Colon,
    Comma,
    Plus,
    Assign,
    Semicolon,
    Newline,
    Eof,
}

impl TokenKind {
    /// How the token reads in a diagnostic.
    pub fn describe(&self) -> String {
        match self {
            Self::Ident(name) => format!("name '{name}'"),
            Self::Str(_) => "string literal".to_string(),
            Self::Int(i) => format!("integer {i}"),
            Self::LBrace => "'{'".to_string(),
            Self::RBrace => "'}'".to_string(),
            Self::LBracket => "'['".to_string(),
            Self::RBracket => "']'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
            Self::Colon => "':'".to_string(),
            Self::Comma => "','".to_string(),
            Self::Plus => "'+'".to_string(),
            Self::Assign => "'='".to_string(),
            Self::Semicolon => "';'".to_string(),
            Self::Newline => "end of line".to_string(),
            Self::Eof => "end of file".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Position,
}

/// Splits DEPS source text into tokens.
pub struct Lexer {
    chars: Vec<char>,
    index: usize,
    line: usize,
    column: usize,
    depth: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            index: 0,
            line: 1,
            column: 1,
            depth: 0,
        }
    }

    /// Tokenizes the whole input. The last token is always [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens: Vec<Token> = Vec::new();

        loop {
            self.skip_blanks()?;
            let pos = self.position();

            let Some(ch) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    pos,
                });
                return Ok(tokens);
            };

            let kind = match ch {
                '\n' => {
                    self.bump();
                    // Collapse blank lines and suppress leading newlines
                    let redundant = tokens.last().is_none_or(|t| t.kind == TokenKind::Newline);
                    if self.depth > 0 || redundant {
                        continue;
                    }
                    TokenKind::Newline
                }
                '{' | '[' | '(' => {
                    self.bump();
                    self.depth += 1;
                    if self.depth > MAX_NESTING {
                        return Err(SyntaxError::new(
                            pos,
                            format!("too many nested brackets (limit {MAX_NESTING})"),
                        ));
                    }
                    match ch {
                        '{' => TokenKind::LBrace,
                        '[' => TokenKind::LBracket,
                        _ => TokenKind::LParen,
                    }
                }
                '}' | ']' | ')' => {
                    self.bump();
                    self.depth = self.depth.saturating_sub(1);
                    match ch {
                        '}' => TokenKind::RBrace,
                        ']' => TokenKind::RBracket,
                        _ => TokenKind::RParen,
                    }
                }
                ':' => {
                    self.bump();
                    TokenKind::Colon
                }
                ',' => {
                    self.bump();
                    TokenKind::Comma
                }
                '+' => {
                    self.bump();
                    TokenKind::Plus
                }
                ';' => {
                    self.bump();
                    TokenKind::Semicolon
                }
                '=' => {
                    self.bump();
                    if self.peek() == Some('=') {
                        return Err(SyntaxError::new(pos, "comparison operators are not supported"));
                    }
                    TokenKind::Assign
                }
                '\'' | '"' => TokenKind::Str(self.string(false)?),
                c if c.is_ascii_digit() => TokenKind::Int(self.integer(pos)?),
                c if c.is_alphabetic() || c == '_' => {
                    let ident = self.identifier();
                    let quoted = matches!(self.peek(), Some('\'' | '"'));
                    match ident.to_ascii_lowercase().as_str() {
                        "r" if quoted => TokenKind::Str(self.string(true)?),
                        "u" if quoted => TokenKind::Str(self.string(false)?),
                        "b" | "f" | "rb" | "br" | "fr" | "rf" if quoted => {
                            return Err(SyntaxError::new(
                                pos,
                                format!("string prefix '{ident}' is not supported"),
                            ));
                        }
                        _ => TokenKind::Ident(ident),
                    }
                }
                other => {
                    return Err(SyntaxError::new(pos, format!("unexpected character '{other}'")));
                }
            };

            tokens.push(Token {
                kind,
                pos,
            });
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.index + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.index += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    /// Skips spaces, comments and backslash continuations (but not newlines).
    fn skip_blanks(&mut self) -> Result<(), SyntaxError> {
        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' | '\r' | '\x0c' => {
                    self.bump();
                }
                '#' => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                }
                '\\' => {
                    let pos = self.position();
                    self.bump();
                    if self.peek() == Some('\r') {
                        self.bump();
                    }
                    if self.bump() != Some('\n') {
                        return Err(SyntaxError::new(
                            pos,
                            "unexpected character after line continuation",
                        ));
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        ident
    }

    fn integer(&mut self, pos: Position) -> Result<i64, SyntaxError> {
        let mut digits = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
            } else if ch != '_' {
                break;
            }
            self.bump();
        }
        if self.peek().is_some_and(|c| c.is_alphabetic() || c == '.') {
            return Err(SyntaxError::new(pos, "only decimal integer literals are supported"));
        }
        digits
            .parse()
            .map_err(|_| SyntaxError::new(pos, format!("integer literal {digits} is out of range")))
    }

    /// Up to three octal digits, the first already consumed.
    fn octal_escape(&mut self, first: char) -> char {
        let mut code = first.to_digit(8).unwrap_or(0);
        for _ in 0..2 {
            match self.peek().and_then(|c| c.to_digit(8)) {
                Some(digit) => {
                    code = code * 8 + digit;
                    self.bump();
                }
                None => break,
            }
        }
        // At most 0o777, always a valid scalar value
        char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Exactly `width` hex digits following `\x`, `\u` or `\U`.
    fn hex_escape(
        &mut self,
        start: Position,
        width: usize,
        kind: char,
    ) -> Result<char, SyntaxError> {
        let mut code: u32 = 0;
        for _ in 0..width {
            let Some(digit) = self.peek().and_then(|c| c.to_digit(16)) else {
                return Err(SyntaxError::new(
                    start,
                    format!("truncated \\{kind} escape: expected {width} hex digits"),
                ));
            };
            code = code * 16 + digit;
            self.bump();
        }
        char::from_u32(code).ok_or_else(|| {
            SyntaxError::new(start, format!("\\{kind}{code:0width$x} is not a valid character"))
        })
    }

    /// Lexes a string literal starting at the opening quote.
    fn string(&mut self, raw: bool) -> Result<String, SyntaxError> {
        let start = self.position();
        let quote = self.bump().unwrap_or('\'');
        let triple = self.peek() == Some(quote) && self.peek_at(1) == Some(quote);
        if triple {
            self.bump();
            self.bump();
        }

        let mut value = String::new();
        loop {
            let Some(ch) = self.bump() else {
                return Err(SyntaxError::new(start, "unterminated string literal"));
            };

            if ch == quote {
                if !triple {
                    return Ok(value);
                }
                if self.peek() == Some(quote) && self.peek_at(1) == Some(quote) {
                    self.bump();
                    self.bump();
                    return Ok(value);
                }
                value.push(ch);
                continue;
            }

            match ch {
                '\n' if !triple => {
                    return Err(SyntaxError::new(start, "unterminated string literal"));
                }
                '\\' => {
                    let Some(escaped) = self.bump() else {
                        return Err(SyntaxError::new(start, "unterminated string literal"));
                    };
                    if raw {
                        value.push('\\');
                        value.push(escaped);
                        continue;
                    }
                    match escaped {
                        '\n' => {}
                        '\\' => value.push('\\'),
                        '\'' => value.push('\''),
                        '"' => value.push('"'),
                        'a' => value.push('\x07'),
                        'b' => value.push('\x08'),
                        'f' => value.push('\x0c'),
                        'n' => value.push('\n'),
                        'r' => value.push('\r'),
                        't' => value.push('\t'),
                        'v' => value.push('\x0b'),
                        '0'..='7' => value.push(self.octal_escape(escaped)),
                        'x' => value.push(self.hex_escape(start, 2, 'x')?),
                        'u' => value.push(self.hex_escape(start, 4, 'u')?),
                        'U' => value.push(self.hex_escape(start, 8, 'U')?),
                        'N' => {
                            return Err(SyntaxError::new(
                                start,
                                "named unicode escapes (\\N{...}) are not supported",
                            ));
                        }
                        other => {
                            // Unknown escapes are kept verbatim
                            value.push('\\');
                            value.push(other);
                        }
                    }
                }
                other => value.push(other),
            }
        }
    }
}
