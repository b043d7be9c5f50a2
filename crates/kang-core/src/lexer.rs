//! Lexer for the KANG language.
//!
//! Uses the `logos` crate for efficient tokenization. The token stream is only
//! used for display; the interpreter works on raw lines and never sees it.
//! Every character of the input ends up in exactly one token, so joining the
//! token texts gives back the input text.

use logos::Logos;
use serde::{Deserialize, Serialize};

use crate::span::{Position, Span};

/// Reserved words of the language.
pub const KEYWORDS: &[&str] = &[
    "vibe", "shout", "grind", "add", "sub", "mult", "div", "fr", "same", "keep", "vibing", "high",
];

/// Token kinds for the KANG language.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    #[regex(r"[ \t\r]+")]
    Whitespace,

    // Line comment, runs to end of line
    #[regex(r"//[^\n]*")]
    Comment,

    // Unterminated strings stop at end of line
    #[regex(r#""[^"\n]*"?"#)]
    String,

    #[regex(r"[0-9][0-9.]*")]
    Number,

    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("=")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("<")]
    #[token(">")]
    Operator,

    #[token("vibe")]
    #[token("shout")]
    #[token("grind")]
    #[token("add")]
    #[token("sub")]
    #[token("mult")]
    #[token("div")]
    #[token("fr")]
    #[token("same")]
    #[token("keep")]
    #[token("vibing")]
    #[token("high")]
    Keyword,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    #[token("\n")]
    Newline,

    // Any other single character
    #[regex(r".", priority = 0)]
    Unknown,
}

impl TokenKind {
    /// Lowercase name used in serialized output and theme lookups.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comment => "comment",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Operator => "operator",
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Newline => "newline",
            TokenKind::Unknown => "unknown",
        }
    }
}

/// A token with its kind, text, and source span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// 1-based line of the first character.
    pub fn line(&self) -> usize {
        self.span.start.line
    }

    /// 1-based column of the first character.
    pub fn column(&self) -> usize {
        self.span.start.column
    }
}

/// Lexer for the KANG language.
pub struct Lexer<'a> {
    source: &'a str,
    inner: logos::Lexer<'a, TokenKind>,
    current_line: usize,
    line_start_offset: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            inner: TokenKind::lexer(source),
            current_line: 1,
            line_start_offset: 0,
        }
    }

    /// Get the current position in the source.
    fn current_position(&self, offset: usize) -> Position {
        let column = self.source[self.line_start_offset..offset].chars().count() + 1;
        Position::new(self.current_line, column, offset)
    }

    /// Get the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token> {
        let result = self.inner.next()?;
        let range = self.inner.span();
        // `Unknown` matches any character, so errors should not occur
        let kind = result.unwrap_or(TokenKind::Unknown);
        let source = self.source;
        let text = &source[range.clone()];
        let span = Span::new(
            self.current_position(range.start),
            self.current_position(range.end),
        );

        if kind == TokenKind::Newline {
            self.current_line += 1;
            self.line_start_offset = range.end;
        }

        tracing::trace!(kind = kind.name(), text, line = span.start.line, "token");
        Some(Token::new(kind, text, span))
    }

    /// Tokenize the entire source.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Tokenize `source` from the start.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}
