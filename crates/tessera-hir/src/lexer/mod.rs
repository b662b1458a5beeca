//! Lexer for the Tessera language
//!
//! The lexer converts source code into tokens whose spans carry begin/end
//! line and column. The HIR only consumes those spans: a parser seeds each
//! node's explicit location from the tokens it was built from.

#![allow(clippy::cast_possible_truncation)] // We intentionally use u32 for offsets; files > 4GB are unsupported

mod span;
mod token;

pub use span::{LineIndex, Location, Span};
pub use token::TokenKind;

use logos::Logos;
use thiserror::Error;

/// A token with its kind, span, and source text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// Line/column range in the source code
    pub span: Span,
    /// The source text of the token
    pub lexeme: String,
}

impl Token {
    /// Create a new token
    #[must_use]
    pub fn new(kind: TokenKind, span: Span, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            lexeme: lexeme.into(),
        }
    }
}

/// Lexer error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
}

/// A lexer error with location information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedError {
    pub error: LexError,
    pub span: Span,
}

impl SpannedError {
    #[must_use]
    pub fn new(error: LexError, span: Span) -> Self {
        Self { error, span }
    }
}

impl std::fmt::Display for SpannedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.error, self.span)
    }
}

impl std::error::Error for SpannedError {}

/// The Tessera lexer
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, TokenKind>,
    lines: LineIndex,
    /// Collected errors during lexing
    errors: Vec<SpannedError>,
    finished: bool,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source code
    #[must_use]
    pub fn new(source: &'source str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            lines: LineIndex::new(source),
            errors: Vec::new(),
            finished: false,
        }
    }

    /// Tokenize the entire source, returning all tokens and any errors
    #[must_use]
    pub fn tokenize(source: &str) -> (Vec<Token>, Vec<SpannedError>) {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.collect_all();
        (tokens, lexer.errors)
    }

    /// Collect all tokens from the source, ending with [`TokenKind::Eof`]
    pub fn collect_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }

    /// Errors collected so far
    #[must_use]
    pub fn errors(&self) -> &[SpannedError] {
        &self.errors
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        match self.inner.next() {
            Some(Ok(kind)) => {
                let range = self.inner.span();
                let span = self.lines.span(range.start as u32, range.end as u32);
                Some(Token::new(kind, span, self.inner.slice()))
            }
            Some(Err(())) => {
                // Error recovery: logos has already skipped the offending slice
                let range = self.inner.span();
                let span = self.lines.span(range.start as u32, range.end as u32);
                let lexeme = self.inner.slice();
                let found = lexeme.chars().next().unwrap_or('\0');
                tracing::debug!(%span, ?found, "unexpected character");
                self.errors
                    .push(SpannedError::new(LexError::UnexpectedChar(found), span));
                Some(Token::new(TokenKind::Error, span, lexeme))
            }
            None => {
                self.finished = true;
                let offset = self.inner.source().len() as u32;
                let at = self.lines.location(offset);
                Some(Token::new(TokenKind::Eof, Span::from_locations(at, at), ""))
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
