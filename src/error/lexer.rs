use crate::position::Span;

/// Lexer related errors.
#[derive(thiserror::Error, Debug)]
pub enum LexerError {
	/// Internal error, should never happen.
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	/// Errors encountered while scanning the source text.
	#[error(transparent)]
	LexError(#[from] LexError),
}

/// A specific lexical error with its source span.
#[derive(Debug)]
pub struct LexError {
	/// Where in the source the error occurred.
	pub span:   Span,
	/// The kind of lexical error.
	pub r#type: LexErrorType,
}

impl LexError {
	pub fn new(span: Span, r#type: LexErrorType) -> Self { Self { span, r#type } }
}

impl std::fmt::Display for LexError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "line {}: {}", self.span.start.line, self.r#type)
	}
}

impl std::error::Error for LexError {}

/// Kinds of lexical error.
#[derive(Debug)]
pub enum LexErrorType {
	/// Error for characters that begin no token.
	UnexpectedCharacter(char),
	/// Error for a bare `!`, which is only valid as part of `!=`.
	ExpectedEquals,
}

impl std::fmt::Display for LexErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use LexErrorType::*;
		match self {
			UnexpectedCharacter(c) => write!(f, "Unexpected character '{c}'"),
			ExpectedEquals => write!(f, "Expected '=' (after '!')"),
		}
	}
}
