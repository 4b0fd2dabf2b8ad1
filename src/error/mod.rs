pub mod lexer;
pub mod parser;
pub mod runtime;

use lexer::{LexError, LexerError};
use parser::{ParserError, SyntaxError};
use runtime::RuntimeError;

/// FlintError is the top-level error type for the interpreter pipeline.
#[derive(thiserror::Error, Debug)]
pub enum FlintError {
	/// Internal error, should never happen.
	#[error("InternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// A lexical error in the source text.
	#[error("{0}")]
	LexError(#[from] LexError),
	/// A syntax error in the token stream.
	#[error("{0}")]
	SyntaxError(#[from] SyntaxError),
	/// An error raised while evaluating the AST.
	#[error("{0}")]
	RuntimeError(#[from] RuntimeError),
}

impl From<LexerError> for FlintError {
	fn from(error: LexerError) -> Self {
		match error {
			LexerError::InternalError(e) => FlintError::InternalError(e),
			LexerError::LexError(e) => FlintError::LexError(e),
		}
	}
}

impl From<ParserError> for FlintError {
	fn from(error: ParserError) -> Self {
		match error {
			ParserError::InternalError(e) => FlintError::InternalError(e),
			ParserError::SyntaxError(e) => FlintError::SyntaxError(e),
		}
	}
}
