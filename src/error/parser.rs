use crate::position::Span;

/// Parser related errors.
#[derive(thiserror::Error, Debug)]
pub enum ParserError {
	/// Internal error, should never happen.
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	/// Errors encountered while parsing the token stream.
	#[error(transparent)]
	SyntaxError(#[from] SyntaxError),
}

/// A syntax error with the span of the offending token(s).
#[derive(Debug)]
pub struct SyntaxError {
	pub span:   Span,
	pub r#type: SyntaxErrorType,
}

impl SyntaxError {
	pub fn new(span: Span, r#type: SyntaxErrorType) -> Self { Self { span, r#type } }
}

impl std::fmt::Display for SyntaxError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "line {}: {}", self.span.start.line, self.r#type)
	}
}

impl std::error::Error for SyntaxError {}

/// Kinds of syntax error.
#[derive(Debug, PartialEq, Eq)]
pub enum SyntaxErrorType {
	/// The stream held more than one expression, or a token no production
	/// could use.
	InvalidSyntax,
	/// No atom production matched.
	ExpectedValue,
	/// An identifier was required, e.g. after `let`.
	ExpectedIdentifier,
	/// A specific token was required, e.g. `=` after a `let` name.
	ExpectedToken(&'static str),
	/// A keyword was required, e.g. `then` after an `if` condition.
	ExpectedKeyword(&'static str),
	/// An argument or parameter list neither continued nor closed.
	ExpectedCommaOrParen,
	/// An anonymous `fun` reached neither a name nor a parameter list.
	ExpectedIdentifierOrParen,
}

impl std::fmt::Display for SyntaxErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use SyntaxErrorType::*;
		match self {
			InvalidSyntax => write!(f, "Invalid Syntax"),
			ExpectedValue => write!(f, "Expected Value: identifier, int, float, '+', '-' or '('"),
			ExpectedIdentifier => write!(f, "Expected identifier"),
			ExpectedToken(token) => write!(f, "Expected '{token}'"),
			ExpectedKeyword(keyword) => write!(f, "Expected '{keyword}'"),
			ExpectedCommaOrParen => write!(f, "Expected ',' or ')'"),
			ExpectedIdentifierOrParen => write!(f, "Expected Identifier or '('"),
		}
	}
}
