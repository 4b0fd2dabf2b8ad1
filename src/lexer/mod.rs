//! The lexer turns source text into a sequence of spanned tokens.
//!
//! Keywords are resolved with maximal munch: an identifier is scanned to its
//! end and only then checked against the keyword table, so `andrew` is an
//! identifier and `and` is an operator.
//!
//! Whitespace is dropped here rather than in the parser. Newlines are the
//! one exception, they survive as tokens because a trailing newline is a
//! legal way to terminate an expression.
mod token;

use std::{iter::Peekable, str::Chars};

use TokenType::*;
use anyhow::Context;
pub(crate) use token::*;

use crate::{error::lexer::{LexError, LexErrorType, LexerError}, position::{Position, Span}};

/// A lexer over flint source code.
pub(crate) struct Lexer<'a> {
	/// User input source code iterator.
	source_iter: Peekable<Chars<'a>>,
	/// Start of the lexeme currently being scanned.
	start:       Position,
	/// Position of the next unconsumed character.
	cursor:      Position,
}

impl<'a> Lexer<'a> {
	pub fn new(source: &'a str) -> Self {
		Self { source_iter: source.chars().peekable(), start: Position::start(), cursor: Position::start() }
	}

	/// Scan the whole input, stopping at the first lexical error.
	pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
		let mut tokens = Vec::new();
		while self.source_iter.peek().is_some() {
			self.start = self.cursor;
			let r#type = self.scan_token()?;
			if !r#type.is_ignored() {
				tokens.push(Token::new(r#type, Span::new(self.start, self.cursor)));
			}
		}
		tokens.push(Token::new(Eof, Span::new(self.cursor, self.cursor)));
		Ok(tokens)
	}

	/// Scan a single token from the source code.
	fn scan_token(&mut self) -> Result<TokenType, LexerError> {
		let next_char = self.advance().context("Unexpected end of input")?;
		let r#type = match next_char {
			'(' => LeftParen,
			')' => RightParen,
			',' => Comma,
			':' => Colon,
			'-' => Minus,
			'+' => Plus,
			'/' => Slash,
			'*' => Star,
			'^' => Caret,
			'=' => {
				if self.match_next('=') {
					EqualEqual
				} else {
					Equal
				}
			}
			'<' => {
				if self.match_next('=') {
					LessEqual
				} else {
					Less
				}
			}
			'>' => {
				if self.match_next('=') {
					GreaterEqual
				} else {
					Greater
				}
			}
			'!' => {
				if self.match_next('=') {
					BangEqual
				} else {
					return Err(self.error(LexErrorType::ExpectedEquals));
				}
			}
			' ' | '\r' | '\t' => EmptyChar,
			'\n' => NewLine,
			c if c.is_ascii_digit() => self.number(c)?,
			c if c.is_ascii_alphabetic() || c == '_' => self.identifier(c),
			c => return Err(self.error(LexErrorType::UnexpectedCharacter(c))),
		};
		Ok(r#type)
	}

	fn error(&self, r#type: LexErrorType) -> LexerError {
		LexError::new(Span::new(self.start, self.cursor), r#type).into()
	}

	/// Consume the next character if it is the expected one.
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	/// Advance to the next character.
	fn advance(&mut self) -> Option<char> {
		let c = self.source_iter.next()?;
		self.cursor.advance(c);
		Some(c)
	}

	/// Peek the current character.
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().copied() }

	/// Peek the second character ahead.
	fn peek_second(&mut self) -> Option<char> {
		let mut it = self.source_iter.clone();
		it.next()?;
		it.next()
	}

	/// Scan a number literal: an int lexeme or a float lexeme with one `.`.
	fn number(&mut self, first: char) -> Result<TokenType, LexerError> {
		let mut lexeme = String::from(first);
		while let Some(c) = self.peek().filter(char::is_ascii_digit) {
			lexeme.push(c);
			self.advance();
		}

		// Look for a fractional part.
		if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
			lexeme.push('.');
			self.advance(); // consume '.'
			while let Some(c) = self.peek().filter(char::is_ascii_digit) {
				lexeme.push(c);
				self.advance();
			}
		}

		Ok(Number(lexeme.parse().context("Failed to parse number literal")?))
	}

	/// Scan an identifier or keyword.
	fn identifier(&mut self, first: char) -> TokenType {
		let mut lexeme = String::from(first);
		while let Some(c) = self.peek().filter(|c| c.is_ascii_alphanumeric() || *c == '_') {
			lexeme.push(c);
			self.advance();
		}
		TokenType::keyword_or_identifier(&lexeme)
	}
}
