//! Source positions and spans.
//!
//! Every token and AST node knows where it came from so that errors can
//! point back into the user's source. Positions are cheap `Copy` cursors
//! advanced one character at a time by the lexer; they are never consulted
//! during evaluation, only for diagnostics.

/// A cursor into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
	/// Character offset from the start of the source.
	pub index:  usize,
	/// 1-based line number.
	pub line:   usize,
	/// 1-based column number.
	pub column: usize,
}

impl Position {
	pub fn start() -> Self { Self { index: 0, line: 1, column: 1 } }

	/// Advance past one character.
	pub fn advance(&mut self, c: char) {
		self.index += 1;
		if c == '\n' {
			self.line += 1;
			self.column = 1;
		} else {
			self.column += 1;
		}
	}
}

/// A half-open region of source text, `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
	pub start: Position,
	pub end:   Position,
}

impl Span {
	pub fn new(start: Position, end: Position) -> Self { Self { start, end } }

	/// The smallest span covering both `self` and `other`.
	pub fn to(self, other: Span) -> Span { Span { start: self.start, end: other.end } }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn advance_tracks_lines_and_columns() {
		let mut pos = Position::start();
		for c in "ab\nc".chars() {
			pos.advance(c);
		}
		assert_eq!(pos.index, 4);
		assert_eq!(pos.line, 2);
		assert_eq!(pos.column, 2);
	}

	#[test]
	fn span_union_covers_both() {
		let mut a = Position::start();
		let mut b = Position::start();
		for c in "let x".chars() {
			b.advance(c);
			if c == 'l' {
				a = b;
			}
		}
		let left = Span::new(Position::start(), a);
		let right = Span::new(a, b);
		assert_eq!(left.to(right), Span::new(Position::start(), b));
	}
}
