//! Recursive-descent parser.
//!
//! The lexer's alphabet is characters and its strings are tokens; the
//! parser's alphabet is tokens and its strings are expressions. Each grammar
//! rule below is one method, calling the next-tighter rule for its operands,
//! so precedence falls out of the call structure.
//!
//! |Name|Operators|Associates
//! --|--|--
//! expr|`let`, `and` `or`|Left
//! comp_expr|`not`, `==` `!=` `<` `>` `<=` `>=`|Left
//! arith_expr|`+` `-`|Left
//! term|`*` `/`|Left
//! factor|unary `+` `-`|Right
//! power|`^`|Right (re-enters at `factor`)
//! call|`f(args)`|-
//!
//! ``` BNF
//! expr       → "let" IDENTIFIER "=" expr | comp_expr ( ( "and" | "or" ) comp_expr )* ;
//! comp_expr  → "not" comp_expr | arith_expr ( ( "==" | "!=" | "<" | ">" | "<=" | ">=" ) arith_expr )* ;
//! arith_expr → term ( ( "+" | "-" ) term )* ;
//! term       → factor ( ( "*" | "/" ) factor )* ;
//! factor     → ( "+" | "-" ) factor | power ;
//! power      → call ( "^" factor )* ;
//! call       → atom ( "(" ( expr ( "," expr )* )? ")" )? ;
//! atom       → NUMBER | "true" | "false" | IDENTIFIER | "(" expr ")" | if_expr | func_def ;
//! if_expr    → "if" comp_expr "then" expr "else" expr ;
//! func_def   → "fun" IDENTIFIER? "(" ( IDENTIFIER ( "," IDENTIFIER )* ","? )? ")" ":" expr ;
//! ```
//!
//! Error discipline: every production returns at most one error through
//! `Result`, and a production only tries an alternative before it has
//! consumed a token. Once something is consumed the first error propagates
//! uncontested, so a deep failure is never papered over by an outer
//! "expected value" message.

mod node;

use std::{iter::Peekable, vec::IntoIter};

use TokenType::*;
use anyhow::anyhow;

use crate::{
	error::{FlintError, parser::{ParserError, SyntaxError, SyntaxErrorType}},
	lexer::{Token, TokenType},
	position::Span,
};
pub(crate) use node::{Expr, FuncDef};

/// A parser over the lexer's token stream.
pub(crate) struct Parser {
	tokens: Peekable<IntoIter<Token>>,
}

impl Parser {
	pub fn new(tokens: Vec<Token>) -> Self { Self { tokens: tokens.into_iter().peekable() } }

	/// Parse one expression and demand the stream ends there, apart from a
	/// trailing newline or the end-of-input marker.
	pub fn parse(&mut self) -> Result<Box<Expr>, FlintError> {
		let expr = self.expression().map_err(FlintError::from)?;
		match self.peek().map_err(FlintError::from)?.r#type {
			Eof | NewLine => Ok(expr),
			_ => Err(self.error_here(SyntaxErrorType::InvalidSyntax).into()),
		}
	}

	/// Parse `let` bindings and `and`/`or` chains.
	fn expression(&mut self) -> Result<Box<Expr>, ParserError> {
		if matches!(self.peek()?.r#type, Let) {
			self.advance()?; // consume 'let'

			if !matches!(self.peek()?.r#type, Identifier(_)) {
				return Err(self.error_here(SyntaxErrorType::ExpectedIdentifier));
			}
			let (name, name_span) = self.identifier()?;

			if !matches!(self.peek()?.r#type, Equal) {
				return Err(self.error_here(SyntaxErrorType::ExpectedToken("=")));
			}
			self.advance()?; // consume '='

			let value = self.expression()?;
			let span = name_span.to(value.span());
			return Ok(Expr::var_assign(name, value, span));
		}

		let mut expr = self.comp_expr()?;
		while matches!(self.peek()?.r#type, And | Or) {
			expr = Expr::binary(expr, self.advance()?, self.comp_expr()?);
		}
		Ok(expr)
	}

	/// Parse `not` prefixes and comparison chains.
	fn comp_expr(&mut self) -> Result<Box<Expr>, ParserError> {
		if matches!(self.peek()?.r#type, Not) {
			let operator = self.advance()?;
			return Ok(Expr::unary(operator, self.comp_expr()?));
		}

		let mut expr = self.arith_expr()?;
		while matches!(self.peek()?.r#type, EqualEqual | BangEqual | Less | Greater | LessEqual | GreaterEqual)
		{
			expr = Expr::binary(expr, self.advance()?, self.arith_expr()?);
		}
		Ok(expr)
	}

	/// Parse additive chains.
	fn arith_expr(&mut self) -> Result<Box<Expr>, ParserError> {
		let mut expr = self.term()?;
		while matches!(self.peek()?.r#type, Plus | Minus) {
			expr = Expr::binary(expr, self.advance()?, self.term()?);
		}
		Ok(expr)
	}

	/// Parse multiplicative chains.
	fn term(&mut self) -> Result<Box<Expr>, ParserError> {
		let mut expr = self.factor()?;
		while matches!(self.peek()?.r#type, Star | Slash) {
			expr = Expr::binary(expr, self.advance()?, self.factor()?);
		}
		Ok(expr)
	}

	/// Parse unary sign prefixes.
	fn factor(&mut self) -> Result<Box<Expr>, ParserError> {
		if matches!(self.peek()?.r#type, Plus | Minus) {
			let operator = self.advance()?;
			return Ok(Expr::unary(operator, self.factor()?));
		}
		self.power()
	}

	/// Parse `^` chains. The right side re-enters at `factor`, so `^` binds
	/// tighter than unary minus on the left while still allowing a signed
	/// exponent, and chains associate to the right.
	fn power(&mut self) -> Result<Box<Expr>, ParserError> {
		let mut expr = self.call()?;
		while matches!(self.peek()?.r#type, Caret) {
			expr = Expr::binary(expr, self.advance()?, self.factor()?);
		}
		Ok(expr)
	}

	/// Parse an atom, optionally followed by one argument list.
	fn call(&mut self) -> Result<Box<Expr>, ParserError> {
		let callee = self.atom()?;

		if matches!(self.peek()?.r#type, LeftParen) {
			self.advance()?; // consume '('
			let mut arguments = Vec::new();

			if !matches!(self.peek()?.r#type, RightParen) {
				arguments.push(*self.expression()?);
				while matches!(self.peek()?.r#type, Comma) {
					self.advance()?; // consume ','
					arguments.push(*self.expression()?);
					if matches!(self.peek()?.r#type, RightParen) {
						break;
					}
					// After a comma-separated argument the list must either
					// continue or close.
					if !matches!(self.peek()?.r#type, Comma) {
						return Err(self.error_here(SyntaxErrorType::ExpectedCommaOrParen));
					}
				}
				if !matches!(self.peek()?.r#type, RightParen) {
					return Err(self.error_here(SyntaxErrorType::ExpectedToken(")")));
				}
			}
			let close = self.advance()?; // consume ')'

			let span = callee.span().to(close.span);
			return Ok(Expr::call(callee, arguments, span));
		}
		Ok(callee)
	}

	/// Parse a primary expression.
	fn atom(&mut self) -> Result<Box<Expr>, ParserError> {
		match self.peek()?.r#type {
			Number(_) => {
				let token = self.advance()?;
				let Number(value) = token.r#type else {
					return Err(anyhow!("Number token changed type").into());
				};
				Ok(Expr::number(value, token.span))
			}
			True | False => {
				let token = self.advance()?;
				Ok(Expr::literal(matches!(token.r#type, True), token.span))
			}
			Identifier(_) => {
				let (name, span) = self.identifier()?;
				Ok(Expr::var_access(name, span))
			}
			LeftParen => {
				self.advance()?; // consume '('
				let expr = self.expression()?;
				if !matches!(self.peek()?.r#type, RightParen) {
					return Err(self.error_here(SyntaxErrorType::ExpectedToken(")")));
				}
				self.advance()?; // consume ')'
				Ok(expr)
			}
			If => self.if_expr(),
			Fun => self.func_def(),
			_ => Err(self.error_here(SyntaxErrorType::ExpectedValue)),
		}
	}

	/// Parse `if comp_expr then expr else expr`; `else` is mandatory since
	/// the conditional is an expression, not a statement.
	fn if_expr(&mut self) -> Result<Box<Expr>, ParserError> {
		self.advance()?; // consume 'if'
		let condition = self.comp_expr()?;

		if !matches!(self.peek()?.r#type, Then) {
			return Err(self.error_here(SyntaxErrorType::ExpectedKeyword("then")));
		}
		self.advance()?;
		let then_branch = self.expression()?;

		if !matches!(self.peek()?.r#type, Else) {
			return Err(self.error_here(SyntaxErrorType::ExpectedKeyword("else")));
		}
		self.advance()?;
		let else_branch = self.expression()?;

		Ok(Expr::conditional(condition, then_branch, else_branch))
	}

	/// Parse `fun [name](params): expr`. A missing name makes the function
	/// anonymous and widens the error for a missing `(`.
	fn func_def(&mut self) -> Result<Box<Expr>, ParserError> {
		let fun_token = self.advance()?; // consume 'fun'

		let name = if matches!(self.peek()?.r#type, Identifier(_)) {
			Some(self.identifier()?.0)
		} else {
			None
		};

		if !matches!(self.peek()?.r#type, LeftParen) {
			return Err(self.error_here(if name.is_some() {
				SyntaxErrorType::ExpectedToken("(")
			} else {
				SyntaxErrorType::ExpectedIdentifierOrParen
			}));
		}
		self.advance()?; // consume '('

		let mut parameters = Vec::new();
		if matches!(self.peek()?.r#type, Identifier(_)) {
			parameters.push(self.identifier()?.0);
			while matches!(self.peek()?.r#type, Comma) {
				self.advance()?; // consume ','
				match self.peek()?.r#type {
					Identifier(_) => parameters.push(self.identifier()?.0),
					// A comma directly before ')' closes the list.
					RightParen => break,
					_ => return Err(self.error_here(SyntaxErrorType::ExpectedCommaOrParen)),
				}
			}
		}

		if !matches!(self.peek()?.r#type, RightParen) {
			return Err(self.error_here(SyntaxErrorType::InvalidSyntax));
		}
		self.advance()?; // consume ')'

		if !matches!(self.peek()?.r#type, Colon) {
			return Err(self.error_here(SyntaxErrorType::ExpectedToken(":")));
		}
		self.advance()?; // consume ':'

		let body = self.expression()?;
		let span = fun_token.span.to(body.span());
		Ok(Expr::func_def(name, parameters, body, span))
	}

	/// Consume an identifier token, returning its name and span.
	fn identifier(&mut self) -> Result<(String, Span), ParserError> {
		let token = self.advance()?;
		match token.r#type {
			Identifier(name) => Ok((name, token.span)),
			other => Err(anyhow!("Expected identifier token, found {other}").into()),
		}
	}

	/// Advance to the next token.
	fn advance(&mut self) -> Result<Token, ParserError> {
		self.tokens.next().ok_or_else(|| anyhow!("Token stream ended without Eof").into())
	}

	/// Peek at the current token.
	fn peek(&mut self) -> Result<&Token, ParserError> {
		self.tokens.peek().ok_or_else(|| anyhow!("Token stream ended without Eof").into())
	}

	/// A syntax error pointing at the current token.
	fn error_here(&mut self, r#type: SyntaxErrorType) -> ParserError {
		match self.peek() {
			Ok(token) => SyntaxError::new(token.span, r#type).into(),
			Err(internal) => internal,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::lexer::Lexer;

	fn parse(input: &str, equals: &str) {
		let tokens = Lexer::new(input).tokenize().unwrap();
		let ast = Parser::new(tokens).parse().unwrap();
		assert_eq!(ast.to_string(), equals, "parse({input:?})");
	}

	fn parse_err(input: &str) -> SyntaxError {
		let tokens = Lexer::new(input).tokenize().unwrap();
		match Parser::new(tokens).parse() {
			Err(FlintError::SyntaxError(e)) => e,
			other => panic!("expected syntax error for {input:?}, got {other:?}"),
		}
	}

	#[test]
	fn parse_precedence() {
		parse("2 + 3 * 4", "(+ 2 (* 3 4))");
		parse("1 + 2 * 3 / 4 - 5", "(- (+ 1 (/ (* 2 3) 4)) 5)");
		parse("(1 + 2) * 3", "(* (+ 1 2) 3)");
		parse("1 < 2 + 3", "(< 1 (+ 2 3))");
		parse("1 == 2 and 3 == 4", "(and (== 1 2) (== 3 4))");
	}

	#[test]
	fn parse_left_associative_chains() {
		parse("1 - 2 - 3", "(- (- 1 2) 3)");
		parse("1 / 2 / 3", "(/ (/ 1 2) 3)");
		parse("1 < 2 < 3", "(< (< 1 2) 3)");
		parse("1 and 2 or 3", "(or (and 1 2) 3)");
	}

	#[test]
	fn parse_power_binds_right() {
		parse("2 ^ 3 ^ 2", "(^ 2 (^ 3 2))");
		parse("2 ^ -3", "(^ 2 (- 3))");
		parse("-2 ^ 2", "(- (^ 2 2))");
	}

	#[test]
	fn parse_unary() {
		parse("-12", "(- 12)");
		parse("+12", "(+ 12)");
		parse("--1", "(- (- 1))");
		parse("not true", "(not true)");
		parse("not 1 == 2", "(not (== 1 2))");
		parse("not not false", "(not (not false))");
	}

	#[test]
	fn parse_let() {
		parse("let x = 5", "(let x 5)");
		parse("let x = let y = 2", "(let x (let y 2))");
		parse("let x = 1 + 2", "(let x (+ 1 2))");
	}

	#[test]
	fn parse_if() {
		parse("if 1 < 2 then 10 else 20", "(if (< 1 2) 10 20)");
		parse("if true then 1 else if false then 2 else 3", "(if true 1 (if false 2 3))");
	}

	#[test]
	fn parse_functions() {
		parse("fun add(a, b): a + b", "(fun add (a b) (+ a b))");
		parse("fun(y): y", "(fun [lambda] (y) y)");
		parse("fun f(): 1", "(fun f () 1)");
		parse("fun f(a, ): a", "(fun f (a) a)");
		parse("fun make(x): fun(y): x + y", "(fun make (x) (fun [lambda] (y) (+ x y)))");
	}

	#[test]
	fn parse_calls() {
		parse("add(2, 3)", "(call add (2 3))");
		parse("f()", "(call f ())");
		parse("f(1 + 2, g(3))", "(call f ((+ 1 2) (call g (3))))");
		parse("1 + f(2) * 3", "(+ 1 (* (call f (2)) 3))");
	}

	#[test]
	fn parse_accepts_trailing_newline() {
		parse("1 + 2\n", "(+ 1 2)");
	}

	#[test]
	fn parse_errors() {
		assert_eq!(parse_err("1 +").r#type, SyntaxErrorType::ExpectedValue);
		assert_eq!(parse_err("* 1").r#type, SyntaxErrorType::ExpectedValue);
		assert_eq!(parse_err("(1 + 2").r#type, SyntaxErrorType::ExpectedToken(")"));
		assert_eq!(parse_err("1 2").r#type, SyntaxErrorType::InvalidSyntax);
		assert_eq!(parse_err("let 1 = 2").r#type, SyntaxErrorType::ExpectedIdentifier);
		assert_eq!(parse_err("let x 2").r#type, SyntaxErrorType::ExpectedToken("="));
		assert_eq!(parse_err("if 1 then 2").r#type, SyntaxErrorType::ExpectedKeyword("else"));
		assert_eq!(parse_err("if 1 2 else 3").r#type, SyntaxErrorType::ExpectedKeyword("then"));
		assert_eq!(parse_err("fun + 1").r#type, SyntaxErrorType::ExpectedIdentifierOrParen);
		assert_eq!(parse_err("fun f + 1").r#type, SyntaxErrorType::ExpectedToken("("));
		assert_eq!(parse_err("fun f(a: a").r#type, SyntaxErrorType::InvalidSyntax);
		assert_eq!(parse_err("fun f(a b): a").r#type, SyntaxErrorType::InvalidSyntax);
		assert_eq!(parse_err("fun f(a): ").r#type, SyntaxErrorType::ExpectedValue);
		assert_eq!(parse_err("f(a,)").r#type, SyntaxErrorType::ExpectedValue);
		// Before the first comma a stalled argument list wants ')'; after
		// one it may also continue with ','.
		assert_eq!(parse_err("f(a b)").r#type, SyntaxErrorType::ExpectedToken(")"));
		assert_eq!(parse_err("f(a, b c)").r#type, SyntaxErrorType::ExpectedCommaOrParen);
	}

	#[test]
	fn parse_error_positions_stay_in_source() {
		let source = "1 + * 2";
		let error = parse_err(source);
		assert!(error.span.start.index <= source.len());
		assert!(error.span.end.index <= source.len());
		assert_eq!(error.span.start.index, 4); // points at '*'
	}

	#[test]
	fn deep_errors_beat_expected_value() {
		// The inner let has consumed tokens, so its error must survive
		// rather than being replaced by the atom-level message.
		assert_eq!(parse_err("(let x 2)").r#type, SyntaxErrorType::ExpectedToken("="));
		assert_eq!(parse_err("f(let 1 = 2)").r#type, SyntaxErrorType::ExpectedIdentifier);
	}
}
