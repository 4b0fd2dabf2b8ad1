//! Runtime values.
//!
//! The dynamic-dispatch object hierarchy a scripting runtime might reach for
//! is a closed enum here: one method per operator, matching on the operand
//! pair, with unmatched pairs falling through to the generic unsupported-
//! operator error. Arithmetic and comparison are defined for numbers only;
//! `and`/`or`/`not` accept anything with a defined truthiness.

use std::rc::Rc;

use ValueKind::*;

use crate::{
	environment::Environment,
	error::runtime::RuntimeErrorType,
	lexer::TokenType,
	parser::FuncDef,
	position::Span,
	utils::RcCell,
};

/// A runtime value, stamped with the span of the expression that produced
/// it. The span is diagnostic only and is overwritten on each use; values
/// are cheap to clone, a function clone shares its definition and captured
/// scope.
#[derive(Debug, Clone)]
pub struct Value {
	pub(crate) kind: ValueKind,
	pub(crate) span: Option<Span>,
}

#[derive(Debug, Clone)]
pub(crate) enum ValueKind {
	Number(f64),
	Bool(bool),
	Function(Rc<FunctionValue>),
}

/// A first-class function: its definition plus the scope that was active
/// where it was defined (lexical closure, shared by reference).
#[derive(Debug)]
pub(crate) struct FunctionValue {
	pub def:     Rc<FuncDef>,
	pub closure: RcCell<Environment>,
}

impl Value {
	pub fn number(value: f64) -> Self { Self { kind: Number(value), span: None } }

	pub fn bool(value: bool) -> Self { Self { kind: Bool(value), span: None } }

	pub(crate) fn function(def: Rc<FuncDef>, closure: RcCell<Environment>) -> Self {
		Self { kind: Function(Rc::new(FunctionValue { def, closure })), span: None }
	}

	/// Re-stamp the value with the span of the expression reading it.
	pub(crate) fn with_span(mut self, span: Span) -> Self {
		self.span = Some(span);
		self
	}

	pub fn span(&self) -> Option<Span> { self.span }

	pub fn type_name(&self) -> &'static str {
		match &self.kind {
			Number(_) => "Number",
			Bool(_) => "Bool",
			Function(_) => "Function",
		}
	}

	/// The boolean reading of this value, if it has one. Numbers are their
	/// nonzero test, booleans are themselves, functions have none.
	pub fn truthiness(&self) -> Option<bool> {
		match &self.kind {
			Number(n) => Some(*n != 0.0),
			Bool(b) => Some(*b),
			Function(_) => None,
		}
	}

	/// Truthiness as used by `if`: a value with no defined boolean reading
	/// counts as true.
	pub(crate) fn is_truthy(&self) -> bool { self.truthiness().unwrap_or(true) }

	/// Apply a binary operator, dispatched by its token type.
	pub(crate) fn binary_op(&self, op: &TokenType, right: &Self) -> Result<Value, RuntimeErrorType> {
		match op {
			TokenType::Plus => self.plus(right),
			TokenType::Minus => self.minus(right),
			TokenType::Star => self.multiply(right),
			TokenType::Slash => self.divide(right),
			TokenType::Caret => self.power(right),
			TokenType::EqualEqual => self.eq(right),
			TokenType::BangEqual => self.ne(right),
			TokenType::Greater => self.gt(right),
			TokenType::Less => self.lt(right),
			TokenType::GreaterEqual => self.gte(right),
			TokenType::LessEqual => self.lte(right),
			TokenType::And => self.and(right),
			TokenType::Or => self.or(right),
			other => Err(self.unsupported(other.to_string(), right)),
		}
	}

	pub(crate) fn plus(&self, other: &Self) -> Result<Value, RuntimeErrorType> {
		match (&self.kind, &other.kind) {
			(Number(l), Number(r)) => Ok(Value::number(l + r)),
			_ => Err(self.unsupported("+", other)),
		}
	}

	pub(crate) fn minus(&self, other: &Self) -> Result<Value, RuntimeErrorType> {
		match (&self.kind, &other.kind) {
			(Number(l), Number(r)) => Ok(Value::number(l - r)),
			_ => Err(self.unsupported("-", other)),
		}
	}

	pub(crate) fn multiply(&self, other: &Self) -> Result<Value, RuntimeErrorType> {
		match (&self.kind, &other.kind) {
			(Number(l), Number(r)) => Ok(Value::number(l * r)),
			_ => Err(self.unsupported("*", other)),
		}
	}

	/// Division; a zero-valued right operand is its own error, distinct from
	/// the unsupported-operator one.
	pub(crate) fn divide(&self, other: &Self) -> Result<Value, RuntimeErrorType> {
		match (&self.kind, &other.kind) {
			(Number(_), Number(r)) if *r == 0.0 => Err(RuntimeErrorType::DivisionByZero),
			(Number(l), Number(r)) => Ok(Value::number(l / r)),
			_ => Err(self.unsupported("/", other)),
		}
	}

	pub(crate) fn power(&self, other: &Self) -> Result<Value, RuntimeErrorType> {
		match (&self.kind, &other.kind) {
			(Number(l), Number(r)) => Ok(Value::number(l.powf(*r))),
			_ => Err(self.unsupported("^", other)),
		}
	}

	pub(crate) fn eq(&self, other: &Self) -> Result<Value, RuntimeErrorType> {
		match (&self.kind, &other.kind) {
			(Number(l), Number(r)) => Ok(Value::bool(l == r)),
			_ => Err(self.unsupported("==", other)),
		}
	}

	pub(crate) fn ne(&self, other: &Self) -> Result<Value, RuntimeErrorType> {
		match (&self.kind, &other.kind) {
			(Number(l), Number(r)) => Ok(Value::bool(l != r)),
			_ => Err(self.unsupported("!=", other)),
		}
	}

	pub(crate) fn gt(&self, other: &Self) -> Result<Value, RuntimeErrorType> {
		match (&self.kind, &other.kind) {
			(Number(l), Number(r)) => Ok(Value::bool(l > r)),
			_ => Err(self.unsupported(">", other)),
		}
	}

	pub(crate) fn lt(&self, other: &Self) -> Result<Value, RuntimeErrorType> {
		match (&self.kind, &other.kind) {
			(Number(l), Number(r)) => Ok(Value::bool(l < r)),
			_ => Err(self.unsupported("<", other)),
		}
	}

	pub(crate) fn gte(&self, other: &Self) -> Result<Value, RuntimeErrorType> {
		match (&self.kind, &other.kind) {
			(Number(l), Number(r)) => Ok(Value::bool(l >= r)),
			_ => Err(self.unsupported(">=", other)),
		}
	}

	pub(crate) fn lte(&self, other: &Self) -> Result<Value, RuntimeErrorType> {
		match (&self.kind, &other.kind) {
			(Number(l), Number(r)) => Ok(Value::bool(l <= r)),
			_ => Err(self.unsupported("<=", other)),
		}
	}

	pub(crate) fn and(&self, other: &Self) -> Result<Value, RuntimeErrorType> {
		match (self.truthiness(), other.truthiness()) {
			(Some(l), Some(r)) => Ok(Value::bool(l && r)),
			_ => Err(self.unsupported("and", other)),
		}
	}

	pub(crate) fn or(&self, other: &Self) -> Result<Value, RuntimeErrorType> {
		match (self.truthiness(), other.truthiness()) {
			(Some(l), Some(r)) => Ok(Value::bool(l || r)),
			_ => Err(self.unsupported("or", other)),
		}
	}

	pub(crate) fn not(&self) -> Result<Value, RuntimeErrorType> {
		match self.truthiness() {
			Some(b) => Ok(Value::bool(!b)),
			None => Err(RuntimeErrorType::UnsupportedUnary {
				operator: "not".to_string(),
				operand:  self.type_name(),
			}),
		}
	}

	fn unsupported(&self, operator: impl Into<String>, other: &Self) -> RuntimeErrorType {
		RuntimeErrorType::UnsupportedBinary {
			operator: operator.into(),
			left:     self.type_name(),
			right:    other.type_name(),
		}
	}
}

impl std::fmt::Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.kind {
			Number(n) => {
				if n.is_finite() && n.fract() == 0.0 {
					write!(f, "{}", *n as i64)
				} else {
					write!(f, "{n}")
				}
			}
			Bool(b) => write!(f, "{b}"),
			Function(function) => write!(f, "<Function {}>", function.def.display_name()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn num(n: f64) -> Value { Value::number(n) }

	#[test]
	fn arithmetic_on_numbers() {
		assert_eq!(num(2.0).plus(&num(3.0)).unwrap().to_string(), "5");
		assert_eq!(num(2.0).minus(&num(3.0)).unwrap().to_string(), "-1");
		assert_eq!(num(2.0).multiply(&num(3.0)).unwrap().to_string(), "6");
		assert_eq!(num(3.0).divide(&num(2.0)).unwrap().to_string(), "1.5");
		assert_eq!(num(2.0).power(&num(10.0)).unwrap().to_string(), "1024");
	}

	#[test]
	fn division_by_zero_is_its_own_error() {
		assert_eq!(num(1.0).divide(&num(0.0)).unwrap_err(), RuntimeErrorType::DivisionByZero);
		// but a Bool divisor is the generic unsupported error
		assert!(matches!(
			num(1.0).divide(&Value::bool(false)).unwrap_err(),
			RuntimeErrorType::UnsupportedBinary { .. }
		));
	}

	#[test]
	fn comparisons_produce_bools() {
		assert_eq!(num(1.0).lt(&num(2.0)).unwrap().to_string(), "true");
		assert_eq!(num(1.0).gte(&num(2.0)).unwrap().to_string(), "false");
		assert_eq!(num(2.0).eq(&num(2.0)).unwrap().to_string(), "true");
		assert_eq!(num(2.0).ne(&num(2.0)).unwrap().to_string(), "false");
	}

	#[test]
	fn mixed_types_are_unsupported() {
		let error = num(1.0).plus(&Value::bool(true)).unwrap_err();
		assert_eq!(error.to_string(), "'+' not supported between Number and Bool");
		let error = Value::bool(true).lt(&Value::bool(false)).unwrap_err();
		assert_eq!(error.to_string(), "'<' not supported between Bool and Bool");
	}

	#[test]
	fn logic_accepts_numbers_and_bools() {
		assert_eq!(num(1.0).and(&Value::bool(true)).unwrap().to_string(), "true");
		assert_eq!(num(0.0).or(&Value::bool(false)).unwrap().to_string(), "false");
		assert_eq!(num(0.0).or(&num(3.0)).unwrap().to_string(), "true");
		assert_eq!(Value::bool(true).not().unwrap().to_string(), "false");
		assert_eq!(num(0.0).not().unwrap().to_string(), "true");
	}

	#[test]
	fn truthiness() {
		assert_eq!(num(0.0).truthiness(), Some(false));
		assert_eq!(num(-2.5).truthiness(), Some(true));
		assert_eq!(Value::bool(false).truthiness(), Some(false));
	}

	#[test]
	fn display_numbers_like_literals() {
		assert_eq!(num(42.0).to_string(), "42");
		assert_eq!(num(3.14).to_string(), "3.14");
		assert_eq!(num(-0.5).to_string(), "-0.5");
	}
}
