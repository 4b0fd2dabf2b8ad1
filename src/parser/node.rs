//! AST nodes.
//!
//! An `Expr` is a tree structure representing code like `-12 * (3 + 4)` as
//! nested nodes. Every node can report its source span, computed as the
//! union of its children's spans; spans feed diagnostics and are never used
//! for evaluation order.

use std::rc::Rc;

use Expr::*;

use crate::{lexer::Token, position::Span};

/// Expression AST nodes. The parser is their sole producer.
#[derive(Debug)]
pub(crate) enum Expr {
	/// A number literal.
	Number { value: f64, span: Span },
	/// A boolean literal.
	Literal { value: bool, span: Span },
	/// A prefix operator: `-`, `+` or `not`.
	Unary { operator: Token, operand: Box<Expr> },
	/// An infix operator application.
	Binary { left: Box<Expr>, operator: Token, right: Box<Expr> },
	/// A variable read.
	VarAccess { name: String, span: Span },
	/// A `let name = expr` binding; the binding is itself an expression.
	VarAssign { name: String, value: Box<Expr>, span: Span },
	/// `if cond then expr else expr`; both branches are required.
	If { condition: Box<Expr>, then_branch: Box<Expr>, else_branch: Box<Expr> },
	/// A function definition expression. Shared so that function values can
	/// hold the definition without cloning the body tree.
	FuncDef(Rc<FuncDef>),
	/// A call; the callee is an arbitrary expression.
	Call { callee: Box<Expr>, arguments: Vec<Expr>, span: Span },
}

/// A function definition: `fun [name](params): body`.
#[derive(Debug)]
pub(crate) struct FuncDef {
	/// `None` for an anonymous function.
	pub name:       Option<String>,
	/// Ordered parameter identifiers.
	pub parameters: Vec<String>,
	pub body:       Expr,
	pub span:       Span,
}

impl FuncDef {
	/// The name shown in diagnostics; anonymous functions display as
	/// `[lambda]`.
	pub fn display_name(&self) -> &str { self.name.as_deref().unwrap_or("[lambda]") }
}

impl Expr {
	pub fn number(value: f64, span: Span) -> Box<Self> { Box::new(Number { value, span }) }

	pub fn literal(value: bool, span: Span) -> Box<Self> { Box::new(Literal { value, span }) }

	pub fn unary(operator: Token, operand: Box<Self>) -> Box<Self> { Box::new(Unary { operator, operand }) }

	pub fn binary(left: Box<Self>, operator: Token, right: Box<Self>) -> Box<Self> {
		Box::new(Binary { left, operator, right })
	}

	pub fn var_access(name: String, span: Span) -> Box<Self> { Box::new(VarAccess { name, span }) }

	pub fn var_assign(name: String, value: Box<Self>, span: Span) -> Box<Self> {
		Box::new(VarAssign { name, value, span })
	}

	pub fn conditional(condition: Box<Self>, then_branch: Box<Self>, else_branch: Box<Self>) -> Box<Self> {
		Box::new(If { condition, then_branch, else_branch })
	}

	pub fn func_def(name: Option<String>, parameters: Vec<String>, body: Box<Self>, span: Span) -> Box<Self> {
		Box::new(FuncDef(Rc::new(self::FuncDef { name, parameters, body: *body, span })))
	}

	pub fn call(callee: Box<Self>, arguments: Vec<Self>, span: Span) -> Box<Self> {
		Box::new(Call { callee, arguments, span })
	}

	/// The source region this node covers, including all sub-expressions.
	pub fn span(&self) -> Span {
		match self {
			Number { span, .. } | Literal { span, .. } => *span,
			Unary { operator, operand } => operator.span.to(operand.span()),
			Binary { left, right, .. } => left.span().to(right.span()),
			VarAccess { span, .. } | VarAssign { span, .. } => *span,
			If { condition, else_branch, .. } => condition.span().to(else_branch.span()),
			FuncDef(def) => def.span,
			Call { span, .. } => *span,
		}
	}
}

impl std::fmt::Display for Expr {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Number { value, .. } => write!(f, "{value}"),
			Literal { value, .. } => write!(f, "{value}"),
			Unary { operator, operand } => write!(f, "({} {operand})", operator.r#type),
			Binary { left, operator, right } => write!(f, "({} {left} {right})", operator.r#type),
			VarAccess { name, .. } => write!(f, "{name}"),
			VarAssign { name, value, .. } => write!(f, "(let {name} {value})"),
			If { condition, then_branch, else_branch } => {
				write!(f, "(if {condition} {then_branch} {else_branch})")
			}
			FuncDef(def) => {
				write!(f, "(fun {} ({}) {})", def.display_name(), def.parameters.join(" "), def.body)
			}
			Call { callee, arguments, .. } => write!(
				f,
				"(call {callee} ({}))",
				arguments.iter().map(|arg| format!("{arg}")).collect::<Vec<String>>().join(" ")
			),
		}
	}
}
