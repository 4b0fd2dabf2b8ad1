//! Tree-walking interpreter.
//!
//! The interpreter walks the AST produced by the parser, recursively
//! evaluating each expression against a chain of lexical scopes. Evaluation
//! is strict, depth-first and left-to-right; a failing sub-expression aborts
//! its whole parent immediately, and the untaken branch of an `if` is never
//! touched.
//!
//! Dispatch is one match arm per node variant, so a new variant is a compile
//! error here rather than a runtime "no visit method" failure.
//!
//! Recursion depth is bounded only by the host call stack; a runaway
//! recursive function exhausts it rather than producing a managed error.

mod value;

use std::rc::Rc;

use Expr::*;
pub use value::Value;
use value::{FunctionValue, ValueKind};

use crate::{
	environment::Environment,
	error::runtime::{RuntimeError, RuntimeErrorType, TraceFrame},
	lexer::TokenType,
	parser::Expr,
	position::{Position, Span},
	utils::RcCell,
};

/// One frame of the call chain: a display name for traces, the scope names
/// resolve against, and where in the parent the frame was entered.
pub(crate) struct Context {
	name:   String,
	scope:  RcCell<Environment>,
	parent: Option<Rc<Context>>,
	entry:  Option<Span>,
}

impl Context {
	/// The root frame of a run. Its scope is the caller's global scope.
	pub fn root(name: &str, scope: RcCell<Environment>) -> Rc<Self> {
		Rc::new(Self { name: name.to_string(), scope, parent: None, entry: None })
	}

	/// A frame for one function invocation, entered at `entry`.
	pub fn frame(name: &str, scope: RcCell<Environment>, parent: Rc<Context>, entry: Span) -> Rc<Self> {
		Rc::new(Self { name: name.to_string(), scope, parent: Some(parent), entry: Some(entry) })
	}

	pub fn scope(&self) -> &RcCell<Environment> { &self.scope }

	/// Traceback frames for an error raised at `at`, outermost first. Each
	/// frame reports the line it was executing: the error line for the
	/// innermost frame, the call site for every enclosing one.
	fn trace(&self, at: Position) -> Vec<TraceFrame> {
		let mut frames = Vec::new();
		let mut line = at.line;
		let mut context = Some(self);
		while let Some(current) = context {
			frames.push(TraceFrame { name: current.name.clone(), line });
			line = current.entry.map_or(line, |span| span.start.line);
			context = current.parent.as_deref();
		}
		frames.reverse();
		frames
	}
}

/// Interpreter that evaluates expressions.
pub(crate) struct Interpreter;

impl Interpreter {
	/// Evaluate `expr` in `context`, producing a value or a runtime error.
	pub fn evaluate(&self, expr: &Expr, context: &Rc<Context>) -> Result<Value, RuntimeError> {
		Ok(match expr {
			Number { value, span } => Value::number(*value).with_span(*span),
			Literal { value, span } => Value::bool(*value).with_span(*span),
			VarAccess { name, span } => {
				let value = context.scope().borrow().get(name).ok_or_else(|| {
					self.error(*span, RuntimeErrorType::UndefinedVariable(name.clone()), context)
				})?;
				value.with_span(*span)
			}
			VarAssign { name, value, .. } => {
				let value = self.evaluate(value, context)?;
				// Binding happens in the current scope, not an ancestor.
				context.scope().borrow_mut().define(name.clone(), value.clone());
				value
			}
			Binary { left, operator, right } => {
				let left_value = self.evaluate(left, context)?;
				let right_value = self.evaluate(right, context)?;
				let span = expr.span();
				left_value
					.binary_op(&operator.r#type, &right_value)
					.map_err(|r#type| self.error(span, r#type, context))?
					.with_span(span)
			}
			Unary { operator, operand } => {
				let value = self.evaluate(operand, context)?;
				let span = expr.span();
				match &operator.r#type {
					// Unary minus is multiplication by -1, inheriting
					// Number's multiply semantics and errors.
					TokenType::Minus => value.multiply(&Value::number(-1.0)),
					TokenType::Plus => Ok(value),
					TokenType::Not => value.not(),
					other => Err(RuntimeErrorType::UnsupportedUnary {
						operator: other.to_string(),
						operand:  value.type_name(),
					}),
				}
				.map_err(|r#type| self.error(span, r#type, context))?
				.with_span(span)
			}
			If { condition, then_branch, else_branch } => {
				let condition_value = self.evaluate(condition, context)?;
				if condition_value.is_truthy() {
					self.evaluate(then_branch, context)?
				} else {
					self.evaluate(else_branch, context)?
				}
			}
			FuncDef(def) => {
				// The scope captured here, at the definition site, is what
				// the body will resolve free variables against.
				let function = Value::function(def.clone(), context.scope().clone()).with_span(def.span);
				if let Some(name) = &def.name {
					context.scope().borrow_mut().define(name.clone(), function.clone());
				}
				function
			}
			Call { callee, arguments, span } => {
				let callee_value = self.evaluate(callee, context)?;
				let mut args = Vec::with_capacity(arguments.len());
				for argument in arguments {
					args.push(self.evaluate(argument, context)?);
				}
				match &callee_value.kind {
					// A propagating error keeps its own span and traceback;
					// only the returned value is re-stamped at the call site.
					ValueKind::Function(function) => {
						self.call(function, args, *span, context)?.with_span(*span)
					}
					_ => {
						return Err(self.error(
							*span,
							RuntimeErrorType::NotCallable(callee_value.type_name()),
							context,
						));
					}
				}
			}
		})
	}

	/// Invoke a function value: fresh scope parented to the captured
	/// definition scope, exact arity, parameters bound in order.
	fn call(
		&self,
		function: &FunctionValue,
		args: Vec<Value>,
		call_span: Span,
		context: &Rc<Context>,
	) -> Result<Value, RuntimeError> {
		let def = &function.def;
		let scope = RcCell::new(Environment::with_parent(function.closure.clone()));
		let frame = Context::frame(def.display_name(), scope, context.clone(), call_span);

		if args.len() != def.parameters.len() {
			return Err(self.error(
				call_span,
				RuntimeErrorType::ArityMismatch {
					name:     def.display_name().to_string(),
					expected: def.parameters.len(),
					given:    args.len(),
				},
				&frame,
			));
		}

		for (parameter, arg) in def.parameters.iter().zip(args) {
			frame.scope().borrow_mut().define(parameter.clone(), arg);
		}
		self.evaluate(&def.body, &frame)
	}

	fn error(&self, span: Span, r#type: RuntimeErrorType, context: &Context) -> RuntimeError {
		RuntimeError::new(span, r#type, context.trace(span.start))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{lexer::Lexer, parser::Parser};

	fn context() -> Rc<Context> { Context::root("<test>", RcCell::new(Environment::new())) }

	fn eval_in(context: &Rc<Context>, input: &str) -> Result<Value, RuntimeError> {
		let tokens = Lexer::new(input).tokenize().unwrap();
		let ast = Parser::new(tokens).parse().unwrap();
		Interpreter.evaluate(&ast, context)
	}

	fn eval(input: &str) -> Result<Value, RuntimeError> { eval_in(&context(), input) }

	fn eval_ok(input: &str, equals: &str) {
		assert_eq!(eval(input).unwrap().to_string(), equals, "eval({input:?})");
	}

	#[test]
	fn arithmetic_precedence() {
		eval_ok("2 + 3 * 4", "14");
		eval_ok("(2 + 3) * 4", "20");
		eval_ok("2 ^ 3 ^ 2", "512");
		eval_ok("-2 ^ 2", "-4");
		eval_ok("10 - 2 - 3", "5");
		eval_ok("7 / 2", "3.5");
		eval_ok("+5", "5");
	}

	#[test]
	fn comparison_and_logic() {
		eval_ok("1 < 2", "true");
		eval_ok("1 < 2 and 3 >= 3", "true");
		eval_ok("1 == 2 or 0 != 1", "true");
		eval_ok("not 1 == 1", "false");
		eval_ok("not 0", "true");
	}

	#[test]
	fn division_by_zero() {
		let error = eval("1 / 0").unwrap_err();
		assert_eq!(error.r#type, RuntimeErrorType::DivisionByZero);
	}

	#[test]
	fn unary_minus_on_bool_reports_multiply() {
		let error = eval("-true").unwrap_err();
		assert_eq!(error.to_string().lines().last().unwrap(), "Runtime Error: '*' not supported between Bool and Number");
	}

	#[test]
	fn let_binds_in_current_scope() {
		let context = context();
		eval_in(&context, "let x = 5").unwrap();
		assert_eq!(eval_in(&context, "x + 1").unwrap().to_string(), "6");
		// assignment is itself an expression
		assert_eq!(eval_in(&context, "let y = (let z = 2) + 1").unwrap().to_string(), "3");
		assert_eq!(eval_in(&context, "z").unwrap().to_string(), "2");
	}

	#[test]
	fn undefined_variable() {
		let error = eval("y + 1").unwrap_err();
		assert_eq!(error.r#type, RuntimeErrorType::UndefinedVariable("y".to_string()));
	}

	#[test]
	fn if_takes_the_truthy_branch() {
		eval_ok("if 1 < 2 then 10 else 20", "10");
		eval_ok("if 1 > 2 then 10 else 20", "20");
	}

	#[test]
	fn untaken_branch_is_never_evaluated() {
		// both untaken branches reference undefined names and would error
		eval_ok("if 1 < 2 then 10 else boom", "10");
		eval_ok("if 1 > 2 then boom else 20", "20");
	}

	#[test]
	fn failing_left_operand_skips_the_right() {
		let error = eval("boom + (1 / 0)").unwrap_err();
		assert_eq!(error.r#type, RuntimeErrorType::UndefinedVariable("boom".to_string()));
	}

	#[test]
	fn function_definition_and_call() {
		let context = context();
		let function = eval_in(&context, "fun add(a, b): a + b").unwrap();
		assert_eq!(function.to_string(), "<Function add>");
		assert_eq!(eval_in(&context, "add(2, 3)").unwrap().to_string(), "5");
	}

	#[test]
	fn anonymous_functions_display_as_lambda() {
		let context = context();
		assert_eq!(eval_in(&context, "fun(y): y").unwrap().to_string(), "<Function [lambda]>");
		// an anonymous definition registers nothing in scope
		assert!(context.scope().borrow().get("[lambda]").is_none());
	}

	#[test]
	fn arity_is_checked_exactly() {
		let context = context();
		eval_in(&context, "fun add(a, b): a + b").unwrap();

		let error = eval_in(&context, "add(1)").unwrap_err();
		assert_eq!(
			error.r#type,
			RuntimeErrorType::ArityMismatch { name: "add".to_string(), expected: 2, given: 1 }
		);
		assert!(error.to_string().contains("Not enough arguments given into add, takes 2"));

		let error = eval_in(&context, "add(1, 2, 3)").unwrap_err();
		assert!(error.to_string().contains("Too many arguments given into add, takes 2"));
	}

	#[test]
	fn closures_capture_the_definition_scope() {
		let context = context();
		eval_in(&context, "fun make(x): fun(y): x + y").unwrap();
		eval_in(&context, "let add10 = make(10)").unwrap();
		assert_eq!(eval_in(&context, "add10(5)").unwrap().to_string(), "15");
		// the captured x is the definition-time one, not a caller binding
		eval_in(&context, "let x = 999").unwrap();
		assert_eq!(eval_in(&context, "add10(5)").unwrap().to_string(), "15");
	}

	#[test]
	fn parameters_do_not_leak_into_the_outer_scope() {
		let context = context();
		eval_in(&context, "fun id(v): v").unwrap();
		eval_in(&context, "id(1)").unwrap();
		let error = eval_in(&context, "v").unwrap_err();
		assert_eq!(error.r#type, RuntimeErrorType::UndefinedVariable("v".to_string()));
	}

	#[test]
	fn calling_a_number_fails() {
		let error = eval("(1)(2)").unwrap_err();
		assert_eq!(error.r#type, RuntimeErrorType::NotCallable("Number"));
	}

	#[test]
	fn recursion_terminates() {
		let context = context();
		eval_in(&context, "fun fact(n): if n < 2 then 1 else n * fact(n - 1)").unwrap();
		assert_eq!(eval_in(&context, "fact(10)").unwrap().to_string(), "3628800");
	}

	#[test]
	fn tracebacks_name_the_call_chain() {
		let context = context();
		eval_in(&context, "fun boom(): 1 / 0").unwrap();
		let error = eval_in(&context, "boom()").unwrap_err();
		let rendered = error.to_string();
		assert!(rendered.starts_with("Traceback (most recent call last):"));
		assert!(rendered.contains("in <test>"));
		assert!(rendered.contains("in boom"));
		assert!(rendered.ends_with("Runtime Error: Division by Zero"));
	}

	#[test]
	fn values_are_stamped_with_access_spans() {
		let context = context();
		eval_in(&context, "let x = 5").unwrap();
		let value = eval_in(&context, "  x").unwrap();
		assert_eq!(value.span().unwrap().start.index, 2);
		// the stored binding keeps its own span
		assert_eq!(context.scope().borrow().get("x").unwrap().span().unwrap().start.index, 8);
	}
}
