use crate::position::Span;

/// An error raised during evaluation.
///
/// Carries the span of the expression that failed and the chain of call
/// frames that were active, rendered as a traceback with the innermost
/// frame last.
#[derive(Debug)]
pub struct RuntimeError {
	pub span:   Span,
	pub r#type: RuntimeErrorType,
	/// Active call frames, outermost first.
	pub trace:  Vec<TraceFrame>,
}

/// One call frame in a runtime error's traceback.
#[derive(Debug)]
pub struct TraceFrame {
	/// Display name of the frame: the source name for the root, the
	/// function name for calls.
	pub name: String,
	/// Line the frame was executing when the error was raised.
	pub line: usize,
}

impl RuntimeError {
	pub fn new(span: Span, r#type: RuntimeErrorType, trace: Vec<TraceFrame>) -> Self {
		Self { span, r#type, trace }
	}
}

impl std::fmt::Display for RuntimeError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		writeln!(f, "Traceback (most recent call last):")?;
		for frame in &self.trace {
			writeln!(f, "  line {}, in {}", frame.line, frame.name)?;
		}
		write!(f, "Runtime Error: {}", self.r#type)
	}
}

impl std::error::Error for RuntimeError {}

/// Kinds of runtime error.
#[derive(Debug, PartialEq, Eq)]
pub enum RuntimeErrorType {
	/// A name was read before anything was bound to it.
	UndefinedVariable(String),
	/// The right operand of `/` evaluated to zero.
	DivisionByZero,
	/// A binary operator was applied to an unsupported pair of types.
	UnsupportedBinary { operator: String, left: &'static str, right: &'static str },
	/// A unary operator was applied to an unsupported type.
	UnsupportedUnary { operator: String, operand: &'static str },
	/// The callee of a call expression was not a function.
	NotCallable(&'static str),
	/// A call supplied the wrong number of arguments.
	ArityMismatch { name: String, expected: usize, given: usize },
}

impl std::fmt::Display for RuntimeErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use RuntimeErrorType::*;
		match self {
			UndefinedVariable(name) => write!(f, "'{name}' not defined"),
			DivisionByZero => write!(f, "Division by Zero"),
			UnsupportedBinary { operator, left, right } => {
				write!(f, "'{operator}' not supported between {left} and {right}")
			}
			UnsupportedUnary { operator, operand } => {
				write!(f, "'{operator}' not supported on {operand}")
			}
			NotCallable(type_name) => write!(f, "{type_name} is not callable"),
			ArityMismatch { name, expected, given } => {
				let which = if given > expected { "Too many" } else { "Not enough" };
				write!(f, "{which} arguments given into {name}, takes {expected}")
			}
		}
	}
}
