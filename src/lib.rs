//! # flint
//!
//! A small expression-oriented scripting language: everything is an
//! expression and every program is one expression.
//!
//! ``` text
//! > let add = fun(a, b): a + b
//! <Function [lambda]>
//! > add(2, 3)
//! 5
//! > if add(1, 1) == 2 then 10 else 20
//! 10
//! ```
//!
//! The pipeline is the classic front half of an interpreter:
//!
//! 1. The **lexer** turns source text into spanned tokens.
//! 2. The **parser** climbs the precedence ladder by recursive descent and
//!    builds an AST, or reports a syntax error pointing into the source.
//! 3. The **interpreter** walks the tree against a chain of lexical scopes,
//!    producing a value or a runtime error with a call traceback.
//!
//! The language has float numbers, booleans and first-class functions with
//! closures; `let` binds, `if … then … else …` selects (both branches
//! required, the untaken one never evaluated), and `fun` defines — named or
//! anonymous, definition being itself an expression. There are no loops, no
//! statements and no sequencing: recursion is the only repetition.
//!
//! [`Flint`] ties the stages together and owns the persistent global scope,
//! so driving it line by line behaves like a REPL.

pub mod cli;
mod environment;
mod error;
mod flint;
mod interpreter;
mod lexer;
mod parser;
mod position;
mod utils;

pub use environment::Environment;
pub use error::{
	FlintError,
	lexer::{LexError, LexErrorType},
	parser::{SyntaxError, SyntaxErrorType},
	runtime::{RuntimeError, RuntimeErrorType, TraceFrame},
};
pub use flint::Flint;
pub use interpreter::Value;
pub use position::{Position, Span};
pub use utils::RcCell;
