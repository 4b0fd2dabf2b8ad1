use std::{fs::read_to_string, io::Write, path::Path};

use anyhow::Context as _;

use crate::{
	environment::Environment,
	error::FlintError,
	interpreter::{Context, Interpreter, Value},
	lexer::Lexer,
	parser::Parser,
	utils::RcCell,
};

/// The interpreter pipeline plus the global scope it runs against.
///
/// One `Flint` owns one global environment for its whole lifetime, so
/// repeated [`Flint::run`] calls accumulate bindings, which is exactly what
/// a REPL wants. Tests wanting isolation construct a fresh `Flint` (or
/// inject their own environment through [`Flint::with_globals`]) per case.
pub struct Flint {
	globals: RcCell<Environment>,
}

impl Default for Flint {
	fn default() -> Self { Self::new() }
}

impl Flint {
	pub fn new() -> Self { Self { globals: RcCell::new(Environment::new()) } }

	/// Run against a caller-owned global environment. `run` accumulates
	/// bindings into it and never resets it.
	pub fn with_globals(globals: RcCell<Environment>) -> Self { Self { globals } }

	pub fn globals(&self) -> &RcCell<Environment> { &self.globals }

	/// Evaluate a source file and print the resulting value.
	pub fn run_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FlintError> {
		let path = path.as_ref();
		let source = read_to_string(path).context("Failed open source file")?;
		let value = self.run(&path.display().to_string(), &source)?;
		println!("{value}");
		Ok(())
	}

	/// Run the REPL prompt. Errors are printed and the loop keeps going;
	/// bindings survive from line to line.
	pub fn run_prompt(&self) {
		let mut input = String::new();
		let stdin = std::io::stdin();
		loop {
			input.clear();
			print!("> ");
			if let Err(e) = std::io::stdout().flush() {
				eprintln!("Failed flush: {e}");
			}
			match stdin.read_line(&mut input) {
				Ok(0) => {
					println!("\nExited flint repl");
					break;
				}
				Ok(_) => {}
				Err(e) => {
					eprintln!("Failed read line: {e}");
					continue;
				}
			}
			let line = input.trim();
			if line.is_empty() {
				continue;
			}
			match self.run("<stdin>", line) {
				Ok(value) => println!("{value}"),
				Err(e) => eprintln!("{e}"),
			}
		}
	}

	/// Run source text through lexer, parser and interpreter against this
	/// `Flint`'s global scope. `source_name` names the root frame in
	/// runtime tracebacks.
	pub fn run(&self, source_name: &str, source: &str) -> Result<Value, FlintError> {
		let tokens = Lexer::new(source).tokenize()?;
		let ast = Parser::new(tokens).parse()?;
		let context = Context::root(source_name, self.globals.clone());
		Ok(Interpreter.evaluate(&ast, &context)?)
	}
}
