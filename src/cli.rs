use std::path::PathBuf;

use palc::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flint", after_long_help = "An expression-oriented scripting language interpreter.")]
pub struct Cli {
	#[command(subcommand)]
	pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Evaluate a source file
	File { path: PathBuf },
	/// Interactive prompt
	Repl,
}
