use flint::cli::*;
use palc::Parser;

fn main() {
	let flint = flint::Flint::new();

	match Cli::parse().mode {
		Mode::File { path } => {
			if let Err(e) = flint.run_file(&path) {
				eprintln!("{e}");
			}
		}
		Mode::Repl => flint.run_prompt(),
	}
}
