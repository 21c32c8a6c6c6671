use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;

use tinyc::compile_source;

/// Compile a small C-like subset to LLVM-IR.
#[derive(ClapParser)]
#[command(name = "tinyc", version, about)]
struct Cli {
    /// Trace each generated top-level statement to stdout.
    #[arg(short, long)]
    debug: bool,

    /// Where the generated IR is written. Each input compiles into the
    /// same path in turn, so with more than one input only the last
    /// input's IR survives.
    #[arg(short, long, default_value = "out.ll")]
    outfile: PathBuf,

    /// Source files to compile.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    for input in &cli.inputs {
        let source = match fs::read_to_string(input) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("tinyc: {}: {err}", input.display());
                return ExitCode::FAILURE;
            }
        };

        let mut outfile = match File::create(&cli.outfile) {
            Ok(file) => file,
            Err(err) => {
                eprintln!("tinyc: {}: {err}", cli.outfile.display());
                return ExitCode::FAILURE;
            }
        };

        let source_name = input.to_string_lossy();
        if let Err(err) = compile_source(&source, &source_name, &mut outfile, cli.debug) {
            eprintln!("tinyc: {}: {err}", input.display());
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
