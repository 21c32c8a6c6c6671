//! A single-pass compiler from a small C-like subset to textual LLVM-IR:
//! character [`scanner`] to token-stream [`parser`] to AST-directed
//! [`generator`], written through the thin [`emitter`].

pub mod emitter;
pub mod error;
pub mod generator;
pub mod parser;
pub mod scanner;

use std::io::Write;

pub use error::CompileError;
use generator::Generator;
use parser::Parser;
use scanner::Scanner;

/// Compile `source` to LLVM-IR, writing it directly into `sink` as each
/// function finishes. `source_name` becomes the `source_filename` metadata
/// line. `debug` traces each top-level statement's AST tag to stdout as it
/// is generated.
///
/// Nothing is buffered and rolled back on failure: if compilation fails
/// partway through, whatever IR was already generated for prior functions
/// has already landed in `sink`.
pub fn compile_source(
    source: &str,
    source_name: &str,
    sink: &mut impl Write,
    debug: bool,
) -> Result<(), CompileError> {
    let mut scanner = Scanner::new(source);
    scanner.scan_token()?;
    let mut parser = Parser::new(scanner);
    let mut generator = Generator::new(sink);

    generator.emit_preamble(source_name)?;

    let mut statement_number = 0;
    while let Some(ast) = parser.parse_top_level_statement()? {
        if debug {
            println!("[debug] {source_name}: statement {statement_number}: {}", ast.tag());
        }
        generator.generate_top_level(&ast)?;
        statement_number += 1;
    }

    generator.emit_postamble()?;
    Ok(())
}
