//! idldoc CLI - API reference generator.
//!
//! Reads the IDL compiler's JSON output from a fixed relative path and writes
//! one markdown document per class/enum under `docs/`, extracting embedded
//! diagrams into `dots/` and `umls/`.
//!
//! There are no flags: invoked with any extra argument the binary runs its
//! built-in self-test suite instead of generating.

mod error;
mod generator;
mod output;
mod selftest;

use std::path::Path;

use tracing_subscriber::EnvFilter;

use generator::Generator;
use output::Output;

/// Fixed location of the IDL compiler output, relative to the working
/// directory the docs build invokes this tool from.
const INPUT_PATH: &str = "../idl_gen/idl.json";

fn main() {
    let output = Output::new();

    // Log level comes from RUST_LOG; default is warnings only.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let result = if std::env::args().len() > 1 {
        selftest::run(&output)
    } else {
        Generator::new(Path::new(".")).generate(Path::new(INPUT_PATH))
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
