//! Generates the dispatcher types included by `src/dispatcher/generated.rs`.

use brrtdispatch_codegen::{generate, GeneratorConfig};
use std::error::Error;
use std::path::PathBuf;

/// Largest handler arity shipped with the crate. Use the `brrtdispatch-gen`
/// binary for wider handlers.
const MAX_ARITY: usize = 4;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=brrtdispatch_codegen/src");

    let source = generate(&GeneratorConfig::new(0, MAX_ARITY))?;
    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    std::fs::write(out_dir.join("dispatchers.rs"), source)?;
    Ok(())
}
