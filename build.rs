// build.rs
//
// Emits VERGEN_* variables consumed by `interlint version`. Every builder
// comes from vergen-gitcl so they share its `Emitter`.

use vergen_gitcl::{BuildBuilder, CargoBuilder, Emitter, GitclBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let build = BuildBuilder::default().build_date(true).build()?;
    let cargo = CargoBuilder::default()
        .debug(true)
        .target_triple(true)
        .build()?;
    // Falls back to placeholder values outside a git checkout.
    let git = GitclBuilder::default().sha(true).dirty(true).build()?;

    Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&cargo)?
        .add_instructions(&git)?
        .emit()?;

    Ok(())
}
