use std::error::Error;
use vergen_gitcl::{CargoBuilder, Emitter, GitclBuilder};

fn main() -> Result<(), Box<dyn Error>> {
	let mut emitter = Emitter::default();

	emitter.add_instructions(&CargoBuilder::default().target_triple(true).build()?)?;

	// Source tarballs carry no git metadata; fall back to a fixed marker in the version string.
	if emitter.add_instructions(&GitclBuilder::default().sha(true).build()?).is_err()
	{
		println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
	}

	emitter.emit()?;

	Ok(())
}
