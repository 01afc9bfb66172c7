use std::env;
use std::fs;
use std::path::Path;
use vergen::{BuildBuilder, CargoBuilder, Emitter, RustcBuilder};
use vergen_gitcl::{Emitter as GitEmitter, GitclBuilder};

/// Profiles whose config ships with each cargo profile
fn shipped_profiles(cargo_profile: &str) -> &'static [&'static str] {
    if cargo_profile == "release" {
        &["release"]
    } else {
        &["debug", "release"]
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let build = BuildBuilder::default().build_timestamp(true).build()?;
    let cargo = CargoBuilder::default()
        .opt_level(true)
        .target_triple(true)
        .build()?;
    let rustc = RustcBuilder::default().semver(true).channel(true).build()?;

    Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&cargo)?
        .add_instructions(&rustc)?
        .emit()?;

    // Outside a git checkout vergen emits placeholders; build_info treats them as unknown
    let gitcl = GitclBuilder::default()
        .sha(true)
        .branch(true)
        .commit_timestamp(true)
        .dirty(true)
        .build()?;
    GitEmitter::default().add_instructions(&gitcl)?.emit()?;

    copy_configs()?;

    // Assets are read at runtime, relative to the crate root as a fallback
    println!("cargo:rerun-if-changed=res");

    Ok(())
}

/// Copies `config/<profile>.toml` to `target/<cargo profile>/config`
fn copy_configs() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = env::var("OUT_DIR")?;
    let cargo_profile = env::var("PROFILE")?;

    // OUT_DIR is target/<profile>/build/cube-starter-<hash>/out
    let target_dir = Path::new(&out_dir)
        .ancestors()
        .nth(3)
        .ok_or("Could not determine target directory")?;

    let config_out_dir = target_dir.join("config");
    fs::create_dir_all(&config_out_dir)?;

    for profile in shipped_profiles(&cargo_profile) {
        let file_name = format!("{profile}.toml");
        let source = Path::new("config").join(&file_name);
        println!("cargo:rerun-if-changed={}", source.display());
        if source.exists() {
            fs::copy(&source, config_out_dir.join(&file_name))?;
        }
    }

    Ok(())
}
