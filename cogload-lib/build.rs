//! This build script validates the default configuration file (`default_config.toml`)

#![allow(
    clippy::redundant_pub_crate,
    reason = "pub(crate) is correct in library context but appears redundant in build script"
)]
#![allow(dead_code, reason = "Some items may be unused in this build script context")]

use camino::Utf8PathBuf;
use ohno::IntoAppError;
use std::env;
use std::process;

type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[path = "src/commands/config.rs"]
mod config;

fn main() {
    match inner_main() {
        Ok(()) => {
            println!("cargo:rerun-if-changed=default_config.toml");
            println!("cargo:rerun-if-changed=src/commands/config.rs");
        }
        Err(e) => {
            eprintln!("unable to load default_config.toml: {e:?}");
            process::exit(1);
        }
    }
}

fn inner_main() -> Result<()> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").into_app_err("CARGO_MANIFEST_DIR should be set during build")?;
    let config_path = Utf8PathBuf::from(&manifest_dir).join("default_config.toml");

    let _ = config::Config::load(Some(&config_path), &[]).into_app_err("unable to load default_config.toml")?;
    Ok(())
}
