//! facade - terminal front end for the panel mixer
//!
//! Run with: cargo run --bin facade
//!
//! Logs go to `facade.log` (the terminal belongs to the UI); set `RUST_LOG`
//! to change the level. `FACADE_CONFIG` may name a JSON file overriding any
//! subset of the mixer settings.

mod app;
mod gate;
mod ui;

use std::fs::File;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use facade_mix::config::MixConfig;

const LOG_FILE: &str = "facade.log";

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    let config = load_config()?;
    app::run(config)
}

fn init_logging() -> EyreResult<()> {
    let file = File::create(LOG_FILE).wrap_err_with(|| format!("failed to create {LOG_FILE}"))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_config() -> EyreResult<MixConfig> {
    let Ok(path) = std::env::var("FACADE_CONFIG") else {
        return Ok(MixConfig::default());
    };

    let json = std::fs::read_to_string(&path).wrap_err_with(|| format!("failed to read config {path}"))?;
    let config = MixConfig::from_json_str(&json).wrap_err_with(|| format!("invalid config {path}"))?;
    log::info!("loaded config from {path}");
    Ok(config)
}
