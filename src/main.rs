//! src/main.rs
//!
//! Entrypoint: load settings, set up error reporting and logging, then hand
//! off to `app::run()`.

mod app;
mod config;
mod control;
mod graph;
mod logging;
mod net;
mod panels;
mod render;
mod sensor;
mod session;
mod ui;

use std::path::PathBuf;

use color_eyre::eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = config::Settings::load(config_path.as_deref())?;
    logging::init(&settings.log_file, &settings.log_level)?;

    app::run(settings)
}
