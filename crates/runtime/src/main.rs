#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod app;
mod audio;
mod cli;
mod clock;
mod display;
mod input;
mod terminal;
mod volume;

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(err) => Cli::command().error(ErrorKind::ValueValidation, err).exit(),
    };

    init_logging(settings.log_file.as_deref())?;
    tracing::info!(?settings, "Starting cube runtime");

    let result = app::run(&settings);
    if let Err(err) = &result {
        tracing::error!("Render loop failed: {err:?}");
    }
    result
}

/// Stdout belongs to the renderer, so logs go to a file or nowhere.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_ansi(false);
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::sink).init(),
    }
    Ok(())
}
