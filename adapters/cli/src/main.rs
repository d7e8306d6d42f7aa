#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that opens the Snake window.

mod session;
mod settings;

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use rand::Rng;
use snake_core::{Board, WINDOW_TITLE};
use snake_rendering::{palette, Presentation, RenderingBackend};
use snake_rendering_macroquad::MacroquadBackend;

use crate::{session::Session, settings::Settings};

/// Command-line arguments accepted by the Snake binary.
#[derive(Debug, Parser)]
#[command(name = "snake", about = "Classic snake on a wrap-around grid.")]
struct CliArgs {
    /// TOML file with seed, tick_rate, vsync and show_tick_rate keys.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for food placement and restart directions.
    #[arg(long)]
    seed: Option<u64>,
    /// Ticks processed per second.
    #[arg(long, value_name = "TICKS")]
    tick_rate: Option<u32>,
    /// Present frames without waiting for the display refresh.
    #[arg(long)]
    no_vsync: bool,
    /// Log the measured tick rate once per second.
    #[arg(long = "show-fps")]
    show_fps: bool,
}

impl CliArgs {
    /// Layers command-line flags over the optional settings file.
    fn resolve_settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(tick_rate) = self.tick_rate {
            settings.tick_rate = tick_rate;
        }
        if self.no_vsync {
            settings.vsync = false;
        }
        if self.show_fps {
            settings.show_tick_rate = true;
        }

        settings.validate().context("invalid command-line settings")?;
        Ok(settings)
    }
}

/// Entry point for the Snake command-line interface.
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(CliArgs::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<()> {
    let settings = args.resolve_settings()?;
    let seed = settings
        .seed
        .unwrap_or_else(|| rand::thread_rng().gen::<u64>());
    log::info!(
        "starting snake with seed {seed} at {} ticks per second",
        settings.tick_rate
    );

    let mut session = Session::new(seed)?;
    let presentation = Presentation::new(
        WINDOW_TITLE,
        palette::BACKGROUND,
        Board::STANDARD,
        settings.tick_rate,
    );
    let backend = MacroquadBackend::new()
        .with_vsync(settings.vsync)
        .with_show_tick_rate(settings.show_tick_rate);

    backend
        .run(presentation, move |input, target| session.frame(input, target))
        .context("rendering loop failed")?;

    log::info!("window closed");
    Ok(())
}
