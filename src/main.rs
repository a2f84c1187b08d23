mod app;
mod cli;
mod state;
mod ui;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tddft_uvvis::chart::chart_for_samples;
use tddft_uvvis::chart::sink::{ChartSink, CsvSink, ImageSink};
use tddft_uvvis::pipeline::load_samples;

use cli::Cli;
use state::AppState;

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.to_config().context("reading configuration")?;
    let samples = load_samples(&config)?;
    let chart = chart_for_samples(&samples, &config)?;

    if let Some(path) = &cli.output {
        ImageSink::new(path)
            .render(&chart)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &cli.csv {
        CsvSink::new(path)
            .render(&chart)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    if cli.wants_window() {
        app::show_window(AppState::new(config, samples))?;
    }
    Ok(())
}
