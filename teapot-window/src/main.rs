/// Teapot Window - spinning teapot drawn as green pixels
///
/// Close the window or press ESC to quit.
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use teapot_core::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "teapot-window", version, about = "Spin a point-cloud teapot in a window")]
struct Cli {
    /// Vertex list (`v x y z` lines) or STL file to show instead of the teapot
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let model = config.load_model(cli.model.as_deref())?;
    teapot_window::run(&config, model).context("window renderer failed")?;
    Ok(())
}
