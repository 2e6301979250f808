use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use fieldsweep_core::MinefieldEngine;

use crate::session::Session;
use crate::settings::Settings;
use crate::view::{JsonView, Presenter, TerminalView};

mod command;
mod session;
mod settings;
mod view;

/// Minesweeper in the terminal. Type `?` once running for the commands.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with startup settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Field width, 1 to 50
    #[arg(long)]
    width: Option<i32>,

    /// Field height, 1 to 50
    #[arg(long)]
    height: Option<i32>,

    /// Amount of mines
    #[arg(short, long, conflicts_with = "percent")]
    mines: Option<i32>,

    /// Amount of mines as a percentage of the field
    #[arg(short, long)]
    percent: Option<f32>,

    /// Emit JSON documents instead of drawing the field
    #[arg(long)]
    json: bool,
}

impl Args {
    fn overrides(&self) -> Settings {
        Settings {
            width: self.width,
            height: self.height,
            mines: self.mines,
            percent: self.percent,
            seed: self.seed,
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn play<P: Presenter>(engine: MinefieldEngine, presenter: P) -> anyhow::Result<()> {
    let mut session = Session::new(engine, presenter);
    session.run(io::stdin().lock())?;
    log::debug!(
        "session ended with {} safe cells left",
        session.engine().remaining_safe_cells()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    }
    .merge(args.overrides());
    log::debug!("settings: {:?}", settings);

    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("seed: {}", seed);

    let engine = MinefieldEngine::new(settings.game_config(), seed);
    let stdout = io::stdout().lock();
    if args.json {
        play(engine, JsonView::new(stdout))
    } else {
        play(engine, TerminalView::new(stdout))
    }
}
