// main.rs - Command line front end for the cycle-avoiding Game of Life

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use conway::{Board, LifeConfig, Pattern, Session};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

mod runner;
#[cfg(feature = "gui")]
mod ui;

#[derive(Parser)]
#[command(name = "conway")]
#[command(version)]
#[command(about = "Conway's Game of Life that reseeds itself when it falls into a short cycle")]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation in the terminal
    Run {
        /// Stop after this many generations (runs until Ctrl-C otherwise)
        #[arg(short, long)]
        generations: Option<u64>,

        /// Only print a summary at the end
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the encoded form of the starting board
    Encode,

    /// Draw a board from its encoded form
    Decode {
        /// Encoded board, e.g. 3-3-11212110
        text: String,
    },

    /// Open the interactive window
    #[cfg(feature = "gui")]
    View,
}

#[derive(Args, Debug, Default)]
struct Settings {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Board width in cells
    #[arg(long, global = true)]
    width: Option<usize>,

    /// Board height in cells
    #[arg(long, global = true)]
    height: Option<usize>,

    /// Generations searched for a repeated state (0 disables cycle checks)
    #[arg(long, global = true)]
    depth: Option<usize>,

    /// Chance that a seeded cell starts alive
    #[arg(long, global = true)]
    life_ratio: Option<f64>,

    /// Fraction of each side left dead when seeding
    #[arg(long, global = true)]
    life_border: Option<f64>,

    /// Milliseconds between generations
    #[arg(long, global = true)]
    speed_ms: Option<u64>,

    /// Encoded board to start from
    #[arg(long, global = true)]
    board: Option<String>,

    /// Named pattern to start from
    #[arg(long, global = true)]
    pattern: Option<String>,

    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,
}

impl Settings {
    /// File values (or defaults) with command line overrides applied.
    fn resolve(&self) -> Result<LifeConfig> {
        let mut config = match &self.config {
            Some(path) => LifeConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => LifeConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if let Some(ratio) = self.life_ratio {
            config.life_ratio = ratio;
        }
        if let Some(border) = self.life_border {
            config.life_border = border;
        }
        if let Some(speed) = self.speed_ms {
            config.speed_ms = speed;
        }
        if self.board.is_some() {
            config.board = self.board.clone();
        }
        if self.pattern.is_some() {
            config.pattern = self.pattern.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Builds the session and loads the configured start board, if any.
fn start_session(config: &LifeConfig, seed: Option<u64>) -> Result<Session> {
    let mut session = match seed {
        Some(seed) => Session::with_seed(config, seed),
        None => Session::new(config),
    };

    if let Some(text) = &config.board {
        let board = text.parse::<Board>().context("decoding start board")?;
        session.load(board);
    } else if let Some(name) = &config.pattern {
        let Some(pattern) = Pattern::find(name) else {
            bail!("unknown pattern: {name}");
        };
        session.load(pattern.place(config.width, config.height));
    }
    Ok(session)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { generations, quiet } => {
            let config = cli.settings.resolve()?;
            let session = start_session(&config, cli.settings.seed)?;
            info!(
                width = config.width,
                height = config.height,
                depth = config.depth,
                "starting simulation"
            );

            let runtime = tokio::runtime::Runtime::new()?;
            let summary = runtime.block_on(runner::run(
                session,
                Duration::from_millis(config.speed_ms),
                generations,
                !quiet,
                std::io::stdout(),
            ))?;
            println!(
                "{} generations, {} reseeds, {} live cells",
                summary.ticks, summary.reseeds, summary.population
            );
        }
        Commands::Encode => {
            let config = cli.settings.resolve()?;
            let session = start_session(&config, cli.settings.seed)?;
            println!("{}", session.encode());
        }
        Commands::Decode { text } => {
            let board = conway::try_decode(&text).with_context(|| format!("invalid board {text:?}"))?;
            print!("{board}");
        }
        #[cfg(feature = "gui")]
        Commands::View => {
            let config = cli.settings.resolve()?;
            let session = start_session(&config, cli.settings.seed)?;
            ui::run(session, Duration::from_millis(config.speed_ms))?;
        }
    }
    Ok(())
}
