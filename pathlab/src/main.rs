//! pathlab — A* on a grid, in the terminal.

use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use pathlab::{LabConfig, LabError, LabModel, Result, Session, Snapshot, animate, ascii};
use pathlab_crossterm::CrosstermDriver;
use pathlab_paths::Outcome;
use pathlab_term::{App, AppConfig};

/// Interactive A* pathfinding visualiser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid side length (overrides the config file)
    #[arg(short, long)]
    size: Option<i32>,

    /// Milliseconds between search steps (overrides the config file)
    #[arg(long)]
    step_delay: Option<u64>,

    /// Maze seed, for reproducible mazes
    #[arg(long)]
    seed: Option<u64>,

    /// Solve a generated maze without a terminal UI and print the result
    #[arg(long)]
    headless: bool,

    /// With --headless, print a JSON snapshot instead of the ASCII grid
    #[arg(long, requires = "headless")]
    json: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    init_logging(&args)?;
    let config = load_config(&args)?;
    log::info!(
        "grid {n}x{n}, step delay {:?}, seed {:?}",
        config.step_delay(),
        config.seed,
        n = config.size
    );
    if args.headless {
        headless(&config, args.json)
    } else {
        interactive(&config)
    }
}

/// Logs go to stderr in headless mode. The terminal UI owns the screen, so
/// there they are off unless a log file is given.
fn init_logging(args: &Args) -> Result<()> {
    let default_level = if args.headless || args.log_file.is_some() {
        "info"
    } else {
        "off"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn load_config(args: &Args) -> Result<LabConfig> {
    let mut config = match &args.config {
        Some(path) => LabConfig::load(path)?,
        None => LabConfig::default(),
    };
    if let Some(size) = args.size {
        config.size = size;
    }
    if let Some(ms) = args.step_delay {
        config.step_delay_ms = ms;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

fn interactive(config: &LabConfig) -> Result<()> {
    let model = LabModel::new(Session::from_config(config), config.step_delay());
    let (width, height) = model.screen_size();
    let mut app = App::new(AppConfig {
        model,
        driver: CrosstermDriver::new(),
        width,
        height,
    });
    app.run()?;
    Ok(())
}

fn headless(config: &LabConfig, json: bool) -> Result<()> {
    let mut session = Session::from_config(config);
    session.generate_maze();

    let outcome = animate(&mut session, config.step_delay(), |s, step| {
        log::debug!("{step:?}: {:?}", s.stats());
    })
    .ok_or_else(|| LabError::Config("maze has no start or end".into()))?;

    if json {
        println!("{}", Snapshot::of(&session).to_json()?);
        return Ok(());
    }

    print!("{}", ascii(&session));
    let stats = session.stats();
    match outcome {
        Outcome::Succeeded(path) => println!(
            "path found: {} steps, {} cells expanded",
            path.len(),
            stats.expanded
        ),
        Outcome::Failed => println!("no path: {} cells expanded", stats.expanded),
    }
    Ok(())
}
