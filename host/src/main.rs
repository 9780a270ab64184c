//! Headless runner: replays a recorded run against the simulation and
//! reports what happened.
//!
//! Usage:
//!   tandem-host [--levels DIR] [--config FILE] [--events] [--snapshot] [RUN_FILE]
//!
//! Reads the run JSON from RUN_FILE, or stdin when no file is given.

mod levels;

use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use tandem_core::*;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Default, PartialEq)]
struct Args {
    levels: Option<PathBuf>,
    config: Option<PathBuf>,
    events: bool,
    snapshot: bool,
    run_file: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--levels" => {
                let dir = args.next().context("--levels needs a directory")?;
                parsed.levels = Some(dir.into());
            }
            "--config" => {
                let file = args.next().context("--config needs a file")?;
                parsed.config = Some(file.into());
            }
            "--events" => parsed.events = true,
            "--snapshot" => parsed.snapshot = true,
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            _ if parsed.run_file.is_none() => parsed.run_file = Some(arg.into()),
            _ => bail!("unexpected argument {arg}"),
        }
    }
    Ok(parsed)
}

fn load_run(path: Option<&PathBuf>) -> Result<RunInput> {
    let json_str = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading run file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading run from stdin")?;
            buf
        }
    };
    serde_json::from_str(&json_str).context("parsing run JSON")
}

fn load_config(path: &PathBuf) -> Result<GameConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).context("parsing config JSON")
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive("tandem_host=info".parse()?)
                .add_directive("tandem_core=info".parse()?),
        )
        .init();
    Ok(())
}

fn run<S: LevelSource>(mut game: Game<S>, input: &RunInput, args: &Args) -> Result<RunSummary> {
    if let Some(id) = input.start {
        game.enter_level(id);
    }

    let started = Instant::now();
    let mut summary = RunSummary::default();
    for frame_input in &input.transcript {
        let frame = game.frame;
        let events = step(&mut game, frame_input);
        summary.frames += 1;
        summary.absorb(&events);
        if args.events && !events.is_empty() {
            println!(
                "{}",
                serde_json::json!({ "frame": frame, "events": events })
            );
        }
        if game.exit_requested {
            break;
        }
    }
    info!(
        frames = summary.frames,
        game_seconds = game.config.seconds(summary.frames),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "run finished"
    );

    if args.snapshot {
        println!("{}", serde_json::to_string(&game.snapshot())?);
    }
    Ok(summary)
}

fn print_summary(summary: &RunSummary, config: &GameConfig) {
    eprintln!("=== Run Result ===");
    eprintln!(
        "Frames: {} ({:.1}s at {} fps)",
        summary.frames,
        config.seconds(summary.frames),
        config.tick_rate
    );
    eprintln!(
        "Coins: P1={}, P2={}",
        summary.coins_collected[0], summary.coins_collected[1]
    );
    eprintln!("Deaths: P1={}, P2={}", summary.deaths[0], summary.deaths[1]);
    eprintln!("Jumps: P1={}, P2={}", summary.jumps[0], summary.jumps[1]);
    for id in &summary.levels_completed {
        eprintln!("Completed: {}", id);
    }
    if summary.all_levels_complete {
        eprintln!("All levels complete!");
    }
    if summary.exit_requested {
        eprintln!("Exit requested");
    }
}

fn main() -> Result<()> {
    init_tracing()?;
    let args = parse_args(std::env::args().skip(1))?;

    let mut input = load_run(args.run_file.as_ref())?;
    if let Some(path) = &args.config {
        input.config = load_config(path)?;
    }
    info!(
        frames = input.transcript.len(),
        seed = input.config.seed,
        "run loaded"
    );

    let summary = match &args.levels {
        Some(dir) => {
            let catalog = levels::load_dir(dir)?;
            if catalog.is_empty() {
                bail!("no levels found in {}", dir.display());
            }
            info!(levels = catalog.len(), "level directory loaded");
            run(Game::new(input.config.clone(), catalog), &input, &args)?
        }
        None => run(create_game(input.config.clone()), &input, &args)?,
    };

    print_summary(&summary, &input.config);
    Ok(())
}
