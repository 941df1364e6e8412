use std::path::{Path, PathBuf};
use std::process;
use std::thread;

use clap::Parser;

use gesture_core::engine::engine_config::EngineConfig;
use gesture_core::engine::gesture_engine::GestureEngine;
use gesture_core::engine::infrastructure::channel_action_consumer::ChannelActionConsumer;
use gesture_core::engine::tick_scheduler::SessionEnd;
use gesture_core::landmarks::infrastructure::jsonl_landmark_provider::JsonlLandmarkProvider;
use gesture_core::shared::gesture::GestureEvent;

/// Replays a recorded landmark stream through the gesture engine.
#[derive(Parser)]
#[command(name = "gesture-replay")]
struct Cli {
    /// Recorded landmark stream (one JSON frame per line).
    input: PathBuf,

    /// Engine config JSON (defaults to the per-user config, if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Deliver frames at their recorded pace instead of as fast as possible.
    #[arg(long)]
    realtime: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn check_input(path: &Path) -> Result<(), String> {
    if path.is_file() {
        Ok(())
    } else {
        Err(format!("Input is not a readable file: {}", path.display()))
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    check_input(&cli.input)?;

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::load_or_default(),
    };
    log::debug!("Engine config: {config:?}");

    let provider = JsonlLandmarkProvider::open(&cli.input)?.with_realtime(cli.realtime);
    let (tx, rx) = crossbeam_channel::unbounded::<GestureEvent>();

    let printer = thread::spawn(move || {
        let mut count = 0usize;
        for event in rx {
            println!("{}\t{}", event.fired_at(), event.code());
            count += 1;
        }
        count
    });

    let mut engine = GestureEngine::new(
        config,
        Box::new(provider),
        Box::new(ChannelActionConsumer::new(tx)),
    );
    engine.enable()?;
    let end = engine.wait()?;
    // Dropping the engine drops the last sender, which ends the printer.
    drop(engine);

    let count = printer.join().map_err(|_| "Printer thread panicked")?;
    match end {
        Some(SessionEnd::Exhausted) | None => {
            log::info!("Replayed {}: {count} gestures", cli.input.display())
        }
        Some(SessionEnd::Disabled) => log::warn!("Replay stopped early: {count} gestures"),
    }
    Ok(())
}
