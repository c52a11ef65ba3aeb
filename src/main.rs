//! Ballkey entry point
//!
//! Headless driver: runs the simulation and the per-tick search until the
//! target is found or the tick budget runs out.
//!
//! # Usage
//!
//! ```bash
//! # Default arena, run until found
//! ballkey
//!
//! # Settings file plus overrides
//! ballkey --config run.json --seed 7 --max-ticks 5000 --fps 0
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;

use ballkey::search::{MatchChecker, P2pkhDeriver};
use ballkey::sim::{Progress, Session, TickInput, TickOutcome};
use ballkey::{ResultLog, Settings};

#[derive(Parser)]
#[command(name = "ballkey")]
#[command(about = "Bouncing-ball fingerprints driving a deterministic key-candidate search")]
#[command(version)]
struct Cli {
    /// JSON settings file (missing fields use defaults).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for body spawning.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of bodies (fingerprint length).
    #[arg(short, long)]
    bodies: Option<usize>,

    /// Target address to search for.
    #[arg(short, long)]
    target: Option<String>,

    /// File that found keys are appended to.
    #[arg(short, long)]
    result_log: Option<PathBuf>,

    /// Stop after this many ticks.
    #[arg(short, long)]
    max_ticks: Option<u64>,

    /// Ticks between reseeds.
    #[arg(long)]
    reseed_interval: Option<u64>,

    /// Frame rate cap (0 = unthrottled).
    #[arg(long)]
    fps: Option<u32>,
}

impl Cli {
    fn settings(&self) -> ballkey::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(bodies) = self.bodies {
            settings.body_count = bodies;
        }
        if let Some(target) = &self.target {
            settings.target_address = target.clone();
        }
        if let Some(path) = &self.result_log {
            settings.result_log = path.clone();
        }
        if let Some(max_ticks) = self.max_ticks {
            settings.max_ticks = Some(max_ticks);
        }
        if let Some(interval) = self.reseed_interval {
            settings.reseed_interval = interval;
        }
        if let Some(fps) = self.fps {
            settings.frame_rate = fps;
        }
        settings.validate()?;
        Ok(settings)
    }
}

fn run(settings: &Settings) -> ballkey::Result<bool> {
    let checker = MatchChecker::new(P2pkhDeriver::new(), settings.target_address.clone());
    let results = ResultLog::open(&settings.result_log)?;
    let mut session = Session::with_config(
        settings.arena_config(),
        settings.seed,
        checker,
        results,
        settings.reseed_interval,
    );

    log::info!(
        "Searching for {} with {} bodies (seed {})",
        settings.target_address,
        settings.body_count,
        settings.seed
    );

    let frame = (settings.frame_rate > 0)
        .then(|| Duration::from_secs_f64(1.0 / settings.frame_rate as f64));
    let progress_interval = settings.progress_interval.max(1);
    let input = TickInput::default();

    let mut report = |p: &Progress<'_>| {
        if p.iteration % progress_interval == 0 {
            log::info!("{} - {} - {}", p.iteration, p.candidate.key, p.address);
        } else {
            log::debug!("{} - {} - {}", p.iteration, p.candidate.key, p.address);
        }
    };

    loop {
        if settings.max_ticks.is_some_and(|max| session.iteration >= max) {
            log::info!("Tick budget spent after {} ticks", session.iteration);
            return Ok(false);
        }

        let started = Instant::now();
        if let TickOutcome::Found(record) = session.tick(&input, Some(&mut report))? {
            log::info!(
                "Target found; record appended to {} ({})",
                settings.result_log.display(),
                record.address
            );
            return Ok(true);
        }

        if let Some(frame) = frame {
            let elapsed = started.elapsed();
            if elapsed < frame {
                thread::sleep(frame - elapsed);
            }
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = cli.settings().and_then(|settings| run(&settings));

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            log::info!("Run ended without finding the target address");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
