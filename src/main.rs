//! Flappy Core headless runner
//!
//! Plays autopilot runs against the simulation and prints a summary per run.
//! Useful for smoke runs and for checking balance changes in a tuning file.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::env;
    use std::path::PathBuf;

    use flappy_core::persistence::{JsonFileStore, MemoryStore, ProgressStore};
    use flappy_core::sim::{GameEvent, SimulationState, TickInput};
    use flappy_core::{QualityPreset, Session, Settings, Tuning};

    /// Parsed command-line arguments
    #[derive(Debug)]
    pub struct CliArgs {
        /// Gameplay seed (random when omitted)
        pub seed: Option<u64>,
        /// Tick limit per run
        pub ticks: u64,
        /// Number of autopilot runs
        pub runs: u32,
        /// Optional tuning JSON
        pub tuning: Option<PathBuf>,
        /// Optional progress file (in-memory when omitted)
        pub store: Option<PathBuf>,
        pub quality: QualityPreset,
        pub show_help: bool,
    }

    impl Default for CliArgs {
        fn default() -> Self {
            Self {
                seed: None,
                ticks: 10_000,
                runs: 1,
                tuning: None,
                store: None,
                quality: QualityPreset::default(),
                show_help: false,
            }
        }
    }

    impl CliArgs {
        pub fn parse() -> Self {
            let mut args = Self::default();
            let mut iter = env::args().skip(1);

            while let Some(arg) = iter.next() {
                match arg.as_str() {
                    "--help" | "-h" => args.show_help = true,
                    "--seed" => match iter.next().and_then(|v| v.parse().ok()) {
                        Some(seed) => args.seed = Some(seed),
                        None => args.invalid("--seed requires a number"),
                    },
                    "--ticks" => match iter.next().and_then(|v| v.parse().ok()) {
                        Some(ticks) => args.ticks = ticks,
                        None => args.invalid("--ticks requires a number"),
                    },
                    "--runs" => match iter.next().and_then(|v| v.parse().ok()) {
                        Some(runs) => args.runs = runs,
                        None => args.invalid("--runs requires a number"),
                    },
                    "--tuning" => match iter.next() {
                        Some(path) => args.tuning = Some(PathBuf::from(path)),
                        None => args.invalid("--tuning requires a path"),
                    },
                    "--store" => match iter.next() {
                        Some(path) => args.store = Some(PathBuf::from(path)),
                        None => args.invalid("--store requires a path"),
                    },
                    "--quality" => match iter.next().as_deref().and_then(QualityPreset::from_str) {
                        Some(quality) => args.quality = quality,
                        None => args.invalid("--quality must be low, medium or high"),
                    },
                    _ => args.invalid(&format!("Unknown flag: {}", arg)),
                }
            }

            args
        }

        fn invalid(&mut self, message: &str) {
            eprintln!("{}", message);
            self.show_help = true;
        }

        pub fn print_help() {
            eprintln!("Usage: flappy-core [OPTIONS]");
            eprintln!();
            eprintln!("Plays headless autopilot runs and reports scores.");
            eprintln!();
            eprintln!("Options:");
            eprintln!("  --seed N          Gameplay seed (default: random)");
            eprintln!("  --ticks N         Tick limit per run (default: 10000)");
            eprintln!("  --runs N          Number of runs (default: 1)");
            eprintln!("  --tuning PATH     Load balance values from a JSON file");
            eprintln!("  --store PATH      Persist best score and achievements to PATH");
            eprintln!("  --quality LEVEL   low | medium | high (particle budget)");
            eprintln!("  -h, --help        Show this help");
            eprintln!();
            eprintln!("Set RUST_LOG=info (or debug) for run lifecycle logging.");
        }
    }

    pub fn run(args: CliArgs) -> flappy_core::Result<()> {
        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };
        let settings = Settings::from_preset(args.quality);
        let seed = args.seed.unwrap_or_else(rand::random);
        log::info!("Seed {} ({} quality)", seed, args.quality.as_str());

        match &args.store {
            Some(path) => play(Session::new(seed, tuning, &settings, JsonFileStore::new(path)), &args),
            None => play(Session::new(seed, tuning, &settings, MemoryStore::new()), &args),
        }
        Ok(())
    }

    fn play<S: ProgressStore>(mut session: Session<S>, args: &CliArgs) {
        let input = TickInput {
            start: true,
            autopilot: true,
            ..Default::default()
        };

        for run in 1..=args.runs {
            let mut unlocked = Vec::new();
            let mut new_best = false;
            for _ in 0..args.ticks {
                let out = session.frame(&input);
                for event in &out.events {
                    match event {
                        GameEvent::AchievementUnlocked(flag) => unlocked.push(flag.title()),
                        GameEvent::NewBest { .. } => new_best = true,
                        _ => {}
                    }
                }
                if out.snapshot.phase == SimulationState::GameOver {
                    break;
                }
            }

            let snap = session.snapshot();
            let ended = if snap.phase == SimulationState::GameOver {
                "crashed"
            } else {
                "tick limit"
            };
            println!(
                "run {:>3}: score {:>4}  level {:>2}  ticks {:>6}  best {:>4}  ({}{})",
                run,
                snap.score,
                snap.level,
                snap.tick,
                snap.best_score,
                ended,
                if new_best { ", new best" } else { "" }
            );
            for title in unlocked {
                println!("          unlocked: {}", title);
            }

            // A run still in progress cannot be restarted
            if snap.phase != SimulationState::GameOver {
                break;
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let args = cli::CliArgs::parse();
    if args.show_help {
        cli::CliArgs::print_help();
        return;
    }
    if let Err(e) = cli::run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on the web
}
