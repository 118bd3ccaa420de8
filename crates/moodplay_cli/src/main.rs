use clap::{Parser, ValueEnum};
use moodplay_core::{DetectionMode, EmotionObservation, MoodplayConfig, TrackCatalog};
use moodplay_detector::{EmotionSimulator, RandomEntropy, TickConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod session;

use commands::{Command, HELP};
use session::Dashboard;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file (missing file means defaults)
    #[arg(short, long, default_value = "moodplay.toml", env = "MOODPLAY_CONFIG")]
    config: PathBuf,

    /// Detection mode: facial, voice or both (overrides config)
    #[arg(short, long)]
    mode: Option<DetectionMode>,

    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// End the session after this many seconds (0 = run until `quit`)
    #[arg(short, long, default_value_t = 0)]
    duration_secs: u64,

    /// Demo cadence: a reading every 250ms instead of the configured interval
    #[arg(long)]
    fast: bool,

    /// Do not start detection until the `start` command
    #[arg(long)]
    paused: bool,

    /// Print readings as JSON lines
    #[arg(long)]
    json: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.log_format);

    info!("Initializing MoodPlay...");
    let config = MoodplayConfig::load_or_default(&args.config);
    let mode = args.mode.unwrap_or(config.detector.mode);

    let dashboard = Arc::new(Dashboard::new(
        TrackCatalog::builtin(&config.recommendations),
        args.json,
    ));
    let sink = {
        let dashboard = Arc::clone(&dashboard);
        move |observation: EmotionObservation| print_lines(&dashboard.observe(observation))
    };

    let mut tick = TickConfig::from(&config.detector);
    if args.fast {
        tick.interval = TickConfig::fast().interval;
    }
    let simulator = match args.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            EmotionSimulator::with_entropy(tick, mode, sink, RandomEntropy::seeded(seed))
        }
        None => EmotionSimulator::new(tick, mode, sink),
    };

    println!("MoodPlay online. Type 'help' for commands, 'quit' to exit.");
    if !args.paused {
        simulator.start();
    }

    let deadline = async {
        match args.duration_secs {
            0 => std::future::pending::<()>().await,
            secs => tokio::time::sleep(Duration::from_secs(secs)).await,
        }
    };
    tokio::pin!(deadline);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        error!("Failed to read command input: {}", e);
                        break;
                    }
                };
                let Some(line) = line else {
                    // Without a deadline, end of input ends the session.
                    if args.duration_secs == 0 {
                        break;
                    }
                    stdin_open = false;
                    continue;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                match command {
                    Command::Start => simulator.start(),
                    Command::Stop => simulator.stop(),
                    Command::Mode(mode) => simulator.set_mode(mode),
                    Command::Correct(emotion) => {
                        simulator.override_emotion(emotion);
                    }
                    Command::Recommend => print_lines(&dashboard.current_recommendations()),
                    Command::Play(id) => match dashboard.toggle_play(&id) {
                        Ok(msg) => println!("{}", msg),
                        Err(e) => println!("{}", e),
                    },
                    Command::Like(id) => match dashboard.toggle_like(&id) {
                        Ok(msg) => println!("{}", msg),
                        Err(e) => println!("{}", e),
                    },
                    Command::Stats => match dashboard.stats_json() {
                        Ok(json) => println!("{}", json),
                        Err(e) => error!("Failed to render stats: {}", e),
                    },
                    Command::Help => println!("{}", HELP),
                    Command::Quit => break,
                }
            }
            _ = &mut deadline => {
                info!("Session time limit reached");
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    simulator.stop();
    println!("{}", dashboard.summary());
    Ok(())
}
