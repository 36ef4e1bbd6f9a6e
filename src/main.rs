//! Lockgame simulator: replays a stimulus script against the controller.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  ScriptedPanel (Input+Output)      LogEventSink          │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ─────────────         │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │            PanelService (pure logic)               │  │
//! │  │  ModeArbiter · SecurityController · GameConsole    │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use lockgame::adapters::log_sink::LogEventSink;
use lockgame::adapters::script::{ScriptedPanel, Stimulus};
use lockgame::app::service::PanelService;
use lockgame::config::BoardConfig;
use lockgame::logging::setup_logger;

#[derive(Parser)]
#[command(name = "lockgame-sim")]
#[command(about = "Replay a stimulus script against the lock/game board controller")]
struct Args {
    /// JSON stimulus script
    script: PathBuf,

    /// Simulated tick rate in Hz (ignored when --config is given)
    #[arg(long, default_value_t = 1000)]
    tick_hz: u32,

    /// JSON board configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_config(args: &Args) -> Result<BoardConfig> {
    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => BoardConfig::for_tick_rate(args.tick_hz),
    };
    config.validate().context("invalid board configuration")?;
    Ok(config)
}

fn load_script(path: &Path) -> Result<Stimulus> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading script {}", path.display()))?;
    let stimulus: Stimulus =
        serde_json::from_str(&text).with_context(|| format!("parsing script {}", path.display()))?;
    stimulus.validate().context("invalid stimulus script")?;
    Ok(stimulus)
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logger(args.verbose).context("installing logger")?;

    let config = load_config(&args)?;
    let stimulus = load_script(&args.script)?;
    info!(
        "Simulating {} steps at {} Hz",
        stimulus.steps.len(),
        config.tick_hz
    );

    let mut panel = ScriptedPanel::new(stimulus, &config).context("preparing script")?;
    let mut service = PanelService::new(&config);
    let mut sink = LogEventSink::new();
    service.start(&mut sink);

    while !panel.is_finished() {
        service
            .tick(&mut panel, &mut sink)
            .with_context(|| format!("tick {}", service.tick_count() + 1))?;
        if let Some(report) = panel.take_report() {
            println!(
                "step {:>3} {:<24} leds={:016b} display=[{}]",
                report.index,
                report.label.as_deref().unwrap_or(""),
                report.leds,
                report.frame
            );
        }
    }
    service.publish_telemetry(&mut sink);

    if panel.frame().complete() {
        println!("final display: [{}]", panel.frame().text());
    } else {
        warn!("final display never completed a scan; hold the last step longer");
    }
    println!("final leds:    {:016b}", panel.last_outputs().leds);
    println!(
        "{}",
        serde_json::to_string_pretty(&service.stats()).context("serialising statistics")?
    );
    Ok(())
}
