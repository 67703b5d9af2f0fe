//! Headless live-track run: simulate a stretch of tracking and print the final snapshot.
//!
//! Usage: `track-sim [track-id] [seconds]`. Set `RUST_LOG=debug` for per-step logs.

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use trailwatch_lib::config::LiveTrackConfig;
use trailwatch_lib::live_track::TrackSimulator;

/// Simulated wall-clock slice between frames
const FRAME: Duration = Duration::from_millis(250);

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let track_id = args.next().unwrap_or_else(|| "al-wathba".to_string());
    let seconds: u64 = match args.next().map(|s| s.parse::<u64>()) {
        None => 30,
        Some(Ok(s)) => s,
        Some(Err(e)) => {
            log::error!("invalid duration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = match LiveTrackConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut simulator = TrackSimulator::new(&config, track_id);
    simulator.start();

    let mut remaining = Duration::from_secs(seconds);
    while !remaining.is_zero() {
        let step = remaining.min(FRAME);
        let report = simulator.advance(step);
        if report.metrics_steps + report.position_steps > 0 {
            if let Some(leader) = simulator.leader() {
                log::debug!(
                    "leader {} at {}% ({:.1} km/h, {} bpm)",
                    leader.name,
                    leader.completion_pct(),
                    leader.speed_kmh,
                    leader.heart_rate_bpm
                );
            }
        }
        remaining -= step;
    }
    simulator.stop();

    let stats = simulator.stats();
    log::info!(
        "simulated {} ms: {} metrics steps, {} position steps",
        stats.elapsed_ms,
        stats.metrics_ticks,
        stats.position_ticks
    );

    match serde_json::to_string_pretty(&simulator.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("failed to encode snapshot: {e}");
            ExitCode::FAILURE
        }
    }
}
