//! Simulation - Live-track simulator and its tick coordinator
//!
//! Owns the roster and two interval timers (metrics and position). All
//! time flows through `advance`, which fires due steps in chronological
//! order and applies each to the whole roster before returning.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::{LiveTrackConfig, SimulatorConfig};
use crate::live_track::catalog;
use crate::live_track::clock::IntervalTimer;
use crate::live_track::horse::{HorseState, HorseView};
use crate::live_track::path::PathSet;
use crate::live_track::roster::Roster;

/// Tracking state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulatorState {
    Stopped,
    Running,
    Paused,
}

/// Simulator statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorStats {
    pub state: SimulatorState,
    pub horse_count: u32,
    pub metrics_ticks: u64,
    pub position_ticks: u64,
    pub elapsed_ms: u64,
    pub avg_tick_time_ms: f32,
}

/// Compact track state for IPC transfer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSnapshot {
    pub state: SimulatorState,
    pub elapsed_ms: u64,
    pub track_id: String,
    pub track_image: String,
    pub horses: Vec<HorseView>,
}

/// Steps applied by one `advance` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    pub metrics_steps: u32,
    pub position_steps: u32,
}

pub struct TrackSimulator {
    state: SimulatorState,
    config: SimulatorConfig,
    roster: Roster,
    track_id: String,
    track_image: &'static str,
    metrics_timer: IntervalTimer,
    position_timer: IntervalTimer,
    rng: StdRng,
    /// Simulated time spent running since the last reset
    elapsed: Duration,
    /// Wall-clock reference for `tick`
    last_tick: Instant,
    /// Recent tick durations for averaging
    tick_times: Vec<f32>,
}

impl TrackSimulator {
    const TICK_HISTORY: usize = 60;

    /// Build the roster with the default color-group loops
    pub fn new(config: &LiveTrackConfig, track_id: impl Into<String>) -> Self {
        Self::with_paths(config, PathSet::default(), track_id)
    }

    pub fn with_paths(
        config: &LiveTrackConfig,
        paths: PathSet,
        track_id: impl Into<String>,
    ) -> Self {
        let sim = config.simulator.clone();
        let mut rng = match sim.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let roster = Roster::build(&config.roster, &paths, sim.speed, sim.heart_rate, &mut rng);
        let track_id = track_id.into();
        let track_image = catalog::image_for(&track_id);
        log::info!("Live track {:?} ready with {} horses", track_id, roster.len());

        Self {
            state: SimulatorState::Stopped,
            metrics_timer: IntervalTimer::new(sim.metrics_period()),
            position_timer: IntervalTimer::new(sim.position_period()),
            config: sim,
            roster,
            track_id,
            track_image,
            rng,
            elapsed: Duration::ZERO,
            last_tick: Instant::now(),
            tick_times: Vec::with_capacity(Self::TICK_HISTORY),
        }
    }

    /// Begin both periodic steps from a fresh phase
    pub fn start(&mut self) {
        if self.state != SimulatorState::Stopped {
            log::debug!("start ignored while {:?}", self.state);
            return;
        }
        self.metrics_timer.cancel();
        self.position_timer.cancel();
        self.state = SimulatorState::Running;
        self.last_tick = Instant::now();
        log::info!("Tracking started on {:?}", self.track_id);
    }

    pub fn pause(&mut self) {
        if self.state != SimulatorState::Running {
            log::debug!("pause ignored while {:?}", self.state);
            return;
        }
        self.state = SimulatorState::Paused;
        log::info!("Tracking paused");
    }

    pub fn resume(&mut self) {
        if self.state != SimulatorState::Paused {
            log::debug!("resume ignored while {:?}", self.state);
            return;
        }
        self.state = SimulatorState::Running;
        self.last_tick = Instant::now();
        log::info!("Tracking resumed");
    }

    /// Cancel both timers, keeping horse state as it is
    pub fn stop(&mut self) {
        self.metrics_timer.cancel();
        self.position_timer.cancel();
        self.state = SimulatorState::Stopped;
        log::info!("Tracking stopped");
    }

    /// Stop and put every horse back at its starting offset with fresh metrics
    pub fn reset(&mut self) {
        self.stop();
        self.metrics_timer.restart();
        self.position_timer.restart();
        self.roster.reset(&mut self.rng);
        self.elapsed = Duration::ZERO;
        self.tick_times.clear();
        log::info!("Tracking reset");
    }

    /// Feed simulated time to the timers. Does nothing unless running.
    pub fn advance(&mut self, dt: Duration) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        if self.state != SimulatorState::Running {
            return report;
        }
        self.elapsed += dt;

        let mut remaining = dt;
        loop {
            let next = self.metrics_timer.until_due().min(self.position_timer.until_due());
            if next > remaining {
                self.metrics_timer.elapse(remaining);
                self.position_timer.elapse(remaining);
                break;
            }
            self.metrics_timer.elapse(next);
            self.position_timer.elapse(next);
            remaining -= next;

            if self.metrics_timer.fire() {
                self.roster.metrics_step(&mut self.rng);
                report.metrics_steps += 1;
            }
            if self.position_timer.fire() {
                self.roster.position_step();
                report.position_steps += 1;
            }
        }
        report
    }

    /// Advance by wall-clock time since the previous tick and return the current state
    pub fn tick(&mut self) -> TrackSnapshot {
        if self.state == SimulatorState::Running {
            let now = Instant::now();
            let delta = now.duration_since(self.last_tick);
            self.last_tick = now;

            let tick_start = Instant::now();
            self.advance(delta);

            let tick_time = tick_start.elapsed().as_secs_f32() * 1000.0;
            self.tick_times.push(tick_time);
            if self.tick_times.len() > Self::TICK_HISTORY {
                self.tick_times.remove(0);
            }
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> TrackSnapshot {
        TrackSnapshot {
            state: self.state,
            elapsed_ms: self.elapsed.as_millis() as u64,
            track_id: self.track_id.clone(),
            track_image: self.track_image.to_string(),
            horses: self.roster.views(),
        }
    }

    pub fn stats(&self) -> SimulatorStats {
        let avg_tick_time = if self.tick_times.is_empty() {
            0.0
        } else {
            self.tick_times.iter().sum::<f32>() / self.tick_times.len() as f32
        };

        SimulatorStats {
            state: self.state,
            horse_count: self.roster.len() as u32,
            metrics_ticks: self.metrics_timer.fired(),
            position_ticks: self.position_timer.fired(),
            elapsed_ms: self.elapsed.as_millis() as u64,
            avg_tick_time_ms: avg_tick_time,
        }
    }

    pub fn state(&self) -> SimulatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimulatorState::Running
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn horse(&self, id: u32) -> Option<&HorseState> {
        self.roster.get(id)
    }

    pub fn leader(&self) -> Option<&HorseState> {
        self.roster.leader()
    }

    pub fn track_id(&self) -> &str {
        &self.track_id
    }

    pub fn track_image(&self) -> &'static str {
        self.track_image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulator(seed: u64) -> TrackSimulator {
        let mut config = LiveTrackConfig::default();
        config.simulator.seed = Some(seed);
        TrackSimulator::new(&config, "al-wathba")
    }

    fn indices(sim: &TrackSimulator) -> Vec<usize> {
        sim.roster().horses().iter().map(|h| h.path_index()).collect()
    }

    #[test]
    fn state_machine_transitions() {
        let mut sim = simulator(1);
        assert_eq!(sim.state(), SimulatorState::Stopped);
        sim.pause();
        assert_eq!(sim.state(), SimulatorState::Stopped);
        sim.resume();
        assert_eq!(sim.state(), SimulatorState::Stopped);
        sim.start();
        assert_eq!(sim.state(), SimulatorState::Running);
        sim.start();
        assert_eq!(sim.state(), SimulatorState::Running);
        sim.pause();
        assert_eq!(sim.state(), SimulatorState::Paused);
        sim.start();
        assert_eq!(sim.state(), SimulatorState::Paused);
        sim.resume();
        assert_eq!(sim.state(), SimulatorState::Running);
        sim.reset();
        assert_eq!(sim.state(), SimulatorState::Stopped);
    }

    #[test]
    fn stopped_simulator_ignores_time() {
        let mut sim = simulator(2);
        let before = indices(&sim);
        let report = sim.advance(Duration::from_secs(60));
        assert_eq!(report, AdvanceReport::default());
        assert_eq!(indices(&sim), before);
    }

    #[test]
    fn cadences_are_independent() {
        let mut sim = simulator(3);
        sim.start();
        let report = sim.advance(Duration::from_secs(6));
        assert_eq!(report.metrics_steps, 3);
        assert_eq!(report.position_steps, 2);
        let report = sim.advance(Duration::from_millis(5999));
        assert_eq!(report.metrics_steps, 2);
        assert_eq!(report.position_steps, 1);
    }

    #[test]
    fn small_slices_accumulate_to_a_tick() {
        let mut sim = simulator(4);
        sim.start();
        let before = indices(&sim);
        for _ in 0..29 {
            sim.advance(Duration::from_millis(100));
        }
        assert_eq!(indices(&sim), before);
        let report = sim.advance(Duration::from_millis(100));
        assert_eq!(report.position_steps, 1);
        assert_ne!(indices(&sim), before);
    }

    #[test]
    fn pause_keeps_state_and_timer_phase() {
        let mut sim = simulator(5);
        sim.start();
        sim.advance(Duration::from_millis(2500));
        let before = indices(&sim);
        let speeds: Vec<_> = sim.roster().horses().iter().map(|h| h.speed_kmh).collect();
        sim.pause();
        sim.advance(Duration::from_secs(30));
        assert_eq!(indices(&sim), before);
        let after: Vec<_> = sim.roster().horses().iter().map(|h| h.speed_kmh).collect();
        assert_eq!(speeds, after);
        sim.resume();
        // 500ms left on the position timer from before the pause
        let report = sim.advance(Duration::from_millis(500));
        assert_eq!(report.position_steps, 1);
    }

    #[test]
    fn stop_cancels_timers_but_keeps_positions() {
        let mut sim = simulator(6);
        sim.start();
        sim.advance(Duration::from_secs(3));
        let moved = indices(&sim);
        sim.stop();
        sim.advance(Duration::from_secs(120));
        assert_eq!(indices(&sim), moved);
        assert_eq!(sim.stats().position_ticks, 1);
    }

    #[test]
    fn snapshot_carries_track_image() {
        let sim = simulator(7);
        let snapshot = sim.snapshot();
        assert_eq!(snapshot.track_image, "/images/tracks/al-wathba.jpg");
        assert_eq!(snapshot.horses.len(), 6);

        let config = LiveTrackConfig::default();
        let unknown = TrackSimulator::new(&config, "mystery-trail");
        assert_eq!(unknown.snapshot().track_image, catalog::PLACEHOLDER_IMAGE);
    }

    #[test]
    fn tick_while_paused_only_reads() {
        let mut sim = simulator(8);
        sim.start();
        sim.pause();
        let snapshot = sim.tick();
        assert_eq!(snapshot.state, SimulatorState::Paused);
        assert_eq!(sim.stats().avg_tick_time_ms, 0.0);
    }
}
