//! Configuration for the live-track simulator.
//!
//! Loaded from `live_track.json` with support for an environment variable override.

use std::{
    collections::HashSet,
    env, fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::live_track::path::ColorGroup;

pub const BUILTIN_LIVE_TRACK_CONFIG: &str = include_str!("data/live_track.json");

/// Environment variable pointing at a replacement config file
pub const CONFIG_PATH_ENV: &str = "TRAILWATCH_TRACK_CONFIG";

/// Root configuration: simulator tuning plus the roster to track.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveTrackConfig {
    pub simulator: SimulatorConfig,
    pub roster: RosterConfig,
}

impl LiveTrackConfig {
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json_str(BUILTIN_LIVE_TRACK_CONFIG)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Load from `TRAILWATCH_TRACK_CONFIG` if set, otherwise the builtin config.
    pub fn load() -> Result<Self, ConfigError> {
        match env::var_os(CONFIG_PATH_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                log::info!("loading live-track config from {:?}", path);
                Self::from_file(&path)
            }
            None => Self::builtin(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulator.validate()?;
        self.roster.validate()
    }
}

/// Tick periods and metric bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Period of the speed/heart-rate perturbation step
    pub metrics_period_ms: u64,
    /// Period of the path advance step
    pub position_period_ms: u64,
    pub speed: SpeedRange,
    pub heart_rate: HeartRateRange,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            metrics_period_ms: 2000,
            position_period_ms: 3000,
            speed: SpeedRange::default(),
            heart_rate: HeartRateRange::default(),
            seed: None,
        }
    }
}

impl SimulatorConfig {
    pub fn metrics_period(&self) -> Duration {
        Duration::from_millis(self.metrics_period_ms)
    }

    pub fn position_period(&self) -> Duration {
        Duration::from_millis(self.position_period_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.metrics_period_ms == 0 || self.position_period_ms == 0 {
            return Err(ConfigError::Invalid("tick periods must be non-zero".into()));
        }
        self.speed.validate()?;
        self.heart_rate.validate()
    }
}

/// Speed bounds in km/h
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
    pub initial_min: f32,
    pub initial_max: f32,
    /// Smallest per-tick change
    pub step_min: f32,
    /// Largest per-tick change
    pub step_max: f32,
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self {
            min: 12.0,
            max: 28.0,
            initial_min: 15.0,
            initial_max: 25.0,
            step_min: 0.5,
            step_max: 2.5,
        }
    }
}

impl SpeedRange {
    fn validate(&self) -> Result<(), ConfigError> {
        let ordered = self.min < self.max
            && self.min <= self.initial_min
            && self.initial_min <= self.initial_max
            && self.initial_max <= self.max;
        if !ordered {
            return Err(ConfigError::Invalid(format!(
                "speed range {}..{} must contain initial range {}..{}",
                self.min, self.max, self.initial_min, self.initial_max
            )));
        }
        let steps_fit = self.step_min > 0.0
            && self.step_min <= self.step_max
            && self.step_max <= self.max - self.min;
        if !steps_fit {
            return Err(ConfigError::Invalid(format!(
                "speed step {}..{} must be positive and fit inside the clamp range",
                self.step_min, self.step_max
            )));
        }
        Ok(())
    }
}

/// Heart rate bounds in bpm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartRateRange {
    pub min: u32,
    pub max: u32,
    pub initial_min: u32,
    pub initial_max: u32,
    pub step_min: u32,
    pub step_max: u32,
}

impl Default for HeartRateRange {
    fn default() -> Self {
        Self {
            min: 55,
            max: 85,
            initial_min: 60,
            initial_max: 80,
            step_min: 1,
            step_max: 4,
        }
    }
}

impl HeartRateRange {
    fn validate(&self) -> Result<(), ConfigError> {
        let ordered = self.min < self.max
            && self.min <= self.initial_min
            && self.initial_min <= self.initial_max
            && self.initial_max <= self.max;
        if !ordered {
            return Err(ConfigError::Invalid(format!(
                "heart rate range {}..{} must contain initial range {}..{}",
                self.min, self.max, self.initial_min, self.initial_max
            )));
        }
        let steps_fit = self.step_min > 0
            && self.step_min <= self.step_max
            && self.step_max <= self.max - self.min;
        if !steps_fit {
            return Err(ConfigError::Invalid(format!(
                "heart rate step {}..{} must be positive and fit inside the clamp range",
                self.step_min, self.step_max
            )));
        }
        Ok(())
    }
}

/// Where on its loop a horse begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartOffset {
    Start,
    /// `floor(len / 2)`
    Midpoint,
    Index(usize),
}

impl StartOffset {
    /// Resolve against a path length, wrapping explicit indices.
    pub fn resolve(self, path_len: usize) -> usize {
        let len = path_len.max(1);
        match self {
            StartOffset::Start => 0,
            StartOffset::Midpoint => len / 2,
            StartOffset::Index(i) => i % len,
        }
    }
}

/// Descriptor for one tracked horse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorseSeed {
    pub id: u32,
    pub name: String,
    pub rider_name: String,
    pub color_group: ColorGroup,
    #[serde(default = "default_start")]
    pub start: StartOffset,
}

fn default_start() -> StartOffset {
    StartOffset::Start
}

/// Fixed roster built once per track view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub horses: Vec<HorseSeed>,
}

impl Default for RosterConfig {
    /// Two horses per color group, the second of each pair starting halfway round.
    fn default() -> Self {
        let names = [
            ("Desert Wind", "Amira Haddad"),
            ("Silver Comet", "Lucas Moreau"),
            ("Blue Mirage", "Sara Nilsson"),
            ("Night Falcon", "Omar Saleh"),
            ("Green Valley", "Emma Clarke"),
            ("Sand Dancer", "Yousef Karim"),
        ];
        let horses = names
            .iter()
            .enumerate()
            .map(|(i, (name, rider))| HorseSeed {
                id: i as u32 + 1,
                name: name.to_string(),
                rider_name: rider.to_string(),
                color_group: ColorGroup::ALL[i / 2],
                start: if i % 2 == 0 { StartOffset::Start } else { StartOffset::Midpoint },
            })
            .collect();
        Self { horses }
    }
}

impl RosterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horses.is_empty() {
            return Err(ConfigError::Invalid("roster must contain at least one horse".into()));
        }
        let mut seen = HashSet::new();
        for horse in &self.horses {
            if !seen.insert(horse.id) {
                return Err(ConfigError::Invalid(format!("duplicate horse id {}", horse.id)));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse live-track config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read live-track config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid live-track config: {0}")]
    Invalid(String),
}
