//! Roster - The fixed set of horses on a live track
//!
//! Built once from the roster descriptor. Each step is applied to every
//! horse before control returns to a reader.

use rand::Rng;

use crate::config::{HeartRateRange, RosterConfig, SpeedRange};
use crate::live_track::horse::{Horse, HorseState, HorseView};
use crate::live_track::path::PathSet;

#[derive(Debug, Clone)]
pub struct Roster {
    horses: Vec<HorseState>,
    speed: SpeedRange,
    heart_rate: HeartRateRange,
}

impl Roster {
    /// Create one horse per seed, bound to its color group's shared path
    pub fn build<R: Rng + ?Sized>(
        config: &RosterConfig,
        paths: &PathSet,
        speed: SpeedRange,
        heart_rate: HeartRateRange,
        rng: &mut R,
    ) -> Self {
        let horses = config
            .horses
            .iter()
            .map(|seed| {
                let path = paths.get(seed.color_group);
                HorseState::new(seed, path, &speed, &heart_rate, rng)
            })
            .collect();
        Self {
            horses,
            speed,
            heart_rate,
        }
    }

    pub fn horses(&self) -> &[HorseState] {
        &self.horses
    }

    pub fn len(&self) -> usize {
        self.horses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.horses.is_empty()
    }

    /// Get horse by ID
    pub fn get(&self, id: u32) -> Option<&HorseState> {
        self.horses.iter().find(|h| h.id == id)
    }

    pub fn metrics_step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for horse in &mut self.horses {
            Horse::perturb_metrics(horse, &self.speed, &self.heart_rate, rng);
        }
    }

    pub fn position_step(&mut self) {
        for horse in &mut self.horses {
            Horse::advance_position(horse);
        }
    }

    /// Starting offsets back, metrics resampled
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for horse in &mut self.horses {
            horse.reset(&self.speed, &self.heart_rate, rng);
        }
    }

    pub fn views(&self) -> Vec<HorseView> {
        self.horses.iter().map(HorseView::from).collect()
    }

    /// Horse furthest round its loop; ties go to the faster horse
    pub fn leader(&self) -> Option<&HorseState> {
        self.horses.iter().max_by(|a, b| {
            a.completion_pct()
                .cmp(&b.completion_pct())
                .then(a.speed_kmh.total_cmp(&b.speed_kmh))
        })
    }
}
