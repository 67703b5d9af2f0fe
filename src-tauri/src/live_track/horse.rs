//! Horse - Individual simulated horse state and behavior
//!
//! Each horse has a cursor into its loop plus live speed and heart rate.
//! The simulator applies the position and metrics steps to every horse.

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{HeartRateRange, HorseSeed, SpeedRange};
use crate::live_track::path::{ColorGroup, Point, TrackPath};

/// Gait band derived from current speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gait {
    Walk,
    Trot,
    Canter,
}

impl Gait {
    /// Upper bound (exclusive) of the walk band, km/h
    pub const WALK_BELOW: f32 = 8.0;
    /// Upper bound (exclusive) of the trot band, km/h
    pub const TROT_BELOW: f32 = 20.0;

    pub fn from_speed(speed_kmh: f32) -> Self {
        if speed_kmh < Self::WALK_BELOW {
            Gait::Walk
        } else if speed_kmh < Self::TROT_BELOW {
            Gait::Trot
        } else {
            Gait::Canter
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gait::Walk => "Walk",
            Gait::Trot => "Trot",
            Gait::Canter => "Canter",
        }
    }
}

/// Complete state for a single tracked horse
#[derive(Debug, Clone)]
pub struct HorseState {
    /// Unique horse ID
    pub id: u32,
    pub name: String,
    pub rider_name: String,
    pub color_group: ColorGroup,
    /// Loop shared with the other horses of the same color
    path: Arc<TrackPath>,
    /// Index restored on reset
    start_index: usize,
    /// Cursor into the loop
    path_index: usize,
    /// Current speed (km/h)
    pub speed_kmh: f32,
    /// Current heart rate (bpm)
    pub heart_rate_bpm: u32,
}

impl HorseState {
    /// Create a horse at its starting offset with sampled metrics
    pub fn new<R: Rng + ?Sized>(
        seed: &HorseSeed,
        path: Arc<TrackPath>,
        speed: &SpeedRange,
        heart_rate: &HeartRateRange,
        rng: &mut R,
    ) -> Self {
        let start_index = seed.start.resolve(path.len());
        Self {
            id: seed.id,
            name: seed.name.clone(),
            rider_name: seed.rider_name.clone(),
            color_group: seed.color_group,
            path,
            start_index,
            path_index: start_index,
            speed_kmh: sample_speed(speed, rng),
            heart_rate_bpm: sample_heart_rate(heart_rate, rng),
        }
    }

    /// Return to the starting offset and draw fresh metrics
    pub fn reset<R: Rng + ?Sized>(
        &mut self,
        speed: &SpeedRange,
        heart_rate: &HeartRateRange,
        rng: &mut R,
    ) {
        self.path_index = self.start_index;
        self.speed_kmh = sample_speed(speed, rng);
        self.heart_rate_bpm = sample_heart_rate(heart_rate, rng);
    }

    pub fn path(&self) -> &Arc<TrackPath> {
        &self.path
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Cursor, clamped into the loop
    pub fn path_index(&self) -> usize {
        self.path.clamp_index(self.path_index)
    }

    pub fn position(&self) -> Point {
        self.path.point_at(self.path_index)
    }

    pub fn gait(&self) -> Gait {
        Gait::from_speed(self.speed_kmh)
    }

    /// Share of the loop covered, rounded to a whole percent
    pub fn completion_pct(&self) -> u32 {
        (self.path_index() as f32 / self.path.len() as f32 * 100.0).round() as u32
    }
}

fn sample_speed<R: Rng + ?Sized>(range: &SpeedRange, rng: &mut R) -> f32 {
    rng.gen_range(range.initial_min..=range.initial_max)
}

fn sample_heart_rate<R: Rng + ?Sized>(range: &HeartRateRange, rng: &mut R) -> u32 {
    rng.gen_range(range.initial_min..=range.initial_max)
}

/// Horse simulation logic
pub struct Horse;

impl Horse {
    /// Move one point along the loop
    pub fn advance_position(state: &mut HorseState) {
        state.path_index = state.path.next_index(state.path_index);
    }

    /// Nudge speed and heart rate by a visible amount, staying in bounds
    pub fn perturb_metrics<R: Rng + ?Sized>(
        state: &mut HorseState,
        speed: &SpeedRange,
        heart_rate: &HeartRateRange,
        rng: &mut R,
    ) {
        let magnitude = rng.gen_range(speed.step_min..=speed.step_max);
        let delta = if rng.gen_bool(0.5) { magnitude } else { -magnitude };
        let mut next = state.speed_kmh + delta;
        // Bounce off the bound instead of sticking to it
        if next < speed.min || next > speed.max {
            next = state.speed_kmh - delta;
        }
        state.speed_kmh = next.clamp(speed.min, speed.max);

        let magnitude = rng.gen_range(heart_rate.step_min..=heart_rate.step_max) as i64;
        let delta = if rng.gen_bool(0.5) { magnitude } else { -magnitude };
        let (min, max) = (heart_rate.min as i64, heart_rate.max as i64);
        let current = state.heart_rate_bpm as i64;
        let mut next = current + delta;
        if next < min || next > max {
            next = current - delta;
        }
        state.heart_rate_bpm = next.clamp(min, max) as u32;
    }
}

/// Read-only horse state for the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorseView {
    pub id: u32,
    pub name: String,
    pub rider_name: String,
    pub color_group: ColorGroup,
    pub speed_kmh: f32,
    pub heart_rate_bpm: u32,
    pub gait: Gait,
    pub gait_label: String,
    pub completion_pct: u32,
    pub position: Point,
}

impl From<&HorseState> for HorseView {
    fn from(state: &HorseState) -> Self {
        // Band the speed the view shows, not the raw reading
        let speed_kmh = (state.speed_kmh * 10.0).round() / 10.0;
        let gait = Gait::from_speed(speed_kmh);
        Self {
            id: state.id,
            name: state.name.clone(),
            rider_name: state.rider_name.clone(),
            color_group: state.color_group,
            speed_kmh,
            heart_rate_bpm: state.heart_rate_bpm,
            gait,
            gait_label: gait.label().to_string(),
            completion_pct: state.completion_pct(),
            position: state.position(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StartOffset;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seed(start: StartOffset) -> HorseSeed {
        HorseSeed {
            id: 7,
            name: "Desert Wind".into(),
            rider_name: "Amira Haddad".into(),
            color_group: ColorGroup::Red,
            start,
        }
    }

    fn horse(start: StartOffset, rng: &mut StdRng) -> HorseState {
        let path = Arc::new(TrackPath::for_group(ColorGroup::Red));
        HorseState::new(
            &seed(start),
            path,
            &SpeedRange::default(),
            &HeartRateRange::default(),
            rng,
        )
    }

    #[test]
    fn gait_bands_cover_clamp_range_without_gaps() {
        let range = SpeedRange::default();
        let mut speed = range.min;
        while speed <= range.max {
            let gait = Gait::from_speed(speed);
            let bands = [
                speed < Gait::WALK_BELOW,
                (Gait::WALK_BELOW..Gait::TROT_BELOW).contains(&speed),
                speed >= Gait::TROT_BELOW,
            ];
            assert_eq!(bands.iter().filter(|b| **b).count(), 1, "speed {speed}");
            let band = bands.iter().position(|b| *b).unwrap();
            let expected = [Gait::Walk, Gait::Trot, Gait::Canter][band];
            assert_eq!(gait, expected);
            speed += 0.05;
        }
    }

    #[test]
    fn gait_band_edges() {
        assert_eq!(Gait::from_speed(7.99), Gait::Walk);
        assert_eq!(Gait::from_speed(8.0), Gait::Trot);
        assert_eq!(Gait::from_speed(19.999), Gait::Trot);
        assert_eq!(Gait::from_speed(20.0), Gait::Canter);
        assert_eq!(Gait::from_speed(0.0).label(), "Walk");
    }

    #[test]
    fn new_horse_starts_at_resolved_offset() {
        let mut rng = StdRng::seed_from_u64(1);
        let h = horse(StartOffset::Midpoint, &mut rng);
        assert_eq!(h.path_index(), h.path().len() / 2);
        assert_eq!(h.start_index(), h.path().len() / 2);
    }

    #[test]
    fn completion_rounds_share_of_loop() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut h = horse(StartOffset::Start, &mut rng);
        assert_eq!(h.completion_pct(), 0);
        for _ in 0..6 {
            Horse::advance_position(&mut h);
        }
        // 6 / 24
        assert_eq!(h.completion_pct(), 25);
    }

    #[test]
    fn out_of_range_cursor_is_clamped_on_read() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut h = horse(StartOffset::Start, &mut rng);
        h.path_index = 500;
        assert_eq!(h.path_index(), h.path().len() - 1);
        Horse::advance_position(&mut h);
        assert_eq!(h.path_index(), 0);
    }

    #[test]
    fn perturb_always_moves_metrics_even_at_bounds() {
        let mut rng = StdRng::seed_from_u64(4);
        let speed = SpeedRange::default();
        let hr = HeartRateRange::default();
        let mut h = horse(StartOffset::Start, &mut rng);
        for (s, bpm) in [(speed.max, hr.max), (speed.min, hr.min)] {
            for _ in 0..50 {
                h.speed_kmh = s;
                h.heart_rate_bpm = bpm;
                Horse::perturb_metrics(&mut h, &speed, &hr, &mut rng);
                assert_ne!(h.speed_kmh, s);
                assert_ne!(h.heart_rate_bpm, bpm);
                assert!((speed.min..=speed.max).contains(&h.speed_kmh));
                assert!((hr.min..=hr.max).contains(&h.heart_rate_bpm));
            }
        }
    }

    #[test]
    fn view_reports_derived_fields() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut h = horse(StartOffset::Start, &mut rng);
        h.speed_kmh = 21.36;
        let view = HorseView::from(&h);
        assert_eq!(view.gait, Gait::Canter);
        assert_eq!(view.gait_label, "Canter");
        assert!((view.speed_kmh - 21.4).abs() < 1e-4);
        assert_eq!(view.position, h.path().point_at(0));
    }

    #[test]
    fn view_gait_matches_shown_speed() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut h = horse(StartOffset::Start, &mut rng);
        h.speed_kmh = 19.96;
        let view = HorseView::from(&h);
        assert!((view.speed_kmh - 20.0).abs() < 1e-4);
        assert_eq!(view.gait, Gait::from_speed(view.speed_kmh));
        assert_eq!(view.gait, Gait::Canter);
        assert_eq!(view.gait_label, "Canter");

        h.speed_kmh = 19.94;
        let view = HorseView::from(&h);
        assert_eq!(view.gait, Gait::Trot);
    }
}
