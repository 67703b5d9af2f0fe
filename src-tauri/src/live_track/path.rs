//! Path - Closed loop geometry that simulated horses follow
//!
//! Points are normalized to the 0-1 range of the track image so the
//! front end can scale them to any canvas size.

use std::f32::consts::TAU;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A point on the track image, both axes normalized to 0-1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Loop color; selects which path a horse follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorGroup {
    Red,
    Blue,
    Green,
}

impl ColorGroup {
    pub const ALL: [ColorGroup; 3] = [ColorGroup::Red, ColorGroup::Blue, ColorGroup::Green];

    pub fn label(self) -> &'static str {
        match self {
            ColorGroup::Red => "red",
            ColorGroup::Blue => "blue",
            ColorGroup::Green => "green",
        }
    }
}

/// Closed, ordered sequence of points. The last point connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPath {
    points: Vec<Point>,
}

impl TrackPath {
    /// Build a path from explicit points. An empty list becomes a single
    /// center point so indexing is always defined.
    pub fn new(points: Vec<Point>) -> Self {
        if points.is_empty() {
            return Self {
                points: vec![Point::new(0.5, 0.5)],
            };
        }
        Self { points }
    }

    /// Sample a wobbly ellipse. `wobble` bends the loop so it reads as a
    /// trail rather than a perfect oval.
    pub fn loop_around(
        center: Point,
        radius: Point,
        samples: usize,
        wobble: f32,
        phase: f32,
    ) -> Self {
        let samples = samples.max(3);
        let points = (0..samples)
            .map(|i| {
                let t = i as f32 / samples as f32 * TAU;
                let bend = 1.0 + wobble * (3.0 * t + phase).sin();
                Point::new(
                    (center.x + radius.x * bend * t.cos()).clamp(0.0, 1.0),
                    (center.y + radius.y * bend * t.sin()).clamp(0.0, 1.0),
                )
            })
            .collect();
        Self { points }
    }

    /// Default loop for a color group
    pub fn for_group(group: ColorGroup) -> Self {
        let (center, radius, samples, wobble, phase) = match group {
            ColorGroup::Red => (Point::new(0.5, 0.5), Point::new(0.38, 0.32), 24, 0.08, 0.0),
            ColorGroup::Blue => (Point::new(0.48, 0.52), Point::new(0.30, 0.26), 20, 0.12, 1.1),
            ColorGroup::Green => (Point::new(0.52, 0.47), Point::new(0.22, 0.18), 16, 0.15, 2.3),
        };
        Self::loop_around(center, radius, samples, wobble, phase)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Index one step further along the loop
    pub fn next_index(&self, index: usize) -> usize {
        (self.clamp_index(index) + 1) % self.len()
    }

    /// Pull an index back into `[0, len)`
    pub fn clamp_index(&self, index: usize) -> usize {
        if index < self.len() {
            index
        } else {
            log::warn!("path index {} out of range for loop of {}, clamping", index, self.len());
            self.len() - 1
        }
    }

    pub fn point_at(&self, index: usize) -> Point {
        self.points[self.clamp_index(index)]
    }
}

/// One shared path per color group
#[derive(Debug, Clone)]
pub struct PathSet {
    red: Arc<TrackPath>,
    blue: Arc<TrackPath>,
    green: Arc<TrackPath>,
}

impl PathSet {
    pub fn new(red: TrackPath, blue: TrackPath, green: TrackPath) -> Self {
        Self {
            red: Arc::new(red),
            blue: Arc::new(blue),
            green: Arc::new(green),
        }
    }

    pub fn get(&self, group: ColorGroup) -> Arc<TrackPath> {
        match group {
            ColorGroup::Red => Arc::clone(&self.red),
            ColorGroup::Blue => Arc::clone(&self.blue),
            ColorGroup::Green => Arc::clone(&self.green),
        }
    }
}

impl Default for PathSet {
    fn default() -> Self {
        Self::new(
            TrackPath::for_group(ColorGroup::Red),
            TrackPath::for_group(ColorGroup::Blue),
            TrackPath::for_group(ColorGroup::Green),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_index_wraps_at_end_of_loop() {
        let path = TrackPath::for_group(ColorGroup::Green);
        assert_eq!(path.next_index(path.len() - 1), 0);
        assert_eq!(path.next_index(0), 1);
    }

    #[test]
    fn out_of_range_index_is_clamped() {
        let path = TrackPath::new(vec![Point::new(0.1, 0.1), Point::new(0.9, 0.9)]);
        assert_eq!(path.clamp_index(7), 1);
        assert_eq!(path.point_at(7), Point::new(0.9, 0.9));
    }

    #[test]
    fn default_loops_stay_normalized() {
        for group in ColorGroup::ALL {
            let path = TrackPath::for_group(group);
            let normalized = |v: f32| (0.0..=1.0).contains(&v);
            assert!(path.points().iter().all(|p| normalized(p.x) && normalized(p.y)));
        }
    }

    #[test]
    fn empty_path_falls_back_to_center() {
        let path = TrackPath::new(Vec::new());
        assert_eq!(path.len(), 1);
        assert_eq!(path.point_at(0), Point::new(0.5, 0.5));
    }

    #[test]
    fn path_set_shares_one_loop_per_group() {
        let set = PathSet::default();
        assert!(Arc::ptr_eq(&set.get(ColorGroup::Blue), &set.get(ColorGroup::Blue)));
        assert!(!Arc::ptr_eq(&set.get(ColorGroup::Blue), &set.get(ColorGroup::Red)));
    }
}
