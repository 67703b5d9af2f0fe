//! Live Track Module
//!
//! Simulated horses moving round closed loops with live speed and heart rate.
//! The dashboard polls snapshots through the desktop commands.

pub mod catalog;
pub mod clock;
pub mod horse;
pub mod path;
pub mod roster;
pub mod simulation;

pub use horse::{Gait, HorseState, HorseView};
pub use path::{ColorGroup, PathSet, Point, TrackPath};
pub use roster::Roster;
pub use simulation::{AdvanceReport, SimulatorState, SimulatorStats, TrackSimulator, TrackSnapshot};
