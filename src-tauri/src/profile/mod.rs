//! Profile Module
//!
//! Horse and rider detail views. Each view freezes the live record the
//! first time an id is opened and serves that frozen profile from then on.

pub mod cache;
pub mod horse;
pub mod rider;

pub use cache::{DeriveProfile, ProfileModal, ProfileSection, SnapshotCache};
pub use horse::{HorseProfile, HorseRecord};
pub use rider::{RiderProfile, RiderRecord};

/// Field value, or `fallback` when missing or blank
pub(crate) fn text(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Display values for fields missing from the source record
pub mod fallback {
    pub const UNKNOWN: &str = "Unknown";
    pub const NOT_AVAILABLE: &str = "N/A";
    /// Missing sensor reading
    pub const NO_READING: &str = "--";
    pub const UNNAMED_HORSE: &str = "Unnamed horse";
    pub const UNNAMED_RIDER: &str = "Unnamed rider";
    pub const UNASSIGNED: &str = "Unassigned";
    pub const STATUS: &str = "Inactive";
    pub const NO_SIGNAL: &str = "No signal";
    pub const NEVER: &str = "Never";
    pub const NO_LOCATION: &str = "Location unavailable";
    pub const UNRATED: &str = "Unrated";
    pub const INDEPENDENT: &str = "Independent";
    pub const NO_HORSES: &str = "None assigned";
}
