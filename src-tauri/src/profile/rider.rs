//! Rider detail profile

use serde::{Deserialize, Serialize};

use crate::profile::cache::DeriveProfile;
use crate::profile::{fallback, text};

/// Live rider record as held by the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiderRecord {
    pub id: String,
    pub name: Option<String>,
    pub nationality: Option<String>,
    pub age: Option<u32>,
    /// FEI star level, e.g. "CEI3*"
    pub level: Option<String>,
    pub club: Option<String>,
    pub license: Option<String>,
    pub horses: Vec<String>,
    pub stats: Option<RiderStats>,
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiderStats {
    pub rides: Option<u32>,
    pub completions: Option<u32>,
    pub total_distance_km: Option<f32>,
    pub best_placing: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Flat display record for the rider detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderProfile {
    pub id: String,
    pub name: String,
    pub nationality: String,
    pub age: String,
    pub level: String,
    pub club: String,
    pub license: String,
    pub horses: String,
    pub horse_count: usize,
    pub rides: u32,
    pub completions: u32,
    pub completion_rate: String,
    pub total_distance: String,
    pub best_placing: String,
    pub email: String,
    pub phone: String,
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

impl DeriveProfile for RiderProfile {
    type Source = RiderRecord;

    fn derive(snapshot: RiderRecord) -> Self {
        let stats = snapshot.stats.unwrap_or_default();
        let contact = snapshot.contact.unwrap_or_default();

        let rides = stats.rides.unwrap_or(0);
        let completions = stats.completions.unwrap_or(0).min(rides);
        let completion_rate = if rides == 0 {
            fallback::NOT_AVAILABLE.to_string()
        } else {
            format!("{}%", (completions as f32 / rides as f32 * 100.0).round() as u32)
        };
        let horses: Vec<String> = snapshot
            .horses
            .into_iter()
            .filter(|h| !h.trim().is_empty())
            .collect();

        Self {
            id: snapshot.id,
            name: text(snapshot.name, fallback::UNNAMED_RIDER),
            nationality: text(snapshot.nationality, fallback::UNKNOWN),
            age: snapshot
                .age
                .map(|a| format!("{} years", a))
                .unwrap_or_else(|| fallback::NOT_AVAILABLE.to_string()),
            level: text(snapshot.level, fallback::UNRATED),
            club: text(snapshot.club, fallback::INDEPENDENT),
            license: text(snapshot.license, fallback::NOT_AVAILABLE),
            horse_count: horses.len(),
            horses: if horses.is_empty() {
                fallback::NO_HORSES.to_string()
            } else {
                horses.join(", ")
            },
            rides,
            completions,
            completion_rate,
            total_distance: format!("{:.1} km", stats.total_distance_km.unwrap_or(0.0)),
            best_placing: stats
                .best_placing
                .filter(|p| *p > 0)
                .map(ordinal)
                .unwrap_or_else(|| fallback::NOT_AVAILABLE.to_string()),
            email: text(contact.email, fallback::NOT_AVAILABLE),
            phone: text(contact.phone, fallback::NOT_AVAILABLE),
        }
    }
}
