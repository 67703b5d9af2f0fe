//! Horse detail profile

use serde::{Deserialize, Serialize};

use crate::profile::cache::DeriveProfile;
use crate::profile::{fallback, text};

/// Live horse record as held by the dashboard; any field may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorseRecord {
    pub id: String,
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age: Option<u32>,
    pub sex: Option<String>,
    pub color: Option<String>,
    pub owner: Option<String>,
    pub trainer: Option<String>,
    pub rider: Option<String>,
    pub status: Option<String>,
    pub device: Option<DeviceRecord>,
    pub vitals: Option<VitalsRecord>,
    pub performance: Option<PerformanceRecord>,
    pub location: Option<Location>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceRecord {
    pub serial: Option<String>,
    /// Percent charge
    pub battery: Option<u8>,
    pub signal: Option<String>,
    pub last_sync: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsRecord {
    pub heart_rate: Option<u32>,
    pub temperature_c: Option<f32>,
    pub respiration: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceRecord {
    pub races: Option<u32>,
    pub wins: Option<u32>,
    pub total_distance_km: Option<f32>,
    pub best_speed_kmh: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Flat display record for the horse detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorseProfile {
    pub id: String,
    pub name: String,
    pub breed: String,
    pub age: String,
    pub sex: String,
    pub color: String,
    pub owner: String,
    pub trainer: String,
    pub rider: String,
    pub status: String,
    pub device_serial: String,
    pub battery_pct: u8,
    pub battery: String,
    pub signal: String,
    pub last_sync: String,
    pub heart_rate: String,
    pub heart_rate_zone: String,
    pub temperature: String,
    pub respiration: String,
    pub races: u32,
    pub wins: u32,
    pub win_rate: String,
    pub total_distance: String,
    pub best_speed: String,
    pub coordinates: String,
    pub notes: Vec<String>,
}

fn heart_rate_zone(bpm: Option<u32>) -> &'static str {
    match bpm {
        None => fallback::NO_READING,
        Some(bpm) if bpm < 60 => "Resting",
        Some(bpm) if bpm <= 80 => "Normal",
        Some(_) => "Elevated",
    }
}

impl DeriveProfile for HorseProfile {
    type Source = HorseRecord;

    fn derive(snapshot: HorseRecord) -> Self {
        let device = snapshot.device.unwrap_or_default();
        let vitals = snapshot.vitals.unwrap_or_default();
        let performance = snapshot.performance.unwrap_or_default();

        let races = performance.races.unwrap_or(0);
        let wins = performance.wins.unwrap_or(0).min(races);
        let win_rate = if races == 0 {
            "0%".to_string()
        } else {
            format!("{}%", (wins as f32 / races as f32 * 100.0).round() as u32)
        };

        Self {
            id: snapshot.id,
            name: text(snapshot.name, fallback::UNNAMED_HORSE),
            breed: text(snapshot.breed, fallback::UNKNOWN),
            age: snapshot
                .age
                .map(|a| format!("{} years", a))
                .unwrap_or_else(|| fallback::NOT_AVAILABLE.to_string()),
            sex: text(snapshot.sex, fallback::UNKNOWN),
            color: text(snapshot.color, fallback::UNKNOWN),
            owner: text(snapshot.owner, fallback::UNASSIGNED),
            trainer: text(snapshot.trainer, fallback::UNASSIGNED),
            rider: text(snapshot.rider, fallback::UNASSIGNED),
            status: text(snapshot.status, fallback::STATUS),
            device_serial: text(device.serial, fallback::NOT_AVAILABLE),
            battery_pct: device.battery.unwrap_or(0).min(100),
            battery: device
                .battery
                .map(|b| format!("{}%", b.min(100)))
                .unwrap_or_else(|| fallback::NOT_AVAILABLE.to_string()),
            signal: text(device.signal, fallback::NO_SIGNAL),
            last_sync: text(device.last_sync, fallback::NEVER),
            heart_rate: vitals
                .heart_rate
                .map(|hr| format!("{} bpm", hr))
                .unwrap_or_else(|| fallback::NO_READING.to_string()),
            heart_rate_zone: heart_rate_zone(vitals.heart_rate).to_string(),
            temperature: vitals
                .temperature_c
                .map(|t| format!("{:.1} °C", t))
                .unwrap_or_else(|| fallback::NO_READING.to_string()),
            respiration: vitals
                .respiration
                .map(|r| format!("{} /min", r))
                .unwrap_or_else(|| fallback::NO_READING.to_string()),
            races,
            wins,
            win_rate,
            total_distance: format!("{:.1} km", performance.total_distance_km.unwrap_or(0.0)),
            best_speed: performance
                .best_speed_kmh
                .map(|s| format!("{:.1} km/h", s))
                .unwrap_or_else(|| fallback::NO_READING.to_string()),
            coordinates: snapshot
                .location
                .map(|l| format!("{:.4}, {:.4}", l.lat, l.lng))
                .unwrap_or_else(|| fallback::NO_LOCATION.to_string()),
            notes: snapshot.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_gets_every_fallback() {
        let profile = HorseProfile::derive(HorseRecord {
            id: "h-1".into(),
            ..Default::default()
        });
        assert_eq!(profile.id, "h-1");
        assert_eq!(profile.name, fallback::UNNAMED_HORSE);
        assert_eq!(profile.breed, fallback::UNKNOWN);
        assert_eq!(profile.age, fallback::NOT_AVAILABLE);
        assert_eq!(profile.owner, fallback::UNASSIGNED);
        assert_eq!(profile.status, fallback::STATUS);
        assert_eq!(profile.battery_pct, 0);
        assert_eq!(profile.battery, fallback::NOT_AVAILABLE);
        assert_eq!(profile.signal, fallback::NO_SIGNAL);
        assert_eq!(profile.last_sync, fallback::NEVER);
        assert_eq!(profile.heart_rate, fallback::NO_READING);
        assert_eq!(profile.heart_rate_zone, fallback::NO_READING);
        assert_eq!(profile.win_rate, "0%");
        assert_eq!(profile.total_distance, "0.0 km");
        assert_eq!(profile.coordinates, fallback::NO_LOCATION);
        assert!(profile.notes.is_empty());
    }

    #[test]
    fn populated_record_formats_fields() {
        let json = r#"{
            "id": "h-2",
            "name": "Desert Wind",
            "breed": "Arabian",
            "age": 9,
            "status": "Active",
            "device": { "serial": "TW-0042", "battery": 82, "signal": "Strong" },
            "vitals": { "heart_rate": 84, "temperature_c": 37.84 },
            "performance": { "races": 12, "wins": 3, "total_distance_km": 1480.26 },
            "location": { "lat": 24.45391, "lng": 54.37734 }
        }"#;
        let record: HorseRecord = serde_json::from_str(json).unwrap();
        let profile = HorseProfile::derive(record);
        assert_eq!(profile.name, "Desert Wind");
        assert_eq!(profile.age, "9 years");
        assert_eq!(profile.battery, "82%");
        assert_eq!(profile.battery_pct, 82);
        assert_eq!(profile.heart_rate, "84 bpm");
        assert_eq!(profile.heart_rate_zone, "Elevated");
        assert_eq!(profile.temperature, "37.8 °C");
        assert_eq!(profile.respiration, fallback::NO_READING);
        assert_eq!(profile.win_rate, "25%");
        assert_eq!(profile.total_distance, "1480.3 km");
        assert_eq!(profile.coordinates, "24.4539, 54.3773");
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let profile = HorseProfile::derive(HorseRecord {
            id: "h-3".into(),
            name: Some("   ".into()),
            ..Default::default()
        });
        assert_eq!(profile.name, fallback::UNNAMED_HORSE);
    }

    #[test]
    fn wins_never_exceed_races() {
        let profile = HorseProfile::derive(HorseRecord {
            id: "h-4".into(),
            performance: Some(PerformanceRecord {
                races: Some(2),
                wins: Some(5),
                ..Default::default()
            }),
            ..Default::default()
        });
        assert_eq!(profile.wins, 2);
        assert_eq!(profile.win_rate, "100%");
    }
}
