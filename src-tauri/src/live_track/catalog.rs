//! Catalog - Known endurance venues and their track imagery

use serde::Serialize;

/// Image shown when a track id is not in the catalog
pub const PLACEHOLDER_IMAGE: &str = "/images/tracks/placeholder.jpg";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub location: &'static str,
    pub distance_km: f32,
    pub image: &'static str,
}

const TRACKS: &[TrackInfo] = &[
    TrackInfo {
        id: "al-wathba",
        name: "Al Wathba Endurance Village",
        location: "Abu Dhabi, UAE",
        distance_km: 120.0,
        image: "/images/tracks/al-wathba.jpg",
    },
    TrackInfo {
        id: "bou-thib",
        name: "Bou Thib Endurance Village",
        location: "Al Khatim, UAE",
        distance_km: 160.0,
        image: "/images/tracks/bou-thib.jpg",
    },
    TrackInfo {
        id: "fontainebleau",
        name: "Grand Parquet",
        location: "Fontainebleau, France",
        distance_km: 90.0,
        image: "/images/tracks/fontainebleau.jpg",
    },
    TrackInfo {
        id: "florac",
        name: "Florac Causses",
        location: "Lozère, France",
        distance_km: 160.0,
        image: "/images/tracks/florac.jpg",
    },
];

pub fn all() -> &'static [TrackInfo] {
    TRACKS
}

pub fn lookup(id: &str) -> Option<&'static TrackInfo> {
    TRACKS.iter().find(|t| t.id == id)
}

/// Track image, or the placeholder for unknown ids
pub fn image_for(id: &str) -> &'static str {
    match lookup(id) {
        Some(track) => track.image,
        None => {
            log::warn!("unknown track id {:?}, using placeholder image", id);
            PLACEHOLDER_IMAGE
        }
    }
}
