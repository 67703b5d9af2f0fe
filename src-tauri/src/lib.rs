//! Trailwatch - Tauri Backend
//!
//! Live-track simulation and frozen detail profiles for the endurance dashboard.
//! The desktop commands are compiled with the `desktop` feature.

pub mod config;
pub mod live_track;
pub mod profile;

use config::LiveTrackConfig;
use live_track::TrackSimulator;
use profile::{HorseProfile, ProfileModal, RiderProfile};

/// Everything the dashboard window owns: one simulator and one modal per profile kind
pub struct Dashboard {
    config: LiveTrackConfig,
    simulator: Option<TrackSimulator>,
    horse_modal: ProfileModal<HorseProfile>,
    rider_modal: ProfileModal<RiderProfile>,
}

impl Dashboard {
    pub fn new(config: LiveTrackConfig) -> Self {
        Self {
            config,
            simulator: None,
            horse_modal: ProfileModal::new(),
            rider_modal: ProfileModal::new(),
        }
    }

    /// Mount the track view, replacing any previous simulator
    pub fn init_track(&mut self, track_id: &str) -> &mut TrackSimulator {
        if let Some(previous) = &mut self.simulator {
            previous.stop();
        }
        self.simulator.insert(TrackSimulator::new(&self.config, track_id))
    }

    /// Unmount the track view
    pub fn close_track(&mut self) {
        if let Some(mut simulator) = self.simulator.take() {
            simulator.stop();
        }
    }

    pub fn simulator(&self) -> Option<&TrackSimulator> {
        self.simulator.as_ref()
    }

    pub fn simulator_mut(&mut self) -> Option<&mut TrackSimulator> {
        self.simulator.as_mut()
    }

    pub fn horse_modal(&mut self) -> &mut ProfileModal<HorseProfile> {
        &mut self.horse_modal
    }

    pub fn rider_modal(&mut self) -> &mut ProfileModal<RiderProfile> {
        &mut self.rider_modal
    }
}

#[cfg(feature = "desktop")]
mod commands {
    use std::sync::Mutex;

    use tauri::State;

    use crate::live_track::{catalog, SimulatorStats, TrackSnapshot};
    use crate::profile::{HorseProfile, HorseRecord, ProfileSection, RiderProfile, RiderRecord};
    use crate::Dashboard;

    type Shared<'a> = State<'a, Mutex<Dashboard>>;

    fn with_dashboard<T>(
        state: Shared<'_>,
        f: impl FnOnce(&mut Dashboard) -> T,
    ) -> Result<T, String> {
        let mut dashboard = state.lock().map_err(|e| e.to_string())?;
        Ok(f(&mut dashboard))
    }

    /// Build the roster for a track view
    #[tauri::command]
    pub fn init_track(
        state: Shared<'_>,
        track_id: Option<String>,
    ) -> Result<TrackSnapshot, String> {
        let track_id = track_id.unwrap_or_else(|| "al-wathba".to_string());
        with_dashboard(state, |d| d.init_track(&track_id).snapshot())
    }

    /// Tear down the track view; no step fires afterwards
    #[tauri::command]
    pub fn close_track(state: Shared<'_>) -> Result<(), String> {
        with_dashboard(state, |d| d.close_track())
    }

    #[tauri::command]
    pub fn start_tracking(state: Shared<'_>) -> Result<(), String> {
        with_dashboard(state, |d| d.simulator_mut().map(|s| s.start()))?;
        Ok(())
    }

    #[tauri::command]
    pub fn pause_tracking(state: Shared<'_>) -> Result<(), String> {
        with_dashboard(state, |d| d.simulator_mut().map(|s| s.pause()))?;
        Ok(())
    }

    #[tauri::command]
    pub fn resume_tracking(state: Shared<'_>) -> Result<(), String> {
        with_dashboard(state, |d| d.simulator_mut().map(|s| s.resume()))?;
        Ok(())
    }

    #[tauri::command]
    pub fn reset_tracking(state: Shared<'_>) -> Result<(), String> {
        with_dashboard(state, |d| d.simulator_mut().map(|s| s.reset()))?;
        Ok(())
    }

    /// Advance by wall-clock time and return the current state
    #[tauri::command]
    pub fn tick(state: Shared<'_>) -> Result<Option<TrackSnapshot>, String> {
        with_dashboard(state, |d| d.simulator_mut().map(|s| s.tick()))
    }

    /// Current state without advancing
    #[tauri::command]
    pub fn get_snapshot(state: Shared<'_>) -> Result<Option<TrackSnapshot>, String> {
        with_dashboard(state, |d| d.simulator().map(|s| s.snapshot()))
    }

    #[tauri::command]
    pub fn get_stats(state: Shared<'_>) -> Result<Option<SimulatorStats>, String> {
        with_dashboard(state, |d| d.simulator().map(|s| s.stats()))
    }

    #[tauri::command]
    pub fn track_image(track_id: String) -> String {
        catalog::image_for(&track_id).to_string()
    }

    #[tauri::command]
    pub fn open_horse_profile(
        state: Shared<'_>,
        id: String,
        horse: Option<HorseRecord>,
    ) -> Result<Option<HorseProfile>, String> {
        with_dashboard(state, |d| {
            d.horse_modal().open(&id, horse.as_ref()).map(|p| (*p).clone())
        })
    }

    #[tauri::command]
    pub fn open_rider_profile(
        state: Shared<'_>,
        id: String,
        rider: Option<RiderRecord>,
    ) -> Result<Option<RiderProfile>, String> {
        with_dashboard(state, |d| {
            d.rider_modal().open(&id, rider.as_ref()).map(|p| (*p).clone())
        })
    }

    #[tauri::command]
    pub fn close_profile(state: Shared<'_>) -> Result<(), String> {
        with_dashboard(state, |d| {
            d.horse_modal().clear();
            d.rider_modal().clear();
        })
    }

    /// Returns whether the section is now expanded
    #[tauri::command]
    pub fn toggle_profile_section(
        state: Shared<'_>,
        rider: bool,
        section: ProfileSection,
    ) -> Result<bool, String> {
        with_dashboard(state, |d| {
            if rider {
                d.rider_modal().toggle_section(section)
            } else {
                d.horse_modal().toggle_section(section)
            }
        })
    }
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use std::sync::Mutex;

    let config = match LiveTrackConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}; falling back to defaults");
            LiveTrackConfig::default()
        }
    };

    tauri::Builder::default()
        .manage(Mutex::new(Dashboard::new(config)))
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }
            log::info!("Trailwatch dashboard backend initialized");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::init_track,
            commands::close_track,
            commands::start_tracking,
            commands::pause_tracking,
            commands::resume_tracking,
            commands::reset_tracking,
            commands::tick,
            commands::get_snapshot,
            commands::get_stats,
            commands::track_image,
            commands::open_horse_profile,
            commands::open_rider_profile,
            commands::close_profile,
            commands::toggle_profile_section,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
