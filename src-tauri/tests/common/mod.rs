use trailwatch_lib::config::LiveTrackConfig;
use trailwatch_lib::live_track::TrackSimulator;

pub fn seeded_simulator(seed: u64) -> TrackSimulator {
    let mut config = LiveTrackConfig::builtin().expect("builtin config");
    config.simulator.seed = Some(seed);
    TrackSimulator::new(&config, "al-wathba")
}

pub fn path_indices(sim: &TrackSimulator) -> Vec<usize> {
    sim.roster().horses().iter().map(|h| h.path_index()).collect()
}

pub fn metrics(sim: &TrackSimulator) -> Vec<(f32, u32)> {
    sim.roster()
        .horses()
        .iter()
        .map(|h| (h.speed_kmh, h.heart_rate_bpm))
        .collect()
}
