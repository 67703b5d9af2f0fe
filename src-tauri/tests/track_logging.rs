use std::sync::atomic::{AtomicUsize, Ordering};

use log::{Level, LevelFilter, Log, Metadata, Record};
use trailwatch_lib::config::LiveTrackConfig;
use trailwatch_lib::live_track::catalog::PLACEHOLDER_IMAGE;
use trailwatch_lib::live_track::TrackSimulator;

const TRACK_ID: &str = "uncharted-wadi";

/// Counts warnings that mention `TRACK_ID`
struct WarningCounter {
    count: AtomicUsize,
}

impl Log for WarningCounter {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if record.level() == Level::Warn && record.args().to_string().contains(TRACK_ID) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn flush(&self) {}
}

static COUNTER: WarningCounter = WarningCounter {
    count: AtomicUsize::new(0),
};

#[test]
fn unknown_track_warns_once_across_ticks() {
    log::set_logger(&COUNTER).expect("logger installed once");
    log::set_max_level(LevelFilter::Warn);

    let mut sim = TrackSimulator::new(&LiveTrackConfig::default(), TRACK_ID);
    sim.start();
    for _ in 0..60 {
        let snapshot = sim.tick();
        assert_eq!(snapshot.track_image, PLACEHOLDER_IMAGE);
    }
    let _ = sim.snapshot();

    assert_eq!(sim.track_image(), PLACEHOLDER_IMAGE);
    assert_eq!(COUNTER.count.load(Ordering::SeqCst), 1);
}
