//! The `log` backend against a capturing `log::Log` implementation.
//!
//! `log` allows one global logger per process, so everything lives in a
//! single test.

use std::io;
use std::sync::{Arc, Mutex};

use lazylog::backend::LogBackend;
use lazylog::context::{self, LogContext};
use lazylog::{Facade, Level};

#[derive(Clone, Default)]
struct Capture {
    records: Arc<Mutex<Vec<(log::Level, String, String)>>>,
}

impl log::Log for Capture {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        !metadata.target().starts_with("muted")
    }

    fn log(&self, record: &log::Record<'_>) {
        self.records.lock().unwrap().push((
            record.level(),
            record.target().to_string(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

#[test]
fn test_forwards_to_log() {
    let capture = Capture::default();
    log::set_boxed_logger(Box::new(capture.clone())).unwrap();
    log::set_max_level(log::LevelFilter::Debug);

    let facade = Facade::with_backend(LogBackend::new(), Level::Trace);
    let log = facade.logger("app::db");

    // Above log's max level: filtered before the producer runs.
    assert!(!log.is_trace_enabled());
    log.trace(|| "too detailed");

    log.debug(|| "connecting");
    {
        let _guard = context::enter(LogContext::new().with("conn", "7"));
        let err = io::Error::new(io::ErrorKind::Other, "reset by peer");
        lazylog::error!(log, cause: &err, "query failed");
    }

    // The installed logger can refuse whole targets.
    let muted = facade.logger("muted::child");
    assert!(!muted.is_info_enabled());
    muted.error(|| "never");

    let records = capture.records.lock().unwrap().clone();
    assert_eq!(
        records,
        vec![
            (log::Level::Debug, "app::db".to_string(), "connecting".to_string()),
            (
                log::Level::Error,
                "app::db".to_string(),
                "query failed {conn=7}, Caused by: 'reset by peer'".to_string()
            ),
        ]
    );
    assert_eq!(facade.stats().delivered, 2);
}
