//! The `tracing` backend against a capturing subscriber layer.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

use lazylog::backend::TracingBackend;
use lazylog::{Facade, Level, Marker};

#[derive(Debug, Clone, PartialEq)]
struct Captured {
    level: tracing::Level,
    logger: String,
    message: String,
}

#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<Captured>>>,
}

#[derive(Default)]
struct FieldVisitor {
    logger: String,
    message: String,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "logger" {
            self.logger = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            logger: visitor.logger,
            message: visitor.message,
        });
    }
}

#[test]
fn test_forwards_to_tracing() {
    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(layer.clone());

    tracing::subscriber::with_default(subscriber, || {
        let facade = Facade::with_backend(TracingBackend::new(), Level::Trace);
        let log = facade.logger("app.http");

        assert!(!log.is_debug_enabled());
        assert!(log.is_info_enabled());

        log.debug(|| "filtered by the subscriber");
        log.at(Level::Warn, Some(&Marker::new("AUDIT")), |event| {
            event.message("slow response").field("ms", 950);
        });
    });

    let events = layer.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![Captured {
            level: tracing::Level::WARN,
            logger: "app.http".to_string(),
            message: "AUDIT slow response {ms=950}".to_string(),
        }]
    );
}
