//! lazylog demo
//!
//! Initializes the global facade from a TOML file (or defaults), then runs a
//! few tokio workers that log under a per-worker `trace_id` context.
//!
//! # Usage
//!
//! ```text
//! lazylog [--config lazylog.toml] [--backend direct|log|tracing|off]
//!         [--level trace|debug|info|warn|error|off] [--workers N] [--watch]
//! ```
//!
//! `LAZYLOG_BACKEND` / `LAZYLOG_LEVEL` override the file; command-line flags
//! override both. With `--watch` the process keeps running and applies every
//! valid change to the config file until Ctrl+C.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use lazylog::config::{load_config, BackendKind, ConfigWatcher, FacadeConfig};
use lazylog::config::loader::apply_env;
use lazylog::observability::diagnostics::init_tracing;
use lazylog::{context, FlushGuard, Level};

#[derive(Parser)]
#[command(name = "lazylog")]
#[command(about = "Demo of the lazylog logging facade", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend to route events to
    #[arg(short, long)]
    backend: Option<BackendKind>,

    /// Root threshold
    #[arg(short, long)]
    level: Option<Level>,

    /// Number of worker tasks
    #[arg(short, long, default_value_t = 3)]
    workers: usize,

    /// Keep running and reload the config file on change
    #[arg(long, requires = "config")]
    watch: bool,
}

#[derive(Debug, thiserror::Error)]
#[error("worker {worker} gave up after {attempts} attempts")]
struct RetriesExhausted {
    worker: usize,
    attempts: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // The facade's own diagnostics and the log/tracing backends end up here.
    init_tracing("lazylog=info");

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => FacadeConfig::default(),
    };
    apply_env(&mut config)?;
    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    if let Some(level) = args.level {
        config.level = level;
    }

    tracing::info!(
        backend = config.backend.as_str(),
        level = %config.level,
        overrides = config.loggers.len(),
        "Configuration loaded"
    );

    let facade = lazylog::init(config)?;
    let _flush = FlushGuard::new(facade);

    let log = lazylog::logger!("lazylog::demo");
    lazylog::info!(log, "starting {} workers", args.workers);

    let mut handles = Vec::with_capacity(args.workers);
    for worker in 0..args.workers {
        let trace_id = uuid::Uuid::new_v4().to_string();
        handles.push(tokio::spawn(context::scope_with(
            [("trace_id", trace_id), ("worker", worker.to_string())],
            run_worker(worker),
        )));
    }
    for handle in handles {
        if let Err(e) = handle.await {
            lazylog::error!(log, cause: &e, "worker task did not finish");
        }
    }

    let stats = facade.stats();
    lazylog::info!(
        log,
        "delivered {} events ({} backend failures)",
        stats.delivered,
        stats.failed
    );

    if args.watch {
        if let Some(path) = &args.config {
            watch(path, facade, &log).await?;
        }
    }

    Ok(())
}

async fn run_worker(worker: usize) {
    let log = lazylog::logger!("lazylog::demo::worker");
    log.entry(&[&worker]);

    for attempt in 1..=3u32 {
        lazylog::debug!(log, "attempt {}", attempt);
        tokio::time::sleep(Duration::from_millis(10 * (worker as u64 + 1))).await;
        // Context survives the await even if the task moved threads.
        log.trace(|| format!("woke up with {}", context::current()));
    }

    if worker % 2 == 1 {
        let err = RetriesExhausted {
            worker,
            attempts: 3,
        };
        lazylog::warn!(log, cause: &err, "worker {} degraded", worker);
    }

    // Children spawned through the facade keep the trace id.
    let child = context::spawn(async move {
        lazylog::logger!("lazylog::demo::child").info(|| "child task reporting in");
    });
    let _ = child.await;

    log.exit();
}

async fn watch(
    path: &std::path::Path,
    facade: &'static lazylog::Facade,
    log: &lazylog::Logger,
) -> Result<(), Box<dyn std::error::Error>> {
    let (watcher, mut updates) = ConfigWatcher::new(path);
    let _watcher = watcher.run()?;

    lazylog::info!(log, "watching {} for changes, Ctrl+C to exit", path.display());
    loop {
        tokio::select! {
            Some(config) = updates.recv() => {
                if let Err(e) = facade.reconfigure(config) {
                    lazylog::error!(log, cause: &e, "rejected new configuration");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                lazylog::info!(log, "shutting down");
                return Ok(());
            }
        }
    }
}
