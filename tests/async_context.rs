//! Context propagation across suspension points, threads and spawned tasks.

use std::time::Duration;

use lazylog::context::{self, LogContext};
use lazylog::{Level, WithLogContext};

mod common;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_context_survives_suspension() {
    let (facade, backend) = common::memory_facade(Level::Info);
    let log = facade.logger("worker");

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let log = log.clone();
            tokio::spawn(context::scope_with([("request", i.to_string())], async move {
                for step in 0..3 {
                    tokio::time::sleep(Duration::from_millis(1)).await;
                    tokio::task::yield_now().await;
                    lazylog::info!(log, "step {}", step);
                }
                context::current().get("request").map(str::to_string)
            }))
        })
        .collect();

    for (i, task) in tasks.into_iter().enumerate() {
        assert_eq!(task.await.unwrap(), Some(i.to_string()));
    }

    let events = backend.events();
    assert_eq!(events.len(), 24);
    for event in &events {
        assert!(event.context.get("request").is_some());
    }
}

#[tokio::test]
async fn test_plain_spawn_does_not_inherit() {
    let ctx = LogContext::new().with("trace_id", "abc");
    let seen = async {
        tokio::spawn(async { context::current() }).await.unwrap()
    }
    .with_log_context(ctx)
    .await;
    assert!(seen.is_empty());
}

#[tokio::test]
async fn test_context_spawn_inherits() {
    let ctx = LogContext::new().with("trace_id", "abc");
    let seen = async { context::spawn(async { context::current() }).await.unwrap() }
        .with_log_context(ctx)
        .await;
    assert_eq!(seen.get("trace_id"), Some("abc"));
}

#[tokio::test]
async fn test_nested_scopes_restore_outer() {
    let outer = LogContext::new().with("user", "alice");
    async {
        context::scope_with([("span", "inner")], async {
            let current = context::current();
            assert_eq!(current.get("user"), Some("alice"));
            assert_eq!(current.get("span"), Some("inner"));
        })
        .await;

        let current = context::current();
        assert_eq!(current.get("user"), Some("alice"));
        assert_eq!(current.get("span"), None);
    }
    .with_log_context(outer)
    .await;

    assert!(context::current().is_empty());
}

#[test]
fn test_thread_context_for_sync_code() {
    let (facade, backend) = common::memory_facade(Level::Info);
    let log = facade.logger("sync");

    {
        let _guard = context::enter(LogContext::new().with("job", "nightly"));
        log.info(|| "inside");
    }
    log.info(|| "outside");

    let events = backend.events();
    assert_eq!(events[0].context.get("job"), Some("nightly"));
    assert!(events[1].context.is_empty());
}

#[test]
fn test_thread_context_overrides_task_context() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let task_ctx = LogContext::new().with("source", "task").with("tenant", "t1");

    let merged = runtime.block_on(
        async {
            let _guard = context::enter(LogContext::new().with("source", "thread"));
            context::current()
        }
        .with_log_context(task_ctx),
    );

    assert_eq!(merged.get("source"), Some("thread"));
    assert_eq!(merged.get("tenant"), Some("t1"));
}
