//! BDD step definitions for canvas refresh and the auto-refresh engine

use std::time::Duration;

use cucumber::{then, when};
use tokio_util::sync::CancellationToken;

use nds_monitor::actions::MonitorAction;
use nds_monitor::effects::Effects;
use nds_monitor::engine::AutoRefresh;

use crate::world::MonitorWorld;

#[when("the canvases are refreshed")]
async fn canvases_refreshed(world: &mut MonitorWorld) {
    world.store().dispatch(MonitorAction::RefreshCanvases);
    world.settle().await;
}

#[when(expr = "the auto-refresh engine runs for {int} ms at an interval of {int} ms")]
async fn engine_runs(world: &mut MonitorWorld, run_ms: u64, interval_ms: u64) {
    let cancel = CancellationToken::new();
    let effects = Effects::new(world.api(), world.store().clone());
    let mut actions = world.actions.take().expect("action stream not set");

    let worker_cancel = cancel.clone();
    let worker = tokio::spawn(async move {
        let mut seen = Vec::new();
        loop {
            tokio::select! {
                next = actions.recv() => match next {
                    Some(d) => {
                        seen.push(d.action.clone());
                        effects.handle(d).await;
                    }
                    None => break,
                },
                _ = worker_cancel.cancelled() => break,
            }
        }
        (actions, seen)
    });

    let engine = AutoRefresh::new(
        world.store().clone(),
        Duration::from_millis(interval_ms),
        cancel.clone(),
    );
    let handle = tokio::spawn(async move { engine.run().await });
    tokio::time::sleep(Duration::from_millis(run_ms)).await;
    cancel.cancel();
    handle.await.expect("engine task panicked");

    let (actions, seen) = worker.await.expect("effects task panicked");
    world.actions = Some(actions);
    world.dispatched.extend(seen);
    world.drain_actions();
}

#[then(expr = "at least {int} refreshes should have been dispatched")]
fn at_least_refreshes(world: &mut MonitorWorld, expected: usize) {
    let count = world
        .dispatched
        .iter()
        .filter(|a| **a == MonitorAction::RefreshCanvases)
        .count();
    assert!(count >= expected, "only {} refreshes dispatched", count);
}

#[then(expr = "exactly {int} refresh should have been dispatched")]
fn exactly_refreshes(world: &mut MonitorWorld, expected: usize) {
    let count = world
        .dispatched
        .iter()
        .filter(|a| **a == MonitorAction::RefreshCanvases)
        .count();
    assert_eq!(count, expected);
}

#[then("the connection error signal should be empty")]
fn no_connection_error(world: &mut MonitorWorld) {
    assert_eq!(world.container().connection_error().get(), None);
}

#[then(expr = "the connection error signal should mention {string}")]
fn connection_error_mentions(world: &mut MonitorWorld, text: String) {
    let error = world
        .container()
        .connection_error()
        .get()
        .expect("no connection error");
    assert!(
        error.message.contains(&text),
        "Expected '{}' in '{}'",
        text,
        error.message
    );
}
