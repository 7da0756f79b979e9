//! BDD step definitions for the monitor container and the confirmation flow

use std::sync::Arc;

use cucumber::{given, then, when};

use nds_monitor::actions::MonitorAction;
use nds_monitor::container::MonitorContainer;
use nds_monitor::model::{Canvas, CanvasFeature, Feature};
use nds_monitor::state::{MonitorState, PendingDeletion};
use nds_monitor::store::Store;

use crate::world::{MonitorWorld, RecordingApi};

fn names(list: &str) -> Vec<String> {
    list.split(',')
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect()
}

/// Canvas `n` (1-based) gets id `n` and a single feature with id `n * 10`
fn server_canvas(index: usize, name: &str) -> Canvas {
    let id = index as u32 + 1;
    Canvas {
        id,
        name: name.to_string(),
        width: 144,
        height: 1,
        current_effect_name: "Rainbow".to_string(),
        features: vec![Feature {
            id: id * 10,
            host_name: format!("{}.local", name.to_lowercase()),
            friendly_name: format!("{} Strip", name),
            port: 49152,
            width: 144,
            height: 1,
            ..Default::default()
        }],
        ..Default::default()
    }
}

/// Push the server's canvases into the store without recording the load
pub(crate) fn load_from_server(world: &mut MonitorWorld) {
    let canvases = world.api().canvases.lock().unwrap().clone();
    world.store().dispatch(MonitorAction::CanvasesLoaded(canvases));
    world.drain_actions();
    world.dispatched.clear();
}

#[given(expr = "a NightDriver server with canvases {string}")]
fn server_with_canvases(world: &mut MonitorWorld, list: String) {
    let canvases: Vec<Canvas> = names(&list)
        .iter()
        .enumerate()
        .map(|(i, name)| server_canvas(i, name))
        .collect();
    let api = Arc::new(RecordingApi::default());
    *api.canvases.lock().unwrap() = canvases;

    let (store, actions) = Store::with_effects(MonitorState::default());
    world.container = Some(MonitorContainer::new(store.clone()));
    world.store = Some(store);
    world.actions = Some(actions);
    world.api = Some(api);
    load_from_server(world);
}

#[given(expr = "canvas {string} is running")]
fn canvas_running(world: &mut MonitorWorld, name: String) {
    for canvas in world.api().canvases.lock().unwrap().iter_mut() {
        if canvas.name == name {
            canvas.effects_manager.running = true;
        }
    }
    load_from_server(world);
}

#[given("the server is offline")]
fn server_is_offline(world: &mut MonitorWorld) {
    *world.api().offline.lock().unwrap() = true;
}

#[when("the server goes offline")]
fn server_goes_offline(world: &mut MonitorWorld) {
    *world.api().offline.lock().unwrap() = true;
}

#[when("the server comes back")]
fn server_back(world: &mut MonitorWorld) {
    *world.api().offline.lock().unwrap() = false;
}

#[when(expr = "the view sets auto-refresh to {word}")]
fn view_sets_auto_refresh(world: &mut MonitorWorld, value: String) {
    world.container().on_auto_refresh(value == "on");
}

#[when(expr = "the view activates {string}")]
fn view_activates(world: &mut MonitorWorld, list: String) {
    let canvases = names(&list).iter().map(|n| world.canvas(n)).collect();
    world.container().on_activate_canvases(canvases);
}

#[when(expr = "the view deactivates {string}")]
fn view_deactivates(world: &mut MonitorWorld, list: String) {
    let canvases = names(&list).iter().map(|n| world.canvas(n)).collect();
    world.container().on_deactivate_canvases(canvases);
}

#[when(expr = "the view deletes canvas {string}")]
fn view_deletes_canvas(world: &mut MonitorWorld, name: String) {
    let canvas = world.canvas(&name);
    world.container().on_delete_canvas(canvas);
}

#[when(expr = "the view deletes feature {string} from canvas {string}")]
fn view_deletes_feature(world: &mut MonitorWorld, feature: String, name: String) {
    let canvas = world.canvas(&name);
    let feature = canvas
        .features
        .iter()
        .find(|f| f.friendly_name == feature)
        .cloned()
        .unwrap_or_else(|| panic!("no feature named {} on {}", feature, name));
    world
        .container()
        .on_delete_feature(CanvasFeature { canvas, feature });
}

#[when("the user accepts the deletion")]
fn user_accepts(world: &mut MonitorWorld) {
    world.container().on_resolve_deletion(true);
}

#[when("the user rejects the deletion")]
fn user_rejects(world: &mut MonitorWorld) {
    world.container().on_resolve_deletion(false);
}

#[when("the effects settle")]
async fn effects_settle(world: &mut MonitorWorld) {
    world.settle().await;
}

#[then(expr = "the dispatched actions should be {string}")]
fn dispatched_actions(world: &mut MonitorWorld, expected: String) {
    world.drain_actions();
    let actual: Vec<String> = world.dispatched.iter().map(|a| a.to_string()).collect();
    assert_eq!(actual.join("; "), expected);
}

#[then("no action should be dispatched")]
fn no_action(world: &mut MonitorWorld) {
    world.drain_actions();
    assert!(
        world.dispatched.is_empty(),
        "unexpected actions: {:?}",
        world.dispatched
    );
}

#[then(expr = "the canvases signal should list {string}")]
fn canvases_signal_lists(world: &mut MonitorWorld, expected: String) {
    let actual: Vec<String> = world
        .container()
        .canvases()
        .get()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(actual, names(&expected));
}

#[then(expr = "canvas {string} should have features {string}")]
fn canvas_features(world: &mut MonitorWorld, name: String, expected: String) {
    let canvas = world.canvas(&name);
    let actual: Vec<String> = canvas.features.into_iter().map(|f| f.friendly_name).collect();
    assert_eq!(actual, names(&expected));
}

#[then(expr = "canvas {string} should be {word}")]
fn canvas_activity(world: &mut MonitorWorld, name: String, activity: String) {
    let canvas = world
        .container()
        .canvases()
        .get()
        .into_iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("no canvas named {}", name));
    assert_eq!(canvas.is_active(), activity == "active", "{:?}", canvas);
}

#[then(expr = "auto-refresh should be {word}")]
fn auto_refresh_is(world: &mut MonitorWorld, value: String) {
    assert_eq!(world.container().auto_refresh().get(), value == "on");
}

#[then(expr = "a deletion of canvas {string} should be pending")]
fn canvas_deletion_pending(world: &mut MonitorWorld, name: String) {
    match world.container().pending_deletion().get() {
        Some(PendingDeletion::Canvas(canvas)) => assert_eq!(canvas.name, name),
        other => panic!("expected pending canvas deletion, got {:?}", other),
    }
}

#[then(expr = "a deletion of feature {string} should be pending")]
fn feature_deletion_pending(world: &mut MonitorWorld, name: String) {
    match world.container().pending_deletion().get() {
        Some(PendingDeletion::Feature(model)) => assert_eq!(model.feature.friendly_name, name),
        other => panic!("expected pending feature deletion, got {:?}", other),
    }
}

#[then("no deletion should be pending")]
fn no_deletion_pending(world: &mut MonitorWorld) {
    assert_eq!(world.container().pending_deletion().get(), None);
}

#[then(expr = "the server should have received {string}")]
fn server_received(world: &mut MonitorWorld, call: String) {
    let calls = world.api().calls();
    assert!(
        calls.contains(&call),
        "Expected server call '{}', got {:?}",
        call,
        calls
    );
}

#[then("the server should not have received a delete request")]
fn no_delete_request(world: &mut MonitorWorld) {
    let calls = world.api().calls();
    assert!(
        !calls.iter().any(|c| c.starts_with("DELETE")),
        "unexpected delete in {:?}",
        calls
    );
}
