#![cfg(target_arch = "wasm32")]

use swarm_shared::{StatusResponse, SteeringSettings, WorldSnapshot};
use swarm_wasm::SwarmSimulation;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

/// Adds a canvas with the given id to the test page.
fn mount_canvas(id: &str) {
    let document = web_sys::window()
        .expect("no global window")
        .document()
        .expect("no document");
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(id);
    document.body().unwrap().append_child(&canvas).unwrap();
}

#[wasm_bindgen_test]
fn test_simulation_runs_frames() {
    mount_canvas("swarm-frames");
    let mut simulation = SwarmSimulation::new("swarm-frames", 30).unwrap();

    for frame in 0..10 {
        simulation.frame(frame as f64 * 16.0).unwrap();
    }

    assert_eq!(simulation.robot_count(), 30);
    assert_eq!(simulation.fps(), 63);

    let status: StatusResponse = serde_json::from_str(&simulation.status_json().unwrap()).unwrap();
    assert_eq!(status.tick, 10);
}

#[wasm_bindgen_test]
fn test_add_and_reset() {
    mount_canvas("swarm-reset");
    let mut simulation = SwarmSimulation::new("swarm-reset", 5).unwrap();

    assert_eq!(simulation.add_obstacle(), 3);
    assert_eq!(simulation.add_goal(), 2);

    let snapshot: WorldSnapshot =
        serde_json::from_str(&simulation.snapshot_json().unwrap()).unwrap();
    assert_eq!(snapshot.obstacles.len(), 4);
    assert_eq!(snapshot.goals.len(), 3);

    simulation.reset(12).unwrap();
    let snapshot: WorldSnapshot =
        serde_json::from_str(&simulation.snapshot_json().unwrap()).unwrap();
    assert_eq!(snapshot.agents.len(), 12);
    assert_eq!(snapshot.obstacles.len(), 3);
    assert_eq!(simulation.goals_reached(), 0);
}

#[wasm_bindgen_test]
fn test_settings_setters_sanitize() {
    mount_canvas("swarm-settings");
    let mut simulation = SwarmSimulation::new("swarm-settings", 0).unwrap();

    simulation.set_cohesion(false, f32::NAN);
    simulation.set_goal_seeking(true, 4.0);

    let settings: SteeringSettings =
        serde_json::from_str(&simulation.settings_json().unwrap()).unwrap();
    assert!(!settings.cohesion_enabled);
    assert_eq!(settings.cohesion_weight, SteeringSettings::default().cohesion_weight);
    assert_eq!(settings.goal_weight, 4.0);

    assert!(simulation.set_settings_json("not json").is_err());
}

#[wasm_bindgen_test]
fn test_missing_canvas_is_an_error() {
    assert!(SwarmSimulation::new("no-such-canvas", 3).is_err());
}
