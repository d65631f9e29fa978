use std::f64::consts::TAU;

use swarm_core::{Agent, AgentParams, Arena, Goal, Obstacle, SteeringConfig, Vector2D, World};
use swarm_shared::{FpsCounter, StatusResponse, SteeringSettings, WorldSnapshot};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct SwarmSimulation {
    world: World,
    settings: SteeringSettings,
    fps: FpsCounter,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

#[wasm_bindgen]
impl SwarmSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, robot_count: usize) -> Result<SwarmSimulation, JsValue> {
        console_log!("Initializing swarm simulation with {} robots", robot_count);

        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let arena = Arena::default();
        canvas.set_width(arena.width() as u32);
        canvas.set_height(arena.height() as u32);

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let world = World::initialize(
            arena,
            AgentParams::default(),
            robot_count,
            &mut rand::thread_rng(),
        )
        .map_err(to_js)?;

        Ok(SwarmSimulation {
            world,
            settings: SteeringSettings::default(),
            fps: FpsCounter::new(),
            canvas,
            context,
        })
    }

    /// One animation frame: measure, step, draw. `timestamp` is the
    /// `requestAnimationFrame` time in milliseconds.
    pub fn frame(&mut self, timestamp: f64) -> Result<(), JsValue> {
        self.fps.frame(timestamp);
        self.update();
        self.render()
    }

    /// Advances one tick and returns the goals-reached count.
    pub fn update(&mut self) -> u32 {
        let config = SteeringConfig::from(self.settings);
        let summary = self.world.update(&config);
        if summary.newly_reached > 0 {
            console_log!("Goals reached: {}", summary.goals_reached);
        }
        summary.goals_reached
    }

    pub fn render(&self) -> Result<(), JsValue> {
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;
        self.context.clear_rect(0.0, 0.0, width, height);

        for goal in self.world.goals() {
            self.draw_goal(goal)?;
        }
        for obstacle in self.world.obstacles() {
            self.draw_obstacle(obstacle)?;
        }
        for agent in self.world.agents() {
            self.draw_agent(agent)?;
        }

        Ok(())
    }

    fn draw_circle(&self, center: Vector2D, radius: f32, color: &str) -> Result<(), JsValue> {
        self.context.begin_path();
        self.context
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)?;
        self.context.set_fill_style_str(color);
        self.context.fill();
        Ok(())
    }

    fn draw_goal(&self, goal: &Goal) -> Result<(), JsValue> {
        let color = if goal.is_reached() {
            "rgba(0, 255, 0, 0.3)"
        } else {
            "rgba(0, 255, 0, 0.7)"
        };
        self.draw_circle(goal.position(), goal.radius(), color)
    }

    fn draw_obstacle(&self, obstacle: &Obstacle) -> Result<(), JsValue> {
        self.draw_circle(obstacle.position(), obstacle.radius(), "rgba(255, 0, 0, 0.7)")
    }

    fn draw_agent(&self, agent: &Agent) -> Result<(), JsValue> {
        let size = agent.size() as f64;
        let position = agent.position();

        self.context.save();
        self.context.translate(position.x as f64, position.y as f64)?;
        self.context.rotate(agent.heading() as f64)?;

        // Triangle pointing in the direction of movement
        self.context.begin_path();
        self.context.move_to(size * 1.5, 0.0);
        self.context.line_to(-size, -size);
        self.context.line_to(-size, size);
        self.context.close_path();
        self.context.set_fill_style_str("white");
        self.context.fill();

        self.context.restore();

        Ok(())
    }

    pub fn reset(&mut self, robot_count: usize) -> Result<(), JsValue> {
        self.world
            .reset(robot_count, &mut rand::thread_rng())
            .map_err(to_js)?;
        console_log!("Reset with {} robots", robot_count);
        Ok(())
    }

    pub fn add_obstacle(&mut self) -> usize {
        let index = self.world.add_random_obstacle(&mut rand::thread_rng());
        console_log!("Obstacles: {}", self.world.obstacles().len());
        index
    }

    pub fn add_goal(&mut self) -> usize {
        let index = self.world.add_random_goal(&mut rand::thread_rng());
        console_log!("Goals: {}", self.world.goals().len());
        index
    }

    fn canvas_point(&self, event: &MouseEvent) -> Vector2D {
        let canvas_element: &Element = self.canvas.as_ref();
        let rect = canvas_element.get_bounding_client_rect();
        let x = event.client_x() as f64 - rect.left();
        let y = event.client_y() as f64 - rect.top();
        Vector2D::new(x as f32, y as f32)
    }

    /// Starts dragging the obstacle or goal under the pointer, if any.
    pub fn handle_mouse_down(&mut self, event: MouseEvent) -> bool {
        let point = self.canvas_point(&event);
        self.world.begin_drag(point).is_some()
    }

    pub fn handle_mouse_move(&mut self, event: MouseEvent) {
        if self.world.dragging().is_some() {
            let point = self.canvas_point(&event);
            self.world.drag_to(point);
        }
    }

    pub fn handle_mouse_up(&mut self) {
        self.world.end_drag();
    }

    pub fn set_separation(&mut self, enabled: bool, weight: f32) {
        self.settings.separation_enabled = enabled;
        self.settings.separation_weight = weight;
        self.settings = self.settings.sanitized();
    }

    pub fn set_alignment(&mut self, enabled: bool, weight: f32) {
        self.settings.alignment_enabled = enabled;
        self.settings.alignment_weight = weight;
        self.settings = self.settings.sanitized();
    }

    pub fn set_cohesion(&mut self, enabled: bool, weight: f32) {
        self.settings.cohesion_enabled = enabled;
        self.settings.cohesion_weight = weight;
        self.settings = self.settings.sanitized();
    }

    pub fn set_obstacle_avoidance(&mut self, enabled: bool, weight: f32) {
        self.settings.obstacle_avoidance_enabled = enabled;
        self.settings.obstacle_weight = weight;
        self.settings = self.settings.sanitized();
    }

    pub fn set_goal_seeking(&mut self, enabled: bool, weight: f32) {
        self.settings.goal_seeking_enabled = enabled;
        self.settings.goal_weight = weight;
        self.settings = self.settings.sanitized();
    }

    /// Replaces all settings from a JSON object; missing fields take defaults.
    pub fn set_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        let settings: SteeringSettings = serde_json::from_str(json).map_err(to_js)?;
        self.settings = settings.sanitized();
        Ok(())
    }

    pub fn settings_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.settings).map_err(to_js)
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&WorldSnapshot::capture(&self.world)).map_err(to_js)
    }

    pub fn status_json(&self) -> Result<String, JsValue> {
        let status = StatusResponse {
            robot_count: self.world.agents().len(),
            fps: self.fps.fps(),
            goals_reached: self.world.goals_reached(),
            tick: self.world.tick(),
        };
        serde_json::to_string(&status).map_err(to_js)
    }

    pub fn goals_reached(&self) -> u32 {
        self.world.goals_reached()
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn robot_count(&self) -> usize {
        self.world.agents().len()
    }
}
