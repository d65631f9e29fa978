#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use swarm_core::{Rule, SteeringConfig, Vector2D, World};

/// Represents a 2D position in arena coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Vector2D> for Position {
    fn from(v: Vector2D) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Position> for Vector2D {
    fn from(p: Position) -> Self {
        Vector2D::new(p.x, p.y)
    }
}

/// Behavior switches and weights as they come from the controls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SteeringSettings {
    pub separation_enabled: bool,
    pub alignment_enabled: bool,
    pub cohesion_enabled: bool,
    pub obstacle_avoidance_enabled: bool,
    pub goal_seeking_enabled: bool,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub obstacle_weight: f32,
    pub goal_weight: f32,
}

impl SteeringSettings {
    /// Replaces weights that are NaN or infinite with the defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let fix = |value: &mut f32, fallback: f32| {
            if !value.is_finite() {
                *value = fallback;
            }
        };
        fix(&mut self.separation_weight, defaults.separation_weight);
        fix(&mut self.alignment_weight, defaults.alignment_weight);
        fix(&mut self.cohesion_weight, defaults.cohesion_weight);
        fix(&mut self.obstacle_weight, defaults.obstacle_weight);
        fix(&mut self.goal_weight, defaults.goal_weight);
        self
    }
}

impl Default for SteeringSettings {
    fn default() -> Self {
        SteeringConfig::default().into()
    }
}

impl From<SteeringSettings> for SteeringConfig {
    fn from(s: SteeringSettings) -> Self {
        Self {
            separation: Rule::new(s.separation_enabled, s.separation_weight),
            alignment: Rule::new(s.alignment_enabled, s.alignment_weight),
            cohesion: Rule::new(s.cohesion_enabled, s.cohesion_weight),
            obstacle_avoidance: Rule::new(s.obstacle_avoidance_enabled, s.obstacle_weight),
            goal_seeking: Rule::new(s.goal_seeking_enabled, s.goal_weight),
        }
    }
}

impl From<SteeringConfig> for SteeringSettings {
    fn from(c: SteeringConfig) -> Self {
        Self {
            separation_enabled: c.separation.enabled,
            alignment_enabled: c.alignment.enabled,
            cohesion_enabled: c.cohesion.enabled,
            obstacle_avoidance_enabled: c.obstacle_avoidance.enabled,
            goal_seeking_enabled: c.goal_seeking.enabled,
            separation_weight: c.separation.weight,
            alignment_weight: c.alignment.weight,
            cohesion_weight: c.cohesion.weight,
            obstacle_weight: c.obstacle_avoidance.weight,
            goal_weight: c.goal_seeking.weight,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgentView {
    pub position: Position,
    /// Radians, derived from the velocity direction
    pub heading: f32,
    pub size: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ObstacleView {
    pub position: Position,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GoalView {
    pub position: Position,
    pub radius: f32,
    pub reached: bool,
}

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub goals_reached: u32,
    pub agents: Vec<AgentView>,
    pub obstacles: Vec<ObstacleView>,
    pub goals: Vec<GoalView>,
}

impl WorldSnapshot {
    pub fn capture(world: &World) -> Self {
        Self {
            tick: world.tick(),
            goals_reached: world.goals_reached(),
            agents: world
                .agents()
                .iter()
                .map(|a| AgentView {
                    position: a.position().into(),
                    heading: a.heading(),
                    size: a.size(),
                })
                .collect(),
            obstacles: world
                .obstacles()
                .iter()
                .map(|o| ObstacleView {
                    position: o.position().into(),
                    radius: o.radius(),
                })
                .collect(),
            goals: world
                .goals()
                .iter()
                .map(|g| GoalView {
                    position: g.position().into(),
                    radius: g.radius(),
                    reached: g.is_reached(),
                })
                .collect(),
        }
    }
}

/// Interaction applied to a world between ticks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// With neither field the entity is fully random; a position alone gets
    /// the default radius.
    AddObstacle {
        #[serde(default)]
        position: Option<Position>,
        #[serde(default)]
        radius: Option<f32>,
    },
    AddGoal {
        #[serde(default)]
        position: Option<Position>,
        #[serde(default)]
        radius: Option<f32>,
    },
    /// Press at `from`, move to `to`, release.
    Drag { from: Position, to: Position },
    UpdateSettings { settings: SteeringSettings },
    Reset { robots: usize },
}

/// A command scheduled to run before the given tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScriptedCommand {
    pub tick: u64,
    #[serde(flatten)]
    pub command: Command,
}

/// Counters shown next to the arena
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub robot_count: usize,
    pub fps: u32,
    pub goals_reached: u32,
    pub tick: u64,
}

/// Frame rate from consecutive frame timestamps in milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct FpsCounter {
    last_frame: Option<f64>,
    fps: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frame and returns the instantaneous rate. The first frame
    /// (or a repeated timestamp) reports 0.
    pub fn frame(&mut self, timestamp_ms: f64) -> u32 {
        let previous = self.last_frame.replace(timestamp_ms);
        self.fps = match previous {
            Some(last) if timestamp_ms > last => libm::round(1000.0 / (timestamp_ms - last)) as u32,
            _ => 0,
        };
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_round_trip_through_config() {
        let settings = SteeringSettings {
            cohesion_enabled: false,
            goal_weight: 4.0,
            ..SteeringSettings::default()
        };
        let config = SteeringConfig::from(settings);
        assert!(!config.cohesion.enabled);
        assert_eq!(config.goal_seeking.weight, 4.0);
        assert_eq!(SteeringSettings::from(config), settings);
    }

    #[test]
    fn test_sanitize_replaces_non_finite() {
        let settings = SteeringSettings {
            separation_weight: f32::NAN,
            obstacle_weight: f32::INFINITY,
            alignment_weight: 0.25,
            ..SteeringSettings::default()
        }
        .sanitized();

        assert_eq!(settings.separation_weight, 1.5);
        assert_eq!(settings.obstacle_weight, 2.0);
        assert_eq!(settings.alignment_weight, 0.25);
    }

    #[test]
    fn test_fps_counter() {
        let mut counter = FpsCounter::new();
        assert_eq!(counter.frame(1000.0), 0);
        assert_eq!(counter.frame(1016.0), 63);
        assert_eq!(counter.frame(1016.0), 0);
        assert_eq!(counter.frame(1049.0), 30);
        assert_eq!(counter.fps(), 30);
    }

    #[test]
    fn test_snapshot_reflects_world() {
        let world = World::new(Default::default(), Default::default()).unwrap();
        let snapshot = WorldSnapshot::capture(&world);

        assert_eq!(snapshot.obstacles.len(), 3);
        assert_eq!(snapshot.goals[1].position, Position::new(800.0 / 6.0, 500.0));
        assert!(snapshot.agents.is_empty());
        assert_eq!(snapshot.goals_reached, 0);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_command_json() {
        let commands: Vec<ScriptedCommand> = serde_json::from_str(
            r#"[
                {"tick": 5, "type": "add_obstacle", "position": {"x": 10.0, "y": 20.0}, "radius": 12.0},
                {"tick": 9, "type": "add_goal"},
                {"tick": 12, "type": "drag", "from": {"x": 200.0, "y": 300.0}, "to": {"x": 250.0, "y": 300.0}},
                {"tick": 20, "type": "update_settings", "settings": {"cohesion_enabled": false}},
                {"tick": 30, "type": "reset", "robots": 10}
            ]"#,
        )
        .unwrap();

        assert_eq!(commands.len(), 5);
        assert_eq!(
            commands[0].command,
            Command::AddObstacle {
                position: Some(Position::new(10.0, 20.0)),
                radius: Some(12.0),
            }
        );
        assert_eq!(
            commands[1].command,
            Command::AddGoal {
                position: None,
                radius: None
            }
        );
        match &commands[3].command {
            Command::UpdateSettings { settings } => {
                assert!(!settings.cohesion_enabled);
                assert!(settings.separation_enabled);
                assert_eq!(settings.separation_weight, 1.5);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(commands[4].command, Command::Reset { robots: 10 });
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_settings_json_uses_snake_case() {
        let json = serde_json::to_value(SteeringSettings::default()).unwrap();
        assert_eq!(json["separation_enabled"], true);
        assert_eq!(json["obstacle_weight"], 2.0);
    }
}
