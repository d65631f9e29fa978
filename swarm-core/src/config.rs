use crate::error::{Result, SwarmError};
use crate::vector::Vector2D;

#[cfg(feature = "std")]
use rand::Rng;

pub const DEFAULT_WIDTH: f32 = 800.0;
pub const DEFAULT_HEIGHT: f32 = 600.0;
pub const DEFAULT_MAX_SPEED: f32 = 3.0;
pub const DEFAULT_PERCEPTION_RADIUS: f32 = 50.0;
pub const DEFAULT_AGENT_SIZE: f32 = 5.0;

/// The bounded toroidal area agents move in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    width: f32,
    height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(SwarmError::InvalidArena { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Teleports a point that left the arena to the opposite edge, per axis.
    pub fn wrap(&self, mut position: Vector2D) -> Vector2D {
        if position.x > self.width {
            position.x = 0.0;
        } else if position.x < 0.0 {
            position.x = self.width;
        }

        if position.y > self.height {
            position.y = 0.0;
        } else if position.y < 0.0 {
            position.y = self.height;
        }

        position
    }

    pub fn contains(&self, point: Vector2D) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    /// Uniformly random point inside the arena.
    #[cfg(feature = "std")]
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector2D {
        Vector2D::new(rng.gen_range(0.0..self.width), rng.gen_range(0.0..self.height))
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Per-agent constants shared by every agent a world creates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentParams {
    pub max_speed: f32,
    pub perception_radius: f32,
    /// Only used for drawing.
    pub size: f32,
}

impl AgentParams {
    pub fn validate(&self) -> Result<()> {
        if !self.max_speed.is_finite() || self.max_speed < 0.0 {
            return Err(SwarmError::InvalidMaxSpeed(self.max_speed));
        }
        if !self.perception_radius.is_finite() || self.perception_radius < 0.0 {
            return Err(SwarmError::InvalidPerceptionRadius(self.perception_radius));
        }
        if !self.size.is_finite() || self.size < 0.0 {
            return Err(SwarmError::InvalidSize(self.size));
        }
        Ok(())
    }
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            perception_radius: DEFAULT_PERCEPTION_RADIUS,
            size: DEFAULT_AGENT_SIZE,
        }
    }
}

/// Switch and weight for one steering behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub enabled: bool,
    pub weight: f32,
}

impl Rule {
    pub const fn new(enabled: bool, weight: f32) -> Self {
        Self { enabled, weight }
    }

    pub const fn disabled() -> Self {
        Self::new(false, 0.0)
    }

    /// Runs `force` with the weight when enabled, otherwise yields zero.
    pub fn apply(&self, force: impl FnOnce(f32) -> Vector2D) -> Vector2D {
        if self.enabled {
            force(self.weight)
        } else {
            Vector2D::zero()
        }
    }
}

/// Snapshot of behavior switches and weights consumed by one tick.
///
/// Weights are taken as given; callers sanitize user input beforehand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringConfig {
    pub separation: Rule,
    pub alignment: Rule,
    pub cohesion: Rule,
    pub obstacle_avoidance: Rule,
    pub goal_seeking: Rule,
}

impl SteeringConfig {
    /// Every behavior switched off.
    pub const fn none() -> Self {
        Self {
            separation: Rule::disabled(),
            alignment: Rule::disabled(),
            cohesion: Rule::disabled(),
            obstacle_avoidance: Rule::disabled(),
            goal_seeking: Rule::disabled(),
        }
    }
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            separation: Rule::new(true, 1.5),
            alignment: Rule::new(true, 1.0),
            cohesion: Rule::new(true, 1.0),
            obstacle_avoidance: Rule::new(true, 2.0),
            goal_seeking: Rule::new(true, 1.0),
        }
    }
}
