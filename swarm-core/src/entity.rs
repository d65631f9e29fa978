use crate::config::Arena;
use crate::error::{Result, SwarmError};
use crate::vector::Vector2D;

#[cfg(feature = "std")]
use rand::Rng;

fn check_radius(radius: f32) -> Result<f32> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(SwarmError::InvalidRadius(radius))
    }
}

/// A circular region agents steer away from.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub(crate) position: Vector2D,
    radius: f32,
}

impl Obstacle {
    /// Radius for obstacles placed at a given point without a size.
    pub const DEFAULT_RADIUS: f32 = 20.0;
    /// Radius range for obstacles added without an explicit size.
    pub const RANDOM_RADIUS: core::ops::Range<f32> = 15.0..40.0;

    pub fn new(position: Vector2D, radius: f32) -> Result<Self> {
        Ok(Self {
            position,
            radius: check_radius(radius)?,
        })
    }

    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(rng: &mut R, arena: &Arena) -> Self {
        Self {
            position: arena.random_point(rng),
            radius: rng.gen_range(Self::RANDOM_RADIUS),
        }
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn contains(&self, point: Vector2D) -> bool {
        self.position.distance(&point) <= self.radius
    }
}

/// A circular target agents are drawn towards.
///
/// `reached` only ever flips from `false` to `true`.
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub(crate) position: Vector2D,
    radius: f32,
    reached: bool,
}

impl Goal {
    pub const DEFAULT_RADIUS: f32 = 15.0;
    pub const RANDOM_RADIUS: core::ops::Range<f32> = 10.0..25.0;

    pub fn new(position: Vector2D, radius: f32) -> Result<Self> {
        Ok(Self {
            position,
            radius: check_radius(radius)?,
            reached: false,
        })
    }

    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(rng: &mut R, arena: &Arena) -> Self {
        Self {
            position: arena.random_point(rng),
            radius: rng.gen_range(Self::RANDOM_RADIUS),
            reached: false,
        }
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_reached(&self) -> bool {
        self.reached
    }

    pub fn contains(&self, point: Vector2D) -> bool {
        self.position.distance(&point) <= self.radius
    }

    /// Marks the goal as reached. Returns `true` only on the first call.
    pub(crate) fn mark_reached(&mut self) -> bool {
        !core::mem::replace(&mut self.reached, true)
    }
}

/// Fixed obstacles every world starts with.
pub fn seed_obstacles(arena: &Arena) -> [Obstacle; 3] {
    let (w, h) = (arena.width(), arena.height());
    [
        Obstacle {
            position: Vector2D::new(w / 4.0, h / 2.0),
            radius: 30.0,
        },
        Obstacle {
            position: Vector2D::new(3.0 * w / 4.0, h / 2.0),
            radius: 40.0,
        },
        Obstacle {
            position: Vector2D::new(w / 2.0, h / 4.0),
            radius: 25.0,
        },
    ]
}

/// Fixed goals every world starts with.
pub fn seed_goals(arena: &Arena) -> [Goal; 2] {
    let (w, h) = (arena.width(), arena.height());
    [
        Goal {
            position: Vector2D::new(w / 2.0, h / 2.0),
            radius: 20.0,
            reached: false,
        },
        Goal {
            position: Vector2D::new(w / 6.0, 5.0 * h / 6.0),
            radius: 15.0,
            reached: false,
        },
    ]
}
