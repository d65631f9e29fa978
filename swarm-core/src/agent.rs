use crate::behavior::{self, GoalSeek};
use crate::config::{AgentParams, Arena, SteeringConfig};
use crate::entity::{Goal, Obstacle};
use crate::error::Result;
use crate::vector::Vector2D;

#[cfg(feature = "std")]
use rand::Rng;

/// Combined output of all five behaviors for one agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    pub force: Vector2D,
    /// Goal the agent entered this tick, if it was not reached before.
    pub entered_goal: Option<usize>,
}

/// A single robot in the swarm.
///
/// Only the agent itself mutates its kinematic state, through
/// [`Agent::apply_force`], [`Agent::apply_behaviors`] (or its second half,
/// [`Agent::apply_steering`]) and [`Agent::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub(crate) position: Vector2D,
    pub(crate) velocity: Vector2D,
    pub(crate) acceleration: Vector2D,
    pub(crate) max_speed: f32,
    pub(crate) perception_radius: f32,
    size: f32,
}

impl Agent {
    pub fn new(position: Vector2D, velocity: Vector2D, params: &AgentParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            position,
            velocity,
            acceleration: Vector2D::zero(),
            max_speed: params.max_speed,
            perception_radius: params.perception_radius,
            size: params.size,
        })
    }

    /// Random position in the arena, random heading, speed in `[0.5, 1.5)`.
    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(rng: &mut R, arena: &Arena, params: &AgentParams) -> Result<Self> {
        let position = arena.random_point(rng);
        let angle = rng.gen_range(0.0..core::f32::consts::TAU);
        let speed = rng.gen_range(0.5..1.5);
        let velocity = Vector2D::new(angle.cos(), angle.sin()) * speed;
        Self::new(position, velocity, params)
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn velocity(&self) -> Vector2D {
        self.velocity
    }

    pub fn acceleration(&self) -> Vector2D {
        self.acceleration
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn perception_radius(&self) -> f32 {
        self.perception_radius
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Direction of travel in radians.
    pub fn heading(&self) -> f32 {
        self.velocity.heading()
    }

    pub fn apply_force(&mut self, force: Vector2D) {
        self.acceleration += force;
    }

    /// Computes the combined steering force without touching any state.
    ///
    /// `others` must not contain this agent.
    pub fn steering<'a, I>(
        &self,
        others: I,
        obstacles: &[Obstacle],
        goals: &[Goal],
        config: &SteeringConfig,
    ) -> Steering
    where
        I: Iterator<Item = &'a Agent> + Clone,
    {
        let separation = config
            .separation
            .apply(|w| behavior::separation(self, others.clone(), w));
        let alignment = config
            .alignment
            .apply(|w| behavior::alignment(self, others.clone(), w));
        let cohesion = config
            .cohesion
            .apply(|w| behavior::cohesion(self, others, w));
        let avoidance = config
            .obstacle_avoidance
            .apply(|w| behavior::avoid_obstacles(self, obstacles, w));

        let seek = if config.goal_seeking.enabled {
            behavior::seek_goal(self, goals, config.goal_seeking.weight)
        } else {
            GoalSeek::NONE
        };

        Steering {
            force: separation + alignment + cohesion + avoidance + seek.force,
            entered_goal: seek.entered,
        }
    }

    /// Adds the combined steering force to the acceleration and marks any
    /// goal entered for the first time. Returns how many goals flipped.
    pub fn apply_behaviors<'a, I>(
        &mut self,
        others: I,
        obstacles: &[Obstacle],
        goals: &mut [Goal],
        config: &SteeringConfig,
    ) -> u32
    where
        I: Iterator<Item = &'a Agent> + Clone,
    {
        let steering = self.steering(others, obstacles, goals, config);
        u32::from(self.apply_steering(steering, goals))
    }

    /// Second half of [`Agent::apply_behaviors`], for callers that computed
    /// `steering` earlier. Returns `true` if the entered goal just flipped.
    pub fn apply_steering(&mut self, steering: Steering, goals: &mut [Goal]) -> bool {
        self.apply_force(steering.force);
        steering
            .entered_goal
            .and_then(|index| goals.get_mut(index))
            .map_or(false, Goal::mark_reached)
    }

    /// Integrates one step: velocity, speed limit, position, wrap-around.
    pub fn update(&mut self, arena: &Arena) {
        self.velocity += self.acceleration;
        self.velocity = self.velocity.limit(self.max_speed);
        self.position += self.velocity;
        self.acceleration = Vector2D::zero();
        self.position = arena.wrap(self.position);
    }
}
