use alloc::vec::Vec;

use crate::agent::{Agent, Steering};
use crate::config::{AgentParams, Arena, SteeringConfig};
use crate::drag::{self, Drag, EntityRef};
use crate::entity::{self, Goal, Obstacle};
use crate::error::{Result, SwarmError};
use crate::vector::Vector2D;

#[cfg(feature = "std")]
use rand::Rng;

/// What happened during one call to [`World::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub tick: u64,
    /// Goals flipped to reached during this tick.
    pub newly_reached: u32,
    pub goals_reached: u32,
}

/// All agents except the one at `skip`.
fn neighbors(agents: &[Agent], skip: usize) -> impl Iterator<Item = &Agent> + Clone {
    agents
        .iter()
        .enumerate()
        .filter(move |(index, _)| *index != skip)
        .map(|(_, agent)| agent)
}

/// The swarm, its obstacles and goals, and the goals-reached counter.
///
/// Agents are fixed once the world is built; obstacles and goals only grow.
/// Outside of [`World::update`] the only mutations are [`World::reposition`]
/// (and the drag helpers built on it), [`World::add_obstacle`] and
/// [`World::add_goal`].
#[derive(Debug, Clone)]
pub struct World {
    arena: Arena,
    params: AgentParams,
    agents: Vec<Agent>,
    obstacles: Vec<Obstacle>,
    goals: Vec<Goal>,
    goals_reached: u32,
    tick: u64,
    drag: Option<Drag>,
}

impl World {
    /// A world with no agents, obstacles or goals.
    pub fn empty(arena: Arena, params: AgentParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            arena,
            params,
            agents: Vec::new(),
            obstacles: Vec::new(),
            goals: Vec::new(),
            goals_reached: 0,
            tick: 0,
            drag: None,
        })
    }

    /// A world with the fixed starting obstacles and goals, and no agents.
    pub fn new(arena: Arena, params: AgentParams) -> Result<Self> {
        let mut world = Self::empty(arena, params)?;
        world.restore_seed_layout();
        Ok(world)
    }

    /// Seed layout plus `count` randomly placed agents.
    #[cfg(feature = "std")]
    pub fn initialize<R: Rng + ?Sized>(
        arena: Arena,
        params: AgentParams,
        count: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let mut world = Self::new(arena, params)?;
        world.spawn_agents(count, rng)?;
        log::info!(
            "world initialized: {} agents in {}x{}",
            count,
            arena.width(),
            arena.height()
        );
        Ok(world)
    }

    /// Rebuilds the world from scratch, as on first initialization.
    #[cfg(feature = "std")]
    pub fn reset<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Result<()> {
        self.agents.clear();
        self.restore_seed_layout();
        self.goals_reached = 0;
        self.tick = 0;
        self.drag = None;
        self.spawn_agents(count, rng)?;
        log::info!("world reset with {} agents", count);
        Ok(())
    }

    pub fn with_agents(mut self, agents: impl IntoIterator<Item = Agent>) -> Self {
        self.agents.extend(agents);
        self
    }

    pub fn with_obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goals.push(goal);
        self
    }

    fn restore_seed_layout(&mut self) {
        self.obstacles.clear();
        self.obstacles.extend(entity::seed_obstacles(&self.arena));
        self.goals.clear();
        self.goals.extend(entity::seed_goals(&self.arena));
    }

    #[cfg(feature = "std")]
    fn spawn_agents<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Result<()> {
        self.agents.reserve(count);
        for _ in 0..count {
            self.agents.push(Agent::random(rng, &self.arena, &self.params)?);
        }
        Ok(())
    }

    /// Advances the simulation by one tick.
    ///
    /// Every agent's steering is computed from the same snapshot of the swarm
    /// before any agent moves; each agent then goes through
    /// [`Agent::apply_steering`], the same path as [`Agent::apply_behaviors`].
    pub fn update(&mut self, config: &SteeringConfig) -> TickSummary {
        let steering: Vec<Steering> = self
            .agents
            .iter()
            .enumerate()
            .map(|(index, agent)| {
                agent.steering(
                    neighbors(&self.agents, index),
                    &self.obstacles,
                    &self.goals,
                    config,
                )
            })
            .collect();

        let mut newly_reached = 0;
        for (agent, steer) in self.agents.iter_mut().zip(steering) {
            if !agent.apply_steering(steer, &mut self.goals) {
                continue;
            }
            newly_reached += 1;
            self.goals_reached += 1;
            if let Some(goal) = steer.entered_goal.and_then(|index| self.goals.get(index)) {
                log::info!(
                    "goal reached at ({:.1}, {:.1}), {} total",
                    goal.position.x,
                    goal.position.y,
                    self.goals_reached
                );
            }
        }

        for agent in self.agents.iter_mut() {
            agent.update(&self.arena);
        }

        self.tick += 1;
        log::trace!("tick {} integrated {} agents", self.tick, self.agents.len());

        TickSummary {
            tick: self.tick,
            newly_reached,
            goals_reached: self.goals_reached,
        }
    }

    pub fn add_obstacle(&mut self, position: Vector2D, radius: f32) -> Result<usize> {
        self.obstacles.push(Obstacle::new(position, radius)?);
        log::debug!("obstacle added at ({:.1}, {:.1}) r={:.1}", position.x, position.y, radius);
        Ok(self.obstacles.len() - 1)
    }

    pub fn add_goal(&mut self, position: Vector2D, radius: f32) -> Result<usize> {
        self.goals.push(Goal::new(position, radius)?);
        log::debug!("goal added at ({:.1}, {:.1}) r={:.1}", position.x, position.y, radius);
        Ok(self.goals.len() - 1)
    }

    #[cfg(feature = "std")]
    pub fn add_random_obstacle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let obstacle = Obstacle::random(rng, &self.arena);
        log::debug!("random obstacle r={:.1}", obstacle.radius());
        self.obstacles.push(obstacle);
        self.obstacles.len() - 1
    }

    #[cfg(feature = "std")]
    pub fn add_random_goal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let goal = Goal::random(rng, &self.arena);
        log::debug!("random goal r={:.1}", goal.radius());
        self.goals.push(goal);
        self.goals.len() - 1
    }

    /// Moves an obstacle or goal to `position`.
    pub fn reposition(&mut self, target: EntityRef, position: Vector2D) -> Result<()> {
        let slot = match target {
            EntityRef::Obstacle(index) => self.obstacles.get_mut(index).map(|o| &mut o.position),
            EntityRef::Goal(index) => self.goals.get_mut(index).map(|g| &mut g.position),
        };
        let slot = slot.ok_or(SwarmError::UnknownEntity {
            kind: target.kind(),
            index: target.index(),
        })?;
        *slot = position;
        Ok(())
    }

    /// Grabs whatever lies under `point`, replacing any drag in progress.
    pub fn begin_drag(&mut self, point: Vector2D) -> Option<EntityRef> {
        self.drag = drag::hit_test(&self.obstacles, &self.goals, point);
        if let Some(drag) = self.drag {
            log::debug!("dragging {} {}", drag.target.kind(), drag.target.index());
        }
        self.drag.map(|drag| drag.target)
    }

    /// Moves the dragged entity so it follows the pointer. Returns `false`
    /// when nothing is being dragged.
    pub fn drag_to(&mut self, point: Vector2D) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        self.reposition(drag.target, drag.target_position(point)).is_ok()
    }

    pub fn end_drag(&mut self) -> Option<EntityRef> {
        let released = self.drag.take().map(|drag| drag.target);
        if let Some(target) = released {
            log::debug!("released {} {}", target.kind(), target.index());
        }
        released
    }

    pub fn dragging(&self) -> Option<EntityRef> {
        self.drag.map(|drag| drag.target)
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn params(&self) -> &AgentParams {
        &self.params
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn goals_reached(&self) -> u32 {
        self.goals_reached
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}
