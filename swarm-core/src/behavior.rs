//! The five steering behaviors.
//!
//! Each function maps an agent and what it can perceive to a weighted force.
//! None of them mutate anything; goal seeking reports which goal was entered
//! and leaves flipping the flag to the caller.

use crate::agent::Agent;
use crate::entity::{Goal, Obstacle};
use crate::vector::Vector2D;

/// Distances below this are clamped when scaling obstacle repulsion.
pub const MIN_OBSTACLE_DISTANCE: f32 = 0.1;

/// Result of [`seek_goal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalSeek {
    pub force: Vector2D,
    /// Index of an unreached goal whose radius the agent is inside.
    pub entered: Option<usize>,
}

impl GoalSeek {
    pub const NONE: Self = Self {
        force: Vector2D::ZERO,
        entered: None,
    };
}

/// Desired velocity along `direction` at full speed, minus the current velocity.
fn steer_towards(agent: &Agent, direction: Vector2D) -> Vector2D {
    direction.normalize() * agent.max_speed - agent.velocity
}

/// Pushes away from neighbors within the perception radius.
///
/// Each neighbor adds `(self - other) / distance` before averaging, so the
/// sum is not renormalized per neighbor. Coincident neighbors are skipped.
pub fn separation<'a, I>(agent: &Agent, others: I, weight: f32) -> Vector2D
where
    I: Iterator<Item = &'a Agent>,
{
    let mut steering = Vector2D::zero();
    let mut count = 0u32;

    for other in others {
        let distance = agent.position.distance(&other.position);
        if distance > 0.0 && distance < agent.perception_radius {
            steering += (agent.position - other.position) / distance;
            count += 1;
        }
    }

    if count > 0 {
        steering = steering / count as f32;
        if steering.magnitude() > 0.0 {
            steering = steer_towards(agent, steering);
        }
    }

    steering * weight
}

/// Matches the average heading of neighbors within the perception radius.
pub fn alignment<'a, I>(agent: &Agent, others: I, weight: f32) -> Vector2D
where
    I: Iterator<Item = &'a Agent>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0u32;

    for other in others {
        if agent.position.distance(&other.position) < agent.perception_radius {
            sum += other.velocity;
            count += 1;
        }
    }

    if count == 0 {
        return Vector2D::zero();
    }

    let average = sum / count as f32;
    if average.magnitude() > 0.0 {
        steer_towards(agent, average) * weight
    } else {
        Vector2D::zero()
    }
}

/// Steers towards the center of mass of neighbors within the perception radius.
pub fn cohesion<'a, I>(agent: &Agent, others: I, weight: f32) -> Vector2D
where
    I: Iterator<Item = &'a Agent>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0u32;

    for other in others {
        if agent.position.distance(&other.position) < agent.perception_radius {
            sum += other.position;
            count += 1;
        }
    }

    if count == 0 {
        return Vector2D::zero();
    }

    let center = sum / count as f32;
    steer_towards(agent, center - agent.position) * weight
}

/// Sums repulsion from every obstacle whose edge is within the perception radius.
///
/// Magnitude per obstacle is `(perception / max(0.1, distance))^2`.
pub fn avoid_obstacles(agent: &Agent, obstacles: &[Obstacle], weight: f32) -> Vector2D {
    let mut steering = Vector2D::zero();

    for obstacle in obstacles {
        let distance = agent.position.distance(&obstacle.position);
        if distance < agent.perception_radius + obstacle.radius() {
            let away = (agent.position - obstacle.position).normalize();
            let factor = agent.perception_radius / distance.max(MIN_OBSTACLE_DISTANCE);
            steering += away * (factor * factor);
        }
    }

    steering * weight
}

/// Steers towards the nearest goal in range.
///
/// On exactly equal distances the goal with the lowest index wins.
pub fn seek_goal(agent: &Agent, goals: &[Goal], weight: f32) -> GoalSeek {
    let mut closest: Option<(usize, f32)> = None;

    for (index, goal) in goals.iter().enumerate() {
        let distance = agent.position.distance(&goal.position);
        let nearer = closest.map_or(true, |(_, best)| distance < best);
        if distance < agent.perception_radius + goal.radius() && nearer {
            closest = Some((index, distance));
        }
    }

    let Some((index, distance)) = closest else {
        return GoalSeek::NONE;
    };

    let goal = &goals[index];
    let entered = (distance < goal.radius() && !goal.is_reached()).then_some(index);
    let force = steer_towards(agent, goal.position - agent.position) * weight;

    GoalSeek { force, entered }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentParams;

    fn agent(x: f32, y: f32) -> Agent {
        Agent::new(Vector2D::new(x, y), Vector2D::zero(), &AgentParams::default()).unwrap()
    }

    fn moving(x: f32, y: f32, vx: f32, vy: f32) -> Agent {
        Agent::new(Vector2D::new(x, y), Vector2D::new(vx, vy), &AgentParams::default()).unwrap()
    }

    fn approx(a: Vector2D, b: Vector2D) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn test_separation_points_away() {
        let a = agent(100.0, 100.0);
        let b = agent(110.0, 100.0);

        let on_a = separation(&a, [&b].into_iter(), 1.0);
        let on_b = separation(&b, [&a].into_iter(), 1.0);

        assert!(approx(on_a, Vector2D::new(-3.0, 0.0)), "{:?}", on_a);
        assert!(approx(on_b, Vector2D::new(3.0, 0.0)), "{:?}", on_b);
    }

    #[test]
    fn test_separation_ignores_far_and_coincident() {
        let a = agent(100.0, 100.0);
        let far = agent(200.0, 100.0);
        let same = agent(100.0, 100.0);

        assert_eq!(separation(&a, [&far, &same].into_iter(), 1.0), Vector2D::zero());
    }

    #[test]
    fn test_separation_non_increasing_with_distance() {
        let a = moving(100.0, 100.0, 0.5, 0.2);
        let mut previous = f32::INFINITY;
        for d in [1.0, 5.0, 10.0, 25.0, 49.0] {
            let other = agent(100.0 + d, 100.0);
            let magnitude = separation(&a, [&other].into_iter(), 1.0).magnitude();
            assert!(magnitude <= previous + 1e-5, "d = {}", d);
            previous = magnitude;
        }
    }

    #[test]
    fn test_separation_symmetric_neighbors_cancel() {
        let a = moving(100.0, 100.0, 1.0, 0.0);
        let left = agent(90.0, 100.0);
        let right = agent(110.0, 100.0);

        // Averaged push is zero, so no velocity correction is applied either.
        assert_eq!(separation(&a, [&left, &right].into_iter(), 1.0), Vector2D::zero());
    }

    #[test]
    fn test_alignment_matches_neighbor_heading() {
        let a = moving(100.0, 100.0, 1.0, 0.0);
        let b = moving(120.0, 100.0, 0.0, 2.0);

        let force = alignment(&a, [&b].into_iter(), 2.0);
        assert!(approx(force, Vector2D::new(-2.0, 6.0)), "{:?}", force);
    }

    #[test]
    fn test_alignment_without_neighbors_is_zero() {
        let a = moving(100.0, 100.0, 1.0, 0.0);
        let far = moving(300.0, 100.0, 0.0, 2.0);
        assert_eq!(alignment(&a, [&far].into_iter(), 1.0), Vector2D::zero());
        assert_eq!(alignment(&a, core::iter::empty(), 1.0), Vector2D::zero());
    }

    #[test]
    fn test_cohesion_steers_to_center() {
        let a = agent(100.0, 100.0);
        let b = agent(100.0, 120.0);
        let c = agent(100.0, 140.0);

        let force = cohesion(&a, [&b, &c].into_iter(), 1.0);
        assert!(approx(force, Vector2D::new(0.0, 3.0)), "{:?}", force);
        assert_eq!(cohesion(&a, core::iter::empty(), 1.0), Vector2D::zero());
    }

    #[test]
    fn test_avoid_obstacles_inverse_square() {
        let a = agent(100.0, 100.0);
        let near = [Obstacle::new(Vector2D::new(125.0, 100.0), 10.0).unwrap()];
        let nearer = [Obstacle::new(Vector2D::new(110.0, 100.0), 10.0).unwrap()];

        let f_near = avoid_obstacles(&a, &near, 1.0);
        let f_nearer = avoid_obstacles(&a, &nearer, 1.0);

        assert!(approx(f_near, Vector2D::new(-4.0, 0.0)), "{:?}", f_near);
        assert!(approx(f_nearer, Vector2D::new(-25.0, 0.0)), "{:?}", f_nearer);
    }

    #[test]
    fn test_avoid_obstacles_sums_and_ignores_far() {
        let a = agent(100.0, 100.0);
        let obstacles = [
            Obstacle::new(Vector2D::new(125.0, 100.0), 10.0).unwrap(),
            Obstacle::new(Vector2D::new(100.0, 125.0), 10.0).unwrap(),
            Obstacle::new(Vector2D::new(400.0, 400.0), 30.0).unwrap(),
        ];

        let force = avoid_obstacles(&a, &obstacles, 0.5);
        assert!(approx(force, Vector2D::new(-2.0, -2.0)), "{:?}", force);
        assert_eq!(avoid_obstacles(&a, &obstacles[2..], 1.0), Vector2D::zero());
    }

    #[test]
    fn test_avoid_obstacle_at_center_is_finite() {
        let a = agent(100.0, 100.0);
        let obstacles = [Obstacle::new(Vector2D::new(100.0, 100.0), 10.0).unwrap()];
        let force = avoid_obstacles(&a, &obstacles, 1.0);
        assert_eq!(force, Vector2D::zero());
    }

    #[test]
    fn test_seek_goal_turns_towards_goal() {
        let a = moving(100.0, 100.0, 1.0, 0.0);
        let goals = [Goal::new(Vector2D::new(110.0, 100.0), 5.0).unwrap()];

        let seek = seek_goal(&a, &goals, 1.0);
        assert!(approx(seek.force, Vector2D::new(2.0, 0.0)), "{:?}", seek.force);
        assert_eq!(seek.entered, None);
    }

    #[test]
    fn test_seek_goal_picks_nearest_lowest_index_on_tie() {
        let a = agent(100.0, 100.0);
        let goals = [
            Goal::new(Vector2D::new(130.0, 100.0), 5.0).unwrap(),
            Goal::new(Vector2D::new(100.0, 120.0), 5.0).unwrap(),
            Goal::new(Vector2D::new(80.0, 100.0), 5.0).unwrap(),
        ];

        let seek = seek_goal(&a, &goals, 1.0);
        assert!(approx(seek.force, Vector2D::new(0.0, 3.0)), "{:?}", seek.force);
    }

    #[test]
    fn test_seek_goal_reports_entry_once() {
        let a = agent(100.0, 100.0);
        let mut goals = [Goal::new(Vector2D::new(103.0, 100.0), 5.0).unwrap()];

        assert_eq!(seek_goal(&a, &goals, 1.0).entered, Some(0));

        goals[0].mark_reached();
        let seek = seek_goal(&a, &goals, 1.0);
        assert_eq!(seek.entered, None);
        assert!(approx(seek.force, Vector2D::new(3.0, 0.0)));
    }

    #[test]
    fn test_seek_goal_out_of_range() {
        let a = agent(100.0, 100.0);
        let goals = [Goal::new(Vector2D::new(300.0, 300.0), 15.0).unwrap()];
        assert_eq!(seek_goal(&a, &goals, 1.0), GoalSeek::NONE);
        assert_eq!(seek_goal(&a, &[], 1.0), GoalSeek::NONE);
    }
}
