use crate::entity::{Goal, Obstacle};
use crate::vector::Vector2D;

/// Handle to an obstacle or goal inside a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Obstacle(usize),
    Goal(usize),
}

impl EntityRef {
    pub fn kind(&self) -> &'static str {
        match self {
            EntityRef::Obstacle(_) => "obstacle",
            EntityRef::Goal(_) => "goal",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            EntityRef::Obstacle(index) | EntityRef::Goal(index) => *index,
        }
    }
}

/// An in-progress pointer drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub target: EntityRef,
    /// Pointer position relative to the target's center when grabbed.
    pub offset: Vector2D,
}

impl Drag {
    /// Where the target's center goes when the pointer is at `point`.
    pub fn target_position(&self, point: Vector2D) -> Vector2D {
        point - self.offset
    }
}

/// Finds what is under `point`. Obstacles take precedence over goals, then
/// the lowest index.
pub fn hit_test(obstacles: &[Obstacle], goals: &[Goal], point: Vector2D) -> Option<Drag> {
    let obstacle = obstacles
        .iter()
        .position(|o| o.contains(point))
        .map(|i| (EntityRef::Obstacle(i), obstacles[i].position()));

    let hit = obstacle.or_else(|| {
        goals
            .iter()
            .position(|g| g.contains(point))
            .map(|i| (EntityRef::Goal(i), goals[i].position()))
    });

    hit.map(|(target, center)| Drag {
        target,
        offset: point - center,
    })
}
