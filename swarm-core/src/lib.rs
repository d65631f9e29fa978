#![cfg_attr(not(feature = "std"), no_std)]

//! Steering-behavior engine for a swarm of robots in a wrap-around arena.
//!
//! A [`World`] owns agents, obstacles and goals. Each call to
//! [`World::update`] combines separation, alignment, cohesion, obstacle
//! avoidance and goal seeking into one acceleration per agent, then moves
//! every agent.

extern crate alloc;

pub mod agent;
pub mod behavior;
pub mod config;
pub mod drag;
pub mod entity;
pub mod error;
pub mod vector;
pub mod world;

pub use agent::{Agent, Steering};
pub use behavior::GoalSeek;
pub use config::{AgentParams, Arena, Rule, SteeringConfig};
pub use drag::{Drag, EntityRef};
pub use entity::{Goal, Obstacle};
pub use error::{Result, SwarmError};
pub use vector::Vector2D;
pub use world::{TickSummary, World};
