//! Headless driver for the swarm simulation: frame loop, scripted
//! interactions and JSON-lines snapshot output.

pub mod runner;
pub mod script;
pub mod settings;

pub use runner::{RunOptions, RunSummary, Simulation};
pub use script::Script;
pub use settings::load_settings;
