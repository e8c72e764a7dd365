//! Simulation engine for BARRAGE.
//!
//! Owns the hecs ECS world and the height field, runs systems at a fixed
//! tick rate, and produces GameStateSnapshots for the frontend.

pub mod config;
pub mod engine;
pub mod schedule;
pub mod systems;
pub mod turn;
pub mod world_setup;

pub use barrage_core as core;
pub use config::{MatchConfig, RuleSet};
pub use engine::GameEngine;

#[cfg(test)]
mod tests;
