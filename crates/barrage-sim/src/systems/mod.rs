//! Per-tick systems that operate on the simulation world.
//!
//! Systems are free functions over `&mut World` plus whatever engine
//! state they need. They do not own state — all state lives in
//! components or in `GameEngine`.

pub mod cleanup;
pub mod detonation;
pub mod effects;
pub mod flight;
pub mod snapshot;
pub mod surface;
