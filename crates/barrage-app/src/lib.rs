//! BARRAGE host application.
//!
//! Wires the simulation crates into a headless stdio host: newline-
//! delimited JSON `PlayerCommand`s in, one `GameStateSnapshot` JSON line
//! out per tick. Any frontend (or a test harness) drives the game by
//! speaking that protocol.

pub mod game_loop;
pub mod state;

pub use barrage_core as core;
