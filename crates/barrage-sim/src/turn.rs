//! Turn state — whose shot it is and what they are doing with it.
//!
//! Lives in `GameEngine`, NOT as ECS entities: there is exactly one of it
//! and every system reads it.

use barrage_core::constants::POWER_MAX;
use barrage_core::enums::{Team, TurnPhase};

/// A seat in the turn rotation. Order is fixed at round start
/// (alternating teams); dead players keep their seat but are skipped.
#[derive(Debug, Clone, Copy)]
pub struct PlayerSlot {
    pub entity: hecs::Entity,
    pub team: Team,
}

/// The turn machine's mutable state.
#[derive(Debug, Clone)]
pub struct TurnState {
    /// Index into the roster. Always a living player except while Locked.
    pub current: usize,
    pub phase: TurnPhase,
    /// Charge level, oscillating in [0, 100] while Charging.
    pub power: f64,
    /// Direction of the power oscillation.
    pub rising: bool,
    /// Horizontal acceleration applied to projectiles every tick.
    /// Constant for the whole turn; redrawn on a fixed turn cadence.
    pub wind: f64,
    /// Turns since the last wind redraw.
    pub wind_change_counter: u32,
    pub turn_count: u32,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            current: 0,
            phase: TurnPhase::Aiming,
            power: 0.0,
            rising: true,
            wind: 0.0,
            wind_change_counter: 0,
            turn_count: 0,
        }
    }
}

impl TurnState {
    /// Input suppression window: from the shot until the turn advances.
    pub fn locked(&self) -> bool {
        self.phase == TurnPhase::Locked
    }

    /// Step the power oscillation one notch, bouncing at the rails.
    pub fn step_power(&mut self, step: f64) {
        if self.rising {
            self.power += step;
            if self.power >= POWER_MAX {
                self.power = POWER_MAX;
                self.rising = false;
            }
        } else {
            self.power -= step;
            if self.power <= 0.0 {
                self.power = 0.0;
                self.rising = true;
            }
        }
    }
}
