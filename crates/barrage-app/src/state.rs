//! State shared between the stdin reader and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use barrage_core::commands::PlayerCommand;
use barrage_core::state::GameStateSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handle to a running game loop.
///
/// `Sender` is Send but not Sync, so hosts that share the handle across
/// threads wrap `command_tx` themselves; the snapshot side is already
/// `Arc<Mutex<...>>` because the loop thread writes it every tick.
pub struct LoopHandle {
    /// Channel sender to forward commands to the game loop thread.
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    /// Latest snapshot for synchronous polling.
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::SkipTurn))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Move {
            dx: -5.0,
        }))
        .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::SkipTurn)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Move { .. })
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }
}
