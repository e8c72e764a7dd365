//! Game loop thread — runs the simulation engine at 60Hz and emits snapshots.
//!
//! The engine is created inside this thread because it's cleaner for
//! ownership. Commands arrive via `mpsc` channel. Snapshots go out as one
//! JSON line per tick on the sink and are stored in shared state for
//! synchronous polling.

use std::io::Write;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use barrage_core::constants::TICK_RATE;
use barrage_core::state::GameStateSnapshot;
use barrage_sim::{GameEngine, MatchConfig};

use crate::state::{GameLoopCommand, LoopHandle};

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread, writing snapshot lines to `sink`.
///
/// Returns the handle the host uses to drive it.
pub fn spawn_game_loop<W>(config: MatchConfig, sink: W) -> LoopHandle
where
    W: Write + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>> = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    std::thread::Builder::new()
        .name("barrage-game-loop".into())
        .spawn(move || {
            run_game_loop(config, sink, cmd_rx, &shared);
        })
        .expect("Failed to spawn game loop thread");

    LoopHandle {
        command_tx: cmd_tx,
        latest_snapshot,
    }
}

/// The game loop. Runs until Shutdown command, channel disconnect, or a
/// closed sink.
fn run_game_loop<W: Write>(
    config: MatchConfig,
    mut sink: W,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = GameEngine::new(config);
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick();

        // 3. Emit the snapshot as one JSON line
        if let Ok(json) = serde_json::to_string(&snapshot) {
            if writeln!(sink, "{json}").is_err() {
                return; // reader hung up
            }
        }

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until the next tick boundary
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind — reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}
