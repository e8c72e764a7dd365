//! Headless BARRAGE host: JSON commands on stdin, JSON snapshots on stdout.
//!
//! One `PlayerCommand` per input line; malformed lines are reported on
//! stderr and skipped. The loop thread owns stdout; EOF on stdin shuts
//! the game down.

use std::io::BufRead;

use barrage_app::game_loop::spawn_game_loop;
use barrage_app::state::GameLoopCommand;
use barrage_core::commands::PlayerCommand;
use barrage_sim::MatchConfig;

fn main() {
    let config = match std::env::args().nth(1) {
        // Optional seed argument for reproducible matches.
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => MatchConfig {
                seed,
                ..MatchConfig::default()
            },
            Err(_) => {
                eprintln!("usage: barrage-app [seed]");
                std::process::exit(2);
            }
        },
        None => MatchConfig::default(),
    };

    let handle = spawn_game_loop(config, std::io::stdout());

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<PlayerCommand>(&line) {
            Ok(cmd) => {
                if handle
                    .command_tx
                    .send(GameLoopCommand::PlayerCommand(cmd))
                    .is_err()
                {
                    break; // loop thread is gone
                }
            }
            Err(err) => eprintln!("bad command line: {err}"),
        }
    }

    let _ = handle.command_tx.send(GameLoopCommand::Shutdown);
}
