#[cfg(test)]
mod tests {
    use barrage_core::commands::PlayerCommand;
    use barrage_core::components::{Obstacle, ObstacleBody};
    use barrage_core::enums::{MatchPhase, Team, TerrainPreset, TurnPhase};
    use barrage_core::state::GameStateSnapshot;

    use crate::config::{MatchConfig, RuleSet};
    use crate::engine::GameEngine;

    /// Rules with every random scatter disabled and the wind pinned to
    /// zero, so projectile trajectories are exactly reproducible.
    fn quiet_rules() -> RuleSet {
        RuleSet {
            max_platforms: 0,
            max_ground_obstacles: 0,
            wind_max: 0.0,
            ..RuleSet::default()
        }
    }

    /// Engine mid-round on flat ground: Red tanks on the left at
    /// x = 80 + 60i, Blue mirrored on the right, all at y = 535.
    fn start_flat(players_per_team: usize) -> GameEngine {
        let mut engine = GameEngine::new(MatchConfig {
            seed: 7,
            rules: quiet_rules(),
        });
        engine.queue_command(PlayerCommand::StartMatch {
            players_per_team,
            preset: Some(TerrainPreset::Flat),
        });
        engine.tick();
        engine
    }

    fn run_ticks(engine: &mut GameEngine, n: usize) -> GameStateSnapshot {
        let mut last = engine.tick();
        for _ in 1..n {
            last = engine.tick();
        }
        last
    }

    #[test]
    fn test_start_match_builds_round() {
        let mut engine = start_flat(2);
        let snap = engine.tick();

        assert_eq!(snap.phase, MatchPhase::Active);
        assert_eq!(snap.tanks.len(), 4);
        // Roster alternates teams so the sides trade shots.
        let names: Vec<&str> = snap.tanks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Red 1", "Blue 1", "Red 2", "Blue 2"]);
        assert_eq!(snap.turn.player_name, "Red 1");
        assert_eq!(snap.turn.team, Team::Red);
        assert_eq!(snap.turn.phase, TurnPhase::Aiming);
        // Flat preset: every tank rests at terrain minus the hull offset.
        for tank in &snap.tanks {
            assert!((tank.position.y - 535.0).abs() < 1e-9);
        }
        assert!(!snap.terrain.is_empty());
        assert!(snap.terrain.iter().all(|p| (p.y - 550.0).abs() < 1e-9));
    }

    #[test]
    fn test_commands_ignored_before_start() {
        let mut engine = GameEngine::new(MatchConfig::default());
        engine.queue_command(PlayerCommand::Move { dx: 50.0 });
        engine.queue_command(PlayerCommand::StartCharging);
        let snap = engine.tick();
        assert_eq!(snap.phase, MatchPhase::Menu);
        assert!(snap.tanks.is_empty());
    }

    #[test]
    fn test_movement_budget_rejects_overdraw() {
        let mut engine = start_flat(1);
        engine.queue_commands([
            PlayerCommand::Move { dx: 100.0 }, // 80 -> 180, budget 100/150
            PlayerCommand::Move { dx: 100.0 }, // would overdraw, rejected whole
            PlayerCommand::Move { dx: 50.0 },  // 180 -> 230, budget exhausted
        ]);
        let snap = engine.tick();
        assert!((snap.tanks[0].position.x - 230.0).abs() < 1e-9);
        assert_eq!(snap.turn.movement_remaining, 0.0);
    }

    #[test]
    fn test_movement_clamped_at_world_edge() {
        let mut engine = start_flat(1);
        engine.queue_command(PlayerCommand::Move { dx: -500.0 });
        let snap = engine.tick();
        // Clamped to the edge margin; only the applied distance is spent.
        assert!((snap.tanks[0].position.x - 25.0).abs() < 1e-9);
        assert!((snap.turn.movement_remaining - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_barrel_angle_clamped() {
        let mut engine = start_flat(1);
        engine.queue_command(PlayerCommand::AdjustAngle { delta: 400.0 });
        let snap = engine.tick();
        assert_eq!(snap.turn.angle_deg, 180.0);

        engine.queue_command(PlayerCommand::AdjustAngle { delta: -400.0 });
        let snap = engine.tick();
        assert_eq!(snap.turn.angle_deg, 0.0);
    }

    #[test]
    fn test_charging_ramps_power_on_tick_cadence() {
        let mut engine = start_flat(1);
        engine.queue_command(PlayerCommand::StartCharging);
        // Step 2 every 2 ticks: 51 ticks after the command lands = 50.
        let snap = run_ticks(&mut engine, 51);
        assert_eq!(snap.turn.phase, TurnPhase::Charging);
        assert_eq!(snap.turn.power, 50.0);
    }

    #[test]
    fn test_zero_power_release_fires_nothing() {
        let mut engine = start_flat(1);
        engine.queue_commands([PlayerCommand::StartCharging, PlayerCommand::StopCharging]);
        let snap = engine.tick();
        assert!(snap.projectiles.is_empty());
        assert_eq!(snap.turn.phase, TurnPhase::Aiming);
        assert_eq!(snap.turn.current_index, 0, "no shot, no turn change");
    }

    #[test]
    fn test_release_fires_and_locks_input() {
        let mut engine = start_flat(1);
        engine.set_angle(0, 45.0);
        engine.set_power(50.0);
        engine.force_shot();

        let snap = engine.tick();
        assert_eq!(snap.projectiles.len(), 1);
        assert_eq!(snap.turn.phase, TurnPhase::Locked);
        assert_eq!(snap.turn.power, 0.0);

        // Locked turn swallows movement and aim commands.
        let x_before = snap.tanks[0].position.x;
        engine.queue_commands([
            PlayerCommand::Move { dx: 50.0 },
            PlayerCommand::AdjustAngle { delta: -10.0 },
        ]);
        let snap = engine.tick();
        assert_eq!(snap.tanks[0].position.x, x_before);
        assert_eq!(snap.turn.angle_deg, 45.0);
    }

    /// A 45-degree lob on flat ground must come down, crater the
    /// terrain, and hand the turn to the other side.
    #[test]
    fn test_shot_craters_terrain_and_advances_turn() {
        let mut engine = start_flat(1);
        engine.set_tank_x(0, 100.0);
        engine.set_angle(0, 45.0);
        engine.set_power(50.0);
        engine.force_shot();

        let snap = run_ticks(&mut engine, 200);
        assert!(snap.projectiles.is_empty());
        let deepest = engine
            .terrain()
            .points()
            .iter()
            .map(|p| p.y)
            .fold(f64::MIN, f64::max);
        assert!(
            deepest > 550.5,
            "impact must dig below the flat baseline, got {deepest}"
        );
        assert_eq!(snap.turn.player_name, "Blue 1");
        assert_eq!(snap.turn.turn_count, 1);
        assert_eq!(snap.turn.phase, TurnPhase::Aiming);
    }

    /// Straight up at full power: the shell lands back on the shooter.
    #[test]
    fn test_splash_damage_decays_with_distance() {
        let mut engine = start_flat(1);
        engine.set_tank_x(0, 300.0);
        engine.set_angle(0, 90.0);
        engine.set_power(100.0);
        engine.force_shot();

        run_ticks(&mut engine, 260);
        let health = engine.tank_health(0);
        assert!(health < 100, "self-splash must hurt, got {health}");
        assert!(health > 0, "near-miss splash must not one-shot a full tank");
        // The bystander on the far side is untouched.
        assert_eq!(engine.tank_health(1), 100);
    }

    /// A shot leaving the world fizzles: turn ends, nothing is damaged.
    #[test]
    fn test_out_of_bounds_shot_fizzles() {
        let mut engine = start_flat(1);
        engine.set_angle(0, 180.0); // left horizon, off the map in a few ticks
        engine.set_power(100.0);
        engine.force_shot();

        let snap = run_ticks(&mut engine, 100);
        assert_eq!(engine.tank_health(0), 100);
        assert_eq!(engine.tank_health(1), 100);
        assert!((engine.terrain().height_at(30.0) - 550.0).abs() < 1e-9);
        assert_eq!(snap.turn.player_name, "Blue 1");
    }

    #[test]
    fn test_skip_turn_advances_rotation() {
        let mut engine = start_flat(2);
        engine.queue_command(PlayerCommand::SkipTurn);
        let snap = engine.tick();
        assert_eq!(snap.turn.current_index, 1);
        assert_eq!(snap.turn.player_name, "Blue 1");
        assert_eq!(snap.turn.turn_count, 1);
    }

    #[test]
    fn test_rotation_skips_dead_players() {
        let mut engine = start_flat(2);
        engine.set_tank_health(1, 0); // Blue 1 is out
        engine.queue_command(PlayerCommand::SkipTurn);
        let snap = engine.tick();
        assert_eq!(snap.turn.player_name, "Red 2");
        assert_eq!(snap.turn.current_index, 2);
    }

    #[test]
    fn test_skip_resets_movement_budget() {
        let mut engine = start_flat(1);
        engine.queue_command(PlayerCommand::Move { dx: 100.0 });
        engine.tick();
        // Around the horn: Blue skips straight back to Red.
        engine.queue_command(PlayerCommand::SkipTurn);
        engine.tick();
        engine.queue_command(PlayerCommand::SkipTurn);
        let snap = engine.tick();
        assert_eq!(snap.turn.player_name, "Red 1");
        assert_eq!(snap.turn.movement_remaining, 150.0);
    }

    fn start_flat_with_timeout(timeout_ticks: u64) -> GameEngine {
        let rules = RuleSet {
            turn_timeout_ticks: timeout_ticks,
            ..quiet_rules()
        };
        let mut engine = GameEngine::new(MatchConfig { seed: 7, rules });
        engine.queue_command(PlayerCommand::StartMatch {
            players_per_team: 1,
            preset: Some(TerrainPreset::Flat),
        });
        engine.tick();
        engine
    }

    /// A player who never fires forfeits the turn when the clock runs out.
    #[test]
    fn test_turn_times_out_and_forfeits() {
        let mut engine = start_flat_with_timeout(10);
        let snap = run_ticks(&mut engine, 15);
        assert_eq!(snap.turn.player_name, "Blue 1");
        assert_eq!(snap.turn.turn_count, 1);
        assert!(snap.projectiles.is_empty(), "forfeit must not fire a shot");
        assert_eq!(engine.tank_health(0), 100);
        assert_eq!(engine.tank_health(1), 100);
    }

    #[test]
    fn test_turn_timer_counts_down_in_snapshot() {
        let mut engine = start_flat_with_timeout(600); // 10s at 60Hz
        let first = engine.tick().turn.time_remaining_secs;
        assert!(first > 9.9 && first <= 10.0, "got {first}");

        let later = run_ticks(&mut engine, 60).turn.time_remaining_secs;
        assert!(
            (first - later - 1.0).abs() < 0.05,
            "one second of ticks must burn one second of clock"
        );
    }

    /// The countdown is suspended while a shot is in flight: a flight
    /// longer than the timeout must not advance the turn twice.
    #[test]
    fn test_turn_timer_suspended_while_shot_in_flight() {
        let mut engine = start_flat_with_timeout(40);
        engine.set_tank_x(0, 100.0);
        engine.set_angle(0, 45.0);
        engine.set_power(50.0);
        engine.force_shot();

        // Flight (~64 ticks) outlasts the 40-tick timeout.
        let snap = run_ticks(&mut engine, 30);
        assert_eq!(snap.turn.phase, TurnPhase::Locked);
        assert_eq!(snap.turn.time_remaining_secs, 0.0);

        let snap = run_ticks(&mut engine, 90);
        assert_eq!(snap.turn.turn_count, 1, "exactly one advance per shot");
        assert_eq!(snap.turn.player_name, "Blue 1");
    }

    #[test]
    fn test_turn_timeout_zero_disables_forfeit() {
        let mut engine = start_flat_with_timeout(0);
        let snap = run_ticks(&mut engine, 100);
        assert_eq!(snap.turn.player_name, "Red 1");
        assert_eq!(snap.turn.turn_count, 0);
        assert_eq!(snap.turn.time_remaining_secs, 0.0);
    }

    #[test]
    fn test_team_elimination_ends_match() {
        let mut engine = start_flat(1);
        engine.set_tank_health(1, 0);
        engine.queue_command(PlayerCommand::SkipTurn);
        let snap = engine.tick();
        assert_eq!(snap.phase, MatchPhase::Complete);
        assert_eq!(snap.winner, Some(Team::Red));
        // Wreck stays on the field for the final tableau.
        assert_eq!(snap.tanks.len(), 2);
        assert!(!snap.tanks[1].alive);
    }

    #[test]
    fn test_mutual_destruction_has_no_winner() {
        let mut engine = start_flat(1);
        engine.set_tank_health(0, 0);
        engine.set_tank_health(1, 0);
        engine.queue_command(PlayerCommand::SkipTurn);
        let snap = engine.tick();
        assert_eq!(snap.phase, MatchPhase::Complete);
        assert_eq!(snap.winner, None);
    }

    #[test]
    fn test_return_to_menu_only_after_complete() {
        let mut engine = start_flat(1);
        engine.queue_command(PlayerCommand::ReturnToMenu);
        let snap = engine.tick();
        assert_eq!(snap.phase, MatchPhase::Active, "live round keeps running");

        engine.set_tank_health(1, 0);
        engine.queue_command(PlayerCommand::SkipTurn);
        engine.tick();
        engine.queue_command(PlayerCommand::ReturnToMenu);
        let snap = engine.tick();
        assert_eq!(snap.phase, MatchPhase::Menu);
    }

    #[test]
    fn test_wind_redraws_on_turn_cadence() {
        let rules = RuleSet {
            max_platforms: 0,
            max_ground_obstacles: 0,
            ..RuleSet::default()
        };
        let mut engine = GameEngine::new(MatchConfig { seed: 11, rules });
        engine.queue_command(PlayerCommand::StartMatch {
            players_per_team: 1,
            preset: Some(TerrainPreset::Flat),
        });
        let initial = engine.tick().turn.wind;

        let mut winds = Vec::new();
        for _ in 0..4 {
            engine.queue_command(PlayerCommand::SkipTurn);
            winds.push(engine.tick().turn.wind);
        }
        // Held for three turns, redrawn on the fourth.
        assert_eq!(winds[0], initial);
        assert_eq!(winds[1], initial);
        assert_eq!(winds[2], initial);
        assert_ne!(winds[3], initial);
        assert!(winds[3].abs() <= 0.05);
    }

    #[test]
    fn test_platform_overrides_terrain_height() {
        let mut engine = start_flat(1);
        engine.world_mut().spawn((
            Obstacle,
            ObstacleBody {
                x: 60.0,
                y: 400.0,
                width: 140.0,
                height: 15.0,
                destructible: false,
                health: 100,
                platform: true,
            },
        ));
        // Any resettle puts the tank on top of the platform.
        engine.queue_command(PlayerCommand::Move { dx: 20.0 });
        let snap = engine.tick();
        assert!((snap.tanks[0].position.x - 100.0).abs() < 1e-9);
        assert!((snap.tanks[0].position.y - 385.0).abs() < 1e-9);
    }

    /// A flat horizontal shot into a destructible block: direct hit plus
    /// splash finishes its remaining 40 health and removes it.
    #[test]
    fn test_destructible_obstacle_removed_at_zero_health() {
        let mut engine = start_flat(1);
        engine.set_tank_x(0, 100.0);
        engine.world_mut().spawn((
            Obstacle,
            ObstacleBody {
                x: 300.0,
                y: 500.0,
                width: 50.0,
                height: 60.0,
                destructible: true,
                health: 40,
                platform: false,
            },
        ));
        engine.set_angle(0, 0.0);
        engine.set_power(100.0);
        engine.force_shot();

        let snap = run_ticks(&mut engine, 200);
        assert!(snap.obstacles.is_empty(), "block at 40 hp must be destroyed");
        assert_eq!(snap.turn.player_name, "Blue 1");
    }

    #[test]
    fn test_indestructible_obstacle_shrugs_off_hits() {
        let mut engine = start_flat(1);
        engine.set_tank_x(0, 100.0);
        engine.world_mut().spawn((
            Obstacle,
            ObstacleBody {
                x: 300.0,
                y: 500.0,
                width: 50.0,
                height: 60.0,
                destructible: false,
                health: 100,
                platform: false,
            },
        ));
        engine.set_angle(0, 0.0);
        engine.set_power(100.0);
        engine.force_shot();

        let snap = run_ticks(&mut engine, 200);
        assert_eq!(snap.obstacles.len(), 1);
        assert_eq!(snap.obstacles[0].health, 100);
    }

    /// Same seed + same command script = byte-identical snapshot stream,
    /// with random terrain, scatter, and wind all enabled.
    #[test]
    fn test_determinism_same_seed_same_stream() {
        fn drive(seed: u64) -> Vec<String> {
            let mut engine = GameEngine::new(MatchConfig {
                seed,
                rules: RuleSet::default(),
            });
            let mut stream = Vec::new();
            engine.queue_command(PlayerCommand::StartMatch {
                players_per_team: 2,
                preset: None,
            });
            stream.push(serde_json::to_string(&engine.tick()).unwrap());
            engine.queue_commands([
                PlayerCommand::Move { dx: 40.0 },
                PlayerCommand::AdjustAngle { delta: -10.0 },
                PlayerCommand::StartCharging,
            ]);
            for _ in 0..30 {
                stream.push(serde_json::to_string(&engine.tick()).unwrap());
            }
            engine.queue_command(PlayerCommand::StopCharging);
            for _ in 0..150 {
                stream.push(serde_json::to_string(&engine.tick()).unwrap());
            }
            stream
        }

        assert_eq!(drive(99), drive(99));
    }

    #[test]
    fn test_different_seeds_diverge() {
        fn terrain_signature(seed: u64) -> Vec<f64> {
            let mut engine = GameEngine::new(MatchConfig {
                seed,
                rules: RuleSet::default(),
            });
            engine.queue_command(PlayerCommand::StartMatch {
                players_per_team: 1,
                preset: None,
            });
            engine.tick();
            engine.terrain().points().iter().map(|p| p.y).collect()
        }

        assert_ne!(terrain_signature(1), terrain_signature(2));
    }

    #[test]
    fn test_snapshot_round_trips_through_json() {
        let mut engine = start_flat(2);
        let snap = engine.tick();
        let json = serde_json::to_string(&snap).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tanks.len(), snap.tanks.len());
        assert_eq!(back.turn.player_name, snap.turn.player_name);
    }
}
