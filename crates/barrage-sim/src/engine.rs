//! Game engine — the core of the duel.
//!
//! `GameEngine` owns the hecs ECS world and the height field, processes
//! player commands at tick boundaries, runs all systems, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic
//! testing: same seed and command stream, same snapshot stream.

use std::collections::VecDeque;

use hecs::World;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use barrage_core::commands::PlayerCommand;
use barrage_core::components::*;
use barrage_core::constants::{POWER_MAX, TERRAIN_SAMPLES, TURRET_OFFSET};
use barrage_core::enums::{Facing, MatchPhase, Team, TerrainPreset, TurnPhase};
use barrage_core::events::AudioEvent;
use barrage_core::state::GameStateSnapshot;
use barrage_core::types::{Position, SimTime, Velocity};
use barrage_terrain::height_field::GenParams;
use barrage_terrain::{presets, HeightField};

use crate::config::{MatchConfig, RuleSet};
use crate::schedule::{Deadline, RepeatingTimer};
use crate::systems;
use crate::turn::{PlayerSlot, TurnState};
use crate::world_setup;

/// Whether the round is still live after a game-over check.
enum RoundStatus {
    Live,
    /// `None` winner = mutual destruction on the final shot.
    Over(Option<Team>),
}

/// The simulation engine. Owns the ECS world and all round state.
pub struct GameEngine {
    world: World,
    terrain: HeightField,
    time: SimTime,
    phase: MatchPhase,
    turn: TurnState,
    roster: Vec<PlayerSlot>,
    rules: RuleSet,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    audio_events: Vec<AudioEvent>,
    /// Repeating power oscillator; present only while charging.
    charge_timer: Option<RepeatingTimer>,
    /// Deferred turn advance after a detonation (lets the explosion play).
    pending_advance: Option<Deadline>,
    /// Forfeit deadline for the current turn. Taken when a shot fires
    /// (the countdown is suspended while Locked); re-armed by next_turn.
    turn_deadline: Option<Deadline>,
    winner: Option<Team>,
}

impl GameEngine {
    /// Create a new engine with the given config. No round is running
    /// until a `StartMatch` command arrives.
    pub fn new(config: MatchConfig) -> Self {
        // Placeholder ground until StartMatch; keeps every query total.
        let terrain = HeightField::from_heights(
            config.rules.world_width,
            vec![config.rules.world_height - 50.0; TERRAIN_SAMPLES],
            0.0,
            config.rules.world_height,
        );

        Self {
            world: World::new(),
            terrain,
            time: SimTime::default(),
            phase: MatchPhase::default(),
            turn: TurnState::default(),
            roster: Vec::new(),
            rules: config.rules,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            charge_timer: None,
            pending_advance: None,
            turn_deadline: None,
            winner: None,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == MatchPhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let audio_events = std::mem::take(&mut self.audio_events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.terrain,
            &self.time,
            self.phase,
            &self.turn,
            &self.roster,
            &self.rules,
            self.turn_time_remaining_secs(),
            self.winner,
            audio_events,
        )
    }

    /// Seconds until the current turn is forfeited; 0 while suspended.
    fn turn_time_remaining_secs(&self) -> f64 {
        match self.turn_deadline {
            Some(deadline) if self.phase == MatchPhase::Active => {
                deadline.remaining(self.time.tick) as f64 * self.time.dt()
            }
            _ => 0.0,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Read-only access to the terrain.
    pub fn terrain(&self) -> &HeightField {
        &self.terrain
    }

    /// Read-only access to the turn state.
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Out-of-turn or out-of-range
    /// requests are policy no-ops, never errors.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMatch {
                players_per_team,
                preset,
            } => self.start_match(players_per_team, preset),
            PlayerCommand::ReturnToMenu => {
                if self.phase == MatchPhase::Complete {
                    self.phase = MatchPhase::Menu;
                }
            }
            // Everything below acts on the current turn.
            _ if self.phase != MatchPhase::Active || self.turn.locked() => {}
            PlayerCommand::Move { dx } => self.move_current_tank(dx),
            PlayerCommand::AdjustAngle { delta } => self.adjust_angle(delta),
            PlayerCommand::StartCharging => {
                if self.turn.phase == TurnPhase::Aiming {
                    self.turn.phase = TurnPhase::Charging;
                    self.turn.rising = true;
                    self.charge_timer = Some(RepeatingTimer::starting_at(
                        self.time.tick,
                        self.rules.charge_period_ticks,
                    ));
                }
            }
            PlayerCommand::StopCharging => {
                if self.turn.phase == TurnPhase::Charging {
                    self.charge_timer = None;
                    if self.turn.power > 0.0 {
                        self.shoot();
                    } else {
                        // Zero-power release: back to aiming, no shot.
                        self.turn.phase = TurnPhase::Aiming;
                    }
                }
            }
            PlayerCommand::SkipTurn => {
                self.charge_timer = None;
                match self.check_game_over() {
                    RoundStatus::Over(winner) => self.finish_match(winner),
                    RoundStatus::Live => self.next_turn(),
                }
            }
        }
    }

    /// (Re)build the round: terrain, tanks, obstacles, wind, turn state.
    fn start_match(&mut self, players_per_team: usize, preset: Option<TerrainPreset>) {
        let players_per_team = players_per_team.clamp(1, 3);

        self.world = World::new();
        self.despawn_buffer.clear();
        self.charge_timer = None;
        self.pending_advance = None;
        self.winner = None;
        self.time = SimTime::default();

        self.terrain = match preset {
            Some(p) => presets::build_preset(p),
            None => HeightField::generate(&mut self.rng, &GenParams::default()),
        };

        self.roster = world_setup::spawn_tanks(&mut self.world, &self.terrain, players_per_team);
        world_setup::scatter_obstacles(&mut self.world, &mut self.rng, &self.terrain, &self.rules);
        // Platforms may have spawned over a tank; settle once more.
        systems::surface::settle_tanks(&mut self.world, &self.terrain);

        self.turn = TurnState {
            wind: self.draw_wind(),
            ..TurnState::default()
        };
        self.phase = MatchPhase::Active;
        self.arm_turn_deadline();

        if let Some(name) = self.player_name(self.turn.current) {
            self.audio_events.push(AudioEvent::TurnChanged { player: name });
        }
    }

    /// Budget-checked, bounds-clamped horizontal move of the current tank.
    fn move_current_tank(&mut self, dx: f64) {
        let Some(slot) = self.roster.get(self.turn.current).copied() else {
            return;
        };
        let budget = self.rules.move_budget;
        let (min_x, max_x) = (
            self.rules.edge_margin,
            self.rules.world_width - self.rules.edge_margin,
        );

        let moved = {
            let Ok(mut query) = self
                .world
                .query_one::<(&mut Position, &mut Mobility, &mut Barrel, &Health)>(slot.entity)
            else {
                return;
            };
            let Some((pos, mobility, barrel, health)) = query.get() else {
                return;
            };
            if !health.is_alive() {
                return;
            }

            let new_x = (pos.x + dx).clamp(min_x, max_x);
            let applied = (new_x - pos.x).abs();
            // Reject outright rather than partially spending the budget.
            if applied == 0.0 || mobility.used + applied > budget {
                false
            } else {
                pos.x = new_x;
                mobility.used += applied;
                barrel.facing = if dx < 0.0 { Facing::Left } else { Facing::Right };
                true
            }
        };

        if moved {
            // y is derived from x: resettle onto the surface.
            systems::surface::settle_tanks(&mut self.world, &self.terrain);
        }
    }

    /// Clamp the current barrel into [0, 180] degrees.
    fn adjust_angle(&mut self, delta: f64) {
        let Some(slot) = self.roster.get(self.turn.current) else {
            return;
        };
        if let Ok(mut barrel) = self.world.get::<&mut Barrel>(slot.entity) {
            barrel.angle_deg = (barrel.angle_deg + delta).clamp(0.0, 180.0);
        }
    }

    /// Fire at the current power: spawn the projectile at the barrel tip
    /// and lock input until the turn advances.
    fn shoot(&mut self) {
        debug_assert!(self.turn.power > 0.0 && !self.turn.locked());
        let Some(slot) = self.roster.get(self.turn.current).copied() else {
            return;
        };

        let (origin, angle_deg) = {
            let Ok(mut query) = self.world.query_one::<(&Position, &Barrel)>(slot.entity) else {
                return;
            };
            match query.get() {
                Some((pos, barrel)) => (*pos, barrel.angle_deg),
                None => return,
            }
        };

        let rad = angle_deg.to_radians();
        let speed = self.turn.power / POWER_MAX * self.rules.power_scale;
        // Barrel tip, measured from the turret pivot above the hull center.
        let start = Position::new(
            origin.x + rad.cos() * self.rules.barrel_length,
            origin.y - TURRET_OFFSET - rad.sin() * self.rules.barrel_length,
        );
        let velocity = Velocity::new(rad.cos() * speed, -rad.sin() * speed);

        self.world.spawn((
            Projectile {
                damage: self.rules.base_damage,
            },
            start,
            velocity,
            Trail::default(),
        ));

        self.turn.power = 0.0;
        self.turn.phase = TurnPhase::Locked;
        // Shot resolution owns the sequencing from here.
        self.turn_deadline = None;
        self.audio_events.push(AudioEvent::ShotFired { team: slot.team });
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Power oscillation while the fire control is held.
        if self.turn.phase == TurnPhase::Charging {
            if let Some(timer) = self.charge_timer.as_mut() {
                if timer.fire(self.time.tick) {
                    self.turn.step_power(self.rules.power_step);
                }
            }
        }

        // 2. Projectile flight and first-match collision.
        let detonations = systems::flight::run(
            &mut self.world,
            &self.terrain,
            &self.rules,
            self.turn.wind,
            &mut self.despawn_buffer,
        );

        // 3. Detonation resolution; each one schedules the turn advance.
        for det in &detonations {
            systems::detonation::resolve(
                &mut self.world,
                &mut self.terrain,
                &self.rules,
                det,
                &mut self.audio_events,
                &mut self.despawn_buffer,
            );
            self.pending_advance = Some(Deadline::after(
                self.time.tick,
                self.rules.turn_advance_delay_ticks,
            ));
        }

        // 4. Explosion visuals.
        systems::effects::run(&mut self.world, &mut self.despawn_buffer);

        // 5. Cleanup.
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        // 6. Deferred turn advance. Checked against current state, not
        //    state captured at detonation time.
        if self.pending_advance.is_some_and(|d| d.ready(self.time.tick)) {
            self.pending_advance = None;
            match self.check_game_over() {
                RoundStatus::Over(winner) => self.finish_match(winner),
                RoundStatus::Live => self.next_turn(),
            }
        }

        // 7. Turn timeout: a player who never fires forfeits the turn.
        //    None while Locked, so it cannot race the deferred advance.
        if self.turn_deadline.is_some_and(|d| d.ready(self.time.tick)) {
            self.turn_deadline = None;
            self.charge_timer = None;
            match self.check_game_over() {
                RoundStatus::Over(winner) => self.finish_match(winner),
                RoundStatus::Live => self.next_turn(),
            }
        }
    }

    /// Arm the forfeit deadline for the turn that just began.
    /// A zero timeout in the rules disables it.
    fn arm_turn_deadline(&mut self) {
        self.turn_deadline = (self.rules.turn_timeout_ticks > 0)
            .then(|| Deadline::after(self.time.tick, self.rules.turn_timeout_ticks));
    }

    /// Advance to the next living player, redrawing wind on its cadence.
    fn next_turn(&mut self) {
        self.turn.turn_count += 1;
        self.turn.wind_change_counter += 1;
        if self.turn.wind_change_counter >= self.rules.wind_change_turns {
            self.turn.wind = self.draw_wind();
            self.turn.wind_change_counter = 0;
        }

        // Cyclic scan for the next living player. Termination is
        // guaranteed because check_game_over ran first; a full lap with
        // no living player is a logic error upstream.
        let len = self.roster.len();
        debug_assert!(len > 0);
        let mut scanned = 0;
        loop {
            self.turn.current = (self.turn.current + 1) % len;
            if self.is_alive(self.turn.current) {
                break;
            }
            scanned += 1;
            debug_assert!(scanned <= len, "turn advance found no living player");
            if scanned > len {
                return; // release builds: bail rather than spin
            }
        }

        // Fresh allowances for the new player.
        if let Some(slot) = self.roster.get(self.turn.current) {
            if let Ok(mut mobility) = self.world.get::<&mut Mobility>(slot.entity) {
                mobility.used = 0.0;
            }
        }
        self.turn.power = 0.0;
        self.turn.rising = true;
        self.turn.phase = TurnPhase::Aiming;
        self.charge_timer = None;
        self.arm_turn_deadline();

        if let Some(name) = self.player_name(self.turn.current) {
            self.audio_events.push(AudioEvent::TurnChanged { player: name });
        }
    }

    /// Count living members per team; the round ends when a team is empty.
    fn check_game_over(&self) -> RoundStatus {
        let mut red = 0;
        let mut blue = 0;
        for slot in &self.roster {
            if let Ok(health) = self.world.get::<&Health>(slot.entity) {
                if health.is_alive() {
                    match slot.team {
                        Team::Red => red += 1,
                        Team::Blue => blue += 1,
                    }
                }
            }
        }

        if red > 0 && blue > 0 {
            RoundStatus::Live
        } else if red > 0 {
            RoundStatus::Over(Some(Team::Red))
        } else if blue > 0 {
            RoundStatus::Over(Some(Team::Blue))
        } else {
            RoundStatus::Over(None)
        }
    }

    fn finish_match(&mut self, winner: Option<Team>) {
        self.phase = MatchPhase::Complete;
        self.winner = winner;
        self.charge_timer = None;
        self.pending_advance = None;
        self.turn_deadline = None;
        self.audio_events.push(AudioEvent::MatchOver { winner });
    }

    fn draw_wind(&mut self) -> f64 {
        let max = self.rules.wind_max;
        if max <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-max..=max)
    }

    fn is_alive(&self, index: usize) -> bool {
        self.roster
            .get(index)
            .and_then(|slot| self.world.get::<&Health>(slot.entity).ok())
            .is_some_and(|health| health.is_alive())
    }

    fn player_name(&self, index: usize) -> Option<String> {
        let slot = self.roster.get(index)?;
        self.world
            .get::<&TankInfo>(slot.entity)
            .ok()
            .map(|info| info.name.clone())
    }

    // ---- Test support ----

    /// Direct state setup for tests: place a tank.
    #[cfg(test)]
    pub(crate) fn set_tank_x(&mut self, index: usize, x: f64) {
        let slot = self.roster[index];
        {
            let mut pos = self.world.get::<&mut Position>(slot.entity).unwrap();
            pos.x = x;
        }
        systems::surface::settle_tanks(&mut self.world, &self.terrain);
    }

    #[cfg(test)]
    pub(crate) fn set_tank_health(&mut self, index: usize, health: i32) {
        let slot = self.roster[index];
        self.world.get::<&mut Health>(slot.entity).unwrap().current = health;
    }

    #[cfg(test)]
    pub(crate) fn tank_health(&self, index: usize) -> i32 {
        let slot = self.roster[index];
        self.world.get::<&Health>(slot.entity).unwrap().current
    }

    #[cfg(test)]
    pub(crate) fn set_angle(&mut self, index: usize, angle_deg: f64) {
        let slot = self.roster[index];
        self.world.get::<&mut Barrel>(slot.entity).unwrap().angle_deg = angle_deg;
    }

    #[cfg(test)]
    pub(crate) fn set_power(&mut self, power: f64) {
        self.turn.power = power;
    }

    #[cfg(test)]
    pub(crate) fn force_shot(&mut self) {
        self.shoot();
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
