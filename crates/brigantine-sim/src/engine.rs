//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the ship registry and the physics world, processes
//! player commands, runs all systems, and produces `GameStateSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use brigantine_core::commands::PlayerCommand;
use brigantine_core::constants::*;
use brigantine_core::enums::GamePhase;
use brigantine_core::error::{ConfigError, ConfigResult};
use brigantine_core::events::AudioEvent;
use brigantine_core::state::GameStateSnapshot;
use brigantine_core::types::{sanitize_dt, Pose, SimTime};

use crate::audio::{AudioSink, Silent};
use crate::effects::Effect;
use crate::ephemeral::EphemeralSet;
use crate::lifecycle;
use crate::modules::Module;
use crate::physics::{KinematicWorld, PhysicsWorld};
use crate::render::{palette, Surface};
use crate::score::ScoreState;
use crate::ship::Ship;
use crate::systems;
use crate::systems::module_sync::{fiber_audio, parent_pose, ship_poses};
use crate::systems::snapshot::SnapshotInputs;
use crate::systems::wind::Wind;
use crate::treasure::Treasure;
use crate::world_setup::{self, Armament, IdAllocator};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Multiplier on every frame delta (1.0 = normal).
    pub time_scale: f64,
    /// Initial direction the wind blows toward (radians).
    pub wind_direction: f64,
    pub wind_speed: f64,
    /// Largest wind direction change per second (radians).
    pub wind_drift: f64,
    pub treasure_count: usize,
    /// Treasure is scattered within this distance of the origin.
    pub world_radius: f64,
    pub cannon_cooldown: f64,
    pub cannon_damage: f64,
    pub player_ship_name: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            wind_direction: 0.0,
            wind_speed: WIND_DEFAULT_SPEED,
            wind_drift: WIND_MAX_DRIFT_RATE,
            treasure_count: TREASURE_DEFAULT_COUNT,
            world_radius: WORLD_RADIUS,
            cannon_cooldown: CANNON_MAX_COOLDOWN,
            cannon_damage: CANNON_DAMAGE,
            player_ship_name: "Brigantine".to_string(),
        }
    }
}

fn check(field: &'static str, value: f64, ok: bool, reason: &str) -> ConfigResult<()> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{value} {reason}"),
        })
    }
}

impl SimConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        check(
            "time_scale",
            self.time_scale,
            (0.0..=4.0).contains(&self.time_scale),
            "is outside 0..=4",
        )?;
        check("wind_direction", self.wind_direction, true, "is not finite")?;
        check("wind_speed", self.wind_speed, self.wind_speed >= 0.0, "is negative")?;
        check("wind_drift", self.wind_drift, self.wind_drift >= 0.0, "is negative")?;
        check(
            "world_radius",
            self.world_radius,
            self.world_radius > 0.0,
            "must be positive",
        )?;
        check(
            "cannon_cooldown",
            self.cannon_cooldown,
            self.cannon_cooldown >= 0.0,
            "is negative",
        )?;
        check(
            "cannon_damage",
            self.cannon_damage,
            self.cannon_damage >= 0.0,
            "is negative",
        )
    }
}

/// The simulation engine. Owns the registry, the physics world and all sim
/// state.
pub struct SimulationEngine<P: PhysicsWorld = KinematicWorld, A: AudioSink = Silent> {
    world: World,
    physics: P,
    audio: A,
    config: SimConfig,
    time: SimTime,
    phase: GamePhase,
    wind: Wind,
    rng: ChaCha8Rng,
    ids: IdAllocator,
    player_ship: Option<Entity>,
    effects: EphemeralSet<Effect>,
    score: ScoreState,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    audio_events: Vec<AudioEvent>,
}

impl SimulationEngine {
    /// Engine over the kinematic reference world with audio discarded.
    pub fn headless(config: SimConfig) -> Self {
        Self::new(config, KinematicWorld::new(), Silent)
    }
}

impl<P: PhysicsWorld, A: AudioSink> SimulationEngine<P, A> {
    /// Create a new simulation engine with the given config and collaborators.
    pub fn new(config: SimConfig, physics: P, audio: A) -> Self {
        Self {
            world: World::new(),
            physics,
            audio,
            time: SimTime::default(),
            phase: GamePhase::default(),
            wind: Wind::new(config.wind_direction, config.wind_speed, config.wind_drift),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            ids: IdAllocator::default(),
            player_ship: None,
            effects: EphemeralSet::new(),
            score: ScoreState::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            config,
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

    /// Apply queued commands, advance the simulation by `dt` seconds and
    /// return the resulting snapshot. Negative or non-finite `dt` counts as 0.
    pub fn tick(&mut self, dt: f64) -> GameStateSnapshot {
        let dt = sanitize_dt(dt * self.config.time_scale);
        self.process_commands();

        if self.phase == GamePhase::Sailing {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let audio_events = std::mem::take(&mut self.audio_events);
        for event in &audio_events {
            self.audio.play(event.clone());
        }
        systems::snapshot::build_snapshot(
            &self.world,
            &self.physics,
            SnapshotInputs {
                time: self.time,
                phase: self.phase,
                wind: &self.wind,
                effects: &self.effects,
                score: &self.score,
                audio_events,
            },
        )
    }

    /// Draw the whole scene. Reads state only.
    pub fn render(&self, surface: &mut dyn Surface) {
        for (_, treasure) in self.world.query::<&Treasure>().iter() {
            treasure.render(surface);
        }
        let poses = ship_poses(&self.world, &self.physics);
        for (entity, ship) in self.world.query::<&Ship>().iter() {
            if let Some(&pose) = poses.get(&entity) {
                ship.render(pose, surface);
            }
        }
        for (_, module) in self.world.query::<&Module>().iter() {
            module.render(parent_pose(module, &poses), surface);
        }
        for (_, module) in self.world.query::<&Module>().iter() {
            if let Some(cannon) = module.as_cannon() {
                cannon.render_projectiles(surface);
            }
        }
        self.effects.render(surface);
    }

    /// Spawn an extra ship with the configured armament. `None` if the
    /// physics world refused the hull.
    pub fn spawn_ship(&mut self, name: &str, pose: Pose) -> Option<Entity> {
        let armament = Armament {
            cooldown: self.config.cannon_cooldown,
            damage: self.config.cannon_damage,
        };
        match world_setup::spawn_ship(
            &mut self.world,
            &mut self.physics,
            &mut self.ids,
            name,
            pose,
            armament,
        ) {
            Ok(ship) => Some(ship),
            Err(err) => {
                log::warn!("ship `{name}` not spawned: {err}");
                None
            }
        }
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn wind(&self) -> &Wind {
        &self.wind
    }

    /// Get a read-only reference to the registry.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn player_ship(&self) -> Option<Entity> {
        self.player_ship
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn effects(&self) -> &EphemeralSet<Effect> {
        &self.effects
    }

    /// Drop a piece of treasure at `position` (for tests that need one in
    /// reach).
    #[cfg(test)]
    pub fn place_treasure(
        &mut self,
        kind: brigantine_core::enums::TreasureKind,
        position: DVec2,
    ) -> Option<Entity> {
        let treasure =
            Treasure::spawn(self.ids.treasure(), kind, position, 0.0, &mut self.physics).ok()?;
        self.score.treasures_total += 1;
        Some(self.world.spawn((treasure,)))
    }

    /// Registry entity of the module with this id.
    pub fn module_entity(&self, module_id: u32) -> Option<Entity> {
        self.world
            .query::<&Module>()
            .iter()
            .find(|(_, module)| module.id() == module_id)
            .map(|(entity, _)| entity)
    }

    /// Registry entity of the ship with this id.
    pub fn ship_entity(&self, ship_id: u32) -> Option<Entity> {
        self.world
            .query::<&Ship>()
            .iter()
            .find(|(_, ship)| ship.id == ship_id)
            .map(|(entity, _)| entity)
    }

    /// Ids of every module mounted on `ship`, in id order.
    pub fn modules_of(&self, ship: Entity) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .world
            .query::<&Module>()
            .iter()
            .filter(|(_, module)| module.parent() == Some(ship))
            .map(|(_, module)| module.id())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn start_voyage(&mut self) {
        let name = self.config.player_ship_name.clone();
        let Some(ship) = self.spawn_ship(&name, Pose::ORIGIN) else {
            return;
        };
        self.player_ship = Some(ship);
        let placed = world_setup::scatter_treasure(
            &mut self.world,
            &mut self.physics,
            &mut self.rng,
            &mut self.ids,
            self.config.treasure_count,
            self.config.world_radius,
        );
        self.score = ScoreState {
            treasures_total: placed as u32,
            ..ScoreState::default()
        };
        self.time = SimTime::default();
        self.phase = GamePhase::Sailing;
        log::info!("voyage started: `{name}`, {placed} treasures adrift");
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartVoyage => {
                if self.phase == GamePhase::Docked {
                    self.start_voyage();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Sailing {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Sailing;
                }
            }
            command if self.phase != GamePhase::Sailing => {
                log::debug!("{command:?} ignored while {:?}", self.phase);
            }
            PlayerCommand::TakeWheel { module } => {
                self.with_module(module, |m| m.as_wheel_mut().map(|w| w.set_controlled(true)));
            }
            PlayerCommand::ReleaseWheel { module } => {
                self.with_module(module, |m| m.as_wheel_mut().map(|w| w.set_controlled(false)));
            }
            PlayerCommand::TurnWheelLeft { module, degrees } => {
                self.with_module(module, |m| m.as_wheel_mut().map(|w| w.turn_left(degrees)));
            }
            PlayerCommand::TurnWheelRight { module, degrees } => {
                self.with_module(module, |m| m.as_wheel_mut().map(|w| w.turn_right(degrees)));
            }
            PlayerCommand::CenterWheel { module } => {
                self.with_module(module, |m| m.as_wheel_mut().map(|w| w.center()));
            }
            PlayerCommand::SetSailOpenness { module, openness } => {
                self.set_sail_openness(module, |_| openness);
            }
            PlayerCommand::AdjustSailOpenness { module, delta } => {
                self.set_sail_openness(module, |current| current + delta);
            }
            PlayerCommand::SetSailAngle { module, degrees } => {
                self.with_module(module, |m| m.as_sail_mut().map(|s| s.set_angle(degrees)));
            }
            PlayerCommand::FireCannon {
                module,
                direction_x,
                direction_y,
            } => {
                let Some(entity) = self.module_entity(module) else {
                    log::debug!("no module {module}");
                    return;
                };
                if systems::gunnery::fire_cannon(
                    &mut self.world,
                    &mut self.physics,
                    entity,
                    DVec2::new(direction_x, direction_y),
                    &mut self.rng,
                    &mut self.effects,
                    &mut self.audio_events,
                ) {
                    self.score.shots_fired += 1;
                }
            }
            PlayerCommand::FireBroadside { ship, side } => {
                let Some(entity) = self.ship_entity(ship) else {
                    log::debug!("no ship {ship}");
                    return;
                };
                let fired = systems::gunnery::fire_broadside(
                    &mut self.world,
                    &mut self.physics,
                    entity,
                    side,
                    &mut self.rng,
                    &mut self.effects,
                    &mut self.audio_events,
                );
                self.score.shots_fired += fired as u32;
            }
            PlayerCommand::ScuttleShip { ship } => self.scuttle(ship),
        }
    }

    /// Run `f` on the module with `module_id`. Unknown ids and wrong module
    /// kinds are logged and ignored.
    fn with_module<R>(&mut self, module_id: u32, f: impl FnOnce(&mut Module) -> Option<R>) {
        let Some(entity) = self.module_entity(module_id) else {
            log::debug!("no module {module_id}");
            return;
        };
        if let Ok(mut module) = self.world.get::<&mut Module>(entity) {
            if f(&mut *module).is_none() {
                log::debug!("module {module_id} is a {:?}, command ignored", module.kind());
            }
        }
    }

    fn set_sail_openness(&mut self, module_id: u32, target: impl FnOnce(f64) -> f64) {
        let Some(entity) = self.module_entity(module_id) else {
            log::debug!("no module {module_id}");
            return;
        };
        let poses = ship_poses(&self.world, &self.physics);
        let Ok(mut module) = self.world.get::<&mut Module>(entity) else {
            return;
        };
        let Some(current) = module.as_sail().map(|s| s.openness()) else {
            log::debug!("module {module_id} is not a sail");
            return;
        };
        let parent = parent_pose(&*module, &poses);
        let change =
            lifecycle::set_sail_openness(&mut *module, target(current), parent, &mut self.physics);
        self.audio_events.extend(fiber_audio(change, module_id));
    }

    fn scuttle(&mut self, ship_id: u32) {
        let Some(entity) = self.ship_entity(ship_id) else {
            log::debug!("no ship {ship_id}");
            return;
        };
        if let Ok(mut ship) = self.world.get::<&mut Ship>(entity) {
            ship.release(&mut self.physics);
            log::info!("ship `{}` scuttled", ship.name);
        }
        self.audio_events.push(AudioEvent::ShipScuttled { ship: ship_id });
        if self.player_ship == Some(entity) {
            self.effects.push(Effect::flash(palette::FLASH, FLASH_DURATION));
            self.player_ship = None;
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Wind drift
        systems::wind::run(&mut self.wind, &mut self.rng, dt);
        // 2. Propulsion + physics, sub-stepped
        let physics_dt = dt.min(MAX_PHYSICS_STEP * MAX_PHYSICS_SUBSTEPS as f64);
        let substeps = (physics_dt / MAX_PHYSICS_STEP).ceil() as u32;
        if physics_dt < dt {
            log::debug!("frame of {dt:.3}s integrated as {physics_dt:.3}s");
        }
        for _ in 0..substeps {
            systems::ship_motion::run(&mut self.world, &mut self.physics, &self.wind);
            self.physics.step(physics_dt / substeps as f64);
        }
        // 3. Module bodies follow their ships
        systems::module_sync::run(&mut self.world, &mut self.physics, &mut self.audio_events);
        // 4. Visual effects, before anything below spawns new ones
        self.effects.tick(dt, &mut self.physics);
        // 5. Reload, shot expiry
        systems::gunnery::run(
            &mut self.world,
            &mut self.physics,
            dt,
            &mut self.rng,
            &mut self.effects,
            &mut self.audio_events,
        );
        // 6. Treasure pickup
        systems::treasure::run(
            &mut self.world,
            &mut self.physics,
            dt,
            &mut self.score,
            &mut self.effects,
            &mut self.audio_events,
        );
        // 7. Cleanup (scuttled ships, orphaned modules)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }
}
