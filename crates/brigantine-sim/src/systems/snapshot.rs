//! Snapshot system: queries the registry and builds a complete
//! GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use std::collections::HashMap;

use hecs::{Entity, World};

use brigantine_core::enums::GamePhase;
use brigantine_core::events::AudioEvent;
use brigantine_core::state::*;
use brigantine_core::types::{Pose, SimTime};

use super::module_sync::{parent_pose, ship_poses};
use super::wind::Wind;
use crate::effects::Effect;
use crate::ephemeral::EphemeralSet;
use crate::modules::Module;
use crate::physics::PhysicsWorld;
use crate::score::ScoreState;
use crate::ship::Ship;
use crate::treasure::Treasure;

/// Everything outside the registry that goes into a snapshot.
pub struct SnapshotInputs<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wind: &'a Wind,
    pub effects: &'a EphemeralSet<Effect>,
    pub score: &'a ScoreState,
    pub audio_events: Vec<AudioEvent>,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    physics: &dyn PhysicsWorld,
    inputs: SnapshotInputs<'_>,
) -> GameStateSnapshot {
    let poses = ship_poses(world, physics);

    GameStateSnapshot {
        time: inputs.time,
        phase: inputs.phase,
        wind: inputs.wind.view(),
        ships: build_ships(world, physics),
        modules: build_modules(world, &poses, inputs.wind),
        projectiles: build_projectiles(world),
        treasures: build_treasures(world),
        effects: build_effects(inputs.effects),
        audio_events: inputs.audio_events,
        score: inputs.score.view(inputs.time.elapsed_secs),
    }
}

fn build_ships(world: &World, physics: &dyn PhysicsWorld) -> Vec<ShipView> {
    let mut ships: Vec<ShipView> = world
        .query::<&Ship>()
        .iter()
        .filter_map(|(_, ship)| {
            Some(ShipView {
                ship_id: ship.id,
                name: ship.name.clone(),
                pose: ship.pose(physics)?,
                velocity: ship.velocity(physics),
                sail_power: ship.sail_power,
            })
        })
        .collect();
    ships.sort_by_key(|s| s.ship_id);
    ships
}

fn module_details(module: &Module, parent: Option<Pose>, wind: &Wind) -> ModuleDetails {
    match module {
        Module::Sail(sail) => ModuleDetails::Sail {
            openness: sail.openness(),
            angle_deg: sail.angle(),
            // A loose sail drives nothing.
            efficiency: parent.map_or(0.0, |p| sail.efficiency(wind.direction, p.angle)),
            has_fiber: sail.has_fiber(),
        },
        Module::Wheel(wheel) => ModuleDetails::Wheel {
            angle_deg: wheel.angle(),
            is_controlled: wheel.is_controlled(),
            effectiveness: wheel.effectiveness(),
        },
        Module::Cannon(cannon) => ModuleDetails::Cannon {
            cooldown_remaining: cannon.cooldown_remaining(),
            max_cooldown: cannon.max_cooldown(),
            ready: cannon.is_ready(),
            live_projectiles: cannon.projectiles().len(),
        },
    }
}

fn build_modules(world: &World, poses: &HashMap<Entity, Pose>, wind: &Wind) -> Vec<ModuleView> {
    let mut modules: Vec<ModuleView> = world
        .query::<&Module>()
        .iter()
        .map(|(_, module)| {
            let parent = parent_pose(module, poses);
            let ship_id = module
                .parent()
                .and_then(|ship| world.get::<&Ship>(ship).ok().map(|s| s.id));
            ModuleView {
                module_id: module.id(),
                ship_id,
                kind: module.kind(),
                pose: module.world_pose(parent),
                state: module.lifecycle_state(),
                body_count: module.bodies().len(),
                details: module_details(module, parent, wind),
            }
        })
        .collect();
    modules.sort_by_key(|m| m.module_id);
    modules
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut cannons: Vec<(u32, Vec<ProjectileView>)> = world
        .query::<&Module>()
        .iter()
        .filter_map(|(_, module)| module.as_cannon())
        .map(|cannon| {
            let shots = cannon
                .projectiles()
                .iter()
                .map(|shot| ProjectileView {
                    cannon_id: shot.cannon_id(),
                    position: shot.position(),
                    velocity: shot.velocity(),
                    age: shot.age(),
                    damage: shot.damage(),
                })
                .collect();
            (cannon.mount.id, shots)
        })
        .collect();
    cannons.sort_by_key(|(id, _)| *id);
    cannons.into_iter().flat_map(|(_, shots)| shots).collect()
}

fn build_treasures(world: &World) -> Vec<TreasureView> {
    let mut treasures: Vec<TreasureView> = world
        .query::<&Treasure>()
        .iter()
        .map(|(_, t)| TreasureView {
            treasure_id: t.id,
            kind: t.kind(),
            position: t.position(),
            collected: t.is_collected(),
        })
        .collect();
    treasures.sort_by_key(|t| t.treasure_id);
    treasures
}

fn build_effects(effects: &EphemeralSet<Effect>) -> Vec<EffectView> {
    effects
        .iter()
        .map(|effect| EffectView {
            effect: effect.effect_type(),
            position: effect.position,
            size: effect.size,
            progress: effect.progress(),
        })
        .collect()
}
