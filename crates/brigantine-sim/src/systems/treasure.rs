//! Treasure system: bobbing and pickup.

use glam::DVec2;
use hecs::World;

use brigantine_core::events::AudioEvent;

use crate::effects::Effect;
use crate::ephemeral::EphemeralSet;
use crate::physics::PhysicsWorld;
use crate::score::ScoreState;
use crate::ship::Ship;
use crate::treasure::Treasure;

/// Bob floating treasure and let ships pick up whatever is in reach.
/// Returns the number of pieces collected this tick.
pub fn run(
    world: &mut World,
    physics: &mut dyn PhysicsWorld,
    dt: f64,
    score: &mut ScoreState,
    effects: &mut EphemeralSet<Effect>,
    audio: &mut Vec<AudioEvent>,
) -> usize {
    let hulls: Vec<DVec2> = world
        .query::<&Ship>()
        .iter()
        .filter_map(|(_, ship)| ship.pose(physics).map(|pose| pose.position))
        .collect();

    let mut collected = 0;
    for (_entity, treasure) in world.query_mut::<&mut Treasure>() {
        if treasure.is_collected() {
            continue;
        }
        treasure.update(dt);
        if !hulls.iter().any(|&hull| treasure.in_reach(hull)) {
            continue;
        }
        let position = treasure.position();
        if let Some(value) = treasure.collect(physics) {
            let kind = treasure.kind();
            score.record_treasure(value);
            effects.push(Effect::impact(position, kind.radius() * 3.0));
            audio.push(AudioEvent::TreasureCollected { kind, value });
            log::debug!("treasure {} collected for {value}", treasure.id);
            collected += 1;
        }
    }
    collected
}
