//! Ephemeral entity manager: an ordered collection of time-bounded entities
//! that are advanced, pruned and drawn together.
//!
//! Removal from the set is destruction. Any physics body an entity holds is
//! released in the same pass, before the entity is dropped.

use crate::physics::PhysicsWorld;
use crate::render::Surface;

/// A time-bounded entity.
pub trait Ephemeral {
    /// Advance by `dt` seconds. Implementations clamp so a huge `dt` finishes
    /// the entity rather than overshooting.
    fn tick(&mut self, dt: f64);

    fn is_finished(&self) -> bool;

    fn render(&self, surface: &mut dyn Surface);

    /// Hand any engine-owned resources back before the entity is dropped.
    fn release(&mut self, _physics: &mut dyn PhysicsWorld) {}
}

/// Insertion-ordered set of ephemeral entities. Later entries draw on top.
#[derive(Debug, Clone)]
pub struct EphemeralSet<T> {
    entries: Vec<T>,
}

impl<T> Default for EphemeralSet<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Ephemeral> EphemeralSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entity: T) {
        self.entries.push(entity);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.entries.iter_mut()
    }

    /// Tick every entity and drop the finished ones. Returns how many were
    /// removed.
    pub fn tick(&mut self, dt: f64, physics: &mut dyn PhysicsWorld) -> usize {
        self.tick_with(dt, physics, |_| {})
    }

    /// Like [`tick`](Self::tick), reporting each removed entity to
    /// `on_removed` after its resources were released.
    pub fn tick_with(
        &mut self,
        dt: f64,
        physics: &mut dyn PhysicsWorld,
        mut on_removed: impl FnMut(&T),
    ) -> usize {
        let before = self.entries.len();
        self.entries.retain_mut(|entity| {
            entity.tick(dt);
            if !entity.is_finished() {
                return true;
            }
            entity.release(physics);
            on_removed(entity);
            false
        });
        before - self.entries.len()
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        for entity in &self.entries {
            entity.render(surface);
        }
    }

    /// Release and drop everything.
    pub fn clear(&mut self, physics: &mut dyn PhysicsWorld) {
        for mut entity in self.entries.drain(..) {
            entity.release(physics);
        }
    }
}

impl<'a, T> IntoIterator for &'a EphemeralSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::KinematicWorld;
    use crate::render::DrawList;

    /// Counts down and draws one path per render.
    struct Fuse {
        label: u32,
        remaining: f64,
        ticks: u32,
    }

    impl Ephemeral for Fuse {
        fn tick(&mut self, dt: f64) {
            self.ticks += 1;
            self.remaining = (self.remaining - dt).max(0.0);
        }

        fn is_finished(&self) -> bool {
            self.remaining <= 0.0
        }

        fn render(&self, surface: &mut dyn Surface) {
            surface.begin_path();
        }
    }

    fn fuse(label: u32, remaining: f64) -> Fuse {
        Fuse {
            label,
            remaining,
            ticks: 0,
        }
    }

    #[test]
    fn finished_entries_are_removed_in_the_same_pass() {
        let mut physics = KinematicWorld::new();
        let mut set = EphemeralSet::new();
        set.push(fuse(1, 0.1));
        set.push(fuse(2, 1.0));
        set.push(fuse(3, 0.2));

        let mut removed = Vec::new();
        let count = set.tick_with(0.25, &mut physics, |f| removed.push(f.label));
        assert_eq!(count, 2);
        assert_eq!(removed, vec![1, 3]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next().map(|f| f.label), Some(2));
    }

    #[test]
    fn every_entry_is_ticked_once_per_step() {
        let mut physics = KinematicWorld::new();
        let mut set = EphemeralSet::new();
        set.push(fuse(1, 10.0));
        set.push(fuse(2, 10.0));
        set.tick(0.1, &mut physics);
        set.tick(0.1, &mut physics);
        assert!(set.iter().all(|f| f.ticks == 2));
    }

    #[test]
    fn render_follows_insertion_order() {
        let mut set = EphemeralSet::new();
        set.push(fuse(1, 1.0));
        set.push(fuse(2, 1.0));
        let mut list = DrawList::default();
        set.render(&mut list);
        assert_eq!(list.commands.len(), 2);
    }

    #[test]
    fn huge_dt_finishes_instead_of_overshooting() {
        let mut physics = KinematicWorld::new();
        let mut set = EphemeralSet::new();
        set.push(fuse(1, 0.5));
        assert_eq!(set.tick(1.0e9, &mut physics), 1);
        assert!(set.is_empty());
    }
}
