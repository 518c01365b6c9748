//! Collision taxonomy: the fixed set of bit-flag categories and the
//! canonical filter for every kind of body the simulation creates.
//!
//! Body creation must always go through [`BodyLabel::filter`]; no other code
//! builds masks from raw bits.

use std::ops::{BitAnd, BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::enums::TreasureKind;

/// A set of collision categories, stored as bit flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionCategory(u32);

impl CollisionCategory {
    pub const NONE: Self = Self(0);
    /// The player-controlled actor walking the deck.
    pub const PLAYER: Self = Self(1 << 0);
    pub const SHIP: Self = Self(1 << 1);
    pub const ENEMY: Self = Self(1 << 2);
    pub const PROJECTILE: Self = Self(1 << 3);
    pub const POWERUP: Self = Self(1 << 4);
    pub const TREASURE: Self = Self(1 << 5);
    pub const ISLAND: Self = Self(1 << 6);
    pub const DECK_ELEMENT: Self = Self(1 << 7);
    pub const SAIL_FIBER: Self = Self(1 << 8);
    pub const MODULE: Self = Self(1 << 9);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for CollisionCategory {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for CollisionCategory {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CollisionCategory {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Category/mask/group triple attached to a body at creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionFilter {
    pub category: CollisionCategory,
    pub mask: CollisionCategory,
    /// Bodies sharing a non-zero group always collide (positive) or never
    /// collide (negative), regardless of category and mask.
    pub group: i32,
}

impl CollisionFilter {
    pub const fn new(category: CollisionCategory, mask: CollisionCategory) -> Self {
        Self {
            category,
            mask,
            group: 0,
        }
    }

    pub const fn with_group(mut self, group: i32) -> Self {
        self.group = group;
        self
    }

    /// Whether the physics engine should consider this pair for contact.
    pub fn can_collide(&self, other: &CollisionFilter) -> bool {
        if self.group != 0 && self.group == other.group {
            return self.group > 0;
        }
        self.mask.intersects(other.category) && other.mask.intersects(self.category)
    }
}

/// Every kind of body the simulation asks the physics engine for.
///
/// The label doubles as the body's identifier string on the engine side and
/// selects its collision filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyLabel {
    Hull,
    SailMast,
    SailFiber,
    Wheel,
    Cannon,
    Projectile,
    Treasure(TreasureKind),
}

impl BodyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyLabel::Hull => "hull",
            BodyLabel::SailMast => "sail-mast",
            BodyLabel::SailFiber => "sail-fiber",
            BodyLabel::Wheel => "wheel",
            BodyLabel::Cannon => "cannon",
            BodyLabel::Projectile => "projectile",
            BodyLabel::Treasure(TreasureKind::Coin) => "treasure-coin",
            BodyLabel::Treasure(TreasureKind::Gems) => "treasure-gems",
            BodyLabel::Treasure(TreasureKind::Chest) => "treasure-chest",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let label = match s {
            "hull" => BodyLabel::Hull,
            "sail-mast" => BodyLabel::SailMast,
            "sail-fiber" => BodyLabel::SailFiber,
            "wheel" => BodyLabel::Wheel,
            "cannon" => BodyLabel::Cannon,
            "projectile" => BodyLabel::Projectile,
            "treasure-coin" => BodyLabel::Treasure(TreasureKind::Coin),
            "treasure-gems" => BodyLabel::Treasure(TreasureKind::Gems),
            "treasure-chest" => BodyLabel::Treasure(TreasureKind::Chest),
            _ => return None,
        };
        Some(label)
    }

    /// Canonical collision filter for this kind of body.
    pub fn filter(&self) -> CollisionFilter {
        use CollisionCategory as C;
        match self {
            BodyLabel::Hull => CollisionFilter::new(
                C::SHIP,
                C::PLAYER | C::SHIP | C::ENEMY | C::PROJECTILE | C::ISLAND | C::TREASURE,
            ),
            BodyLabel::SailMast => CollisionFilter::new(C::DECK_ELEMENT, C::PLAYER | C::PROJECTILE),
            // The fiber never blocks the crew, only shot.
            BodyLabel::SailFiber => CollisionFilter::new(C::SAIL_FIBER, C::PROJECTILE),
            BodyLabel::Wheel | BodyLabel::Cannon => {
                CollisionFilter::new(C::MODULE, C::PLAYER | C::PROJECTILE)
            }
            BodyLabel::Projectile => CollisionFilter::new(
                C::PROJECTILE,
                C::SHIP | C::ENEMY | C::ISLAND | C::DECK_ELEMENT | C::SAIL_FIBER | C::MODULE,
            ),
            BodyLabel::Treasure(_) => CollisionFilter::new(C::TREASURE, C::PLAYER | C::SHIP),
        }
    }
}
