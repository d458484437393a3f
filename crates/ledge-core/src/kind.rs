//! Entity kinds and facings.
//!
//! Both enums carry explicit raw values: they are the integers written to
//! the persisted world file, so reordering variants would break saved
//! levels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of entity kinds.
///
/// Raw values are distinct bits so that a set of kinds fits in a
/// [`KindSet`] mask. [`EntityKind::None`] marks a logically deleted slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum EntityKind {
    /// Deleted slot, awaiting reclamation.
    #[default]
    None = 0,
    /// Player-controlled body.
    Player = 1,
    /// Immovable obstacle.
    Static = 2,
    /// Walking enemy.
    Monster = 4,
    /// Thrown body that launches monsters on contact.
    Projectile = 8,
    /// Short-lived melee hitbox in front of a player.
    PlayerAttack = 16,
    /// Hazard that kills monsters.
    Spike = 32,
    /// Level exit, open once no monsters remain.
    Door = 64,
}

impl EntityKind {
    /// Number of kinds, including `None`.
    pub const COUNT: usize = 8;

    /// Every kind in ordinal order.
    pub const ALL: [EntityKind; Self::COUNT] = [
        EntityKind::None,
        EntityKind::Player,
        EntityKind::Static,
        EntityKind::Monster,
        EntityKind::Projectile,
        EntityKind::PlayerAttack,
        EntityKind::Spike,
        EntityKind::Door,
    ];

    /// The persisted integer value.
    #[inline]
    pub fn as_raw(self) -> u16 {
        self as u16
    }

    /// Parse a persisted integer value. Unknown values yield `None`.
    pub fn from_raw(raw: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_raw() == raw)
    }

    /// Dense position in [`EntityKind::ALL`], for table lookups.
    #[inline]
    pub fn ordinal(self) -> usize {
        match self {
            EntityKind::None => 0,
            other => other.as_raw().trailing_zeros() as usize + 1,
        }
    }

    /// Whether the slot holds a living entity.
    #[inline]
    pub fn is_alive(self) -> bool {
        self != EntityKind::None
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::None => "none",
            EntityKind::Player => "player",
            EntityKind::Static => "static",
            EntityKind::Monster => "monster",
            EntityKind::Projectile => "projectile",
            EntityKind::PlayerAttack => "player_attack",
            EntityKind::Spike => "spike",
            EntityKind::Door => "door",
        };
        f.write_str(name)
    }
}

/// A set of entity kinds packed into the kinds' raw bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KindSet(u16);

impl KindSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Whether `kind` is a member. `None` is never a member.
    #[inline]
    pub fn contains(self, kind: EntityKind) -> bool {
        self.0 & kind.as_raw() != 0
    }

    /// Add `kind` to the set.
    #[inline]
    pub fn insert(&mut self, kind: EntityKind) {
        self.0 |= kind.as_raw();
    }

    /// Whether the set has no members.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in ordinal order.
    pub fn iter(self) -> impl Iterator<Item = EntityKind> {
        EntityKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl FromIterator<EntityKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = EntityKind>>(iter: I) -> Self {
        let mut set = KindSet::EMPTY;
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

/// Facing direction of an entity.
///
/// Doors use it to name the neighbouring level they lead to; monsters use
/// `Down` to mean "standing still, centered on a too-narrow support".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Facing {
    /// No direction.
    #[default]
    None = 0,
    /// Up.
    Up = 1,
    /// Right.
    Right = 2,
    /// Down.
    Down = 3,
    /// Left.
    Left = 4,
}

impl Facing {
    /// The persisted integer value.
    #[inline]
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    /// Parse a persisted integer value. Unknown values yield `None`.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Facing::None),
            1 => Some(Facing::Up),
            2 => Some(Facing::Right),
            3 => Some(Facing::Down),
            4 => Some(Facing::Left),
            _ => None,
        }
    }

    /// Horizontal sign of this facing: `1.0`, `-1.0`, or `0.0`.
    pub fn horizontal_sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
            _ => 0.0,
        }
    }

    /// The opposite horizontal facing. Vertical facings are unchanged.
    pub fn reversed(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_match_persisted_format() {
        assert_eq!(EntityKind::Player.as_raw(), 1);
        assert_eq!(EntityKind::Static.as_raw(), 2);
        assert_eq!(EntityKind::Monster.as_raw(), 4);
        assert_eq!(EntityKind::Door.as_raw(), 64);
        assert_eq!(Facing::Left.as_raw(), 4);
    }

    #[test]
    fn ordinals_are_dense() {
        for (i, kind) in EntityKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.ordinal(), i);
            assert_eq!(EntityKind::from_raw(kind.as_raw()), Some(kind));
        }
        assert_eq!(EntityKind::from_raw(3), None);
        assert_eq!(EntityKind::from_raw(128), None);
    }

    #[test]
    fn kind_set_membership() {
        let set: KindSet = [EntityKind::Spike, EntityKind::Projectile]
            .into_iter()
            .collect();
        assert!(set.contains(EntityKind::Spike));
        assert!(!set.contains(EntityKind::Door));
        assert!(!set.contains(EntityKind::None));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![EntityKind::Projectile, EntityKind::Spike]
        );
    }

    #[test]
    fn facing_parse_and_reverse() {
        assert_eq!(Facing::from_raw(2), Some(Facing::Right));
        assert_eq!(Facing::from_raw(5), None);
        assert_eq!(Facing::Right.reversed(), Facing::Left);
        assert_eq!(Facing::Down.reversed(), Facing::Down);
        assert_eq!(Facing::Left.horizontal_sign(), -1.0);
    }
}
