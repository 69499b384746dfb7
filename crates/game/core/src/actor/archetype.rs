//! Archetype descriptors.
//!
//! Every enemy is one [`EnemyController`](super::EnemyController)
//! parameterized by an [`ArchetypeProfile`]. Behavioural differences between
//! kinds come from the profile's [`Capabilities`] and from the behavior tree
//! built for the [`Archetype`], never from subtyping.

use bitflags::bitflags;
use glam::Vec2;

use crate::combat::ProjectileKind;
use crate::config::ConfigError;
use crate::env::GameRng;

/// The closed set of enemy kinds.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Archetype {
    /// Chases the player and strikes at close range.
    Melee,
    /// Chases the player and casts magic once in range.
    Mage,
    /// Stationary; blinks next to the player and throws potions.
    Teleporter,
    /// Keeps a randomized distance from the player and shoots tusks.
    Ranger,
    /// Melee when close, ranged otherwise; evades and rapid-fires when hit.
    Boss,
}

bitflags! {
    /// What an archetype is able to do.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capabilities: u8 {
        /// Directional melee strike.
        const MELEE          = 1 << 0;
        /// Fires projectiles.
        const RANGED         = 1 << 1;
        /// Can relocate instantly to an offset tile around the player.
        const TELEPORT       = 1 << 2;
        /// Taking damage opens the next teleport window immediately.
        const BLINK_ON_HIT   = 1 << 3;
        /// Taking damage forces a teleport, drops the route and starts rapid fire.
        const EVADE_ON_HIT   = 1 << 4;
        /// Picks a random payload for every shot.
        const RANDOM_PAYLOAD = 1 << 5;
        /// Teleports back when it ends a fixed step outside walkable space.
        const ROOM_BOUND     = 1 << 6;
    }
}

/// Closed-open range of seconds `[min, max)` a timer threshold is drawn from.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, rng: &mut GameRng) -> f32 {
        rng.uniform(self.min, self.max)
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && 0.0 <= self.min && self.min <= self.max
    }
}

/// Tunable parameters of one archetype.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArchetypeProfile {
    pub health: i32,
    /// World units per second while following a route.
    pub speed: f32,
    /// Body size in world units.
    pub footprint: Vec2,
    pub melee_damage: i32,
    pub ranged_damage: i32,
    /// Midpoint-to-midpoint distance under which attacks are attempted.
    pub attack_range: f32,
    /// Upper bound (tiles, per axis) of offset targets around the player.
    pub max_offset_tiles: i32,
    /// Fixed payload; ignored when `RANDOM_PAYLOAD` is set.
    pub projectile: Option<ProjectileKind>,
    pub capabilities: Capabilities,
    /// Ranged fire threshold, re-rolled on every fire attempt.
    pub fire_interval: Interval,
    /// Offset pursuit re-route threshold.
    pub reroute_interval: Interval,
    /// Idle time before a teleport.
    pub teleport_interval: Interval,
}

impl ArchetypeProfile {
    const FOOTPRINT: Vec2 = Vec2::splat(16.0);
    const FIRE: Interval = Interval::new(1.0, 2.0);
    const REROUTE: Interval = Interval::new(1.0, 3.0);
    const TELEPORT: Interval = Interval::new(4.0, 8.0);

    pub fn melee() -> Self {
        Self {
            health: 100,
            speed: 70.0,
            footprint: Self::FOOTPRINT,
            melee_damage: 1,
            ranged_damage: 0,
            attack_range: 3.0 * 16.0,
            max_offset_tiles: 0,
            projectile: None,
            capabilities: Capabilities::MELEE,
            fire_interval: Self::FIRE,
            reroute_interval: Self::REROUTE,
            teleport_interval: Self::TELEPORT,
        }
    }

    pub fn mage() -> Self {
        Self {
            speed: 60.0,
            melee_damage: 0,
            ranged_damage: 4,
            attack_range: 7.0 * 16.0,
            projectile: Some(ProjectileKind::Magic),
            capabilities: Capabilities::RANGED,
            ..Self::melee()
        }
    }

    pub fn teleporter() -> Self {
        Self {
            speed: 0.0,
            melee_damage: 0,
            ranged_damage: 6,
            attack_range: 0.0,
            max_offset_tiles: 8,
            projectile: Some(ProjectileKind::Potion),
            capabilities: Capabilities::RANGED | Capabilities::TELEPORT | Capabilities::BLINK_ON_HIT,
            ..Self::melee()
        }
    }

    pub fn ranger() -> Self {
        Self {
            speed: 80.0,
            melee_damage: 0,
            ranged_damage: 2,
            attack_range: 12.0 * 16.0,
            max_offset_tiles: 8,
            projectile: Some(ProjectileKind::Tusk),
            capabilities: Capabilities::RANGED,
            ..Self::melee()
        }
    }

    pub fn boss() -> Self {
        Self {
            health: 250,
            speed: 82.5,
            melee_damage: 20,
            ranged_damage: 5,
            attack_range: 6.0 * 16.0,
            max_offset_tiles: 15,
            projectile: None,
            capabilities: Capabilities::MELEE
                | Capabilities::RANGED
                | Capabilities::TELEPORT
                | Capabilities::EVADE_ON_HIT
                | Capabilities::RANDOM_PAYLOAD
                | Capabilities::ROOM_BOUND,
            ..Self::melee()
        }
    }

    pub fn has(&self, capability: Capabilities) -> bool {
        self.capabilities.contains(capability)
    }

    /// Rejects profiles that would misbehave at tick time.
    pub fn validate(&self, archetype: Archetype) -> Result<(), ConfigError> {
        if self.health <= 0 {
            return Err(ConfigError::NonPositiveHealth(archetype));
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(ConfigError::Negative {
                field: "speed",
                value: self.speed,
            });
        }
        if !(self.footprint.x > 0.0 && self.footprint.y > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "footprint",
                value: self.footprint.min_element(),
            });
        }
        for (field, interval) in [
            ("fire_interval", self.fire_interval),
            ("reroute_interval", self.reroute_interval),
            ("teleport_interval", self.teleport_interval),
        ] {
            if !interval.is_valid() {
                return Err(ConfigError::InvalidInterval {
                    archetype,
                    field,
                    min: interval.min,
                    max: interval.max,
                });
            }
        }
        if self.has(Capabilities::RANGED)
            && !self.has(Capabilities::RANDOM_PAYLOAD)
            && self.projectile.is_none()
        {
            return Err(ConfigError::MissingProjectile(archetype));
        }
        if self.has(Capabilities::TELEPORT) && self.max_offset_tiles < 2 {
            return Err(ConfigError::OffsetTooSmall {
                archetype,
                value: self.max_offset_tiles,
            });
        }
        Ok(())
    }
}

/// One profile per archetype.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArchetypeTable {
    pub melee: ArchetypeProfile,
    pub mage: ArchetypeProfile,
    pub teleporter: ArchetypeProfile,
    pub ranger: ArchetypeProfile,
    pub boss: ArchetypeProfile,
}

impl ArchetypeTable {
    pub fn get(&self, archetype: Archetype) -> &ArchetypeProfile {
        match archetype {
            Archetype::Melee => &self.melee,
            Archetype::Mage => &self.mage,
            Archetype::Teleporter => &self.teleporter,
            Archetype::Ranger => &self.ranger,
            Archetype::Boss => &self.boss,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        use strum::IntoEnumIterator;
        Archetype::iter().try_for_each(|archetype| self.get(archetype).validate(archetype))
    }
}

impl Default for ArchetypeTable {
    fn default() -> Self {
        Self {
            melee: ArchetypeProfile::melee(),
            mage: ArchetypeProfile::mage(),
            teleporter: ArchetypeProfile::teleporter(),
            ranger: ArchetypeProfile::ranger(),
            boss: ArchetypeProfile::boss(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_valid() {
        ArchetypeTable::default().validate().unwrap();
    }

    #[test]
    fn boss_capabilities() {
        let boss = ArchetypeProfile::boss();
        assert!(boss.has(Capabilities::MELEE | Capabilities::RANGED));
        assert!(boss.has(Capabilities::EVADE_ON_HIT));
        assert!(!boss.has(Capabilities::BLINK_ON_HIT));
        assert_eq!(boss.health, 250);
    }

    #[test]
    fn ranged_without_payload_is_rejected() {
        let mut mage = ArchetypeProfile::mage();
        mage.projectile = None;
        assert_eq!(
            mage.validate(Archetype::Mage),
            Err(ConfigError::MissingProjectile(Archetype::Mage))
        );
    }

    #[test]
    fn inverted_interval_is_rejected() {
        let mut ranger = ArchetypeProfile::ranger();
        ranger.reroute_interval = Interval::new(3.0, 1.0);
        assert!(matches!(
            ranger.validate(Archetype::Ranger),
            Err(ConfigError::InvalidInterval {
                field: "reroute_interval",
                ..
            })
        ));
    }

    #[test]
    fn archetype_names() {
        assert_eq!(Archetype::Teleporter.to_string(), "teleporter");
        assert_eq!("Boss".parse::<Archetype>().unwrap(), Archetype::Boss);
    }
}
