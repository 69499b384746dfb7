//! Damage-type tagging.
//!
//! The tag only drives the defender's hit-feedback effect; it does not change
//! the amount of damage dealt.

/// Damage classification carried by every hit.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    /// Melee strikes, tusks and arrows.
    Normal,
    Magic,
    Poison,
}

/// Projectile payload. Determines the damage type of a hit.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProjectileKind {
    Magic,
    Tusk,
    Potion,
    /// Fired by the player.
    Arrow,
}

impl ProjectileKind {
    /// Payloads an enemy with a randomized payload picks from.
    pub const ENEMY_PAYLOADS: [ProjectileKind; 3] =
        [ProjectileKind::Magic, ProjectileKind::Tusk, ProjectileKind::Potion];

    pub const fn damage_type(self) -> DamageType {
        match self {
            ProjectileKind::Magic => DamageType::Magic,
            ProjectileKind::Tusk | ProjectileKind::Arrow => DamageType::Normal,
            ProjectileKind::Potion => DamageType::Poison,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn payload_mapping() {
        assert_eq!(ProjectileKind::Magic.damage_type(), DamageType::Magic);
        assert_eq!(ProjectileKind::Tusk.damage_type(), DamageType::Normal);
        assert_eq!(ProjectileKind::Potion.damage_type(), DamageType::Poison);
        assert_eq!(ProjectileKind::Arrow.damage_type(), DamageType::Normal);
    }

    #[test]
    fn parses_names() {
        for kind in ProjectileKind::iter() {
            assert_eq!(kind.to_string().parse::<ProjectileKind>().unwrap(), kind);
        }
        assert_eq!("POTION".parse::<ProjectileKind>().unwrap(), ProjectileKind::Potion);
    }
}
