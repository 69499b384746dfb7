//! Game configuration constants and tunable parameters.

use crate::actor::{Archetype, ArchetypeTable};
use crate::error::{ErrorSeverity, GameError};
use crate::player::PlayerProfile;

/// Global tunables. Defaults reproduce the shipped game's feel.
///
/// Loaded from TOML by `game-content`; every field is optional there and
/// falls back to the value below.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Edge length of one tile in world units.
    pub tile_size: f32,
    /// Seconds per physics (route integration) step.
    pub fixed_timestep: f32,
    /// Upper bound on fixed steps run for a single frame.
    pub max_fixed_steps: u32,
    /// Chase leaves only re-path when the target is farther than this many tiles.
    pub move_trigger_tiles: f32,
    /// Re-route timer threshold of the path-reset leaf.
    pub path_reset_secs: f32,
    /// Melee cooldown.
    pub attack_cooldown_secs: f32,
    /// How far a melee hitbox reaches past the attacker's body.
    pub melee_reach: f32,
    /// How long hit feedback stays on an actor.
    pub damage_feedback_secs: f32,
    /// Duration of the boss's rapid-fire window.
    pub rapid_fire_secs: f32,
    /// Attempts before a forced teleport gives up and the actor stays put.
    pub teleport_retry_limit: u32,
    pub projectile_speed: f32,
    /// Edge length of a (square) projectile.
    pub projectile_size: f32,
    /// Seed of the encounter RNG.
    pub rng_seed: u64,
    pub player: PlayerProfile,
    pub archetypes: ArchetypeTable,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TILE_SIZE: f32 = 16.0;
    pub const DEFAULT_FIXED_TIMESTEP: f32 = 0.02;
    pub const DEFAULT_MAX_FIXED_STEPS: u32 = 5;
    pub const DEFAULT_MOVE_TRIGGER_TILES: f32 = 1.5;
    pub const DEFAULT_PATH_RESET_SECS: f32 = 1.0;
    pub const DEFAULT_ATTACK_COOLDOWN_SECS: f32 = 1.0;
    pub const DEFAULT_MELEE_REACH: f32 = 16.0;
    pub const DEFAULT_DAMAGE_FEEDBACK_SECS: f32 = 1.0;
    pub const DEFAULT_RAPID_FIRE_SECS: f32 = 3.0;
    pub const DEFAULT_TELEPORT_RETRY_LIMIT: u32 = 50;
    pub const DEFAULT_PROJECTILE_SPEED: f32 = 150.0;
    pub const DEFAULT_PROJECTILE_SIZE: f32 = 8.0;
    pub const DEFAULT_RNG_SEED: u64 = 0x5EED;

    pub fn new() -> Self {
        Self {
            tile_size: Self::DEFAULT_TILE_SIZE,
            fixed_timestep: Self::DEFAULT_FIXED_TIMESTEP,
            max_fixed_steps: Self::DEFAULT_MAX_FIXED_STEPS,
            move_trigger_tiles: Self::DEFAULT_MOVE_TRIGGER_TILES,
            path_reset_secs: Self::DEFAULT_PATH_RESET_SECS,
            attack_cooldown_secs: Self::DEFAULT_ATTACK_COOLDOWN_SECS,
            melee_reach: Self::DEFAULT_MELEE_REACH,
            damage_feedback_secs: Self::DEFAULT_DAMAGE_FEEDBACK_SECS,
            rapid_fire_secs: Self::DEFAULT_RAPID_FIRE_SECS,
            teleport_retry_limit: Self::DEFAULT_TELEPORT_RETRY_LIMIT,
            projectile_speed: Self::DEFAULT_PROJECTILE_SPEED,
            projectile_size: Self::DEFAULT_PROJECTILE_SIZE,
            rng_seed: Self::DEFAULT_RNG_SEED,
            player: PlayerProfile::default(),
            archetypes: ArchetypeTable::default(),
        }
    }

    #[must_use]
    pub fn with_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }

    /// Distance (world units) beyond which chase leaves re-path.
    pub fn move_trigger_distance(&self) -> f32 {
        self.move_trigger_tiles * self.tile_size
    }

    /// Rejects configurations that would misbehave at tick time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("tile_size", self.tile_size),
            ("fixed_timestep", self.fixed_timestep),
            ("path_reset_secs", self.path_reset_secs),
            ("projectile_speed", self.projectile_speed),
            ("projectile_size", self.projectile_size),
            ("player.speed", self.player.speed),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("move_trigger_tiles", self.move_trigger_tiles),
            ("attack_cooldown_secs", self.attack_cooldown_secs),
            ("melee_reach", self.melee_reach),
            ("damage_feedback_secs", self.damage_feedback_secs),
            ("rapid_fire_secs", self.rapid_fire_secs),
            ("player.arrow_cooldown_secs", self.player.arrow_cooldown_secs),
            ("player.melee_cooldown_secs", self.player.melee_cooldown_secs),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.max_fixed_steps == 0 {
            return Err(ConfigError::ZeroLimit("max_fixed_steps"));
        }
        if self.teleport_retry_limit == 0 {
            return Err(ConfigError::ZeroLimit("teleport_retry_limit"));
        }
        if self.player.health <= 0 {
            return Err(ConfigError::NonPositive {
                field: "player.health",
                value: self.player.health as f32,
            });
        }
        self.archetypes.validate()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration rejected during validation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{0} must be at least 1")]
    ZeroLimit(&'static str),

    #[error("{0}: health must be positive")]
    NonPositiveHealth(Archetype),

    #[error("{archetype}: {field} has min {min} above max {max}")]
    InvalidInterval {
        archetype: Archetype,
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{0}: ranged archetype has no projectile payload")]
    MissingProjectile(Archetype),

    #[error("{archetype}: teleport offset must be at least 2 tiles, got {value}")]
    OffsetTooSmall { archetype: Archetype, value: i32 },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositive { .. } => "CONFIG_NON_POSITIVE",
            Self::Negative { .. } => "CONFIG_NEGATIVE",
            Self::ZeroLimit(_) => "CONFIG_ZERO_LIMIT",
            Self::NonPositiveHealth(_) => "CONFIG_NON_POSITIVE_HEALTH",
            Self::InvalidInterval { .. } => "CONFIG_INVALID_INTERVAL",
            Self::MissingProjectile(_) => "CONFIG_MISSING_PROJECTILE",
            Self::OffsetTooSmall { .. } => "CONFIG_OFFSET_TOO_SMALL",
        }
    }
}
