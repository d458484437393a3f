//! Simulation tunables and configuration errors.
//!
//! [`SimConfig`] holds every physics and gameplay constant the behaviors
//! read. It deserialises from TOML with every field optional; missing
//! fields take the defaults below. [`validate()`](SimConfig::validate)
//! rejects values that would make the simulation diverge or stall.

use ledge_core::Vec2;
use serde::Deserialize;
use thiserror::Error;

use crate::overlap::InterestTable;

// ── ConfigError ─────────────────────────────────────────────────

/// Errors detected while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML text could not be parsed into a config.
    #[error("invalid config TOML: {0}")]
    Toml(#[from] toml::de::Error),
    /// A field holds a value outside its valid range.
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the violated constraint.
        reason: String,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Require `value` to be finite and strictly positive.
pub fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be finite and > 0 (got {value})"),
        ))
    }
}

/// Require `value` to be finite and not negative.
pub fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be finite and >= 0 (got {value})"),
        ))
    }
}

/// Require a count to be non-zero.
pub fn require_nonzero(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be > 0"))
    }
}

// ── SimConfig ───────────────────────────────────────────────────

/// Physics and gameplay constants.
///
/// Distances are world units, speeds are world units per tick.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Downward acceleration per tick. Default: 0.005.
    pub gravity: f32,
    /// Upward velocity applied by a jump. Default: 0.2.
    pub jump_velocity: f32,
    /// Magnitude of the fastest fall. Default: 1.5.
    pub terminal_velocity: f32,
    /// Player walking speed. Default: 0.1.
    pub player_move_speed: f32,
    /// Monster walking speed for editor-placed monsters. Default: 0.02.
    pub monster_move_speed: f32,
    /// Gap left between a clamped mover and the obstacle. Default: 0.001.
    pub collision_epsilon: f32,
    /// Statics with a half extent below this are removed. Default: 0.05.
    pub cull_threshold: f32,
    /// Horizontal speed given to a monster hit by an attack. Default: 0.15.
    pub knockback: f32,
    /// Vertical speed given to a monster hit by an attack or projectile.
    /// Default: 0.12.
    pub knockback_lift: f32,
    /// Horizontal speed multiplier applied on each landing tick.
    /// Default: 0.8.
    pub ground_friction: f32,
    /// Horizontal speeds below this snap to zero on the ground.
    /// Default: 0.01.
    pub stop_velocity: f32,
    /// Lifetime of an attack hitbox in ticks. Default: 10.
    pub attack_duration: u32,
    /// Half extents of the attack hitbox. Default: (0.4, 0.3).
    pub attack_radius: Vec2,
    /// Half extents of a thrown projectile. Default: (0.15, 0.15).
    pub projectile_radius: Vec2,
    /// Launch velocity of a projectile thrown to the right; mirrored for
    /// the left. Default: (0.25, 0.1).
    pub projectile_speed: Vec2,
    /// Camera pan per tick while a pan action is held. Default: 0.1.
    pub camera_pan_speed: f32,
    /// World units per screen unit. Default: 1.0.
    pub camera_scale: f32,
    /// Monsters and projectiles falling below this y are removed.
    /// Default: -50.
    pub kill_plane_y: f32,
    /// Where the player appears when a level has none. Default: (0, 3).
    pub player_spawn: Vec2,
    /// Half extents of a spawned player. Default: (0.5, 0.5).
    pub player_radius: Vec2,
    /// Which kinds receive overlap events about which.
    pub interest: InterestTable,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: 0.005,
            jump_velocity: 0.2,
            terminal_velocity: 1.5,
            player_move_speed: 0.1,
            monster_move_speed: 0.02,
            collision_epsilon: 0.001,
            cull_threshold: 0.05,
            knockback: 0.15,
            knockback_lift: 0.12,
            ground_friction: 0.8,
            stop_velocity: 0.01,
            attack_duration: 10,
            attack_radius: Vec2::new(0.4, 0.3),
            projectile_radius: Vec2::new(0.15, 0.15),
            projectile_speed: Vec2::new(0.25, 0.1),
            camera_pan_speed: 0.1,
            camera_scale: 1.0,
            kill_plane_y: -50.0,
            player_spawn: Vec2::new(0.0, 3.0),
            player_radius: Vec2::new(0.5, 0.5),
            interest: InterestTable::default(),
        }
    }
}

impl SimConfig {
    /// Check every constant against its valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("gravity", self.gravity)?;
        require_non_negative("jump_velocity", self.jump_velocity)?;
        require_positive("terminal_velocity", self.terminal_velocity)?;
        require_non_negative("player_move_speed", self.player_move_speed)?;
        require_non_negative("monster_move_speed", self.monster_move_speed)?;
        require_positive("collision_epsilon", self.collision_epsilon)?;
        require_non_negative("cull_threshold", self.cull_threshold)?;
        require_non_negative("knockback", self.knockback)?;
        require_non_negative("knockback_lift", self.knockback_lift)?;
        if !(0.0..=1.0).contains(&self.ground_friction) {
            return Err(ConfigError::invalid(
                "ground_friction",
                format!("must be within [0, 1] (got {})", self.ground_friction),
            ));
        }
        require_non_negative("stop_velocity", self.stop_velocity)?;
        require_nonzero("attack_duration", self.attack_duration as usize)?;
        require_positive("attack_radius.x", self.attack_radius.x)?;
        require_positive("attack_radius.y", self.attack_radius.y)?;
        require_positive("projectile_radius.x", self.projectile_radius.x)?;
        require_positive("projectile_radius.y", self.projectile_radius.y)?;
        require_non_negative("camera_pan_speed", self.camera_pan_speed)?;
        require_positive("camera_scale", self.camera_scale)?;
        if !self.kill_plane_y.is_finite() {
            return Err(ConfigError::invalid("kill_plane_y", "must be finite"));
        }
        require_positive("player_radius.x", self.player_radius.x)?;
        require_positive("player_radius.y", self.player_radius.y)?;
        Ok(())
    }
}
