//! Game configuration
//!
//! Every tunable the simulation reads lives here. Values are fixed once an
//! [`Arena`](crate::sim::Arena) is built; load and validate them at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{Rgba, palette};
use crate::consts::*;
use crate::error::{ArenaError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Base size of every shape template
    pub size_unit: f32,
    /// Seed for asteroid shapes, stars and spawn points
    pub seed: u64,

    // === Craft ===
    pub craft_speed_limit: f32,
    pub craft_speed_step: f32,
    /// Degrees turned per tick while a turn input is held
    pub craft_rotation_step: f32,
    pub craft_health: i32,
    pub craft_color: Rgba,
    pub craft_stroke_color: Rgba,

    // === Asteroids ===
    pub asteroid_speed: f32,
    pub asteroid_health: i32,
    pub asteroid_min_sides: u32,
    pub asteroid_max_sides: u32,
    pub asteroid_color: Rgba,
    /// Spawn one asteroid next to the top-left corner when the arena starts
    pub opening_asteroid: bool,
    /// Ticks between edge spawns (0 disables the spawner)
    pub asteroid_spawn_interval: u32,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_damage: i32,
    pub projectile_color: Rgba,

    // === Death effects ===
    pub effect_speed: f32,
    pub asteroid_effect_speed: f32,

    // === Collision ===
    pub hit_proximity: f32,

    // === Background ===
    pub star_count: u32,
    pub star_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size_unit: SIZE_UNIT,
            seed: 0x5EED,

            craft_speed_limit: CRAFT_SPEED_LIMIT,
            craft_speed_step: CRAFT_SPEED_STEP,
            craft_rotation_step: CRAFT_ROTATION_STEP,
            craft_health: CRAFT_HEALTH,
            craft_color: palette::DEEP_PINK,
            craft_stroke_color: palette::DARK_SLATE_GRAY,

            asteroid_speed: ASTEROID_SPEED,
            asteroid_health: ASTEROID_HEALTH,
            asteroid_min_sides: ASTEROID_MIN_SIDES,
            asteroid_max_sides: ASTEROID_MAX_SIDES,
            asteroid_color: palette::SLATE_BLUE,
            opening_asteroid: true,
            asteroid_spawn_interval: 0,

            projectile_speed: PROJECTILE_SPEED,
            projectile_damage: PROJECTILE_DAMAGE,
            projectile_color: palette::STEEL_BLUE,

            effect_speed: EFFECT_SPEED,
            asteroid_effect_speed: ASTEROID_EFFECT_SPEED,

            hit_proximity: HIT_PROXIMITY,

            star_count: STAR_COUNT,
            star_size: STAR_SIZE,
        }
    }
}

impl GameConfig {
    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values that would produce degenerate geometry or motion
    pub fn validate(&self) -> Result<()> {
        positive("size_unit", self.size_unit)?;
        finite("craft_speed_limit", self.craft_speed_limit)?;
        positive("craft_speed_limit", self.craft_speed_limit)?;
        positive("craft_speed_step", self.craft_speed_step)?;
        positive("craft_rotation_step", self.craft_rotation_step)?;
        if self.craft_rotation_step >= 360.0 {
            return Err(invalid("craft_rotation_step", "must be below 360 degrees"));
        }
        finite("asteroid_speed", self.asteroid_speed)?;
        finite("projectile_speed", self.projectile_speed)?;
        if self.asteroid_min_sides < 3 {
            return Err(invalid("asteroid_min_sides", "a polygon needs at least 3 sides"));
        }
        if self.asteroid_min_sides > self.asteroid_max_sides {
            return Err(invalid(
                "asteroid_max_sides",
                format!(
                    "{} is below asteroid_min_sides ({})",
                    self.asteroid_max_sides, self.asteroid_min_sides
                ),
            ));
        }
        // A zero step never doubles, so the effect would never fade out
        positive("effect_speed", self.effect_speed)?;
        positive("asteroid_effect_speed", self.asteroid_effect_speed)?;
        positive("hit_proximity", self.hit_proximity)?;
        positive("star_size", self.star_size)?;
        // Zero health would leave an entity alive but already spent
        positive_count("craft_health", self.craft_health)?;
        positive_count("asteroid_health", self.asteroid_health)?;
        positive_count("projectile_damage", self.projectile_damage)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ArenaError {
    ArenaError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}

fn finite(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is not finite")))
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be positive")))
    }
}

fn positive_count(field: &'static str, value: i32) -> Result<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be positive")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_degenerate_size_unit() {
        for size_unit in [0.0, -25.0, f32::NAN, f32::INFINITY] {
            let config = GameConfig {
                size_unit,
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert!(
                matches!(err, ArenaError::InvalidConfig { field: "size_unit", .. }),
                "{size_unit} -> {err}"
            );
        }
    }

    #[test]
    fn test_rejects_inverted_side_range() {
        let config = GameConfig {
            asteroid_min_sides: 9,
            asteroid_max_sides: 5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_effect_speed() {
        let config = GameConfig {
            effect_speed: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_spent_health_and_damage() {
        let configs = [
            GameConfig {
                asteroid_health: 0,
                ..Default::default()
            },
            GameConfig {
                craft_health: -5,
                ..Default::default()
            },
            GameConfig {
                projectile_damage: 0,
                ..Default::default()
            },
        ];
        let fields: Vec<&str> = configs
            .iter()
            .map(|config| match config.validate() {
                Err(ArenaError::InvalidConfig { field, .. }) => field,
                other => panic!("expected InvalidConfig, got {other:?}"),
            })
            .collect();
        assert_eq!(fields, ["asteroid_health", "craft_health", "projectile_damage"]);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "size_unit": 40.0, "seed": 7 }"#).unwrap();
        assert_eq!(config.size_unit, 40.0);
        assert_eq!(config.seed, 7);
        assert_eq!(config.projectile_damage, PROJECTILE_DAMAGE);
    }

    #[test]
    fn test_from_json_validates() {
        let err = GameConfig::from_json(r#"{ "size_unit": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ArenaError::InvalidConfig { .. }));

        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ArenaError::Json(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load("/nonexistent/arena.json").unwrap_err();
        assert!(matches!(err, ArenaError::Io(_)));
    }

    #[test]
    fn test_colors_round_trip_as_structs() {
        let json = serde_json::to_string(&GameConfig::default()).unwrap();
        assert!(json.contains(r#""craft_color":{"r":255,"g":20,"b":147,"a":255}"#));
        assert_eq!(GameConfig::from_json(&json).unwrap(), GameConfig::default());
    }
}
