//! Error types for enemy configuration.

use thiserror::Error;

/// Ошибки загрузки / валидации EnemyConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {details}")]
    Read { path: String, details: String },

    #[error("RON parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("max_health must be greater than zero")]
    ZeroMaxHealth,

    #[error("Invalid range for {field}: min {min} > max {max} (or negative)")]
    InvalidRange { field: &'static str, min: f32, max: f32 },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("perception.half_angle_degrees must be in (0, 180], got {0}")]
    HalfAngleOutOfRange(f32),

    /// Patrol без маршрута — агент будет стоять в Idle
    #[error("Patrol route is empty")]
    EmptyPatrolRoute,

    /// Нет FieldOfView — агент никогда не перейдёт в Chase/Attack
    #[error("No FieldOfView attached, agent will never chase or attack")]
    MissingPerception,
}
