//! Enemy configuration (data-driven, RON)
//!
//! Все числа агента (таймеры, скорости, радиусы) живут в `EnemyConfig`.
//! Конфиг задаётся один раз при спавне и дальше только читается.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

mod error;

pub use error::ConfigError;

use crate::components::layers::{COLLISION_LAYER_ENVIRONMENT, COLLISION_LAYER_PLAYER};

/// Параметры Field of View
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct PerceptionConfig {
    /// Радиус обнаружения (метры)
    pub radius: f32,
    /// Половина угла конуса (градусы, 0..=180)
    pub half_angle_degrees: f32,
    /// Маска слоёв которые считаются целями
    pub target_mask: u32,
    /// Маска слоёв которые перекрывают обзор
    pub obstruction_mask: u32,
    /// Интервал между сканами (секунды)
    pub rescan_interval: f32,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            radius: 12.0,
            half_angle_degrees: 60.0,
            target_mask: COLLISION_LAYER_PLAYER,
            obstruction_mask: COLLISION_LAYER_ENVIRONMENT,
            rescan_interval: 0.2, // 5 Hz — человеческое время реакции
        }
    }
}

/// Параметры врага
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct EnemyConfig {
    pub max_health: u32,

    /// Idle: диапазон ожидания (секунды)
    pub min_idle_time: f32,
    pub max_idle_time: f32,

    /// Patrol: диапазон длительности патруля (секунды)
    pub min_patrol_time: f32,
    pub max_patrol_time: f32,

    /// Скорости mover'а (м/с)
    pub patrol_speed: f32,
    pub chase_speed: f32,

    /// Дистанция на которой waypoint считается достигнутым
    pub patrol_stop_distance: f32,

    /// Радиус зоны атаки оружия (он же stop distance для Chase/Attack)
    pub attack_radius: f32,
    /// Пауза между атаками (секунды)
    pub attack_delay: f32,
    pub attack_damage: u32,

    /// TakingDamage: время восстановления после удара
    pub damage_recovery_time: f32,

    /// Knockback: через сколько секунд возвращаем навигацию
    pub knockback_recovery_time: f32,
    /// Затухание скорости отбрасывания (1/сек)
    pub knockback_damping: f32,

    /// Follower: период пересчёта destination (секунды)
    pub time_to_start_following: f32,

    /// Размер obstacle footprint (x, y, z)
    pub obstacle_size: [f32; 3],

    /// Через сколько секунд после смерти убрать труп (None = оставить)
    pub corpse_lifetime: Option<f32>,

    pub perception: PerceptionConfig,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            min_idle_time: 1.0,
            max_idle_time: 3.0,
            min_patrol_time: 5.0,
            max_patrol_time: 10.0,
            patrol_speed: 2.0,
            chase_speed: 4.0,
            patrol_stop_distance: 0.5,
            attack_radius: 1.5,
            attack_delay: 1.2,
            attack_damage: 10,
            damage_recovery_time: 0.5,
            knockback_recovery_time: 0.4,
            knockback_damping: 8.0,
            time_to_start_following: 0.25,
            obstacle_size: [0.8, 2.0, 0.8],
            corpse_lifetime: None,
            perception: PerceptionConfig::default(),
        }
    }
}

impl EnemyConfig {
    /// Парсинг + валидация из RON строки
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: EnemyConfig = ron::from_str(source)?;

        match config.validate().into_iter().next() {
            Some(problem) => Err(problem),
            None => Ok(config),
        }
    }

    /// Загрузка из файла (assets/enemies/*.ron)
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;

        Self::from_ron_str(&source)
    }

    /// Все проблемы конфига (пустой Vec = валиден)
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut problems = Vec::new();

        if self.max_health == 0 {
            problems.push(ConfigError::ZeroMaxHealth);
        }

        check_range(&mut problems, "idle_time", self.min_idle_time, self.max_idle_time);
        check_range(&mut problems, "patrol_time", self.min_patrol_time, self.max_patrol_time);

        check_positive(&mut problems, "patrol_speed", self.patrol_speed);
        check_positive(&mut problems, "chase_speed", self.chase_speed);
        check_positive(&mut problems, "attack_radius", self.attack_radius);
        check_positive(&mut problems, "time_to_start_following", self.time_to_start_following);
        check_positive(&mut problems, "perception.radius", self.perception.radius);
        check_positive(&mut problems, "perception.rescan_interval", self.perception.rescan_interval);

        check_non_negative(&mut problems, "patrol_stop_distance", self.patrol_stop_distance);
        check_non_negative(&mut problems, "attack_delay", self.attack_delay);
        check_non_negative(&mut problems, "damage_recovery_time", self.damage_recovery_time);
        check_non_negative(&mut problems, "knockback_recovery_time", self.knockback_recovery_time);

        let half_angle = self.perception.half_angle_degrees;
        if !(half_angle > 0.0 && half_angle <= 180.0) {
            problems.push(ConfigError::HalfAngleOutOfRange(half_angle));
        }

        if self.obstacle_size.iter().any(|&extent| extent <= 0.0) {
            problems.push(ConfigError::NonPositive {
                field: "obstacle_size",
                value: self.obstacle_size.iter().copied().fold(f32::INFINITY, f32::min),
            });
        }

        problems
    }

    pub fn obstacle_extent(&self) -> Vec3 {
        Vec3::from_array(self.obstacle_size)
    }

    pub fn half_angle_radians(&self) -> f32 {
        self.perception.half_angle_degrees.to_radians()
    }
}

fn check_range(problems: &mut Vec<ConfigError>, field: &'static str, min: f32, max: f32) {
    if min < 0.0 || max < min {
        problems.push(ConfigError::InvalidRange { field, min, max });
    }
}

fn check_positive(problems: &mut Vec<ConfigError>, field: &'static str, value: f32) {
    if value <= 0.0 {
        problems.push(ConfigError::NonPositive { field, value });
    }
}

fn check_non_negative(problems: &mut Vec<ConfigError>, field: &'static str, value: f32) {
    if value < 0.0 {
        problems.push(ConfigError::Negative { field, value });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EnemyConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.perception.rescan_interval, 0.2);
        assert_eq!(config.obstacle_extent(), Vec3::new(0.8, 2.0, 0.8));
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let config = EnemyConfig {
            max_health: 0,
            min_idle_time: 3.0,
            max_idle_time: 1.0,
            chase_speed: 0.0,
            ..Default::default()
        };

        let problems = config.validate();
        assert_eq!(problems.len(), 3, "problems = {:?}", problems);
        assert!(problems.iter().any(|p| matches!(p, ConfigError::ZeroMaxHealth)));
        assert!(problems
            .iter()
            .any(|p| matches!(p, ConfigError::InvalidRange { field: "idle_time", .. })));
        assert!(problems
            .iter()
            .any(|p| matches!(p, ConfigError::NonPositive { field: "chase_speed", .. })));
    }

    #[test]
    fn test_from_ron_partial_uses_defaults() {
        let source = r#"(
            max_health: 40,
            chase_speed: 6.5,
            perception: (radius: 20.0),
        )"#;

        let config = EnemyConfig::from_ron_str(source).expect("valid RON");
        assert_eq!(config.max_health, 40);
        assert_eq!(config.chase_speed, 6.5);
        assert_eq!(config.perception.radius, 20.0);
        assert_eq!(config.perception.half_angle_degrees, 60.0);
        assert_eq!(config.patrol_speed, EnemyConfig::default().patrol_speed);
    }

    #[test]
    fn test_from_ron_rejects_invalid_values() {
        let result = EnemyConfig::from_ron_str("(perception: (half_angle_degrees: 270.0))");
        assert!(matches!(result, Err(ConfigError::HalfAngleOutOfRange(_))));

        let result = EnemyConfig::from_ron_str("(max_health: \"lots\")");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_bundled_enemy_configs_load() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/enemies");

        let grunt = EnemyConfig::load(&dir.join("grunt.ron")).expect("grunt.ron");
        assert_eq!(grunt.corpse_lifetime, Some(5.0));
        assert_eq!(grunt.obstacle_extent(), Vec3::new(0.8, 2.0, 0.8));

        let stalker = EnemyConfig::load(&dir.join("stalker.ron")).expect("stalker.ron");
        assert_eq!(stalker.perception.half_angle_degrees, 90.0);
        assert_eq!(stalker.perception.target_mask, COLLISION_LAYER_PLAYER);
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let result = EnemyConfig::load(std::path::Path::new("does/not/exist.ron"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
