//! Combat module — урон, смерть, разрешение атак врагов
//!
//! ECS ответственность:
//! - Game state: Health (components::actor)
//! - Combat rules: ApplyDamage/HealRequest → Health, knockback, смерть
//! - Events: TookDamage, EnemyDied
//!
//! Melee hit detection упрощён до проверки дистанции (`within_reach`).

pub mod events;
pub mod systems;

// Re-export основных типов
pub use events::{ApplyDamage, EnemyDied, HealRequest, TookDamage};
pub use systems::{
    apply_damage_requests, despawn_after_timeout, resolve_enemy_attacks, within_reach, DespawnAfter,
    ATTACK_REACH_TOLERANCE,
};
