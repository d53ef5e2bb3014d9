//! Enemy AI module
//!
//! Generic FSM (`fsm`) + шесть состояний врага (`states`) + агрегат
//! `Enemy`, который связывает FSM, perception и navigation follower.
//!
//! Per tick (FixedUpdate, 60 Hz):
//! perception скан → FSM transitions → state tick → follower cycle.

use bevy::prelude::*;

use crate::combat::{
    apply_damage_requests, despawn_after_timeout, resolve_enemy_attacks, ApplyDamage, EnemyDied, HealRequest,
    TookDamage,
};
use crate::components::{layers::COLLISION_LAYER_ENEMIES, Health, Targetable};
use crate::config::EnemyConfig;
use crate::navigation::{drive_navigation_movers, run_followers};
use crate::perception::{scan_fields_of_view, FieldOfView, Obstructions, TargetDetected, TargetLost};
use crate::timers::{cancel_timers_for_despawned, tick_deferred_timers, DeferredTimers};

pub mod agent;
pub mod brain;
pub mod events;
pub mod fsm;
pub mod states;
pub mod systems;

// Re-export основных типов
pub use agent::{DamageOutcome, Enemy};
pub use brain::EnemyBrain;
pub use events::{AttackPerformed, EnemyStateChanged};
pub use fsm::{StateChange, StateHost, StateMachine};
pub use states::{AttackIntent, StateId, TargetInfo};
pub use systems::tick_enemy_brains;


/// Enemy AI Plugin
///
/// Регистрирует события, ресурсы и системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. tick_deferred_timers — отложенные действия (конец knockback)
/// 2. apply_damage_requests — урон/лечение → damage pulse, смерть
/// 3. scan_fields_of_view — perception на своём countdown
/// 4. tick_enemy_brains — FSM transitions + state tick
/// 5. run_followers — follower cycle (post-transition state)
/// 6. drive_navigation_movers — движение / warp / knockback slide
/// 7. resolve_enemy_attacks — AttackIntent → ApplyDamage (следующий tick)
/// 8. cancel_timers_for_despawned — despawn отменяет таймеры
/// 9. despawn_after_timeout — уборка трупов
pub struct EnemyAiPlugin;

impl Plugin for EnemyAiPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ApplyDamage>()
            .add_event::<HealRequest>()
            .add_event::<TookDamage>()
            .add_event::<EnemyDied>()
            .add_event::<EnemyStateChanged>()
            .add_event::<TargetDetected>()
            .add_event::<TargetLost>()
            .add_event::<AttackPerformed>()
            .init_resource::<DeferredTimers>()
            .init_resource::<Obstructions>();

        app.add_systems(
            FixedUpdate,
            (
                tick_deferred_timers,
                apply_damage_requests,
                scan_fields_of_view,
                tick_enemy_brains,
                run_followers,
                drive_navigation_movers,
                resolve_enemy_attacks,
                cancel_timers_for_despawned,
                despawn_after_timeout,
            )
                .chain(), // Последовательное выполнение для детерминизма
        );
    }
}

/// Всё что нужно для спавна врага
#[derive(Debug, Clone)]
pub struct EnemySpawn {
    pub config: EnemyConfig,
    pub position: Vec3,
    pub route: Vec<Vec3>,
    /// Seed per-agent RNG (обычно из `DeterministicRng`)
    pub seed: u64,
}

impl EnemySpawn {
    pub fn new(config: EnemyConfig, position: Vec3) -> Self {
        Self {
            config,
            position,
            route: Vec::new(),
            seed: 0,
        }
    }

    pub fn with_route(mut self, route: Vec<Vec3>) -> Self {
        self.route = route;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Компоненты врага: Enemy + Health + FieldOfView + Transform + Targetable
    pub fn into_bundle(self) -> impl Bundle {
        let health = Health::new(self.config.max_health);
        let fov = FieldOfView::from_config(&self.config.perception);
        let enemy = Enemy::new(self.config, self.position, self.route, self.seed);

        (
            enemy,
            health,
            fov,
            Transform::from_translation(self.position),
            Targetable::new(COLLISION_LAYER_ENEMIES),
        )
    }
}
