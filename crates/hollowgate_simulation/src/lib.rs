//! HOLLOWGATE Simulation Core
//!
//! ECS-симуляция врагов на Bevy 0.16 (headless)
//!
//! Движок поведения врагов:
//! - generic FSM с any-state приоритетом и terminal Dead
//! - perception (Field of View скан с detect/lose событиями)
//! - navigation follower (mover vs obstacle, knockback)
//! - урон, смерть, отложенные таймеры с отменой
//!
//! Pathfinding, рендер и анимация — снаружи движка.

use bevy::prelude::*;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod navigation;
pub mod perception;
pub mod timers;

// Re-export базовых типов для удобства
pub use ai::{
    AttackPerformed, DamageOutcome, Enemy, EnemyAiPlugin, EnemySpawn, EnemyStateChanged, StateId, TargetInfo,
};
pub use combat::{ApplyDamage, DespawnAfter, EnemyDied, HealRequest, TookDamage};
pub use components::*;
pub use config::{ConfigError, EnemyConfig, PerceptionConfig};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use navigation::{Follower, NavigationFootprint};
pub use perception::{FieldOfView, Obstruction, Obstructions, TargetDetected, TargetLost};
pub use timers::{DeferredAction, DeferredTimers};

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick (легче считать интервалы)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            .add_plugins(EnemyAiPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Каждый враг получает свой seed отсюда при спавне — дальше у агента
/// собственный ChaCha8Rng, порядок систем на розыгрыши не влияет.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed для per-agent RNG
    pub fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)) // 60Hz FixedUpdate
        .add_plugins(EnemyAiPlugin);

    app
}

/// Один шаг FixedUpdate вручную (headless тесты и demo)
///
/// `app.update()` крутит FixedUpdate по реальному времени, тут же шаг
/// ровно один timestep независимо от wall clock.
pub fn run_fixed_tick(app: &mut App) {
    let world = app.world_mut();
    let timestep = world.resource::<Time<Fixed>>().timestep();
    world.resource_mut::<Time<Fixed>>().advance_by(timestep);
    world.run_schedule(FixedUpdate);
}

/// Спавн врага с seed из `DeterministicRng` (если resource есть)
pub fn spawn_enemy(world: &mut World, spawn: EnemySpawn) -> Entity {
    let seed = world
        .get_resource_mut::<DeterministicRng>()
        .map(|mut rng| rng.next_seed())
        .unwrap_or(spawn.seed);

    let position = spawn.position;
    let entity = world.spawn(spawn.with_seed(seed).into_bundle()).id();
    logger::log_info(&format!("👹 Enemy {:?} spawned at {:?} (seed {})", entity, position, seed));
    entity
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
