//! Enemy states — один struct на вариант, dispatch по `StateId`
//!
//! Каждый state хранит только свои transient данные (таймеры, флаги).
//! Всё остальное (конфиг, blackboard, follower, RNG, маршрут) приходит
//! через `StateContext` — disjoint borrow полей `EnemyBrain`.

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand::Rng;

use crate::config::EnemyConfig;
use crate::navigation::Follower;

pub mod attack;
pub mod chase;
pub mod dead;
pub mod idle;
pub mod patrol;
pub mod taking_damage;

pub use attack::AttackState;
pub use chase::ChaseState;
pub use dead::DeadState;
pub use idle::IdleState;
pub use patrol::PatrolState;
pub use taking_damage::TakingDamageState;

/// Идентификатор состояния врага
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum StateId {
    Idle,
    Patrol,
    Chase,
    Attack,
    TakingDamage,
    Dead,
}

impl StateId {
    pub fn name(self) -> &'static str {
        match self {
            StateId::Idle => "Idle",
            StateId::Patrol => "Patrol",
            StateId::Chase => "Chase",
            StateId::Attack => "Attack",
            StateId::TakingDamage => "TakingDamage",
            StateId::Dead => "Dead",
        }
    }

    /// Состояния в которых агент только разворачивается, но не идёт
    pub fn is_stationary(self) -> bool {
        matches!(self, StateId::Idle | StateId::Attack | StateId::Dead)
    }
}

/// Что state видит о мире на этом tick'е
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    pub entity: Entity,
    pub position: Vec3,
    pub distance: f32,
}

/// Per-tick данные агента (заполняются перед FSM tick)
#[derive(Debug, Clone, PartialEq)]
pub struct Blackboard {
    pub position: Vec3,
    pub target: Option<TargetInfo>,
    /// Урон получен с прошлого tick'а (живёт ровно один tick)
    pub damage_pulse: bool,
    pub alive: bool,
    pub delta: f32,
}

impl Blackboard {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            target: None,
            damage_pulse: false,
            alive: true,
            delta: 0.0,
        }
    }

    /// Цель внутри зоны атаки (distance <= radius)
    pub fn target_within(&self, radius: f32) -> bool {
        self.target.is_some_and(|t| t.distance <= radius)
    }

    /// Цель есть, но дальше зоны атаки
    pub fn target_beyond(&self, radius: f32) -> bool {
        self.target.is_some_and(|t| t.distance > radius)
    }
}

/// Запрос атаки из Attack state (outbox, забирает ECS система)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackIntent {
    pub target: Entity,
    pub damage: u32,
}

pub struct StateContext<'a> {
    pub config: &'a EnemyConfig,
    pub blackboard: &'a Blackboard,
    pub follower: &'a mut Follower,
    pub rng: &'a mut ChaCha8Rng,
    pub route: &'a [Vec3],
    pub attacks: &'a mut Vec<AttackIntent>,
}

impl StateContext<'_> {
    /// Случайное значение в `[min, max]`; при `max <= min` возвращает `min`
    pub fn random_between(&mut self, min: f32, max: f32) -> f32 {
        random_between(self.rng, min, max)
    }
}

pub fn random_between(rng: &mut ChaCha8Rng, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Lifecycle одного состояния
pub trait EnemyState {
    fn identity(&self) -> StateId;

    fn on_enter(&mut self, _ctx: &mut StateContext) {}

    fn on_exit(&mut self, _ctx: &mut StateContext) {}

    fn tick(&mut self, ctx: &mut StateContext);
}

/// Какой hook вызвать у состояния
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateHook {
    Enter,
    Exit,
    Tick,
}

/// Все состояния агента (создаются один раз, переиспользуются)
#[derive(Debug, Clone, Default)]
pub struct EnemyStates {
    pub idle: IdleState,
    pub patrol: PatrolState,
    pub chase: ChaseState,
    pub attack: AttackState,
    pub taking_damage: TakingDamageState,
    pub dead: DeadState,
}

impl EnemyStates {
    /// Вызывает hook у struct'а состояния `id`; возвращает identity вызванного
    pub fn dispatch(&mut self, id: StateId, hook: StateHook, ctx: &mut StateContext) -> StateId {
        match id {
            StateId::Idle => run_hook(&mut self.idle, hook, ctx),
            StateId::Patrol => run_hook(&mut self.patrol, hook, ctx),
            StateId::Chase => run_hook(&mut self.chase, hook, ctx),
            StateId::Attack => run_hook(&mut self.attack, hook, ctx),
            StateId::TakingDamage => run_hook(&mut self.taking_damage, hook, ctx),
            StateId::Dead => run_hook(&mut self.dead, hook, ctx),
        }
    }
}

fn run_hook<S: EnemyState>(state: &mut S, hook: StateHook, ctx: &mut StateContext) -> StateId {
    match hook {
        StateHook::Enter => state.on_enter(ctx),
        StateHook::Exit => state.on_exit(ctx),
        StateHook::Tick => state.tick(ctx),
    }
    state.identity()
}
