//! EnemyBrain — host для FSM: данные агента + dispatch lifecycle hooks
//!
//! FSM хранит только `StateId` и таблицы; `EnemyBrain` владеет состояниями,
//! blackboard'ом, follower'ом и RNG. Предикаты читают `&EnemyBrain`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai::fsm::{StateHost, StateMachine};
use crate::ai::states::{AttackIntent, Blackboard, EnemyStates, StateContext, StateHook, StateId};
use crate::config::EnemyConfig;
use crate::navigation::{Follower, FollowerSettings};

#[derive(Debug, Clone)]
pub struct EnemyBrain {
    pub(crate) config: EnemyConfig,
    pub(crate) states: EnemyStates,
    pub(crate) blackboard: Blackboard,
    pub(crate) follower: Follower,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) route: Vec<Vec3>,
    pub(crate) attacks: Vec<AttackIntent>,
}

impl EnemyBrain {
    pub fn new(config: EnemyConfig, spawn_position: Vec3, route: Vec<Vec3>, seed: u64) -> Self {
        let follower = Follower::new(FollowerSettings::from(&config), spawn_position);

        Self {
            config,
            states: EnemyStates::default(),
            blackboard: Blackboard::new(spawn_position),
            follower,
            rng: ChaCha8Rng::seed_from_u64(seed),
            route,
            attacks: Vec::new(),
        }
    }

    pub fn config(&self) -> &EnemyConfig {
        &self.config
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn states(&self) -> &EnemyStates {
        &self.states
    }

    pub fn follower(&self) -> &Follower {
        &self.follower
    }

    pub fn route(&self) -> &[Vec3] {
        &self.route
    }

    /// Dispatch одного hook'а: state struct + context из остальных полей
    fn with_state(&mut self, id: StateId, hook: StateHook) {
        let Self {
            config,
            states,
            blackboard,
            follower,
            rng,
            route,
            attacks,
        } = self;

        let mut ctx = StateContext {
            config,
            blackboard,
            follower,
            rng,
            route,
            attacks,
        };

        states.dispatch(id, hook, &mut ctx);
    }
}

impl StateHost<StateId> for EnemyBrain {
    fn enter_state(&mut self, state: StateId) {
        self.with_state(state, StateHook::Enter);
    }

    fn exit_state(&mut self, state: StateId) {
        self.with_state(state, StateHook::Exit);
    }

    fn tick_state(&mut self, state: StateId) {
        self.with_state(state, StateHook::Tick);
    }
}

// ============================================================================
// Predicates (чистые функции от &EnemyBrain)
// ============================================================================

/// Any-state переходы работают только у живых и не восстанавливающихся
fn can_react(brain: &EnemyBrain) -> bool {
    brain.blackboard.alive && !brain.states.taking_damage.is_recovering()
}

fn took_damage(brain: &EnemyBrain) -> bool {
    can_react(brain) && brain.blackboard.damage_pulse
}

fn target_in_attack_range(brain: &EnemyBrain) -> bool {
    can_react(brain) && brain.blackboard.target_within(brain.config.attack_radius)
}

fn target_beyond_attack_range(brain: &EnemyBrain) -> bool {
    can_react(brain) && brain.blackboard.target_beyond(brain.config.attack_radius)
}

fn idle_finished(brain: &EnemyBrain) -> bool {
    // Без маршрута агент стоит на месте
    brain.states.idle.is_finished() && !brain.route.is_empty()
}

fn patrol_waiting(brain: &EnemyBrain) -> bool {
    brain.states.patrol.is_waiting()
}

fn chase_gave_up(brain: &EnemyBrain) -> bool {
    let board = &brain.blackboard;
    let in_range = board.target_within(brain.config.attack_radius);
    (!brain.states.chase.is_chasing() && !in_range) || board.target.is_none()
}

fn attack_target_lost(brain: &EnemyBrain) -> bool {
    !brain.states.attack.is_on_range() && brain.blackboard.target.is_none()
}

fn attack_target_escaped(brain: &EnemyBrain) -> bool {
    !brain.states.attack.is_on_range() && brain.blackboard.target.is_some()
}

fn recovered(brain: &EnemyBrain) -> bool {
    !brain.states.taking_damage.is_recovering()
}

/// Таблица переходов врага; порядок регистрации = приоритет
pub fn build_enemy_machine(brain: &mut EnemyBrain) -> StateMachine<StateId, EnemyBrain> {
    StateMachine::<StateId, EnemyBrain>::builder()
        .add_any_transition(StateId::TakingDamage, took_damage)
        .add_any_transition(StateId::Attack, target_in_attack_range)
        .add_any_transition(StateId::Chase, target_beyond_attack_range)
        .add_transition(StateId::Idle, StateId::Patrol, idle_finished)
        .add_transition(StateId::Patrol, StateId::Idle, patrol_waiting)
        .add_transition(StateId::Chase, StateId::Idle, chase_gave_up)
        .add_transition(StateId::Attack, StateId::Idle, attack_target_lost)
        .add_transition(StateId::Attack, StateId::Chase, attack_target_escaped)
        .add_transition(StateId::TakingDamage, StateId::Idle, recovered)
        .terminal(StateId::Dead)
        .build(StateId::Idle, brain)
}
