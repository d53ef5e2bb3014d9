//! Enemy — агрегат агента (FSM + brain + follower)
//!
//! Один компонент на врага. Health и FieldOfView — отдельные компоненты
//! (их читают и другие системы), поэтому операции урона принимают
//! `&mut Health` явно.

use bevy::prelude::*;

use crate::ai::brain::{build_enemy_machine, EnemyBrain};
use crate::ai::fsm::{StateChange, StateMachine};
use crate::ai::states::{AttackIntent, StateId, TargetInfo};
use crate::components::Health;
use crate::config::{ConfigError, EnemyConfig};
use crate::logger;
use crate::navigation::Follower;

/// Результат применения урона
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Мёртвый или нулевой урон — ничего не произошло
    Ignored,
    Took { applied: u32 },
    Died { applied: u32 },
}

#[derive(Component, Debug)]
pub struct Enemy {
    fsm: StateMachine<StateId, EnemyBrain>,
    brain: EnemyBrain,
    warned_missing_perception: bool,
}

impl Enemy {
    /// Конструирование заканчивается входом в Idle
    ///
    /// Проблемы конфига логируются один раз; агент не падает, а деградирует
    /// (например без маршрута никогда не уходит в Patrol).
    pub fn new(config: EnemyConfig, spawn_position: Vec3, route: Vec<Vec3>, seed: u64) -> Self {
        for problem in config.validate() {
            logger::log_warning(&format!("⚠️ Enemy config: {}", problem));
        }
        if route.is_empty() {
            logger::log_warning(&format!("⚠️ Enemy config: {}", ConfigError::EmptyPatrolRoute));
        }

        let mut brain = EnemyBrain::new(config, spawn_position, route, seed);
        let fsm = build_enemy_machine(&mut brain);

        Self {
            fsm,
            brain,
            warned_missing_perception: false,
        }
    }

    pub fn state(&self) -> StateId {
        self.fsm.current()
    }

    pub fn is_dead(&self) -> bool {
        self.fsm.current() == StateId::Dead
    }

    pub fn brain(&self) -> &EnemyBrain {
        &self.brain
    }

    pub fn config(&self) -> &EnemyConfig {
        &self.brain.config
    }

    pub fn follower(&self) -> &Follower {
        &self.brain.follower
    }

    pub fn follower_mut(&mut self) -> &mut Follower {
        &mut self.brain.follower
    }

    pub fn target(&self) -> Option<TargetInfo> {
        self.brain.blackboard.target
    }

    /// Обновить то что агент знает о мире (перед `tick`)
    pub fn sense(&mut self, position: Vec3, target: Option<TargetInfo>) {
        self.brain.blackboard.position = position;
        self.brain.blackboard.target = target;
    }

    /// FSM tick; damage pulse живёт ровно один tick
    pub fn tick(&mut self, delta: f32) {
        self.brain.blackboard.delta = delta;
        self.fsm.tick(&mut self.brain);
        self.brain.blackboard.damage_pulse = false;
    }

    /// Цикл follower'а (читает уже post-transition состояние)
    pub fn run_follower(&mut self, delta: f32, position: Vec3) {
        let state = self.fsm.current();
        self.brain.follower.update(delta, state, position);
    }

    pub fn take_damage(&mut self, health: &mut Health, amount: u32) -> DamageOutcome {
        if self.is_dead() || health.is_dead() {
            return DamageOutcome::Ignored;
        }

        let applied = health.take_damage(amount);
        if health.is_dead() {
            self.die();
            return DamageOutcome::Died { applied };
        }

        if applied == 0 {
            return DamageOutcome::Ignored;
        }

        self.brain.blackboard.damage_pulse = true;
        DamageOutcome::Took { applied }
    }

    pub fn heal(&mut self, health: &mut Health, amount: u32) -> u32 {
        if self.is_dead() {
            return 0;
        }
        health.heal(amount)
    }

    /// Принудительный вход в terminal Dead (вне таблицы переходов)
    pub fn die(&mut self) {
        self.brain.blackboard.alive = false;
        self.brain.blackboard.damage_pulse = false;
        self.brain.blackboard.target = None;
        self.fsm.set_state(StateId::Dead, &mut self.brain);
    }

    pub fn begin_knockback(&mut self, position: Vec3, impulse: Vec3) {
        if self.is_dead() {
            return;
        }
        self.brain.follower.stop_movement_during_knockback(position, impulse);
    }

    /// false если агент уже мёртв (callback отработал вхолостую)
    pub fn end_knockback(&mut self, position: Vec3) -> bool {
        if self.is_dead() {
            return false;
        }
        self.brain.follower.resume_movement_after_knockback(position);
        true
    }

    pub fn drain_state_changes(&mut self) -> Vec<StateChange<StateId>> {
        self.fsm.drain_changes()
    }

    pub fn take_attacks(&mut self) -> Vec<AttackIntent> {
        std::mem::take(&mut self.brain.attacks)
    }

    /// true только при первом вызове (чтобы предупредить один раз)
    pub fn warn_missing_perception_once(&mut self) -> bool {
        !std::mem::replace(&mut self.warned_missing_perception, true)
    }
}
