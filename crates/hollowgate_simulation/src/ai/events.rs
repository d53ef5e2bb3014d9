//! AI Events — уведомления от FSM врагов
//!
//! Outbox'ы агента (смены состояния, атаки) дренируются один раз за tick
//! и пишутся сюда. События несут `Entity`, не ссылки.

use bevy::prelude::*;

use crate::ai::StateId;

/// Смена состояния FSM врага
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyStateChanged {
    pub entity: Entity,
    /// None только для входа в initial state при спавне
    pub from: Option<StateId>,
    pub to: StateId,
}

/// Враг выполнил атаку (до проверки попадания)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackPerformed {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
}
