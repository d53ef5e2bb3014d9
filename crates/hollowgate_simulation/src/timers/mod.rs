//! Deferred timers — отложенные действия с явной отменой
//!
//! Каждый таймер принадлежит entity (owner). Смерть или despawn owner'а
//! отменяет все его таймеры. Сработавший таймер возвращается системе,
//! которая сама проверяет что owner ещё жив (иначе no-op).
//!
//! Продвигается фиксированным шагом в `FixedUpdate` (первая система цепочки).

use bevy::prelude::*;

use crate::ai::Enemy;
use crate::logger;

/// Что сделать когда таймер истёк
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferredAction {
    /// Вернуть навигацию после отбрасывания
    EndKnockback,
}

/// Handle для отмены конкретного таймера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, PartialEq)]
struct ScheduledTimer {
    id: TimerId,
    owner: Entity,
    remaining: f32,
    action: DeferredAction,
}

/// Сработавший таймер
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub owner: Entity,
    pub action: DeferredAction,
}

#[derive(Resource, Debug, Default)]
pub struct DeferredTimers {
    timers: Vec<ScheduledTimer>,
    next_id: u64,
}

impl DeferredTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, owner: Entity, delay: f32, action: DeferredAction) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        self.timers.push(ScheduledTimer {
            id,
            owner,
            remaining: delay.max(0.0),
            action,
        });
        id
    }

    /// false если таймер уже сработал или отменён
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Отмена всех таймеров owner'а с данным action
    pub fn cancel_action(&mut self, owner: Entity, action: DeferredAction) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| !(t.owner == owner && t.action == action));
        before - self.timers.len()
    }

    /// Отмена всех таймеров owner'а (смерть / despawn)
    pub fn cancel_owner(&mut self, owner: Entity) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.owner != owner);
        before - self.timers.len()
    }

    pub fn pending_for(&self, owner: Entity) -> usize {
        self.timers.iter().filter(|t| t.owner == owner).count()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Продвинуть время; возвращает сработавшие в порядке планирования
    pub fn advance(&mut self, delta: f32) -> Vec<FiredTimer> {
        let mut fired = Vec::new();

        self.timers.retain_mut(|timer| {
            timer.remaining -= delta;
            if timer.remaining > 0.0 {
                return true;
            }

            fired.push(FiredTimer {
                id: timer.id,
                owner: timer.owner,
                action: timer.action,
            });
            false
        });

        fired
    }
}

/// Система: продвигает таймеры и выполняет сработавшие действия
///
/// Owner пропал или мёртв → тихий no-op.
pub fn tick_deferred_timers(
    time: Res<Time<Fixed>>,
    mut timers: ResMut<DeferredTimers>,
    mut enemies: Query<(&Transform, &mut Enemy)>,
) {
    for fired in timers.advance(time.delta_secs()) {
        match fired.action {
            DeferredAction::EndKnockback => {
                let Ok((transform, mut enemy)) = enemies.get_mut(fired.owner) else {
                    continue;
                };

                if enemy.end_knockback(transform.translation) {
                    logger::log(&format!("🦶 {:?} knockback recovered", fired.owner));
                }
            }
        }
    }
}

/// Система: despawn owner'а отменяет все его таймеры
pub fn cancel_timers_for_despawned(
    mut removed: RemovedComponents<Enemy>,
    mut timers: ResMut<DeferredTimers>,
) {
    for entity in removed.read() {
        let cancelled = timers.cancel_owner(entity);
        if cancelled > 0 {
            logger::log(&format!("⏱️ {:?} despawned → {} timer(s) cancelled", entity, cancelled));
        }
    }
}
