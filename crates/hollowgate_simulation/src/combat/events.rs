//! Combat events (входящие запросы + исходящие уведомления)

use bevy::prelude::*;

/// Запрос: нанести урон target'у
///
/// `knockback` — импульс отбрасывания (м/с, используется только XZ).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ApplyDamage {
    pub target: Entity,
    pub source: Option<Entity>,
    pub amount: u32,
    pub knockback: Option<Vec3>,
}

impl ApplyDamage {
    pub fn new(target: Entity, amount: u32) -> Self {
        Self {
            target,
            source: None,
            amount,
            knockback: None,
        }
    }

    pub fn from_source(mut self, source: Entity) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_knockback(mut self, impulse: Vec3) -> Self {
        self.knockback = Some(impulse);
        self
    }
}

/// Запрос: вылечить target (мёртвых не поднимает)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealRequest {
    pub target: Entity,
    pub amount: u32,
}

/// Урон применён, target жив
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TookDamage {
    pub target: Entity,
    pub source: Option<Entity>,
    pub amount: u32,
    pub remaining: u32,
}

/// Враг умер (health дошёл до 0)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}
