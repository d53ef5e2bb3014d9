//! Базовые компоненты акторов: Health, Targetable

use bevy::prelude::*;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    /// Применяет урон, возвращает сколько HP реально снято
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_sub(amount);
        before - self.current
    }

    /// Лечение (мёртвых не поднимаем), возвращает сколько HP добавлено
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.is_dead() {
            return 0;
        }

        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }
}

/// Entity которую может увидеть Field of View
///
/// `layer` — битовая маска слоя (см. `components::layers`),
/// сравнивается с `PerceptionConfig::target_mask`.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Targetable {
    pub layer: u32,
}

impl Targetable {
    pub fn new(layer: u32) -> Self {
        Self { layer }
    }

    pub fn matches(&self, mask: u32) -> bool {
        self.layer & mask != 0
    }
}
