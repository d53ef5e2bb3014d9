//! FieldOfView — периодический скан конуса обзора
//!
//! Фильтры по порядку: радиус → маска/живой → угол конуса → line-of-sight.
//! Ближайший выживший = nearest. События только на изменение nearest:
//! - None/другой → новый Some: Detected
//! - Some → None: Lost
//!
//! Замена одной цели другой даёт только Detected (без Lost для старой).

use bevy::prelude::*;

use crate::config::PerceptionConfig;
use crate::perception::obstruction::LineOfSight;

/// Изменение nearest после скана
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerceptionEvent {
    Detected(Entity),
    Lost(Entity),
}

/// Кандидат для скана (собирается из ECS query)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub entity: Entity,
    pub position: Vec3,
    pub layer: u32,
    pub alive: bool,
}

#[derive(Component, Debug, Clone)]
pub struct FieldOfView {
    pub radius: f32,
    /// Половина угла конуса (радианы)
    pub half_angle: f32,
    pub target_mask: u32,
    pub obstruction_mask: u32,
    pub rescan_interval: f32,
    enabled: bool,
    countdown: f32,
    nearest: Option<Entity>,
    visible: Vec<Entity>,
}

impl FieldOfView {
    pub fn from_config(config: &PerceptionConfig) -> Self {
        Self {
            radius: config.radius,
            half_angle: config.half_angle_degrees.to_radians(),
            target_mask: config.target_mask,
            obstruction_mask: config.obstruction_mask,
            rescan_interval: config.rescan_interval,
            enabled: true,
            countdown: 0.0, // первый скан сразу
            nearest: None,
            visible: Vec::new(),
        }
    }

    pub fn nearest(&self) -> Option<Entity> {
        self.nearest
    }

    /// Видимые цели, отсортированы по дистанции
    pub fn visible(&self) -> &[Entity] {
        &self.visible
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Смерть владельца: сканы прекращаются, результат очищается
    pub fn disable(&mut self) {
        self.enabled = false;
        self.nearest = None;
        self.visible.clear();
    }

    /// Отсчёт до следующего скана; true когда пора сканировать
    pub fn tick_countdown(&mut self, delta: f32) -> bool {
        if !self.enabled {
            return false;
        }

        self.countdown -= delta;
        if self.countdown > 0.0 {
            return false;
        }

        self.countdown = self.rescan_interval;
        true
    }

    /// Полный скан: фильтрует кандидатов и обновляет nearest/visible
    pub fn scan(
        &mut self,
        origin: Vec3,
        forward: Vec3,
        candidates: impl IntoIterator<Item = Candidate>,
        line_of_sight: &impl LineOfSight,
    ) -> Option<PerceptionEvent> {
        let mut survivors: Vec<(Entity, f32)> = candidates
            .into_iter()
            .filter_map(|c| self.accept(origin, forward, &c, line_of_sight).map(|d| (c.entity, d)))
            .collect();

        survivors.sort_by(|a, b| a.1.total_cmp(&b.1));

        self.visible = survivors.iter().map(|(entity, _)| *entity).collect();
        self.set_nearest(survivors.first().map(|(entity, _)| *entity))
    }

    /// Цель пропала между сканами (despawn, смерть) → обычный lose path
    pub fn forget(&mut self, entity: Entity) -> Option<PerceptionEvent> {
        self.visible.retain(|&e| e != entity);
        if self.nearest != Some(entity) {
            return None;
        }
        let next = self.visible.first().copied();
        self.set_nearest(next)
    }

    fn set_nearest(&mut self, next: Option<Entity>) -> Option<PerceptionEvent> {
        let previous = std::mem::replace(&mut self.nearest, next);

        match (previous, next) {
            (prev, Some(new)) if prev != Some(new) => Some(PerceptionEvent::Detected(new)),
            (Some(old), None) => Some(PerceptionEvent::Lost(old)),
            _ => None,
        }
    }

    /// Дистанция до кандидата если он проходит все фильтры
    fn accept(
        &self,
        origin: Vec3,
        forward: Vec3,
        candidate: &Candidate,
        line_of_sight: &impl LineOfSight,
    ) -> Option<f32> {
        if !candidate.alive || candidate.layer & self.target_mask == 0 {
            return None;
        }

        let offset = candidate.position - origin;
        let distance = offset.length();
        if distance > self.radius {
            return None;
        }

        if distance > f32::EPSILON {
            let angle = forward.angle_between(offset);
            if angle > self.half_angle {
                return None;
            }
        }

        if line_of_sight.segment_blocked(origin, candidate.position, self.obstruction_mask) {
            return None;
        }

        Some(distance)
    }
}
