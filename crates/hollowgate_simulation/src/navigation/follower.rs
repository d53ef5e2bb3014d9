//! Follower — navigation coordinator агента
//!
//! Владеет `NavigationFootprint` и решает когда агент двигается (mover),
//! а когда стоит и блокирует pathfinding других (obstacle).
//!
//! Свой цикл с периодом `time_to_start_following`, независимый от FSM tick:
//! replanning каждый кадр не нужен. Читает уже post-transition состояние.
//!
//! Переход obstacle → mover идёт через settle окно в 2 кадра: navmesh
//! должен "зашить" дыру от obstacle до того как mover начнёт planning.

use bevy::prelude::*;

use crate::ai::StateId;
use crate::config::EnemyConfig;
use crate::navigation::footprint::NavigationFootprint;

/// Сколько frame boundaries ждём между disable obstacle и enable mover
pub const SETTLE_FRAMES: u8 = 2;

/// Числа из EnemyConfig которые нужны follower'у
#[derive(Debug, Clone, PartialEq)]
pub struct FollowerSettings {
    pub interval: f32,
    pub patrol_stop_distance: f32,
    pub attack_radius: f32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub obstacle_size: Vec3,
    pub knockback_damping: f32,
}

impl From<&EnemyConfig> for FollowerSettings {
    fn from(config: &EnemyConfig) -> Self {
        Self {
            interval: config.time_to_start_following,
            patrol_stop_distance: config.patrol_stop_distance,
            attack_radius: config.attack_radius,
            patrol_speed: config.patrol_speed,
            chase_speed: config.chase_speed,
            obstacle_size: config.obstacle_extent(),
            knockback_damping: config.knockback_damping,
        }
    }
}

/// Отложенное включение mover'а (settle окно)
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingMove {
    frames_left: u8,
    destination: Vec3,
    speed: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Follower {
    settings: FollowerSettings,
    footprint: NavigationFootprint,
    target: Option<Vec3>,
    cycle_timer: f32,
    pending: Option<PendingMove>,
    stopped: bool,
    knockback: bool,
    knockback_velocity: Vec3,
    spawn_height: f32,
    facing: Option<Vec3>,
}

impl Follower {
    pub fn new(settings: FollowerSettings, spawn_position: Vec3) -> Self {
        let footprint =
            NavigationFootprint::new(spawn_position, settings.obstacle_size, settings.patrol_speed);

        Self {
            settings,
            footprint,
            target: None,
            cycle_timer: 0.0, // первый цикл — на первом же кадре
            pending: None,
            stopped: false,
            knockback: false,
            knockback_velocity: Vec3::ZERO,
            spawn_height: spawn_position.y,
            facing: None,
        }
    }

    pub fn footprint(&self) -> &NavigationFootprint {
        &self.footprint
    }

    pub fn footprint_mut(&mut self) -> &mut NavigationFootprint {
        &mut self.footprint
    }

    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<Vec3>) {
        self.target = target;
    }

    pub fn is_knocked_back(&self) -> bool {
        self.knockback
    }

    pub fn is_settling(&self) -> bool {
        self.pending.is_some()
    }

    pub fn spawn_height(&self) -> f32 {
        self.spawn_height
    }

    /// Точка к которой агент должен развернуться (consume)
    pub fn take_facing(&mut self) -> Option<Vec3> {
        self.facing.take()
    }

    /// Остановиться на месте до `resume()`
    pub fn stop(&mut self, position: Vec3) {
        self.stopped = true;
        self.hold_position(position);
    }

    /// Вернуть нормальный цикл (пересчёт на следующем кадре)
    pub fn resume(&mut self) {
        self.stopped = false;
        self.cycle_timer = 0.0;
    }

    /// Мгновенно перейти в obstacle (Attack: агент встал и бьёт)
    pub fn force_obstacle(&mut self, position: Vec3) {
        self.hold_position(position);
    }

    /// Knockback: preempt цикла независимо от таймера
    ///
    /// Mover выключается сразу, obstacle переезжает в текущую позицию
    /// (y = spawn height), target сбрасывается.
    pub fn stop_movement_during_knockback(&mut self, position: Vec3, impulse: Vec3) {
        self.knockback = true;
        self.knockback_velocity = Vec3::new(impulse.x, 0.0, impulse.z);
        self.target = None;
        self.pending = None;
        self.footprint.disable_mover();
        self.footprint.enable_obstacle(self.clamp_height(position));
    }

    /// Конец knockback: только re-home позиции, target не восстанавливаем
    pub fn resume_movement_after_knockback(&mut self, position: Vec3) {
        self.knockback = false;
        self.knockback_velocity = Vec3::ZERO;

        let homed = self.clamp_height(position);
        self.footprint.warp(homed);
        self.footprint.enable_obstacle(homed);
        self.cycle_timer = 0.0;
    }

    /// Per-frame шаг во время knockback: скольжение + clamp по высоте
    ///
    /// Возвращает новую позицию агента.
    pub fn knockback_step(&mut self, position: Vec3, delta: f32) -> Vec3 {
        let mut next = position + self.knockback_velocity * delta;
        next.y = self.spawn_height;

        let decay = (1.0 - self.settings.knockback_damping * delta).max(0.0);
        self.knockback_velocity *= decay;

        next
    }

    /// Смерть: ни mover, ни obstacle — навсегда
    pub fn retire(&mut self) {
        self.pending = None;
        self.target = None;
        self.facing = None;
        self.footprint.retire();
    }

    /// Per-frame update (после FSM tick)
    pub fn update(&mut self, delta: f32, state: StateId, position: Vec3) {
        if state == StateId::Dead || self.footprint.is_retired() {
            self.retire();
            return;
        }

        if self.knockback {
            return;
        }

        // Stationary state или цели нет: settle окно и mover гасим сразу,
        // не дожидаясь следующего цикла
        let must_hold = state.is_stationary() || self.target.is_none() || self.stopped;
        if must_hold && (self.pending.is_some() || self.footprint.mover_enabled()) {
            self.hold_position(position);
        }

        self.advance_pending();

        self.cycle_timer -= delta;
        if self.cycle_timer > 0.0 {
            return;
        }
        self.cycle_timer = self.settings.interval;

        self.run_cycle(state, position);
    }

    fn advance_pending(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };

        pending.frames_left = pending.frames_left.saturating_sub(1);
        if pending.frames_left == 0 {
            let PendingMove { destination, speed, .. } = *pending;
            self.pending = None;
            self.footprint.enable_mover(destination, speed);
        }
    }

    fn run_cycle(&mut self, state: StateId, position: Vec3) {
        let Some(target) = self.target else {
            self.hold_position(position);
            return;
        };

        if self.stopped {
            self.hold_position(position);
            return;
        }

        if state.is_stationary() {
            // Разворот на месте, без движения
            self.facing = Some(target);
            self.hold_position(position);
            return;
        }

        if position.distance(target) > self.stop_distance(state) {
            self.move_towards(target, self.speed_for(state));
        } else {
            self.facing = Some(target);
            self.hold_position(position);
        }
    }

    fn move_towards(&mut self, destination: Vec3, speed: f32) {
        if self.footprint.mover_enabled() {
            self.footprint.set_speed(speed);
            self.footprint.set_destination(destination);
            return;
        }

        if let Some(pending) = self.pending.as_mut() {
            pending.destination = destination;
            pending.speed = speed;
            return;
        }

        self.footprint.disable_obstacle();
        self.pending = Some(PendingMove {
            frames_left: SETTLE_FRAMES,
            destination,
            speed,
        });
    }

    fn hold_position(&mut self, position: Vec3) {
        self.pending = None;
        self.footprint.enable_obstacle(position);
    }

    fn stop_distance(&self, state: StateId) -> f32 {
        match state {
            StateId::Patrol => self.settings.patrol_stop_distance,
            _ => self.settings.attack_radius,
        }
    }

    fn speed_for(&self, state: StateId) -> f32 {
        match state {
            StateId::Patrol => self.settings.patrol_speed,
            _ => self.settings.chase_speed,
        }
    }

    fn clamp_height(&self, mut position: Vec3) -> Vec3 {
        position.y = self.spawn_height;
        position
    }
}
