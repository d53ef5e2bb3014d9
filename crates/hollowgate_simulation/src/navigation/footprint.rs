//! NavigationFootprint — mover vs obstacle представление агента на navmesh
//!
//! Инвариант (единственный владелец):
//! - живой агент: включён максимум один из {mover, obstacle}
//! - мёртвый агент (retired): не включено ничего, навсегда
//!
//! Оба выключены допустимо — это окно "settle" между выключением
//! obstacle и включением mover'а.

use bevy::prelude::*;

use crate::logger;

/// Mover primitive (активное следование к destination)
#[derive(Debug, Clone, PartialEq)]
pub struct NavMover {
    enabled: bool,
    destination: Option<Vec3>,
    speed: f32,
    is_stopped: bool,
    pending_warp: Option<Vec3>,
}

impl NavMover {
    fn new(speed: f32) -> Self {
        Self {
            enabled: false,
            destination: None,
            speed,
            is_stopped: true,
            pending_warp: None,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// true когда mover выключен или достиг destination
    pub fn is_stopped(&self) -> bool {
        !self.enabled || self.is_stopped
    }

    /// Сообщение от movement системы: destination достигнут
    pub fn mark_arrived(&mut self) {
        self.is_stopped = true;
    }
}

/// Static obstacle primitive (блокирует pathfinding для других)
#[derive(Debug, Clone, PartialEq)]
pub struct NavObstacle {
    enabled: bool,
    size: Vec3,
    position: Vec3,
}

impl NavObstacle {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Carving: obstacle вырезает дыру в navmesh пока включён
    pub fn carving(&self) -> bool {
        self.enabled
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationFootprint {
    mover: NavMover,
    obstacle: NavObstacle,
    retired: bool,
}

impl NavigationFootprint {
    /// Новый агент стоит на месте: obstacle включён в точке спавна
    pub fn new(position: Vec3, obstacle_size: Vec3, speed: f32) -> Self {
        Self {
            mover: NavMover::new(speed),
            obstacle: NavObstacle {
                enabled: true,
                size: obstacle_size,
                position,
            },
            retired: false,
        }
    }

    pub fn mover(&self) -> &NavMover {
        &self.mover
    }

    pub fn mover_mut(&mut self) -> &mut NavMover {
        &mut self.mover
    }

    pub fn obstacle(&self) -> &NavObstacle {
        &self.obstacle
    }

    pub fn mover_enabled(&self) -> bool {
        self.mover.enabled
    }

    pub fn obstacle_enabled(&self) -> bool {
        self.obstacle.enabled
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }

    /// Проверка инварианта (для тестов и debug_assert)
    pub fn is_exclusive(&self) -> bool {
        let both = self.mover.enabled && self.obstacle.enabled;
        let dead_and_active = self.retired && (self.mover.enabled || self.obstacle.enabled);
        !both && !dead_and_active
    }

    /// Включить mover (obstacle выключается первым)
    pub fn enable_mover(&mut self, destination: Vec3, speed: f32) {
        if self.retired {
            logger::log_warning("NavigationFootprint: enable_mover on retired footprint ignored");
            return;
        }

        self.obstacle.enabled = false;
        self.mover.enabled = true;
        self.mover.speed = speed;
        self.set_destination(destination);

        debug_assert!(self.is_exclusive());
    }

    /// Новый destination для уже включённого mover'а
    pub fn set_destination(&mut self, destination: Vec3) {
        if !self.mover.enabled {
            return;
        }

        if self.mover.destination != Some(destination) {
            self.mover.destination = Some(destination);
            self.mover.is_stopped = false;
        }
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.mover.speed = speed;
    }

    pub fn disable_mover(&mut self) {
        self.mover.enabled = false;
        self.mover.destination = None;
        self.mover.is_stopped = true;
    }

    /// Включить obstacle в позиции (mover выключается первым)
    pub fn enable_obstacle(&mut self, position: Vec3) {
        if self.retired {
            return;
        }

        self.disable_mover();
        self.obstacle.position = position;
        self.obstacle.enabled = true;

        debug_assert!(self.is_exclusive());
    }

    pub fn disable_obstacle(&mut self) {
        self.obstacle.enabled = false;
    }

    /// Teleport без replanning (применяется movement системой)
    pub fn warp(&mut self, position: Vec3) {
        self.mover.pending_warp = Some(position);
        if self.obstacle.enabled {
            self.obstacle.position = position;
        }
    }

    pub fn take_warp(&mut self) -> Option<Vec3> {
        self.mover.pending_warp.take()
    }

    /// Смерть: оба primitive выключены навсегда
    pub fn retire(&mut self) {
        self.disable_mover();
        self.obstacle.enabled = false;
        self.mover.pending_warp = None;
        self.retired = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn footprint() -> NavigationFootprint {
        NavigationFootprint::new(Vec3::ZERO, Vec3::ONE, 2.0)
    }

    #[test]
    fn test_new_footprint_is_obstacle() {
        let fp = footprint();
        assert!(fp.obstacle_enabled());
        assert!(fp.obstacle().carving());
        assert!(!fp.mover_enabled());
        assert!(fp.is_exclusive());
    }

    #[test]
    fn test_enable_mover_disables_obstacle() {
        let mut fp = footprint();
        fp.enable_mover(Vec3::new(5.0, 0.0, 0.0), 4.0);

        assert!(fp.mover_enabled());
        assert!(!fp.obstacle_enabled());
        assert_eq!(fp.mover().destination(), Some(Vec3::new(5.0, 0.0, 0.0)));
        assert_eq!(fp.mover().speed(), 4.0);
        assert!(!fp.mover().is_stopped());
    }

    #[test]
    fn test_enable_obstacle_disables_mover() {
        let mut fp = footprint();
        fp.enable_mover(Vec3::X, 4.0);
        fp.enable_obstacle(Vec3::new(1.0, 0.0, 1.0));

        assert!(!fp.mover_enabled());
        assert!(fp.obstacle_enabled());
        assert_eq!(fp.obstacle().position(), Vec3::new(1.0, 0.0, 1.0));
        assert!(fp.mover().is_stopped());
    }

    #[test]
    fn test_retired_footprint_stays_disabled() {
        let mut fp = footprint();
        fp.retire();

        fp.enable_mover(Vec3::X, 3.0);
        fp.enable_obstacle(Vec3::X);

        assert!(!fp.mover_enabled());
        assert!(!fp.obstacle_enabled());
        assert!(fp.is_retired());
        assert!(fp.is_exclusive());
    }

    #[test]
    fn test_set_destination_ignored_when_mover_disabled() {
        let mut fp = footprint();
        fp.set_destination(Vec3::X);
        assert_eq!(fp.mover().destination(), None);
    }

    #[test]
    fn test_warp_is_consumed_once() {
        let mut fp = footprint();
        fp.warp(Vec3::new(2.0, 0.0, 0.0));

        assert_eq!(fp.obstacle().position(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(fp.take_warp(), Some(Vec3::new(2.0, 0.0, 0.0)));
        assert_eq!(fp.take_warp(), None);
    }
}
