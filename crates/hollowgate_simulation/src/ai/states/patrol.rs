//! Patrol — обход waypoints по кругу ограниченное время
//!
//! on_enter: случайный стартовый waypoint + случайная длительность.
//! По достижении waypoint'а (distance <= patrol_stop_distance) индекс
//! сдвигается по кругу. Если время ещё есть — идём к следующему,
//! иначе `is_waiting` и движение больше не запрашиваем.

use rand::Rng;

use super::{EnemyState, StateContext, StateId};

#[derive(Debug, Clone, Default)]
pub struct PatrolState {
    current_waypoint: usize,
    remaining: f32,
    is_waiting: bool,
}

impl PatrolState {
    pub fn is_waiting(&self) -> bool {
        self.is_waiting
    }

    pub fn current_waypoint(&self) -> usize {
        self.current_waypoint
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

impl EnemyState for PatrolState {
    fn identity(&self) -> StateId {
        StateId::Patrol
    }

    fn on_enter(&mut self, ctx: &mut StateContext) {
        self.is_waiting = false;

        let (min, max) = (ctx.config.min_patrol_time, ctx.config.max_patrol_time);
        self.remaining = ctx.random_between(min, max);

        if ctx.route.is_empty() {
            // Без маршрута патрулировать нечего
            self.is_waiting = true;
            ctx.follower.set_target(None);
            return;
        }

        self.current_waypoint = ctx.rng.gen_range(0..ctx.route.len());
        ctx.follower.set_target(Some(ctx.route[self.current_waypoint]));
    }

    fn on_exit(&mut self, ctx: &mut StateContext) {
        ctx.follower.set_target(None);
    }

    fn tick(&mut self, ctx: &mut StateContext) {
        if self.is_waiting || ctx.route.is_empty() {
            return;
        }

        self.remaining = (self.remaining - ctx.blackboard.delta).max(0.0);

        let waypoint = ctx.route[self.current_waypoint];
        if ctx.blackboard.position.distance(waypoint) > ctx.config.patrol_stop_distance {
            return;
        }

        self.current_waypoint = (self.current_waypoint + 1) % ctx.route.len();

        if self.remaining > 0.0 {
            ctx.follower.set_target(Some(ctx.route[self.current_waypoint]));
        } else {
            self.is_waiting = true;
            ctx.follower.set_target(None);
        }
    }
}
