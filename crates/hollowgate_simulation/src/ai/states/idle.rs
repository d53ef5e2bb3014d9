//! Idle — стоим на месте случайное время из `[min_idle_time, max_idle_time]`

use super::{EnemyState, StateContext, StateId};

#[derive(Debug, Clone, Default)]
pub struct IdleState {
    remaining: f32,
}

impl IdleState {
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.remaining <= 0.0
    }
}

impl EnemyState for IdleState {
    fn identity(&self) -> StateId {
        StateId::Idle
    }

    fn on_enter(&mut self, ctx: &mut StateContext) {
        let (min, max) = (ctx.config.min_idle_time, ctx.config.max_idle_time);
        self.remaining = ctx.random_between(min, max);
        ctx.follower.set_target(None);
    }

    fn tick(&mut self, ctx: &mut StateContext) {
        self.remaining = (self.remaining - ctx.blackboard.delta).max(0.0);
    }
}
