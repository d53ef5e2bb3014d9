//! TakingDamage — короткое окно восстановления после удара

use super::{EnemyState, StateContext, StateId};

#[derive(Debug, Clone, Default)]
pub struct TakingDamageState {
    remaining: f32,
}

impl TakingDamageState {
    pub fn is_recovering(&self) -> bool {
        self.remaining > 0.0
    }
}

impl EnemyState for TakingDamageState {
    fn identity(&self) -> StateId {
        StateId::TakingDamage
    }

    fn on_enter(&mut self, ctx: &mut StateContext) {
        self.remaining = ctx.config.damage_recovery_time;
    }

    fn on_exit(&mut self, _ctx: &mut StateContext) {
        self.remaining = 0.0;
    }

    fn tick(&mut self, ctx: &mut StateContext) {
        self.remaining = (self.remaining - ctx.blackboard.delta).max(0.0);
    }
}
