//! Dead — terminal state, из него не выходят

use super::{EnemyState, StateContext, StateId};

#[derive(Debug, Clone, Default)]
pub struct DeadState;

impl EnemyState for DeadState {
    fn identity(&self) -> StateId {
        StateId::Dead
    }

    fn on_enter(&mut self, ctx: &mut StateContext) {
        ctx.follower.retire();
    }

    fn tick(&mut self, _ctx: &mut StateContext) {}
}
