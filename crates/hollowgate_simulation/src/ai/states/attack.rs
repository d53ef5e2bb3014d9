//! Attack — стоим (obstacle) и бьём цель с периодом `attack_delay`

use super::{AttackIntent, EnemyState, StateContext, StateId};

#[derive(Debug, Clone, Default)]
pub struct AttackState {
    cooldown: f32,
    on_range: bool,
}

impl AttackState {
    pub fn is_on_range(&self) -> bool {
        self.on_range
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    fn attack(&mut self, ctx: &mut StateContext) {
        if let Some(target) = ctx.blackboard.target {
            ctx.attacks.push(AttackIntent {
                target: target.entity,
                damage: ctx.config.attack_damage,
            });
        }
        self.cooldown = ctx.config.attack_delay;
    }
}

impl EnemyState for AttackState {
    fn identity(&self) -> StateId {
        StateId::Attack
    }

    fn on_enter(&mut self, ctx: &mut StateContext) {
        self.on_range = true;
        ctx.follower.force_obstacle(ctx.blackboard.position);
        ctx.follower.set_target(ctx.blackboard.target.map(|t| t.position));
        self.attack(ctx);
    }

    fn tick(&mut self, ctx: &mut StateContext) {
        let Some(target) = ctx.blackboard.target else {
            self.on_range = false;
            return;
        };

        // Follower держит target только для разворота
        ctx.follower.set_target(Some(target.position));

        if target.distance > ctx.config.attack_radius {
            self.on_range = false;
            return;
        }

        self.cooldown -= ctx.blackboard.delta;
        if self.cooldown <= 0.0 {
            self.attack(ctx);
        }
    }
}
