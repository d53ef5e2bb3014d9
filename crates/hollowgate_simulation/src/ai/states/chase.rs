//! Chase — преследование ближайшей цели
//!
//! Destination пересчитывается каждый tick (цель двигается).
//! Сам переход в Attack делает any-state переход — здесь только флаг.

use super::{EnemyState, StateContext, StateId};

#[derive(Debug, Clone, Default)]
pub struct ChaseState {
    chasing: bool,
}

impl ChaseState {
    pub fn is_chasing(&self) -> bool {
        self.chasing
    }
}

impl EnemyState for ChaseState {
    fn identity(&self) -> StateId {
        StateId::Chase
    }

    fn on_enter(&mut self, ctx: &mut StateContext) {
        self.chasing = true;
        ctx.follower.set_target(ctx.blackboard.target.map(|t| t.position));
    }

    fn tick(&mut self, ctx: &mut StateContext) {
        let Some(target) = ctx.blackboard.target else {
            self.chasing = false;
            return;
        };

        ctx.follower.set_target(Some(target.position));

        if target.distance <= ctx.config.attack_radius {
            self.chasing = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::states::test_support::Fixture;
    use crate::config::EnemyConfig;
    use bevy::prelude::*;

    #[test]
    fn test_chase_follows_moving_target() {
        let mut fx = Fixture::new(EnemyConfig::default());
        fx.target_at(Vec3::new(8.0, 0.0, 0.0));

        let mut chase = ChaseState::default();
        chase.on_enter(&mut fx.ctx());
        assert!(chase.is_chasing());
        assert_eq!(fx.follower.target(), Some(Vec3::new(8.0, 0.0, 0.0)));

        fx.target_at(Vec3::new(6.0, 0.0, 2.0));
        chase.tick(&mut fx.ctx());
        assert!(chase.is_chasing());
        assert_eq!(fx.follower.target(), Some(Vec3::new(6.0, 0.0, 2.0)));
    }

    #[test]
    fn test_chase_stops_inside_attack_radius() {
        let mut fx = Fixture::new(EnemyConfig::default());
        fx.target_at(Vec3::new(8.0, 0.0, 0.0));
        let mut chase = ChaseState::default();
        chase.on_enter(&mut fx.ctx());

        fx.target_at(Vec3::new(1.0, 0.0, 0.0));
        chase.tick(&mut fx.ctx());

        assert!(!chase.is_chasing());
    }

    #[test]
    fn test_chase_stops_when_target_gone() {
        let mut fx = Fixture::new(EnemyConfig::default());
        fx.target_at(Vec3::new(8.0, 0.0, 0.0));
        let mut chase = ChaseState::default();
        chase.on_enter(&mut fx.ctx());

        fx.blackboard.target = None;
        chase.tick(&mut fx.ctx());

        assert!(!chase.is_chasing());
    }
}
