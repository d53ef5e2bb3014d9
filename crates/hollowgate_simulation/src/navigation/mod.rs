//! Navigation — mover/obstacle footprint, follower cycle, straight-line mover
//!
//! Pathfinding — black box. Движок управляет только тем, какой primitive
//! агента включён (mover или obstacle) и куда mover ведёт.

use bevy::prelude::*;

use crate::ai::Enemy;

pub mod follower;
pub mod footprint;
pub mod mover;

pub use follower::{Follower, FollowerSettings, SETTLE_FRAMES};
pub use footprint::{NavMover, NavObstacle, NavigationFootprint};
pub use mover::{drive_navigation_movers, face_towards, step_towards};

/// Система: цикл follower'а каждого врага (после FSM tick)
pub fn run_followers(time: Res<Time<Fixed>>, mut agents: Query<(&Transform, &mut Enemy)>) {
    let delta = time.delta_secs();

    for (transform, mut enemy) in agents.iter_mut() {
        enemy.run_follower(delta, transform.translation);
        debug_assert!(enemy.follower().footprint().is_exclusive());
    }
}
