//! Straight-line mover — stand-in для black-box pathfinder'а
//!
//! Включённый mover двигает агента к destination со своей скоростью.
//! Pathfinding нет: движение по прямой, "прибытие" при остатке < шага.
//! Warp телепортирует без replanning.

use bevy::prelude::*;

use crate::ai::Enemy;

/// Дистанция на которой считаем что destination достигнут
pub const ARRIVAL_EPSILON: f32 = 0.05;

/// Один шаг по прямой; возвращает (новая позиция, прибыли ли)
pub fn step_towards(position: Vec3, destination: Vec3, speed: f32, delta: f32) -> (Vec3, bool) {
    let offset = destination - position;
    let distance = offset.length();
    let step = speed * delta;

    if distance <= ARRIVAL_EPSILON || distance <= step {
        return (destination, true);
    }

    (position + offset / distance * step, false)
}

/// Разворот по горизонтали к точке (y не трогаем)
pub fn face_towards(transform: &mut Transform, point: Vec3) {
    let flat = Vec3::new(point.x, transform.translation.y, point.z);
    if flat.distance_squared(transform.translation) > f32::EPSILON {
        transform.look_at(flat, Vec3::Y);
    }
}

/// Система: применяет warp, knockback slide, разворот и движение mover'ов
pub fn drive_navigation_movers(time: Res<Time<Fixed>>, mut agents: Query<(&mut Transform, &mut Enemy)>) {
    let delta = time.delta_secs();

    for (mut transform, mut enemy) in agents.iter_mut() {
        let follower = enemy.follower_mut();

        if let Some(position) = follower.footprint_mut().take_warp() {
            transform.translation = position;
        }

        if follower.is_knocked_back() {
            transform.translation = follower.knockback_step(transform.translation, delta);
            continue;
        }

        if let Some(point) = follower.take_facing() {
            face_towards(&mut transform, point);
        }

        let mover = follower.footprint().mover();
        if mover.is_stopped() {
            continue;
        }
        let Some(destination) = mover.destination() else {
            continue;
        };

        let (next, arrived) = step_towards(transform.translation, destination, mover.speed(), delta);
        face_towards(&mut transform, destination);
        transform.translation = next;

        if arrived {
            follower.footprint_mut().mover_mut().mark_arrived();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_moves_at_speed() {
        let (next, arrived) = step_towards(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 2.0, 0.5);
        assert_eq!(next, Vec3::new(1.0, 0.0, 0.0));
        assert!(!arrived);
    }

    #[test]
    fn test_step_snaps_on_arrival() {
        let (next, arrived) = step_towards(Vec3::new(9.5, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0), 2.0, 0.5);
        assert_eq!(next, Vec3::new(10.0, 0.0, 0.0));
        assert!(arrived);
    }

    #[test]
    fn test_face_towards_ignores_height() {
        let mut transform = Transform::from_xyz(0.0, 1.0, 0.0);
        face_towards(&mut transform, Vec3::new(5.0, 10.0, 0.0));

        let forward = transform.forward().as_vec3();
        assert!((forward - Vec3::X).length() < 1e-4, "forward = {:?}", forward);
    }
}
