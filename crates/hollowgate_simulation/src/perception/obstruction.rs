//! Line-of-sight blockers (стены, колонны)
//!
//! Статичные AABB со слоем. Perception спрашивает "пересекает ли отрезок
//! observer → target что-то из маски" через trait `LineOfSight`.

use bevy::prelude::*;

/// Segment hit test против маски слоёв
pub trait LineOfSight {
    /// true если отрезок `from → to` пересекает блокер из `mask`
    fn segment_blocked(&self, from: Vec3, to: Vec3, mask: u32) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstruction {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub layer: u32,
}

impl Obstruction {
    pub fn new(center: Vec3, half_extents: Vec3, layer: u32) -> Self {
        Self {
            center,
            half_extents,
            layer,
        }
    }

    /// Slab test: пересечение отрезка с AABB
    pub fn intersects_segment(&self, from: Vec3, to: Vec3) -> bool {
        let min = self.center - self.half_extents;
        let max = self.center + self.half_extents;
        let direction = to - from;

        let mut t_enter = 0.0_f32;
        let mut t_exit = 1.0_f32;

        for axis in 0..3 {
            let origin = from[axis];
            let delta = direction[axis];

            if delta.abs() < f32::EPSILON {
                // Параллельно slab'у: либо внутри, либо мимо
                if origin < min[axis] || origin > max[axis] {
                    return false;
                }
                continue;
            }

            let inv = 1.0 / delta;
            let mut t0 = (min[axis] - origin) * inv;
            let mut t1 = (max[axis] - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return false;
            }
        }

        true
    }
}

/// Resource: все статичные блокеры обзора
#[derive(Resource, Debug, Clone, Default)]
pub struct Obstructions {
    blockers: Vec<Obstruction>,
}

impl Obstructions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, obstruction: Obstruction) {
        self.blockers.push(obstruction);
    }

    pub fn len(&self) -> usize {
        self.blockers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blockers.is_empty()
    }

    pub fn clear(&mut self) {
        self.blockers.clear();
    }
}

impl LineOfSight for Obstructions {
    fn segment_blocked(&self, from: Vec3, to: Vec3, mask: u32) -> bool {
        self.blockers
            .iter()
            .filter(|b| b.layer & mask != 0)
            .any(|b| b.intersects_segment(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::layers::{COLLISION_LAYER_ENEMIES, COLLISION_LAYER_ENVIRONMENT};

    fn wall() -> Obstruction {
        // Стена поперёк оси X на x = 5
        Obstruction::new(
            Vec3::new(5.0, 1.0, 0.0),
            Vec3::new(0.2, 1.0, 3.0),
            COLLISION_LAYER_ENVIRONMENT,
        )
    }

    #[test]
    fn test_segment_through_wall_is_blocked() {
        assert!(wall().intersects_segment(Vec3::new(0.0, 1.0, 0.0), Vec3::new(10.0, 1.0, 0.0)));
    }

    #[test]
    fn test_segment_ending_before_wall_is_clear() {
        assert!(!wall().intersects_segment(Vec3::new(0.0, 1.0, 0.0), Vec3::new(4.0, 1.0, 0.0)));
    }

    #[test]
    fn test_segment_passing_beside_wall_is_clear() {
        assert!(!wall().intersects_segment(Vec3::new(0.0, 1.0, 5.0), Vec3::new(10.0, 1.0, 5.0)));
    }

    #[test]
    fn test_mask_filters_blockers() {
        let mut obstructions = Obstructions::new();
        obstructions.add(wall());

        let from = Vec3::new(0.0, 1.0, 0.0);
        let to = Vec3::new(10.0, 1.0, 0.0);

        assert!(obstructions.segment_blocked(from, to, COLLISION_LAYER_ENVIRONMENT));
        assert!(!obstructions.segment_blocked(from, to, COLLISION_LAYER_ENEMIES));
    }
}
