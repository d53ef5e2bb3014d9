//! Collision Layers Constants
//!
//! Битовые маски слоёв — общие для perception (target filter),
//! line-of-sight (obstruction filter) и будущей физики.
//!
//! ## Слои:
//! - Layer 1 (0b1 = 1): Reserved
//! - Layer 2 (0b10 = 2): Player
//! - Layer 3 (0b100 = 4): Environment (стены, колонны)
//! - Layer 4 (0b1000 = 8): Enemies

/// Layer 2: Player (цель для врагов по умолчанию)
pub const COLLISION_LAYER_PLAYER: u32 = 0b10; // 2

/// Layer 3: Environment (статичные препятствия, перекрывают обзор)
pub const COLLISION_LAYER_ENVIRONMENT: u32 = 0b100; // 4

/// Layer 4: Enemies
pub const COLLISION_LAYER_ENEMIES: u32 = 0b1000; // 8

/// Mask: всё что перекрывает line-of-sight
pub const COLLISION_MASK_LINE_OF_SIGHT: u32 = COLLISION_LAYER_ENVIRONMENT;
