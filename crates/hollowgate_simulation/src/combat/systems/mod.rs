//! Combat systems (damage, death, attack resolution)

pub mod attacks;
pub mod damage;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod damage_tests;

// Re-export all systems
pub use attacks::*;
pub use damage::*;
