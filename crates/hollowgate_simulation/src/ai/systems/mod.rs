//! AI systems (strategic layer logic)

pub mod brain;

// Re-export all systems
pub use brain::*;
