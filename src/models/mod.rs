// Core models
pub mod game;

// Re-export commonly used types
pub use game::*;
