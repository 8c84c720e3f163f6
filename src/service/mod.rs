// Service layer module for the match engine
pub mod match_engine;

pub use match_engine::MatchEngine;
