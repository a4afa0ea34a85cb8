//! Aergewin - rules engine for a turn-based hex survival game

pub mod core;
pub mod engine;
pub mod entity;
pub mod events;
pub mod hex;
pub mod random;
pub mod terrain;

pub use crate::core::{EngineError, GameConfig, Result};
pub use crate::engine::{GameEngine, TickSnapshot};
