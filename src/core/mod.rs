pub mod config;
pub mod error;
pub mod types;

pub use config::GameConfig;
pub use error::{EngineError, Result};
pub use types::{EntityProperty, Operator, PlayerName, ResourceCost, ResourceKind};
