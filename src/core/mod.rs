pub mod config;
pub mod error;
pub mod types;

pub use config::GameConfig;
pub use error::{Result, WarError};
pub use types::{Direction, Position, Side, Turn};
