use crate::{config::SessionConfig, domain::Board, error::Result};
use async_trait::async_trait;

pub mod demo;

#[cfg(feature = "file-seed")]
pub mod file_seed;

pub use demo::StaticSeed;
#[cfg(feature = "file-seed")]
pub use file_seed::FileSeedSource;

/// Where a session's initial board and settings come from
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Loads the board a new session starts with
    async fn load_board(&self) -> Result<Board>;

    /// Loads the session configuration
    async fn load_config(&self) -> Result<SessionConfig>;
}
