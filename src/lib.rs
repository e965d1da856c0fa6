//! # Taskboard Core
//!
//! Board state, drag-and-drop reordering and completion rewards for the
//! task board of the receipt rewards app.
//!
//! The crate holds no UI and no persistence. A presentation layer reads the
//! current [`Board`], turns finished drag gestures into [`MoveSpec`]s and
//! renders whatever [`BoardEvent`]s come back. XP grants leave through a
//! [`RewardSink`] towards the hosted rewards service.

pub mod config;
pub mod domain;
pub mod error;
pub mod registry;
pub mod rewards;
pub mod seed;
pub mod store;

// Re-export commonly used types
pub use config::{RewardConfig, SessionConfig};
pub use domain::{
    board::Board,
    column::{Column, ColumnId},
    movement::{apply_move, MoveKind, MoveResult, MoveSpec, Slot},
    task::{Priority, Task, TaskId},
};
pub use error::{BoardError, RejectReason, Result};
pub use registry::{BoardKey, BoardRegistry};
pub use rewards::{RewardEvent, RewardSink, RewardTrigger};
pub use seed::SeedSource;
pub use store::{BoardEvent, BoardStore, MoveReport};
