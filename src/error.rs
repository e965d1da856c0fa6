use crate::domain::column::ColumnId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Move rejected: {0}")]
    MoveRejected(RejectReason),

    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    #[error("Invalid task ID: {0:?}")]
    InvalidTaskId(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("Board not initialized")]
    BoardNotInitialized,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BoardError {
    /// True when the error came from a move that was refused and left the board as it was
    pub fn is_move_rejected(&self) -> bool {
        matches!(self, Self::MoveRejected(_))
    }
}

/// Why a move was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("task {0} is not on the board")]
    UnknownTask(String),

    #[error("no task at {column}[{index}] (column holds {len})")]
    SourceIndexOutOfRange {
        column: ColumnId,
        index: usize,
        len: usize,
    },

    #[error("expected task {expected} at the source slot, found {found}")]
    TaskMismatch { expected: String, found: String },

    #[error("cannot insert at {column}[{index}] (column holds {len})")]
    DestinationIndexOutOfRange {
        column: ColumnId,
        index: usize,
        len: usize,
    },
}

impl From<RejectReason> for BoardError {
    fn from(reason: RejectReason) -> Self {
        Self::MoveRejected(reason)
    }
}
