pub mod board;
pub mod column;
pub mod movement;
pub mod task;

pub use board::Board;
pub use column::{Column, ColumnId};
pub use movement::{apply_move, MoveKind, MoveResult, MoveSpec, Slot};
pub use task::{Priority, Task, TaskId};
