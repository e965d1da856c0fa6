//! Drag-and-drop reordering.
//!
//! [`apply_move`] is a pure function: it reads the old board and, when the
//! move changes anything, returns a brand new one. The old value is never
//! touched, so a rejected or no-op move leaves callers holding exactly what
//! they had.

use crate::domain::board::Board;
use crate::domain::column::ColumnId;
use crate::domain::task::TaskId;
use crate::error::{RejectReason, Result};
use serde::{Deserialize, Serialize};

/// One end of a drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub column: ColumnId,
    pub index: usize,
}

impl Slot {
    pub fn new(column: ColumnId, index: usize) -> Self {
        Self { column, index }
    }
}

/// A requested task relocation, as produced by a completed drag gesture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSpec {
    pub task_id: TaskId,
    pub from: Slot,
    pub to: Slot,
}

impl MoveSpec {
    pub fn new(task_id: TaskId, from: Slot, to: Slot) -> Self {
        Self { task_id, from, to }
    }

    /// Builds a move for a task known only by id, resolving its current slot
    pub fn locate(board: &Board, task_id: &TaskId, to: Slot) -> Result<Self> {
        let (column, index) = board
            .locate(task_id)
            .ok_or_else(|| RejectReason::UnknownTask(task_id.to_string()))?;
        Ok(Self::new(task_id.clone(), Slot::new(column, index), to))
    }

    /// Source and destination name the same slot
    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }

    pub fn is_within_column(&self) -> bool {
        self.from.column == self.to.column
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// Nothing changed
    NoOp,
    /// Reordered inside one column
    Reorder,
    /// Moved to another column
    Transfer,
}

/// Result of running the reorder engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    Unchanged,
    Moved { board: Board, kind: MoveKind },
}

impl MoveResult {
    pub fn kind(&self) -> MoveKind {
        match self {
            Self::Unchanged => MoveKind::NoOp,
            Self::Moved { kind, .. } => *kind,
        }
    }
}

/// Computes the board that results from `spec`.
///
/// The source slot must hold the task named by `spec.task_id`. The
/// destination index may range over `0..=len` of the destination column;
/// `len` appends. Inside a single column the index is clamped to the last
/// slot once the task has been lifted out, so dropping at `len` also means
/// "to the end".
pub fn apply_move(board: &Board, spec: &MoveSpec) -> Result<MoveResult> {
    let source = board.column(spec.from.column);
    let found = source
        .tasks()
        .get(spec.from.index)
        .ok_or_else(|| match board.locate(&spec.task_id) {
            Some(_) => RejectReason::SourceIndexOutOfRange {
                column: spec.from.column,
                index: spec.from.index,
                len: source.len(),
            },
            None => RejectReason::UnknownTask(spec.task_id.to_string()),
        })?;

    if found.id != spec.task_id {
        if board.locate(&spec.task_id).is_none() {
            return Err(RejectReason::UnknownTask(spec.task_id.to_string()).into());
        }
        return Err(RejectReason::TaskMismatch {
            expected: spec.task_id.to_string(),
            found: found.id.to_string(),
        }
        .into());
    }

    let destination_len = board.column(spec.to.column).len();
    if spec.to.index > destination_len {
        return Err(RejectReason::DestinationIndexOutOfRange {
            column: spec.to.column,
            index: spec.to.index,
            len: destination_len,
        }
        .into());
    }

    if spec.is_identity() {
        return Ok(MoveResult::Unchanged);
    }

    if spec.is_within_column() {
        // After lifting the task out the column is one shorter
        let target = spec.to.index.min(source.len() - 1);
        if target == spec.from.index {
            return Ok(MoveResult::Unchanged);
        }

        let mut next = board.clone();
        let tasks = next.column_mut(spec.from.column).tasks_mut();
        let task = tasks.remove(spec.from.index);
        tasks.insert(target, task);

        return Ok(MoveResult::Moved {
            board: next,
            kind: MoveKind::Reorder,
        });
    }

    let mut next = board.clone();
    let task = next
        .column_mut(spec.from.column)
        .tasks_mut()
        .remove(spec.from.index);
    next.column_mut(spec.to.column)
        .tasks_mut()
        .insert(spec.to.index, task);

    Ok(MoveResult::Moved {
        board: next,
        kind: MoveKind::Transfer,
    })
}
