use crate::domain::column::{Column, ColumnId};
use crate::domain::task::{Task, TaskId};
use crate::error::{BoardError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Kanban board state: one column per [`ColumnId`], each holding an ordered
/// list of tasks.
///
/// On the wire a board is a JSON object keyed by column id. Internally every
/// column is always present, so lookups by id cannot miss. A `Board` is only
/// ever built through validation, which guarantees that each task id occurs
/// exactly once across all columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<ColumnId, Column>",
    into = "BTreeMap<ColumnId, Column>"
)]
pub struct Board {
    todo: Column,
    in_progress: Column,
    done: Column,
}

impl Board {
    /// Builds a board from a set of columns, validating the placement invariants
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Result<Self> {
        let mut by_id = BTreeMap::new();
        for column in columns {
            let id = column.id;
            if by_id.insert(id, column).is_some() {
                return Err(BoardError::InvalidBoard(format!(
                    "column {} appears more than once",
                    id
                )));
            }
        }
        Self::try_from(by_id)
    }

    /// Builds a board with default column titles
    pub fn with_tasks(todo: Vec<Task>, in_progress: Vec<Task>, done: Vec<Task>) -> Result<Self> {
        Self::new([
            Column::new(ColumnId::Todo, ColumnId::Todo.default_title(), todo),
            Column::new(
                ColumnId::InProgress,
                ColumnId::InProgress.default_title(),
                in_progress,
            ),
            Column::new(ColumnId::Done, ColumnId::Done.default_title(), done),
        ])
    }

    /// A board with three empty columns
    pub fn empty() -> Self {
        Self {
            todo: Column::empty(ColumnId::Todo),
            in_progress: Column::empty(ColumnId::InProgress),
            done: Column::empty(ColumnId::Done),
        }
    }

    pub fn column(&self, id: ColumnId) -> &Column {
        match id {
            ColumnId::Todo => &self.todo,
            ColumnId::InProgress => &self.in_progress,
            ColumnId::Done => &self.done,
        }
    }

    pub(crate) fn column_mut(&mut self, id: ColumnId) -> &mut Column {
        match id {
            ColumnId::Todo => &mut self.todo,
            ColumnId::InProgress => &mut self.in_progress,
            ColumnId::Done => &mut self.done,
        }
    }

    /// Columns in display order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        ColumnId::ALL.into_iter().map(move |id| self.column(id))
    }

    pub fn task_count(&self) -> usize {
        self.columns().map(Column::len).sum()
    }

    /// All task ids, column by column, in on-screen order
    pub fn task_ids(&self) -> Vec<&TaskId> {
        self.columns()
            .flat_map(|column| column.tasks().iter().map(|task| &task.id))
            .collect()
    }

    /// Finds the column and slot currently holding a task
    pub fn locate(&self, id: &TaskId) -> Option<(ColumnId, usize)> {
        self.columns().find_map(|column| {
            column
                .tasks()
                .iter()
                .position(|task| &task.id == id)
                .map(|index| (column.id, index))
        })
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.locate(id)
            .map(|(column, index)| &self.column(column).tasks()[index])
    }

    /// Returns a task or a `TaskNotFound` error
    pub fn get_task(&self, id: &TaskId) -> Result<&Task> {
        self.task(id)
            .ok_or_else(|| BoardError::TaskNotFound(id.to_string()))
    }

    /// Tasks whose content or tags contain the query (case-insensitive)
    pub fn search(&self, query: &str) -> Vec<&Task> {
        self.columns()
            .flat_map(|column| column.tasks())
            .filter(|task| task.matches(query))
            .collect()
    }

    /// Open tasks (anywhere but `done`) whose due date has passed
    pub fn overdue(&self, today: NaiveDate) -> Vec<&Task> {
        self.columns()
            .filter(|column| column.id != ColumnId::Done)
            .flat_map(|column| column.tasks())
            .filter(|task| task.is_overdue(today))
            .collect()
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for column in self.columns() {
            for task in column.tasks() {
                if !seen.insert(&task.id) {
                    return Err(BoardError::InvalidBoard(format!(
                        "task {} appears more than once",
                        task.id
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<BTreeMap<ColumnId, Column>> for Board {
    type Error = BoardError;

    fn try_from(mut columns: BTreeMap<ColumnId, Column>) -> Result<Self> {
        for (key, column) in &columns {
            if *key != column.id {
                return Err(BoardError::InvalidBoard(format!(
                    "column keyed as {} declares id {}",
                    key, column.id
                )));
            }
        }

        let mut take = |id: ColumnId| {
            columns
                .remove(&id)
                .ok_or_else(|| BoardError::InvalidBoard(format!("missing column {}", id)))
        };

        let board = Self {
            todo: take(ColumnId::Todo)?,
            in_progress: take(ColumnId::InProgress)?,
            done: take(ColumnId::Done)?,
        };
        board.validate()?;
        Ok(board)
    }
}

impl From<Board> for BTreeMap<ColumnId, Column> {
    fn from(board: Board) -> Self {
        [board.todo, board.in_progress, board.done]
            .into_iter()
            .map(|column| (column.id, column))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::Priority;
    use std::str::FromStr;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn task(id: &str, content: &str, due: u32) -> Task {
        Task::new(TaskId::from_str(id).unwrap(), content, Priority::Medium, date(due))
    }

    #[test]
    fn test_board_creation() {
        let board = Board::default();
        assert_eq!(board.task_count(), 0);
        assert_eq!(
            board.columns().map(|c| c.id).collect::<Vec<_>>(),
            ColumnId::ALL.to_vec()
        );
    }

    #[test]
    fn test_locate_and_lookup() {
        let board = Board::with_tasks(
            vec![task("t1", "a", 1), task("t2", "b", 2)],
            vec![],
            vec![task("t3", "c", 3)],
        )
        .unwrap();

        let t2 = TaskId::from_str("t2").unwrap();
        assert_eq!(board.locate(&t2), Some((ColumnId::Todo, 1)));
        assert_eq!(board.task(&t2).unwrap().content, "b");

        let t3 = TaskId::from_str("t3").unwrap();
        assert_eq!(board.locate(&t3), Some((ColumnId::Done, 0)));

        let missing = TaskId::from_str("nope").unwrap();
        assert!(board.locate(&missing).is_none());
        assert!(matches!(
            board.get_task(&missing),
            Err(BoardError::TaskNotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_task_rejected() {
        let result = Board::with_tasks(vec![task("t1", "a", 1)], vec![task("t1", "b", 2)], vec![]);
        assert!(matches!(result, Err(BoardError::InvalidBoard(_))));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let result = Board::new([
            Column::empty(ColumnId::Todo),
            Column::empty(ColumnId::Todo),
            Column::empty(ColumnId::Done),
        ]);
        assert!(matches!(result, Err(BoardError::InvalidBoard(_))));
    }

    #[test]
    fn test_missing_column_rejected() {
        let json = r#"{
            "todo": {"id": "todo", "title": "To Do", "tasks": []},
            "done": {"id": "done", "title": "Done", "tasks": []}
        }"#;
        assert!(serde_json::from_str::<Board>(json).is_err());
    }

    #[test]
    fn test_mismatched_key_rejected() {
        let json = r#"{
            "todo": {"id": "done", "title": "To Do", "tasks": []},
            "inprogress": {"id": "inprogress", "title": "In Progress", "tasks": []},
            "done": {"id": "done", "title": "Done", "tasks": []}
        }"#;
        assert!(serde_json::from_str::<Board>(json).is_err());
    }

    #[test]
    fn test_board_json_shape() {
        let board = Board::with_tasks(vec![task("t1", "a", 1)], vec![], vec![]).unwrap();
        let value = serde_json::to_value(&board).unwrap();

        assert_eq!(value["todo"]["id"], "todo");
        assert_eq!(value["todo"]["title"], "To Do");
        assert_eq!(value["todo"]["tasks"][0]["id"], "t1");
        assert_eq!(value["inprogress"]["tasks"].as_array().unwrap().len(), 0);

        let back: Board = serde_json::from_value(value).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_search() {
        let board = Board::with_tasks(
            vec![task("t1", "Upload receipts", 1).with_tags(["tax"])],
            vec![task("t2", "Review subscriptions", 2)],
            vec![task("t3", "Update tax categories", 3)],
        )
        .unwrap();

        let ids: Vec<_> = board.search("TAX").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t3"]);
        assert!(board.search("nothing").is_empty());
    }

    #[test]
    fn test_overdue_skips_done_column() {
        let board = Board::with_tasks(
            vec![task("t1", "a", 5), task("t2", "b", 20)],
            vec![task("t3", "c", 9)],
            vec![task("t4", "d", 1)],
        )
        .unwrap();

        let ids: Vec<_> = board
            .overdue(date(10))
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["t1", "t3"]);
    }
}
