use crate::domain::task::Task;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The three fixed lanes of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnId {
    Todo,
    InProgress,
    Done,
}

impl ColumnId {
    /// Every column, in display order
    pub const ALL: [ColumnId; 3] = [ColumnId::Todo, ColumnId::InProgress, ColumnId::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inprogress",
            Self::Done => "done",
        }
    }

    /// Title used when a seed does not name the column
    pub fn default_title(&self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(format!(
                "Invalid column '{}'. Valid columns: todo, inprogress, done",
                s
            )),
        }
    }
}

/// An ordered bucket of tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    tasks: Vec<Task>,
}

impl Column {
    pub fn new(id: ColumnId, title: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            id,
            title: title.into(),
            tasks,
        }
    }

    /// An empty column carrying its default title
    pub fn empty(id: ColumnId) -> Self {
        Self::new(id, id.default_title(), Vec::new())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub(crate) fn tasks_mut(&mut self) -> &mut Vec<Task> {
        &mut self.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_id_round_trip_names() {
        for id in ColumnId::ALL {
            assert_eq!(ColumnId::from_str(id.as_str()).unwrap(), id);
        }
        assert_eq!(ColumnId::from_str("DONE").unwrap(), ColumnId::Done);
        assert!(ColumnId::from_str("backlog").is_err());
    }

    #[test]
    fn test_column_id_serializes_lowercase() {
        let json = serde_json::to_string(&ColumnId::InProgress).unwrap();
        assert_eq!(json, "\"inprogress\"");
    }

    #[test]
    fn test_display_order() {
        let mut ids = vec![ColumnId::Done, ColumnId::Todo, ColumnId::InProgress];
        ids.sort();
        assert_eq!(ids, ColumnId::ALL.to_vec());
    }

    #[test]
    fn test_empty_column() {
        let column = Column::empty(ColumnId::InProgress);
        assert_eq!(column.title, "In Progress");
        assert!(column.is_empty());
    }
}
