use crate::{
    config::SessionConfig,
    domain::{Board, Column, ColumnId, Priority, Task, TaskId},
    error::{BoardError, Result},
    seed::SeedSource,
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Serves a fixed board and config from memory
#[derive(Debug, Clone)]
pub struct StaticSeed {
    board: Board,
    config: SessionConfig,
}

impl StaticSeed {
    pub fn new(board: Board, config: SessionConfig) -> Self {
        Self { board, config }
    }

    /// The sample board shown to first-time users
    pub fn demo() -> Result<Self> {
        Ok(Self::new(demo_board()?, SessionConfig::default()))
    }
}

#[async_trait]
impl SeedSource for StaticSeed {
    async fn load_board(&self) -> Result<Board> {
        Ok(self.board.clone())
    }

    async fn load_config(&self) -> Result<SessionConfig> {
        Ok(self.config.clone())
    }
}

struct DemoTask {
    column: ColumnId,
    id: &'static str,
    content: &'static str,
    priority: Priority,
    due: &'static str,
    tags: &'static [&'static str],
}

const DEMO_TASKS: &[DemoTask] = &[
    DemoTask {
        column: ColumnId::Todo,
        id: "task-1",
        content: "Upload Q1 business receipts",
        priority: Priority::High,
        due: "2024-01-20",
        tags: &["tax", "business"],
    },
    DemoTask {
        column: ColumnId::Todo,
        id: "task-2",
        content: "Categorize dining expenses",
        priority: Priority::Medium,
        due: "2024-01-18",
        tags: &["personal"],
    },
    DemoTask {
        column: ColumnId::Todo,
        id: "task-3",
        content: "Review subscription payments",
        priority: Priority::Low,
        due: "2024-01-25",
        tags: &["recurring"],
    },
    DemoTask {
        column: ColumnId::InProgress,
        id: "task-4",
        content: "Process travel receipts from business trip",
        priority: Priority::High,
        due: "2024-01-17",
        tags: &["business", "travel"],
    },
    DemoTask {
        column: ColumnId::InProgress,
        id: "task-5",
        content: "Set up automatic expense categorization",
        priority: Priority::Medium,
        due: "2024-01-22",
        tags: &["automation"],
    },
    DemoTask {
        column: ColumnId::Done,
        id: "task-6",
        content: "Export December expense report",
        priority: Priority::High,
        due: "2024-01-05",
        tags: &["report", "monthly"],
    },
    DemoTask {
        column: ColumnId::Done,
        id: "task-7",
        content: "Update tax deduction categories",
        priority: Priority::Medium,
        due: "2024-01-10",
        tags: &["tax", "setup"],
    },
];

impl DemoTask {
    fn to_task(&self) -> Result<Task> {
        let due_date = self.due.parse::<NaiveDate>().map_err(|err| {
            BoardError::InvalidBoard(format!("bad due date for {}: {}", self.id, err))
        })?;
        let task = Task::new(self.id.parse::<TaskId>()?, self.content, self.priority, due_date);
        Ok(task.with_tags(self.tags.iter().copied()))
    }
}

/// Receipt-housekeeping tasks spread over the three columns
pub fn demo_board() -> Result<Board> {
    let mut columns = Vec::with_capacity(ColumnId::ALL.len());
    for id in ColumnId::ALL {
        let tasks = DEMO_TASKS
            .iter()
            .filter(|demo| demo.column == id)
            .map(DemoTask::to_task)
            .collect::<Result<Vec<_>>>()?;
        columns.push(Column::new(id, id.default_title(), tasks));
    }
    Board::new(columns)
}
