use crate::{
    config::SessionConfig,
    domain::Board,
    error::{BoardError, Result},
    seed::{demo::demo_board, SeedSource},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Reads seed data from a `.taskboard` directory
pub struct FileSeedSource {
    root_path: PathBuf,
}

impl FileSeedSource {
    const SEED_DIR: &'static str = ".taskboard";
    const BOARD_FILE: &'static str = "board.json";
    const CONFIG_FILE: &'static str = "config.json";

    /// Creates a seed source for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::SEED_DIR),
        }
    }

    fn board_file(&self) -> PathBuf {
        self.root_path.join(Self::BOARD_FILE)
    }

    fn config_file(&self) -> PathBuf {
        self.root_path.join(Self::CONFIG_FILE)
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    /// Writes the demo board if no board file exists yet
    pub async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        if !self.board_file().exists() {
            self.save_board(&demo_board()?).await?;
        }

        Ok(())
    }

    /// Overwrites the seed board
    pub async fn save_board(&self, board: &Board) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = serde_json::to_string_pretty(board)?;
        fs::write(self.board_file(), json).await?;

        Ok(())
    }

    pub async fn is_initialized(&self) -> bool {
        self.root_path.exists() && self.board_file().exists()
    }
}

#[async_trait]
impl SeedSource for FileSeedSource {
    async fn load_board(&self) -> Result<Board> {
        let board_file = self.board_file();

        if !board_file.exists() {
            return Err(BoardError::BoardNotInitialized);
        }

        let contents = fs::read_to_string(&board_file).await?;
        let board: Board = serde_json::from_str(&contents).map_err(|err| {
            if err.is_data() {
                BoardError::InvalidBoard(err.to_string())
            } else {
                BoardError::SerializationError(err)
            }
        })?;

        tracing::debug!(
            path = %board_file.display(),
            tasks = board.task_count(),
            "loaded seed board"
        );
        Ok(board)
    }

    async fn load_config(&self) -> Result<SessionConfig> {
        let config_file = self.config_file();

        // Config is optional
        if !config_file.exists() {
            return Ok(SessionConfig::default());
        }

        let contents = fs::read_to_string(&config_file).await?;
        SessionConfig::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ColumnId;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_seed_initialization() {
        let temp_dir = TempDir::new().unwrap();
        let seed = FileSeedSource::new(temp_dir.path());

        assert!(!seed.is_initialized().await);

        seed.initialize().await.unwrap();

        assert!(seed.is_initialized().await);
        let board = seed.load_board().await.unwrap();
        assert_eq!(board, demo_board().unwrap());
    }

    #[tokio::test]
    async fn test_initialize_keeps_existing_board() {
        let temp_dir = TempDir::new().unwrap();
        let seed = FileSeedSource::new(temp_dir.path());

        seed.save_board(&Board::empty()).await.unwrap();
        seed.initialize().await.unwrap();

        let board = seed.load_board().await.unwrap();
        assert_eq!(board.task_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_board_is_not_initialized() {
        let temp_dir = TempDir::new().unwrap();
        let seed = FileSeedSource::new(temp_dir.path());

        let err = seed.load_board().await.unwrap_err();
        assert!(matches!(err, BoardError::BoardNotInitialized));
    }

    #[tokio::test]
    async fn test_board_with_duplicate_task_is_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let seed = FileSeedSource::new(temp_dir.path());
        seed.initialize().await.unwrap();

        let task = r#"{
            "id": "task-1",
            "content": "x",
            "priority": "low",
            "dueDate": "2024-01-01",
            "tags": []
        }"#;
        let json = format!(
            r#"{{
                "todo": {{"id": "todo", "title": "To Do", "tasks": [{task}]}},
                "inprogress": {{"id": "inprogress", "title": "In Progress", "tasks": [{task}]}},
                "done": {{"id": "done", "title": "Done", "tasks": []}}
            }}"#
        );
        fs::write(seed.board_file(), json).await.unwrap();

        let err = seed.load_board().await.unwrap_err();
        assert!(matches!(err, BoardError::InvalidBoard(_)));
    }

    #[tokio::test]
    async fn test_config_defaults_when_absent() {
        let temp_dir = TempDir::new().unwrap();
        let seed = FileSeedSource::new(temp_dir.path());
        seed.initialize().await.unwrap();

        let config = seed.load_config().await.unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[tokio::test]
    async fn test_config_loaded_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let seed = FileSeedSource::new(temp_dir.path());
        seed.initialize().await.unwrap();

        fs::write(
            seed.config_file(),
            r#"{
                "board_name": "Receipts",
                "rewards": {"xp_per_completion": 25, "terminal_column": "done"}
            }"#,
        )
        .await
        .unwrap();

        let config = seed.load_config().await.unwrap();
        assert_eq!(config.board_name, "Receipts");
        assert_eq!(config.rewards.xp_per_completion, 25);
        assert_eq!(config.rewards.terminal_column, ColumnId::Done);
    }
}
