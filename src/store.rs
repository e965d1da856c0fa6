use crate::config::SessionConfig;
use crate::domain::board::Board;
use crate::domain::movement::{apply_move, MoveKind, MoveResult, MoveSpec};
use crate::error::{BoardError, Result};
use crate::rewards::{RewardEvent, RewardSink, RewardTrigger};
use serde::Serialize;
use std::sync::Arc;

/// Output of a successful move, for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardEvent {
    /// XP was granted; `total` is the session counter after the grant
    XpGained { reward: RewardEvent, total: u64 },
    /// Play the completion effect
    Celebrate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub kind: MoveKind,
    pub events: Vec<BoardEvent>,
}

impl MoveReport {
    fn unchanged() -> Self {
        Self {
            kind: MoveKind::NoOp,
            events: Vec::new(),
        }
    }

    pub fn changed(&self) -> bool {
        self.kind != MoveKind::NoOp
    }

    /// The reward granted by this move, if any
    pub fn reward(&self) -> Option<&RewardEvent> {
        self.events.iter().find_map(|event| match event {
            BoardEvent::XpGained { reward, .. } => Some(reward),
            BoardEvent::Celebrate => None,
        })
    }

    pub fn celebrates(&self) -> bool {
        self.events.contains(&BoardEvent::Celebrate)
    }
}

/// Owns the board for one session.
///
/// Every accepted move swaps in a freshly computed [`Board`]; snapshots
/// handed out by [`BoardStore::current`] stay valid and unchanged.
pub struct BoardStore<S> {
    board: Arc<Board>,
    config: SessionConfig,
    trigger: RewardTrigger,
    sink: S,
    xp: u64,
}

impl<S: RewardSink> BoardStore<S> {
    /// Creates a store, rejecting configs that fail [`SessionConfig::validate`]
    pub fn new(board: Board, config: SessionConfig, sink: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            board: Arc::new(board),
            trigger: RewardTrigger::new(&config.rewards),
            xp: config.rewards.starting_xp,
            config,
            sink,
        })
    }

    /// Current board value
    pub fn current(&self) -> Arc<Board> {
        Arc::clone(&self.board)
    }

    /// Session XP
    pub fn xp(&self) -> u64 {
        self.xp
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Applies a drag result.
    ///
    /// Rejected moves return `MoveRejected` and leave the board as it was.
    pub fn apply(&mut self, spec: &MoveSpec) -> Result<MoveReport> {
        let result = match apply_move(&self.board, spec) {
            Ok(result) => result,
            Err(err) => {
                if let BoardError::MoveRejected(reason) = &err {
                    tracing::warn!(task_id = %spec.task_id, %reason, "move rejected");
                }
                return Err(err);
            }
        };

        let (next, kind) = match result {
            MoveResult::Unchanged => return Ok(MoveReport::unchanged()),
            MoveResult::Moved { board, kind } => (board, kind),
        };

        self.board = Arc::new(next);
        tracing::debug!(
            task_id = %spec.task_id,
            from = %spec.from.column,
            from_index = spec.from.index,
            to = %spec.to.column,
            to_index = spec.to.index,
            ?kind,
            "task moved"
        );

        let mut events = Vec::new();
        if let Some(reward) = self.trigger.evaluate(spec) {
            self.xp = self.xp.saturating_add(u64::from(reward.xp_delta));
            tracing::info!(
                task_id = %reward.task_id,
                xp_delta = reward.xp_delta,
                total_xp = self.xp,
                "task completed"
            );

            if let Err(err) = self.sink.record(&reward) {
                tracing::warn!(
                    event_id = %reward.event_id,
                    error = %err,
                    "failed to record reward, keeping the move"
                );
            }

            events.push(BoardEvent::XpGained {
                reward,
                total: self.xp,
            });
            events.push(BoardEvent::Celebrate);
        }

        Ok(MoveReport { kind, events })
    }
}
