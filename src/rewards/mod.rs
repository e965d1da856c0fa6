//! Completion rewards.
//!
//! The [`RewardTrigger`] decides whether a move completed a task. The
//! resulting [`RewardEvent`] is handed to a [`RewardSink`], the seam to the
//! hosted rewards service. Sinks are fire-and-forget: the board never waits on
//! them and never undoes a move because one failed.

use crate::config::RewardConfig;
use crate::domain::column::ColumnId;
use crate::domain::movement::MoveSpec;
use crate::domain::task::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod sink;

pub use sink::{ChannelSink, MemorySink, NullSink, RewardSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardReason {
    TaskCompleted,
}

/// XP grant sent to the rewards service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardEvent {
    /// Unique per grant, lets the service drop replays
    pub event_id: Uuid,
    pub task_id: TaskId,
    pub xp_delta: u32,
    pub reason: RewardReason,
    pub occurred_at: DateTime<Utc>,
}

impl RewardEvent {
    pub fn task_completed(task_id: TaskId, xp_delta: u32) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            task_id,
            xp_delta,
            reason: RewardReason::TaskCompleted,
            occurred_at: Utc::now(),
        }
    }
}

/// Turns board transitions into reward events
#[derive(Debug, Clone)]
pub struct RewardTrigger {
    terminal: ColumnId,
    xp_per_completion: u32,
}

impl RewardTrigger {
    pub fn new(config: &RewardConfig) -> Self {
        Self {
            terminal: config.terminal_column,
            xp_per_completion: config.xp_per_completion,
        }
    }

    /// True when the move takes a task into the terminal column from elsewhere
    pub fn completes_task(&self, spec: &MoveSpec) -> bool {
        spec.to.column == self.terminal && spec.from.column != self.terminal
    }

    /// Reward owed for an applied move, if any.
    ///
    /// Only call this for moves that actually changed the board.
    pub fn evaluate(&self, spec: &MoveSpec) -> Option<RewardEvent> {
        self.completes_task(spec)
            .then(|| RewardEvent::task_completed(spec.task_id.clone(), self.xp_per_completion))
    }

    pub fn xp_per_completion(&self) -> u32 {
        self.xp_per_completion
    }
}

impl Default for RewardTrigger {
    fn default() -> Self {
        Self::new(&RewardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::movement::Slot;
    use std::str::FromStr;

    fn spec(from: ColumnId, to: ColumnId) -> MoveSpec {
        MoveSpec::new(
            TaskId::from_str("task-1").unwrap(),
            Slot::new(from, 0),
            Slot::new(to, 0),
        )
    }

    #[test]
    fn test_fires_only_on_entry_to_done() {
        let trigger = RewardTrigger::default();

        assert!(trigger.completes_task(&spec(ColumnId::Todo, ColumnId::Done)));
        assert!(trigger.completes_task(&spec(ColumnId::InProgress, ColumnId::Done)));

        assert!(!trigger.completes_task(&spec(ColumnId::Done, ColumnId::Done)));
        assert!(!trigger.completes_task(&spec(ColumnId::Done, ColumnId::Todo)));
        assert!(!trigger.completes_task(&spec(ColumnId::Todo, ColumnId::InProgress)));
    }

    #[test]
    fn test_event_carries_configured_amount() {
        let trigger = RewardTrigger::new(&RewardConfig {
            xp_per_completion: 75,
            ..RewardConfig::default()
        });

        let event = trigger.evaluate(&spec(ColumnId::Todo, ColumnId::Done)).unwrap();
        assert_eq!(event.xp_delta, 75);
        assert_eq!(event.reason, RewardReason::TaskCompleted);
        assert_eq!(event.task_id.as_str(), "task-1");
    }

    #[test]
    fn test_custom_terminal_column() {
        let trigger = RewardTrigger::new(&RewardConfig {
            terminal_column: ColumnId::InProgress,
            ..RewardConfig::default()
        });

        assert!(trigger.completes_task(&spec(ColumnId::Todo, ColumnId::InProgress)));
        assert!(!trigger.completes_task(&spec(ColumnId::Todo, ColumnId::Done)));
    }

    #[test]
    fn test_event_wire_shape() {
        let event = RewardEvent::task_completed(TaskId::from_str("task-9").unwrap(), 50);
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["xpDelta"], 50);
        assert_eq!(value["reason"], "task_completed");
        assert_eq!(value["taskId"], "task-9");
        assert!(value["eventId"].is_string());
    }

    #[test]
    fn test_each_event_is_unique() {
        let a = RewardEvent::task_completed(TaskId::from_str("task-1").unwrap(), 50);
        let b = RewardEvent::task_completed(TaskId::from_str("task-1").unwrap(), 50);
        assert_ne!(a.event_id, b.event_id);
    }
}
