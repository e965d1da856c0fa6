//! Boards shared between concurrent callers.
//!
//! A single [`BoardStore`] relies on `&mut self` for exclusive access. Hosts
//! that serve several users at once keep their stores here instead: each board
//! sits behind its own async mutex, so at most one move per board is in flight
//! while moves on different boards proceed independently.

use crate::config::SessionConfig;
use crate::domain::{Board, MoveSpec};
use crate::error::{BoardError, Result};
use crate::rewards::RewardSink;
use crate::store::{BoardStore, MoveReport};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Handle for a board held by a [`BoardRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardKey(Uuid);

impl BoardKey {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type SharedStore<S> = Arc<Mutex<BoardStore<S>>>;

pub struct BoardRegistry<S> {
    boards: RwLock<HashMap<BoardKey, SharedStore<S>>>,
    config: SessionConfig,
    sink: S,
}

impl<S> BoardRegistry<S>
where
    S: RewardSink + Clone,
{
    /// New boards get a clone of `sink` and `config`
    pub fn new(config: SessionConfig, sink: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            boards: RwLock::new(HashMap::new()),
            config,
            sink,
        })
    }

    pub async fn create(&self, board: Board) -> Result<BoardKey> {
        let key = BoardKey::new();
        let store = BoardStore::new(board, self.config.clone(), self.sink.clone())?;
        self.boards
            .write()
            .await
            .insert(key, Arc::new(Mutex::new(store)));
        tracing::debug!(board = %key, "board registered");
        Ok(key)
    }

    async fn store(&self, key: BoardKey) -> Result<SharedStore<S>> {
        self.boards
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or_else(|| BoardError::BoardNotFound(key.to_string()))
    }

    /// Applies a move while holding that board's lock
    pub async fn apply(&self, key: BoardKey, spec: &MoveSpec) -> Result<MoveReport> {
        let store = self.store(key).await?;
        let mut guard = store.lock().await;
        guard.apply(spec)
    }

    pub async fn snapshot(&self, key: BoardKey) -> Result<Arc<Board>> {
        let store = self.store(key).await?;
        let guard = store.lock().await;
        Ok(guard.current())
    }

    pub async fn xp(&self, key: BoardKey) -> Result<u64> {
        let store = self.store(key).await?;
        let guard = store.lock().await;
        Ok(guard.xp())
    }

    /// Drops a board, returning its final state
    pub async fn remove(&self, key: BoardKey) -> Result<Arc<Board>> {
        let store = self
            .boards
            .write()
            .await
            .remove(&key)
            .ok_or_else(|| BoardError::BoardNotFound(key.to_string()))?;
        let guard = store.lock().await;
        Ok(guard.current())
    }

    pub async fn len(&self) -> usize {
        self.boards.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.boards.read().await.is_empty()
    }
}
