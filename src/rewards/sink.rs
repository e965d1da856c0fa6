use crate::rewards::RewardEvent;
use anyhow::{anyhow, Result};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Destination for reward events.
///
/// `record` must not block: the board calls it synchronously while handling a
/// drop and ignores the outcome beyond logging it.
pub trait RewardSink: Send + Sync {
    fn record(&self, event: &RewardEvent) -> Result<()>;
}

impl<S: RewardSink + ?Sized> RewardSink for Arc<S> {
    fn record(&self, event: &RewardEvent) -> Result<()> {
        (**self).record(event)
    }
}

impl<S: RewardSink + ?Sized> RewardSink for Box<S> {
    fn record(&self, event: &RewardEvent) -> Result<()> {
        (**self).record(event)
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RewardSink for NullSink {
    fn record(&self, _event: &RewardEvent) -> Result<()> {
        Ok(())
    }
}

/// Keeps events in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<RewardEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RewardEvent> {
        // A panic elsewhere must not hide what was already recorded
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Sum of all recorded XP
    pub fn total_xp(&self) -> u64 {
        self.events().iter().map(|e| u64::from(e.xp_delta)).sum()
    }
}

impl RewardSink for MemorySink {
    fn record(&self, event: &RewardEvent) -> Result<()> {
        self.events
            .lock()
            .map_err(|_| anyhow!("reward log lock poisoned"))?
            .push(event.clone());
        Ok(())
    }
}

/// Forwards events to an async consumer, typically the adapter that talks to
/// the hosted rewards service
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<RewardEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<RewardEvent>) -> Self {
        Self { tx }
    }

    /// Creates a sink together with the receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RewardEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl RewardSink for ChannelSink {
    fn record(&self, event: &RewardEvent) -> Result<()> {
        self.tx
            .send(event.clone())
            .map_err(|_| anyhow!("rewards consumer has shut down"))
    }
}
