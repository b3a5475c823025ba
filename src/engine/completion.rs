use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::aggregator::{AggregateState, Aggregator};
use crate::engine::errors::BarrierError;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BarrierState {
    /// Nothing registered yet.
    Idle,
    /// Open for registrations with work in flight.
    Active,
    /// Sealed, waiting on work still in flight.
    Draining,
    /// Every unit finished and the final state was delivered.
    Complete
}

/// Counting barrier over a dynamic set of spawned units of work.
///
/// Each unit holds a [`CompletionGuard`] for as long as it runs. Every guard
/// carries a clone of the barrier's channel sender, so the receiver only
/// reports closure once the barrier's own sender is dropped (sealing) and
/// every guard has been dropped.
pub struct CompletionBarrier {
    in_flight: Arc<AtomicUsize>,
    registered: usize,
    guard_sender: Option<mpsc::Sender<()>>,
    guard_receiver: mpsc::Receiver<()>,
    completed: Option<AggregateState>
}

impl CompletionBarrier {
    pub fn new() -> Self {
        let (guard_sender, guard_receiver) = mpsc::channel(1);

        Self {
            in_flight: Arc::new(AtomicUsize::new(0)),
            registered: 0,
            guard_sender: Some(guard_sender),
            guard_receiver,
            completed: None
        }
    }

    /// Registers one unit of work. Must be called before the unit is started.
    pub fn register(&mut self) -> Result<CompletionGuard, BarrierError> {
        let sender = self.guard_sender.as_ref().ok_or(BarrierError::Sealed)?;

        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.registered += 1;

        Ok(CompletionGuard {
            _sender: sender.clone(),
            in_flight: self.in_flight.clone()
        })
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn registered(&self) -> usize {
        self.registered
    }

    pub fn state(&self) -> BarrierState {
        match (&self.completed, &self.guard_sender) {
            (Some(_), _) => BarrierState::Complete,
            (None, None) => BarrierState::Draining,
            (None, Some(_)) if self.registered == 0 => BarrierState::Idle,
            (None, Some(_)) => BarrierState::Active
        }
    }

    /// Seals the barrier, waits for every registered unit, then hands the
    /// final aggregate to `on_complete`.
    ///
    /// `on_complete` runs at most once over the barrier's lifetime. Once
    /// complete, later calls return the same state without waiting.
    pub async fn wait<F>(&mut self, aggregator: &Aggregator, on_complete: F) -> AggregateState
    where
        F: FnOnce(&AggregateState),
    {
        if let Some(state) = &self.completed {
            return state.clone();
        }

        self.guard_sender.take();

        while self.guard_receiver.recv().await.is_some() {}

        let state = aggregator.snapshot().await;
        on_complete(&state);
        self.completed = Some(state.clone());

        state
    }
}

/// Marks one unit of work as in flight until dropped.
pub struct CompletionGuard {
    _sender: mpsc::Sender<()>,
    in_flight: Arc<AtomicUsize>
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
