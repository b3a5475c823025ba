use std::collections::BTreeMap;

use tokio::sync::Mutex;
use tracing::error;

use crate::models::ChargeOutcome;
use crate::types::Amount;

/// Running totals for a batch of donations.
#[derive(Debug, Clone, Default)]
pub struct AggregateState {
    pub total_requested: Amount,
    pub total_charged: Amount,
    /// Records that reached the aggregator, successful or not.
    pub processed: usize,
    pub faulty: usize,
    /// Charged amount to donor name.
    ///
    /// Keyed by amount, so two donors charged the same amount share one slot
    /// and whichever outcome is recorded last keeps it. Completion order is
    /// not deterministic, so neither is the survivor.
    ranking: BTreeMap<Amount, String>
}

impl AggregateState {
    pub fn apply(&mut self, outcome: &ChargeOutcome) {
        self.total_requested += outcome.requested;
        self.total_charged += outcome.charged;
        self.processed += 1;

        if !outcome.is_success() {
            self.faulty += 1;
        }

        self.ranking.insert(outcome.charged, outcome.donor_name.clone());
    }

    /// Requested money that was not charged.
    ///
    /// Zero, with an error logged, if the gateway charged more than was asked.
    pub fn faulty_amount(&self) -> Amount {
        match self.total_requested.checked_sub(self.total_charged) {
            Some(amount) if !amount.is_negative() => amount,
            _ => {
                error!("Charged total [{}] exceeds requested total [{}]", self.total_charged, self.total_requested);
                Amount::ZERO
            }
        }
    }

    /// The donors holding the `count` largest charged amounts, largest first.
    ///
    /// The zero slot is never selected.
    pub fn top_donors(&self, count: usize) -> Vec<(Amount, &str)> {
        self.ranking.iter()
            .rev()
            .filter(|(amount, _)| !amount.is_zero())
            .take(count)
            .map(|(amount, name)| (*amount, name.as_str()))
            .collect()
    }

    #[cfg(test)]
    pub fn ranking(&self) -> &BTreeMap<Amount, String> {
        &self.ranking
    }
}

/// Shared accumulator that every worker reports into.
pub struct Aggregator {
    state: Mutex<AggregateState>
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(AggregateState::default())
        }
    }

    /// Applies one outcome to the totals and ranking as a single update.
    pub async fn record(&self, outcome: &ChargeOutcome) {
        self.state.lock().await.apply(outcome);
    }

    pub async fn snapshot(&self) -> AggregateState {
        self.state.lock().await.clone()
    }
}
