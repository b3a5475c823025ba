use std::collections::HashSet;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::time::sleep;

use crate::gateway::{Charge, ChargeRequest, GatewayError, PaymentGateway, Token, TokenRequest};
use crate::types::Amount;

/// In-process gateway with configurable latency and declines.
pub struct StubGateway {
    latency: Option<Range<u64>>,
    declined_cards: HashSet<String>,
    charge_limit: Option<Amount>,
    token_calls: AtomicUsize,
    charge_calls: AtomicUsize
}

impl StubGateway {
    pub fn new() -> Self {
        Self {
            latency: None,
            declined_cards: HashSet::new(),
            charge_limit: None,
            token_calls: AtomicUsize::new(0),
            charge_calls: AtomicUsize::new(0)
        }
    }

    /// Sleeps a random number of milliseconds from `millis` on every call.
    pub fn with_latency(mut self, millis: Range<u64>) -> Self {
        self.latency = Some(millis);
        self
    }

    /// Tokenization fails for this card number.
    pub fn with_declined_card(mut self, number: &str) -> Self {
        self.declined_cards.insert(number.to_string());
        self
    }

    /// Charges above `limit` fail.
    pub fn with_charge_limit(mut self, limit: Amount) -> Self {
        self.charge_limit = Some(limit);
        self
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn charge_calls(&self) -> usize {
        self.charge_calls.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        let Some(range) = &self.latency else {
            return;
        };

        let millis = if range.is_empty() {
            range.start
        } else {
            rand::thread_rng().gen_range(range.clone())
        };

        sleep(Duration::from_millis(millis)).await;
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_token(&self, request: &TokenRequest) -> Result<Token, GatewayError> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if self.declined_cards.contains(&request.number) {
            return Err(GatewayError::Rejected {
                code: "invalid_card".to_string(),
                message: "number is invalid".to_string()
            });
        }

        Ok(Token { id: format!("tokn_test_{}", request.number) })
    }

    async fn create_charge(&self, request: &ChargeRequest) -> Result<Charge, GatewayError> {
        let call = self.charge_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if matches!(self.charge_limit, Some(limit) if request.amount > limit) {
            return Err(GatewayError::Declined {
                charge_id: format!("chrg_test_{call}"),
                code: "insufficient_fund".to_string(),
                message: "insufficient funds in the account".to_string()
            });
        }

        Ok(Charge {
            id: format!("chrg_test_{call}"),
            amount: request.amount
        })
    }
}
