mod errors;
mod omise;
#[cfg(test)]
pub mod stub;
#[cfg(test)]
mod tests;

use async_trait::async_trait;

use crate::types::{Amount, Currency};

pub use errors::GatewayError;
pub use omise::OmiseGateway;

/// Remote payment service that tokenizes cards and charges tokens.
#[async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    async fn create_token(&self, request: &TokenRequest) -> Result<Token, GatewayError>;
    async fn create_charge(&self, request: &ChargeRequest) -> Result<Charge, GatewayError>;
}

/// Card details exchanged for a single-use token.
pub struct TokenRequest {
    pub name: String,
    pub number: String,
    pub expiration_month: u8,
    pub expiration_year: u16
}

#[derive(Debug, Clone)]
pub struct Token {
    pub id: String
}

#[derive(Debug, Clone)]
pub struct ChargeRequest {
    pub amount: Amount,
    pub currency: Currency,
    /// Token id returned by [`PaymentGateway::create_token`].
    pub card: String
}

#[derive(Debug, Clone)]
pub struct Charge {
    pub id: String,
    pub amount: Amount
}
