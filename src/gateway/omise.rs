use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::trace;

use crate::config::GatewayConfig;
use crate::gateway::{Charge, ChargeRequest, GatewayError, PaymentGateway, Token, TokenRequest};
use crate::types::Amount;

/// [`PaymentGateway`] backed by the Omise REST API.
///
/// Tokens are created against the vault host with the public key, charges
/// against the API host with the secret key.
pub struct OmiseGateway {
    client: Client,
    public_key: String,
    secret_key: String,
    vault_url: String,
    api_url: String
}

impl OmiseGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GatewayError::Client)?;

        Ok(Self {
            client,
            public_key: config.public_key.clone(),
            secret_key: config.secret_key.clone(),
            vault_url: config.vault_url.trim_end_matches('/').to_string(),
            api_url: config.api_url.trim_end_matches('/').to_string()
        })
    }

    async fn post(&self, url: String, key: &str, form: &[(&str, String)]) -> Result<OmiseObject, GatewayError> {
        trace!("POST {url}");

        let response = self.client
            .post(url)
            .basic_auth(key, None::<&str>)
            .form(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;

        decode(status, &body)
    }
}

#[async_trait]
impl PaymentGateway for OmiseGateway {
    async fn create_token(&self, request: &TokenRequest) -> Result<Token, GatewayError> {
        let form = [
            ("card[name]", request.name.clone()),
            ("card[number]", request.number.clone()),
            ("card[expiration_month]", request.expiration_month.to_string()),
            ("card[expiration_year]", request.expiration_year.to_string())
        ];

        let object = self.post(format!("{}/tokens", self.vault_url), &self.public_key, &form).await?;

        into_token(object)
    }

    async fn create_charge(&self, request: &ChargeRequest) -> Result<Charge, GatewayError> {
        let form = [
            ("amount", request.amount.subunits().to_string()),
            ("currency", request.currency.clone()),
            ("card", request.card.clone())
        ];

        let object = self.post(format!("{}/charges", self.api_url), &self.secret_key, &form).await?;

        into_charge(object)
    }
}

/// Every Omise response body is a JSON object tagged by its `object` field.
#[derive(Debug, Deserialize)]
#[serde(tag = "object", rename_all = "lowercase")]
pub(super) enum OmiseObject {
    Token(OmiseToken),
    Charge(OmiseCharge),
    Error(OmiseFailure)
}

impl OmiseObject {
    fn kind(&self) -> &'static str {
        match self {
            OmiseObject::Token(_) => "token",
            OmiseObject::Charge(_) => "charge",
            OmiseObject::Error(_) => "error"
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct OmiseToken {
    id: String
}

#[derive(Debug, Deserialize)]
pub(super) struct OmiseCharge {
    id: String,
    amount: i64,
    status: ChargeStatus,
    failure_code: Option<String>,
    failure_message: Option<String>
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ChargeStatus {
    Successful,
    Pending,
    Failed,
    Reversed,
    Expired,
    #[serde(other)]
    Unknown
}

#[derive(Debug, Deserialize)]
pub(super) struct OmiseFailure {
    code: String,
    message: String
}

pub(super) fn decode(status: u16, body: &[u8]) -> Result<OmiseObject, GatewayError> {
    let object = serde_json::from_slice::<OmiseObject>(body)
        .map_err(|source| GatewayError::Decode { status, source })?;

    match object {
        OmiseObject::Error(failure) => Err(GatewayError::Rejected {
            code: failure.code,
            message: failure.message
        }),
        object => Ok(object)
    }
}

pub(super) fn into_token(object: OmiseObject) -> Result<Token, GatewayError> {
    match object {
        OmiseObject::Token(token) => Ok(Token { id: token.id }),
        other => Err(GatewayError::UnexpectedObject { expected: "token", found: other.kind() })
    }
}

pub(super) fn into_charge(object: OmiseObject) -> Result<Charge, GatewayError> {
    let charge = match object {
        OmiseObject::Charge(charge) => charge,
        other => return Err(GatewayError::UnexpectedObject { expected: "charge", found: other.kind() })
    };

    match charge.status {
        ChargeStatus::Successful => Ok(Charge {
            id: charge.id,
            amount: Amount::from_subunits(charge.amount)
        }),
        status => Err(GatewayError::Declined {
            charge_id: charge.id,
            code: charge.failure_code.unwrap_or_else(|| format!("{status:?}").to_lowercase()),
            message: charge.failure_message.unwrap_or_default()
        })
    }
}
