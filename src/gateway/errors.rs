use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Unable to build gateway client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Gateway transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Gateway rejected request [{code}]: {message}")]
    Rejected {
        code: String,
        message: String
    },
    #[error("Charge [{charge_id}] did not settle [{code}]: {message}")]
    Declined {
        charge_id: String,
        code: String,
        message: String
    },
    #[error("Gateway response with HTTP status [{status}] could not be decoded: {source}")]
    Decode {
        status: u16,
        source: serde_json::Error
    },
    #[error("Gateway returned a [{found}] object where a [{expected}] was expected")]
    UnexpectedObject {
        expected: &'static str,
        found: &'static str
    }
}
