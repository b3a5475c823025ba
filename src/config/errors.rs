use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable [{0}] is required")]
    Missing(&'static str),
    #[error("Environment variable [{key}] has an invalid value [{value}]")]
    InvalidValue {
        key: &'static str,
        value: String
    }
}
