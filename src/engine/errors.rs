use thiserror::Error;

#[derive(Debug, Error)]
pub enum BarrierError {
    #[error("Completion barrier is sealed, no further work can be registered")]
    Sealed
}
