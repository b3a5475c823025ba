mod errors;
mod record_source;

pub use errors::SourceError;
pub use record_source::RecordSource;
