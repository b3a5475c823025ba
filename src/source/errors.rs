use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Line count stopped after [{counted}] lines: {source}")]
    PartialCount {
        counted: usize,
        source: io::Error
    },
    #[error("Unable to rewind record source: {0}")]
    Rewind(io::Error),
    #[error("Unable to read header line: {0}")]
    Header(io::Error)
}
