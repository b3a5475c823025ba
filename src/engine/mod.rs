mod async_engine;
mod completion;
mod errors;
mod rate_gate;
mod report;

pub use async_engine::DonationEngine;
pub use report::Report;
