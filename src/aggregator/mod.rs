mod aggregate_state;

pub use aggregate_state::{AggregateState, Aggregator};
