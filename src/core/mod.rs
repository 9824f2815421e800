pub mod aggregator;
pub mod log;
pub mod mutation;
pub mod pipeline;
pub mod range;
pub mod session;
pub mod store;
