pub mod chain;
pub mod gas;
pub mod redeemer;

pub use chain::{ChainClient, MockChainClient};
