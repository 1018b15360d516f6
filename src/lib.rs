pub mod domain;
mod engine;
mod error;
pub mod features;
pub mod observer;
#[cfg(test)]
pub(crate) mod test_support;

pub use domain::types::{
    CallRequest, CalldataPin, Caveat, DelegationBundle, DelegationIntent, ExecutionMode,
    ExecutionOutcome, ExecutionSegment, PlannedCall, RedemptionPlan, SignedDelegation,
    TransactionPlan, TransactionRequestBatch,
};
pub use engine::DelegationEngine;
pub use error::ExecutionError;
pub use features::chain::{ChainClient, MockChainClient, TransactionReceipt, TransactionRequest};
pub use features::gas::{GasConfig, DEFAULT_GAS_FLOOR, DEFAULT_SAFETY_MULTIPLIER_BPS};
pub use observer::{ExecutionObserver, NoopObserver, RecordingObserver, TracingObserver};
