use alloy_primitives::{Address, Bytes, FixedBytes, B256, U256};
use serde::{Deserialize, Serialize};

/// One atomic contract call, produced by the normalizer. Ordering of planned
/// calls is significant and preserved end-to-end.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlannedCall {
    pub target: Address,
    pub value: U256,
    pub calldata: Bytes,
    pub chain_id: u64,
}

/// A pinned byte range inside authorized calldata: the bytes at `offset` must
/// equal `expected` exactly. Offsets not covered by any pin are wildcards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CalldataPin {
    pub offset: usize,
    pub expected: Bytes,
}

/// Off-chain description of the call shape a delegation is expected to
/// authorize, used purely for matching before submission.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DelegationIntent {
    pub target: Address,
    pub selector: FixedBytes<4>,
    pub allowed_calldata: Vec<CalldataPin>,
}

/// An on-chain-enforced restriction attached to a delegation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Caveat {
    pub enforcer: Address,
    pub terms: Bytes,
    pub args: Bytes,
}

/// A user-signed authorization token. The engine treats it as opaque beyond
/// what the matcher needs from the paired intent.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SignedDelegation {
    pub delegate: Address,
    pub delegator: Address,
    pub authority: B256,
    pub caveats: Vec<Caveat>,
    pub salt: B256,
    pub signature: Bytes,
}

/// The bundle of signed delegations produced by the onboarding flow.
/// Invariant: `delegations.len() == intents.len()`; index `i` in both arrays
/// refers to the same logical authorization. Never mutated by the engine.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DelegationBundle {
    pub chain_id: u64,
    pub delegation_manager: Address,
    pub delegator: Address,
    pub delegatee: Address,
    pub delegations: Vec<SignedDelegation>,
    pub intents: Vec<DelegationIntent>,
}

/// One high-level call as produced by strategy logic, before normalization.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CallRequest {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

/// A group of calls the caller considers one logical action. The normalizer
/// flattens batches into planned calls while preserving their order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TransactionRequestBatch {
    pub calls: Vec<CallRequest>,
}

/// The caller-supplied plan for one `execute` invocation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TransactionPlan {
    pub chain_id: u64,
    pub batches: Vec<TransactionRequestBatch>,
}

/// A planned call annotated with the delegation intent it matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchedCall {
    pub call: PlannedCall,
    pub intent_index: usize,
}

/// A maximal run of consecutive calls redeemed under the same delegation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionSegment {
    pub intent_index: usize,
    pub calls: Vec<PlannedCall>,
}

/// Whether a redemption's execution group contains one call or several.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionMode {
    Single,
    Batch,
}

/// One on-chain redemption transaction: the delegations presented, the call
/// groups they authorize, and the execution mode per group. The three lists
/// are index-paired.
#[derive(Clone, Debug)]
pub struct RedemptionPlan {
    pub permission_contexts: Vec<Vec<SignedDelegation>>,
    pub executions: Vec<Vec<PlannedCall>>,
    pub modes: Vec<ExecutionMode>,
}

/// Accumulated result of a run. On a submission failure this is returned as
/// the partial record alongside the error.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ExecutionOutcome {
    pub tx_hashes: Vec<B256>,
    pub receipts: Vec<crate::features::chain::TransactionReceipt>,
    pub gas_spent_wei: Option<U256>,
}
