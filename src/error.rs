use crate::domain::types::ExecutionOutcome;
use alloy_primitives::{Address, FixedBytes};
use thiserror::Error;

/// Failure taxonomy of one `execute` run. Precondition and authorization
/// errors are raised before any network call; submission errors preserve the
/// partial record accumulated so far.
#[derive(Error, Clone, Debug)]
pub enum ExecutionError {
    #[error("transaction plan must include at least one call")]
    EmptyPlan,

    #[error("delegation bundle is malformed: {delegations} delegations vs {intents} intents")]
    BundleMismatch { delegations: usize, intents: usize },

    #[error("bundle chain_id {bundle_chain_id} does not match plan chain_id {plan_chain_id}")]
    ChainIdMismatch {
        bundle_chain_id: u64,
        plan_chain_id: u64,
    },

    /// The plan was built against capabilities the user never granted, for
    /// example a stale bundle after a strategy change. Requires re-onboarding.
    #[error("call[{call_index}] to {target} matches no delegation intent (selector={selector:?})")]
    Unauthorized {
        call_index: usize,
        target: Address,
        /// `None` when the calldata was shorter than a 4-byte selector.
        selector: Option<FixedBytes<4>>,
    },

    #[error("redemption plan {plan_index} failed: {reason}")]
    Submission {
        plan_index: usize,
        reason: String,
        partial: ExecutionOutcome,
    },
}

const TRANSIENT_MARKERS: &[&str] = &[
    "timeout",
    "temporarily unavailable",
    "connection reset",
    "connection refused",
    "network",
    "dns",
    "tls",
    "502",
    "503",
    "429",
    "gateway",
    "rate limit",
    "deadline exceeded",
];

impl ExecutionError {
    /// Whether the caller may reasonably retry the run. Only submission
    /// failures with a transient transport flavor qualify; precondition and
    /// authorization errors are deterministic, and a deterministic submission
    /// failure (revert, rejection) would fail again.
    pub fn is_retryable(&self) -> bool {
        let ExecutionError::Submission { reason, .. } = self else {
            return false;
        };
        let normalized = reason.to_ascii_lowercase();
        TRANSIENT_MARKERS
            .iter()
            .any(|marker| normalized.contains(marker))
    }
}

#[cfg(test)]
mod tests {
    use super::ExecutionError;
    use crate::domain::types::ExecutionOutcome;
    use crate::test_support::{address, selector};

    #[test]
    fn unauthorized_error_reports_call_index_target_and_selector() {
        let error = ExecutionError::Unauthorized {
            call_index: 3,
            target: address(0xde),
            selector: Some(selector(0xa9)),
        };
        let message = error.to_string();
        assert!(message.contains("call[3]"), "got: {message}");
        assert!(message.contains("0xa9"), "got: {message}");
    }

    #[test]
    fn is_retryable_distinguishes_transport_failures_from_reverts() {
        let transient = ExecutionError::Submission {
            plan_index: 0,
            reason: "broadcast failed: rpc timeout while talking to upstream".to_string(),
            partial: ExecutionOutcome::default(),
        };
        assert!(transient.is_retryable());

        let deterministic = ExecutionError::Submission {
            plan_index: 0,
            reason: "transaction reverted: tx=0xabc".to_string(),
            partial: ExecutionOutcome::default(),
        };
        assert!(!deterministic.is_retryable());

        assert!(!ExecutionError::EmptyPlan.is_retryable());
    }
}
