use crate::domain::matcher::match_intent;
use crate::domain::normalize::normalize;
use crate::domain::planner::plan_redemptions;
use crate::domain::segmenter::segment;
use crate::domain::types::{
    DelegationBundle, ExecutionOutcome, MatchedCall, TransactionPlan,
};
use crate::error::ExecutionError;
use crate::features::chain::ChainClient;
use crate::features::gas::GasConfig;
use crate::features::redeemer::submit_redemptions;
use crate::observer::{ExecutionObserver, NoopObserver};
use std::sync::Arc;

/// The delegated execution engine. Holds no state between runs; each call to
/// [`DelegationEngine::execute`] is independent, so independent invocations
/// may run concurrently. Within one run, redemption transactions are
/// submitted strictly sequentially.
pub struct DelegationEngine {
    client: Arc<dyn ChainClient>,
    gas: GasConfig,
    observer: Arc<dyn ExecutionObserver>,
}

impl DelegationEngine {
    pub fn new(client: Arc<dyn ChainClient>) -> Self {
        Self {
            client,
            gas: GasConfig::default(),
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_gas_config(mut self, gas: GasConfig) -> Self {
        self.gas = gas;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Executes a transaction plan strictly through the bundle's signed
    /// delegations: normalize, match each call to its intent, group into
    /// segments, derive redemption plans, then submit and confirm them in
    /// order. Precondition and authorization failures are raised before any
    /// network call is made.
    pub async fn execute(
        &self,
        bundle: &DelegationBundle,
        plan: &TransactionPlan,
    ) -> Result<ExecutionOutcome, ExecutionError> {
        if bundle.delegations.len() != bundle.intents.len() {
            return Err(ExecutionError::BundleMismatch {
                delegations: bundle.delegations.len(),
                intents: bundle.intents.len(),
            });
        }
        if bundle.chain_id != plan.chain_id {
            return Err(ExecutionError::ChainIdMismatch {
                bundle_chain_id: bundle.chain_id,
                plan_chain_id: plan.chain_id,
            });
        }
        let calls = normalize(plan)?;

        // The on-chain delegation manager is the authority on who may redeem;
        // a differing sender may be a legitimate alternate relayer, so this
        // never blocks locally.
        if let Some(sender) = self.client.sender_address() {
            if sender != bundle.delegatee {
                self.observer.warn(
                    "sender_delegatee_mismatch",
                    &format!("sender={sender} delegatee={}", bundle.delegatee),
                );
            }
        }

        let mut matched = Vec::with_capacity(calls.len());
        for (call_index, call) in calls.into_iter().enumerate() {
            match match_intent(&call, &bundle.intents) {
                Ok(intent_index) => matched.push(MatchedCall { call, intent_index }),
                Err(failure) => {
                    return Err(ExecutionError::Unauthorized {
                        call_index,
                        target: failure.target,
                        selector: failure.selector,
                    })
                }
            }
        }

        let (segments, interleaved) = segment(&matched);
        self.observer.info(
            "plan_segmented",
            &format!(
                "calls={} segments={} interleaved={interleaved}",
                matched.len(),
                segments.len()
            ),
        );
        let plans = plan_redemptions(&segments, interleaved, bundle);

        submit_redemptions(
            self.client.as_ref(),
            bundle,
            &plans,
            &self.gas,
            self.observer.as_ref(),
        )
        .await
    }
}
