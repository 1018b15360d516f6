use crate::domain::types::{
    DelegationBundle, ExecutionMode, ExecutionOutcome, PlannedCall, RedemptionPlan,
    SignedDelegation,
};
use crate::error::ExecutionError;
use crate::features::chain::{ChainClient, TransactionRequest};
use crate::features::gas::{estimate_gas_limit, GasConfig};
use crate::observer::ExecutionObserver;
use alloy_primitives::{Bytes, B256, U256};
use alloy_sol_types::{SolCall, SolValue};

mod abi {
    use alloy_sol_types::sol;

    sol! {
        struct Caveat {
            address enforcer;
            bytes terms;
            bytes args;
        }

        struct Delegation {
            address delegate;
            address delegator;
            bytes32 authority;
            Caveat[] caveats;
            uint256 salt;
            bytes signature;
        }

        struct Execution {
            address target;
            uint256 value;
            bytes callData;
        }

        function redeemDelegations(
            bytes[] permissionContexts,
            bytes32[] modes,
            bytes[] executionCallDatas
        ) external;
    }
}

/// ERC-7579 mode code word: the first byte is the call type (0x00 single,
/// 0x01 batch), the rest is zero.
pub fn mode_code(mode: ExecutionMode) -> B256 {
    let mut word = [0u8; 32];
    if matches!(mode, ExecutionMode::Batch) {
        word[0] = 0x01;
    }
    B256::from(word)
}

/// ABI-encodes the `redeemDelegations` call for one redemption plan.
pub fn encode_redemption(plan: &RedemptionPlan) -> Bytes {
    let permission_contexts: Vec<Bytes> = plan
        .permission_contexts
        .iter()
        .map(|context| encode_permission_context(context))
        .collect();
    let modes: Vec<B256> = plan.modes.iter().map(|mode| mode_code(*mode)).collect();
    let execution_call_datas: Vec<Bytes> = plan
        .executions
        .iter()
        .zip(&plan.modes)
        .map(|(calls, mode)| encode_execution_group(calls, *mode))
        .collect();

    abi::redeemDelegationsCall {
        permissionContexts: permission_contexts,
        modes,
        executionCallDatas: execution_call_datas,
    }
    .abi_encode()
    .into()
}

fn encode_permission_context(context: &[SignedDelegation]) -> Bytes {
    let delegations: Vec<abi::Delegation> = context.iter().map(abi_delegation).collect();
    delegations.abi_encode().into()
}

fn abi_delegation(delegation: &SignedDelegation) -> abi::Delegation {
    abi::Delegation {
        delegate: delegation.delegate,
        delegator: delegation.delegator,
        authority: delegation.authority,
        caveats: delegation
            .caveats
            .iter()
            .map(|caveat| abi::Caveat {
                enforcer: caveat.enforcer,
                terms: caveat.terms.clone(),
                args: caveat.args.clone(),
            })
            .collect(),
        salt: U256::from_be_bytes(delegation.salt.0),
        signature: delegation.signature.clone(),
    }
}

fn encode_execution_group(calls: &[PlannedCall], mode: ExecutionMode) -> Bytes {
    match mode {
        // Single-call executions are packed: target (20) ++ value (32) ++ calldata.
        ExecutionMode::Single => {
            let call = &calls[0];
            let mut out = Vec::with_capacity(20 + 32 + call.calldata.len());
            out.extend_from_slice(call.target.as_slice());
            out.extend_from_slice(&call.value.to_be_bytes::<32>());
            out.extend_from_slice(&call.calldata);
            Bytes::from(out)
        }
        ExecutionMode::Batch => {
            let executions: Vec<abi::Execution> = calls
                .iter()
                .map(|call| abi::Execution {
                    target: call.target,
                    value: call.value,
                    callData: call.calldata.clone(),
                })
                .collect();
            executions.abi_encode().into()
        }
    }
}

/// Submits the redemption plans strictly in order, waiting for each
/// transaction's receipt before moving on. Later plans may depend on the
/// on-chain effects of earlier ones, and sender nonces are sequential anyway.
/// A broadcast failure, a confirmation failure, or a reverted receipt stops
/// the run with the partial record preserved.
pub async fn submit_redemptions(
    client: &dyn ChainClient,
    bundle: &DelegationBundle,
    plans: &[RedemptionPlan],
    gas: &GasConfig,
    observer: &dyn ExecutionObserver,
) -> Result<ExecutionOutcome, ExecutionError> {
    let mut outcome = ExecutionOutcome::default();

    for (plan_index, plan) in plans.iter().enumerate() {
        // The redemption transaction itself carries no value; call values are
        // funded by the delegator's account.
        let mut request = TransactionRequest {
            from: client.sender_address(),
            to: bundle.delegation_manager,
            value: U256::ZERO,
            data: encode_redemption(plan),
            gas_limit: None,
            chain_id: bundle.chain_id,
        };
        request.gas_limit = Some(estimate_gas_limit(client, &request, gas, observer).await);

        let tx_hash = match client.send_transaction(&request).await {
            Ok(tx_hash) => tx_hash,
            Err(reason) => {
                return Err(ExecutionError::Submission {
                    plan_index,
                    reason: format!("broadcast failed: {reason}"),
                    partial: outcome,
                })
            }
        };
        observer.info(
            "redemption_submitted",
            &format!("plan={plan_index} tx={tx_hash}"),
        );
        outcome.tx_hashes.push(tx_hash);

        let receipt = match client.wait_for_receipt(tx_hash).await {
            Ok(receipt) => receipt,
            Err(reason) => {
                return Err(ExecutionError::Submission {
                    plan_index,
                    reason: format!("confirmation failed: {reason}"),
                    partial: outcome,
                })
            }
        };
        if !receipt.status {
            return Err(ExecutionError::Submission {
                plan_index,
                reason: format!("transaction reverted: tx={tx_hash}"),
                partial: outcome,
            });
        }

        observer.info(
            "redemption_confirmed",
            &format!(
                "plan={plan_index} tx={tx_hash} gas_used={:?}",
                receipt.gas_used
            ),
        );
        accumulate_gas_cost(client, &mut outcome, &receipt, plan_index, observer).await;
        outcome.receipts.push(receipt);
    }

    Ok(outcome)
}

async fn accumulate_gas_cost(
    client: &dyn ChainClient,
    outcome: &mut ExecutionOutcome,
    receipt: &crate::features::chain::TransactionReceipt,
    plan_index: usize,
    observer: &dyn ExecutionObserver,
) {
    let Some(gas_used) = receipt.gas_used else {
        return;
    };
    let price = match receipt.effective_gas_price {
        Some(price) => Some(U256::from(price)),
        // Best effort when the receipt omits the price; cost bookkeeping is
        // informational and must not fail the run.
        None => match client.gas_price().await {
            Ok(price) => Some(price),
            Err(error) => {
                observer.warn(
                    "gas_price_unavailable",
                    &format!("plan={plan_index} error={error}"),
                );
                None
            }
        },
    };
    if let Some(price) = price {
        let spent = U256::from(gas_used).saturating_mul(price);
        outcome.gas_spent_wei = Some(
            outcome
                .gas_spent_wei
                .unwrap_or(U256::ZERO)
                .saturating_add(spent),
        );
    }
}
