use crate::domain::types::{PlannedCall, TransactionPlan};
use crate::error::ExecutionError;

/// Expands the caller-supplied plan into an ordered list of atomic calls,
/// tagging each with the plan's chain id. Batch boundaries carry no meaning
/// past this point; only call order does.
pub fn normalize(plan: &TransactionPlan) -> Result<Vec<PlannedCall>, ExecutionError> {
    let calls: Vec<PlannedCall> = plan
        .batches
        .iter()
        .flat_map(|batch| batch.calls.iter())
        .map(|request| PlannedCall {
            target: request.to,
            value: request.value,
            calldata: request.data.clone(),
            chain_id: plan.chain_id,
        })
        .collect();

    if calls.is_empty() {
        return Err(ExecutionError::EmptyPlan);
    }
    Ok(calls)
}

#[cfg(test)]
mod tests {
    use super::normalize;
    use crate::domain::types::{TransactionPlan, TransactionRequestBatch};
    use crate::error::ExecutionError;
    use crate::test_support::{address, call_request};

    #[test]
    fn normalize_flattens_batches_in_order() {
        let plan = TransactionPlan {
            chain_id: 8453,
            batches: vec![
                TransactionRequestBatch {
                    calls: vec![call_request(address(1), &[0xaa]), call_request(address(2), &[0xbb])],
                },
                TransactionRequestBatch {
                    calls: vec![call_request(address(3), &[0xcc])],
                },
            ],
        };

        let calls = normalize(&plan).expect("plan should normalize");
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls.iter().map(|call| call.target).collect::<Vec<_>>(),
            vec![address(1), address(2), address(3)]
        );
        assert!(calls.iter().all(|call| call.chain_id == 8453));
    }

    #[test]
    fn normalize_rejects_empty_plan() {
        let plan = TransactionPlan {
            chain_id: 8453,
            batches: vec![TransactionRequestBatch { calls: Vec::new() }],
        };
        let error = normalize(&plan).expect_err("empty plan must be rejected");
        assert!(matches!(error, ExecutionError::EmptyPlan));
    }
}
