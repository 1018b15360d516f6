use crate::domain::types::{
    DelegationBundle, ExecutionMode, ExecutionSegment, RedemptionPlan, SignedDelegation,
};

/// Converts segments into redemption plans. Without interleaving every
/// segment fits into one combined transaction; with interleaving each segment
/// becomes its own transaction so no delegation is presented twice within one
/// atomic redemption. Either way segment order, and therefore call order, is
/// preserved.
pub fn plan_redemptions(
    segments: &[ExecutionSegment],
    interleaved: bool,
    bundle: &DelegationBundle,
) -> Vec<RedemptionPlan> {
    if segments.is_empty() {
        return Vec::new();
    }

    if interleaved {
        return segments
            .iter()
            .map(|segment| RedemptionPlan {
                permission_contexts: vec![permission_context(bundle, segment)],
                executions: vec![segment.calls.clone()],
                modes: vec![mode_for(segment)],
            })
            .collect();
    }

    let mut plan = RedemptionPlan {
        permission_contexts: Vec::with_capacity(segments.len()),
        executions: Vec::with_capacity(segments.len()),
        modes: Vec::with_capacity(segments.len()),
    };
    for segment in segments {
        plan.permission_contexts
            .push(permission_context(bundle, segment));
        plan.executions.push(segment.calls.clone());
        plan.modes.push(mode_for(segment));
    }
    vec![plan]
}

// A segment's context is always exactly the one delegation paired with its
// intent index; never more, never fewer.
fn permission_context(
    bundle: &DelegationBundle,
    segment: &ExecutionSegment,
) -> Vec<SignedDelegation> {
    vec![bundle.delegations[segment.intent_index].clone()]
}

fn mode_for(segment: &ExecutionSegment) -> ExecutionMode {
    if segment.calls.len() == 1 {
        ExecutionMode::Single
    } else {
        ExecutionMode::Batch
    }
}
