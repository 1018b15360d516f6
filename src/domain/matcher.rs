use crate::domain::types::{DelegationIntent, PlannedCall};
use alloy_primitives::{Address, FixedBytes};

pub const SELECTOR_LEN: usize = 4;

/// Why a planned call matched no intent. The caller adds the call index when
/// turning this into an authorization error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchFailure {
    pub target: Address,
    pub selector: Option<FixedBytes<4>>,
}

/// Finds the delegation intent a planned call satisfies, evaluated in bundle
/// order with the first match winning. A call that matches nothing is a hard
/// authorization failure; the matcher never falls back to a closest intent.
pub fn match_intent(
    call: &PlannedCall,
    intents: &[DelegationIntent],
) -> Result<usize, MatchFailure> {
    for (intent_index, intent) in intents.iter().enumerate() {
        if satisfies(call, intent) {
            return Ok(intent_index);
        }
    }
    Err(MatchFailure {
        target: call.target,
        selector: call_selector(call),
    })
}

fn satisfies(call: &PlannedCall, intent: &DelegationIntent) -> bool {
    if call.target != intent.target {
        return false;
    }
    match call_selector(call) {
        Some(selector) if selector == intent.selector => {}
        _ => return false,
    }
    intent.allowed_calldata.iter().all(|pin| {
        let end = match pin.offset.checked_add(pin.expected.len()) {
            Some(end) => end,
            None => return false,
        };
        call.calldata
            .get(pin.offset..end)
            .is_some_and(|window| window == pin.expected.as_ref())
    })
}

fn call_selector(call: &PlannedCall) -> Option<FixedBytes<4>> {
    call.calldata
        .get(..SELECTOR_LEN)
        .map(FixedBytes::from_slice)
}
