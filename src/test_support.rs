use crate::domain::types::{
    CallRequest, CalldataPin, DelegationBundle, DelegationIntent, PlannedCall, SignedDelegation,
};
use crate::features::chain::TransactionRequest;
use alloy_primitives::{Address, Bytes, FixedBytes, B256, U256};

pub(crate) fn address(tag: u8) -> Address {
    Address::from([tag; 20])
}

pub(crate) fn selector(tag: u8) -> FixedBytes<4> {
    FixedBytes::from([tag, 0x05, 0x9c, 0xbb])
}

/// Calldata = selector followed by the given argument bytes.
pub(crate) fn calldata(selector: FixedBytes<4>, args: &[u8]) -> Bytes {
    let mut data = selector.to_vec();
    data.extend_from_slice(args);
    Bytes::from(data)
}

pub(crate) fn planned_call(target: Address, selector: FixedBytes<4>, args: &[u8]) -> PlannedCall {
    PlannedCall {
        target,
        value: U256::ZERO,
        calldata: calldata(selector, args),
        chain_id: 8453,
    }
}

pub(crate) fn call_request(to: Address, payload: &[u8]) -> CallRequest {
    CallRequest {
        to,
        value: U256::ZERO,
        data: calldata(selector(0xa9), payload),
    }
}

pub(crate) fn intent(target: Address, selector: FixedBytes<4>) -> DelegationIntent {
    intent_with_pins(target, selector, Vec::new())
}

pub(crate) fn intent_with_pins(
    target: Address,
    selector: FixedBytes<4>,
    allowed_calldata: Vec<CalldataPin>,
) -> DelegationIntent {
    DelegationIntent {
        target,
        selector,
        allowed_calldata,
    }
}

pub(crate) fn signed_delegation(index: u8) -> SignedDelegation {
    SignedDelegation {
        delegate: address(0xee),
        delegator: address(0xdd),
        authority: B256::ZERO,
        caveats: Vec::new(),
        salt: B256::from(U256::from(index)),
        signature: Bytes::from(vec![index; 65]),
    }
}

/// A bundle with `count` index-paired delegations and intents, one intent per
/// distinct target address starting at `address(1)`.
pub(crate) fn sample_bundle(count: u8) -> DelegationBundle {
    DelegationBundle {
        chain_id: 8453,
        delegation_manager: address(0xfc),
        delegator: address(0xdd),
        delegatee: address(0xee),
        delegations: (0..count).map(signed_delegation).collect(),
        intents: (0..count)
            .map(|i| intent(address(i + 1), selector(0xa9)))
            .collect(),
    }
}

pub(crate) fn sample_request(to: Address) -> TransactionRequest {
    TransactionRequest {
        from: None,
        to,
        value: U256::ZERO,
        data: Bytes::from(vec![0x01, 0x02]),
        gas_limit: None,
        chain_id: 8453,
    }
}
