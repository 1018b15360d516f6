use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// A transaction as handed to the chain client for simulation, estimation,
/// and submission.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: Option<Address>,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub gas_limit: Option<u64>,
    pub chain_id: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    pub block_number: Option<u64>,
    pub status: bool,
    pub gas_used: Option<u128>,
    pub effective_gas_price: Option<u128>,
}

/// Port to the chain. Wallet construction, signing, and RPC transport all
/// live behind this trait; the engine only needs these capabilities.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// The account that will sign and send transactions, when known.
    fn sender_address(&self) -> Option<Address>;

    /// Gas consumed by evaluating the call against current chain state.
    async fn simulate_gas(&self, request: &TransactionRequest) -> Result<u64, String>;

    /// The node's own `eth_estimateGas` answer for the call.
    async fn estimate_gas(&self, request: &TransactionRequest) -> Result<u64, String>;

    async fn gas_price(&self) -> Result<U256, String>;

    async fn send_transaction(&self, request: &TransactionRequest) -> Result<B256, String>;

    /// Blocks until the network reports a receipt for the transaction.
    async fn wait_for_receipt(&self, tx_hash: B256) -> Result<TransactionReceipt, String>;
}

/// Scripted in-memory chain client for tests. Records every sent request so
/// tests can assert submission order, gas limits, and calldata.
pub struct MockChainClient {
    pub sender: Option<Address>,
    pub simulate_gas_response: Result<u64, String>,
    pub estimate_gas_response: Result<u64, String>,
    pub gas_price_response: Result<U256, String>,
    /// Fail `send_transaction` for the Nth submitted plan (0-based).
    pub fail_send_at: Option<usize>,
    /// Fail `wait_for_receipt` for the Nth confirmed plan (0-based).
    pub fail_receipt_at: Option<usize>,
    /// Report `status == false` in the receipt of the Nth confirmed plan.
    pub revert_at: Option<usize>,
    pub receipt_gas_used: Option<u128>,
    pub receipt_effective_gas_price: Option<u128>,
    pub sent: Mutex<Vec<TransactionRequest>>,
    pub confirmed: Mutex<usize>,
}

impl Default for MockChainClient {
    fn default() -> Self {
        Self {
            sender: None,
            simulate_gas_response: Ok(90_000),
            estimate_gas_response: Ok(100_000),
            gas_price_response: Ok(U256::from(1_000_000_000u64)),
            fail_send_at: None,
            fail_receipt_at: None,
            revert_at: None,
            receipt_gas_used: Some(100_000),
            receipt_effective_gas_price: Some(1_000_000_000),
            sent: Mutex::new(Vec::new()),
            confirmed: Mutex::new(0),
        }
    }
}

impl MockChainClient {
    pub fn sent_requests(&self) -> Vec<TransactionRequest> {
        self.sent
            .lock()
            .expect("sent lock should not be poisoned")
            .clone()
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    fn sender_address(&self) -> Option<Address> {
        self.sender
    }

    async fn simulate_gas(&self, _request: &TransactionRequest) -> Result<u64, String> {
        self.simulate_gas_response.clone()
    }

    async fn estimate_gas(&self, _request: &TransactionRequest) -> Result<u64, String> {
        self.estimate_gas_response.clone()
    }

    async fn gas_price(&self) -> Result<U256, String> {
        self.gas_price_response.clone()
    }

    async fn send_transaction(&self, request: &TransactionRequest) -> Result<B256, String> {
        let mut sent = self.sent.lock().expect("sent lock should not be poisoned");
        let index = sent.len();
        if self.fail_send_at == Some(index) {
            return Err("mock broadcast rejected: connection reset".to_string());
        }
        sent.push(request.clone());

        let mut preimage = request.data.to_vec();
        preimage.push(index as u8);
        Ok(keccak256(&preimage))
    }

    async fn wait_for_receipt(&self, tx_hash: B256) -> Result<TransactionReceipt, String> {
        let mut confirmed = self
            .confirmed
            .lock()
            .expect("confirmed lock should not be poisoned");
        let index = *confirmed;
        *confirmed += 1;

        if self.fail_receipt_at == Some(index) {
            return Err("mock receipt timeout".to_string());
        }
        Ok(TransactionReceipt {
            transaction_hash: tx_hash,
            block_number: Some(index as u64 + 1),
            status: self.revert_at != Some(index),
            gas_used: self.receipt_gas_used,
            effective_gas_price: self.receipt_effective_gas_price,
        })
    }
}
