use crate::features::chain::{ChainClient, TransactionRequest};
use crate::observer::ExecutionObserver;
use serde::Deserialize;

pub const DEFAULT_SAFETY_MULTIPLIER_BPS: u64 = 15_000;
pub const DEFAULT_GAS_FLOOR: u64 = 200_000;

/// Gas limit policy. The multiplier is expressed in basis points so the
/// arithmetic stays integral (15_000 bps = 1.5x).
#[derive(Clone, Debug, Deserialize)]
pub struct GasConfig {
    #[serde(default = "default_safety_multiplier_bps")]
    pub safety_multiplier_bps: u64,
    #[serde(default = "default_gas_floor")]
    pub floor: u64,
}

fn default_safety_multiplier_bps() -> u64 {
    DEFAULT_SAFETY_MULTIPLIER_BPS
}

fn default_gas_floor() -> u64 {
    DEFAULT_GAS_FLOOR
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            safety_multiplier_bps: DEFAULT_SAFETY_MULTIPLIER_BPS,
            floor: DEFAULT_GAS_FLOOR,
        }
    }
}

/// Defensive gas ceiling for one redemption transaction.
///
/// Two independent sources are consulted: a simulated-call estimate and the
/// live node estimate. Either may fail on its own; a failure is reported to
/// the observer and skipped, never fatal. The larger available estimate is
/// taken as the base (estimation against simulated state can under-count the
/// cost at inclusion time, and an under-estimate burns a reverted on-chain
/// transaction), the safety multiplier is applied to it, and the configured
/// floor is the final minimum regardless of what the sources returned.
pub async fn estimate_gas_limit(
    client: &dyn ChainClient,
    request: &TransactionRequest,
    config: &GasConfig,
    observer: &dyn ExecutionObserver,
) -> u64 {
    let simulated = match client.simulate_gas(request).await {
        Ok(estimate) => Some(estimate),
        Err(error) => {
            observer.warn("simulated_estimate_failed", &format!("error={error}"));
            None
        }
    };
    let node = match client.estimate_gas(request).await {
        Ok(estimate) => Some(estimate),
        Err(error) => {
            observer.warn("node_estimate_failed", &format!("error={error}"));
            None
        }
    };

    let base = match (simulated, node) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    };

    let limit = match base {
        Some(base) => {
            let scaled =
                (base as u128).saturating_mul(config.safety_multiplier_bps as u128) / 10_000;
            u64::try_from(scaled).unwrap_or(u64::MAX).max(config.floor)
        }
        None => config.floor,
    };

    observer.info(
        "gas_limit_selected",
        &format!(
            "simulated={simulated:?} node={node:?} floor={} limit={limit}",
            config.floor
        ),
    );
    limit
}
