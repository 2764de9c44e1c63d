//! Demo-mode simulator.

use chrono::Utc;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use swapdeck_core::{
    CancelStatus, CancellationResult, LimitOrderQuote, ProtocolHop, Quote, QuoteRequest,
    TokenInfo, ValidationChecks, ValidationResult,
};
use tracing::debug;

/// Fixed pricing constants for the mock exchange.
#[derive(Debug, Clone)]
pub struct DemoPricing {
    /// Mock swap rate, destination units per source unit.
    pub swap_rate: Decimal,
    /// Slippage applied to the demo minimum-received figure.
    pub slippage: Decimal,
    /// Mock limit-order price (taker units per maker unit).
    pub limit_price: Decimal,
}

impl Default for DemoPricing {
    fn default() -> Self {
        Self {
            swap_rate: Decimal::from(1800),
            // 1%
            slippage: Decimal::new(1, 2),
            limit_price: Decimal::from(3200),
        }
    }
}

/// Produces plausible substitute responses without any network I/O.
pub struct DemoSimulator {
    pricing: DemoPricing,
    rng: Mutex<StdRng>,
}

impl Default for DemoSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoSimulator {
    /// Entropy-seeded simulator with default pricing.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Simulator with an injected RNG; tests seed this for
    /// reproducible identifiers.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            pricing: DemoPricing::default(),
            rng: Mutex::new(rng),
        }
    }

    pub fn with_pricing(pricing: DemoPricing, rng: StdRng) -> Self {
        Self {
            pricing,
            rng: Mutex::new(rng),
        }
    }

    /// 0x-prefixed random hex string of `bytes` bytes.
    fn random_hex(&self, bytes: usize) -> String {
        let mut buf = vec![0u8; bytes];
        self.rng.lock().fill_bytes(&mut buf);
        format!("0x{}", hex::encode(buf))
    }

    /// Simulate a swap quote: `to_amount = amount * swap_rate`, exact.
    pub fn swap_quote(&self, req: &QuoteRequest) -> Quote {
        debug!(chain_id = req.chain_id, amount = %req.amount, "Simulating swap quote");

        let amount = Decimal::from_str(&req.amount).unwrap_or(Decimal::ZERO);
        // Saturating: Decimal's `*` panics on overflow, and amounts in
        // smallest units can exceed the 96-bit mantissa once multiplied
        // by the rate.
        let to_amount = amount
            .checked_mul(self.pricing.swap_rate)
            .unwrap_or(Decimal::MAX)
            .normalize();
        let minimum_received = to_amount
            .checked_mul(Decimal::ONE - self.pricing.slippage)
            .unwrap_or(to_amount)
            .normalize();

        Quote {
            from_token: TokenInfo {
                address: req.src_token.clone(),
                symbol: "ETH".to_string(),
                decimals: 18,
            },
            to_token: TokenInfo {
                address: req.dst_token.clone(),
                symbol: "USDC".to_string(),
                decimals: 6,
            },
            from_amount: req.amount.clone(),
            to_amount: to_amount.to_string(),
            protocols: vec![ProtocolHop {
                name: "Uniswap V3".to_string(),
                part: 100.0,
                from_token_address: req.src_token.clone(),
                to_token_address: req.dst_token.clone(),
            }],
            estimated_gas: "150000".to_string(),
            price_impact: 0.1,
            minimum_received: minimum_received.to_string(),
            route: Vec::new(),
            quote_id: self.random_hex(16),
        }
    }

    /// Simulate a limit-order quote at the fixed mock price.
    pub fn limit_order_quote(
        &self,
        maker_asset: &str,
        taker_asset: &str,
        taking_amount: &str,
    ) -> LimitOrderQuote {
        let taking = Decimal::from_str(taking_amount).unwrap_or(Decimal::ZERO);
        let making = taking
            .checked_div(self.pricing.limit_price)
            .unwrap_or(Decimal::ZERO)
            .normalize();

        LimitOrderQuote {
            maker_asset: maker_asset.to_string(),
            taker_asset: taker_asset.to_string(),
            taking_amount: taking_amount.to_string(),
            making_amount: making.to_string(),
            price: self.pricing.limit_price.normalize().to_string(),
            estimated_gas: "150000".to_string(),
            fees: "0.1".to_string(),
        }
    }

    /// Simulate a limit-order validation: every check passes; the
    /// signature is echoed from the order when present, otherwise
    /// generated.
    pub fn validate_order(&self, order: &Value) -> ValidationResult {
        let signature = order
            .get("signature")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .unwrap_or_else(|| self.random_hex(65));

        ValidationResult {
            valid: true,
            signature,
            order_hash: self.random_hex(32),
            checks: ValidationChecks::all_valid(),
            estimated_gas: "21000".to_string(),
            protocol_fee_percent: "0.1".to_string(),
        }
    }

    /// Simulate a successful cancellation.
    pub fn cancel_order(&self, order_id: &str) -> CancellationResult {
        CancellationResult {
            success: true,
            order_id: order_id.to_string(),
            status: CancelStatus::Cancelled,
            cancelled_at: Utc::now().timestamp(),
            transaction_hash: self.random_hex(32),
        }
    }
}
