//! Response and request types for the quote/order proxy.
//!
//! Everything here is request-scoped: constructed fresh per request,
//! immutable once returned, never persisted. Amounts are carried as
//! decimal strings in the token's smallest unit and are never parsed
//! into floats by the proxy.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Token metadata attached to a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Contract address.
    pub address: String,
    /// Ticker symbol (e.g., "ETH").
    pub symbol: String,
    /// Decimal scaling of the smallest unit.
    pub decimals: u8,
}

/// Validated inbound parameters for a swap quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    /// Target network (positive).
    pub chain_id: u64,
    /// Source token contract address.
    pub src_token: String,
    /// Destination token contract address.
    pub dst_token: String,
    /// Amount to swap, decimal string in the source token's smallest unit.
    pub amount: String,
    /// Taker wallet address.
    pub taker: String,
}

impl QuoteRequest {
    /// Build a request, enforcing that every field is present and
    /// non-empty before any network or simulation work happens.
    pub fn new(
        chain_id: u64,
        src_token: impl Into<String>,
        dst_token: impl Into<String>,
        amount: impl Into<String>,
        taker: impl Into<String>,
    ) -> Result<Self> {
        if chain_id == 0 {
            return Err(CoreError::InvalidChainId(chain_id));
        }

        let req = Self {
            chain_id,
            src_token: src_token.into(),
            dst_token: dst_token.into(),
            amount: amount.into(),
            taker: taker.into(),
        };

        if req.src_token.is_empty() {
            return Err(CoreError::MissingParam("src"));
        }
        if req.dst_token.is_empty() {
            return Err(CoreError::MissingParam("dst"));
        }
        if req.amount.is_empty() {
            return Err(CoreError::MissingParam("amount"));
        }
        if req.taker.is_empty() {
            return Err(CoreError::MissingParam("from"));
        }

        Ok(req)
    }
}

/// One hop of the liquidity route (e.g., a 100% fill on Uniswap V3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolHop {
    /// Protocol name.
    pub name: String,
    /// Share of the swap routed through this protocol, in percent.
    pub part: f64,
    pub from_token_address: String,
    pub to_token_address: String,
}

/// A priced swap estimate. No execution, no signing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub from_token: TokenInfo,
    pub to_token: TokenInfo,
    /// Amount in, smallest unit, verbatim from the request.
    pub from_amount: String,
    /// Amount out, smallest unit.
    pub to_amount: String,
    /// Protocols participating in the fill.
    pub protocols: Vec<ProtocolHop>,
    /// Gas estimate as a decimal string ("" when upstream omits it).
    pub estimated_gas: String,
    /// Price impact in percent (0.0 when upstream omits it).
    pub price_impact: f64,
    /// Worst-case amount out after slippage.
    pub minimum_received: String,
    /// Opaque upstream route descriptors, passed through untouched.
    pub route: Vec<serde_json::Value>,
    /// Opaque upstream quote identifier.
    pub quote_id: String,
}

/// Pricing for a limit order: how much the maker gives for the
/// requested taking amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitOrderQuote {
    pub maker_asset: String,
    pub taker_asset: String,
    pub taking_amount: String,
    pub making_amount: String,
    pub price: String,
    pub estimated_gas: String,
    pub fees: String,
}

/// Per-check breakdown of a limit-order validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationChecks {
    pub signature: bool,
    pub nonce: bool,
    pub expiry: bool,
    pub amount: bool,
    pub allowance: bool,
}

impl ValidationChecks {
    /// All checks passing.
    pub fn all_valid() -> Self {
        Self {
            signature: true,
            nonce: true,
            expiry: true,
            amount: true,
            allowance: true,
        }
    }

    /// All checks failing (the lenient default for absent upstream data).
    pub fn none() -> Self {
        Self {
            signature: false,
            nonce: false,
            expiry: false,
            amount: false,
            allowance: false,
        }
    }
}

/// Outcome of validating a signed limit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    /// Order signature, hex.
    pub signature: String,
    /// Order hash, hex.
    pub order_hash: String,
    pub checks: ValidationChecks,
    pub estimated_gas: String,
    pub protocol_fee_percent: String,
}

/// Terminal state of a cancellation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelStatus {
    Cancelled,
    Failed,
}

/// Outcome of cancelling a limit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationResult {
    pub success: bool,
    pub order_id: String,
    pub status: CancelStatus,
    /// Unix seconds of the cancellation.
    pub cancelled_at: i64,
    /// Cancellation transaction hash, 0x-prefixed.
    #[serde(rename = "hash")]
    pub transaction_hash: String,
}
