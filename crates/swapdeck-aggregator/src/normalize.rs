//! Lenient mapping from upstream JSON to the stable response schema.
//!
//! The normalized structs are the contract; every upstream field is
//! treated as optional with an explicit default so third-party schema
//! drift degrades fields instead of crashing handlers. Addresses and
//! amounts pass through verbatim as strings: no numeric parsing, no
//! unit conversion, no precision loss.

use serde_json::Value;
use swapdeck_core::{
    CancelStatus, CancellationResult, LimitOrderQuote, ProtocolHop, Quote, TokenInfo,
    ValidationChecks, ValidationResult,
};

fn str_field(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

fn bool_field(raw: &Value, key: &str) -> bool {
    raw.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
}

fn token(raw: &Value, address_key: &str, symbol_key: &str, decimals_key: &str) -> TokenInfo {
    TokenInfo {
        address: str_field(raw, address_key),
        symbol: str_field(raw, symbol_key),
        decimals: raw
            .get(decimals_key)
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u8,
    }
}

/// Normalize an upstream swap-quote payload.
pub fn quote(raw: &Value) -> Quote {
    let to_amount = str_field(raw, "dstAmount");

    Quote {
        from_token: token(raw, "src", "srcSymbol", "srcDecimals"),
        to_token: token(raw, "dst", "dstSymbol", "dstDecimals"),
        from_amount: str_field(raw, "srcAmount"),
        // Slippage tolerance is not applied yet; minimumReceived
        // mirrors toAmount until the tolerance parameter is wired
        // through from the client.
        minimum_received: to_amount.clone(),
        to_amount,
        protocols: raw
            .get("protocols")
            .cloned()
            .and_then(|v| serde_json::from_value::<Vec<ProtocolHop>>(v).ok())
            .unwrap_or_default(),
        estimated_gas: str_field(raw, "estimatedGas"),
        price_impact: raw
            .get("priceImpact")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0),
        route: raw
            .get("route")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default(),
        quote_id: str_field(raw, "quoteId"),
    }
}

/// Normalize an upstream limit-order-quote payload, echoing the
/// request fields wherever upstream omits them.
pub fn limit_order_quote(
    raw: &Value,
    maker_asset: &str,
    taker_asset: &str,
    taking_amount: &str,
) -> LimitOrderQuote {
    let or_echo = |key: &str, echo: &str| {
        let value = str_field(raw, key);
        if value.is_empty() {
            echo.to_string()
        } else {
            value
        }
    };

    LimitOrderQuote {
        maker_asset: or_echo("makerAsset", maker_asset),
        taker_asset: or_echo("takerAsset", taker_asset),
        taking_amount: or_echo("takingAmount", taking_amount),
        making_amount: str_field(raw, "makingAmount"),
        price: str_field(raw, "price"),
        estimated_gas: str_field(raw, "estimatedGas"),
        fees: str_field(raw, "fees"),
    }
}

/// Normalize an upstream validation payload.
pub fn validation(raw: &Value) -> ValidationResult {
    let details = raw.get("validationDetails").cloned().unwrap_or(Value::Null);

    ValidationResult {
        valid: bool_field(raw, "valid"),
        signature: str_field(raw, "signature"),
        order_hash: str_field(raw, "hash"),
        checks: ValidationChecks {
            signature: bool_field(&details, "signatureValid"),
            nonce: bool_field(&details, "nonceValid"),
            expiry: bool_field(&details, "expiredValid"),
            amount: bool_field(&details, "amountValid"),
            allowance: bool_field(&details, "allowanceValid"),
        },
        estimated_gas: str_field(raw, "estimatedGas"),
        protocol_fee_percent: str_field(raw, "protocolFee"),
    }
}

/// Normalize an upstream cancellation payload.
///
/// `order_id` comes from the request; upstream does not echo it back.
pub fn cancellation(raw: &Value, order_id: &str) -> CancellationResult {
    let success = bool_field(raw, "success");

    let status = match raw.get("status").and_then(|v| v.as_str()) {
        Some("cancelled") => CancelStatus::Cancelled,
        Some(_) => CancelStatus::Failed,
        None if success => CancelStatus::Cancelled,
        None => CancelStatus::Failed,
    };

    CancellationResult {
        success,
        order_id: order_id.to_string(),
        status,
        cancelled_at: raw.get("cancelledAt").and_then(|v| v.as_i64()).unwrap_or(0),
        transaction_hash: str_field(raw, "hash"),
    }
}
