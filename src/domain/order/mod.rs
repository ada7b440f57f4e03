//! Order domain — typed requests, classification, routing, acknowledgments.

pub mod client;
pub mod router;

pub use client::Orders;
pub use router::{FallbackDecision, OrderTypeClass, RouteTarget};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SdkError;
use crate::shared::Params;

// ─── Side ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── NewOrderRequest ─────────────────────────────────────────────────────────

/// A typed order-creation request.
///
/// `order_type` is the wire `type` string (`MARKET`, `LIMIT`, `STOP_MARKET`,
/// …) and is sent exactly as given; classification upper-cases a copy. Fields
/// the API doesn't know for a given type are simply left `None` and never hit
/// the wire. `extra_params` is the declared escape hatch for parameters this
/// struct doesn't model.
#[derive(Debug, Clone, Default)]
pub struct NewOrderRequest {
    pub symbol: String,
    pub side: Option<Side>,
    pub order_type: String,
    pub quantity: Option<Decimal>,
    pub price: Option<Decimal>,
    pub time_in_force: Option<String>,
    pub stop_price: Option<Decimal>,
    pub callback_rate: Option<Decimal>,
    pub activation_price: Option<Decimal>,
    pub close_position: Option<bool>,
    pub reduce_only: Option<bool>,
    pub position_side: Option<String>,
    pub working_type: Option<String>,
    pub price_protect: Option<bool>,
    pub new_client_order_id: Option<String>,
    pub extra_params: Params,
}

impl NewOrderRequest {
    pub fn new(symbol: impl Into<String>, side: Side, order_type: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            side: Some(side),
            order_type: order_type.into(),
            ..Self::default()
        }
    }

    pub fn quantity(mut self, qty: Decimal) -> Self {
        self.quantity = Some(qty);
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn stop_price(mut self, stop: Decimal) -> Self {
        self.stop_price = Some(stop);
        self
    }

    pub fn close_position(mut self, close: bool) -> Self {
        self.close_position = Some(close);
        self
    }

    pub fn reduce_only(mut self, reduce: bool) -> Self {
        self.reduce_only = Some(reduce);
        self
    }

    pub fn client_order_id(mut self, id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(id.into());
        self
    }

    /// Classification of the `type` field; pure and total.
    pub fn type_class(&self) -> OrderTypeClass {
        OrderTypeClass::classify(&self.order_type)
    }

    /// Check local constraints, reporting every violated field together.
    pub fn validate(&self) -> Result<(), SdkError> {
        let mut missing = Vec::new();
        if self.symbol.trim().is_empty() {
            missing.push("symbol");
        }
        if self.side.is_none() {
            missing.push("side");
        }
        if self.order_type.trim().is_empty() {
            missing.push("type");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SdkError::Validation(format!(
                "missing required parameter(s): {}",
                missing.join(", ")
            )))
        }
    }

    /// Flatten into the ordered wire parameter set. Absent optional fields are
    /// omitted entirely, never sent as null.
    pub fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.insert("symbol", &self.symbol);
        p.insert_opt("side", self.side.as_ref().map(Side::as_str));
        p.insert("type", &self.order_type);
        p.insert_opt("quantity", self.quantity);
        p.insert_opt("price", self.price);
        p.insert_opt("timeInForce", self.time_in_force.as_deref());
        p.insert_opt("stopPrice", self.stop_price);
        p.insert_opt("callbackRate", self.callback_rate);
        p.insert_opt("activationPrice", self.activation_price);
        p.insert_opt("closePosition", self.close_position);
        p.insert_opt("reduceOnly", self.reduce_only);
        p.insert_opt("positionSide", self.position_side.as_deref());
        p.insert_opt("workingType", self.working_type.as_deref());
        p.insert_opt("priceProtect", self.price_protect);
        p.insert_opt("newClientOrderId", self.new_client_order_id.as_deref());
        p.extend(&self.extra_params);
        p
    }
}

// ─── OrderRef ────────────────────────────────────────────────────────────────

/// Identifies an existing order for cancel/query calls.
///
/// Regular orders are keyed by `orderId` or `origClientOrderId`; algo orders
/// by `algoId`. When both a regular identifier and an `algoId` hint are
/// supplied, the regular endpoint is tried first and `fallback_to_algo`
/// (off by default) opts into a one-shot retry against the algo endpoint when
/// the regular one reports the order unknown.
#[derive(Debug, Clone, Default)]
pub struct OrderRef {
    pub symbol: String,
    pub order_id: Option<i64>,
    pub orig_client_order_id: Option<String>,
    pub algo_id: Option<i64>,
    pub fallback_to_algo: bool,
}

impl OrderRef {
    pub fn by_order_id(symbol: impl Into<String>, order_id: i64) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: Some(order_id),
            ..Self::default()
        }
    }

    pub fn by_client_order_id(symbol: impl Into<String>, client_order_id: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            orig_client_order_id: Some(client_order_id.into()),
            ..Self::default()
        }
    }

    pub fn by_algo_id(symbol: impl Into<String>, algo_id: i64) -> Self {
        Self {
            symbol: symbol.into(),
            algo_id: Some(algo_id),
            ..Self::default()
        }
    }

    /// Attach an algo-order identifier as a fallback hint and enable the
    /// not-found fallback for this call.
    pub fn with_algo_fallback(mut self, algo_id: i64) -> Self {
        self.algo_id = Some(algo_id);
        self.fallback_to_algo = true;
        self
    }

    pub(crate) fn has_regular_id(&self) -> bool {
        self.order_id.is_some() || self.orig_client_order_id.is_some()
    }

    pub(crate) fn validate(&self) -> Result<(), SdkError> {
        let mut missing = Vec::new();
        if self.symbol.trim().is_empty() {
            missing.push("symbol");
        }
        if !self.has_regular_id() && self.algo_id.is_none() {
            missing.push("orderId, origClientOrderId or algoId");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SdkError::Validation(format!(
                "missing required parameter(s): {}",
                missing.join(", ")
            )))
        }
    }

    pub(crate) fn to_regular_params(&self) -> Params {
        let mut p = Params::new();
        p.insert("symbol", &self.symbol);
        p.insert_opt("orderId", self.order_id);
        p.insert_opt("origClientOrderId", self.orig_client_order_id.as_deref());
        p
    }

    pub(crate) fn to_algo_params(&self) -> Result<Params, SdkError> {
        let algo_id = self.algo_id.ok_or_else(|| {
            SdkError::Validation("algoId is required for algo-order lookups".into())
        })?;
        let mut p = Params::new();
        p.insert("symbol", &self.symbol);
        p.insert("algoId", algo_id);
        Ok(p)
    }
}

// ─── Acknowledgments ─────────────────────────────────────────────────────────

/// A decoded order acknowledgment, tagged with the endpoint family that
/// produced it so callers never have to guess from field presence.
#[derive(Debug, Clone)]
pub struct OrderAck {
    /// `true` when the algo-order service handled the request
    /// (`algoId`-keyed); `false` for the regular endpoint (`orderId`-keyed).
    pub via_algo_api: bool,
    /// The backend response, passed through untouched.
    pub payload: Value,
}

impl OrderAck {
    pub(crate) fn regular(payload: Value) -> Self {
        Self {
            via_algo_api: false,
            payload,
        }
    }

    pub(crate) fn algo(payload: Value) -> Self {
        Self {
            via_algo_api: true,
            payload,
        }
    }

    pub fn order_id(&self) -> Option<i64> {
        self.payload.get("orderId").and_then(Value::as_i64)
    }

    pub fn algo_id(&self) -> Option<i64> {
        self.payload.get("algoId").and_then(Value::as_i64)
    }
}

/// Result of a mixed batch submission.
#[derive(Debug, Clone)]
pub struct BatchSubmitResult {
    /// Response of the single regular batch call, when the batch contained
    /// regular orders.
    pub regular: Option<Value>,
    /// Individual conditional acknowledgments, ordered to match the input
    /// sequence of conditional specifications.
    pub conditional: Vec<OrderAck>,
}
