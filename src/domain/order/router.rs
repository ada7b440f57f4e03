//! Pure routing decisions for order submission and lookup.
//!
//! Everything here is side-effect free: classification, endpoint selection,
//! pre-transmission guardrails, and the named fallback transitions the
//! `Orders` sub-client executes. Keeping the decisions pure keeps the
//! attempt → classify → {succeed, fail-fatal, retry-via-algo} machine
//! testable without a network.

use crate::error::{ApiError, SdkError};
use crate::shared::Params;

/// Order types handled by the algo-order service.
pub const CONDITIONAL_TYPES: [&str; 5] = [
    "STOP_MARKET",
    "TAKE_PROFIT_MARKET",
    "STOP",
    "TAKE_PROFIT",
    "TRAILING_STOP_MARKET",
];

/// Protocol discriminator required on every algo-order submission. The
/// backend accepts exactly one value; it is not caller-configurable.
pub const ALGO_TYPE_FIELD: &str = "algoType";
pub const ALGO_TYPE_VALUE: &str = "CONDITIONAL";

/// Whether an order type is immediately working or trigger-activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderTypeClass {
    Regular,
    Conditional,
}

impl OrderTypeClass {
    /// Classify a wire `type` string. Pure and total: the value is trimmed
    /// and upper-cased for the membership test only; every string classifies
    /// to exactly one class.
    pub fn classify(order_type: &str) -> Self {
        let canonical = order_type.trim().to_uppercase();
        if CONDITIONAL_TYPES.contains(&canonical.as_str()) {
            Self::Conditional
        } else {
            Self::Regular
        }
    }
}

/// The endpoint family a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    RegularOrder,
    AlgoOrder,
}

/// Select the submission target from the type class and routing flags.
///
/// `force_regular` exists solely so a fallback retry can pin the regular
/// path and never recurse back into routing.
pub fn route_for(class: OrderTypeClass, auto_route: bool, force_regular: bool) -> RouteTarget {
    if force_regular || !auto_route {
        return RouteTarget::RegularOrder;
    }
    match class {
        OrderTypeClass::Conditional => RouteTarget::AlgoOrder,
        OrderTypeClass::Regular => RouteTarget::RegularOrder,
    }
}

/// Decision after a regular-endpoint attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackDecision {
    /// Retry exactly once via the algo endpoint.
    RetryViaAlgo,
    /// Surface the error unchanged.
    Propagate,
}

/// Transition for order submission: only the specific migration rejection
/// triggers the one-shot algo retry, and only when auto-routing is on.
pub fn on_regular_submit_error(err: &SdkError, auto_route: bool) -> FallbackDecision {
    match err {
        SdkError::Api(ApiError::ConditionalOrderMigrated(_)) if auto_route => {
            FallbackDecision::RetryViaAlgo
        }
        _ => FallbackDecision::Propagate,
    }
}

/// Transition for cancel/query: a not-found-class error falls back to the
/// algo endpoint only when the caller enabled fallback and supplied an
/// `algoId` hint.
pub fn on_regular_lookup_error(
    err: &SdkError,
    fallback_enabled: bool,
    has_algo_id: bool,
) -> FallbackDecision {
    match err {
        SdkError::Api(api) if fallback_enabled && has_algo_id && api.is_not_found() => {
            FallbackDecision::RetryViaAlgo
        }
        _ => FallbackDecision::Propagate,
    }
}

/// Guardrails applied to conditional submissions before transmission.
///
/// A full-position close (`closePosition=true`) must not carry `quantity` or
/// `reduceOnly` — the backend rejects the combination. `positionSide` is left
/// exactly as the caller supplied it; the client never infers hedge-mode
/// sides.
pub fn apply_conditional_guardrails(params: &mut Params) {
    let closes_position = params
        .get("closePosition")
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));
    if closes_position {
        params.remove("quantity");
        params.remove("reduceOnly");
    }
}

/// Force the wire-protocol discriminator on an algo submission, overriding
/// any caller-supplied value.
pub fn force_algo_discriminator(params: &mut Params) {
    params.set(ALGO_TYPE_FIELD, ALGO_TYPE_VALUE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::classify_response;

    #[test]
    fn test_every_conditional_type_classifies_conditional() {
        for t in CONDITIONAL_TYPES {
            assert_eq!(OrderTypeClass::classify(t), OrderTypeClass::Conditional);
        }
        // Case- and whitespace-insensitive.
        assert_eq!(
            OrderTypeClass::classify(" stop_market "),
            OrderTypeClass::Conditional
        );
    }

    #[test]
    fn test_regular_types_classify_regular() {
        for t in ["MARKET", "LIMIT", "market", "LIMIT_MAKER", ""] {
            assert_eq!(OrderTypeClass::classify(t), OrderTypeClass::Regular, "{t}");
        }
    }

    #[test]
    fn test_route_selection() {
        use OrderTypeClass::*;
        assert_eq!(route_for(Conditional, true, false), RouteTarget::AlgoOrder);
        assert_eq!(route_for(Conditional, false, false), RouteTarget::RegularOrder);
        assert_eq!(route_for(Conditional, true, true), RouteTarget::RegularOrder);
        assert_eq!(route_for(Regular, true, false), RouteTarget::RegularOrder);
    }

    #[test]
    fn test_submit_fallback_only_on_migration_code() {
        let migrated = SdkError::Api(classify_response(
            400,
            r#"{"code":-4120,"msg":"Order type not supported"}"#,
        ));
        assert_eq!(
            on_regular_submit_error(&migrated, true),
            FallbackDecision::RetryViaAlgo
        );
        assert_eq!(
            on_regular_submit_error(&migrated, false),
            FallbackDecision::Propagate
        );

        let other = SdkError::Api(classify_response(400, r#"{"code":-1102,"msg":"bad"}"#));
        assert_eq!(
            on_regular_submit_error(&other, true),
            FallbackDecision::Propagate
        );
    }

    #[test]
    fn test_lookup_fallback_needs_hint_and_flag() {
        let not_found =
            SdkError::Api(classify_response(400, r#"{"code":-2013,"msg":"unknown"}"#));
        assert_eq!(
            on_regular_lookup_error(&not_found, true, true),
            FallbackDecision::RetryViaAlgo
        );
        assert_eq!(
            on_regular_lookup_error(&not_found, false, true),
            FallbackDecision::Propagate
        );
        assert_eq!(
            on_regular_lookup_error(&not_found, true, false),
            FallbackDecision::Propagate
        );
    }

    #[test]
    fn test_close_position_guardrail_strips_quantity() {
        let mut p = Params::new();
        p.insert("symbol", "BTCUSDT")
            .insert("closePosition", "true")
            .insert("quantity", "0.5")
            .insert("reduceOnly", "true");
        apply_conditional_guardrails(&mut p);
        assert!(!p.contains_key("quantity"));
        assert!(!p.contains_key("reduceOnly"));
        assert_eq!(p.get("closePosition"), Some("true"));
    }

    #[test]
    fn test_guardrail_leaves_partial_closes_alone() {
        let mut p = Params::new();
        p.insert("closePosition", "false").insert("quantity", "0.5");
        apply_conditional_guardrails(&mut p);
        assert_eq!(p.get("quantity"), Some("0.5"));
    }

    #[test]
    fn test_position_side_untouched() {
        let mut p = Params::new();
        p.insert("closePosition", "true").insert("positionSide", "LONG");
        apply_conditional_guardrails(&mut p);
        assert_eq!(p.get("positionSide"), Some("LONG"));

        let mut without = Params::new();
        without.insert("closePosition", "true");
        apply_conditional_guardrails(&mut without);
        assert!(!without.contains_key("positionSide"));
    }

    #[test]
    fn test_discriminator_is_forced() {
        let mut p = Params::new();
        p.insert("algoType", "TWAP");
        force_algo_discriminator(&mut p);
        assert_eq!(p.get("algoType"), Some("CONDITIONAL"));
        assert_eq!(p.len(), 1);
    }
}
