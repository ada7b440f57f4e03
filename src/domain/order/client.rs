//! Orders sub-client — submit, batch, cancel, query, listings.
//!
//! Single source of truth for which endpoint handles an order and what
//! happens when the chosen endpoint refuses it. The pure decisions live in
//! [`router`](super::router); this module executes them against the wire.

use reqwest::Method;
use serde_json::Value;

use crate::client::FuturesClient;
use crate::domain::order::router::{self, FallbackDecision, OrderTypeClass, RouteTarget};
use crate::domain::order::{BatchSubmitResult, NewOrderRequest, OrderAck, OrderRef};
use crate::error::SdkError;
use crate::http::{AuthMode, RetryPolicy};
use crate::shared::Params;

const ORDER_PATH: &str = "/fapi/v1/order";
const ORDER_TEST_PATH: &str = "/fapi/v1/order/test";
const BATCH_ORDERS_PATH: &str = "/fapi/v1/batchOrders";
const ALGO_ORDER_PATH: &str = "/fapi/v1/algoOrder";
const OPEN_ALGO_ORDERS_PATH: &str = "/fapi/v1/openAlgoOrders";
const ALL_OPEN_ORDERS_PATH: &str = "/fapi/v1/allOpenOrders";
const OPEN_ORDERS_PATH: &str = "/fapi/v1/openOrders";
const ALL_ORDERS_PATH: &str = "/fapi/v1/allOrders";
const USER_TRADES_PATH: &str = "/fapi/v1/userTrades";

/// Sub-client for order lifecycle operations.
pub struct Orders<'a> {
    pub(crate) client: &'a FuturesClient,
}

impl<'a> Orders<'a> {
    // ── Submission ───────────────────────────────────────────────────────

    /// Submit an order, routing by type class.
    ///
    /// Conditional types go straight to the algo endpoint when auto-routing
    /// is enabled. Regular types hit `/fapi/v1/order`; if that endpoint
    /// answers with the migration rejection, the submission is retried
    /// exactly once via the algo path and never again.
    pub async fn submit(&self, order: &NewOrderRequest) -> Result<OrderAck, SdkError> {
        order.validate()?;
        let auto_route = self.client.auto_route_conditional;
        let params = order.to_params();

        match router::route_for(order.type_class(), auto_route, false) {
            RouteTarget::AlgoOrder => self.submit_conditional(params).await,
            RouteTarget::RegularOrder => {
                match self.send_signed(Method::POST, ORDER_PATH, params.clone()).await {
                    Ok(payload) => Ok(OrderAck::regular(payload)),
                    Err(e) => match router::on_regular_submit_error(&e, auto_route) {
                        FallbackDecision::RetryViaAlgo => {
                            tracing::debug!(
                                symbol = %order.symbol,
                                order_type = %order.order_type,
                                "Regular endpoint rejected conditional type; retrying via algo endpoint"
                            );
                            self.submit_conditional(params).await
                        }
                        FallbackDecision::Propagate => Err(e),
                    },
                }
            }
        }
    }

    /// Validate an order against the test endpoint without placing it.
    ///
    /// Conditional types are rejected locally: the algo-order service has no
    /// test endpoint, so a test submission could never mean anything.
    pub async fn submit_test(&self, order: &NewOrderRequest) -> Result<Value, SdkError> {
        order.validate()?;
        if order.type_class() == OrderTypeClass::Conditional {
            return Err(SdkError::Validation(format!(
                "order type {} cannot be test-submitted: the algo-order service has no test endpoint",
                order.order_type
            )));
        }
        self.send_signed(Method::POST, ORDER_TEST_PATH, order.to_params())
            .await
    }

    /// Submit a batch of orders, splitting by type class.
    ///
    /// Regular specifications go out as one batch call; conditional ones are
    /// submitted individually through the algo path (the batch endpoint does
    /// not accept them), results ordered to match the input. When the batch
    /// contains conditional types and auto-splitting is disabled, the whole
    /// call fails before any network activity — partial silent submission is
    /// never acceptable.
    pub async fn submit_batch(
        &self,
        orders: &[NewOrderRequest],
    ) -> Result<BatchSubmitResult, SdkError> {
        for order in orders {
            order.validate()?;
        }

        let (regular, conditional): (Vec<_>, Vec<_>) = orders
            .iter()
            .partition(|o| o.type_class() == OrderTypeClass::Regular);

        if !conditional.is_empty() && !self.client.auto_split_batches {
            return Err(SdkError::Validation(format!(
                "batch contains {} conditional order(s) but auto-splitting is disabled; \
                 enable it or submit conditional orders individually",
                conditional.len()
            )));
        }

        let regular_result = if regular.is_empty() {
            None
        } else {
            let specs: Vec<Value> = regular.iter().map(|o| params_to_json(&o.to_params())).collect();
            let mut params = Params::new();
            params.insert("batchOrders", serde_json::to_string(&specs)?);
            Some(self.send_signed(Method::POST, BATCH_ORDERS_PATH, params).await?)
        };

        let mut conditional_results = Vec::with_capacity(conditional.len());
        for order in conditional {
            conditional_results.push(self.submit_conditional(order.to_params()).await?);
        }

        Ok(BatchSubmitResult {
            regular: regular_result,
            conditional: conditional_results,
        })
    }

    /// The conditional path: guardrails, forced discriminator, algo endpoint.
    /// Never falls back anywhere else, which is what makes the migration
    /// retry one-shot.
    async fn submit_conditional(&self, mut params: Params) -> Result<OrderAck, SdkError> {
        router::apply_conditional_guardrails(&mut params);
        router::force_algo_discriminator(&mut params);
        let payload = self.send_signed(Method::POST, ALGO_ORDER_PATH, params).await?;
        Ok(OrderAck::algo(payload))
    }

    // ── Cancel / query ───────────────────────────────────────────────────

    /// Cancel an order by reference.
    pub async fn cancel(&self, order: &OrderRef) -> Result<OrderAck, SdkError> {
        self.lookup(Method::DELETE, order).await
    }

    /// Query an order by reference.
    pub async fn query(&self, order: &OrderRef) -> Result<OrderAck, SdkError> {
        self.lookup(Method::GET, order).await
    }

    async fn lookup(&self, method: Method, order: &OrderRef) -> Result<OrderAck, SdkError> {
        order.validate()?;

        // Algo identifier only: go straight to the algo endpoint.
        if !order.has_regular_id() {
            let params = order.to_algo_params()?;
            let payload = self.send_signed(method, ALGO_ORDER_PATH, params).await?;
            return Ok(OrderAck::algo(payload));
        }

        match self
            .send_signed(method.clone(), ORDER_PATH, order.to_regular_params())
            .await
        {
            Ok(payload) => Ok(OrderAck::regular(payload)),
            Err(e) => match router::on_regular_lookup_error(
                &e,
                order.fallback_to_algo,
                order.algo_id.is_some(),
            ) {
                FallbackDecision::RetryViaAlgo => {
                    tracing::debug!(
                        symbol = %order.symbol,
                        algo_id = ?order.algo_id,
                        "Order unknown to regular endpoint; retrying via algo endpoint"
                    );
                    let params = order.to_algo_params()?;
                    let payload = self.send_signed(method, ALGO_ORDER_PATH, params).await?;
                    Ok(OrderAck::algo(payload))
                }
                FallbackDecision::Propagate => Err(e),
            },
        }
    }

    // ── Listings ─────────────────────────────────────────────────────────

    /// Cancel every open order on a symbol (regular endpoint family).
    pub async fn cancel_all_open_orders(&self, symbol: &str) -> Result<Value, SdkError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        self.send_signed(Method::DELETE, ALL_OPEN_ORDERS_PATH, params).await
    }

    /// Current open regular orders, optionally filtered by symbol.
    pub async fn open_orders(&self, symbol: Option<&str>) -> Result<Value, SdkError> {
        let mut params = Params::new();
        params.insert_opt("symbol", symbol);
        self.send_signed(Method::GET, OPEN_ORDERS_PATH, params).await
    }

    /// Current open algo orders, optionally filtered by symbol.
    pub async fn open_algo_orders(&self, symbol: Option<&str>) -> Result<Value, SdkError> {
        let mut params = Params::new();
        params.insert_opt("symbol", symbol);
        self.send_signed(Method::GET, OPEN_ALGO_ORDERS_PATH, params).await
    }

    /// All orders on a symbol (historic and open).
    pub async fn all_orders(&self, symbol: &str) -> Result<Value, SdkError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        self.send_signed(Method::GET, ALL_ORDERS_PATH, params).await
    }

    /// The account's trade fills on a symbol.
    pub async fn user_trades(&self, symbol: &str) -> Result<Value, SdkError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        self.send_signed(Method::GET, USER_TRADES_PATH, params).await
    }

    async fn send_signed(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> Result<Value, SdkError> {
        self.client
            .http
            .send(method, path, params, AuthMode::Signed, RetryPolicy::Standard)
            .await
    }
}

fn params_to_json(params: &Params) -> Value {
    let mut map = serde_json::Map::new();
    for (k, v) in params.iter() {
        map.insert(k.to_string(), Value::String(v.to_string()));
    }
    Value::Object(map)
}
