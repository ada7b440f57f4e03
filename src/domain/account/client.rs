//! Account sub-client — signed account, position, and margin endpoints.

use reqwest::Method;
use serde_json::Value;

use crate::client::FuturesClient;
use crate::error::SdkError;
use crate::http::{AuthMode, RetryPolicy};
use crate::shared::Params;

/// Sub-client for account and position operations.
pub struct Account<'a> {
    pub(crate) client: &'a FuturesClient,
}

impl<'a> Account<'a> {
    /// Full account state: assets, positions, margin.
    pub async fn information(&self) -> Result<Value, SdkError> {
        self.send(Method::GET, "/fapi/v2/account", Params::new()).await
    }

    /// Per-asset wallet balances.
    pub async fn balance(&self) -> Result<Value, SdkError> {
        self.send(Method::GET, "/fapi/v2/balance", Params::new()).await
    }

    /// Position risk, optionally filtered by symbol.
    pub async fn position_risk(&self, symbol: Option<&str>) -> Result<Value, SdkError> {
        let mut params = Params::new();
        params.insert_opt("symbol", symbol);
        self.send(Method::GET, "/fapi/v2/positionRisk", params).await
    }

    /// Change the initial leverage on a symbol.
    pub async fn set_leverage(&self, symbol: &str, leverage: u32) -> Result<Value, SdkError> {
        let mut params = Params::new();
        params.insert("symbol", symbol).insert("leverage", leverage);
        self.send(Method::POST, "/fapi/v1/leverage", params).await
    }

    /// Switch a symbol between ISOLATED and CROSSED margin.
    pub async fn set_margin_type(&self, symbol: &str, margin_type: &str) -> Result<Value, SdkError> {
        let mut params = Params::new();
        params
            .insert("symbol", symbol)
            .insert("marginType", margin_type);
        self.send(Method::POST, "/fapi/v1/marginType", params).await
    }

    /// Enable or disable hedge mode account-wide.
    pub async fn set_position_side_dual(&self, dual: bool) -> Result<Value, SdkError> {
        let mut params = Params::new();
        params.insert("dualSidePosition", dual);
        self.send(Method::POST, "/fapi/v1/positionSide/dual", params).await
    }

    /// Current hedge-mode setting.
    pub async fn position_side_dual(&self) -> Result<Value, SdkError> {
        self.send(Method::GET, "/fapi/v1/positionSide/dual", Params::new())
            .await
    }

    /// Income history (realized PnL, funding fees, commissions).
    pub async fn income_history(&self, symbol: Option<&str>) -> Result<Value, SdkError> {
        let mut params = Params::new();
        params.insert_opt("symbol", symbol);
        self.send(Method::GET, "/fapi/v1/income", params).await
    }

    /// Maker/taker commission rates for a symbol.
    pub async fn commission_rate(&self, symbol: &str) -> Result<Value, SdkError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        self.send(Method::GET, "/fapi/v1/commissionRate", params).await
    }

    async fn send(&self, method: Method, path: &str, params: Params) -> Result<Value, SdkError> {
        self.client
            .http
            .send(method, path, params, AuthMode::Signed, RetryPolicy::Standard)
            .await
    }
}
