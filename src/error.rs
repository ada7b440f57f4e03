//! Unified SDK error types and the non-2xx response classifier.

use serde_json::Value;
use thiserror::Error;

/// Error code Binance returns when a conditional order type is submitted to the
/// legacy `/fapi/v1/order` endpoint after the algo-order migration.
pub const CODE_CONDITIONAL_ORDER_MIGRATED: i64 = -4120;

/// Error codes that mean "order not found" for cancel/query fallback purposes.
pub const NOT_FOUND_CODES: [i64; 2] = [-2011, -2013];

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl SdkError {
    /// The structured API failure, if this error came from a backend error payload.
    pub fn api_failure(&self) -> Option<&ApiFailure> {
        match self {
            SdkError::Api(e) => Some(e.failure()),
            _ => None,
        }
    }
}

/// Transport-layer errors. These never carry backend semantics — a decoded
/// error payload always becomes an [`ApiError`] instead.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Retries exhausted after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}

/// Structured error decoded from a non-2xx API response.
///
/// The migration rejection gets its own variant because the order router uses
/// it as a routing signal, not just a display string.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The legacy order endpoint refused a conditional type — conditional
    /// order handling has moved to the algo-order service.
    #[error("conditional order handling migrated: {0}")]
    ConditionalOrderMigrated(ApiFailure),

    #[error("{0}")]
    Response(ApiFailure),
}

impl ApiError {
    pub fn failure(&self) -> &ApiFailure {
        match self {
            ApiError::ConditionalOrderMigrated(f) | ApiError::Response(f) => f,
        }
    }

    pub fn status(&self) -> u16 {
        self.failure().status
    }

    pub fn code(&self) -> Option<i64> {
        self.failure().code
    }

    /// Whether this error means the targeted order does not exist on the
    /// endpoint that was asked (the cancel/query fallback trigger).
    pub fn is_not_found(&self) -> bool {
        let f = self.failure();
        f.status == 404 || f.code.is_some_and(|c| NOT_FOUND_CODES.contains(&c))
    }
}

/// The decoded contents of a backend error response.
#[derive(Debug, Clone)]
pub struct ApiFailure {
    /// HTTP status code.
    pub status: u16,
    /// Numeric Binance error code, when the payload carried one.
    pub code: Option<i64>,
    /// Human-readable message, with a hint appended for known codes.
    pub message: String,
    /// The raw payload: decoded JSON, or a string for non-JSON bodies.
    pub payload: Value,
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "status {} code {}: {}", self.status, code, self.message),
            None => write!(f, "status {}: {}", self.status, self.message),
        }
    }
}

/// Classify a non-2xx response body into a structured [`ApiError`].
///
/// Decodes the payload as JSON when possible, extracts a message from the
/// prioritized key set (`msg`, `message`, `error`), appends a hint for known
/// error codes, and promotes the migration code to its own variant.
pub fn classify_response(status: u16, body: &str) -> ApiError {
    let payload: Value = serde_json::from_str(body).unwrap_or_else(|_| {
        if body.is_empty() {
            Value::String("<empty>".to_string())
        } else {
            Value::String(body.to_string())
        }
    });

    let code = payload.get("code").and_then(Value::as_i64);

    let mut message = extract_message(&payload);
    if let Some(hint) = code.and_then(hint_for_code) {
        message = format!("{message} ({hint})");
    }

    let failure = ApiFailure {
        status,
        code,
        message,
        payload,
    };

    if code == Some(CODE_CONDITIONAL_ORDER_MIGRATED) {
        ApiError::ConditionalOrderMigrated(failure)
    } else {
        ApiError::Response(failure)
    }
}

fn extract_message(payload: &Value) -> String {
    if let Value::Object(map) = payload {
        for key in ["msg", "message", "error"] {
            if let Some(Value::String(s)) = map.get(key) {
                if !s.is_empty() {
                    return s.clone();
                }
            }
        }
        return payload.to_string();
    }
    match payload {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Static hint table for error codes that have a known remedy.
fn hint_for_code(code: i64) -> Option<&'static str> {
    match code {
        CODE_CONDITIONAL_ORDER_MIGRATED => Some(
            "conditional order types are handled by the algo-order service; \
             resubmit via the algo endpoint",
        ),
        -4116 => Some("a client order id was reused; supply a fresh newClientOrderId"),
        -2021 => Some("the stop price would trigger immediately against the current mark price"),
        _ => None,
    }
}
