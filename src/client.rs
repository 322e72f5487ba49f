use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::AuthData;
use crate::metrics::MetricsCollection;

/// Production address of the delivery-order API.
pub const DEFAULT_BASE_URL: &str = "https://apidelibery.onrender.com";

// ─── Wire types ──────────────────────────────────────────────────

/// JSON error envelope the API returns on every non-2xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(rename = "erro")]
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Delivery address inside an order document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "rua")]
    pub street: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "referencia", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// An order as the API expects it. Item lines are free-form documents
/// (name → {quantity, price, …}), passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "cliente")]
    pub customer: String,
    #[serde(rename = "endereco")]
    pub address: Address,
    #[serde(rename = "itens")]
    pub items: serde_json::Map<String, Value>,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "valor_total")]
    pub total: f64,
    #[serde(rename = "pagamento")]
    pub payment: String,
    #[serde(rename = "taxa", default, skip_serializing_if = "Option::is_none")]
    pub delivery_fee: Option<f64>,
}

// ─── Errors ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with an error envelope.
    #[error("upstream {status}: {message}")]
    Upstream {
        status: u16,
        message: String,
        code: Option<String>,
    },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

// ─── Client ──────────────────────────────────────────────────────

/// Typed client for the delivery-order API.
///
/// Cheaply cloneable — every clone shares the same underlying reqwest
/// connection pool. No retries and no token refresh: a failed call is
/// surfaced as-is and the caller decides.
#[derive(Debug, Clone)]
pub struct DeliveryApi {
    http: reqwest::Client,
    base_url: String,
}

impl DeliveryApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /login — exchange credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthData> {
        let response = self
            .http
            .post(self.url("/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }

    /// POST /pedido — submit a new order. Sends an idempotency key so an
    /// ambiguous network failure can be retried by hand without a
    /// duplicate order.
    pub async fn create_order(&self, order: &Order, token: &str) -> Result<Value> {
        let response = self
            .http
            .post(self.url("/pedido"))
            .bearer_auth(token)
            .header("Idempotency-Key", Uuid::new_v4().to_string())
            .json(order)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }

    /// GET /pedidos — today's orders for the account, passed through raw.
    pub async fn orders(&self, token: &str) -> Result<Value> {
        self.get_json("/pedidos", token).await
    }

    /// GET /metricas — the account's request log keyed by record id.
    pub async fn metrics(&self, token: &str) -> Result<MetricsCollection> {
        self.get_json("/metricas", token).await
    }

    /// GET /debug-credenciais — raw credential debug document.
    pub async fn debug_credentials(&self, token: &str) -> Result<Value> {
        self.get_json("/debug-credenciais", token).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }
}

/// Turn a response into `T`, or into the API's error envelope.
async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(parse_error(status, response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn parse_error(status: reqwest::StatusCode, response: reqwest::Response) -> ApiError {
    match response.json::<ApiErrorBody>().await {
        Ok(body) => ApiError::Upstream {
            status: status.as_u16(),
            message: body.message,
            code: body.code,
        },
        // Some proxies answer with HTML; keep the status either way
        Err(_) => ApiError::Upstream {
            status: status.as_u16(),
            message: format!("upstream returned status {status}"),
            code: None,
        },
    }
}
