//! The HTTP transport: [`NodeClient`] and the [`NodeApi`] seam.
//!
//! One GET per operation, JSON in, typed struct out. Non-2xx statuses are
//! translated into the [`ApiError`] taxonomy; a handful of list endpoints
//! degrade to an empty result on 404 instead of failing, because the node
//! historically answered 404 for "no data yet" on those paths.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::error::{ApiError, EntityKind};
use super::types::{Balance, Block, PeersResponse, Tip, Transaction, ValidatorsResponse};
use crate::config::{DEFAULT_NODE_URL, REQUEST_TIMEOUT};

// ---------------------------------------------------------------------------
// NodeApi trait
// ---------------------------------------------------------------------------

/// The read operations the explorer's logic is written against.
///
/// [`NodeClient`] is the production implementation; tests substitute an
/// in-memory fake so the chain walk and search dispatch can be exercised
/// without a network.
#[async_trait]
pub trait NodeApi: Send + Sync {
    /// Current chain head.
    async fn tip(&self) -> Result<Tip, ApiError>;

    /// Block by hash. 404 → [`ApiError::NotFound`].
    async fn block(&self, hash: &str) -> Result<Block, ApiError>;

    /// Transaction by id. 404 → [`ApiError::NotFound`].
    async fn transaction(&self, txid: &str) -> Result<Transaction, ApiError>;

    /// Current balance of an address. 404 → [`ApiError::NotFound`].
    async fn balance(&self, address: &str) -> Result<Balance, ApiError>;

    /// Transactions touching an address, 404 degrades to an empty list.
    async fn address_transactions(&self, address: &str) -> Result<Vec<Transaction>, ApiError>;
}

// ---------------------------------------------------------------------------
// NodeClient
// ---------------------------------------------------------------------------

/// HTTP client for a single SOLE node.
///
/// Cheap to clone; `reqwest::Client` is an `Arc` around a connection pool.
#[derive(Debug, Clone)]
pub struct NodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl NodeClient {
    /// Creates a client for the given base URL.
    ///
    /// A trailing slash on the base URL is tolerated and stripped, so
    /// `http://host:8645` and `http://host:8645/` behave identically.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
        })
    }

    /// Creates a client pointed at [`DEFAULT_NODE_URL`].
    pub fn with_default_url() -> Result<Self, ApiError> {
        Self::new(DEFAULT_NODE_URL)
    }

    /// The normalized base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Peer addresses the node is connected to. 404 → empty.
    pub async fn peers(&self) -> Result<PeersResponse, ApiError> {
        self.get_json_or_default("/network/peers", "peers").await
    }

    /// The active validator set. 404 → empty.
    pub async fn validators(&self) -> Result<ValidatorsResponse, ApiError> {
        self.get_json_or_default("/consensus/validators", "validators")
            .await
    }

    /// Performs a GET and decodes the JSON body.
    ///
    /// `not_found` controls what a 404 means: a typed entity miss, or just
    /// another bad status.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        context: &'static str,
        not_found: Option<EntityKind>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "node GET");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            return serde_json::from_str(&body)
                .map_err(|source| ApiError::Decode { context, source });
        }

        if status == StatusCode::NOT_FOUND {
            if let Some(kind) = not_found {
                return Err(ApiError::NotFound { kind });
            }
        }

        tracing::warn!(%url, status = status.as_u16(), "node returned error status");
        Err(ApiError::Status {
            status: status.as_u16(),
        })
    }

    /// Like [`Self::get_json`], but a 404 yields `T::default()`.
    async fn get_json_or_default<T: DeserializeOwned + Default>(
        &self,
        path: &str,
        context: &'static str,
    ) -> Result<T, ApiError> {
        match self.get_json::<T>(path, context, None).await {
            Err(ApiError::Status { status: 404 }) => Ok(T::default()),
            other => other,
        }
    }
}

#[async_trait]
impl NodeApi for NodeClient {
    async fn tip(&self) -> Result<Tip, ApiError> {
        self.get_json("/blocks/tip", "tip", None).await
    }

    async fn block(&self, hash: &str) -> Result<Block, ApiError> {
        self.get_json(
            &format!("/blocks/{hash}"),
            "block",
            Some(EntityKind::Block),
        )
        .await
    }

    async fn transaction(&self, txid: &str) -> Result<Transaction, ApiError> {
        self.get_json(
            &format!("/transaction/{txid}"),
            "transaction",
            Some(EntityKind::Transaction),
        )
        .await
    }

    async fn balance(&self, address: &str) -> Result<Balance, ApiError> {
        self.get_json(
            &format!("/balance/{address}"),
            "balance",
            Some(EntityKind::Address),
        )
        .await
    }

    async fn address_transactions(&self, address: &str) -> Result<Vec<Transaction>, ApiError> {
        self.get_json_or_default(&format!("/transactions/{address}"), "address transactions")
            .await
    }
}

/// Strips trailing slashes so path concatenation never produces `//`.
fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
