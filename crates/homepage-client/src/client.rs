use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use homepage_types::{GuestbookEntry, HealthStatus, NewGuestbookEntry, VisitorCount};

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Shown instead of the real count whenever the counter can't be read.
pub const FALLBACK_VISITOR_COUNT: i64 = 1337;

/// One-shot client for the guestbook service. No timeout, no retry: each call
/// makes a single request and whatever happens to it is the answer.
///
/// Cloning is cheap; the underlying `reqwest::Client` is reference-counted and
/// calls share nothing else.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_http(Client::new(), config)
    }

    pub fn with_http(http: Client, config: ApiConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // -- Guestbook --

    pub async fn try_guestbook_entries(&self) -> Result<Vec<GuestbookEntry>, ApiError> {
        self.get("/guestbook").await
    }

    /// All guestbook entries in server order, or an empty list on any failure.
    pub async fn guestbook_entries(&self) -> Vec<GuestbookEntry> {
        self.try_guestbook_entries().await.unwrap_or_else(|e| {
            log_failure("get_guestbook_entries", "Failed to fetch guestbook entries", &e);
            Vec::new()
        })
    }

    pub async fn try_add_guestbook_entry(
        &self,
        name: &str,
        message: &str,
    ) -> Result<GuestbookEntry, ApiError> {
        self.post("/guestbook", &NewGuestbookEntry::new(name, message)).await
    }

    /// Sign the guestbook. Returns the entry as the server stored it, or `None`
    /// if anything went wrong. Empty names/messages are left for the server
    /// to reject.
    pub async fn add_guestbook_entry(&self, name: &str, message: &str) -> Option<GuestbookEntry> {
        match self.try_add_guestbook_entry(name, message).await {
            Ok(entry) => Some(entry),
            Err(e) => {
                log_failure("add_guestbook_entry", "Failed to add guestbook entry", &e);
                None
            }
        }
    }

    // -- Visitor count --

    pub async fn try_visitor_count(&self) -> Result<VisitorCount, ApiError> {
        self.get("/visitor-count").await
    }

    /// Current visitor count (the server increments it as a side effect).
    ///
    /// A count of `0` is indistinguishable from a failure here and also yields
    /// [`FALLBACK_VISITOR_COUNT`].
    pub async fn visitor_count(&self) -> i64 {
        match self.try_visitor_count().await {
            Ok(VisitorCount { count, .. }) if count != 0 => count,
            Ok(_) => {
                warn!(operation = "get_visitor_count", "Visitor count is 0, using fallback");
                FALLBACK_VISITOR_COUNT
            }
            Err(e) => {
                log_failure("get_visitor_count", "Failed to fetch visitor count", &e);
                FALLBACK_VISITOR_COUNT
            }
        }
    }

    // -- Health --

    pub async fn try_health(&self) -> Result<HealthStatus, ApiError> {
        self.get("/health").await
    }

    pub async fn is_healthy(&self) -> bool {
        match self.try_health().await {
            Ok(health) if health.is_ok() => true,
            Ok(health) => {
                warn!(operation = "health", status = %health.status, "API reported unhealthy status");
                false
            }
            Err(e) => {
                log_failure("health", "Health check failed", &e);
                false
            }
        }
    }

    // -- Plumbing --

    /// Fails with `NotConfigured` before anything touches the network.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.config.endpoint(path)?;
        debug!(%method, %url, "API request");
        Ok(self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json"))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        send(self.request(Method::GET, path)?).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        send(self.request(Method::POST, path)?.json(body)).await
    }
}

async fn send<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, ApiError> {
    let resp = req.send().await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ApiError::Status(status));
    }

    // Read the body first so a bad payload shows up as MalformedResponse rather
    // than as a transport error.
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}

fn log_failure(operation: &'static str, what: &str, err: &ApiError) {
    error!(operation, kind = err.kind().as_str(), "{}: {}", what, err);
}
