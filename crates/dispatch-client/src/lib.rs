//! dispatch-client: the one HTTP collaborator shared by every screen,
//! implementing the [`OrderApi`] port over reqwest.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use dispatch_types::domain::bucket::Bucket;
use dispatch_types::domain::order::{Order, OrderId};
use dispatch_types::ports::order_api::{ApiError, OrderApi, OrderAction};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;

/// Actions must not hang indefinitely; the store awaits them before
/// applying optimistic patches.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct DispatchClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Duration,
    client: Option<reqwest::Client>,
}

#[derive(Clone)]
pub struct DispatchClient {
    base: Url,
    client: reqwest::Client,
}

impl DispatchClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<DispatchClientBuilder> {
        let mut base = Url::parse(base_url).context("invalid base url")?;
        // Relative joins drop the last path segment unless the base ends
        // with a slash.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        Ok(DispatchClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: DEFAULT_TIMEOUT,
            client: None,
        })
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Transport(format!("failed to join url `{path}`: {e}")))
    }

    async fn fetch_list(&self, path: &str, field: &str) -> Result<Vec<Order>, ApiError> {
        let res = self
            .client
            .get(self.url(path)?)
            .send()
            .await
            .map_err(to_api_error)?
            .error_for_status()
            .map_err(to_api_error)?;
        let body: serde_json::Value = res.json().await.map_err(to_api_error)?;
        let list = body
            .get(field)
            .cloned()
            .ok_or_else(|| ApiError::Decode(format!("response missing `{field}` field")))?;
        serde_json::from_value(list)
            .map_err(|e| ApiError::Decode(format!("bad `{field}` payload: {e}")))
    }
}

#[async_trait]
impl OrderApi for DispatchClient {
    async fn list_bucket(&self, bucket: Bucket) -> Result<Vec<Order>, ApiError> {
        tracing::debug!(%bucket, "listing bucket");
        self.fetch_list(bucket.list_path(), bucket.list_field())
            .await
    }

    async fn order_history(&self) -> Result<Vec<Order>, ApiError> {
        self.fetch_list("api/orders/history", "orders").await
    }

    async fn post_action(&self, id: &OrderId, action: OrderAction) -> Result<(), ApiError> {
        tracing::debug!(%id, %action, "posting order action");
        self.client
            .post(self.url(&format!("api/orders/{id}/{}", action.path_segment()))?)
            .send()
            .await
            .map_err(to_api_error)?
            .error_for_status()
            .map_err(to_api_error)?;
        Ok(())
    }
}

fn to_api_error(err: reqwest::Error) -> ApiError {
    if let Some(status) = err.status() {
        ApiError::Status(status.as_u16())
    } else if err.is_decode() {
        ApiError::Decode(err.to_string())
    } else {
        ApiError::Transport(err.to_string())
    }
}

impl DispatchClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<DispatchClient> {
        if let Some(client) = self.client {
            return Ok(DispatchClient {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        let client = builder.build()?;
        Ok(DispatchClient {
            base: self.base,
            client,
        })
    }
}
