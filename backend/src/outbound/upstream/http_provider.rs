//! Reqwest-backed [`AdminProvider`] for upstreams that speak the shared
//! response envelope.
//!
//! The adapter owns transport details only: URL construction, the gateway
//! credential header, timeout and status mapping, and decoding the envelope's
//! `data` into domain records.

use std::time::Duration;

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::ports::{AdminProvider, ProviderError};
use crate::domain::{
    AppConfig, AppConfigUpsert, BAD_GATEWAY_STATUS, ConfigKey, Envelope, PlanetItem,
    UpstreamError, User, UserId, UserUpdate, UsersPage,
};

/// Connection settings for one HTTP provider.
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Name the provider is registered under.
    pub name: String,
    /// Base URL every admin path is appended to, e.g.
    /// `http://127.0.0.1:8080/api/v1`.
    pub base_url: Url,
    /// Header carrying the gateway credential.
    pub gateway_header: String,
    /// Shared secret proving the caller is the gateway.
    pub gateway_key: String,
    /// Upper bound for one upstream exchange.
    pub timeout: Duration,
}

/// Reasons an [`HttpAdminProvider`] cannot be built.
#[derive(Debug, Error)]
pub enum HttpProviderBuildError {
    /// The base URL cannot have path segments appended.
    #[error("base url `{0}` cannot carry a path")]
    BaseUrl(Url),
    /// The gateway header name is not a valid HTTP header name.
    #[error("invalid gateway header name: {0}")]
    HeaderName(#[from] reqwest::header::InvalidHeaderName),
    /// The gateway key is not a valid HTTP header value.
    #[error("invalid gateway key header value")]
    HeaderValue(#[from] reqwest::header::InvalidHeaderValue),
    /// The HTTP client could not be constructed.
    #[error("http client construction failed: {0}")]
    Client(#[from] reqwest::Error),
}

/// Provider adapter that forwards admin operations over HTTP.
pub struct HttpAdminProvider {
    name: String,
    client: Client,
    base_url: Url,
    gateway_header: HeaderName,
    gateway_key: HeaderValue,
}

impl HttpAdminProvider {
    /// Build an adapter whose client enforces `config.timeout` on every call.
    ///
    /// # Errors
    ///
    /// Returns [`HttpProviderBuildError`] when the base URL cannot carry a
    /// path, the gateway header is malformed, or the client cannot be built.
    pub fn new(config: HttpProviderConfig) -> Result<Self, HttpProviderBuildError> {
        if config.base_url.cannot_be_a_base() {
            return Err(HttpProviderBuildError::BaseUrl(config.base_url));
        }
        let gateway_header = HeaderName::from_bytes(config.gateway_header.trim().as_bytes())?;
        let mut gateway_key = HeaderValue::from_str(&config.gateway_key)?;
        gateway_key.set_sensitive(true);
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            name: config.name,
            client,
            base_url: config.base_url,
            gateway_header,
            gateway_key,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ProviderError::request(format!("base url `{}` cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn paged_endpoint(
        &self,
        segments: &[&str],
        request: PageRequest,
    ) -> Result<Url, ProviderError> {
        let mut url = self.endpoint(segments)?;
        url.query_pairs_mut()
            .append_pair("page", &request.page().to_string())
            .append_pair("pageSize", &request.page_size().to_string());
        Ok(url)
    }

    async fn call<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Option<Box<RawValue>>, ProviderError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json")
            .header(self.gateway_header.clone(), self.gateway_key.clone());
        if let Some(body) = body {
            let payload = serde_json::to_vec(body)
                .map_err(|err| ProviderError::request(format!("request body encoding failed: {err}")))?;
            request = request.header(CONTENT_TYPE, "application/json").body(payload);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(
            provider = %self.name,
            %method,
            path = url.path(),
            status = status.as_u16(),
            bytes = body.len(),
            "upstream call completed"
        );

        interpret_response(status, body.as_ref()).inspect_err(|err| {
            warn!(provider = %self.name, %method, path = url.path(), error = %err, "upstream call failed");
        })
    }

    async fn fetch<B, T>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Option<T>, ProviderError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let data = self.call(method, url, body).await?;
        data.map(|raw| decode_data(&raw)).transpose()
    }

    async fn fetch_required<B, T>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, ProviderError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.fetch(method, url, body)
            .await?
            .ok_or_else(|| ProviderError::decode("upstream returned no data"))
    }
}

#[async_trait]
impl AdminProvider for HttpAdminProvider {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    async fn list_users(
        &self,
        request: PageRequest,
        keyword: &str,
    ) -> Result<UsersPage, ProviderError> {
        let mut url = self.paged_endpoint(&["admin", "users"], request)?;
        let keyword = keyword.trim();
        if !keyword.is_empty() {
            url.query_pairs_mut().append_pair("keyword", keyword);
        }
        let page = self.fetch::<(), UsersPage>(Method::GET, url, None).await?;
        Ok(page.unwrap_or_else(|| UsersPage::empty(request)))
    }

    async fn list_user_planets(
        &self,
        user_id: UserId,
        request: PageRequest,
    ) -> Result<Paginated<PlanetItem>, ProviderError> {
        let id = user_id.to_string();
        let url = self.paged_endpoint(&["admin", "users", id.as_str(), "planets"], request)?;
        let page = self.fetch::<(), Paginated<PlanetItem>>(Method::GET, url, None).await?;
        Ok(page.unwrap_or_else(|| Paginated::empty(request)))
    }

    async fn update_user(
        &self,
        user_id: UserId,
        patch: &UserUpdate,
    ) -> Result<User, ProviderError> {
        let id = user_id.to_string();
        let url = self.endpoint(&["admin", "users", id.as_str()])?;
        self.fetch_required(Method::PUT, url, Some(patch)).await
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), ProviderError> {
        let id = user_id.to_string();
        let url = self.endpoint(&["admin", "users", id.as_str()])?;
        self.call::<()>(Method::DELETE, url, None).await.map(drop)
    }

    async fn list_configs(&self) -> Result<Vec<AppConfig>, ProviderError> {
        let url = self.endpoint(&["admin", "configs"])?;
        let configs = self.fetch::<(), Vec<AppConfig>>(Method::GET, url, None).await?;
        Ok(configs.unwrap_or_default())
    }

    async fn upsert_config(
        &self,
        key: &ConfigKey,
        payload: &AppConfigUpsert,
    ) -> Result<AppConfig, ProviderError> {
        let url = self.endpoint(&["admin", "configs", key.as_ref()])?;
        self.fetch_required(Method::PUT, url, Some(payload)).await
    }

    async fn delete_config(&self, key: &ConfigKey) -> Result<(), ProviderError> {
        let url = self.endpoint(&["admin", "configs", key.as_ref()])?;
        self.call::<()>(Method::DELETE, url, None).await.map(drop)
    }
}

/// Classify one upstream exchange and hand back the envelope's raw `data`.
///
/// An empty or `null` body is treated as an envelope with every field at its
/// zero value, so it fails the success check below. Any other body must be a
/// JSON object.
fn interpret_response(
    status: StatusCode,
    body: &[u8],
) -> Result<Option<Box<RawValue>>, ProviderError> {
    let envelope = if body.is_empty() || body.trim_ascii() == b"null" {
        Envelope::message(0, "", 0)
    } else {
        match decode_envelope(body) {
            Some(envelope) => envelope,
            None if status.is_success() => {
                return Err(ProviderError::protocol(format!(
                    "upstream response is not json: {}",
                    body_preview(body)
                )));
            }
            None => {
                let text = String::from_utf8_lossy(body);
                return Err(UpstreamError::new(status.as_u16(), text.trim()).into());
            }
        }
    };

    if !status.is_success() || !envelope.is_success() {
        let reported = match status.as_u16() {
            0 => u16::try_from(envelope.code)
                .ok()
                .filter(|code| *code != 0)
                .unwrap_or(BAD_GATEWAY_STATUS),
            status => status,
        };
        return Err(UpstreamError::new(reported, envelope.msg.trim()).into());
    }

    Ok(envelope.data)
}

fn decode_envelope(body: &[u8]) -> Option<Envelope<Box<RawValue>>> {
    if !body.trim_ascii_start().starts_with(b"{") {
        return None;
    }
    serde_json::from_slice(body).ok()
}

fn decode_data<T: DeserializeOwned>(raw: &RawValue) -> Result<T, ProviderError> {
    serde_json::from_str(raw.get()).map_err(|err| {
        ProviderError::decode(format!("{err}; payload: {}", body_preview(raw.get().as_bytes())))
    })
}

fn map_transport_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::timeout(error.to_string())
    } else {
        ProviderError::transport(error.to_string())
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
