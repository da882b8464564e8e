// HttpApi, the reqwest-backed implementation of the OAuth2Api seam,
// and OAuth2Client, which composes a ProviderAdapter with it.
//
// HttpApi signs requests with the stored bearer token and appends any
// adapter-level request parameters. It does not retry, refresh tokens, or
// persist anything; the storage map lives and dies with the adapter
// instance.

use std::collections::HashMap;

use async_trait::async_trait;
use url::Url;

use fedauth_core::error::{FedAuthError, Result};
use fedauth_core::logger::Logger;
use fedauth_core::user::{Contact, Profile};

use crate::adapter::{AdapterOptions, ContactQuery, Endpoints, OAuth2Api, ProviderAdapter};

/// Key under which the access token is stored.
pub const ACCESS_TOKEN: &str = "access_token";

/// Authenticated HTTP client behind the [`OAuth2Api`] seam.
#[derive(Debug, Clone)]
pub struct HttpApi {
    http: reqwest::Client,
    base_url: Url,
    /// Query parameters appended to every request (e.g. Instagram's
    /// access_token parameter).
    request_params: Vec<(String, String)>,
    storage: HashMap<String, String>,
    logger: Logger,
}

impl HttpApi {
    pub fn new(api_base_url: &str) -> Result<Self> {
        let base_url = Url::parse(api_base_url)
            .map_err(|e| FedAuthError::Config(format!("invalid API base URL: {e}")))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            request_params: Vec::new(),
            storage: HashMap::new(),
            logger: Logger::default(),
        })
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Store a token field on this adapter instance.
    pub fn set_stored_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.storage.insert(key.into(), value.into());
    }

    /// Set a query parameter sent with every API request. Replaces an
    /// existing parameter with the same key.
    pub fn set_request_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.request_params.retain(|(k, _)| *k != key);
        self.request_params.push((key, value.into()));
    }

    /// Resolve `path_or_url` against the base URL and append the
    /// adapter-level request parameters. Absolute URLs (paging cursors)
    /// pass through unresolved.
    fn request_url(&self, path_or_url: &str) -> Result<Url> {
        let mut url = if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
            Url::parse(path_or_url)
        } else {
            self.base_url.join(path_or_url)
        }
        .map_err(|e| FedAuthError::Transport(format!("invalid request URL `{path_or_url}`: {e}")))?;

        if !self.request_params.is_empty() {
            url.query_pairs_mut().extend_pairs(self.request_params.iter());
        }

        Ok(url)
    }
}

#[async_trait]
impl OAuth2Api for HttpApi {
    async fn api_request(&self, path_or_url: &str) -> Result<Option<serde_json::Value>> {
        let url = self.request_url(path_or_url)?;
        self.logger.debug(&format!("GET {url}"));

        let mut request = self.http.get(url.clone());
        if let Some(token) = self.storage.get(ACCESS_TOKEN) {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FedAuthError::Transport(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            self.logger.error(&format!("GET {url} returned {status}"));
            return Err(FedAuthError::Transport(format!(
                "{url} returned {status}: {body}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FedAuthError::Transport(format!("failed to read response body: {e}")))?;

        if body.trim().is_empty() {
            return Ok(None);
        }

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| FedAuthError::Transport(format!("failed to parse response JSON: {e}")))?;

        // A bare JSON null is the same "nothing there" case as an empty body.
        if value.is_null() {
            return Ok(None);
        }

        Ok(Some(value))
    }

    fn stored_data(&self, key: &str) -> Option<String> {
        self.storage.get(key).cloned()
    }
}

/// A provider adapter wired to an authenticated API.
///
/// The provider supplies scope, endpoints, and mapping; the client owns the
/// token fields and performs the calls. One instance serves one user's
/// session; there is no shared mutable state beyond its own storage.
#[derive(Debug, Clone)]
pub struct OAuth2Client<P: ProviderAdapter> {
    provider: P,
    options: AdapterOptions,
    api: HttpApi,
}

impl<P: ProviderAdapter> OAuth2Client<P> {
    pub fn new(provider: P, options: AdapterOptions) -> Result<Self> {
        if options.client_id.is_empty() {
            return Err(FedAuthError::Config("client_id must not be empty".into()));
        }

        let mut api = HttpApi::new(provider.endpoints().api_base_url)?;
        provider.initialize(&mut api);

        Ok(Self {
            provider,
            options,
            api,
        })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn options(&self) -> &AdapterOptions {
        &self.options
    }

    pub fn endpoints(&self) -> &'static Endpoints {
        self.provider.endpoints()
    }

    /// The scope to request: the application override when present,
    /// otherwise the provider default.
    pub fn scope(&self) -> &str {
        self.options
            .scope
            .as_deref()
            .unwrap_or_else(|| self.provider.default_scope())
    }

    /// Authorization-URL parameters for the external OAuth2 flow: the
    /// provider's own, overlaid with the application's.
    pub fn authorize_parameters(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = self
            .provider
            .authorize_url_params()
            .iter()
            .filter(|(k, _)| !self.options.authorize_url_params.contains_key(*k))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        params.extend(
            self.options
                .authorize_url_params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        params
    }

    /// Store the access token obtained by the external flow and let the
    /// provider mirror it into its request parameters if it needs to.
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.api.set_stored_data(ACCESS_TOKEN, token);
        self.provider.initialize(&mut self.api);
    }

    pub async fn get_user_profile(&self) -> Result<Profile> {
        self.provider.get_user_profile(&self.api).await
    }

    pub async fn get_user_contacts(&self, query: &ContactQuery) -> Result<Vec<Contact>> {
        self.provider.get_user_contacts(&self.api, query).await
    }
}
