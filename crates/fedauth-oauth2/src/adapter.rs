// The adapter contract: ProviderAdapter trait, per-adapter configuration,
// and the OAuth2Api seam the adapters call into.
//
// A provider is configuration plus response mapping. Everything stateful
// (the authorization redirect, code exchange, token refresh, signed
// requests) lives behind the OAuth2Api trait and is supplied by the
// surrounding library; HttpApi is the default implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use fedauth_core::error::Result;
use fedauth_core::user::{Contact, Profile};

use crate::client::HttpApi;

/// The surface the OAuth2 client exposes to provider adapters.
///
/// `api_request` issues an authenticated request and returns the parsed
/// JSON body, or `None` when the provider sent an empty body. `stored_data`
/// reads the adapter's own token fields (access token and friends).
#[async_trait]
pub trait OAuth2Api: Send + Sync {
    /// Request `path_or_url`: a path relative to the provider's API base,
    /// or an absolute URL (paging cursors come back absolute).
    async fn api_request(&self, path_or_url: &str) -> Result<Option<serde_json::Value>>;

    /// Read a value from the adapter's token storage.
    fn stored_data(&self, key: &str) -> Option<String>;
}

/// Fixed endpoint URLs of a provider.
#[derive(Debug, Clone, Copy)]
pub struct Endpoints {
    /// Base URL relative API paths resolve against.
    pub api_base_url: &'static str,
    /// Authorization endpoint (consumed by the external OAuth2 flow).
    pub authorize_url: &'static str,
    /// Access-token endpoint (consumed by the external OAuth2 flow).
    pub access_token_url: &'static str,
    /// Link to the provider's API documentation.
    pub api_documentation: &'static str,
}

/// Per-adapter configuration supplied by the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterOptions {
    /// OAuth client ID.
    pub client_id: String,

    /// OAuth client secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Callback URL registered with the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,

    /// Overrides the provider's default scope when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Extra authorization-URL parameters, merged over the provider's own.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub authorize_url_params: HashMap<String, String>,
}

impl AdapterOptions {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: None,
            callback: None,
            scope: None,
            authorize_url_params: HashMap::new(),
        }
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
        self.callback = Some(callback.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_authorize_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.authorize_url_params.insert(key.into(), value.into());
        self
    }
}

/// Query parameters for a contact-list fetch.
///
/// Providers use these only partially: Gmail honors `page_size`, Instagram
/// ignores the query entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactQuery {
    pub page_size: Option<u32>,
}

/// A provider adapter: scope, endpoints, and the mapping from the
/// provider's REST JSON into the normalized user model.
///
/// Implementations hold no request state; the OAuth2Api passed into the
/// fetch operations carries the token.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Unique provider identifier (e.g. "gmail", "instagram").
    fn id(&self) -> &'static str;

    /// Human-readable provider name.
    fn name(&self) -> &'static str;

    /// Scope requested when the application does not override it.
    fn default_scope(&self) -> &'static str;

    /// The provider's fixed endpoint URLs.
    fn endpoints(&self) -> &'static Endpoints;

    /// Authorization-URL parameters this provider always sends.
    fn authorize_url_params(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    /// Person fields requested from the profile/contacts endpoints.
    fn profile_fields(&self) -> &'static [&'static str] {
        &[]
    }

    /// Hook run when the adapter is wired to a client and whenever the
    /// stored token changes. Providers that pass the token as a request
    /// parameter mirror it into the API here.
    fn initialize(&self, _api: &mut HttpApi) {}

    /// Map a profile response body into a [`Profile`].
    fn map_profile(&self, data: &serde_json::Value) -> Result<Profile>;

    /// Map a single contact entry into a [`Contact`].
    fn map_contact(&self, entry: &serde_json::Value) -> Result<Contact>;

    /// Fetch and normalize the authenticated user's profile.
    async fn get_user_profile(&self, api: &dyn OAuth2Api) -> Result<Profile>;

    /// Fetch and normalize the user's contact list. An empty response is a
    /// legitimate "no contacts" result, not an error.
    async fn get_user_contacts(
        &self,
        api: &dyn OAuth2Api,
        query: &ContactQuery,
    ) -> Result<Vec<Contact>>;
}
