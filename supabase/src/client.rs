//! Supabase project client

use crate::auth::AuthClient;
use crate::error::{Result, SupabaseError};
use crate::postgrest::TableQuery;
use reqwest::Client;
use std::time::Duration;

/// Default timeout for every HTTP request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for one Supabase project
///
/// Cheap to clone; clones share the HTTP connection pool and the session.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Client,
    rest_url: String,
    anon_key: String,
    auth: AuthClient,
}

impl SupabaseClient {
    /// Create a client with the default request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(project_url: &str, anon_key: String) -> Result<Self> {
        Self::with_timeout(project_url, anon_key, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(project_url: &str, anon_key: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SupabaseError::RequestFailed(e.to_string()))?;

        let base = project_url.trim_end_matches('/');
        Ok(Self {
            auth: AuthClient::new(http.clone(), base, anon_key.clone()),
            rest_url: format!("{base}/rest/v1"),
            http,
            anon_key,
        })
    }

    /// Auth client sharing this project's session
    #[must_use]
    pub const fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// Start a query against `table`
    ///
    /// Requests carry the signed-in user's access token, or the anon key
    /// when nobody is signed in.
    #[must_use]
    pub fn from(&self, table: &str) -> TableQuery {
        TableQuery::new(
            self.http.clone(),
            &self.rest_url,
            table,
            self.anon_key.clone(),
            self.auth.clone(),
        )
    }
}
