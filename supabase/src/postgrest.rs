//! PostgREST table queries
//!
//! Only the shapes todoit needs: select/insert/update/delete with `eq`
//! filters and a single `order` clause.

use crate::auth::AuthClient;
use crate::error::{Result, SupabaseError};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Entry point for queries against one table
#[derive(Debug, Clone)]
pub struct TableQuery {
    http: Client,
    url: String,
    anon_key: String,
    auth: AuthClient,
}

impl TableQuery {
    pub(crate) fn new(http: Client, rest_url: &str, table: &str, anon_key: String, auth: AuthClient) -> Self {
        Self {
            http,
            url: format!("{rest_url}/{table}"),
            anon_key,
            auth,
        }
    }

    /// `SELECT columns FROM table`
    #[must_use]
    pub fn select(self, columns: &str) -> FilterBuilder {
        let mut builder = self.builder(Method::GET, None);
        builder.params.push(("select".to_string(), columns.to_string()));
        builder
    }

    /// Insert one row
    ///
    /// The server does not echo the row back (`Prefer: return=minimal`).
    #[must_use]
    pub fn insert<T: Serialize>(self, row: &T) -> FilterBuilder {
        let body = serde_json::to_value(row).map_err(|e| SupabaseError::SerializationFailed(e.to_string()));
        self.builder(Method::POST, Some(body))
    }

    /// Update the columns present in `patch` on every row the filters match
    #[must_use]
    pub fn update<T: Serialize>(self, patch: &T) -> FilterBuilder {
        let body = serde_json::to_value(patch).map_err(|e| SupabaseError::SerializationFailed(e.to_string()));
        self.builder(Method::PATCH, Some(body))
    }

    /// Delete every row the filters match
    #[must_use]
    pub fn delete(self) -> FilterBuilder {
        self.builder(Method::DELETE, None)
    }

    fn builder(self, method: Method, body: Option<Result<serde_json::Value>>) -> FilterBuilder {
        FilterBuilder {
            table: self,
            method,
            body,
            params: Vec::new(),
        }
    }
}

/// A query with its filters, ready to execute
#[derive(Debug)]
pub struct FilterBuilder {
    table: TableQuery,
    method: Method,
    body: Option<Result<serde_json::Value>>,
    params: Vec<(String, String)>,
}

impl FilterBuilder {
    /// Match rows where `column = value`
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl std::fmt::Display) -> Self {
        self.params.push((column.to_string(), format!("eq.{value}")));
        self
    }

    /// Order results by `column`
    #[must_use]
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.params.push(("order".to_string(), format!("{column}.{direction}")));
        self
    }

    /// Run the query and decode the returned rows
    ///
    /// # Errors
    ///
    /// Returns an error if the request body could not be encoded, the request
    /// failed, the server rejected it, or the rows do not decode as `T`.
    pub async fn execute<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let response = self.send().await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| SupabaseError::ResponseParseFailed(e.to_string()))
    }

    /// Run the query, ignoring any body in the response
    ///
    /// # Errors
    ///
    /// Same as [`FilterBuilder::execute`] minus decoding.
    pub async fn execute_empty(self) -> Result<()> {
        self.send().await.map(drop)
    }

    async fn send(self) -> Result<reqwest::Response> {
        let token = self
            .table
            .auth
            .access_token()
            .await?
            .unwrap_or_else(|| self.table.anon_key.clone());

        let mut request = self
            .table
            .http
            .request(self.method.clone(), &self.table.url)
            .query(&self.params)
            .header("apikey", &self.table.anon_key)
            .bearer_auth(token);

        if let Some(body) = self.body {
            request = request.header("Prefer", "return=minimal").json(&body?);
        }

        tracing::debug!(method = %self.method, url = %self.table.url, "PostgREST request");

        let response = request
            .send()
            .await
            .map_err(|e| SupabaseError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SupabaseError::from_response(response).await);
        }
        Ok(response)
    }
}
