//! Client configuration.

use crate::error::{Result, TodoError};
use std::time::Duration;
use todoit_supabase::SupabaseClient;

/// Table holding the rows unless `TODOIT_TABLE` says otherwise
pub const DEFAULT_TABLE: &str = "todos";

/// HTTP timeout unless `TODOIT_REQUEST_TIMEOUT_SECS` says otherwise
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the hosted project
#[derive(Clone)]
pub struct TodoitConfig {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`
    pub supabase_url: String,
    /// Public anon key
    pub anon_key: String,
    /// Table name
    pub table: String,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// Email to sign in with, if not prompting
    pub email: Option<String>,
    /// Password to sign in with, if not prompting
    pub password: Option<String>,
}

impl TodoitConfig {
    /// Settings with defaults for everything but the project
    #[must_use]
    pub fn new(supabase_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            supabase_url: supabase_url.into(),
            anon_key: anon_key.into(),
            table: DEFAULT_TABLE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            email: None,
            password: None,
        }
    }

    /// Read settings from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Config`] if `SUPABASE_URL` or `SUPABASE_ANON_KEY`
    /// is missing, or the timeout is not a whole number of seconds.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup` (variable name to value)
    ///
    /// # Errors
    ///
    /// Same as [`TodoitConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| TodoError::Config(format!("{name} is not set")))
        };

        let mut config = Self::new(required("SUPABASE_URL")?, required("SUPABASE_ANON_KEY")?);

        if let Some(table) = lookup("TODOIT_TABLE").filter(|table| !table.trim().is_empty()) {
            config.table = table;
        }
        if let Some(raw) = lookup("TODOIT_REQUEST_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                TodoError::Config(format!("TODOIT_REQUEST_TIMEOUT_SECS must be whole seconds, got '{raw}'"))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }
        config.email = lookup("TODOIT_EMAIL");
        config.password = lookup("TODOIT_PASSWORD");

        Ok(config)
    }

    /// Use another table
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Set the per-request HTTP timeout
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set sign-in credentials
    #[must_use]
    pub fn with_credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self.password = Some(password.into());
        self
    }

    /// Build the HTTP client for the project
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn client(&self) -> Result<SupabaseClient> {
        SupabaseClient::with_timeout(&self.supabase_url, self.anon_key.clone(), self.request_timeout)
            .map_err(TodoError::from)
    }
}

impl std::fmt::Debug for TodoitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoitConfig")
            .field("supabase_url", &self.supabase_url)
            .field("anon_key", &"[REDACTED]")
            .field("table", &self.table)
            .field("request_timeout", &self.request_timeout)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_project_is_set() {
        let config = TodoitConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();

        assert_eq!(config.table, "todos");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.email, None);
    }

    #[test]
    fn overrides_are_read() {
        let config = TodoitConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("TODOIT_TABLE", "tasks"),
            ("TODOIT_REQUEST_TIMEOUT_SECS", "3"),
            ("TODOIT_EMAIL", "ada@example.com"),
        ]))
        .unwrap();

        assert_eq!(config.table, "tasks");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn flag_timeout_overrides_environment() {
        let config = TodoitConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("TODOIT_REQUEST_TIMEOUT_SECS", "3"),
        ]))
        .unwrap()
        .with_request_timeout(Duration::from_secs(45));

        assert_eq!(config.request_timeout, Duration::from_secs(45));
        assert!(config.client().is_ok());
    }

    #[test]
    fn missing_project_is_a_config_error() {
        let error = TodoitConfig::from_lookup(lookup(&[("SUPABASE_URL", "https://demo.supabase.co")]))
            .unwrap_err();

        assert_eq!(error, TodoError::Config("SUPABASE_ANON_KEY is not set".to_string()));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let result = TodoitConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("TODOIT_REQUEST_TIMEOUT_SECS", "soon"),
        ]));

        assert!(matches!(result, Err(TodoError::Config(_))));
    }

    #[test]
    fn debug_hides_secrets() {
        let config = TodoitConfig::new("https://demo.supabase.co", "anon-secret")
            .with_credentials("ada@example.com", "hunter2");

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("anon-secret"));
        assert!(!rendered.contains("hunter2"));
    }
}
