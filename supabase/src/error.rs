//! Error types for the Supabase client

use thiserror::Error;

/// Result type alias for Supabase operations.
pub type Result<T> = std::result::Result<T, SupabaseError>;

/// Errors that can occur when talking to a Supabase project
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be decoded
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Request body could not be encoded
    #[error("Request serialization failed: {0}")]
    SerializationFailed(String),

    /// The operation needs a signed-in session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Unauthorized - invalid key, expired token, or rejected credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// API returned an error
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },
}

impl SupabaseError {
    /// Build an error from a non-success response
    ///
    /// GoTrue and PostgREST both put a human readable reason in a JSON body
    /// (`msg`, `error_description`, `message`); fall back to the raw text.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body).unwrap_or(body);

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Self::Unauthorized(message);
        }

        Self::ApiError {
            status: status.as_u16(),
            message,
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_gotrue_and_postgrest_messages() {
        assert_eq!(
            extract_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            Some("Invalid login credentials".to_string())
        );
        assert_eq!(
            extract_message(r#"{"code":"42501","message":"permission denied for table todos"}"#),
            Some("permission denied for table todos".to_string())
        );
        assert_eq!(extract_message("gateway timeout"), None);
    }
}
