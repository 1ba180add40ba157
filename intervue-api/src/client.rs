//! HTTP client wrapper
//!
//! Configures the base URL, attaches the bearer token, and inspects
//! responses for auth failures. The session and the navigator are explicit
//! context objects injected at construction; the wrapper never reaches for
//! global state.

use std::collections::HashMap;
use std::sync::Arc;

use intervue_core::{
    decode_claims, ApiSettings, IntervueError, IntervueResult, SESSION_EXPIRED_MESSAGE,
    SESSION_INVALID_MESSAGE,
};
use intervue_session::{routes, Navigator, SessionStore};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::auth::AuthApi;
use crate::interviews::InterviewsApi;
use crate::jobs::JobsApi;
use crate::resumes::ResumesApi;
use crate::users::UsersApi;

/// Substrings that mark a 500 as really being a session-expiry report.
///
/// Workaround for a backend that surfaces JWT expiry as an internal error
/// instead of a 401; not a normative contract.
const EXPIRY_HINTS: [&str; 4] = ["expired", "Signature has expired", "jwt", "token"];

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL all request paths are resolved against
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
    /// Additional headers
    pub headers: HashMap<String, String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from(&ApiSettings::default())
    }
}

impl From<&ApiSettings> for ApiClientConfig {
    fn from(settings: &ApiSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            timeout_seconds: settings.timeout_seconds,
            user_agent: settings.user_agent.clone(),
            headers: HashMap::new(),
        }
    }
}

impl ApiClientConfig {
    /// Create a configuration for the given base URL
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set additional header
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

/// `{data, message}` envelope most platform endpoints wrap their payload in
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// Bare `{message}` acknowledgement returned by delete-style endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    pub message: String,
}

/// API client for the interview platform
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiClientConfig,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Create a new API client over the given session and navigator
    pub fn new(
        config: ApiClientConfig,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> IntervueResult<Self> {
        let http = create_http_client(&config)?;

        debug!("Created API client for {}", config.base_url);

        Ok(Self {
            http,
            config,
            session,
            navigator,
        })
    }

    /// The session this client operates on
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Auth endpoints
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }

    /// Job requirement endpoints
    pub fn jobs(&self) -> JobsApi<'_> {
        JobsApi { client: self }
    }

    /// Interview endpoints, including questions, answers, scores and
    /// evaluations
    pub fn interviews(&self) -> InterviewsApi<'_> {
        InterviewsApi { client: self }
    }

    /// Resume endpoints
    pub fn resumes(&self) -> ResumesApi<'_> {
        ResumesApi { client: self }
    }

    /// User endpoints
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi { client: self }
    }

    /// Start a request against the configured base URL.
    ///
    /// Low-level escape hatch; the resource modules cover the platform's
    /// endpoints.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        self.http.request(method, url)
    }

    /// Send a request with the session token attached and the response
    /// inspected for auth failures
    pub async fn send(&self, builder: RequestBuilder) -> IntervueResult<Response> {
        let builder = match self.bearer_header()? {
            Some(value) => builder.header(reqwest::header::AUTHORIZATION, value),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            IntervueError::http(
                format!("Request failed: {}", e),
                Some(Box::new(e)),
                "api_client",
            )
        })?;

        self.check_response(response).await
    }

    /// Send a request and decode the JSON response body
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> IntervueResult<T> {
        let response = self.send(builder).await?;
        response.json().await.map_err(|e| {
            IntervueError::http(
                format!("Failed to parse response body: {}", e),
                Some(Box::new(e)),
                "api_client",
            )
        })
    }

    /// Inspect the stored token before it goes out.
    ///
    /// An undecodable or expired token terminates the session and aborts the
    /// request; a missing token sends the request unauthenticated.
    fn bearer_header(&self) -> IntervueResult<Option<reqwest::header::HeaderValue>> {
        let token = match self.session.token() {
            Some(token) => token,
            None => return Ok(None),
        };

        let claims = match decode_claims(&token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!("Aborting request, stored token failed to decode: {}", e);
                self.terminate_session();
                return Err(IntervueError::session_invalid(
                    SESSION_INVALID_MESSAGE,
                    "api_client",
                ));
            }
        };

        if claims.is_expired() {
            debug!("Aborting request, stored token is past its expiry claim");
            self.terminate_session();
            return Err(IntervueError::session_expired(
                SESSION_EXPIRED_MESSAGE,
                "api_client",
            ));
        }

        reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token))
            .map(Some)
            .map_err(|e| {
                IntervueError::http(
                    format!("Token is not a valid header value: {}", e),
                    Some(Box::new(e)),
                    "api_client",
                )
            })
    }

    /// Normalize auth failures; pass every other error through unchanged
    async fn check_response(&self, response: Response) -> IntervueResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body);

        if status == StatusCode::UNAUTHORIZED {
            self.terminate_session();
            let message = message.unwrap_or_else(|| SESSION_EXPIRED_MESSAGE.to_string());
            return Err(IntervueError::session_expired(message, "api_client"));
        }

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            let text = message.as_deref().unwrap_or(&body);
            if is_expiry_hint(text) {
                warn!(
                    "Treating 500 with expiry-like message as an expired session: {}",
                    text
                );
                self.terminate_session();
                return Err(IntervueError::session_expired(
                    SESSION_EXPIRED_MESSAGE,
                    "api_client",
                ));
            }
        }

        let message = message.unwrap_or_else(|| {
            if body.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                body.clone()
            }
        });

        Err(IntervueError::api(status.as_u16(), message, "api_client"))
    }

    /// Clear the session and send the application back to the login page
    fn terminate_session(&self) {
        self.session.logout();
        self.navigator.redirect(routes::LOGIN);
    }
}

/// Helper function to create the HTTP client with common configuration
fn create_http_client(config: &ApiClientConfig) -> IntervueResult<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();

    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_str(&config.user_agent).map_err(|e| {
            IntervueError::http(
                format!("Invalid user agent: {}", e),
                Some(Box::new(e)),
                "http_client",
            )
        })?,
    );

    for (key, value) in &config.headers {
        let header_name = reqwest::header::HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            IntervueError::http(
                format!("Invalid header name '{}': {}", key, e),
                Some(Box::new(e)),
                "http_client",
            )
        })?;

        let header_value = reqwest::header::HeaderValue::from_str(value).map_err(|e| {
            IntervueError::http(
                format!("Invalid header value for '{}': {}", key, e),
                Some(Box::new(e)),
                "http_client",
            )
        })?;

        headers.insert(header_name, header_value);
    }

    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_seconds))
        .default_headers(headers)
        .build()
        .map_err(|e| {
            IntervueError::http(
                format!("Failed to create HTTP client: {}", e),
                Some(Box::new(e)),
                "http_client",
            )
        })
}

fn is_expiry_hint(message: &str) -> bool {
    EXPIRY_HINTS.iter().any(|hint| message.contains(hint))
}

fn extract_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct MessageBody {
        message: Option<String>,
    }

    serde_json::from_str::<MessageBody>(body)
        .ok()
        .and_then(|b| b.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use intervue_session::{MemoryCredentialStore, RecordingNavigator};

    fn test_client(config: ApiClientConfig) -> IntervueResult<ApiClient> {
        let session = Arc::new(SessionStore::new(Arc::new(MemoryCredentialStore::new())));
        ApiClient::new(config, session, Arc::new(RecordingNavigator::new()))
    }

    #[test]
    fn test_config_defaults() {
        let config = ApiClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000/api");
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.headers.is_empty());
    }

    #[test]
    fn test_config_builders() {
        let config = ApiClientConfig::new("https://hiring.example.com/api")
            .with_header("X-Request-Source".to_string(), "cli".to_string())
            .with_timeout(60);

        assert_eq!(config.base_url, "https://hiring.example.com/api");
        assert_eq!(config.timeout_seconds, 60);
        assert_eq!(
            config.headers.get("X-Request-Source"),
            Some(&"cli".to_string())
        );
    }

    #[test]
    fn test_client_creation() {
        assert!(test_client(ApiClientConfig::default()).is_ok());
    }

    #[test]
    fn test_client_rejects_bad_custom_header() {
        let config = ApiClientConfig::default()
            .with_header("not a header name".to_string(), "v".to_string());
        assert!(test_client(config).is_err());
    }

    #[test]
    fn test_expiry_hint_matching() {
        assert!(is_expiry_hint("Signature has expired"));
        assert!(is_expiry_hint("jwt malformed"));
        assert!(is_expiry_hint("token could not be verified"));
        assert!(is_expiry_hint("something expired somewhere"));
        assert!(!is_expiry_hint("database connection refused"));
    }

    #[test]
    fn test_extract_message() {
        assert_eq!(
            extract_message(r#"{"message":"nope"}"#).as_deref(),
            Some("nope")
        );
        assert_eq!(extract_message(r#"{"data":[]}"#), None);
        assert_eq!(extract_message("plain text"), None);
    }
}
