//! Unified error handling system
//!
//! Provides structured error types with context, recovery suggestions, and proper error chaining

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

pub type IntervueResult<T> = Result<T, IntervueError>;

/// Message surfaced when the server or the client detects an expired session.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired, please log in again";

/// Message surfaced when the stored token cannot be decoded at all.
pub const SESSION_INVALID_MESSAGE: &str = "Invalid session credentials, please log in again";

/// Error context providing additional information for debugging and recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
    /// Operation being performed when error occurred
    pub operation: Option<String>,
    /// Recovery suggestions
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Main error type for the Intervue client
#[derive(Error, Debug)]
pub enum IntervueError {
    /// The stored token decoded but its expiry claim is in the past, or the
    /// server reported the session as expired.
    #[error("Session expired: {message}")]
    SessionExpired {
        message: String,
        context: ErrorContext,
    },

    /// The stored token is malformed and cannot be decoded.
    #[error("Session invalid: {message}")]
    SessionInvalid {
        message: String,
        context: ErrorContext,
    },

    /// Non-auth API error, passed through to the caller unmodified.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        context: ErrorContext,
    },

    /// Transport-level failure (connection refused, timeout, bad body).
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntervueError {
    /// Create a session-expired error with the default component
    pub fn session_expired<S: Into<String>>(message: S, component: &str) -> Self {
        Self::SessionExpired {
            message: message.into(),
            context: ErrorContext::new(component)
                .with_suggestion("Log in again to obtain a fresh token"),
        }
    }

    /// Create a session-invalid error with the default component
    pub fn session_invalid<S: Into<String>>(message: S, component: &str) -> Self {
        Self::SessionInvalid {
            message: message.into(),
            context: ErrorContext::new(component)
                .with_suggestion("Clear stored credentials and log in again"),
        }
    }

    /// Create an API error for a non-success status
    pub fn api<S: Into<String>>(status: u16, message: S, component: &str) -> Self {
        Self::Api {
            status,
            message: message.into(),
            context: ErrorContext::new(component),
        }
    }

    /// Create a transport error wrapping its source
    pub fn http<S: Into<String>>(
        message: S,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        component: &str,
    ) -> Self {
        Self::Http {
            message: message.into(),
            source,
            context: ErrorContext::new(component),
        }
    }

    /// Create a storage error wrapping its source
    pub fn storage<S: Into<String>>(
        message: S,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        component: &str,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source,
            context: ErrorContext::new(component),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S, component: &str) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            context: ErrorContext::new(component)
                .with_suggestion("Check your configuration file"),
        }
    }

    /// Get the error context
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            IntervueError::SessionExpired { context, .. } => Some(context),
            IntervueError::SessionInvalid { context, .. } => Some(context),
            IntervueError::Api { context, .. } => Some(context),
            IntervueError::Http { context, .. } => Some(context),
            IntervueError::Storage { context, .. } => Some(context),
            IntervueError::Config { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Whether this error terminated the session (expired or undecodable token)
    pub fn is_session_failure(&self) -> bool {
        matches!(
            self,
            IntervueError::SessionExpired { .. } | IntervueError::SessionInvalid { .. }
        )
    }

    /// The user-facing message carried by this error
    pub fn user_message(&self) -> String {
        match self {
            IntervueError::SessionExpired { message, .. } => message.clone(),
            IntervueError::SessionInvalid { message, .. } => message.clone(),
            IntervueError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            IntervueError::SessionExpired { .. } | IntervueError::SessionInvalid { .. } => {
                warn!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Session terminated"
                );
            }
            _ => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Error occurred"
                );
            }
        }
    }
}
