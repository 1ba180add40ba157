//! Domain types shared across the client
//!
//! Roles, user records and the advisory token-claims decoder.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{IntervueError, IntervueResult};

/// User role classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Platform administrator
    Admin,
    /// Creates interviews and evaluates candidates
    Interviewer,
    /// Takes interviews and maintains a resume
    Interviewee,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Interviewer => write!(f, "interviewer"),
            Role::Interviewee => write!(f, "interviewee"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "interviewer" => Ok(Role::Interviewer),
            "interviewee" => Ok(Role::Interviewee),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// User record as returned by the platform API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    /// Server timestamps are naive ISO 8601 strings without a zone
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl User {
    pub fn new(id: i64, username: &str, email: &str, role: Role) -> Self {
        Self {
            id,
            username: username.to_string(),
            email: email.to_string(),
            role,
            created_at: None,
        }
    }
}

/// Claims decoded from a bearer token's payload segment.
///
/// Only the payload is inspected; the signature is never verified
/// client-side. Expiry is advisory, real enforcement is server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user identifier)
    #[serde(default)]
    pub sub: Option<String>,
    /// Expiry, seconds since epoch
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued-at, seconds since epoch
    #[serde(default)]
    pub iat: Option<i64>,
}

impl TokenClaims {
    /// Whether the expiry claim is in the past at the given instant.
    /// A token without an expiry claim never counts as expired.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp < now)
    }

    /// Whether the expiry claim is in the past right now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp())
    }
}

/// Decode the claims from a bearer token without verifying its signature.
///
/// The token must carry a base64url-encoded JSON payload as its second
/// dot-separated segment. Anything else is a `SessionInvalid` error.
pub fn decode_claims(token: &str) -> IntervueResult<TokenClaims> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| invalid_token("token has no payload segment"))?;

    let decoded = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| invalid_token(&format!("payload is not valid base64: {}", e)))?;

    serde_json::from_slice(&decoded)
        .map_err(|e| invalid_token(&format!("payload is not valid claims JSON: {}", e)))
}

fn invalid_token(detail: &str) -> IntervueError {
    IntervueError::session_invalid(format!("Failed to decode token: {}", detail), "token_claims")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn token_with_payload(payload: &str) -> String {
        format!(
            "header.{}.signature",
            URL_SAFE_NO_PAD.encode(payload.as_bytes())
        )
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Interviewer, Role::Interviewee] {
            assert_eq!(Role::from_str(&role.to_string()), Ok(role));
        }
        assert!(Role::from_str("manager").is_err());
    }

    #[test]
    fn test_role_serde_uses_wire_names() {
        let json = serde_json::to_string(&Role::Interviewee).unwrap();
        assert_eq!(json, "\"interviewee\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_decode_claims_reads_expiry() {
        let token = token_with_payload(r#"{"sub":"42","exp":1700000000,"iat":1699990000}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert_eq!(claims.exp, Some(1700000000));
        assert_eq!(claims.iat, Some(1699990000));
    }

    #[test]
    fn test_decode_claims_without_expiry() {
        let token = token_with_payload(r#"{"sub":"42"}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, None);
        assert!(!claims.is_expired_at(i64::MAX));
    }

    #[test]
    fn test_decode_claims_rejects_missing_payload_segment() {
        let err = decode_claims("not-a-token").unwrap_err();
        assert!(matches!(err, IntervueError::SessionInvalid { .. }));
    }

    #[test]
    fn test_decode_claims_rejects_bad_base64() {
        let err = decode_claims("header.!!!!.signature").unwrap_err();
        assert!(matches!(err, IntervueError::SessionInvalid { .. }));
    }

    #[test]
    fn test_decode_claims_rejects_non_json_payload() {
        let token = format!("header.{}.sig", URL_SAFE_NO_PAD.encode(b"plain text"));
        let err = decode_claims(&token).unwrap_err();
        assert!(matches!(err, IntervueError::SessionInvalid { .. }));
    }

    #[test]
    fn test_expiry_comparison_is_strict() {
        let claims = TokenClaims {
            exp: Some(1000),
            ..Default::default()
        };
        assert!(claims.is_expired_at(1001));
        assert!(!claims.is_expired_at(1000));
        assert!(!claims.is_expired_at(999));
    }

    #[test]
    fn test_user_parses_naive_timestamps() {
        let json = r#"{
            "id": 7,
            "username": "ada",
            "email": "ada@example.com",
            "role": "interviewer",
            "created_at": "2024-03-01T09:30:00"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Interviewer);
        assert!(user.created_at.is_some());
    }
}
