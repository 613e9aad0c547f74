//! HTTP response types for the webhook endpoint

use serde::Serialize;

/// Fixed acknowledgment body; always `{"ok":true}`
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub ok: bool,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Echo body for the endpoint verification handshake.
///
/// The token is kept as raw JSON so it goes back exactly as it arrived,
/// whatever type the platform sent.
#[derive(Debug, Serialize)]
pub struct ChallengeResponse {
    pub challenge: serde_json::Value,
}

/// Standard error response, only ever used for unknown routes
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_serialization() {
        let json = serde_json::to_string(&AckResponse::ok()).unwrap();
        assert_eq!(json, r#"{"ok":true}"#);
    }

    #[test]
    fn test_challenge_echo_serialization() {
        let response = ChallengeResponse {
            challenge: serde_json::json!("abc123"),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"challenge":"abc123"}"#);

        let response = ChallengeResponse {
            challenge: serde_json::json!(12345),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"challenge":12345}"#);
    }
}
