//! Inbound webhook payload types for monday.com events
//!
//! monday.com webhook bodies come in two shapes: a one-time verification
//! handshake carrying a `challenge` token, and status-change events carrying
//! an `event` object. Column values inside an event are loosely typed (label
//! objects, bare text objects, plain strings, or arbitrary JSON), so the
//! types here model that as an ordered-variant enum instead of probing
//! dynamic JSON at the call sites.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Top-level webhook body: either a verification challenge or an event
#[derive(Debug, Clone, Default)]
pub struct WebhookPayload {
    /// Verification token, kept as raw JSON so the echo is byte-exact even
    /// for non-string tokens
    pub challenge: Option<Value>,
    pub event: Option<StatusEvent>,
}

impl WebhookPayload {
    /// Parse a raw request body.
    ///
    /// monday.com does not guarantee a JSON content type, and the relay must
    /// never reject an inbound webhook, so anything unparseable is treated
    /// as an empty payload. The two fields fail independently: a malformed
    /// `event` must never swallow a present `challenge`.
    pub fn from_slice(body: &[u8]) -> Self {
        let Ok(body) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };

        let challenge = match body.get("challenge") {
            Some(Value::Null) | None => None,
            Some(token) => Some(token.clone()),
        };

        let event = body
            .get("event")
            .and_then(|event| serde_json::from_value(event.clone()).ok());

        Self { challenge, event }
    }
}

/// A status-change event from a board webhook
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusEvent {
    pub board_id: Option<EntityId>,
    /// Legacy name for the item identifier, preferred when both are present
    pub pulse_id: Option<EntityId>,
    pub item_id: Option<EntityId>,
    pub column_id: Option<EntityId>,
    pub value: Option<StatusValue>,
    pub previous_value: Option<StatusValue>,
}

impl StatusEvent {
    pub fn board_label(&self) -> String {
        label_or_unknown(&self.board_id)
    }

    pub fn item_label(&self) -> String {
        self.pulse_id
            .as_ref()
            .or(self.item_id.as_ref())
            .map(ToString::to_string)
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn column_label(&self) -> String {
        label_or_unknown(&self.column_id)
    }

    /// Item identifier usable in an API query, `pulseId` preferred
    pub fn item_query_id(&self) -> Option<String> {
        self.pulse_id
            .as_ref()
            .or(self.item_id.as_ref())
            .and_then(EntityId::as_query_id)
    }

    /// Display text for the new status; an absent value renders as the
    /// serialized empty object
    pub fn new_value_text(&self) -> String {
        self.value
            .as_ref()
            .map(StatusValue::display_text)
            .unwrap_or_else(|| "{}".to_string())
    }

    /// Display text for the previous status; absent renders as empty
    pub fn previous_value_text(&self) -> String {
        self.previous_value
            .as_ref()
            .map(StatusValue::display_text)
            .unwrap_or_default()
    }
}

fn label_or_unknown(id: &Option<EntityId>) -> String {
    id.as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "unknown".to_string())
}

/// Opaque board/item/column identifier, numeric or textual on the wire
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
    /// Anything else the platform might send; not addressable
    Other(Value),
}

impl EntityId {
    /// Identifier usable in an API query
    pub fn as_query_id(&self) -> Option<String> {
        match self {
            EntityId::Number(n) => Some(n.to_string()),
            EntityId::Text(s) => Some(s.clone()),
            EntityId::Other(_) => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
            EntityId::Other(_) => f.write_str("unknown"),
        }
    }
}

/// A status column value in one of the shapes monday.com sends.
///
/// Variant order is the extraction fallback order: nested label text, then
/// direct text, then a plain string, then arbitrary JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StatusValue {
    Labeled { label: StatusLabel },
    Texted { text: String },
    Plain(String),
    Other(Value),
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusLabel {
    pub text: String,
}

impl StatusValue {
    /// Human-readable text for this value
    pub fn display_text(&self) -> String {
        match self {
            StatusValue::Labeled { label } => label.text.clone(),
            StatusValue::Texted { text } => text.clone(),
            StatusValue::Plain(text) => text.clone(),
            StatusValue::Other(value) => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> WebhookPayload {
        WebhookPayload::from_slice(body.to_string().as_bytes())
    }

    #[test]
    fn test_challenge_payload() {
        let payload = parse(json!({"challenge": "abc123"}));
        assert_eq!(payload.challenge, Some(json!("abc123")));
        assert!(payload.event.is_none());
    }

    #[test]
    fn test_challenge_survives_malformed_event() {
        let payload = parse(json!({"challenge": "verify-me", "event": 123}));
        assert_eq!(payload.challenge, Some(json!("verify-me")));
        assert!(payload.event.is_none());
    }

    #[test]
    fn test_non_string_challenge_preserved() {
        let payload = parse(json!({"challenge": 12345}));
        assert_eq!(payload.challenge, Some(json!(12345)));
    }

    #[test]
    fn test_null_challenge_treated_as_absent() {
        let payload = parse(json!({"challenge": null, "event": {"value": "Done"}}));
        assert!(payload.challenge.is_none());
        assert!(payload.event.is_some());
    }

    #[test]
    fn test_garbage_body_is_empty_payload() {
        let payload = WebhookPayload::from_slice(b"not json at all");
        assert!(payload.challenge.is_none());
        assert!(payload.event.is_none());

        let payload = WebhookPayload::from_slice(b"");
        assert!(payload.challenge.is_none());
    }

    #[test]
    fn test_labeled_value_extraction() {
        let payload = parse(json!({
            "event": {"value": {"label": {"text": "Urgent"}}}
        }));
        let event = payload.event.unwrap();
        assert_eq!(event.new_value_text(), "Urgent");
    }

    #[test]
    fn test_direct_text_value_extraction() {
        let payload = parse(json!({
            "event": {"value": {"text": "In progress"}}
        }));
        let event = payload.event.unwrap();
        assert_eq!(event.new_value_text(), "In progress");
    }

    #[test]
    fn test_plain_string_value_extraction() {
        let payload = parse(json!({"event": {"value": "Urgent"}}));
        let event = payload.event.unwrap();
        assert_eq!(event.new_value_text(), "Urgent");
    }

    #[test]
    fn test_arbitrary_json_value_serialized() {
        let payload = parse(json!({"event": {"value": {"foo": 1}}}));
        let event = payload.event.unwrap();
        assert_eq!(event.new_value_text(), r#"{"foo":1}"#);
    }

    #[test]
    fn test_label_without_text_falls_back_to_serialization() {
        let payload = parse(json!({"event": {"value": {"label": {"index": 3}}}}));
        let event = payload.event.unwrap();
        assert_eq!(event.new_value_text(), r#"{"label":{"index":3}}"#);
    }

    #[test]
    fn test_absent_values() {
        let payload = parse(json!({"event": {}}));
        let event = payload.event.unwrap();
        assert_eq!(event.new_value_text(), "{}");
        assert_eq!(event.previous_value_text(), "");
    }

    #[test]
    fn test_previous_value_extraction() {
        let payload = parse(json!({
            "event": {
                "value": {"label": {"text": "Done"}},
                "previousValue": {"label": {"text": "Working on it"}}
            }
        }));
        let event = payload.event.unwrap();
        assert_eq!(event.previous_value_text(), "Working on it");
    }

    #[test]
    fn test_identifier_labels() {
        let payload = parse(json!({
            "event": {"boardId": 4521034870i64, "pulseId": 887766, "columnId": "status"}
        }));
        let event = payload.event.unwrap();
        assert_eq!(event.board_label(), "4521034870");
        assert_eq!(event.item_label(), "887766");
        assert_eq!(event.column_label(), "status");
    }

    #[test]
    fn test_missing_identifiers_render_unknown() {
        let payload = parse(json!({"event": {}}));
        let event = payload.event.unwrap();
        assert_eq!(event.board_label(), "unknown");
        assert_eq!(event.item_label(), "unknown");
        assert_eq!(event.column_label(), "unknown");
        assert!(event.item_query_id().is_none());
    }

    #[test]
    fn test_pulse_id_preferred_over_item_id() {
        let payload = parse(json!({
            "event": {"pulseId": 111, "itemId": 222}
        }));
        let event = payload.event.unwrap();
        assert_eq!(event.item_query_id().as_deref(), Some("111"));
        assert_eq!(event.item_label(), "111");
    }

    #[test]
    fn test_item_id_used_when_pulse_id_absent() {
        let payload = parse(json!({"event": {"itemId": 222}}));
        let event = payload.event.unwrap();
        assert_eq!(event.item_query_id().as_deref(), Some("222"));
        assert_eq!(event.item_label(), "222");
    }

    #[test]
    fn test_structured_identifier_not_addressable() {
        let payload = parse(json!({"event": {"boardId": {"nested": true}}}));
        let event = payload.event.unwrap();
        assert_eq!(event.board_label(), "unknown");
    }
}
