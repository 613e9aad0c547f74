//! Telegram Bot API payload structures and message formatting

use serde::Serialize;

/// Placeholder shown when an enriched field came back empty
pub const EMPTY_FIELD_PLACEHOLDER: &str = "(vacío)";

/// Request body for the Bot API `sendMessage` method
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub chat_id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<String>,
}

/// Everything that goes into one forwarded status message
#[derive(Debug, Clone, Default)]
pub struct StatusUpdate {
    pub board: String,
    pub item: String,
    pub column: String,
    pub previous: String,
    pub current: String,
    pub description: String,
    pub requester: String,
}

/// Build the human-readable message for a status change.
///
/// The `From:` line is omitted when no previous value was reported; the two
/// enrichment lines always render, with a placeholder when empty.
pub fn build_status_message(update: &StatusUpdate) -> String {
    let mut msg = String::from("📌 Monday status update\n");
    msg.push_str(&format!("Board: {}\n", update.board));
    msg.push_str(&format!("Item: {}\n", update.item));
    msg.push_str(&format!("Column: {}\n", update.column));

    if !update.previous.is_empty() {
        msg.push_str(&format!("From: {}\n", update.previous));
    }
    msg.push_str(&format!("To: {}\n", update.current));

    msg.push_str(&format!(
        "Descripción: {}\n",
        placeholder_if_empty(&update.description)
    ));
    msg.push_str(&format!(
        "Solicitante: {}",
        placeholder_if_empty(&update.requester)
    ));

    msg
}

fn placeholder_if_empty(field: &str) -> &str {
    if field.is_empty() {
        EMPTY_FIELD_PLACEHOLDER
    } else {
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_update() -> StatusUpdate {
        StatusUpdate {
            board: "4521034870".to_string(),
            item: "887766".to_string(),
            column: "status".to_string(),
            previous: "Working on it".to_string(),
            current: "Done".to_string(),
            description: "Replace the cert".to_string(),
            requester: "Ana".to_string(),
        }
    }

    #[test]
    fn test_full_message() {
        let msg = build_status_message(&sample_update());
        assert_eq!(
            msg,
            "📌 Monday status update\n\
             Board: 4521034870\n\
             Item: 887766\n\
             Column: status\n\
             From: Working on it\n\
             To: Done\n\
             Descripción: Replace the cert\n\
             Solicitante: Ana"
        );
    }

    #[test]
    fn test_from_line_omitted_without_previous_value() {
        let mut update = sample_update();
        update.previous = String::new();

        let msg = build_status_message(&update);
        assert!(!msg.contains("From:"));
        assert!(msg.contains("To: Done\n"));
    }

    #[test]
    fn test_empty_enrichment_renders_placeholders() {
        let mut update = sample_update();
        update.description = String::new();
        update.requester = String::new();

        let msg = build_status_message(&update);
        assert!(msg.contains("Descripción: (vacío)\n"));
        assert!(msg.ends_with("Solicitante: (vacío)"));
    }

    #[test]
    fn test_send_message_request_omits_absent_parse_mode() {
        let request = SendMessageRequest {
            chat_id: "42".to_string(),
            text: "hello".to_string(),
            parse_mode: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("parse_mode"));

        let request = SendMessageRequest {
            parse_mode: Some("Markdown".to_string()),
            ..request
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""parse_mode":"Markdown""#));
    }
}
