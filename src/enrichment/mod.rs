//! Best-effort column enrichment against the monday.com GraphQL API
//!
//! After a status-change event arrives, the relay fetches two extra columns
//! for the item (a free-text description and a requester person column) so
//! the forwarded message carries more context than the raw event. Enrichment
//! is strictly best-effort: a missing API token, a network failure, or an
//! unexpected response shape all degrade to empty fields and never fail the
//! inbound webhook.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::MondayConfig;
use crate::error::{Error, Result};

const CLIENT_TIMEOUT_SECS: u64 = 30;

/// Supplementary fields fetched for an item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichedFields {
    pub description: String,
    pub requester: String,
}

/// GraphQL request body
#[derive(Debug, Serialize)]
struct GraphqlRequest {
    query: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    data: Option<QueryData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QueryData {
    items: Vec<ItemNode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ItemNode {
    column_values: Vec<ColumnValue>,
}

/// One column on an item as returned by the query API
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ColumnValue {
    id: String,
    /// Pre-rendered display text, when the platform provides one
    text: Option<String>,
    /// Raw column value as a JSON-encoded string
    value: Option<String>,
}

/// Client for the monday.com query API
#[derive(Clone)]
pub struct MondayClient {
    client: Client,
    config: MondayConfig,
}

impl MondayClient {
    pub fn new(config: MondayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(CLIENT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Application(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Whether enrichment will actually issue queries
    pub fn is_enabled(&self) -> bool {
        self.config.is_enabled()
    }

    /// Fetch the configured description/requester columns for an item.
    ///
    /// Returns empty fields when enrichment is disabled, the event carried
    /// no item id, or the query fails in any way.
    pub async fn fetch_item_fields(&self, item_id: Option<&str>) -> EnrichedFields {
        if !self.is_enabled() {
            debug!("No monday.com API token configured, skipping enrichment");
            return EnrichedFields::default();
        }

        let Some(item_id) = item_id else {
            debug!("Event carried no item id, skipping enrichment");
            return EnrichedFields::default();
        };

        match self.query_item(item_id).await {
            Ok(fields) => fields,
            Err(e) => {
                warn!(
                    item_id = %item_id,
                    error = %e,
                    "Enrichment query failed, continuing with empty fields"
                );
                EnrichedFields::default()
            }
        }
    }

    async fn query_item(&self, item_id: &str) -> Result<EnrichedFields> {
        let token = self
            .config
            .api_token
            .as_deref()
            .ok_or_else(|| Error::Application("monday.com API token not configured".to_string()))?;

        let query = format!(
            r#"query {{ items (ids: [{}]) {{ column_values (ids: ["{}", "{}"]) {{ id text value }} }} }}"#,
            item_id, self.config.description_column, self.config.requester_column,
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", token)
            .json(&GraphqlRequest { query })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Application(format!(
                "monday.com API returned status {}",
                status.as_u16()
            )));
        }

        let parsed: QueryResponse = response.json().await?;
        let item = parsed
            .data
            .and_then(|d| d.items.into_iter().next())
            .ok_or_else(|| Error::Application("monday.com response carried no items".to_string()))?;

        let mut fields = EnrichedFields::default();
        for column in &item.column_values {
            if column.id == self.config.description_column {
                fields.description = normalize_column_value(column);
            } else if column.id == self.config.requester_column {
                fields.requester = normalize_column_value(column);
            }
        }

        Ok(fields)
    }
}

/// Reduce a column value to display text.
///
/// Preference order: the pre-rendered `text` field; the raw `value` parsed
/// as JSON with a special case for person/team lists; the raw string itself
/// when it is not valid JSON.
fn normalize_column_value(column: &ColumnValue) -> String {
    if let Some(text) = column.text.as_deref() {
        if !text.is_empty() {
            return text.to_string();
        }
    }

    let Some(raw) = column.value.as_deref() else {
        return String::new();
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(parsed) => {
            if let Some(members) = parsed.get("personsAndTeams").and_then(Value::as_array) {
                join_members(members)
            } else if let Value::String(s) = parsed {
                s
            } else {
                parsed.to_string()
            }
        }
        Err(_) => raw.to_string(),
    }
}

/// Join a person/team list, falling back to member ids when names are absent
fn join_members(members: &[Value]) -> String {
    members
        .iter()
        .map(|member| {
            member
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| {
                    member.get("id").map(|id| match id {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                })
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(", ")
}
