//! Process configuration, read once from the environment at startup.
//!
//! The relay is configured entirely through environment variables so it can
//! run as a bare container with no mounted files. The resulting [`Config`]
//! is frozen after startup and shared behind an `Arc`.
//!
//! | Variable                    | Default                      | Effect when absent            |
//! |-----------------------------|------------------------------|-------------------------------|
//! | `PORT`                      | `3000`                       | —                             |
//! | `BIND_ADDR`                 | `0.0.0.0`                    | —                             |
//! | `TELEGRAM_BOT_TOKEN`        | —                            | message delivery disabled     |
//! | `TELEGRAM_CHAT_ID`          | —                            | message delivery disabled     |
//! | `TELEGRAM_PARSE_MODE`       | —                            | plain-text messages           |
//! | `MONDAY_API_TOKEN`          | —                            | column enrichment disabled    |
//! | `MONDAY_DESCRIPTION_COLUMN` | `descripcion`                | —                             |
//! | `MONDAY_REQUESTER_COLUMN`   | `solicitante`                | —                             |
//! | `LOG_LEVEL`                 | `info`                       | —                             |
//! | `LOG_FORMAT`                | `pretty`                     | —                             |

use crate::error::{ConfigError, Result};

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const MONDAY_API_URL: &str = "https://api.monday.com/v2";

/// Top-level configuration for the relay
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub telegram: TelegramConfig,
    pub monday: MondayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl ServerConfig {
    /// Listen address in "host:port" form for the TCP listener
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Telegram Bot API delivery settings
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub parse_mode: Option<String>,
    /// Bot API origin, overridable in tests
    pub api_base: String,
}

impl TelegramConfig {
    /// Delivery requires both the bot token and the target chat
    pub fn is_enabled(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            parse_mode: None,
            api_base: TELEGRAM_API_BASE.to_string(),
        }
    }
}

/// monday.com GraphQL enrichment settings
#[derive(Debug, Clone)]
pub struct MondayConfig {
    pub api_token: Option<String>,
    pub description_column: String,
    pub requester_column: String,
    /// GraphQL endpoint, overridable in tests
    pub api_url: String,
}

impl MondayConfig {
    pub fn is_enabled(&self) -> bool {
        self.api_token.is_some()
    }
}

impl Default for MondayConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            description_column: "descripcion".to_string(),
            requester_column: "solicitante".to_string(),
            api_url: MONDAY_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::level::INFO.to_string(),
            format: crate::logging::format::PRETTY.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Empty and whitespace-only values are treated as unset, so an empty
    /// `TELEGRAM_BOT_TOKEN=` in a unit file disables delivery rather than
    /// producing a bot token that can never authenticate.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut server = ServerConfig::default();
        if let Some(bind) = var("BIND_ADDR") {
            server.bind = bind;
        }
        if let Some(port) = var("PORT") {
            server.port = port.parse().map_err(|_| ConfigError::Invalid {
                message: format!("PORT must be a number between 1 and 65535, got '{}'", port),
            })?;
        }

        let telegram = TelegramConfig {
            bot_token: var("TELEGRAM_BOT_TOKEN"),
            chat_id: var("TELEGRAM_CHAT_ID"),
            parse_mode: var("TELEGRAM_PARSE_MODE"),
            ..TelegramConfig::default()
        };

        let mut monday = MondayConfig {
            api_token: var("MONDAY_API_TOKEN"),
            ..MondayConfig::default()
        };
        if let Some(column) = var("MONDAY_DESCRIPTION_COLUMN") {
            monday.description_column = column;
        }
        if let Some(column) = var("MONDAY_REQUESTER_COLUMN") {
            monday.requester_column = column;
        }

        let mut logging = LoggingConfig::default();
        if let Some(level) = var("LOG_LEVEL") {
            logging.level = level;
        }
        if let Some(format) = var("LOG_FORMAT") {
            logging.format = format;
        }

        Ok(Self {
            server,
            telegram,
            monday,
            logging,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            telegram: TelegramConfig::default(),
            monday: MondayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
