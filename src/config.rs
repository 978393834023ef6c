//! Runtime configuration
//!
//! Everything is read from environment variables. Bot credentials only ever
//! live on the server side.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;
use crate::models::{ContactField, PaymentMethod};

/// Receiving addresses shown on the payment step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallets {
    pub bitcoin: String,
    pub ethereum: String,
}

impl Wallets {
    pub fn address(&self, method: PaymentMethod) -> &str {
        match method {
            PaymentMethod::Bitcoin => &self.bitcoin,
            PaymentMethod::Ethereum => &self.ethereum,
        }
    }
}

impl Default for Wallets {
    fn default() -> Self {
        Self {
            bitcoin: "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh".to_string(),
            ethereum: "0x71C7656EC7ab88b098defB751B7401B5f6d8976F".to_string(),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub api_base: String,
}

// Keeps the token out of logs.
impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationMode {
    Simulated { delay: Duration },
    Telegram(TelegramConfig),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub notification: NotificationMode,
    pub required_fields: Vec<ContactField>,
    pub wallets: Wallets,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            notification: NotificationMode::Simulated {
                delay: Duration::from_millis(1000),
            },
            required_fields: vec![ContactField::Name, ContactField::Email],
            wallets: Wallets::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let notification = match get("NOTIFICATION_MODE").as_deref().map(str::trim) {
            None | Some("simulated") => {
                let delay = match get("SIMULATED_DELAY_MS") {
                    Some(raw) => raw.trim().parse::<u64>().map(Duration::from_millis).map_err(|e| {
                        ConfigError::Invalid {
                            key: "SIMULATED_DELAY_MS",
                            reason: e.to_string(),
                        }
                    })?,
                    None => Duration::from_millis(1000),
                };
                NotificationMode::Simulated { delay }
            }
            Some("telegram") => NotificationMode::Telegram(TelegramConfig {
                bot_token: get("TELEGRAM_BOT_TOKEN")
                    .ok_or(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))?,
                chat_id: get("TELEGRAM_CHAT_ID").ok_or(ConfigError::Missing("TELEGRAM_CHAT_ID"))?,
                api_base: get("TELEGRAM_API_BASE")
                    .unwrap_or_else(|| "https://api.telegram.org".to_string())
                    .trim_end_matches('/')
                    .to_string(),
            }),
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "NOTIFICATION_MODE",
                    reason: format!("expected `simulated` or `telegram`, got `{other}`"),
                });
            }
        };

        let required_fields = match get("REQUIRED_CONTACT_FIELDS") {
            Some(raw) => parse_required_fields(&raw)?,
            None => defaults.required_fields,
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            notification,
            required_fields,
            wallets: Wallets {
                bitcoin: get("BITCOIN_WALLET").unwrap_or(defaults.wallets.bitcoin),
                ethereum: get("ETHEREUM_WALLET").unwrap_or(defaults.wallets.ethereum),
            },
        })
    }
}

fn parse_required_fields(raw: &str) -> Result<Vec<ContactField>, ConfigError> {
    let mut fields = Vec::new();
    for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let field = part.parse::<ContactField>().map_err(|reason| ConfigError::Invalid {
            key: "REQUIRED_CONTACT_FIELDS",
            reason,
        })?;
        if !fields.contains(&field) {
            fields.push(field);
        }
    }
    Ok(fields)
}
