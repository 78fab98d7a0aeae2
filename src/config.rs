//! Server and mail transport configuration parsed from environment variables.
//!
//! Parsing goes through a lookup closure so tests can feed a map instead of
//! mutating the process environment.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_WEBSITE_DIR: &str = "public";
pub const DEFAULT_FROM_NAME: &str = "Levantiq Web";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required variable {var}")]
    Missing { var: &'static str },
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

// =============================================================================
// SERVER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub website_dir: PathBuf,
}

impl ServerConfig {
    /// Build server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `WEBSITE_DIR`: static site root, default `public`
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build server config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is not a valid port number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_port(non_empty(&lookup, "PORT"), "PORT", DEFAULT_PORT)?;
        let website_dir = non_empty(&lookup, "WEBSITE_DIR").map_or_else(|| PathBuf::from(DEFAULT_WEBSITE_DIR), PathBuf::from);
        Ok(Self { port, website_dir })
    }
}

// =============================================================================
// MAIL
// =============================================================================

/// SMTP relay settings. `secure` selects implicit TLS (typically port 465);
/// otherwise the connection is upgraded with STARTTLS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub user: String,
    pub pass: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportConfig {
    Smtp(SmtpConfig),
    Resend { api_key: String },
}

impl TransportConfig {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Smtp(_) => "smtp",
            Self::Resend { .. } => "resend",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub transport: TransportConfig,
    /// Sender mailbox, e.g. `"Levantiq Web" <web@levantiq.com>`.
    pub from: String,
    /// Final recipient of every contact submission.
    pub to: String,
}

impl MailConfig {
    /// Build typed mail config from environment variables.
    ///
    /// Required:
    /// - `TO_EMAIL`
    /// - `SMTP_HOST`, `SMTP_USER`, `SMTP_PASS` unless `RESEND_API_KEY` is set
    ///
    /// Optional:
    /// - `SMTP_PORT`: default 587
    /// - `SMTP_SECURE`: `true` for implicit TLS, default `false`
    /// - `MAIL_FROM`: sender mailbox, defaults to `"Levantiq Web" <SMTP_USER>`
    ///   (required with Resend)
    /// - `RESEND_API_KEY`: send through the Resend HTTP API instead of SMTP
    ///
    /// # Errors
    ///
    /// Returns an error when a required variable is missing or malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed mail config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error when a required variable is missing or malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let to = require(&lookup, "TO_EMAIL")?;

        let transport = if let Some(api_key) = non_empty(&lookup, "RESEND_API_KEY") {
            TransportConfig::Resend { api_key }
        } else {
            TransportConfig::Smtp(SmtpConfig {
                host: require(&lookup, "SMTP_HOST")?,
                port: parse_port(non_empty(&lookup, "SMTP_PORT"), "SMTP_PORT", DEFAULT_SMTP_PORT)?,
                secure: parse_bool(non_empty(&lookup, "SMTP_SECURE"), "SMTP_SECURE")?,
                user: require(&lookup, "SMTP_USER")?,
                pass: require(&lookup, "SMTP_PASS")?,
            })
        };

        let from = match (non_empty(&lookup, "MAIL_FROM"), &transport) {
            (Some(from), _) => from,
            (None, TransportConfig::Smtp(smtp)) => format!("\"{DEFAULT_FROM_NAME}\" <{}>", smtp.user),
            (None, TransportConfig::Resend { .. }) => return Err(ConfigError::Missing { var: "MAIL_FROM" }),
        };

        Ok(Self { transport, from, to })
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| raw.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn require<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, key).ok_or(ConfigError::Missing { var: key })
}

fn parse_port(raw: Option<String>, var: &'static str, default: u16) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => match value.parse::<u16>() {
            Ok(port) if port > 0 => Ok(port),
            _ => Err(ConfigError::Invalid { var, value }),
        },
    }
}

pub(crate) fn parse_bool(raw: Option<String>, var: &'static str) -> Result<bool, ConfigError> {
    let Some(value) = raw else {
        return Ok(false);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { var, value }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
