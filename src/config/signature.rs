//! Signature validation configuration.

use crate::config::ConfigError;
use std::{env, fmt, time::Duration};

/// Acceptance window used when no explicit window is configured
pub const DEFAULT_VALIDITY_WINDOW: Duration = Duration::from_secs(5);

/// Shared secret used to sign and verify webhook requests
///
/// The key bytes never leave this type through `Debug`, and it does not
/// implement `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey([REDACTED])")
    }
}

impl From<&str> for SigningKey {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl From<String> for SigningKey {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl From<Vec<u8>> for SigningKey {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

impl From<&[u8]> for SigningKey {
    fn from(value: &[u8]) -> Self {
        Self::new(value)
    }
}

/// Configuration for webhook signature validation
#[derive(Clone, Debug)]
pub struct SignatureConfig {
    pub signing_key: SigningKey,
    /// `None` turns the timestamp freshness check off.
    pub validity_window: Option<Duration>,
}

impl SignatureConfig {
    /// Configuration with the default acceptance window
    pub fn new(signing_key: impl Into<SigningKey>) -> Self {
        Self {
            signing_key: signing_key.into(),
            validity_window: Some(DEFAULT_VALIDITY_WINDOW),
        }
    }

    /// Load configuration from environment variables
    ///
    /// `WEBHOOK_SIGNING_KEY` is required. `WEBHOOK_VALIDITY_WINDOW` is a number
    /// of seconds; `0`, `off`, `none` or `disabled` turn freshness checking off.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`SignatureConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let signing_key = lookup("WEBHOOK_SIGNING_KEY")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVariable("WEBHOOK_SIGNING_KEY"))?;

        let validity_window = match lookup("WEBHOOK_VALIDITY_WINDOW") {
            None => Some(DEFAULT_VALIDITY_WINDOW),
            Some(raw) => parse_window(&raw)?,
        };

        Ok(Self {
            signing_key: signing_key.into(),
            validity_window,
        })
    }
}

fn parse_window(raw: &str) -> Result<Option<Duration>, ConfigError> {
    let value = raw.trim().to_lowercase();
    match value.as_str() {
        "" => Ok(Some(DEFAULT_VALIDITY_WINDOW)),
        "0" | "off" | "none" | "disabled" => Ok(None),
        _ => value
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| ConfigError::InvalidValue {
                name: "WEBHOOK_VALIDITY_WINDOW",
                value: raw.to_string(),
            }),
    }
}
