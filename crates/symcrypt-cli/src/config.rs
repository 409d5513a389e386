//! Configuration loading and validation for the symcrypt CLI.
//!
//! Values are read from `SYMCRYPT_*` environment variables so the key never
//! appears on the command line or in shell history.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use symcrypt::Key;

/// Validated CLI configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Hex-encoded key (`SYMCRYPT_KEY_HEX`). Exclusive with `key_file`.
    #[serde(default)]
    pub key_hex: Option<String>,

    /// Path to a file holding the raw key bytes (`SYMCRYPT_KEY_FILE`).
    #[serde(default)]
    pub key_file: Option<PathBuf>,

    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("SYMCRYPT"))
            .build()
            .context("failed to build symcrypt configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise symcrypt configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("SYMCRYPT_LOG_LEVEL must not be empty");
        }
        if self.key_hex.is_some() && self.key_file.is_some() {
            anyhow::bail!("set only one of SYMCRYPT_KEY_HEX and SYMCRYPT_KEY_FILE");
        }
        Ok(())
    }

    /// Resolve the configured key.
    ///
    /// # Errors
    ///
    /// Returns an error if no key source is set, the hex or file cannot be
    /// read, or the key length is not 16, 24 or 32 bytes.
    pub fn load_key(&self) -> Result<Key> {
        let bytes = match (&self.key_hex, &self.key_file) {
            (Some(hex_key), None) => {
                hex::decode(hex_key.trim()).context("SYMCRYPT_KEY_HEX is not valid hex")?
            }
            (None, Some(path)) => std::fs::read(path)
                .with_context(|| format!("failed to read key file {}", path.display()))?,
            (None, None) => anyhow::bail!("SYMCRYPT_KEY_HEX or SYMCRYPT_KEY_FILE is required"),
            (Some(_), Some(_)) => {
                anyhow::bail!("set only one of SYMCRYPT_KEY_HEX and SYMCRYPT_KEY_FILE")
            }
        };
        Key::new(&bytes).context("configured key is unusable")
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("key_hex", &self.key_hex.as_ref().map(|_| "[REDACTED]"))
            .field("key_file", &self.key_file)
            .field("log_level", &self.log_level)
            .finish()
    }
}
