//! Configuration loading and representation.
//!
//! Everything is read from `SERVICEBILL_*` environment variables; unset
//! variables fall back to defaults.

use servicebill_invoicing::DEFAULT_INVOICE_PREFIX;

use crate::error::StoreError;
use crate::preferences::DEFAULT_LOGO_MAX_BYTES;

pub const LOGO_MAX_BYTES_VAR: &str = "SERVICEBILL_LOGO_MAX_BYTES";
pub const INVOICE_PREFIX_VAR: &str = "SERVICEBILL_INVOICE_PREFIX";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Largest accepted branding logo, in decoded bytes.
    pub logo_max_bytes: usize,
    /// Prefix used when (re)numbering invoices.
    pub invoice_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logo_max_bytes: DEFAULT_LOGO_MAX_BYTES,
            invoice_prefix: DEFAULT_INVOICE_PREFIX.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, StoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StoreError> {
        let mut config = Self::default();

        match lookup(LOGO_MAX_BYTES_VAR) {
            Some(raw) => {
                config.logo_max_bytes = raw.trim().parse().map_err(|e| {
                    StoreError::Config(format!("{LOGO_MAX_BYTES_VAR}={raw:?}: {e}"))
                })?;
            }
            None => {
                tracing::debug!(
                    default = config.logo_max_bytes,
                    "{LOGO_MAX_BYTES_VAR} not set; using default"
                );
            }
        }

        if let Some(raw) = lookup(INVOICE_PREFIX_VAR) {
            let prefix = raw.trim();
            if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(StoreError::Config(format!(
                    "{INVOICE_PREFIX_VAR}={raw:?}: expected ASCII letters/digits"
                )));
            }
            config.invoice_prefix = prefix.to_string();
        }

        Ok(config)
    }
}
