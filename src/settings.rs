//! # Tax Settings
//!
//! The GST rate lives in an externally owned `settings` collection. The engine only
//! reads it, through [`TaxSettings`], and falls back to the configured default when the
//! collaborator cannot answer.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SettingsError {
    #[error("Settings unavailable: {0}")]
    Unavailable(String),
}

/// Source of the GST percentage applied at settlement.
#[async_trait]
pub trait TaxSettings: Send + Sync {
    /// GST as a percentage (`18` means 18%).
    async fn gst_rate(&self) -> Result<Decimal, SettingsError>;
}

/// A rate that never changes. Used by the demo and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedTaxRate(pub Decimal);

#[async_trait]
impl TaxSettings for FixedTaxRate {
    async fn gst_rate(&self) -> Result<Decimal, SettingsError> {
        Ok(self.0)
    }
}

/// Reads the rate from `settings`, or returns `fallback` if that fails or the stored
/// value is negative.
pub async fn gst_rate_or(settings: &dyn TaxSettings, fallback: Decimal) -> Decimal {
    match settings.gst_rate().await {
        Ok(rate) if !rate.is_sign_negative() => rate,
        Ok(rate) => {
            warn!(%rate, %fallback, "Negative GST rate in settings, using fallback");
            fallback
        }
        Err(e) => {
            warn!(error = %e, %fallback, "GST rate unavailable, using fallback");
            fallback
        }
    }
}
