use anyhow::Context;
use rust_decimal::Decimal;
use std::env;

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// GST percentage used when the settings collaborator cannot be read.
    pub default_gst_rate: Decimal,
    /// Request buffer of each collection actor.
    pub channel_buffer: usize,
    /// Length of the reception "recent orders" list.
    pub recent_orders: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_gst_rate: Decimal::new(5, 0),
            channel_buffer: 32,
            recent_orders: 10,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let default_gst_rate = match env::var("TABLESIDE_DEFAULT_GST_RATE") {
            Ok(raw) => raw
                .trim()
                .parse::<Decimal>()
                .with_context(|| format!("TABLESIDE_DEFAULT_GST_RATE is not a number: {raw}"))?,
            Err(_) => defaults.default_gst_rate,
        };
        if default_gst_rate.is_sign_negative() {
            anyhow::bail!("TABLESIDE_DEFAULT_GST_RATE must not be negative");
        }

        let channel_buffer = env::var("TABLESIDE_CHANNEL_BUFFER")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(defaults.channel_buffer);
        let recent_orders = env::var("TABLESIDE_RECENT_ORDERS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.recent_orders);

        Ok(Self {
            default_gst_rate,
            channel_buffer,
            recent_orders,
        })
    }
}
