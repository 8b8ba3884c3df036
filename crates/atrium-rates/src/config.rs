//! # Rate Shopping Configuration
//!
//! Configuration for the provider fan-out. There is deliberately little
//! of it: one bound on how long checkout will wait for carriers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// =============================================================================
// Constants
// =============================================================================

/// Default global timeout for one rate-shopping round (seconds).
///
/// Checkout blocks on this; carriers that answer later are discarded.
pub const DEFAULT_SHOP_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Configuration
// =============================================================================

/// Rate shopper settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateShopConfig {
    /// Global timeout for the whole fan-out (seconds). Providers that
    /// have not settled by then do not participate in the minimum.
    #[serde(default = "default_shop_timeout")]
    pub shop_timeout_secs: u64,
}

impl RateShopConfig {
    /// The timeout as a `Duration`.
    pub fn shop_timeout(&self) -> Duration {
        Duration::from_secs(self.shop_timeout_secs)
    }
}

fn default_shop_timeout() -> u64 {
    DEFAULT_SHOP_TIMEOUT_SECS
}

impl Default for RateShopConfig {
    fn default() -> Self {
        RateShopConfig {
            shop_timeout_secs: default_shop_timeout(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        let config = RateShopConfig::default();
        assert_eq!(config.shop_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: RateShopConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.shop_timeout_secs, DEFAULT_SHOP_TIMEOUT_SECS);
    }
}
