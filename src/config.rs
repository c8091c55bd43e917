//! Service configuration
//!
//! Everything comes from environment variables (a `.env` file is honored)
//! with working defaults, so the server runs with no configuration at all.

use std::env;
use std::time::Duration;

/// Default endpoint for the live grid carbon-intensity lookup.
pub const DEFAULT_INTENSITY_URL: &str = "https://api.carbonintensity.org.uk/intensity";

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_INTENSITY_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server binds on.
    pub port: u16,
    /// Carbon-intensity API endpoint.
    pub intensity_url: String,
    /// Bound on the outbound intensity fetch.
    pub intensity_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            intensity_url: DEFAULT_INTENSITY_URL.to_string(),
            intensity_timeout: Duration::from_secs(DEFAULT_INTENSITY_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT value '{}': {}", raw, e))?,
            Err(_) => DEFAULT_PORT,
        };

        let intensity_timeout = match env::var("INTENSITY_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse()
                    .map_err(|e| anyhow::anyhow!("Invalid INTENSITY_TIMEOUT_SECS '{}': {}", raw, e))?,
            ),
            Err(_) => Duration::from_secs(DEFAULT_INTENSITY_TIMEOUT_SECS),
        };

        Ok(Self {
            port,
            intensity_url: env::var("CARBON_INTENSITY_URL")
                .unwrap_or_else(|_| DEFAULT_INTENSITY_URL.to_string()),
            intensity_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.intensity_url, DEFAULT_INTENSITY_URL);
        assert_eq!(config.intensity_timeout, Duration::from_secs(5));
    }
}
