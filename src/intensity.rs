//! Live carbon-intensity lookup
//!
//! Fetches the current grid carbon intensity (gCO2 per kWh) from an external
//! API and converts it to a kg CO2e/kWh electricity factor. The lookup is
//! best-effort with a bounded timeout: any failure degrades to the static
//! default factor and the report still completes.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::factors::DEFAULT_ELECTRICITY_FACTOR;

#[derive(Debug, Error)]
pub enum IntensityError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("no intensity reading in response")]
    MissingReading,
}

/// Electricity factor resolved for a single report, kg CO2e per kWh.
///
/// Distinguishes a live grid reading from the static fallback so the report
/// can say which one it used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElectricityFactor {
    /// Derived from a live grid reading.
    Live(f64),
    /// Static default, used when the lookup fails.
    Fallback(f64),
}

impl ElectricityFactor {
    pub fn value(self) -> f64 {
        match self {
            ElectricityFactor::Live(v) | ElectricityFactor::Fallback(v) => v,
        }
    }

    pub fn is_live(self) -> bool {
        matches!(self, ElectricityFactor::Live(_))
    }
}

// Expected shape: {"data": [{"intensity": {"actual": <number|null>}}]}
#[derive(Deserialize)]
struct IntensityResponse {
    data: Vec<IntensityEntry>,
}

#[derive(Deserialize)]
struct IntensityEntry {
    intensity: IntensityReading,
}

#[derive(Deserialize)]
struct IntensityReading {
    actual: Option<f64>,
}

/// Client for the carbon-intensity API.
pub struct IntensityClient {
    client: Client,
    url: String,
}

impl IntensityClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            url: url.into(),
        }
    }

    /// Resolve the electricity factor for one report.
    ///
    /// Never errors: network failures, timeouts, non-2xx statuses, and
    /// malformed or null readings all fall back to the static default.
    pub async fn resolve_electricity_factor(&self) -> ElectricityFactor {
        match self.fetch_live().await {
            Ok(kg_per_kwh) => {
                debug!("Live grid intensity: {:.3} kg CO2e/kWh", kg_per_kwh);
                ElectricityFactor::Live(kg_per_kwh)
            }
            Err(e) => {
                warn!("Carbon-intensity lookup failed, using default factor: {}", e);
                ElectricityFactor::Fallback(DEFAULT_ELECTRICITY_FACTOR)
            }
        }
    }

    async fn fetch_live(&self) -> Result<f64, IntensityError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(IntensityError::Status(response.status()));
        }
        let body: IntensityResponse = response.json().await?;
        let actual = body
            .data
            .first()
            .and_then(|entry| entry.intensity.actual)
            .ok_or(IntensityError::MissingReading)?;
        // gCO2 -> kgCO2
        Ok(actual / 1000.0)
    }
}
