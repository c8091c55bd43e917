//! Carbonscope - carbon footprint report service
//!
//! Estimates household emissions from submitted activity quantities:
//! - Safe parsing of free-text form input (bad input counts as zero)
//! - Live grid carbon-intensity lookup with a static fallback
//! - Per-category aggregation (energy, transport, waste) and a grand total
//! - A plain-language insight naming the dominant category

pub mod config;
pub mod factors;
pub mod intensity;
pub mod report;
pub mod sanitize;
pub mod server;

// Re-exports for convenience
pub use config::Config;
pub use factors::{ActivityKind, Category, EmissionFactors};
pub use intensity::{ElectricityFactor, IntensityClient};
pub use report::{ActivityInputs, CategoryTotals, Report};
