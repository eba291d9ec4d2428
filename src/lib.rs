//! `TrafficAI` - Live city traffic congestion dashboard
//!
//! This library provides the core functionality for the dashboard: fetching
//! current weather, deriving time-of-day features, classifying the city-wide
//! congestion level with a pre-trained model and simulating per-zone readings
//! for the map display.

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod features;
pub mod pipeline;
pub mod weather;
pub mod web;
pub mod zones;

// Re-export core types for public API
pub use classifier::{ArtifactClassifier, Classifier, CongestionLabel};
pub use config::TrafficAiConfig;
pub use error::TrafficAiError;
pub use features::FeatureRecord;
pub use pipeline::{DashboardSnapshot, Pipeline};
pub use weather::{OpenWeatherClient, WeatherProvider, WeatherReading};
pub use zones::{ZONES, Zone, ZoneReading};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TrafficAiError>;
