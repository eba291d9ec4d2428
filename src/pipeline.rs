//! One refresh cycle: fetch -> build features -> predict -> simulate zones
//!
//! Each cycle is independent and runs to completion or failure; there is no
//! memory of the previous cycle and no partial result on a failed fetch.

use std::sync::Arc;

use chrono::Local;
use serde::Serialize;

use crate::Result;
use crate::classifier::{Classifier, CongestionLabel};
use crate::config::TrafficAiConfig;
use crate::features::FeatureRecord;
use crate::weather::WeatherProvider;
use crate::zones::{self, ZONES, ZoneReading};

/// Everything the dashboard page needs for one cycle.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub city: String,
    pub city_label: CongestionLabel,
    pub temperature_c: f64,
    pub zone_count: usize,
    /// Wall-clock time of this cycle, formatted HH:MM:SS
    pub updated_at: String,
    pub refresh_interval_seconds: u64,
    pub zones: Vec<ZoneReading>,
}

/// The dashboard pipeline with its injected collaborators.
///
/// The weather provider and the classifier are passed in explicitly; the
/// classifier handle is loaded once at startup and treated as immutable.
pub struct Pipeline {
    provider: Arc<dyn WeatherProvider>,
    classifier: Arc<dyn Classifier>,
    city: String,
    refresh_interval_seconds: u64,
}

impl Pipeline {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        classifier: Arc<dyn Classifier>,
        config: &TrafficAiConfig,
    ) -> Self {
        Self {
            provider,
            classifier,
            city: config.weather.city.clone(),
            refresh_interval_seconds: config.server.refresh_interval_seconds,
        }
    }

    /// Run one full refresh cycle.
    ///
    /// A failed fetch aborts the cycle; the caller surfaces the error and the
    /// next scheduled or manual refresh retries independently.
    #[tracing::instrument(name = "refresh_cycle", skip(self), fields(city = %self.city))]
    pub async fn run_cycle(&self) -> Result<DashboardSnapshot> {
        let reading = self.provider.fetch().await?;

        let now = Local::now();
        let record = FeatureRecord::build(&reading, now.naive_local());
        let city_label = self.classifier.predict(&record);

        let zone_readings = zones::simulate(city_label, &ZONES, &mut rand::rng());

        tracing::info!(
            %city_label,
            temperature = reading.temperature,
            zones = zone_readings.len(),
            "Refresh cycle complete"
        );

        Ok(DashboardSnapshot {
            city: self.city.clone(),
            city_label,
            temperature_c: reading.temperature,
            zone_count: zone_readings.len(),
            updated_at: now.format("%H:%M:%S").to_string(),
            refresh_interval_seconds: self.refresh_interval_seconds,
            zones: zone_readings,
        })
    }
}
