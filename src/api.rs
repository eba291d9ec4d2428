//! JSON API consumed by the dashboard page

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::pipeline::{DashboardSnapshot, Pipeline};
use crate::zones::ZoneReading;

#[derive(Serialize, Deserialize)]
pub struct ApiZone {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
    pub color: String,
    pub size: u32,
}

impl From<&ZoneReading> for ApiZone {
    fn from(reading: &ZoneReading) -> Self {
        Self {
            name: reading.zone.name.to_string(),
            latitude: reading.zone.latitude,
            longitude: reading.zone.longitude,
            label: reading.label.to_string(),
            color: reading.label.color_hex().to_string(),
            size: reading.display_size,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ApiDashboard {
    pub city: String,
    pub city_label: String,
    pub banner_color: String,
    pub temperature_c: f64,
    pub zone_count: usize,
    pub updated_at: String,
    pub refresh_interval_seconds: u64,
    pub zones: Vec<ApiZone>,
}

impl From<&DashboardSnapshot> for ApiDashboard {
    fn from(snapshot: &DashboardSnapshot) -> Self {
        Self {
            city: snapshot.city.clone(),
            city_label: snapshot.city_label.to_string(),
            banner_color: snapshot.city_label.color_hex().to_string(),
            temperature_c: snapshot.temperature_c,
            zone_count: snapshot.zone_count,
            updated_at: snapshot.updated_at.clone(),
            refresh_interval_seconds: snapshot.refresh_interval_seconds,
            zones: snapshot.zones.iter().map(ApiZone::from).collect(),
        }
    }
}

pub fn router(pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .with_state(pipeline)
}

/// Run one refresh cycle and return everything the page renders.
///
/// A failed fetch yields 502 with an inline error message and no snapshot
/// fields, so the page shows the error indicator instead of a stale banner.
async fn get_dashboard(
    State(pipeline): State<Arc<Pipeline>>,
) -> Result<Json<ApiDashboard>, (StatusCode, Json<Value>)> {
    match pipeline.run_cycle().await {
        Ok(snapshot) => Ok(Json(ApiDashboard::from(&snapshot))),
        Err(err) => {
            tracing::warn!(error = %err, "Refresh cycle failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": err.user_message() })),
            ))
        }
    }
}
