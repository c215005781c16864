//! Dashboard endpoints: fleet overview, drones, telemetry, missions, alerts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::segment;
use crate::client::ApiClient;
use crate::config::RequestConfig;
use crate::error::ApiError;
use crate::types::{DroneStatus, GeoPosition, MissionStatus, Severity};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub total_drones: u32,
    pub active_drones: u32,
    pub active_missions: u32,
    pub open_alerts: u32,
    /// Share of the fleet currently in flight, 0.0..=1.0.
    pub fleet_utilization: f64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DroneSummary {
    pub id: String,
    pub callsign: String,
    pub status: DroneStatus,
    pub battery_pct: f64,
    pub position: GeoPosition,
    pub mission_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryPoint {
    pub timestamp: DateTime<Utc>,
    pub position: GeoPosition,
    pub speed_mps: f64,
    pub battery_pct: f64,
    pub signal_strength: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MissionSummary {
    pub id: String,
    pub name: String,
    pub status: MissionStatus,
    pub drone_id: Option<String>,
    pub progress_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub severity: Severity,
    pub message: String,
    pub drone_id: Option<String>,
    pub raised_at: DateTime<Utc>,
    pub acknowledged: bool,
}

/// Sub-client for `/dashboard`.
pub struct Dashboard<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Dashboard<'_> {
    pub async fn overview(&self) -> Result<DashboardOverview, ApiError> {
        self.client
            .get("/dashboard/overview", RequestConfig::default())
            .await?
            .data
            .decode()
    }

    pub async fn drones(&self, status: Option<DroneStatus>) -> Result<Vec<DroneSummary>, ApiError> {
        let config = RequestConfig::new().query_opt("status", status.map(|s| s.as_str()));
        self.client.get("/dashboard/drones", config).await?.data.decode()
    }

    pub async fn telemetry(&self, drone_id: &str, limit: Option<u32>) -> Result<Vec<TelemetryPoint>, ApiError> {
        let path = format!("/dashboard/drones/{}/telemetry", segment(drone_id));
        let config = RequestConfig::new().query_opt("limit", limit);
        self.client.get(&path, config).await?.data.decode()
    }

    pub async fn missions(
        &self,
        status: Option<MissionStatus>,
        limit: Option<u32>,
    ) -> Result<Vec<MissionSummary>, ApiError> {
        let config = RequestConfig::new()
            .query_opt("status", status.map(|s| s.as_str()))
            .query_opt("limit", limit);
        self.client.get("/dashboard/missions", config).await?.data.decode()
    }

    pub async fn alerts(&self, severity: Option<Severity>, acknowledged: Option<bool>) -> Result<Vec<Alert>, ApiError> {
        let config = RequestConfig::new()
            .query_opt("severity", severity.map(|s| s.as_str()))
            .query_opt("acknowledged", acknowledged);
        self.client.get("/dashboard/alerts", config).await?.data.decode()
    }

    pub async fn acknowledge_alert(&self, alert_id: &str) -> Result<Alert, ApiError> {
        let path = format!("/dashboard/alerts/{}/acknowledge", segment(alert_id));
        self.client
            .post(&path, &serde_json::json!({}), RequestConfig::default())
            .await?
            .data
            .decode()
    }
}
