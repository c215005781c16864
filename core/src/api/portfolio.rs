//! Portfolio endpoints: fleet summary, assets, maintenance, assignments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::segment;
use crate::client::ApiClient;
use crate::config::RequestConfig;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total_assets: u32,
    pub operational: u32,
    pub in_maintenance: u32,
    pub total_value: f64,
    pub average_utilization: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Drone,
    Dock,
    Sensor,
    Vehicle,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Drone => "drone",
            AssetKind::Dock => "dock",
            AssetKind::Sensor => "sensor",
            AssetKind::Vehicle => "vehicle",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub kind: AssetKind,
    pub operational: bool,
    pub value: f64,
    pub flight_hours: f64,
    pub acquired_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: String,
    pub asset_id: String,
    pub description: String,
    pub scheduled_for: DateTime<Utc>,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMaintenance {
    pub asset_id: String,
    pub description: String,
    pub scheduled_for: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub asset_id: String,
    pub mission_id: Option<String>,
    pub operator: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// Partial update. Only the fields present in the JSON are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mission_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
}

/// Sub-client for `/portfolio`.
pub struct Portfolio<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Portfolio<'_> {
    pub async fn summary(&self) -> Result<FleetSummary, ApiError> {
        self.client.get("/portfolio/summary", RequestConfig::default()).await?.data.decode()
    }

    pub async fn assets(&self, kind: Option<AssetKind>) -> Result<Vec<Asset>, ApiError> {
        let config = RequestConfig::new().query_opt("kind", kind.map(|k| k.as_str()));
        self.client.get("/portfolio/assets", config).await?.data.decode()
    }

    pub async fn asset(&self, asset_id: &str) -> Result<Asset, ApiError> {
        let path = format!("/portfolio/assets/{}", segment(asset_id));
        self.client.get(&path, RequestConfig::default()).await?.data.decode()
    }

    /// Maintenance records; `upcoming = Some(true)` keeps only open ones.
    pub async fn maintenance(&self, upcoming: Option<bool>) -> Result<Vec<MaintenanceRecord>, ApiError> {
        let config = RequestConfig::new().query_opt("upcoming", upcoming);
        self.client.get("/portfolio/maintenance", config).await?.data.decode()
    }

    pub async fn schedule_maintenance(&self, input: &ScheduleMaintenance) -> Result<MaintenanceRecord, ApiError> {
        self.client
            .post("/portfolio/maintenance", input, RequestConfig::default())
            .await?
            .data
            .decode()
    }

    pub async fn assignments(&self) -> Result<Vec<Assignment>, ApiError> {
        self.client.get("/portfolio/assignments", RequestConfig::default()).await?.data.decode()
    }

    pub async fn update_assignment(&self, assignment_id: &str, input: &UpdateAssignment) -> Result<Assignment, ApiError> {
        let path = format!("/portfolio/assignments/{}", segment(assignment_id));
        self.client.patch(&path, input, RequestConfig::default()).await?.data.decode()
    }
}
