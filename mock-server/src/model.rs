//! Wire types served by the mock backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DroneStatus {
    Idle,
    InFlight,
    Charging,
    Maintenance,
    Offline,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    Planned,
    Active,
    Paused,
    Completed,
    Aborted,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Drone,
    Dock,
    Sensor,
    Vehicle,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeoPosition {
    pub lat: f64,
    pub lon: f64,
    pub altitude_m: f64,
}

// --- dashboard ---

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub total_drones: u32,
    pub active_drones: u32,
    pub active_missions: u32,
    pub open_alerts: u32,
    pub fleet_utilization: f64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drone {
    pub id: String,
    pub callsign: String,
    pub status: DroneStatus,
    pub battery_pct: f64,
    pub position: GeoPosition,
    pub mission_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryPoint {
    pub timestamp: DateTime<Utc>,
    pub position: GeoPosition,
    pub speed_mps: f64,
    pub battery_pct: f64,
    pub signal_strength: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionSummary {
    pub id: String,
    pub name: String,
    pub status: MissionStatus,
    pub drone_id: Option<String>,
    pub progress_pct: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub severity: Severity,
    pub message: String,
    pub drone_id: Option<String>,
    pub raised_at: DateTime<Utc>,
    pub acknowledged: bool,
}

// --- execution ---

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: String,
    pub name: String,
    pub status: MissionStatus,
    pub drone_id: Option<String>,
    pub waypoints: Vec<GeoPosition>,
    pub progress_pct: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMission {
    pub name: String,
    pub drone_id: Option<String>,
    #[serde(default)]
    pub waypoints: Vec<GeoPosition>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMission {
    pub name: Option<String>,
    pub drone_id: Option<String>,
    pub waypoints: Option<Vec<GeoPosition>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DroneCommand {
    ReturnToBase,
    Hold,
    Land,
    Goto { target: GeoPosition },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandAck {
    pub command_id: String,
    pub drone_id: String,
    pub accepted: bool,
    pub issued_at: DateTime<Utc>,
}

// --- market ---

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStat {
    pub region: String,
    pub value: f64,
    pub growth_pct: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOverview {
    pub total_addressable_value: f64,
    pub active_opportunities: u32,
    pub win_rate: f64,
    pub regions: Vec<RegionStat>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: String,
    pub title: String,
    pub region: String,
    pub customer_id: String,
    pub estimated_value: f64,
    pub probability: f64,
    pub closes_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub segment: String,
    pub annual_spend: f64,
    pub active_contracts: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub service: String,
    pub region: String,
    pub flight_hours: f64,
    pub drones: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub service: String,
    pub region: String,
    pub unit_price: f64,
    pub total: f64,
    pub currency: String,
    pub valid_until: DateTime<Utc>,
}

// --- news ---

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub category: String,
    pub severity: Severity,
    pub published_at: DateTime<Utc>,
    pub url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPage {
    pub items: Vec<NewsArticle>,
    pub total: u32,
    pub limit: u32,
    pub offset: u32,
}

// --- portfolio ---

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total_assets: u32,
    pub operational: u32,
    pub in_maintenance: u32,
    pub total_value: f64,
    pub average_utilization: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
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

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: String,
    pub asset_id: String,
    pub description: String,
    pub scheduled_for: DateTime<Utc>,
    pub completed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMaintenance {
    pub asset_id: String,
    pub description: String,
    pub scheduled_for: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub asset_id: String,
    pub mission_id: Option<String>,
    pub operator: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignment {
    pub mission_id: Option<String>,
    pub operator: Option<String>,
    pub ends_at: Option<DateTime<Utc>>,
}
