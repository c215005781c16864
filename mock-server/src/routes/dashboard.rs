use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::model::*;
use crate::store::Db;
use crate::AppError;

const DEFAULT_TELEMETRY_POINTS: usize = 10;
const MAX_TELEMETRY_POINTS: usize = 100;

pub fn router() -> Router<Db> {
    Router::new()
        .route("/dashboard/overview", get(overview))
        .route("/dashboard/drones", get(list_drones))
        .route("/dashboard/drones/{id}/telemetry", get(telemetry))
        .route("/dashboard/missions", get(list_missions))
        .route("/dashboard/alerts", get(list_alerts))
        .route("/dashboard/alerts/{id}/acknowledge", post(acknowledge_alert))
}

async fn overview(State(db): State<Db>) -> Json<DashboardOverview> {
    let store = db.read().await;
    let total = store.drones.len() as u32;
    let active = store
        .drones
        .iter()
        .filter(|d| d.status == DroneStatus::InFlight)
        .count() as u32;
    Json(DashboardOverview {
        total_drones: total,
        active_drones: active,
        active_missions: store
            .missions
            .iter()
            .filter(|m| m.status == MissionStatus::Active)
            .count() as u32,
        open_alerts: store.alerts.iter().filter(|a| !a.acknowledged).count() as u32,
        fleet_utilization: if total == 0 { 0.0 } else { f64::from(active) / f64::from(total) },
        updated_at: Utc::now(),
    })
}

#[derive(Deserialize)]
struct DroneFilter {
    status: Option<DroneStatus>,
}

async fn list_drones(State(db): State<Db>, Query(filter): Query<DroneFilter>) -> Json<Vec<Drone>> {
    let store = db.read().await;
    Json(
        store
            .drones
            .iter()
            .filter(|d| filter.status.map_or(true, |s| d.status == s))
            .cloned()
            .collect(),
    )
}

#[derive(Deserialize)]
struct Limit {
    limit: Option<usize>,
}

/// Synthetic track: `limit` points one minute apart ending now, drifting
/// north-east from the drone's current position.
async fn telemetry(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(query): Query<Limit>,
) -> Result<Json<Vec<TelemetryPoint>>, AppError> {
    let store = db.read().await;
    let drone = store.drone(&id).ok_or(AppError::NotFound)?;
    let count = query
        .limit
        .unwrap_or(DEFAULT_TELEMETRY_POINTS)
        .min(MAX_TELEMETRY_POINTS);
    let now = Utc::now();
    let flying = drone.status == DroneStatus::InFlight;

    let points = (0..count)
        .map(|i| {
            let age = (count - 1 - i) as i64;
            let drift = if flying { age as f64 * -0.0005 } else { 0.0 };
            TelemetryPoint {
                timestamp: now - Duration::minutes(age),
                position: GeoPosition {
                    lat: drone.position.lat + drift,
                    lon: drone.position.lon + drift,
                    altitude_m: drone.position.altitude_m,
                },
                speed_mps: if flying { 14.0 } else { 0.0 },
                battery_pct: (drone.battery_pct + age as f64 * 0.2).min(100.0),
                signal_strength: if drone.status == DroneStatus::Offline { 0.0 } else { 0.92 },
            }
        })
        .collect();
    Ok(Json(points))
}

#[derive(Deserialize)]
struct MissionFilter {
    status: Option<MissionStatus>,
    limit: Option<usize>,
}

async fn list_missions(State(db): State<Db>, Query(filter): Query<MissionFilter>) -> Json<Vec<MissionSummary>> {
    let store = db.read().await;
    Json(
        store
            .missions
            .iter()
            .filter(|m| filter.status.map_or(true, |s| m.status == s))
            .take(filter.limit.unwrap_or(usize::MAX))
            .map(|m| MissionSummary {
                id: m.id.clone(),
                name: m.name.clone(),
                status: m.status,
                drone_id: m.drone_id.clone(),
                progress_pct: m.progress_pct,
            })
            .collect(),
    )
}

#[derive(Deserialize)]
struct AlertFilter {
    severity: Option<Severity>,
    acknowledged: Option<bool>,
}

async fn list_alerts(State(db): State<Db>, Query(filter): Query<AlertFilter>) -> Json<Vec<Alert>> {
    let store = db.read().await;
    Json(
        store
            .alerts
            .iter()
            .filter(|a| filter.severity.map_or(true, |s| a.severity == s))
            .filter(|a| filter.acknowledged.map_or(true, |ack| a.acknowledged == ack))
            .cloned()
            .collect(),
    )
}

async fn acknowledge_alert(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Alert>, AppError> {
    let mut store = db.write().await;
    let alert = store
        .alerts
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or(AppError::NotFound)?;
    alert.acknowledged = true;
    Ok(Json(alert.clone()))
}
