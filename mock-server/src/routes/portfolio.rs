use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;

use crate::model::*;
use crate::store::Db;
use crate::AppError;

pub fn router() -> Router<Db> {
    Router::new()
        .route("/portfolio/summary", get(summary))
        .route("/portfolio/assets", get(list_assets))
        .route("/portfolio/assets/{id}", get(get_asset))
        .route(
            "/portfolio/maintenance",
            get(list_maintenance).post(schedule_maintenance),
        )
        .route("/portfolio/assignments", get(list_assignments))
        .route("/portfolio/assignments/{id}", patch(update_assignment))
}

async fn summary(State(db): State<Db>) -> Json<FleetSummary> {
    let store = db.read().await;
    let total = store.assets.len() as u32;
    let operational = store.assets.iter().filter(|a| a.operational).count() as u32;
    let in_maintenance = store
        .assets
        .iter()
        .filter(|a| {
            store
                .maintenance
                .iter()
                .any(|m| !m.completed && m.asset_id == a.id)
        })
        .count() as u32;
    let drones = store.drones.len();
    let flying = store
        .drones
        .iter()
        .filter(|d| d.status == DroneStatus::InFlight)
        .count();
    Json(FleetSummary {
        total_assets: total,
        operational,
        in_maintenance,
        total_value: store.assets.iter().map(|a| a.value).sum(),
        average_utilization: if drones == 0 { 0.0 } else { flying as f64 / drones as f64 },
    })
}

#[derive(Deserialize)]
struct AssetFilter {
    kind: Option<AssetKind>,
}

async fn list_assets(State(db): State<Db>, Query(filter): Query<AssetFilter>) -> Json<Vec<Asset>> {
    let store = db.read().await;
    Json(
        store
            .assets
            .iter()
            .filter(|a| filter.kind.map_or(true, |k| a.kind == k))
            .cloned()
            .collect(),
    )
}

async fn get_asset(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Asset>, AppError> {
    let store = db.read().await;
    store
        .assets
        .iter()
        .find(|a| a.id == id)
        .cloned()
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[derive(Deserialize)]
struct MaintenanceFilter {
    upcoming: Option<bool>,
}

async fn list_maintenance(
    State(db): State<Db>,
    Query(filter): Query<MaintenanceFilter>,
) -> Json<Vec<MaintenanceRecord>> {
    let store = db.read().await;
    Json(
        store
            .maintenance
            .iter()
            .filter(|m| filter.upcoming.map_or(true, |upcoming| m.completed != upcoming))
            .cloned()
            .collect(),
    )
}

async fn schedule_maintenance(
    State(db): State<Db>,
    Json(input): Json<ScheduleMaintenance>,
) -> Result<(StatusCode, Json<MaintenanceRecord>), AppError> {
    let mut store = db.write().await;
    if !store.assets.iter().any(|a| a.id == input.asset_id) {
        return Err(AppError::NotFound);
    }
    let record = MaintenanceRecord {
        id: format!("MNT-{:03}", store.maintenance.len() + 1),
        asset_id: input.asset_id,
        description: input.description,
        scheduled_for: input.scheduled_for,
        completed: false,
    };
    store.maintenance.push(record.clone());
    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_assignments(State(db): State<Db>) -> Json<Vec<Assignment>> {
    Json(db.read().await.assignments.clone())
}

async fn update_assignment(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateAssignment>,
) -> Result<Json<Assignment>, AppError> {
    let mut store = db.write().await;
    let assignment = store
        .assignments
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or(AppError::NotFound)?;
    if input.ends_at.is_some_and(|ends_at| ends_at < assignment.starts_at) {
        return Err(AppError::BadRequest("endsAt precedes startsAt".to_string()));
    }
    if let Some(mission_id) = input.mission_id {
        assignment.mission_id = Some(mission_id);
    }
    if let Some(operator) = input.operator {
        assignment.operator = operator;
    }
    if let Some(ends_at) = input.ends_at {
        assignment.ends_at = Some(ends_at);
    }
    tracing::debug!(assignment = %id, "assignment updated");
    Ok(Json(assignment.clone()))
}
