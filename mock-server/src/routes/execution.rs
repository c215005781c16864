use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use uuid::Uuid;

use crate::model::*;
use crate::store::Db;
use crate::AppError;

pub fn router() -> Router<Db> {
    Router::new()
        .route("/execution/missions", post(create_mission))
        .route(
            "/execution/missions/{id}",
            get(get_mission).put(update_mission).delete(delete_mission),
        )
        .route("/execution/missions/{id}/{action}", post(transition_mission))
        .route("/execution/drones/{id}/commands", post(send_command))
}

fn short_id(prefix: &str) -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &raw[..8])
}

async fn create_mission(
    State(db): State<Db>,
    Json(input): Json<CreateMission>,
) -> Result<(StatusCode, Json<Mission>), AppError> {
    let mut store = db.write().await;
    if let Some(drone_id) = &input.drone_id {
        if store.drone(drone_id).is_none() {
            return Err(AppError::BadRequest(format!("unknown drone {drone_id}")));
        }
    }
    let now = Utc::now();
    let mission = Mission {
        id: short_id("MSN"),
        name: input.name,
        status: MissionStatus::Planned,
        drone_id: input.drone_id,
        waypoints: input.waypoints,
        progress_pct: 0.0,
        created_at: now,
        updated_at: now,
    };
    store.missions.push(mission.clone());
    Ok((StatusCode::CREATED, Json(mission)))
}

async fn get_mission(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Mission>, AppError> {
    let store = db.read().await;
    store.mission(&id).cloned().map(Json).ok_or(AppError::NotFound)
}

async fn update_mission(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateMission>,
) -> Result<Json<Mission>, AppError> {
    let mut store = db.write().await;
    let mission = store.mission_mut(&id).ok_or(AppError::NotFound)?;
    if let Some(name) = input.name {
        mission.name = name;
    }
    if let Some(drone_id) = input.drone_id {
        mission.drone_id = Some(drone_id);
    }
    if let Some(waypoints) = input.waypoints {
        mission.waypoints = waypoints;
    }
    mission.updated_at = Utc::now();
    Ok(Json(mission.clone()))
}

/// Allowed transitions:
/// planned -start-> active, active -pause-> paused, paused -resume-> active,
/// active|paused -abort-> aborted, active -complete-> completed.
fn next_status(current: MissionStatus, action: &str) -> Result<MissionStatus, AppError> {
    use MissionStatus::*;
    let next = match (action, current) {
        ("start", Planned) => Active,
        ("pause", Active) => Paused,
        ("resume", Paused) => Active,
        ("abort", Active | Paused) => Aborted,
        ("complete", Active) => Completed,
        ("start" | "pause" | "resume" | "abort" | "complete", _) => {
            return Err(AppError::Conflict(format!(
                "cannot {action} a mission that is {}",
                serde_json::to_value(current)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_default()
            )))
        }
        _ => return Err(AppError::BadRequest(format!("unknown action {action}"))),
    };
    Ok(next)
}

async fn transition_mission(
    State(db): State<Db>,
    Path((id, action)): Path<(String, String)>,
) -> Result<Json<Mission>, AppError> {
    let mut store = db.write().await;
    let mission = store.mission_mut(&id).ok_or(AppError::NotFound)?;
    let next = next_status(mission.status, &action)?;
    tracing::debug!(mission = %id, ?next, "mission transition");
    mission.status = next;
    if next == MissionStatus::Completed {
        mission.progress_pct = 100.0;
    }
    mission.updated_at = Utc::now();
    Ok(Json(mission.clone()))
}

async fn delete_mission(State(db): State<Db>, Path(id): Path<String>) -> Result<StatusCode, AppError> {
    let mut store = db.write().await;
    let before = store.missions.len();
    store.missions.retain(|m| m.id != id);
    if store.missions.len() == before {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn send_command(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(command): Json<DroneCommand>,
) -> Result<Json<CommandAck>, AppError> {
    let store = db.read().await;
    let drone = store.drone(&id).ok_or(AppError::NotFound)?;
    tracing::debug!(drone = %id, ?command, "drone command");
    Ok(Json(CommandAck {
        command_id: short_id("CMD"),
        drone_id: drone.id.clone(),
        accepted: drone.status != DroneStatus::Offline,
        issued_at: Utc::now(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_transitions() {
        assert_eq!(next_status(MissionStatus::Planned, "start").unwrap(), MissionStatus::Active);
        assert_eq!(next_status(MissionStatus::Active, "pause").unwrap(), MissionStatus::Paused);
        assert_eq!(next_status(MissionStatus::Paused, "resume").unwrap(), MissionStatus::Active);
        assert_eq!(next_status(MissionStatus::Paused, "abort").unwrap(), MissionStatus::Aborted);
        assert_eq!(next_status(MissionStatus::Active, "complete").unwrap(), MissionStatus::Completed);
    }

    #[test]
    fn illegal_transition_conflicts() {
        let err = next_status(MissionStatus::Completed, "start").unwrap_err();
        assert!(matches!(err, AppError::Conflict(msg) if msg == "cannot start a mission that is completed"));
        assert!(matches!(next_status(MissionStatus::Planned, "pause"), Err(AppError::Conflict(_))));
    }

    #[test]
    fn unknown_action_is_bad_request() {
        assert!(matches!(next_status(MissionStatus::Active, "launch"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn short_ids_are_prefixed() {
        let id = short_id("MSN");
        assert!(id.starts_with("MSN-"));
        assert_eq!(id.len(), 12);
    }
}
