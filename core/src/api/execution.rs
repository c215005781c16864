//! Execution endpoints: mission lifecycle and drone commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::segment;
use crate::client::ApiClient;
use crate::config::RequestConfig;
use crate::error::ApiError;
use crate::types::{GeoPosition, MissionStatus};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: String,
    pub name: String,
    pub status: MissionStatus,
    pub drone_id: Option<String>,
    pub waypoints: Vec<GeoPosition>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMission {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drone_id: Option<String>,
    #[serde(default)]
    pub waypoints: Vec<GeoPosition>,
}

/// Partial update. Only the fields present in the JSON are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drone_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waypoints: Option<Vec<GeoPosition>>,
}

/// Lifecycle transition requested for a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionAction {
    Start,
    Pause,
    Resume,
    Abort,
    Complete,
}

impl MissionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissionAction::Start => "start",
            MissionAction::Pause => "pause",
            MissionAction::Resume => "resume",
            MissionAction::Abort => "abort",
            MissionAction::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DroneCommand {
    ReturnToBase,
    Hold,
    Land,
    Goto { target: GeoPosition },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommandAck {
    pub command_id: String,
    pub drone_id: String,
    pub accepted: bool,
    pub issued_at: DateTime<Utc>,
}

/// Sub-client for `/execution`.
pub struct Execution<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Execution<'_> {
    pub async fn create_mission(&self, input: &CreateMission) -> Result<Mission, ApiError> {
        self.client
            .post("/execution/missions", input, RequestConfig::default())
            .await?
            .data
            .decode()
    }

    pub async fn mission(&self, mission_id: &str) -> Result<Mission, ApiError> {
        let path = format!("/execution/missions/{}", segment(mission_id));
        self.client.get(&path, RequestConfig::default()).await?.data.decode()
    }

    pub async fn update_mission(&self, mission_id: &str, input: &UpdateMission) -> Result<Mission, ApiError> {
        let path = format!("/execution/missions/{}", segment(mission_id));
        self.client.put(&path, input, RequestConfig::default()).await?.data.decode()
    }

    pub async fn transition(&self, mission_id: &str, action: MissionAction) -> Result<Mission, ApiError> {
        let path = format!("/execution/missions/{}/{}", segment(mission_id), action.as_str());
        self.client
            .post(&path, &serde_json::json!({}), RequestConfig::default())
            .await?
            .data
            .decode()
    }

    pub async fn delete_mission(&self, mission_id: &str) -> Result<(), ApiError> {
        let path = format!("/execution/missions/{}", segment(mission_id));
        self.client.delete(&path, RequestConfig::default()).await?;
        Ok(())
    }

    pub async fn send_command(&self, drone_id: &str, command: &DroneCommand) -> Result<CommandAck, ApiError> {
        let path = format!("/execution/drones/{}/commands", segment(drone_id));
        self.client.post(&path, command, RequestConfig::default()).await?.data.decode()
    }
}
