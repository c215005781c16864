//! In-memory state behind the mock backend, seeded with a small fleet.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::model::*;

pub type Db = Arc<RwLock<Store>>;

#[derive(Debug, Default)]
pub struct Store {
    pub drones: Vec<Drone>,
    pub missions: Vec<Mission>,
    pub alerts: Vec<Alert>,
    pub opportunities: Vec<Opportunity>,
    pub customers: Vec<Customer>,
    pub regions: Vec<RegionStat>,
    pub news: Vec<NewsArticle>,
    pub assets: Vec<Asset>,
    pub maintenance: Vec<MaintenanceRecord>,
    pub assignments: Vec<Assignment>,
}

impl Store {
    pub fn drone(&self, id: &str) -> Option<&Drone> {
        self.drones.iter().find(|d| d.id == id)
    }

    pub fn mission(&self, id: &str) -> Option<&Mission> {
        self.missions.iter().find(|m| m.id == id)
    }

    pub fn mission_mut(&mut self, id: &str) -> Option<&mut Mission> {
        self.missions.iter_mut().find(|m| m.id == id)
    }

    /// Seeded store; timestamps are relative to `now`.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let pos = |lat: f64, lon: f64, altitude_m: f64| GeoPosition { lat, lon, altitude_m };

        let drones = vec![
            Drone {
                id: "DRN-001".to_string(),
                callsign: "Kestrel".to_string(),
                status: DroneStatus::InFlight,
                battery_pct: 76.0,
                position: pos(51.5072, -0.1276, 120.0),
                mission_id: Some("MSN-001".to_string()),
            },
            Drone {
                id: "DRN-002".to_string(),
                callsign: "Osprey".to_string(),
                status: DroneStatus::Idle,
                battery_pct: 98.0,
                position: pos(51.4700, -0.4543, 0.0),
                mission_id: None,
            },
            Drone {
                id: "DRN-003".to_string(),
                callsign: "Harrier".to_string(),
                status: DroneStatus::Charging,
                battery_pct: 34.0,
                position: pos(51.4700, -0.4543, 0.0),
                mission_id: None,
            },
            Drone {
                id: "DRN-004".to_string(),
                callsign: "Merlin".to_string(),
                status: DroneStatus::Offline,
                battery_pct: 0.0,
                position: pos(52.2053, 0.1218, 0.0),
                mission_id: None,
            },
        ];

        let missions = vec![
            Mission {
                id: "MSN-001".to_string(),
                name: "Thames corridor survey".to_string(),
                status: MissionStatus::Active,
                drone_id: Some("DRN-001".to_string()),
                waypoints: vec![pos(51.5072, -0.1276, 120.0), pos(51.4934, 0.0098, 120.0)],
                progress_pct: 42.0,
                created_at: now - Duration::hours(3),
                updated_at: now - Duration::minutes(20),
            },
            Mission {
                id: "MSN-002".to_string(),
                name: "Heathrow perimeter patrol".to_string(),
                status: MissionStatus::Planned,
                drone_id: Some("DRN-002".to_string()),
                waypoints: vec![pos(51.4700, -0.4543, 90.0)],
                progress_pct: 0.0,
                created_at: now - Duration::hours(1),
                updated_at: now - Duration::hours(1),
            },
        ];

        let alerts = vec![
            Alert {
                id: "ALT-001".to_string(),
                severity: Severity::Critical,
                message: "DRN-004 lost telemetry link".to_string(),
                drone_id: Some("DRN-004".to_string()),
                raised_at: now - Duration::minutes(45),
                acknowledged: false,
            },
            Alert {
                id: "ALT-002".to_string(),
                severity: Severity::Warning,
                message: "DRN-003 battery below 40%".to_string(),
                drone_id: Some("DRN-003".to_string()),
                raised_at: now - Duration::minutes(30),
                acknowledged: false,
            },
            Alert {
                id: "ALT-003".to_string(),
                severity: Severity::Info,
                message: "Airspace NOTAM refreshed".to_string(),
                drone_id: None,
                raised_at: now - Duration::hours(2),
                acknowledged: true,
            },
        ];

        let customers = vec![
            Customer {
                id: "CUS-001".to_string(),
                name: "Northline Utilities".to_string(),
                segment: "energy".to_string(),
                annual_spend: 1_250_000.0,
                active_contracts: 3,
            },
            Customer {
                id: "CUS-002".to_string(),
                name: "Harbor Logistics".to_string(),
                segment: "logistics".to_string(),
                annual_spend: 640_000.0,
                active_contracts: 1,
            },
            Customer {
                id: "CUS-003".to_string(),
                name: "Greenfield Agritech".to_string(),
                segment: "agriculture".to_string(),
                annual_spend: 310_000.0,
                active_contracts: 2,
            },
        ];

        let opportunities = vec![
            Opportunity {
                id: "OPP-001".to_string(),
                title: "Grid line inspection renewal".to_string(),
                region: "uk".to_string(),
                customer_id: "CUS-001".to_string(),
                estimated_value: 900_000.0,
                probability: 0.7,
                closes_at: now + Duration::days(30),
            },
            Opportunity {
                id: "OPP-002".to_string(),
                title: "Port yard inventory flights".to_string(),
                region: "eu".to_string(),
                customer_id: "CUS-002".to_string(),
                estimated_value: 220_000.0,
                probability: 0.4,
                closes_at: now + Duration::days(45),
            },
            Opportunity {
                id: "OPP-003".to_string(),
                title: "Crop health mapping".to_string(),
                region: "uk".to_string(),
                customer_id: "CUS-003".to_string(),
                estimated_value: 120_000.0,
                probability: 0.55,
                closes_at: now + Duration::days(14),
            },
        ];

        let regions = vec![
            RegionStat {
                region: "uk".to_string(),
                value: 4_800_000.0,
                growth_pct: 12.5,
            },
            RegionStat {
                region: "eu".to_string(),
                value: 9_600_000.0,
                growth_pct: 8.0,
            },
        ];

        let news = vec![
            NewsArticle {
                id: "NEWS-001".to_string(),
                title: "Temporary flight restriction over central London".to_string(),
                summary: "Restriction active until 18:00 UTC.".to_string(),
                source: "caa".to_string(),
                category: "regulation".to_string(),
                severity: Severity::Critical,
                published_at: now - Duration::minutes(15),
                url: Some("https://example.com/notam/123".to_string()),
            },
            NewsArticle {
                id: "NEWS-002".to_string(),
                title: "Battery supplier announces price cut".to_string(),
                summary: "Cell prices down 6% quarter on quarter.".to_string(),
                source: "reuters".to_string(),
                category: "supply".to_string(),
                severity: Severity::Info,
                published_at: now - Duration::hours(4),
                url: None,
            },
            NewsArticle {
                id: "NEWS-003".to_string(),
                title: "Storm front expected over the North Sea".to_string(),
                summary: "Gusts above 60 km/h forecast for tomorrow.".to_string(),
                source: "metoffice".to_string(),
                category: "weather".to_string(),
                severity: Severity::Warning,
                published_at: now - Duration::hours(1),
                url: None,
            },
        ];

        let assets = vec![
            Asset {
                id: "AST-001".to_string(),
                name: "Kestrel airframe".to_string(),
                kind: AssetKind::Drone,
                operational: true,
                value: 48_000.0,
                flight_hours: 612.5,
                acquired_at: now - Duration::days(400),
            },
            Asset {
                id: "AST-002".to_string(),
                name: "Heathrow dock".to_string(),
                kind: AssetKind::Dock,
                operational: true,
                value: 22_000.0,
                flight_hours: 0.0,
                acquired_at: now - Duration::days(300),
            },
            Asset {
                id: "AST-003".to_string(),
                name: "Merlin airframe".to_string(),
                kind: AssetKind::Drone,
                operational: false,
                value: 51_000.0,
                flight_hours: 230.0,
                acquired_at: now - Duration::days(120),
            },
        ];

        let maintenance = vec![
            MaintenanceRecord {
                id: "MNT-001".to_string(),
                asset_id: "AST-003".to_string(),
                description: "Replace telemetry radio".to_string(),
                scheduled_for: now + Duration::days(2),
                completed: false,
            },
            MaintenanceRecord {
                id: "MNT-002".to_string(),
                asset_id: "AST-001".to_string(),
                description: "Rotor inspection".to_string(),
                scheduled_for: now - Duration::days(10),
                completed: true,
            },
        ];

        let assignments = vec![Assignment {
            id: "ASG-001".to_string(),
            asset_id: "AST-001".to_string(),
            mission_id: Some("MSN-001".to_string()),
            operator: "j.okafor".to_string(),
            starts_at: now - Duration::hours(3),
            ends_at: None,
        }];

        Self {
            drones,
            missions,
            alerts,
            opportunities,
            customers,
            regions,
            news,
            assets,
            maintenance,
            assignments,
        }
    }
}
