use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::model::*;
use crate::store::Db;
use crate::AppError;

pub fn router() -> Router<Db> {
    Router::new()
        .route("/market/overview", get(overview))
        .route("/market/opportunities", get(list_opportunities))
        .route("/market/clients", get(list_clients))
        .route("/market/pricing/quote", post(quote))
}

async fn overview(State(db): State<Db>) -> Json<MarketOverview> {
    let store = db.read().await;
    Json(MarketOverview {
        total_addressable_value: store.regions.iter().map(|r| r.value).sum(),
        active_opportunities: store.opportunities.len() as u32,
        win_rate: 0.38,
        regions: store.regions.clone(),
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OpportunityFilter {
    region: Option<String>,
    min_value: Option<f64>,
}

async fn list_opportunities(
    State(db): State<Db>,
    Query(filter): Query<OpportunityFilter>,
) -> Json<Vec<Opportunity>> {
    let store = db.read().await;
    Json(
        store
            .opportunities
            .iter()
            .filter(|o| filter.region.as_ref().map_or(true, |r| &o.region == r))
            .filter(|o| filter.min_value.map_or(true, |min| o.estimated_value >= min))
            .cloned()
            .collect(),
    )
}

#[derive(Deserialize)]
struct ClientFilter {
    segment: Option<String>,
}

async fn list_clients(State(db): State<Db>, Query(filter): Query<ClientFilter>) -> Json<Vec<Customer>> {
    let store = db.read().await;
    Json(
        store
            .customers
            .iter()
            .filter(|c| filter.segment.as_ref().map_or(true, |s| &c.segment == s))
            .cloned()
            .collect(),
    )
}

/// Hourly rate per drone for a service, before the regional multiplier.
fn base_rate(service: &str) -> Option<f64> {
    match service {
        "inspection" => Some(180.0),
        "mapping" => Some(140.0),
        "patrol" => Some(95.0),
        "delivery" => Some(60.0),
        _ => None,
    }
}

fn region_multiplier(region: &str) -> f64 {
    match region {
        "uk" => 1.0,
        "eu" => 1.1,
        "us" => 1.25,
        _ => 1.5,
    }
}

async fn quote(Json(input): Json<QuoteRequest>) -> Result<Json<PriceQuote>, AppError> {
    let rate = base_rate(&input.service)
        .ok_or_else(|| AppError::BadRequest(format!("unknown service {}", input.service)))?;
    if input.flight_hours <= 0.0 || input.drones == 0 {
        return Err(AppError::BadRequest(
            "flightHours and drones must be positive".to_string(),
        ));
    }
    let unit_price = rate * region_multiplier(&input.region);
    Ok(Json(PriceQuote {
        total: unit_price * input.flight_hours * f64::from(input.drones),
        unit_price,
        service: input.service,
        region: input.region,
        currency: "USD".to_string(),
        valid_until: Utc::now() + Duration::days(7),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_region_gets_premium() {
        assert_eq!(region_multiplier("uk"), 1.0);
        assert_eq!(region_multiplier("apac"), 1.5);
    }

    #[test]
    fn known_services_have_rates() {
        assert_eq!(base_rate("inspection"), Some(180.0));
        assert_eq!(base_rate("sightseeing"), None);
    }
}
