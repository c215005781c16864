//! Market endpoints: overview, opportunities, clients, pricing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::config::RequestConfig;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegionStat {
    pub region: String,
    pub value: f64,
    pub growth_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketOverview {
    pub total_addressable_value: f64,
    pub active_opportunities: u32,
    pub win_rate: f64,
    pub regions: Vec<RegionStat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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

/// A client account on the market side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub segment: String,
    pub annual_spend: f64,
    pub active_contracts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub service: String,
    pub region: String,
    pub flight_hours: f64,
    pub drones: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub service: String,
    pub region: String,
    pub unit_price: f64,
    pub total: f64,
    pub currency: String,
    pub valid_until: DateTime<Utc>,
}

/// Sub-client for `/market`.
pub struct Market<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Market<'_> {
    pub async fn overview(&self) -> Result<MarketOverview, ApiError> {
        self.client.get("/market/overview", RequestConfig::default()).await?.data.decode()
    }

    pub async fn opportunities(&self, region: Option<&str>, min_value: Option<f64>) -> Result<Vec<Opportunity>, ApiError> {
        let config = RequestConfig::new()
            .query_opt("region", region)
            .query_opt("minValue", min_value);
        self.client.get("/market/opportunities", config).await?.data.decode()
    }

    pub async fn clients(&self, segment: Option<&str>) -> Result<Vec<Customer>, ApiError> {
        let config = RequestConfig::new().query_opt("segment", segment);
        self.client.get("/market/clients", config).await?.data.decode()
    }

    pub async fn quote(&self, request: &QuoteRequest) -> Result<PriceQuote, ApiError> {
        self.client
            .post("/market/pricing/quote", request, RequestConfig::default())
            .await?
            .data
            .decode()
    }
}
