//! News endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::segment;
use crate::client::ApiClient;
use crate::config::RequestConfig;
use crate::error::ApiError;
use crate::types::Severity;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsPage {
    pub items: Vec<NewsArticle>,
    pub total: u32,
    pub limit: u32,
    pub offset: u32,
}

/// Filters for the news listing. Unset fields are left out of the query.
#[derive(Debug, Clone, Default)]
pub struct NewsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub category: Option<String>,
}

impl NewsQuery {
    fn to_config(&self) -> RequestConfig {
        RequestConfig::new()
            .query_opt("limit", self.limit)
            .query_opt("offset", self.offset)
            .query_opt("category", self.category.as_deref())
    }
}

/// Sub-client for `/news`.
pub struct News<'a> {
    pub(crate) client: &'a ApiClient,
}

impl News<'_> {
    pub async fn list(&self, query: &NewsQuery) -> Result<NewsPage, ApiError> {
        self.client.get("/news", query.to_config()).await?.data.decode()
    }

    pub async fn article(&self, article_id: &str) -> Result<NewsArticle, ApiError> {
        let path = format!("/news/{}", segment(article_id));
        self.client.get(&path, RequestConfig::default()).await?.data.decode()
    }

    pub async fn critical(&self) -> Result<Vec<NewsArticle>, ApiError> {
        self.client.get("/news/critical", RequestConfig::default()).await?.data.decode()
    }

    pub async fn by_source(&self, source: &str) -> Result<Vec<NewsArticle>, ApiError> {
        let path = format!("/news/sources/{}", segment(source));
        self.client.get(&path, RequestConfig::default()).await?.data.decode()
    }
}
