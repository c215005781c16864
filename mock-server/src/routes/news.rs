use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::model::*;
use crate::store::{Db, Store};
use crate::AppError;

const DEFAULT_PAGE_SIZE: u32 = 20;

pub fn router() -> Router<Db> {
    Router::new()
        .route("/news", get(list_news))
        .route("/news/critical", get(critical_news))
        .route("/news/sources/{source}", get(news_by_source))
        .route("/news/{id}", get(get_article))
}

/// Articles newest first.
fn sorted(store: &Store) -> Vec<NewsArticle> {
    let mut items = store.news.clone();
    items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    items
}

#[derive(Deserialize)]
struct NewsFilter {
    limit: Option<u32>,
    offset: Option<u32>,
    category: Option<String>,
}

async fn list_news(State(db): State<Db>, Query(filter): Query<NewsFilter>) -> Json<NewsPage> {
    let store = db.read().await;
    let matching: Vec<NewsArticle> = sorted(&store)
        .into_iter()
        .filter(|a| filter.category.as_ref().map_or(true, |c| &a.category == c))
        .collect();
    let limit = filter.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let offset = filter.offset.unwrap_or(0);
    Json(NewsPage {
        total: matching.len() as u32,
        items: matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect(),
        limit,
        offset,
    })
}

async fn critical_news(State(db): State<Db>) -> Json<Vec<NewsArticle>> {
    let store = db.read().await;
    Json(
        sorted(&store)
            .into_iter()
            .filter(|a| a.severity == Severity::Critical)
            .collect(),
    )
}

async fn news_by_source(State(db): State<Db>, Path(source): Path<String>) -> Json<Vec<NewsArticle>> {
    let store = db.read().await;
    Json(sorted(&store).into_iter().filter(|a| a.source == source).collect())
}

async fn get_article(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<NewsArticle>, AppError> {
    let store = db.read().await;
    store
        .news
        .iter()
        .find(|a| a.id == id)
        .cloned()
        .map(Json)
        .ok_or(AppError::NotFound)
}
