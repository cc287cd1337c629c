use std::sync::atomic::Ordering;

use axum::{extract::State, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::builder::{round_to_cents, PricingResult};
use crate::catalog::ServiceOption;
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub uptime_secs: u64,
    pub request_count: usize,
}

#[derive(Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub services: usize,
}

#[derive(Serialize)]
pub struct CatalogSummary {
    /// Every configured entry, hidden ones included.
    pub services: Vec<ServiceOption>,
    pub visible_count: usize,
    pub categories: Vec<CategoryCount>,
}

#[derive(Serialize)]
pub struct AnalyticsSummary {
    pub open_sessions: usize,
    pub packages_sold: usize,
    pub revenue_committed: f64,
}

#[derive(Serialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub selected_services: usize,
    pub total_items: u64,
    pub total: f64,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let inner = state.inner.load();

    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        uptime_secs: inner.started_at.elapsed().as_secs(),
        request_count: inner.request_count.load(Ordering::Relaxed),
    })
}

pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogSummary> {
    let inner = state.inner.load();

    Json(CatalogSummary {
        services: inner.catalog.all_services().to_vec(),
        visible_count: inner.catalog.visible_services().len(),
        categories: inner
            .catalog
            .category_counts()
            .into_iter()
            .map(|(category, services)| CategoryCount {
                category: category.label().to_string(),
                services,
            })
            .collect(),
    })
}

pub async fn get_analytics(State(state): State<AppState>) -> Json<AnalyticsSummary> {
    let inner = state.inner.load();
    let (packages_sold, revenue) = inner.cart.summary();

    Json(AnalyticsSummary {
        open_sessions: inner.sessions.len(),
        packages_sold,
        revenue_committed: round_to_cents(revenue),
    })
}

pub async fn get_sessions(State(state): State<AppState>) -> Json<Vec<SessionSummary>> {
    let inner = state.inner.load();

    let mut summaries: Vec<SessionSummary> = inner
        .sessions
        .snapshot()
        .into_iter()
        .map(|(session_id, selection)| {
            let pricing = PricingResult::compute(&selection);
            SessionSummary {
                session_id,
                selected_services: pricing.unique_service_count,
                total_items: pricing.total_items,
                total: round_to_cents(pricing.total),
            }
        })
        .collect();
    summaries.sort_by_key(|s| s.session_id);

    Json(summaries)
}
