//! Public API handlers for the builder flow.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::builder::{round_to_cents, PricingResult, SelectionEntry, SelectionState};
use crate::cart::PackageItem;
use crate::catalog::ServiceOption;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Display-rounded projection of a [`PricingResult`].
///
/// The core keeps full precision; this is the one place monetary values are
/// rounded to cents before leaving the service.
#[derive(Debug, Serialize)]
pub struct PricingView {
    pub subtotal: f64,
    pub unique_service_count: usize,
    pub discount_percent: u32,
    pub discount_amount: f64,
    pub total: f64,
    pub total_items: u64,
}

impl From<PricingResult> for PricingView {
    fn from(pricing: PricingResult) -> Self {
        Self {
            subtotal: round_to_cents(pricing.subtotal),
            unique_service_count: pricing.unique_service_count,
            discount_percent: pricing.discount_percent,
            discount_amount: round_to_cents(pricing.discount_amount),
            total: round_to_cents(pricing.total),
            total_items: pricing.total_items,
        }
    }
}

#[derive(Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[derive(Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub entries: Vec<SelectionEntry>,
    pub preview_image: Option<String>,
    pub pricing: PricingView,
}

#[derive(Serialize)]
pub struct CartView {
    pub session_id: Uuid,
    pub items: Vec<PackageItem>,
    pub cart_total: f64,
}

#[derive(Deserialize)]
pub struct ToggleRequest {
    pub service_id: String,
}

#[derive(Deserialize)]
pub struct QuantityRequest {
    pub service_id: String,
    pub delta: i64,
}

fn session_view(session_id: Uuid, state: &SelectionState) -> SessionView {
    SessionView {
        session_id,
        entries: state.entries().to_vec(),
        preview_image: state.preview_image().map(str::to_owned),
        pricing: PricingResult::compute(state).into(),
    }
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// `GET /api/services`: the public catalog.
pub async fn list_services(State(state): State<AppState>) -> Json<Vec<ServiceOption>> {
    let inner = state.inner.load();
    Json(inner.catalog.visible_services().to_vec())
}

/// `POST /api/sessions`: open a new builder session.
pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let inner = state.inner.load();
    let session_id = inner.sessions.create();
    metrics::record_sessions_open(inner.sessions.len());

    tracing::debug!(session_id = %session_id, "Builder session opened");
    (StatusCode::CREATED, Json(SessionCreated { session_id }))
}

/// `GET /api/sessions/{id}`: current selection with fresh pricing.
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let inner = state.inner.load();
    match inner.sessions.get(id) {
        Some(selection) => Json(session_view(id, &selection)).into_response(),
        None => (StatusCode::NOT_FOUND, "Unknown session").into_response(),
    }
}

/// `DELETE /api/sessions/{id}`: close a session, discarding its selection.
pub async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let inner = state.inner.load();
    if inner.sessions.remove(id) {
        metrics::record_sessions_open(inner.sessions.len());
        StatusCode::NO_CONTENT.into_response()
    } else {
        (StatusCode::NOT_FOUND, "Unknown session").into_response()
    }
}

/// `POST /api/sessions/{id}/toggle`: flip one service on or off.
pub async fn toggle_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ToggleRequest>,
) -> impl IntoResponse {
    let inner = state.inner.load();

    if inner.config.security.strict_validation && request.service_id.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Blank service id").into_response();
    }

    let Some(service) = inner.catalog.find_visible(&request.service_id) else {
        return (StatusCode::NOT_FOUND, "Unknown service").into_response();
    };

    match inner.sessions.with_mut(id, |selection| {
        selection.toggle(service);
        session_view(id, selection)
    }) {
        Some(view) => Json(view).into_response(),
        None => (StatusCode::NOT_FOUND, "Unknown session").into_response(),
    }
}

/// `POST /api/sessions/{id}/quantity`: adjust a selected service by delta.
///
/// Adjusting a service that is not selected is a silent no-op: the response
/// is simply the unchanged selection.
pub async fn adjust_quantity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<QuantityRequest>,
) -> impl IntoResponse {
    let inner = state.inner.load();

    if inner.config.security.strict_validation {
        if request.service_id.trim().is_empty() {
            return (StatusCode::BAD_REQUEST, "Blank service id").into_response();
        }
        // unsigned_abs: plain abs() overflows on i64::MIN, which is valid input.
        if request.delta.unsigned_abs() > 1000 {
            return (StatusCode::BAD_REQUEST, "Delta out of range").into_response();
        }
    }

    match inner.sessions.with_mut(id, |selection| {
        selection.adjust_quantity(&request.service_id, request.delta);
        session_view(id, selection)
    }) {
        Some(view) => Json(view).into_response(),
        None => (StatusCode::NOT_FOUND, "Unknown session").into_response(),
    }
}

/// `POST /api/sessions/{id}/reset`: empty the selection.
pub async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let inner = state.inner.load();
    match inner.sessions.with_mut(id, |selection| {
        selection.reset();
        session_view(id, selection)
    }) {
        Some(view) => Json(view).into_response(),
        None => (StatusCode::NOT_FOUND, "Unknown session").into_response(),
    }
}

/// `POST /api/sessions/{id}/checkout`: commit the selection to the cart.
///
/// Synthesizes one package line item from the selection and its freshly
/// computed price, appends it to the session's cart, and resets the
/// selection for the next build.
pub async fn checkout(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let inner = state.inner.load();

    let committed = inner.sessions.with_mut(id, |selection| {
        if selection.is_empty() {
            return None;
        }
        let pricing = PricingResult::compute(selection);
        let item = PackageItem::from_selection(selection, &pricing);
        selection.reset();
        Some(item)
    });

    match committed {
        Some(Some(item)) => {
            inner.cart.add(id, item.clone());
            tracing::info!(
                session_id = %id,
                total = item.price,
                manifest = %item.manifest,
                "Package committed to cart"
            );
            (StatusCode::CREATED, Json(item)).into_response()
        }
        Some(None) => (StatusCode::BAD_REQUEST, "Empty selection").into_response(),
        None => (StatusCode::NOT_FOUND, "Unknown session").into_response(),
    }
}

/// `GET /api/cart/{id}`: committed packages for a session.
pub async fn get_cart(State(state): State<AppState>, Path(id): Path<Uuid>) -> Json<CartView> {
    let inner = state.inner.load();
    let items = inner.cart.items(id);
    let cart_total = round_to_cents(items.iter().map(|i| i.price).sum());

    Json(CartView {
        session_id: id,
        items,
        cart_total,
    })
}
