//! Event store endpoints

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use serde::Deserialize;

use crm_core::date_range::DateRange;
use crm_core::editor::EventEditor;
use crm_core::error::CrmError;
use crm_core::store::EventStore;
use crm_core::{CalendarEvent, EventStatus};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(save_event))
        .route("/events/{id}", delete(delete_event))
        .route("/events/{id}/complete", post(complete_event))
}

/// Query string for range queries
#[derive(Deserialize)]
pub struct RangeQuery {
    /// YYYY-MM-DD, or "start"
    pub from: Option<String>,
    /// YYYY-MM-DD
    pub to: Option<String>,
}

/// GET /events?from=&to= - Events whose date falls within the range
async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let range = DateRange::from_args(query.from.as_deref(), query.to.as_deref()).map_err(AppError::bad_request)?;

    let events = state.store().events_in_range(&range)?;
    Ok(Json(events))
}

/// POST /events - Create or replace an event
async fn save_event(
    State(state): State<AppState>,
    Json(event): Json<CalendarEvent>,
) -> Result<Json<CalendarEvent>, AppError> {
    // Same title check as the editor applies
    let event = EventEditor::edit(&event).to_event().map_err(AppError::bad_request)?;

    state.store().save(&event)?;
    tracing::info!(event = %event.id, "saved event");

    Ok(Json(event))
}

/// POST /events/:id/complete - Mark an event completed
async fn complete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CalendarEvent>, AppError> {
    let mut store = state.store();

    let mut event = store
        .get(&id)?
        .ok_or_else(|| AppError::not_found(CrmError::EventNotFound(id.clone())))?;

    event.status = EventStatus::Completed;
    store.save(&event)?;

    Ok(Json(event))
}

/// DELETE /events/:id - Remove an event
async fn delete_event(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, AppError> {
    if !state.store().delete(&id)? {
        return Err(AppError::not_found(CrmError::EventNotFound(id)));
    }

    tracing::info!(event = %id, "deleted event");
    Ok(StatusCode::NO_CONTENT)
}
