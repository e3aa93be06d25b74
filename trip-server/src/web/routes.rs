//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::domain::{GeoPoint, ModeId};
use crate::planner::ResolveError;
use crate::trip::{Commit, PlanError, find_place, name_location};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/trip", get(get_trip))
        .route("/trip/start", post(start_trip))
        .route("/trip/device-location", put(set_device_location))
        .route("/trip/origin", put(set_origin))
        .route("/trip/destination", put(set_destination))
        .route("/trip/destination/search", post(search_destination))
        .route("/trip/departure", put(set_departure))
        .route("/trip/modes", post(enter_modes))
        .route("/trip/options", post(enter_options))
        .route("/trip/selection", post(select_option))
        .route("/trip/results", post(enter_results))
        .route("/itineraries", get(itineraries))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Current stage, draft and stored options.
async fn get_trip(State(state): State<AppState>) -> Json<TripView> {
    let session = state.session.lock().await;
    Json(TripView::from(&*session))
}

async fn start_trip(State(state): State<AppState>) -> Json<TripView> {
    let mut session = state.session.lock().await;
    session.start_planning();
    Json(TripView::from(&*session))
}

async fn set_device_location(
    State(state): State<AppState>,
    Json(req): Json<DeviceLocationRequest>,
) -> Result<Json<TripView>, AppError> {
    let place = match (req.latitude, req.longitude) {
        (Some(lat), Some(lng)) => {
            Some(name_location(state.geocoder.as_ref(), GeoPoint::new(lat, lng)).await)
        }
        (None, None) => None,
        _ => {
            return Err(AppError::Validation {
                message: "latitude and longitude must be given together".to_string(),
            });
        }
    };
    let mut session = state.session.lock().await;
    session.set_device_location(place);
    Ok(Json(TripView::from(&*session)))
}

async fn set_origin(
    State(state): State<AppState>,
    Json(req): Json<PlaceRequest>,
) -> Result<Json<TripView>, AppError> {
    let place = req.into_place().map_err(AppError::validation)?;
    let mut session = state.session.lock().await;
    session.set_origin(place)?;
    Ok(Json(TripView::from(&*session)))
}

async fn set_destination(
    State(state): State<AppState>,
    Json(req): Json<PlaceRequest>,
) -> Result<Json<TripView>, AppError> {
    let place = req.into_place().map_err(AppError::validation)?;
    let mut session = state.session.lock().await;
    session.set_destination(place)?;
    Ok(Json(TripView::from(&*session)))
}

/// Geocode free text and confirm it as the destination.
async fn search_destination(
    State(state): State<AppState>,
    Json(req): Json<DestinationSearchRequest>,
) -> Result<Json<TripView>, AppError> {
    let place = find_place(state.geocoder.as_ref(), &req.query).await?;
    let mut session = state.session.lock().await;
    session.set_destination(place)?;
    Ok(Json(TripView::from(&*session)))
}

async fn set_departure(
    State(state): State<AppState>,
    Json(req): Json<DepartureRequest>,
) -> Result<Json<TripView>, AppError> {
    let departure = req.parsed_departure().map_err(AppError::validation)?;
    let mut session = state.session.lock().await;
    if let Some(days) = req.travel_days {
        session.set_travel_days(days)?;
    }
    session.set_departure_time(departure)?;
    Ok(Json(TripView::from(&*session)))
}

async fn enter_modes(State(state): State<AppState>) -> Result<Json<TripView>, AppError> {
    let mut session = state.session.lock().await;
    session.enter_mode_selection()?;
    Ok(Json(TripView::from(&*session)))
}

/// Resolve a mode and store the list.
///
/// The session lock is released while providers run; if another request
/// changed the plan meanwhile, the list is returned but not stored.
async fn enter_options(
    State(state): State<AppState>,
    Json(req): Json<OptionsRequest>,
) -> Result<Json<OptionsResponse>, AppError> {
    let (ticket, draft) = state
        .session
        .lock()
        .await
        .begin_resolution(req.mode, req.route_preference)?;

    let options = state.pipeline.resolve(&draft, req.mode, req.sort).await?;
    let views = option_views(&options);

    let commit = state.session.lock().await.commit(ticket, options);

    Ok(Json(OptionsResponse {
        mode: req.mode,
        sort: req.sort,
        committed: commit == Commit::Committed,
        options: views,
    }))
}

async fn select_option(
    State(state): State<AppState>,
    Json(req): Json<SelectionRequest>,
) -> Result<Json<TripView>, AppError> {
    let mut session = state.session.lock().await;
    session.select_option(req.mode, req.index)?;
    Ok(Json(TripView::from(&*session)))
}

async fn enter_results(State(state): State<AppState>) -> Result<Json<OptionView>, AppError> {
    let mut session = state.session.lock().await;
    let chosen = session.enter_results()?;
    Ok(Json(OptionView::from(chosen)))
}

/// Resolve against the current draft without storing anything.
async fn itineraries(
    State(state): State<AppState>,
    Query(query): Query<ItinerariesQuery>,
) -> Json<Vec<ModeItineraries>> {
    let draft = state.session.lock().await.draft().clone();
    let modes: Vec<ModeId> = match query.mode {
        Some(mode) => vec![mode],
        None => ModeId::ALL.to_vec(),
    };

    let results = state.pipeline.prefetch(&draft, &modes, query.sort).await;
    let body = results
        .into_iter()
        .map(|(mode, result)| match result {
            Ok(options) => ModeItineraries {
                mode,
                options: Some(option_views(&options)),
                error: None,
            },
            Err(e) => ModeItineraries {
                mode,
                options: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    Json(body)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Illegal transition or bad input (422)
    Validation { message: String },
    /// Origin or destination missing (400)
    IncompletePlan { message: String },
    /// Selection refused (409)
    InvalidSelection { message: String },
}

impl AppError {
    fn validation(message: String) -> Self {
        AppError::Validation { message }
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        AppError::IncompletePlan {
            message: e.to_string(),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::IncompletePlan(e) => e.into(),
            PlanError::InvalidSelection(_) => AppError::InvalidSelection {
                message: e.to_string(),
            },
            PlanError::ValidationFailed(message) => AppError::Validation { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::IncompletePlan { message } => (StatusCode::BAD_REQUEST, message),
            AppError::InvalidSelection { message } => (StatusCode::CONFLICT, message),
        };

        tracing::info!(%status, %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
