//! Defines the HTTP interface to the campus graph. The graph is built once at
//! startup and shared between every request.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::common::bbox::BBox;
use crate::common::campus_graph::CampusGraph;
use crate::common::error::Error;
use crate::common::graph_data::{Location, LocationId, PathStyle, PathType};
use crate::config::route::{
    RequestError, RouteRequest, SmsRequest, UserRouteRequest, UserSmsRequest,
};
use crate::notify::TextSender;
use crate::notify::message::Directions;
use crate::routing::geometry::{DetailRecord, get_details_bbox};
use crate::routing::metrics::format_time;

/// Shared state for every request
#[derive(Clone)]
pub struct AppState {
    pub campus: Arc<CampusGraph>,
    /// Text messages are disabled if this is not set
    pub sms: Option<Arc<dyn TextSender>>,
}

impl AppState {
    pub fn new(campus: CampusGraph, sms: Option<Arc<dyn TextSender>>) -> Self {
        AppState {
            campus: Arc::new(campus),
            sms,
        }
    }
}

/// Everything which can go wrong while handling a request, each of which
/// maps onto a status code and a JSON error body
#[derive(Debug)]
pub enum ApiError {
    Request(RequestError),
    UnknownStart {
        id: i64,
        available: Vec<LocationId>,
    },
    UnknownEnd {
        id: i64,
        available: Vec<LocationId>,
    },
    Campus(Error),
    SmsNotConfigured,
    SmsFailed,
    Internal(String),
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::Request(err)
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Campus(err)
    }
}

impl ApiError {
    fn status_and_body(&self) -> (StatusCode, Value) {
        match self {
            ApiError::Request(err) => {
                let body = match err {
                    RequestError::NoData => json!({"error": err.to_string()}),
                    RequestError::MissingFields { required, received } => {
                        json!({
                            "error": err.to_string(),
                            "required": required,
                            "received": received
                        })
                    }
                    RequestError::InvalidIds { start, end } => json!({
                        "error": err.to_string(),
                        "start_received": start,
                        "end_received": end
                    }),
                    RequestError::InvalidPhone => json!({
                        "error": err.to_string(),
                        "details": "Phone number must include country code (e.g., +1...)"
                    }),
                };
                (StatusCode::BAD_REQUEST, body)
            }
            ApiError::UnknownStart { id, available } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": format!("Start node {id} not found"),
                    "available_nodes": available
                }),
            ),
            ApiError::UnknownEnd { id, available } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": format!("End node {id} not found"),
                    "available_nodes": available
                }),
            ),
            ApiError::Campus(Error::NoRouteFound { start, end }) => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "No path found between the selected locations",
                    "start_node": start,
                    "end_node": end
                }),
            ),
            ApiError::Campus(err) => internal_error(err.to_string()),
            ApiError::SmsNotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({
                    "error": "SMS service not configured",
                    "details": "Twilio credentials missing"
                }),
            ),
            ApiError::SmsFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Failed to send SMS",
                    "details": "Check server logs for more information"
                }),
            ),
            ApiError::Internal(details) => internal_error(details.clone()),
        }
    }
}

fn internal_error(details: String) -> (StatusCode, Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({
            "success": false,
            "error": "Internal server error",
            "details": details
        }),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = ?self, "request failed");
        } else {
            info!(status = status.as_u16(), error = ?self, "request rejected");
        }
        (status, Json(body)).into_response()
    }
}

/// A completed route, with everything needed to draw it
#[derive(Debug, Serialize)]
pub struct PathSummary<'a> {
    pub nodes: Vec<LocationId>,
    pub coordinates: Vec<DetailRecord>,
    pub start: &'a Location,
    pub end: &'a Location,
    pub estimated_time: String,
    pub path_length: usize,
    pub bounds: Option<BBox>,
    pub centre: Option<(f64, f64)>,
}

#[derive(Debug, Serialize)]
pub struct PathResponse<'a> {
    pub success: bool,
    pub path: PathSummary<'a>,
    pub path_styles: BTreeMap<PathType, &'a PathStyle>,
}

/// Bodies which can't be read as JSON are treated as missing
fn read_body(body: Result<Json<Value>, JsonRejection>) -> Value {
    match body {
        Ok(Json(value)) => value,
        Err(rejection) => {
            warn!(%rejection, "unable to read request body");
            Value::Null
        }
    }
}

/// Check both ends of the request against the campus
fn resolve_ids(
    campus: &CampusGraph,
    request: RouteRequest,
) -> Result<(LocationId, LocationId), ApiError> {
    let lookup = |id: i64| {
        LocationId::try_from(id)
            .ok()
            .filter(|known| campus.contains(*known))
    };

    let start = lookup(request.start).ok_or_else(|| ApiError::UnknownStart {
        id: request.start,
        available: campus.location_ids(),
    })?;
    let end = lookup(request.end).ok_or_else(|| ApiError::UnknownEnd {
        id: request.end,
        available: campus.location_ids(),
    })?;

    Ok((start, end))
}

fn find_route(
    campus: &CampusGraph,
    start: LocationId,
    end: LocationId,
) -> Result<Vec<LocationId>, Error> {
    campus
        .find_shortest_path(start, end)
        .ok_or(Error::NoRouteFound { start, end })
}

async fn health_check() -> impl IntoResponse {
    let msg = "Campus navigation is running";

    let json_response = json!({
        "status": "success",
        "message": msg
    });

    Json(json_response)
}

async fn get_locations(State(state): State<AppState>) -> impl IntoResponse {
    let locations: Vec<Value> = state
        .campus
        .locations()
        .iter()
        .map(|location| json!({"id": location.id, "name": location.name}))
        .collect();

    Json(json!({ "locations": locations }))
}

/// Full contents of the graph, used by the front end to draw the campus
async fn get_graph(State(state): State<AppState>) -> Response {
    let campus = &state.campus;

    let nodes: BTreeMap<LocationId, &Location> = campus
        .locations()
        .into_iter()
        .map(|location| (location.id, location))
        .collect();

    Json(json!({
        "nodes": nodes,
        "edges": campus.edges(),
        "path_styles": campus.path_styles()
    }))
    .into_response()
}

async fn get_path(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let user = UserRouteRequest::from_body(read_body(body))?;
    let request = RouteRequest::try_from(user)?;

    let campus = &state.campus;
    let (start, end) = resolve_ids(campus, request)?;

    info!(start, end, "finding route");

    let route = find_route(campus, start, end)?;
    let coordinates = campus.get_path_details(&route);
    let bounds = get_details_bbox(&coordinates);
    let total_time = campus.calculate_path_time(&route);

    let (start_loc, end_loc) =
        match (campus.location(start), campus.location(end)) {
            (Some(start_loc), Some(end_loc)) => (start_loc, end_loc),
            _ => {
                let msg = "route endpoints missing from graph";
                return Err(ApiError::Internal(msg.to_string()));
            }
        };

    info!(start, end, hops = route.len() - 1, total_time, "route found");

    let response = PathResponse {
        success: true,
        path: PathSummary {
            path_length: route.len(),
            nodes: route,
            coordinates,
            start: start_loc,
            end: end_loc,
            estimated_time: format_time(total_time),
            bounds,
            centre: bounds.map(|bbox| bbox.get_centre()),
        },
        path_styles: campus.path_styles(),
    };

    Ok(Json(response).into_response())
}

async fn send_sms(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let sender = state.sms.clone().ok_or(ApiError::SmsNotConfigured)?;

    let user = UserSmsRequest::from_body(read_body(body))?;
    let request = SmsRequest::try_from(user)?;

    let (start, end) = resolve_ids(&state.campus, request.route)?;
    let route = find_route(&state.campus, start, end)?;
    let message = Directions::new(&state.campus, &route)?.render()?;

    info!(start, end, "sending directions");

    let phone = request.phone;
    let text = message.clone();
    let sent =
        tokio::task::spawn_blocking(move || sender.send_text(&phone, &text))
            .await
            .map_err(|err| ApiError::Internal(err.to_string()))?;

    if !sent {
        return Err(ApiError::SmsFailed);
    }

    Ok(Json(json!({
        "status": "success",
        "message": "SMS sent successfully",
        "preview": message
    }))
    .into_response())
}

/// Create the router which serves every endpoint
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(health_check))
        .route("/get_locations", get(get_locations))
        .route("/graph", get(get_graph))
        .route("/get_path", post(get_path))
        .route("/send_sms", post(send_sms))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
