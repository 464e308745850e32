use std::collections::HashMap;
use std::sync::Arc;

use astrolink_api::models::DeviceType;
use astrolink_api::response::{MethodResponse, ValueResponse};
use axum::extract::{Form, Path, Query, State};
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::devices::TelescopeSimulator;
use crate::errors::ApiError;
use crate::services::{self, DeviceRegistry, TransactionService};

#[derive(Clone)]
pub struct TelescopeState {
    pub registry: Arc<DeviceRegistry>,
    pub transactions: Arc<TransactionService>,
}

pub fn telescope_router(state: TelescopeState) -> Router {
    Router::new()
        .route(
            "/api/v1/telescope/:device_number/rightascension",
            get(get_right_ascension),
        )
        .route(
            "/api/v1/telescope/:device_number/declination",
            get(get_declination),
        )
        .route("/api/v1/telescope/:device_number/atpark", get(get_at_park))
        .route(
            "/api/v1/telescope/:device_number/tracking",
            get(get_tracking).put(put_tracking),
        )
        .route(
            "/api/v1/telescope/:device_number/slaved",
            get(get_slaved).put(put_slaved),
        )
        .route(
            "/api/v1/telescope/:device_number/targetrightascension",
            get(get_target_right_ascension).put(put_target_right_ascension),
        )
        .route(
            "/api/v1/telescope/:device_number/targetdeclination",
            get(get_target_declination).put(put_target_declination),
        )
        .route("/api/v1/telescope/:device_number/park", put(put_park))
        .route("/api/v1/telescope/:device_number/unpark", put(put_unpark))
        .route(
            "/api/v1/telescope/:device_number/slewtocoordinates",
            put(put_slew_to_coordinates),
        )
        .with_state(state)
}

fn resolve(
    state: &TelescopeState,
    device_number: u32,
) -> Result<Arc<TelescopeSimulator>, ApiError> {
    state
        .registry
        .telescope(device_number)
        .ok_or(ApiError::UnknownDevice {
            device_type: DeviceType::Telescope,
            device_number,
        })
}

pub async fn get_right_ascension(
    State(state): State<TelescopeState>,
    Path(device_number): Path<u32>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ValueResponse<f64>>, ApiError> {
    let telescope = resolve(&state, device_number)?;
    let context = state.transactions.open_context(&params);

    let value = telescope
        .right_ascension()
        .map_err(|error| error.with_context(&context))?;

    Ok(Json(ValueResponse::new(&context, value)))
}

pub async fn get_declination(
    State(state): State<TelescopeState>,
    Path(device_number): Path<u32>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ValueResponse<f64>>, ApiError> {
    let telescope = resolve(&state, device_number)?;
    let context = state.transactions.open_context(&params);

    let value = telescope
        .declination()
        .map_err(|error| error.with_context(&context))?;

    Ok(Json(ValueResponse::new(&context, value)))
}

pub async fn get_at_park(
    State(state): State<TelescopeState>,
    Path(device_number): Path<u32>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ValueResponse<bool>>, ApiError> {
    let telescope = resolve(&state, device_number)?;
    let context = state.transactions.open_context(&params);

    let value = telescope
        .at_park()
        .map_err(|error| error.with_context(&context))?;

    Ok(Json(ValueResponse::new(&context, value)))
}

pub async fn get_tracking(
    State(state): State<TelescopeState>,
    Path(device_number): Path<u32>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ValueResponse<bool>>, ApiError> {
    let telescope = resolve(&state, device_number)?;
    let context = state.transactions.open_context(&params);

    let value = telescope
        .tracking()
        .map_err(|error| error.with_context(&context))?;

    Ok(Json(ValueResponse::new(&context, value)))
}

pub async fn put_tracking(
    State(state): State<TelescopeState>,
    Path(device_number): Path<u32>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<Json<MethodResponse>, ApiError> {
    let telescope = resolve(&state, device_number)?;
    let context = state.transactions.open_context(&params);

    let enabled = services::require_bool(&params, "Tracking")
        .map_err(|error| error.with_context(&context))?;

    telescope
        .set_tracking(enabled)
        .map_err(|error| error.with_context(&context))?;

    Ok(Json(MethodResponse::ok(&context)))
}

pub async fn get_slaved(
    State(state): State<TelescopeState>,
    Path(device_number): Path<u32>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ValueResponse<bool>>, ApiError> {
    let telescope = resolve(&state, device_number)?;
    let context = state.transactions.open_context(&params);

    let value = telescope
        .slaved()
        .map_err(|error| error.with_context(&context))?;

    Ok(Json(ValueResponse::new(&context, value)))
}

pub async fn put_slaved(
    State(state): State<TelescopeState>,
    Path(device_number): Path<u32>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<Json<MethodResponse>, ApiError> {
    let telescope = resolve(&state, device_number)?;
    let context = state.transactions.open_context(&params);

    let slaved = services::require_bool(&params, "Slaved")
        .map_err(|error| error.with_context(&context))?;

    telescope
        .set_slaved(slaved)
        .map_err(|error| error.with_context(&context))?;

    Ok(Json(MethodResponse::ok(&context)))
}

pub async fn get_target_right_ascension(
    State(state): State<TelescopeState>,
    Path(device_number): Path<u32>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ValueResponse<f64>>, ApiError> {
    let telescope = resolve(&state, device_number)?;
    let context = state.transactions.open_context(&params);

    let value = telescope
        .target_right_ascension()
        .map_err(|error| error.with_context(&context))?;

    Ok(Json(ValueResponse::new(&context, value)))
}

pub async fn put_target_right_ascension(
    State(state): State<TelescopeState>,
    Path(device_number): Path<u32>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<Json<MethodResponse>, ApiError> {
    let telescope = resolve(&state, device_number)?;
    let context = state.transactions.open_context(&params);

    let value = services::require_f64(&params, "TargetRightAscension")
        .map_err(|error| error.with_context(&context))?;

    telescope
        .set_target_right_ascension(value)
        .map_err(|error| error.with_context(&context))?;

    Ok(Json(MethodResponse::ok(&context)))
}

pub async fn get_target_declination(
    State(state): State<TelescopeState>,
    Path(device_number): Path<u32>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ValueResponse<f64>>, ApiError> {
    let telescope = resolve(&state, device_number)?;
    let context = state.transactions.open_context(&params);

    let value = telescope
        .target_declination()
        .map_err(|error| error.with_context(&context))?;

    Ok(Json(ValueResponse::new(&context, value)))
}

pub async fn put_target_declination(
    State(state): State<TelescopeState>,
    Path(device_number): Path<u32>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<Json<MethodResponse>, ApiError> {
    let telescope = resolve(&state, device_number)?;
    let context = state.transactions.open_context(&params);

    let value = services::require_f64(&params, "TargetDeclination")
        .map_err(|error| error.with_context(&context))?;

    telescope
        .set_target_declination(value)
        .map_err(|error| error.with_context(&context))?;

    Ok(Json(MethodResponse::ok(&context)))
}

pub async fn put_park(
    State(state): State<TelescopeState>,
    Path(device_number): Path<u32>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<Json<MethodResponse>, ApiError> {
    let telescope = resolve(&state, device_number)?;
    let context = state.transactions.open_context(&params);

    telescope
        .park()
        .map_err(|error| error.with_context(&context))?;

    Ok(Json(MethodResponse::ok(&context)))
}

pub async fn put_unpark(
    State(state): State<TelescopeState>,
    Path(device_number): Path<u32>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<Json<MethodResponse>, ApiError> {
    let telescope = resolve(&state, device_number)?;
    let context = state.transactions.open_context(&params);

    telescope
        .unpark()
        .map_err(|error| error.with_context(&context))?;

    Ok(Json(MethodResponse::ok(&context)))
}

pub async fn put_slew_to_coordinates(
    State(state): State<TelescopeState>,
    Path(device_number): Path<u32>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<Json<MethodResponse>, ApiError> {
    let telescope = resolve(&state, device_number)?;
    let context = state.transactions.open_context(&params);

    let right_ascension = services::require_f64(&params, "RightAscension")
        .map_err(|error| error.with_context(&context))?;
    let declination = services::require_f64(&params, "Declination")
        .map_err(|error| error.with_context(&context))?;

    telescope
        .slew_to_coordinates(right_ascension, declination)
        .map_err(|error| error.with_context(&context))?;

    Ok(Json(MethodResponse::ok(&context)))
}
