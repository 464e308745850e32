use std::collections::HashMap;
use std::sync::Arc;

use astrolink_api::error::AlpacaError;
use astrolink_api::models::DeviceType;
use astrolink_api::response::{MethodResponse, ValueResponse};
use axum::extract::{Form, Path, Query, State};
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::devices::Device;
use crate::errors::ApiError;
use crate::services::{self, DeviceRegistry, TransactionService};

#[derive(Clone)]
pub struct DeviceState {
    pub registry: Arc<DeviceRegistry>,
    pub transactions: Arc<TransactionService>,
}

pub fn device_router(state: DeviceState) -> Router {
    Router::new()
        .route(
            "/api/v1/:device_type/:device_number/connected",
            get(get_connected).put(put_connected),
        )
        .route("/api/v1/:device_type/:device_number/name", get(get_name))
        .route(
            "/api/v1/:device_type/:device_number/description",
            get(get_description),
        )
        .route(
            "/api/v1/:device_type/:device_number/driverinfo",
            get(get_driver_info),
        )
        .route(
            "/api/v1/:device_type/:device_number/driverversion",
            get(get_driver_version),
        )
        .route(
            "/api/v1/:device_type/:device_number/interfaceversion",
            get(get_interface_version),
        )
        .route(
            "/api/v1/:device_type/:device_number/supportedactions",
            get(get_supported_actions),
        )
        .route("/api/v1/:device_type/:device_number/action", put(put_action))
        .route(
            "/api/v1/:device_type/:device_number/commandblind",
            put(put_command_blind),
        )
        .route(
            "/api/v1/:device_type/:device_number/commandbool",
            put(put_command_bool),
        )
        .route(
            "/api/v1/:device_type/:device_number/commandstring",
            put(put_command_string),
        )
        .with_state(state)
}

fn resolve(
    state: &DeviceState,
    device_type: DeviceType,
    device_number: u32,
) -> Result<Arc<dyn Device>, ApiError> {
    state
        .registry
        .device(device_type, device_number)
        .ok_or(ApiError::UnknownDevice {
            device_type,
            device_number,
        })
}

pub async fn get_connected(
    State(state): State<DeviceState>,
    Path((device_type, device_number)): Path<(DeviceType, u32)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ValueResponse<bool>>, ApiError> {
    let device = resolve(&state, device_type, device_number)?;
    let context = state.transactions.open_context(&params);

    Ok(Json(ValueResponse::new(&context, device.connected().await)))
}

pub async fn put_connected(
    State(state): State<DeviceState>,
    Path((device_type, device_number)): Path<(DeviceType, u32)>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<Json<MethodResponse>, ApiError> {
    let device = resolve(&state, device_type, device_number)?;
    let context = state.transactions.open_context(&params);

    let connected = services::require_bool(&params, "Connected")
        .map_err(|error| error.with_context(&context))?;

    device
        .set_connected(connected)
        .await
        .map_err(|error| error.with_context(&context))?;

    Ok(Json(MethodResponse::ok(&context)))
}

pub async fn get_name(
    State(state): State<DeviceState>,
    Path((device_type, device_number)): Path<(DeviceType, u32)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ValueResponse<String>>, ApiError> {
    let device = resolve(&state, device_type, device_number)?;
    let context = state.transactions.open_context(&params);

    Ok(Json(ValueResponse::new(&context, device.name())))
}

pub async fn get_description(
    State(state): State<DeviceState>,
    Path((device_type, device_number)): Path<(DeviceType, u32)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ValueResponse<String>>, ApiError> {
    let device = resolve(&state, device_type, device_number)?;
    let context = state.transactions.open_context(&params);

    Ok(Json(ValueResponse::new(&context, device.description())))
}

pub async fn get_driver_info(
    State(state): State<DeviceState>,
    Path((device_type, device_number)): Path<(DeviceType, u32)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ValueResponse<String>>, ApiError> {
    let device = resolve(&state, device_type, device_number)?;
    let context = state.transactions.open_context(&params);

    Ok(Json(ValueResponse::new(&context, device.driver_info())))
}

pub async fn get_driver_version(
    State(state): State<DeviceState>,
    Path((device_type, device_number)): Path<(DeviceType, u32)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ValueResponse<String>>, ApiError> {
    let device = resolve(&state, device_type, device_number)?;
    let context = state.transactions.open_context(&params);

    Ok(Json(ValueResponse::new(&context, device.driver_version())))
}

pub async fn get_interface_version(
    State(state): State<DeviceState>,
    Path((device_type, device_number)): Path<(DeviceType, u32)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ValueResponse<i32>>, ApiError> {
    let device = resolve(&state, device_type, device_number)?;
    let context = state.transactions.open_context(&params);

    Ok(Json(ValueResponse::new(
        &context,
        device.interface_version(),
    )))
}

pub async fn get_supported_actions(
    State(state): State<DeviceState>,
    Path((device_type, device_number)): Path<(DeviceType, u32)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ValueResponse<Vec<String>>>, ApiError> {
    let device = resolve(&state, device_type, device_number)?;
    let context = state.transactions.open_context(&params);

    Ok(Json(ValueResponse::new(
        &context,
        device.supported_actions(),
    )))
}

pub async fn put_action(
    State(state): State<DeviceState>,
    Path((device_type, device_number)): Path<(DeviceType, u32)>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<Json<ValueResponse<String>>, ApiError> {
    let device = resolve(&state, device_type, device_number)?;
    let context = state.transactions.open_context(&params);

    let name = services::lookup(&params, "Action").unwrap_or_default();
    let parameters = services::lookup(&params, "Parameters").unwrap_or_default();

    let value = device
        .action(name, parameters)
        .await
        .map_err(|error| error.with_context(&context))?;

    Ok(Json(ValueResponse::new(&context, value)))
}

// The three legacy command endpoints are retired here. The fault is known
// with the full request in hand, before a server transaction is assigned,
// so the envelope echoes the 0 sentinel.

pub async fn put_command_blind(
    State(state): State<DeviceState>,
    Path((device_type, device_number)): Path<(DeviceType, u32)>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<Json<MethodResponse>, ApiError> {
    let _device = resolve(&state, device_type, device_number)?;
    let context = services::unassigned_context(&params);

    Err(AlpacaError::not_implemented(&context).into())
}

pub async fn put_command_bool(
    State(state): State<DeviceState>,
    Path((device_type, device_number)): Path<(DeviceType, u32)>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<Json<MethodResponse>, ApiError> {
    let _device = resolve(&state, device_type, device_number)?;
    let context = services::unassigned_context(&params);

    Err(AlpacaError::not_implemented(&context).into())
}

pub async fn put_command_string(
    State(state): State<DeviceState>,
    Path((device_type, device_number)): Path<(DeviceType, u32)>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<Json<MethodResponse>, ApiError> {
    let _device = resolve(&state, device_type, device_number)?;
    let context = services::unassigned_context(&params);

    Err(AlpacaError::not_implemented(&context).into())
}
