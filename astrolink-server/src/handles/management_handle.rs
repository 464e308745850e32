use std::collections::HashMap;
use std::sync::Arc;

use astrolink_api::models::{ConfiguredDevice, ServerDescription};
use astrolink_api::response::ValueResponse;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::configs::Settings;
use crate::errors::ApiError;
use crate::services::{DeviceRegistry, TransactionService};

/// Device API versions this server speaks.
const API_VERSIONS: [u32; 1] = [1];

#[derive(Clone)]
pub struct ManagementState {
    pub settings: Arc<Settings>,
    pub registry: Arc<DeviceRegistry>,
    pub transactions: Arc<TransactionService>,
}

pub fn management_router(state: ManagementState) -> Router {
    Router::new()
        .route("/management/apiversions", get(get_api_versions))
        .route("/management/v1/description", get(get_server_description))
        .route(
            "/management/v1/configureddevices",
            get(get_configured_devices),
        )
        .with_state(state)
}

pub async fn get_api_versions(
    State(state): State<ManagementState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ValueResponse<Vec<u32>>>, ApiError> {
    let context = state.transactions.open_context(&params);

    Ok(Json(ValueResponse::new(&context, API_VERSIONS.to_vec())))
}

pub async fn get_server_description(
    State(state): State<ManagementState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ValueResponse<ServerDescription>>, ApiError> {
    let context = state.transactions.open_context(&params);
    let description = &state.settings.description;

    Ok(Json(ValueResponse::new(
        &context,
        ServerDescription {
            server_name: description.server_name.clone(),
            manufacturer: description.manufacturer.clone(),
            manufacturer_version: description.manufacturer_version.clone(),
            location: description.location.clone(),
        },
    )))
}

pub async fn get_configured_devices(
    State(state): State<ManagementState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ValueResponse<Vec<ConfiguredDevice>>>, ApiError> {
    let context = state.transactions.open_context(&params);

    Ok(Json(ValueResponse::new(
        &context,
        state.registry.configured_devices(),
    )))
}
