use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::configs::Settings;
use crate::devices::TelescopeSimulator;
use crate::handles::*;
use crate::services::{DeviceRegistry, TransactionService};

pub fn create_app(settings: &Arc<Settings>) -> Router {
    let transactions = Arc::new(TransactionService::new());

    let mut registry = DeviceRegistry::new();
    registry.register_telescope(
        settings.telescope.device_number,
        Arc::new(TelescopeSimulator::new(
            settings.telescope.name.clone(),
            settings.telescope.unique_id.clone(),
        )),
    );
    let registry = Arc::new(registry);

    let management = management_router(ManagementState {
        settings: settings.clone(),
        registry: registry.clone(),
        transactions: transactions.clone(),
    });

    let devices = device_router(DeviceState {
        registry: registry.clone(),
        transactions: transactions.clone(),
    });

    let telescopes = telescope_router(TelescopeState {
        registry: registry.clone(),
        transactions: transactions.clone(),
    });

    Router::new()
        .merge(management)
        .merge(devices)
        .merge(telescopes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
