pub mod api;

pub use api::ApiError;

use astrolink_api::response::MethodResponse;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Protocol faults ride a 200 with the error envelope; the
            // client branches on ErrorNumber, never on the HTTP status.
            ApiError::Device(error) => {
                (StatusCode::OK, Json(MethodResponse::from(error))).into_response()
            }
            ApiError::UnknownDevice {
                device_type,
                device_number,
            } => {
                let body = Json(json!({
                    "error": {
                        "code": StatusCode::BAD_REQUEST.as_u16(),
                        "message": format!("no {device_type} device with number {device_number}"),
                    }
                }));

                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::InternalError(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Internal error: {}", e);

                let body = Json(json!({
                    "error": {
                        "code": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                        "message": "Internal server error",
                        "error_id": error_id.to_string(),
                    }
                }));

                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
