use serde::{Deserialize, Serialize};

use crate::error::AlpacaError;
use crate::request::RequestContext;

/// Envelope for operations that return a value.
///
/// Field names are fixed by the protocol; clients branch on `ErrorNumber`
/// programmatically, so successes carry an explicit 0.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueResponse<T> {
    #[serde(rename = "Value")]
    pub value: T,
    #[serde(rename = "ClientTransactionID")]
    pub client_transaction_id: u32,
    #[serde(rename = "ServerTransactionID")]
    pub server_transaction_id: u32,
    #[serde(rename = "ErrorNumber")]
    pub error_number: i32,
    #[serde(rename = "ErrorMessage")]
    pub error_message: String,
}

impl<T> ValueResponse<T> {
    pub fn new(context: &RequestContext, value: T) -> Self {
        Self {
            value,
            client_transaction_id: context.client_transaction_id(),
            server_transaction_id: context.server_transaction_id(),
            error_number: 0,
            error_message: String::new(),
        }
    }
}

/// Envelope for operations with no return value, and for every fault.
///
/// `ClientID` is an input-only field: the protocol accepts it on requests
/// but does not echo it in the body, so the conversion from [`AlpacaError`]
/// deliberately leaves it behind.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodResponse {
    #[serde(rename = "ClientTransactionID")]
    pub client_transaction_id: u32,
    #[serde(rename = "ServerTransactionID")]
    pub server_transaction_id: u32,
    #[serde(rename = "ErrorNumber")]
    pub error_number: i32,
    #[serde(rename = "ErrorMessage")]
    pub error_message: String,
}

impl MethodResponse {
    pub fn ok(context: &RequestContext) -> Self {
        Self {
            client_transaction_id: context.client_transaction_id(),
            server_transaction_id: context.server_transaction_id(),
            error_number: 0,
            error_message: String::new(),
        }
    }
}

impl From<AlpacaError> for MethodResponse {
    fn from(error: AlpacaError) -> Self {
        Self {
            client_transaction_id: error.client_transaction_id(),
            server_transaction_id: error.server_transaction_id(),
            error_number: error.error_number(),
            error_message: error.error_message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_echoes_context() {
        let context = RequestContext::new(7, 42, 9);
        let response = ValueResponse::new(&context, 23.5_f64);

        assert_eq!(response.value, 23.5);
        assert_eq!(response.client_transaction_id, 42);
        assert_eq!(response.server_transaction_id, 9);
        assert_eq!(response.error_number, 0);
        assert_eq!(response.error_message, "");
    }

    #[test]
    fn test_error_envelope_pulls_all_fields_from_the_error() {
        let context = RequestContext::new(3, 100, 0);
        let response = MethodResponse::from(AlpacaError::not_implemented(&context));

        assert_eq!(response.error_number, 1024);
        assert_eq!(response.error_message, "not implemented");
        assert_eq!(response.client_transaction_id, 100);
        assert_eq!(response.server_transaction_id, 0);
    }

    #[test]
    fn test_wire_field_names_are_exact() {
        let context = RequestContext::new(1, 2, 3);
        let json = serde_json::to_value(ValueResponse::new(&context, true)).unwrap();

        assert_eq!(json["Value"], serde_json::json!(true));
        assert_eq!(json["ClientTransactionID"], serde_json::json!(2));
        assert_eq!(json["ServerTransactionID"], serde_json::json!(3));
        assert_eq!(json["ErrorNumber"], serde_json::json!(0));
        assert_eq!(json["ErrorMessage"], serde_json::json!(""));
    }

    #[test]
    fn test_error_envelope_round_trips_exactly() {
        let error = AlpacaError::invalid_value()
            .with_message("out of range")
            .with_context(&RequestContext::new(7, 42, 9));
        let envelope = MethodResponse::from(error);

        let json = serde_json::to_string(&envelope).unwrap();
        let decoded: MethodResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, envelope);
        assert_eq!(decoded.error_number, 0x401);
        assert_eq!(decoded.error_message, "out of range");
        assert_eq!(decoded.client_transaction_id, 42);
        assert_eq!(decoded.server_transaction_id, 9);
    }
}
