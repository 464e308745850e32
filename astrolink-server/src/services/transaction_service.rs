use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use astrolink_api::error::AlpacaError;
use astrolink_api::request::RequestContext;

/// Issues the server half of the transaction correlation pair.
///
/// Identifiers start at 1; 0 stays reserved as the "no transaction
/// assigned" sentinel.
pub struct TransactionService {
    counter: AtomicU32,
}

impl TransactionService {
    pub fn new() -> Self {
        Self {
            counter: AtomicU32::new(1),
        }
    }

    pub fn next_id(&self) -> u32 {
        self.counter.fetch_add(1, Ordering::SeqCst)
    }

    /// Build the context for one accepted request: client fields from the
    /// parsed parameters, a freshly assigned server transaction id.
    pub fn open_context(&self, params: &HashMap<String, String>) -> RequestContext {
        RequestContext::new(
            client_field(params, "ClientID"),
            client_field(params, "ClientTransactionID"),
            self.next_id(),
        )
    }
}

impl Default for TransactionService {
    fn default() -> Self {
        Self::new()
    }
}

/// Context for faults detected before a server transaction is assigned:
/// client fields parsed as usual, server id left at the 0 sentinel.
pub fn unassigned_context(params: &HashMap<String, String>) -> RequestContext {
    RequestContext::new(
        client_field(params, "ClientID"),
        client_field(params, "ClientTransactionID"),
        0,
    )
}

/// Case-insensitive parameter lookup.
pub fn lookup<'a>(params: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Client correlation field: absent or malformed values normalize to 0.
fn client_field(params: &HashMap<String, String>, name: &str) -> u32 {
    lookup(params, name)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Required boolean operation parameter. Missing or malformed input is a
/// protocol fault, not a transport error.
pub fn require_bool(params: &HashMap<String, String>, name: &str) -> Result<bool, AlpacaError> {
    let raw = lookup(params, name)
        .ok_or_else(|| AlpacaError::invalid_value().with_message(format!("missing parameter {name}")))?;

    raw.trim().to_ascii_lowercase().parse().map_err(|_| {
        AlpacaError::invalid_value().with_message(format!("{name} must be true or false, got {raw:?}"))
    })
}

/// Required numeric operation parameter.
pub fn require_f64(params: &HashMap<String, String>, name: &str) -> Result<f64, AlpacaError> {
    let raw = lookup(params, name)
        .ok_or_else(|| AlpacaError::invalid_value().with_message(format!("missing parameter {name}")))?;

    raw.trim().parse().map_err(|_| {
        AlpacaError::invalid_value().with_message(format!("{name} must be a number, got {raw:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_ids_are_monotonic_from_one() {
        let service = TransactionService::new();

        assert_eq!(service.next_id(), 1);
        assert_eq!(service.next_id(), 2);
        assert_eq!(service.next_id(), 3);
    }

    #[test]
    fn test_open_context_parses_client_fields_case_insensitively() {
        let service = TransactionService::new();
        let context = service.open_context(&params(&[
            ("clientid", "7"),
            ("CLIENTTRANSACTIONID", "42"),
        ]));

        assert_eq!(context.client_id(), 7);
        assert_eq!(context.client_transaction_id(), 42);
        assert_eq!(context.server_transaction_id(), 1);
    }

    #[test]
    fn test_absent_or_malformed_client_fields_normalize_to_zero() {
        let service = TransactionService::new();
        let context = service.open_context(&params(&[("ClientID", "not a number")]));

        assert_eq!(context.client_id(), 0);
        assert_eq!(context.client_transaction_id(), 0);
    }

    #[test]
    fn test_unassigned_context_keeps_the_zero_sentinel() {
        let context = unassigned_context(&params(&[
            ("ClientID", "3"),
            ("ClientTransactionID", "100"),
        ]));

        assert_eq!(context.client_id(), 3);
        assert_eq!(context.client_transaction_id(), 100);
        assert_eq!(context.server_transaction_id(), 0);
    }

    #[test]
    fn test_require_bool_accepts_mixed_case_values() {
        let values = params(&[("Connected", "True")]);

        assert_eq!(require_bool(&values, "Connected").unwrap(), true);
    }

    #[test]
    fn test_require_f64_rejects_garbage_as_invalid_value() {
        let values = params(&[("RightAscension", "east")]);
        let error = require_f64(&values, "RightAscension").unwrap_err();

        assert_eq!(error.error_number(), 0x401);
    }

    #[test]
    fn test_missing_operation_parameter_is_invalid_value() {
        let error = require_f64(&HashMap::new(), "Declination").unwrap_err();

        assert_eq!(error.error_number(), 0x401);
        assert_eq!(error.error_message(), "missing parameter Declination");
    }
}
