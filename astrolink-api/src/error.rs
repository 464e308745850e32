use thiserror::Error;

use crate::request::RequestContext;

/// The closed set of fault conditions a driver can report.
///
/// Numeric codes come from the Alpaca protocol document and are part of the
/// wire contract; adding a condition means adding a tag here with its
/// reserved code, never inventing an ad hoc number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The requested operation is not supported by this device at all.
    NotImplemented,
    /// A supplied value failed validation.
    InvalidValue,
    /// A value was read before anything ever set it.
    ValueNotSet,
    /// The device is not connected.
    NotConnected,
    /// The operation is not allowed while the device is parked.
    InvalidWhileParked,
    /// The operation is not allowed while the device is slaved.
    InvalidWhileSlaved,
    /// The operation is not allowed in the device's current state.
    InvalidOperation,
    /// The named extension action is not supported by this device.
    ActionNotImplemented,
}

impl ErrorKind {
    /// Protocol-reserved numeric code for this condition.
    pub const fn code(self) -> i32 {
        match self {
            ErrorKind::NotImplemented => 0x400,
            ErrorKind::InvalidValue => 0x401,
            ErrorKind::ValueNotSet => 0x402,
            ErrorKind::NotConnected => 0x407,
            ErrorKind::InvalidWhileParked => 0x408,
            ErrorKind::InvalidWhileSlaved => 0x409,
            ErrorKind::InvalidOperation => 0x40B,
            ErrorKind::ActionNotImplemented => 0x40C,
        }
    }

    /// Canonical message, used unless the construction site supplies
    /// situational detail.
    ///
    /// "invlaid value" is long-standing wire text; deployed clients match
    /// on it, so the misspelling stays.
    pub const fn default_message(self) -> &'static str {
        match self {
            ErrorKind::NotImplemented => "not implemented",
            ErrorKind::InvalidValue => "invlaid value",
            ErrorKind::ValueNotSet => "value not set",
            ErrorKind::NotConnected => "not connected",
            ErrorKind::InvalidWhileParked => "invalid while parked",
            ErrorKind::InvalidWhileSlaved => "invalid while slaved",
            ErrorKind::InvalidOperation => "invalid operation",
            ErrorKind::ActionNotImplemented => "action not implemented",
        }
    }
}

/// One protocol fault, fully formed at the point of detection.
///
/// Immutable once constructed; the response-rendering layer consumes it
/// into a wire envelope. Faults raised below the request boundary start
/// with zeroed correlation fields and are backfilled there via
/// [`AlpacaError::with_context`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} - {}", .kind.code(), .message)]
pub struct AlpacaError {
    kind: ErrorKind,
    message: String,
    client_id: u32,
    client_transaction_id: u32,
    server_transaction_id: u32,
}

impl AlpacaError {
    /// Base constructor: the fixed code and canonical message for `kind`,
    /// with explicit correlation fields.
    pub fn new(
        kind: ErrorKind,
        client_id: u32,
        client_transaction_id: u32,
        server_transaction_id: u32,
    ) -> Self {
        Self {
            kind,
            message: kind.default_message().to_string(),
            client_id,
            client_transaction_id,
            server_transaction_id,
        }
    }

    /// Context-free construction: correlation defaults to the 0 sentinel
    /// until the request boundary backfills it.
    fn detached(kind: ErrorKind) -> Self {
        Self::new(kind, 0, 0, 0)
    }

    /// The requested operation is not supported by this device. Detected
    /// with the full request in hand, before a server transaction id was
    /// assigned, so that field stays pinned at 0.
    pub fn not_implemented(context: &RequestContext) -> Self {
        Self::new(
            ErrorKind::NotImplemented,
            context.client_id(),
            context.client_transaction_id(),
            0,
        )
    }

    pub fn invalid_value() -> Self {
        Self::detached(ErrorKind::InvalidValue)
    }

    pub fn value_not_set() -> Self {
        Self::detached(ErrorKind::ValueNotSet)
    }

    pub fn not_connected() -> Self {
        Self::detached(ErrorKind::NotConnected)
    }

    pub fn invalid_while_parked() -> Self {
        Self::detached(ErrorKind::InvalidWhileParked)
    }

    pub fn invalid_while_slaved() -> Self {
        Self::detached(ErrorKind::InvalidWhileSlaved)
    }

    pub fn invalid_operation() -> Self {
        Self::detached(ErrorKind::InvalidOperation)
    }

    pub fn action_not_implemented() -> Self {
        Self::detached(ErrorKind::ActionNotImplemented)
    }

    /// Replace the canonical message with situational detail. The numeric
    /// code is fixed by the kind and never changes.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Fill the correlation fields from the live request context. Applied
    /// at the request boundary to faults raised below it; context-bound
    /// faults are constructed final and never pass through here.
    pub fn with_context(mut self, context: &RequestContext) -> Self {
        self.client_id = context.client_id();
        self.client_transaction_id = context.client_transaction_id();
        self.server_transaction_id = context.server_transaction_id();
        self
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub const fn error_number(&self) -> i32 {
        self.kind.code()
    }

    pub fn error_message(&self) -> &str {
        &self.message
    }

    pub const fn client_id(&self) -> u32 {
        self.client_id
    }

    pub const fn client_transaction_id(&self) -> u32 {
        self.client_transaction_id
    }

    pub const fn server_transaction_id(&self) -> u32 {
        self.server_transaction_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [ErrorKind; 8] = [
        ErrorKind::NotImplemented,
        ErrorKind::InvalidValue,
        ErrorKind::ValueNotSet,
        ErrorKind::NotConnected,
        ErrorKind::InvalidWhileParked,
        ErrorKind::InvalidWhileSlaved,
        ErrorKind::InvalidOperation,
        ErrorKind::ActionNotImplemented,
    ];

    #[test]
    fn test_codes_match_the_protocol_table() {
        assert_eq!(ErrorKind::NotImplemented.code(), 0x400);
        assert_eq!(ErrorKind::InvalidValue.code(), 0x401);
        assert_eq!(ErrorKind::ValueNotSet.code(), 0x402);
        assert_eq!(ErrorKind::NotConnected.code(), 0x407);
        assert_eq!(ErrorKind::InvalidWhileParked.code(), 0x408);
        assert_eq!(ErrorKind::InvalidWhileSlaved.code(), 0x409);
        assert_eq!(ErrorKind::InvalidOperation.code(), 0x40B);
        assert_eq!(ErrorKind::ActionNotImplemented.code(), 0x40C);
    }

    #[test]
    fn test_default_messages_match_the_protocol_table() {
        assert_eq!(ErrorKind::NotImplemented.default_message(), "not implemented");
        assert_eq!(ErrorKind::InvalidValue.default_message(), "invlaid value");
        assert_eq!(ErrorKind::ValueNotSet.default_message(), "value not set");
        assert_eq!(ErrorKind::NotConnected.default_message(), "not connected");
        assert_eq!(
            ErrorKind::InvalidWhileParked.default_message(),
            "invalid while parked"
        );
        assert_eq!(
            ErrorKind::InvalidWhileSlaved.default_message(),
            "invalid while slaved"
        );
        assert_eq!(ErrorKind::InvalidOperation.default_message(), "invalid operation");
        assert_eq!(
            ErrorKind::ActionNotImplemented.default_message(),
            "action not implemented"
        );
    }

    #[test]
    fn test_context_bound_constructor_copies_the_context() {
        let context = RequestContext::new(7, 42, 0);
        let error = AlpacaError::not_implemented(&context);

        assert_eq!(error.error_number(), 0x400);
        assert_eq!(error.error_message(), "not implemented");
        assert_eq!(error.client_id(), 7);
        assert_eq!(error.client_transaction_id(), 42);
        assert_eq!(error.server_transaction_id(), 0);
    }

    #[test]
    fn test_context_free_constructors_default_to_zero_correlation() {
        let errors = [
            AlpacaError::invalid_value(),
            AlpacaError::value_not_set(),
            AlpacaError::not_connected(),
            AlpacaError::invalid_while_parked(),
            AlpacaError::invalid_while_slaved(),
            AlpacaError::invalid_operation(),
            AlpacaError::action_not_implemented(),
        ];

        for error in errors {
            assert_eq!(error.error_message(), error.kind().default_message());
            assert_eq!(error.client_id(), 0);
            assert_eq!(error.client_transaction_id(), 0);
            assert_eq!(error.server_transaction_id(), 0);
        }
    }

    #[test]
    fn test_message_override_never_touches_the_code() {
        for kind in ALL_KINDS {
            let error = AlpacaError::new(kind, 0, 0, 0).with_message("out of range");

            assert_eq!(error.error_number(), kind.code());
            assert_eq!(error.error_message(), "out of range");
        }
    }

    #[test]
    fn test_with_context_backfills_all_correlation_fields() {
        let context = RequestContext::new(3, 100, 55);
        let error = AlpacaError::invalid_while_parked().with_context(&context);

        assert_eq!(error.error_number(), 0x408);
        assert_eq!(error.client_id(), 3);
        assert_eq!(error.client_transaction_id(), 100);
        assert_eq!(error.server_transaction_id(), 55);
    }

    #[test]
    fn test_display_combines_code_and_message() {
        let error = AlpacaError::not_connected();

        assert_eq!(error.to_string(), "1031 - not connected");

        let detailed = AlpacaError::not_connected().with_message("not connected: device busy");

        assert_eq!(detailed.to_string(), "1031 - not connected: device busy");
    }
}
