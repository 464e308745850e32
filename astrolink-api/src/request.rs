/// Correlation identifiers for one accepted request.
///
/// Built once by the request-handling layer and handed read-only to
/// whatever renders the response, so a polling client can match a reply to
/// the call that caused it even across retries or out-of-order delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    client_id: u32,
    client_transaction_id: u32,
    server_transaction_id: u32,
}

impl RequestContext {
    pub const fn new(
        client_id: u32,
        client_transaction_id: u32,
        server_transaction_id: u32,
    ) -> Self {
        Self {
            client_id,
            client_transaction_id,
            server_transaction_id,
        }
    }

    /// Caller-supplied client application identifier, echoed as-is.
    pub const fn client_id(&self) -> u32 {
        self.client_id
    }

    /// Client-chosen identifier correlating retries of the same call.
    pub const fn client_transaction_id(&self) -> u32 {
        self.client_transaction_id
    }

    /// Server-assigned identifier. 0 means no transaction was assigned,
    /// e.g. the request failed before the server accepted it.
    pub const fn server_transaction_id(&self) -> u32 {
        self.server_transaction_id
    }
}
