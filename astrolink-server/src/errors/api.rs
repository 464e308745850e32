use astrolink_api::error::AlpacaError;
use astrolink_api::models::DeviceType;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A protocol-defined fault; rendered as a 200 response with the error
    /// envelope so clients can branch on the numeric code.
    #[error("{0}")]
    Device(#[from] AlpacaError),

    /// The URL names a device this server does not serve; a transport
    /// fault, not a protocol envelope.
    #[error("no {device_type} device with number {device_number}")]
    UnknownDevice {
        device_type: DeviceType,
        device_number: u32,
    },

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}
