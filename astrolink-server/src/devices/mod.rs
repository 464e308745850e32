mod telescope;

pub use telescope::TelescopeSimulator;

use astrolink_api::error::AlpacaError;
use async_trait::async_trait;

/// Operations every exposed device answers, independent of its kind.
///
/// Drivers report faults exclusively through the protocol taxonomy; an
/// untyped failure never crosses this seam.
#[async_trait]
pub trait Device: Send + Sync {
    fn name(&self) -> String;
    fn description(&self) -> String;
    fn driver_info(&self) -> String;
    fn driver_version(&self) -> String;
    fn interface_version(&self) -> i32;
    fn unique_id(&self) -> &str;
    fn supported_actions(&self) -> Vec<String>;

    async fn connected(&self) -> bool;
    async fn set_connected(&self, connected: bool) -> Result<(), AlpacaError>;

    /// Driver-specific extension command. Names outside
    /// [`Device::supported_actions`] fail with `ActionNotImplemented`.
    async fn action(&self, name: &str, parameters: &str) -> Result<String, AlpacaError>;
}
