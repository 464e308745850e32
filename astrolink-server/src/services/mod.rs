mod device_registry;
mod transaction_service;

pub use device_registry::*;
pub use transaction_service::*;
