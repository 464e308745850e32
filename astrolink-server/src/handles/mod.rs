mod device_handle;
mod management_handle;
mod telescope_handle;

pub use device_handle::*;
pub use management_handle::*;
pub use telescope_handle::*;
