pub mod settings;

pub use settings::{Description, Logger, Server, Settings, Telescope};
