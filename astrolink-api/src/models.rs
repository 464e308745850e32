use std::fmt;

use serde::{Deserialize, Serialize};

/// Kinds of device this server can expose. Lowercase on the wire and in
/// the URL space.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Telescope,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DeviceType::Telescope => write!(f, "telescope"),
        }
    }
}

/// Payload of the management description endpoint.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDescription {
    #[serde(rename = "ServerName")]
    pub server_name: String,
    #[serde(rename = "Manufacturer")]
    pub manufacturer: String,
    #[serde(rename = "ManufacturerVersion")]
    pub manufacturer_version: String,
    #[serde(rename = "Location")]
    pub location: String,
}

/// One entry of the configured-devices listing.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredDevice {
    #[serde(rename = "DeviceName")]
    pub device_name: String,
    #[serde(rename = "DeviceType")]
    pub device_type: DeviceType,
    #[serde(rename = "DeviceNumber")]
    pub device_number: u32,
    #[serde(rename = "UniqueID")]
    pub unique_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_type_is_lowercase_on_the_wire() {
        let json = serde_json::to_string(&DeviceType::Telescope).unwrap();

        assert_eq!(json, "\"telescope\"");
        assert_eq!(DeviceType::Telescope.to_string(), "telescope");
    }

    #[test]
    fn test_configured_device_wire_names() {
        let device = ConfiguredDevice {
            device_name: String::from("Telescope Simulator"),
            device_type: DeviceType::Telescope,
            device_number: 0,
            unique_id: String::from("tel-sim-0"),
        };

        let json = serde_json::to_value(&device).unwrap();

        assert_eq!(json["DeviceName"], "Telescope Simulator");
        assert_eq!(json["DeviceType"], "telescope");
        assert_eq!(json["DeviceNumber"], 0);
        assert_eq!(json["UniqueID"], "tel-sim-0");
    }
}
