use std::collections::HashMap;
use std::sync::Arc;

use astrolink_api::models::{ConfiguredDevice, DeviceType};

use crate::devices::{Device, TelescopeSimulator};

/// Every device this server exposes, keyed the way the URL space
/// addresses them.
pub struct DeviceRegistry {
    telescopes: HashMap<u32, Arc<TelescopeSimulator>>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self {
            telescopes: HashMap::new(),
        }
    }

    pub fn register_telescope(&mut self, device_number: u32, telescope: Arc<TelescopeSimulator>) {
        self.telescopes.insert(device_number, telescope);
    }

    /// Type-erased lookup for the common device operations.
    pub fn device(&self, device_type: DeviceType, device_number: u32) -> Option<Arc<dyn Device>> {
        match device_type {
            DeviceType::Telescope => self
                .telescopes
                .get(&device_number)
                .map(|telescope| telescope.clone() as Arc<dyn Device>),
        }
    }

    pub fn telescope(&self, device_number: u32) -> Option<Arc<TelescopeSimulator>> {
        self.telescopes.get(&device_number).cloned()
    }

    pub fn configured_devices(&self) -> Vec<ConfiguredDevice> {
        let mut devices: Vec<ConfiguredDevice> = self
            .telescopes
            .iter()
            .map(|(number, telescope)| ConfiguredDevice {
                device_name: telescope.name(),
                device_type: DeviceType::Telescope,
                device_number: *number,
                unique_id: telescope.unique_id().to_string(),
            })
            .collect();

        devices.sort_by_key(|device| device.device_number);

        devices
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_misses_return_none() {
        let registry = DeviceRegistry::new();

        assert!(registry.device(DeviceType::Telescope, 0).is_none());
        assert!(registry.telescope(0).is_none());
        assert!(registry.configured_devices().is_empty());
    }

    #[test]
    fn test_registered_telescope_is_listed_and_resolvable() {
        let mut registry = DeviceRegistry::new();
        registry.register_telescope(
            0,
            Arc::new(TelescopeSimulator::new("Main Scope", Some(String::from("tel-0")))),
        );

        assert!(registry.device(DeviceType::Telescope, 0).is_some());

        let devices = registry.configured_devices();

        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].device_name, "Main Scope");
        assert_eq!(devices[0].device_number, 0);
        assert_eq!(devices[0].unique_id, "tel-0");
    }
}
