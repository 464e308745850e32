use std::sync::{Mutex, MutexGuard};

use astrolink_api::error::AlpacaError;
use async_trait::async_trait;
use uuid::Uuid;

use super::Device;

const DRIVER_VERSION: &str = env!("CARGO_PKG_VERSION");
const INTERFACE_VERSION: i32 = 3;

/// Protocol-visible state of the simulated mount.
#[derive(Debug, Clone)]
struct TelescopeState {
    connected: bool,
    parked: bool,
    slaved: bool,
    tracking: bool,
    right_ascension: f64,
    declination: f64,
    target_right_ascension: Option<f64>,
    target_declination: Option<f64>,
}

impl Default for TelescopeState {
    fn default() -> Self {
        // Boots at the park position, pointing at the pole.
        Self {
            connected: false,
            parked: true,
            slaved: false,
            tracking: false,
            right_ascension: 0.0,
            declination: 90.0,
            target_right_ascension: None,
            target_declination: None,
        }
    }
}

/// In-process driver for a parkable, slaveable equatorial mount. Slews
/// complete instantly; the interesting part is the precondition checking,
/// which raises the taxonomy fault at the exact point of detection.
pub struct TelescopeSimulator {
    name: String,
    unique_id: String,
    state: Mutex<TelescopeState>,
}

impl TelescopeSimulator {
    pub fn new(name: impl Into<String>, unique_id: Option<String>) -> Self {
        Self {
            name: name.into(),
            unique_id: unique_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            state: Mutex::new(TelescopeState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, TelescopeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn guard_connected(state: &TelescopeState) -> Result<(), AlpacaError> {
        if !state.connected {
            return Err(AlpacaError::not_connected());
        }

        Ok(())
    }

    pub fn right_ascension(&self) -> Result<f64, AlpacaError> {
        let state = self.state();
        Self::guard_connected(&state)?;

        Ok(state.right_ascension)
    }

    pub fn declination(&self) -> Result<f64, AlpacaError> {
        let state = self.state();
        Self::guard_connected(&state)?;

        Ok(state.declination)
    }

    pub fn at_park(&self) -> Result<bool, AlpacaError> {
        let state = self.state();
        Self::guard_connected(&state)?;

        Ok(state.parked)
    }

    pub fn tracking(&self) -> Result<bool, AlpacaError> {
        let state = self.state();
        Self::guard_connected(&state)?;

        Ok(state.tracking)
    }

    pub fn slaved(&self) -> Result<bool, AlpacaError> {
        let state = self.state();
        Self::guard_connected(&state)?;

        Ok(state.slaved)
    }

    pub fn target_right_ascension(&self) -> Result<f64, AlpacaError> {
        let state = self.state();
        Self::guard_connected(&state)?;

        state.target_right_ascension.ok_or_else(AlpacaError::value_not_set)
    }

    pub fn target_declination(&self) -> Result<f64, AlpacaError> {
        let state = self.state();
        Self::guard_connected(&state)?;

        state.target_declination.ok_or_else(AlpacaError::value_not_set)
    }

    pub fn set_target_right_ascension(&self, value: f64) -> Result<(), AlpacaError> {
        let mut state = self.state();
        Self::guard_connected(&state)?;
        validate_right_ascension(value)?;

        state.target_right_ascension = Some(value);

        Ok(())
    }

    pub fn set_target_declination(&self, value: f64) -> Result<(), AlpacaError> {
        let mut state = self.state();
        Self::guard_connected(&state)?;
        validate_declination(value)?;

        state.target_declination = Some(value);

        Ok(())
    }

    pub fn park(&self) -> Result<(), AlpacaError> {
        let mut state = self.state();
        Self::guard_connected(&state)?;

        if state.slaved {
            return Err(AlpacaError::invalid_while_slaved());
        }

        state.parked = true;
        state.tracking = false;
        state.right_ascension = 0.0;
        state.declination = 90.0;

        Ok(())
    }

    pub fn unpark(&self) -> Result<(), AlpacaError> {
        let mut state = self.state();
        Self::guard_connected(&state)?;

        state.parked = false;

        Ok(())
    }

    pub fn set_tracking(&self, enabled: bool) -> Result<(), AlpacaError> {
        let mut state = self.state();
        Self::guard_connected(&state)?;

        if state.parked {
            return Err(AlpacaError::invalid_while_parked());
        }

        state.tracking = enabled;

        Ok(())
    }

    pub fn set_slaved(&self, slaved: bool) -> Result<(), AlpacaError> {
        let mut state = self.state();
        Self::guard_connected(&state)?;

        if slaved && state.parked {
            return Err(
                AlpacaError::invalid_operation().with_message("cannot slave a parked telescope")
            );
        }

        state.slaved = slaved;

        Ok(())
    }

    pub fn slew_to_coordinates(
        &self,
        right_ascension: f64,
        declination: f64,
    ) -> Result<(), AlpacaError> {
        let mut state = self.state();
        Self::guard_connected(&state)?;

        if state.parked {
            return Err(AlpacaError::invalid_while_parked());
        }

        if state.slaved {
            return Err(AlpacaError::invalid_while_slaved());
        }

        validate_right_ascension(right_ascension)?;
        validate_declination(declination)?;

        state.right_ascension = right_ascension;
        state.declination = declination;
        state.target_right_ascension = Some(right_ascension);
        state.target_declination = Some(declination);
        state.tracking = true;

        Ok(())
    }
}

#[async_trait]
impl Device for TelescopeSimulator {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn description(&self) -> String {
        String::from("Simulated equatorial mount")
    }

    fn driver_info(&self) -> String {
        format!("astrolink telescope simulator {DRIVER_VERSION}")
    }

    fn driver_version(&self) -> String {
        DRIVER_VERSION.to_string()
    }

    fn interface_version(&self) -> i32 {
        INTERFACE_VERSION
    }

    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn supported_actions(&self) -> Vec<String> {
        vec![String::from("simulator:reset")]
    }

    async fn connected(&self) -> bool {
        self.state().connected
    }

    async fn set_connected(&self, connected: bool) -> Result<(), AlpacaError> {
        let mut state = self.state();

        if state.connected == connected {
            return Ok(());
        }

        // Connecting or disconnecting resets the mount to its boot state.
        *state = TelescopeState {
            connected,
            ..TelescopeState::default()
        };

        Ok(())
    }

    async fn action(&self, name: &str, parameters: &str) -> Result<String, AlpacaError> {
        let _ = parameters;

        match name.to_ascii_lowercase().as_str() {
            "simulator:reset" => {
                let mut state = self.state();
                Self::guard_connected(&state)?;

                *state = TelescopeState {
                    connected: true,
                    ..TelescopeState::default()
                };

                Ok(String::from("reset"))
            }
            _ => Err(AlpacaError::action_not_implemented()),
        }
    }
}

fn validate_right_ascension(value: f64) -> Result<(), AlpacaError> {
    if !(0.0..24.0).contains(&value) {
        return Err(AlpacaError::invalid_value()
            .with_message(format!("right ascension {value} outside 0..24 hours")));
    }

    Ok(())
}

fn validate_declination(value: f64) -> Result<(), AlpacaError> {
    if !(-90.0..=90.0).contains(&value) {
        return Err(AlpacaError::invalid_value()
            .with_message(format!("declination {value} outside -90..+90 degrees")));
    }

    Ok(())
}
