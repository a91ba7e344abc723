//=========================================================================
// Device Monitor
//=========================================================================
//
// Binds the tracker to one depth-camera device and follows its
// connectivity.
//
// ```text
//   discover() ── found, started ──► Connected
//        │      └─ start failed ───► Error
//        └──────── none found ─────► NoDevice
//
//   Status(bound, Disconnected | NotPowered | Error)
//        └─► stop, unbind, record the loss, rediscover
//   Status(any, Connected) while unbound
//        └─► discover
// ```
//
// The driver itself is a trait so the platform layer can plug in a real
// sensor SDK and tests can plug in a scripted one.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, info, trace, warn};
use std::fmt;

//=== Device Types ========================================================

/// Driver-assigned device handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(pub u32);

/// Connectivity reported by the driver for one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceStatus {
    Connected,
    Disconnected,
    NotPowered,
    Error,
}

impl DeviceStatus {
    /// Returns `true` for statuses that mean the device is gone.
    pub fn is_loss(self) -> bool {
        !matches!(self, DeviceStatus::Connected)
    }
}

/// State of the tracker's device binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceState {
    #[default]
    NoDevice,
    Connected,
    Disconnected,
    NotPowered,
    Error,
}

impl DeviceState {
    /// User-facing status line.
    pub fn status_text(self) -> &'static str {
        match self {
            DeviceState::NoDevice => "Found no sensors connected",
            DeviceState::Connected => "Status: Connected",
            DeviceState::Disconnected => "Status: Disconnected",
            DeviceState::NotPowered => "Status: Connect the power",
            DeviceState::Error => "Status: Error",
        }
    }
}

impl From<DeviceStatus> for DeviceState {
    fn from(status: DeviceStatus) -> Self {
        match status {
            DeviceStatus::Connected => DeviceState::Connected,
            DeviceStatus::Disconnected => DeviceState::Disconnected,
            DeviceStatus::NotPowered => DeviceState::NotPowered,
            DeviceStatus::Error => DeviceState::Error,
        }
    }
}

//=== TrackerError ========================================================

/// Failures reported by a device driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// The device refused to start streaming.
    StartFailed(String),

    /// The device disappeared between discovery and use.
    DeviceUnavailable,
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::StartFailed(reason) => write!(f, "Sensor failed to start: {reason}"),
            TrackerError::DeviceUnavailable => write!(f, "Sensor is unavailable"),
        }
    }
}

impl std::error::Error for TrackerError {}

//=== DeviceDriver ========================================================

/// Sensor SDK seam.
pub trait DeviceDriver {
    /// Returns the first connected device, if any.
    fn discover(&mut self) -> Option<DeviceId>;

    /// Enables skeleton and interaction streams on `device`.
    fn start(&mut self, device: DeviceId) -> Result<(), TrackerError>;

    fn stop(&mut self, device: DeviceId);
}

//=== DeviceMonitor =======================================================

/// Device binding and status line.
pub struct DeviceMonitor {
    driver: Box<dyn DeviceDriver>,
    bound: Option<DeviceId>,
    state: DeviceState,
    status_text: String,
}

impl DeviceMonitor {
    pub fn new(driver: Box<dyn DeviceDriver>) -> Self {
        Self {
            driver,
            bound: None,
            state: DeviceState::NoDevice,
            status_text: DeviceState::NoDevice.status_text().to_string(),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> DeviceState {
        self.state
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn bound(&self) -> Option<DeviceId> {
        self.bound
    }

    //--- Lifecycle --------------------------------------------------------

    /// Looks for a device and starts it.
    ///
    /// A start failure keeps the binding so a later loss status for the
    /// same device still stops it.
    pub fn discover(&mut self) {
        let Some(device) = self.driver.discover() else {
            debug!(target: "tracking::device", "No sensor found");
            self.set_state(DeviceState::NoDevice);
            return;
        };

        self.bound = Some(device);
        self.start(device);
    }

    /// Reacts to a connectivity change from the driver.
    ///
    /// Returns `true` if the bound device was lost.
    pub fn on_status(&mut self, device: DeviceId, status: DeviceStatus) -> bool {
        match (self.bound, status) {
            (Some(bound), s) if bound == device && s.is_loss() => {
                warn!(target: "tracking::device", "Sensor {:?} lost: {:?}", device, s);
                self.driver.stop(device);
                self.bound = None;
                self.set_state(DeviceState::from(s));
                self.rediscover();
                true
            }
            (None, DeviceStatus::Connected) => {
                info!(target: "tracking::device", "Sensor {:?} plugged in", device);
                self.discover();
                false
            }
            (Some(bound), DeviceStatus::Connected)
                if bound == device && self.state == DeviceState::Error =>
            {
                debug!(target: "tracking::device", "Retrying sensor {:?}", device);
                self.start(device);
                false
            }
            _ => {
                trace!(target: "tracking::device", "Ignoring {:?} from {:?}", status, device);
                false
            }
        }
    }

    /// Records an unreadable frame.
    pub fn on_frame_error(&mut self) {
        warn!(target: "tracking::device", "Sensor delivered an unreadable frame");
        self.set_state(DeviceState::Error);
    }

    /// Stops the bound device, if any.
    pub fn shutdown(&mut self) {
        if let Some(device) = self.bound.take() {
            debug!(target: "tracking::device", "Stopping sensor {:?}", device);
            self.driver.stop(device);
        }
        self.set_state(DeviceState::NoDevice);
    }

    //--- Internal ---------------------------------------------------------

    fn start(&mut self, device: DeviceId) {
        match self.driver.start(device) {
            Ok(()) => {
                info!(target: "tracking::device", "Sensor {:?} connected", device);
                self.set_state(DeviceState::Connected);
            }
            Err(e) => {
                error!(target: "tracking::device", "Sensor {:?}: {}", device, e);
                self.state = DeviceState::Error;
                self.status_text = "Unable to start the sensor".to_string();
            }
        }
    }

    // A failed rediscovery leaves the loss state visible.
    fn rediscover(&mut self) {
        if self.driver.discover().is_some() {
            self.discover();
        }
    }

    fn set_state(&mut self, state: DeviceState) {
        self.state = state;
        self.status_text = state.status_text().to_string();
    }
}

impl fmt::Debug for DeviceMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceMonitor")
            .field("bound", &self.bound)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Test Driver
//=========================================================================

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Calls observed by `ScriptedDriver`.
    pub(crate) type DriverLog = Rc<RefCell<Vec<String>>>;

    /// Driver whose discovery result and start outcome are set by the test.
    pub(crate) struct ScriptedDriver {
        pub(crate) available: Rc<RefCell<Option<DeviceId>>>,
        pub(crate) fail_start: Rc<Cell<bool>>,
        pub(crate) log: DriverLog,
    }

    impl ScriptedDriver {
        pub(crate) fn new(device: Option<DeviceId>) -> Self {
            Self {
                available: Rc::new(RefCell::new(device)),
                fail_start: Rc::new(Cell::new(false)),
                log: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    impl DeviceDriver for ScriptedDriver {
        fn discover(&mut self) -> Option<DeviceId> {
            *self.available.borrow()
        }

        fn start(&mut self, device: DeviceId) -> Result<(), TrackerError> {
            self.log.borrow_mut().push(format!("start {}", device.0));
            if self.fail_start.get() {
                Err(TrackerError::StartFailed("busy".into()))
            } else {
                Ok(())
            }
        }

        fn stop(&mut self, device: DeviceId) {
            self.log.borrow_mut().push(format!("stop {}", device.0));
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
