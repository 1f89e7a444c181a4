use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

use crate::selector::{DeviceSelector, SelectorError};
use crate::simulated::SimulatedBus;

/// Device URL of the FT232H bridge, first interface.
pub const DEFAULT_SELECTOR: &str = "ftdi://ftdi:232h/1";

pub const DEFAULT_FREQUENCY_HZ: u32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    #[error("NACK from device at address 0x{address:02x}")]
    Nack { address: u8 },
    #[error("bus fault writing to address 0x{address:02x}: {kind}")]
    Bus { address: u8, kind: ErrorKind },
}

impl WriteError {
    fn from_kind(address: u8, kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(_) => Self::Nack { address },
            kind => Self::Bus { address, kind },
        }
    }

    pub fn is_nack(&self) -> bool {
        matches!(self, Self::Nack { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error(transparent)]
    Selector(#[from] SelectorError),
    #[error("failed to open {selector}: {message}")]
    Device { selector: String, message: String },
    #[error("{0} requires building with the `ftdi` feature")]
    Unsupported(String),
}

/// The single write primitive every panel goes through.
pub trait Transport {
    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), WriteError>;
}

impl<T: I2c> Transport for T {
    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), WriteError> {
        log::debug!("i2c write 0x{address:02x}: {}", hex::encode_upper(bytes));
        I2c::write(self, address, bytes).map_err(|e| WriteError::from_kind(address, e.kind()))
    }
}

/// Where writes go. The simulated bus is only ever used when asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Ftdi,
    Simulated,
}

#[derive(Debug, Clone)]
pub struct BusConfig {
    pub selector: String,
    pub backend: Backend,
    pub frequency_hz: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR.to_string(),
            backend: Backend::default(),
            frequency_hz: DEFAULT_FREQUENCY_HZ,
        }
    }
}

/// Owns the open bus for the life of the process. Dropping it releases the bridge.
pub struct BusHandle {
    name: String,
    transport: Box<dyn Transport + Send>,
}

impl BusHandle {
    pub fn new(name: impl Into<String>, transport: impl Transport + Send + 'static) -> Self {
        let name = name.into();
        log::info!("I2C bus {name} open");
        Self {
            name,
            transport: Box::new(transport),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Transport for BusHandle {
    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), WriteError> {
        self.transport.write(address, bytes)
    }
}

impl Drop for BusHandle {
    fn drop(&mut self) {
        log::info!("I2C bus {} released", self.name);
    }
}

pub fn open(config: &BusConfig) -> Result<BusHandle, OpenError> {
    let selector: DeviceSelector = config.selector.parse()?;
    match config.backend {
        Backend::Simulated => {
            log::warn!("simulated backend selected, nothing is written to {selector}");
            Ok(BusHandle::new(format!("{selector} (simulated)"), SimulatedBus::default()))
        }
        Backend::Ftdi => open_ftdi(&selector, config.frequency_hz),
    }
}

#[cfg(feature = "ftdi")]
fn open_ftdi(selector: &DeviceSelector, frequency_hz: u32) -> Result<BusHandle, OpenError> {
    let fail = |message: String| OpenError::Device {
        selector: selector.to_string(),
        message,
    };

    let interface = match selector.interface {
        1 => ftdi::Interface::A,
        2 => ftdi::Interface::B,
        3 => ftdi::Interface::C,
        _ => ftdi::Interface::D,
    };
    let device = ftdi::find_by_vid_pid(selector.vendor_id, selector.product_id)
        .interface(interface)
        .open()
        .map_err(|e| fail(e.to_string()))?;
    let hal = ftdi_embedded_hal::FtHal::init_freq(device, frequency_hz)
        .map_err(|e| fail(e.to_string()))?;
    let i2c = hal.i2c().map_err(|e| fail(e.to_string()))?;

    log::info!("MPSSE I2C at {frequency_hz} Hz");
    Ok(BusHandle::new(selector.to_string(), i2c))
}

#[cfg(not(feature = "ftdi"))]
fn open_ftdi(selector: &DeviceSelector, _frequency_hz: u32) -> Result<BusHandle, OpenError> {
    Err(OpenError::Unsupported(selector.to_string()))
}
