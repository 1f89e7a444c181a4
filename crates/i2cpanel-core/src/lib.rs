//! Core of the I2C test-bench panel: value encoding, register-bank assembly,
//! the bus transport and the three panel actions.

pub mod bus;
pub mod encoding;
pub mod panel;
pub mod register_bank;
pub mod selector;
pub mod simulated;

pub use bus::{open, Backend, BusConfig, BusHandle, OpenError, Transport, WriteError};
pub use encoding::{Radix, ValueError};
pub use panel::{send_register_bank, send_slave_main, send_stop_memory, NackPolicy, Outcome, Target};
pub use register_bank::{RegisterBank, REGISTER_COUNT};
pub use selector::{DeviceSelector, SelectorError};
pub use simulated::{RecordedWrite, SimulatedBus};
