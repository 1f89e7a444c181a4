//! The three write targets of the test bench and what pressing their send
//! button does.

use crate::bus::{Transport, WriteError};
use crate::encoding::{Radix, ValueError};
use crate::register_bank::{RegisterBank, REGISTER_COUNT};

pub const SLAVE_MAIN_ADDRESS: u8 = 0x2B;
pub const REGISTER_BANK_ADDRESS: u8 = 0x7C;
pub const STOP_MEMORY_ADDRESS: u8 = 0x07;

pub const STOP_MEMORY_ACTIVE: u8 = 0xFF;
pub const STOP_MEMORY_INACTIVE: u8 = 0x00;

/// Stop-memory dropdown, in display order. The second entry is preselected.
pub const STOP_MEMORY_OPTIONS: [&str; 2] = ["11111111", "00000000"];
pub const STOP_MEMORY_DEFAULT: &str = STOP_MEMORY_OPTIONS[1];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    SlaveMain,
    RegisterBank,
    StopMemory,
}

/// What a panel shows when its device does not acknowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NackPolicy {
    Report,
    Ignore,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::SlaveMain, Target::RegisterBank, Target::StopMemory];

    pub fn address(&self) -> u8 {
        match self {
            Self::SlaveMain => SLAVE_MAIN_ADDRESS,
            Self::RegisterBank => REGISTER_BANK_ADDRESS,
            Self::StopMemory => STOP_MEMORY_ADDRESS,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::SlaveMain => "SLAVE MAIN",
            Self::RegisterBank => "REGISTER BANK",
            Self::StopMemory => "STOP MEMORY",
        }
    }

    // The register bank has always dropped NACKs without telling the
    // operator. Whether that was wanted is still open; it is logged instead.
    pub fn nack_policy(&self) -> NackPolicy {
        match self {
            Self::RegisterBank => NackPolicy::Ignore,
            Self::SlaveMain | Self::StopMemory => NackPolicy::Report,
        }
    }

    fn success_message(&self) -> String {
        match self {
            Self::SlaveMain => "Data sent successfully to SLAVE MAIN ✔️".to_string(),
            Self::RegisterBank => {
                "All registers data sent successfully to REGISTER BANK ✔️".to_string()
            }
            Self::StopMemory => format!(
                "Data sent successfully to STOP MEMORY at address {:#x} ✔️",
                STOP_MEMORY_ADDRESS
            ),
        }
    }
}

/// Result of one send, as the operator sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Failure(String),
    /// Nothing is displayed.
    Silent,
}

impl Outcome {
    fn from_write(target: Target, result: Result<(), WriteError>) -> Self {
        match result {
            Ok(()) => Self::Success(target.success_message()),
            Err(e) if e.is_nack() && target.nack_policy() == NackPolicy::Ignore => {
                log::warn!("{}: {e} (not shown to operator)", target.title());
                Self::Silent
            }
            Err(e) => {
                log::error!("{}: {e}", target.title());
                Self::Failure(format!("Error: {e}"))
            }
        }
    }

    fn invalid(target: Target, error: ValueError) -> Self {
        log::error!("{}: {error}", target.title());
        Self::Failure(format!("Error: {error}"))
    }
}

fn send<T: Transport + ?Sized>(bus: &mut T, target: Target, payload: &[u8]) -> Outcome {
    log::info!(
        "{} <- {} (0x{:02x})",
        target.title(),
        hex::encode_upper(payload),
        target.address()
    );
    Outcome::from_write(target, bus.write(target.address(), payload))
}

pub fn send_slave_main<T: Transport + ?Sized>(bus: &mut T, radix: Radix, value: &str) -> Outcome {
    match radix.parse(value) {
        Ok(byte) => send(bus, Target::SlaveMain, &[byte]),
        Err(e) => Outcome::invalid(Target::SlaveMain, e),
    }
}

pub fn send_register_bank<T: Transport + ?Sized>(
    bus: &mut T,
    registers: [&str; REGISTER_COUNT],
) -> Outcome {
    match RegisterBank::from_binary(registers) {
        Ok(bank) => send(bus, Target::RegisterBank, &bank.payload()),
        Err(e) => Outcome::invalid(Target::RegisterBank, e),
    }
}

pub fn stop_memory_byte(value: &str) -> Result<u8, ValueError> {
    Radix::Binary.parse(value)
}

pub fn send_stop_memory<T: Transport + ?Sized>(bus: &mut T, value: &str) -> Outcome {
    match stop_memory_byte(value) {
        Ok(byte) => send(bus, Target::StopMemory, &[byte]),
        Err(e) => Outcome::invalid(Target::StopMemory, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    fn nack() -> ErrorKind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
    }

    #[test]
    fn slave_main_writes_selected_byte() {
        let expectations = [I2cTransaction::write(0x2B, vec![1])];
        let mut i2c = I2cMock::new(&expectations);

        let outcome = send_slave_main(&mut i2c, Radix::Binary, "00000001");
        assert_eq!(
            outcome,
            Outcome::Success("Data sent successfully to SLAVE MAIN ✔️".to_string())
        );
        i2c.done();
    }

    #[test]
    fn slave_main_reports_nack() {
        let expectations = [I2cTransaction::write(0x2B, vec![1]).with_error(nack())];
        let mut i2c = I2cMock::new(&expectations);

        let outcome = send_slave_main(&mut i2c, Radix::Binary, "00000001");
        assert_eq!(
            outcome,
            Outcome::Failure("Error: NACK from device at address 0x2b".to_string())
        );
        i2c.done();
    }

    #[test]
    fn slave_main_accepts_every_radix() {
        let expectations = [
            I2cTransaction::write(0x2B, vec![0xA5]),
            I2cTransaction::write(0x2B, vec![0xA5]),
            I2cTransaction::write(0x2B, vec![0xA5]),
        ];
        let mut i2c = I2cMock::new(&expectations);

        for (radix, text) in [
            (Radix::Binary, "10100101"),
            (Radix::Hexadecimal, "A5"),
            (Radix::Decimal, "165"),
        ] {
            assert!(matches!(
                send_slave_main(&mut i2c, radix, text),
                Outcome::Success(_)
            ));
        }
        i2c.done();
    }

    #[test]
    fn tampered_value_is_not_written() {
        let mut i2c = I2cMock::new(&[]);

        let outcome = send_slave_main(&mut i2c, Radix::Decimal, "300");
        assert!(matches!(outcome, Outcome::Failure(msg) if msg.starts_with("Error: ")));
        i2c.done();
    }

    #[test]
    fn register_bank_sends_three_bytes() {
        let expectations = [I2cTransaction::write(0x7C, vec![0x01, 0x00, 0xFF])];
        let mut i2c = I2cMock::new(&expectations);

        let outcome = send_register_bank(&mut i2c, ["00000001", "00000000", "11111111"]);
        assert_eq!(
            outcome,
            Outcome::Success(
                "All registers data sent successfully to REGISTER BANK ✔️".to_string()
            )
        );
        i2c.done();
    }

    #[test]
    fn register_bank_swallows_nack() {
        let expectations =
            [I2cTransaction::write(0x7C, vec![0x01, 0x00, 0xFF]).with_error(nack())];
        let mut i2c = I2cMock::new(&expectations);

        let outcome = send_register_bank(&mut i2c, ["00000001", "00000000", "11111111"]);
        assert_eq!(outcome, Outcome::Silent);
        i2c.done();
    }

    #[test]
    fn register_bank_still_reports_other_faults() {
        let expectations = [I2cTransaction::write(0x7C, vec![0, 0, 0])
            .with_error(ErrorKind::ArbitrationLoss)];
        let mut i2c = I2cMock::new(&expectations);

        let outcome = send_register_bank(&mut i2c, ["00000000"; 3]);
        assert!(matches!(outcome, Outcome::Failure(_)));
        i2c.done();
    }

    #[test]
    fn stop_memory_default_is_inactive() {
        assert_eq!(stop_memory_byte(STOP_MEMORY_DEFAULT), Ok(STOP_MEMORY_INACTIVE));
        assert_eq!(stop_memory_byte(STOP_MEMORY_OPTIONS[0]), Ok(STOP_MEMORY_ACTIVE));
    }

    #[test]
    fn stop_memory_success_names_address() {
        let expectations = [I2cTransaction::write(0x07, vec![0xFF])];
        let mut i2c = I2cMock::new(&expectations);

        let outcome = send_stop_memory(&mut i2c, "11111111");
        assert_eq!(
            outcome,
            Outcome::Success(
                "Data sent successfully to STOP MEMORY at address 0x7 ✔️".to_string()
            )
        );
        i2c.done();
    }

    #[test]
    fn stop_memory_reports_nack() {
        let expectations = [I2cTransaction::write(0x07, vec![0x00]).with_error(nack())];
        let mut i2c = I2cMock::new(&expectations);

        let outcome = send_stop_memory(&mut i2c, STOP_MEMORY_DEFAULT);
        assert!(matches!(outcome, Outcome::Failure(msg) if msg.contains("NACK")));
        i2c.done();
    }

    #[test]
    fn targets_are_fixed() {
        assert_eq!(
            Target::ALL.map(|t| t.address()),
            [0x2B, 0x7C, 0x07]
        );
        assert_eq!(Target::RegisterBank.nack_policy(), NackPolicy::Ignore);
        assert_eq!(Target::SlaveMain.nack_policy(), NackPolicy::Report);
        assert_eq!(Target::StopMemory.nack_policy(), NackPolicy::Report);
    }
}
