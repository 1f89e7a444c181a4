//! Three 8-bit registers written as one 24-bit payload.

use crate::encoding::{Radix, ValueError};

pub const REGISTER_COUNT: usize = 3;

const BITS: usize = 8 * REGISTER_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegisterBank {
    registers: [u8; REGISTER_COUNT],
}

impl RegisterBank {
    pub fn new(registers: [u8; REGISTER_COUNT]) -> Self {
        Self { registers }
    }

    /// Builds the bank from register 1, 2 and 3 selected as binary strings.
    pub fn from_binary(selections: [&str; REGISTER_COUNT]) -> Result<Self, ValueError> {
        let mut registers = [0u8; REGISTER_COUNT];
        for (register, text) in registers.iter_mut().zip(selections) {
            *register = Radix::Binary.parse(text)?;
        }
        Ok(Self { registers })
    }

    pub fn from_bit_string(bits: &str) -> Result<Self, ValueError> {
        if bits.len() != BITS || !bits.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(ValueError::BitString(bits.to_string()));
        }
        let mut registers = [0u8; REGISTER_COUNT];
        for (register, chunk) in registers.iter_mut().zip(bits.as_bytes().chunks(8)) {
            let chunk = std::str::from_utf8(chunk)
                .map_err(|_| ValueError::BitString(bits.to_string()))?;
            *register = Radix::Binary.parse(chunk)?;
        }
        Ok(Self { registers })
    }

    pub fn registers(&self) -> [u8; REGISTER_COUNT] {
        self.registers
    }

    /// Register 1 first, most significant bit first.
    pub fn bit_string(&self) -> String {
        self.registers
            .iter()
            .map(|register| Radix::Binary.format(*register))
            .collect()
    }

    /// Bytes on the wire, taken from the 24-bit string eight bits at a time.
    pub fn payload(&self) -> [u8; REGISTER_COUNT] {
        let bits = self.bit_string();
        let mut payload = [0u8; REGISTER_COUNT];
        for (byte, chunk) in payload.iter_mut().zip(bits.as_bytes().chunks(8)) {
            *byte = chunk
                .iter()
                .fold(0u8, |acc, bit| (acc << 1) | u8::from(*bit == b'1'));
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_payload_in_register_order() {
        let bank = RegisterBank::from_binary(["00000001", "00000000", "11111111"]).unwrap();
        assert_eq!(bank.bit_string(), "000000010000000011111111");
        assert_eq!(bank.payload(), [0x01, 0x00, 0xFF]);
    }

    #[test]
    fn concatenation_and_split_preserve_registers() {
        let samples = [0x00u8, 0x01, 0x0F, 0x55, 0x80, 0xAA, 0xC3, 0xFE, 0xFF];
        for &r1 in &samples {
            for &r2 in &samples {
                for &r3 in &samples {
                    let bank = RegisterBank::new([r1, r2, r3]);
                    let bits = bank.bit_string();
                    assert_eq!(bits.len(), 24);
                    assert_eq!(bank.payload(), [r1, r2, r3]);
                    assert_eq!(RegisterBank::from_bit_string(&bits), Ok(bank));
                }
            }
        }
    }

    #[test]
    fn every_byte_survives_in_every_position() {
        for value in 0..=u8::MAX {
            let bank = RegisterBank::new([value, !value, value.rotate_left(3)]);
            assert_eq!(bank.payload(), bank.registers());
        }
    }

    #[test]
    fn rejects_malformed_bit_strings() {
        assert!(RegisterBank::from_bit_string("0101").is_err());
        assert!(RegisterBank::from_bit_string("00000001000000001111111x").is_err());
        assert!(RegisterBank::from_binary(["00000001", "2", "0"]).is_err());
    }

    #[test]
    fn registers_must_be_eight_binary_digits() {
        assert!(RegisterBank::from_binary(["1", "00000000", "00000000"]).is_err());
        assert!(RegisterBank::from_binary(["00000000", "+1", "00000000"]).is_err());
        assert!(RegisterBank::from_binary(["00000000", "00000000", " 00000111 "]).is_err());
        assert!(RegisterBank::from_binary(["1", "+1", "0"]).is_err());
    }

    #[test]
    fn default_bank_is_all_zero() {
        assert_eq!(RegisterBank::default().payload(), [0, 0, 0]);
    }
}
