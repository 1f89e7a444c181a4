use std::collections::BTreeSet;
use std::sync::Arc;

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use parking_lot::Mutex;

use crate::panel::Target;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    pub address: u8,
    pub bytes: Vec<u8>,
}

/// In-process stand-in for the USB bridge.
///
/// Addresses in the responder set acknowledge every transfer, all others NACK.
/// Clones share one write record so a caller can keep a clone to inspect what
/// was sent after handing the bus away.
#[derive(Debug, Clone)]
pub struct SimulatedBus {
    responders: BTreeSet<u8>,
    writes: Arc<Mutex<Vec<RecordedWrite>>>,
}

impl Default for SimulatedBus {
    fn default() -> Self {
        Self::new(Target::ALL.iter().map(Target::address))
    }
}

impl SimulatedBus {
    pub fn new(responders: impl IntoIterator<Item = u8>) -> Self {
        Self {
            responders: responders.into_iter().collect(),
            writes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().clone()
    }
}

impl ErrorType for SimulatedBus {
    type Error = ErrorKind;
}

impl I2c for SimulatedBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if !self.responders.contains(&address) {
            log::debug!("simulated bus: no device at 0x{address:02x}");
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for operation in operations {
            match operation {
                Operation::Write(bytes) => self.writes.lock().push(RecordedWrite {
                    address,
                    bytes: bytes.to_vec(),
                }),
                Operation::Read(buffer) => buffer.fill(0),
            }
        }
        Ok(())
    }
}
