use serde::{Deserialize, Serialize};

use baristamatic_core::MachineId;

/// Envelope for an event, carrying the machine it came from and its position
/// in that machine's stream.
///
/// `sequence_number` equals the machine's version right after the event was
/// applied, so observers can detect gaps or stale snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    machine_id: MachineId,

    /// Monotonically increasing position in the machine's stream.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(machine_id: MachineId, sequence_number: u64, payload: E) -> Self {
        Self {
            machine_id,
            sequence_number,
            payload,
        }
    }

    pub fn machine_id(&self) -> MachineId {
        self.machine_id
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }
}
