use crate::types::Tick;

/// What one ReplicationModule::tick did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Module-local tick counter value the report belongs to
    pub tick: Tick,
    pub registration_packets: usize,
    pub delta_packets: usize,
    pub payload_bytes: usize,
    /// Registration or Delta packets the bus refused
    pub send_failures: usize,
    /// Objects whose state was captured and committed
    pub committed: usize,
    /// Previously unresolved ids that resolved this tick (client only)
    pub resolved_late: usize,
}

impl TickReport {
    pub fn new(tick: Tick) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }

    pub fn packets_sent(&self) -> usize {
        self.registration_packets + self.delta_packets
    }
}
