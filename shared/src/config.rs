use std::default::Default;

use crate::types::SceneId;

/// Contains Config properties which will be used by a ReplicationModule
#[derive(Clone, Debug)]
pub struct ReplicationConfig {
    /// The Scene this module replicates. Packets for any other Scene are dropped.
    pub scene: SceneId,
    /// Initial capacity of each peer's list of pending registrations
    pub pending_list_capacity: usize,
    /// Maximum number of scratch writers kept around between uses
    pub writer_pool_capacity: usize,
    /// Visit recipients in random order each tick, so that no peer is
    /// consistently served first
    pub shuffle_recipients: bool,
    /// Remember registration ids that could not be resolved and try them again
    /// on later ticks, in case the object spawns locally after the packet arrived
    pub retry_unresolved: bool,
}

impl ReplicationConfig {
    pub fn new(scene: SceneId) -> Self {
        Self {
            scene,
            ..Self::default()
        }
    }
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self {
            scene: SceneId::new(0),
            pending_list_capacity: 16,
            writer_pool_capacity: 8,
            shuffle_recipients: true,
            retry_unresolved: true,
        }
    }
}
