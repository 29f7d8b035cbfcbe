use thiserror::Error;

use replicant_serde::SerdeErr;

use crate::types::ObjectId;

/// Errors returned by the ReplicationModule's public operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplicationError {
    /// enable() was called while the module was already active
    #[error("Replication is already enabled as {host}")]
    AlreadyEnabled { host: &'static str },

    /// An operation that needs an active role was called while disabled
    #[error("Replication is not enabled")]
    NotEnabled,

    /// An object failed to decode its part of a Delta packet.
    /// The rest of the packet is still applied.
    #[error("Failed to read delta for object {object:?}: {source}")]
    DeltaRead {
        object: ObjectId,
        #[source]
        source: SerdeErr,
    },

    /// A Delta packet ended in the middle of a record
    #[error("Delta payload truncated: {source}")]
    TruncatedPayload {
        #[source]
        source: SerdeErr,
    },
}
