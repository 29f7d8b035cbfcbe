use thiserror::Error;

use crate::types::PeerId;

/// Errors a MessageBus may report when handing off a packet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The addressed peer has no open connection
    #[error("Peer {peer} is not connected")]
    PeerNotConnected { peer: PeerId },

    /// A client tried to reach the server while no server connection exists
    #[error("Server is unreachable")]
    ServerUnreachable,

    /// The bus has been shut down
    #[error("Message bus is closed")]
    Closed,
}
