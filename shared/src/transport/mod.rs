pub mod error;

use crate::{
    messages::{PacketKind, ReplicationPacket},
    types::{PeerId, SceneId},
};

use self::error::TransportError;

/// Reliable, ordered, peer-addressed delivery of replication packets.
///
/// Delivery order per peer must be preserved: a Registration packet has to
/// reach a client before any Delta packet sent after it.
pub trait MessageBus {
    /// Start routing inbound packets of this kind to the replication module
    fn subscribe(&mut self, kind: PacketKind);
    /// Stop routing inbound packets of this kind
    fn unsubscribe(&mut self, kind: PacketKind);
    fn send(&mut self, peer: &PeerId, packet: ReplicationPacket) -> Result<(), TransportError>;
    fn send_to_server(&mut self, packet: ReplicationPacket) -> Result<(), TransportError>;
}

/// Answers which peers currently take part in a Scene
pub trait SceneMembership {
    fn peers_in_scene(&self, scene: &SceneId) -> Vec<PeerId>;
}
