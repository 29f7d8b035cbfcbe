use std::fmt;

use crate::{
    transport::SceneMembership,
    types::{HostType, PeerId, SceneId},
    world::{authority::is_controlling_for, replicated_object::ReplicatedObject},
};

/// Destination of one Delta packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recipient {
    Peer(PeerId),
    Server,
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recipient::Peer(peer) => write!(f, "{}", peer),
            Recipient::Server => write!(f, "Server"),
        }
    }
}

/// Recipient selection and authority filtering for one role.
/// Chosen once when the module is enabled.
pub trait ReplicationPolicy {
    fn host_type(&self) -> HostType;

    fn is_server(&self) -> bool {
        self.host_type().is_server()
    }

    /// Whether this role announces objects through Registration packets
    fn sends_registrations(&self) -> bool;

    /// Whether this role tracks objects from incoming Registration packets
    fn accepts_registrations(&self) -> bool;

    /// Whether this role may add objects to the registry directly
    fn registers_objects(&self) -> bool;

    /// Everyone who gets a Delta buffer this tick
    fn recipients(
        &self,
        local_peer: &PeerId,
        scene: &SceneId,
        membership: &dyn SceneMembership,
    ) -> Vec<Recipient>;

    /// Whether `object`'s delta belongs in the buffer for `recipient`
    fn writes_to(
        &self,
        recipient: &Recipient,
        local_peer: &PeerId,
        object: &dyn ReplicatedObject,
    ) -> bool;

    /// Whether a delta for `object` coming from `sender` may be applied
    fn applies_from(
        &self,
        sender: &PeerId,
        local_peer: &PeerId,
        object: &dyn ReplicatedObject,
    ) -> bool;

    /// Whether this side is the source of truth for `object`
    fn controls(&self, local_peer: &PeerId, object: &dyn ReplicatedObject) -> bool {
        is_controlling_for(local_peer, object, self.is_server())
    }
}

pub struct ServerPolicy;

impl ReplicationPolicy for ServerPolicy {
    fn host_type(&self) -> HostType {
        HostType::Server
    }

    fn sends_registrations(&self) -> bool {
        true
    }

    fn accepts_registrations(&self) -> bool {
        false
    }

    fn registers_objects(&self) -> bool {
        true
    }

    fn recipients(
        &self,
        local_peer: &PeerId,
        scene: &SceneId,
        membership: &dyn SceneMembership,
    ) -> Vec<Recipient> {
        membership
            .peers_in_scene(scene)
            .into_iter()
            .filter(|peer| peer != local_peer)
            .map(Recipient::Peer)
            .collect()
    }

    fn writes_to(
        &self,
        recipient: &Recipient,
        _local_peer: &PeerId,
        object: &dyn ReplicatedObject,
    ) -> bool {
        let Recipient::Peer(peer) = recipient else {
            return false;
        };
        // never echo an object back to the peer that controls it
        !is_controlling_for(peer, object, true) && object.is_observed_by(peer)
    }

    fn applies_from(
        &self,
        sender: &PeerId,
        _local_peer: &PeerId,
        object: &dyn ReplicatedObject,
    ) -> bool {
        is_controlling_for(sender, object, true)
    }
}

pub struct ClientPolicy;

impl ReplicationPolicy for ClientPolicy {
    fn host_type(&self) -> HostType {
        HostType::Client
    }

    fn sends_registrations(&self) -> bool {
        false
    }

    fn accepts_registrations(&self) -> bool {
        true
    }

    fn registers_objects(&self) -> bool {
        false
    }

    fn recipients(&self, _: &PeerId, _: &SceneId, _: &dyn SceneMembership) -> Vec<Recipient> {
        vec![Recipient::Server]
    }

    fn writes_to(
        &self,
        recipient: &Recipient,
        local_peer: &PeerId,
        object: &dyn ReplicatedObject,
    ) -> bool {
        *recipient == Recipient::Server && is_controlling_for(local_peer, object, false)
    }

    fn applies_from(
        &self,
        _sender: &PeerId,
        local_peer: &PeerId,
        object: &dyn ReplicatedObject,
    ) -> bool {
        // the local copy of a controlled object is authoritative
        !is_controlling_for(local_peer, object, false)
    }
}
