use crate::{types::PeerId, world::replicated_object::ReplicatedObject};

/// Returns whether `peer` is the source of truth for `object`'s state.
///
/// An object with an owner is controlled by that owner alone; an unowned
/// object is controlled by the server.
pub fn is_controlling_for(peer: &PeerId, object: &dyn ReplicatedObject, as_server: bool) -> bool {
    match object.owner_for(as_server) {
        Some(owner) => owner == *peer,
        None => peer.is_server(),
    }
}
