use replicant_serde::{BitReader, BitWrite, SerdeErr};

use crate::types::{ObjectId, PeerId};

/// A networked object whose state is replicated tick by tick.
///
/// The scheduler drives these calls in a fixed order each tick:
/// `capture_state` -> `write_delta` (once per recipient) -> `commit_baseline`
/// on the controlling side, and `read_delta` on the receiving side. The bit
/// format written by `write_delta` is private to the implementor.
pub trait ReplicatedObject {
    /// None until the object's identifier has been confirmed (e.g. pending spawn)
    fn object_id(&self) -> Option<ObjectId>;

    /// The peer that controls this object, None meaning the server does
    fn owner(&self) -> Option<PeerId>;

    /// Owner as seen from one role. A process hosting both roles may keep a
    /// separate ownership view for each.
    fn owner_for(&self, as_server: bool) -> Option<PeerId> {
        let _ = as_server;
        self.owner()
    }

    /// Whether the object is currently visible to `peer`
    fn is_observed_by(&self, peer: &PeerId) -> bool;

    /// Snapshot live state as the state to send this tick
    fn capture_state(&mut self);

    /// Append the change between the captured state and the committed baseline.
    /// Returns false, having written nothing, if there is no change.
    fn write_delta(&mut self, writer: &mut dyn BitWrite) -> bool;

    /// Decode a change written by `write_delta` and apply it to live state
    fn read_delta(&mut self, reader: &mut BitReader) -> Result<(), SerdeErr>;

    /// Make the captured state the new baseline for future deltas
    fn commit_baseline(&mut self);

    /// End of tick on a side that does not control the object. Anything
    /// received since the last call has been forwarded by now.
    fn clear_received(&mut self) {}
}
