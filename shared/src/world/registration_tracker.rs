use std::collections::{HashMap, HashSet};

use log::{debug, trace, warn};

use crate::{
    config::ReplicationConfig,
    messages::RegistrationPacket,
    transport::MessageBus,
    types::{ObjectId, PeerId, SceneId},
    world::{registry::ObjectRegistry, world_type::WorldMutType},
};

/// Accumulates, per observing peer, the objects that became visible to that
/// peer but have not been announced yet, and flushes them as one
/// Registration packet per peer.
pub struct RegistrationTracker {
    scene: SceneId,
    list_capacity: usize,
    retry_unresolved: bool,
    pending: HashMap<PeerId, Vec<ObjectId>>,
    awaiting_spawn: HashSet<ObjectId>,
}

impl RegistrationTracker {
    pub fn new(config: &ReplicationConfig) -> Self {
        Self {
            scene: config.scene,
            list_capacity: config.pending_list_capacity,
            retry_unresolved: config.retry_unresolved,
            pending: HashMap::new(),
            awaiting_spawn: HashSet::new(),
        }
    }

    // Visibility

    /// Called whenever `peer` starts observing an object.
    /// Returns whether the object was queued for announcement.
    pub fn on_visible<W: WorldMutType>(
        &mut self,
        peer: &PeerId,
        object_id: Option<ObjectId>,
        world: &W,
    ) -> bool {
        let Some(object_id) = object_id else {
            return false;
        };
        if !world.has_replicated_object(&self.scene, &object_id) {
            return false;
        }

        let capacity = self.list_capacity;
        let list = self
            .pending
            .entry(*peer)
            .or_insert_with(|| Vec::with_capacity(capacity));
        if list.contains(&object_id) {
            return false;
        }
        trace!("RegistrationTracker: {:?} became visible to {}", object_id, peer);
        list.push(object_id);
        true
    }

    /// Called when `peer` stops observing an object before it was announced
    pub fn on_hidden(&mut self, peer: &PeerId, object_id: &ObjectId) {
        if let Some(list) = self.pending.get_mut(peer) {
            list.retain(|pending| pending != object_id);
        }
    }

    /// Drops everything queued for a peer that left
    pub fn remove_peer(&mut self, peer: &PeerId) {
        self.pending.remove(peer);
    }

    /// Forgets an object that is no longer tracked
    pub fn forget_object(&mut self, object_id: &ObjectId) {
        for list in self.pending.values_mut() {
            list.retain(|pending| pending != object_id);
        }
        self.awaiting_spawn.remove(object_id);
    }

    pub fn pending_for(&self, peer: &PeerId) -> &[ObjectId] {
        self.pending.get(peer).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_pending(&self) -> bool {
        self.pending.values().any(|list| !list.is_empty())
    }

    pub fn awaiting_spawn(&self) -> usize {
        self.awaiting_spawn.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.awaiting_spawn.clear();
    }

    // Flush

    /// Sends one Registration packet to every peer with pending objects,
    /// except `exclude`, then empties the whole pending map. A failed send is
    /// not retried.
    pub fn flush<B: MessageBus>(&mut self, exclude: &PeerId, bus: &mut B) -> FlushReport {
        let mut report = FlushReport::default();

        for (peer, ids) in self.pending.drain() {
            if peer == *exclude || ids.is_empty() {
                continue;
            }

            report.record(&peer, &ids);
            let count = ids.len();
            let packet = RegistrationPacket::new(self.scene, ids);
            match bus.send(&peer, packet.into()) {
                Ok(()) => {
                    debug!("RegistrationTracker: announced {} objects to {}", count, peer);
                    report.packets_sent += 1;
                }
                Err(error) => {
                    warn!("RegistrationTracker: cannot send registration to {}: {}", peer, error);
                    report.send_failures += 1;
                }
            }
        }

        report
    }

    // Receive

    /// Handles a Registration packet. Only clients accept these; packets for
    /// another Scene are dropped. Returns the number of objects newly tracked.
    pub fn on_registration<W: WorldMutType>(
        &mut self,
        packet: &RegistrationPacket,
        as_server: bool,
        world: &W,
        registry: &mut ObjectRegistry,
    ) -> usize {
        if as_server {
            debug!("RegistrationTracker: dropping registration received as server");
            return 0;
        }
        if packet.scene != self.scene {
            debug!(
                "RegistrationTracker: dropping registration for {:?}, local scene is {:?}",
                packet.scene, self.scene
            );
            return 0;
        }

        let mut added = 0;
        for object_id in &packet.ids {
            if world.has_replicated_object(&self.scene, object_id) {
                if registry.insert(*object_id) {
                    added += 1;
                }
                self.awaiting_spawn.remove(object_id);
            } else if self.retry_unresolved {
                trace!("RegistrationTracker: {:?} not spawned yet, will retry", object_id);
                self.awaiting_spawn.insert(*object_id);
            } else {
                trace!("RegistrationTracker: skipping unresolved {:?}", object_id);
            }
        }
        added
    }

    /// Tries again to resolve ids from earlier Registration packets.
    /// Returns the number of objects newly tracked.
    pub fn resolve_awaiting<W: WorldMutType>(
        &mut self,
        world: &W,
        registry: &mut ObjectRegistry,
    ) -> usize {
        if self.awaiting_spawn.is_empty() {
            return 0;
        }

        let scene = self.scene;
        let mut added = 0;
        self.awaiting_spawn.retain(|object_id| {
            if !world.has_replicated_object(&scene, object_id) {
                return true;
            }
            if registry.insert(*object_id) {
                added += 1;
            }
            false
        });
        added
    }
}

/// Outcome of one RegistrationTracker::flush
#[derive(Default, Debug)]
pub struct FlushReport {
    pub packets_sent: usize,
    pub send_failures: usize,
    announced: HashMap<PeerId, HashSet<ObjectId>>,
}

impl FlushReport {
    fn record(&mut self, peer: &PeerId, ids: &[ObjectId]) {
        self.announced
            .entry(*peer)
            .or_default()
            .extend(ids.iter().copied());
    }

    /// Whether `object_id` was announced to `peer` by this flush
    pub fn was_announced(&self, peer: &PeerId, object_id: &ObjectId) -> bool {
        self.announced
            .get(peer)
            .map(|ids| ids.contains(object_id))
            .unwrap_or(false)
    }

    pub fn announced_to(&self, peer: &PeerId) -> usize {
        self.announced.get(peer).map(HashSet::len).unwrap_or(0)
    }
}
