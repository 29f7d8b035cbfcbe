use log::{debug, info, trace, warn};

use crate::{
    config::ReplicationConfig,
    error::ReplicationError,
    messages::{DeltaPacket, PacketKind, RegistrationPacket, ReplicationPacket},
    replication::{
        policy::{ClientPolicy, Recipient, ReplicationPolicy, ServerPolicy},
        tick_report::TickReport,
    },
    transport::{MessageBus, SceneMembership},
    types::{HostType, ObjectId, PeerId, SceneId, Tick},
    world::{
        delta::{DeltaReader, DeltaWriter},
        registration_tracker::{FlushReport, RegistrationTracker},
        registry::ObjectRegistry,
        replicated_object::ReplicatedObject,
        world_type::WorldMutType,
    },
    writer_pool::WriterPool,
};

/// Drives replication of one Scene's objects, as server or as client.
///
/// The host calls `tick` once per simulation tick and forwards every inbound
/// replication packet to `receive`. Visibility changes on the server are
/// reported through `on_visible` / `on_hidden`.
pub struct ReplicationModule {
    config: ReplicationConfig,
    policy: Option<Box<dyn ReplicationPolicy>>,
    local_peer: Option<PeerId>,
    registry: ObjectRegistry,
    tracker: RegistrationTracker,
    writer_pool: WriterPool,
    tick: Tick,
}

impl ReplicationModule {
    pub fn new(config: ReplicationConfig) -> Self {
        let tracker = RegistrationTracker::new(&config);
        let writer_pool = WriterPool::new(config.writer_pool_capacity);
        Self {
            config,
            policy: None,
            local_peer: None,
            registry: ObjectRegistry::default(),
            tracker,
            writer_pool,
            tick: 0,
        }
    }

    // Lifecycle

    /// Activates the module in one role and subscribes to both packet kinds
    pub fn enable<B: MessageBus>(
        &mut self,
        host_type: HostType,
        bus: &mut B,
    ) -> Result<(), ReplicationError> {
        if let Some(policy) = &self.policy {
            return Err(ReplicationError::AlreadyEnabled {
                host: host_name(policy.host_type()),
            });
        }

        let policy: Box<dyn ReplicationPolicy> = match host_type {
            HostType::Server => Box::new(ServerPolicy),
            HostType::Client => Box::new(ClientPolicy),
        };
        bus.subscribe(PacketKind::Delta);
        bus.subscribe(PacketKind::Registration);
        self.policy = Some(policy);

        info!(
            "Replication enabled as {} for {:?}, local peer {}",
            host_name(host_type),
            self.config.scene,
            self.local_peer()
        );
        Ok(())
    }

    /// Unsubscribes and drops all pending announcements. Tracked objects
    /// stay tracked.
    pub fn disable<B: MessageBus>(&mut self, bus: &mut B) -> Result<(), ReplicationError> {
        let Some(policy) = self.policy.take() else {
            return Err(ReplicationError::NotEnabled);
        };

        bus.unsubscribe(PacketKind::Delta);
        bus.unsubscribe(PacketKind::Registration);
        self.tracker.clear();

        info!(
            "Replication disabled as {} for {:?}",
            host_name(policy.host_type()),
            self.config.scene
        );
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.policy.is_some()
    }

    pub fn host_type(&self) -> Option<HostType> {
        self.policy.as_ref().map(|policy| policy.host_type())
    }

    /// None means this process acts as the server itself
    pub fn set_local_peer(&mut self, peer: Option<PeerId>) {
        self.local_peer = peer;
    }

    pub fn local_peer(&self) -> PeerId {
        self.local_peer.unwrap_or(PeerId::SERVER)
    }

    pub fn scene(&self) -> SceneId {
        self.config.scene
    }

    pub fn config(&self) -> &ReplicationConfig {
        &self.config
    }

    // Registry

    /// Starts tracking an object. Server only; ignored while the object has
    /// no confirmed id. Returns whether the object was newly tracked.
    pub fn register(&mut self, object: &dyn ReplicatedObject) -> bool {
        let Some(policy) = &self.policy else {
            debug!("ReplicationModule: register while disabled, ignoring");
            return false;
        };
        if !policy.registers_objects() {
            debug!("ReplicationModule: register is server only, ignoring");
            return false;
        }
        let Some(object_id) = object.object_id() else {
            trace!("ReplicationModule: object without confirmed id, not registering");
            return false;
        };
        self.registry.insert(object_id)
    }

    /// Stops tracking an object, in either role. Unknown ids are ignored.
    pub fn unregister(&mut self, object_id: &ObjectId) -> bool {
        self.tracker.forget_object(object_id);
        self.registry.remove(object_id)
    }

    pub fn is_tracked(&self, object_id: &ObjectId) -> bool {
        self.registry.contains(object_id)
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    // Visibility

    /// Queues `object_id` for announcement to `peer`. Server only.
    pub fn on_visible<W: WorldMutType>(
        &mut self,
        peer: &PeerId,
        object_id: Option<ObjectId>,
        world: &W,
    ) -> bool {
        let Some(policy) = &self.policy else {
            return false;
        };
        if !policy.sends_registrations() {
            return false;
        }
        self.tracker.on_visible(peer, object_id, world)
    }

    pub fn on_hidden(&mut self, peer: &PeerId, object_id: &ObjectId) {
        self.tracker.on_hidden(peer, object_id);
    }

    pub fn remove_peer(&mut self, peer: &PeerId) {
        self.tracker.remove_peer(peer);
    }

    pub fn tracker(&self) -> &RegistrationTracker {
        &self.tracker
    }

    // Tick

    /// Runs one replication tick: announces newly visible objects, captures
    /// controlled state, sends one Delta packet per recipient with changes,
    /// and commits baselines.
    pub fn tick<W: WorldMutType, S: SceneMembership, B: MessageBus>(
        &mut self,
        world: &mut W,
        scenes: &S,
        bus: &mut B,
    ) -> Result<TickReport, ReplicationError> {
        let Some(policy) = self.policy.as_deref() else {
            return Err(ReplicationError::NotEnabled);
        };

        let scene = self.config.scene;
        let local_peer = self.local_peer();
        let mut report = TickReport::new(self.tick);
        self.tick = self.tick.wrapping_add(1);

        if policy.accepts_registrations() {
            report.resolved_late = self.tracker.resolve_awaiting(world, &mut self.registry);
        }

        // Registrations go out before any delta of the same tick
        let announced = if policy.sends_registrations() {
            self.tracker.flush(&local_peer, bus)
        } else {
            FlushReport::default()
        };
        report.registration_packets = announced.packets_sent;
        report.send_failures += announced.send_failures;

        // Capture
        for object_id in self.registry.iter() {
            let Some(object) = world.replicated_object_mut(&scene, object_id) else {
                continue;
            };
            if policy.controls(&local_peer, &*object) {
                object.capture_state();
            }
        }

        // Deltas
        let mut recipients = policy.recipients(&local_peer, &scene, scenes);
        if self.config.shuffle_recipients && recipients.len() > 1 {
            fastrand::shuffle(&mut recipients);
        }

        for recipient in &recipients {
            let mut delta = DeltaWriter::new(&self.writer_pool);
            let mut any_written = false;

            for object_id in self.registry.iter() {
                if let Recipient::Peer(peer) = recipient {
                    // the peer has only just been told about it
                    if announced.was_announced(peer, object_id) {
                        continue;
                    }
                }
                let Some(object) = world.replicated_object_mut(&scene, object_id) else {
                    continue;
                };
                if !policy.writes_to(recipient, &local_peer, &*object) {
                    continue;
                }
                any_written |= delta.write_object(*object_id, object);
            }

            if !any_written {
                continue;
            }
            let Some(payload) = delta.finish() else {
                continue;
            };

            let payload_bytes = payload.len();
            let packet: ReplicationPacket = DeltaPacket::new(scene, payload).into();
            let result = match recipient {
                Recipient::Peer(peer) => bus.send(peer, packet),
                Recipient::Server => bus.send_to_server(packet),
            };
            match result {
                Ok(()) => {
                    trace!("ReplicationModule: delta of {} bytes to {}", payload_bytes, recipient);
                    report.delta_packets += 1;
                    report.payload_bytes += payload_bytes;
                }
                Err(error) => {
                    warn!("ReplicationModule: cannot send delta to {}: {}", recipient, error);
                    report.send_failures += 1;
                }
            }
        }

        // Commit
        for object_id in self.registry.iter() {
            let Some(object) = world.replicated_object_mut(&scene, object_id) else {
                continue;
            };
            if policy.controls(&local_peer, &*object) {
                object.commit_baseline();
                report.committed += 1;
            } else {
                object.clear_received();
            }
        }

        Ok(report)
    }

    // Receive

    /// Routes an inbound packet. Returns the number of objects it affected.
    pub fn receive<W: WorldMutType>(
        &mut self,
        sender: &PeerId,
        packet: &ReplicationPacket,
        world: &mut W,
    ) -> Result<usize, ReplicationError> {
        if self.policy.is_none() {
            return Err(ReplicationError::NotEnabled);
        }
        let received = match packet {
            ReplicationPacket::Delta(delta) => self.on_delta(sender, delta, world),
            ReplicationPacket::Registration(registration) => {
                self.on_registration(registration, world)
            }
        };
        Ok(received)
    }

    /// Applies a Delta packet. Records for untracked objects, for objects
    /// `sender` may not update, or that fail to decode are skipped.
    /// Returns the number of objects updated.
    pub fn on_delta<W: WorldMutType>(
        &mut self,
        sender: &PeerId,
        packet: &DeltaPacket,
        world: &mut W,
    ) -> usize {
        let Some(policy) = self.policy.as_deref() else {
            return 0;
        };
        let scene = self.config.scene;
        if packet.scene != scene {
            debug!(
                "ReplicationModule: dropping delta for {:?}, local scene is {:?}",
                packet.scene, scene
            );
            return 0;
        }

        let local_peer = self.local_peer();
        let mut reader = DeltaReader::new(&packet.payload);
        let mut applied = 0;

        loop {
            let mut record = match reader.next_record() {
                Ok(Some(record)) => record,
                Ok(None) => break,
                Err(source) => {
                    warn!(
                        "ReplicationModule: delta from {}: {}",
                        sender,
                        ReplicationError::TruncatedPayload { source }
                    );
                    break;
                }
            };

            let object_id = record.object_id;
            if !self.registry.contains(&object_id) {
                trace!("ReplicationModule: delta for untracked {:?}", object_id);
                continue;
            }
            let Some(object) = world.replicated_object_mut(&scene, &object_id) else {
                continue;
            };
            if !policy.applies_from(sender, &local_peer, &*object) {
                trace!(
                    "ReplicationModule: {} may not update {:?}, skipping",
                    sender,
                    object_id
                );
                continue;
            }

            match object.read_delta(&mut record.reader) {
                Ok(()) => applied += 1,
                Err(source) => {
                    warn!(
                        "ReplicationModule: delta from {}: {}",
                        sender,
                        ReplicationError::DeltaRead {
                            object: object_id,
                            source,
                        }
                    );
                }
            }
        }

        applied
    }

    /// Tracks the objects a Registration packet announces. Client only.
    /// Returns the number of objects newly tracked.
    pub fn on_registration<W: WorldMutType>(
        &mut self,
        packet: &RegistrationPacket,
        world: &W,
    ) -> usize {
        let Some(policy) = self.policy.as_deref() else {
            return 0;
        };
        let as_server = !policy.accepts_registrations();
        self.tracker
            .on_registration(packet, as_server, world, &mut self.registry)
    }
}

fn host_name(host_type: HostType) -> &'static str {
    match host_type {
        HostType::Server => "server",
        HostType::Client => "client",
    }
}
