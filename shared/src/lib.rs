//! # Replicant Shared
//! Tick-driven replication of networked objects, shared between the server
//! & client roles: authority resolution, the registration handshake, and
//! per-peer delta scheduling.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use replicant_serde::{
    BitReader, BitWrite, BitWriter, ConstBitLength, Serde, SerdeErr, SignedInteger,
    SignedVariableInteger, UnsignedInteger, UnsignedVariableInteger,
};

mod config;
mod error;
mod messages;
mod replication;
mod transport;
mod types;
mod world;
mod writer_pool;

pub use config::ReplicationConfig;
pub use error::ReplicationError;
pub use messages::{DeltaPacket, PacketKind, RegistrationPacket, ReplicationPacket};
pub use replication::{
    ClientPolicy, Recipient, ReplicationModule, ReplicationPolicy, ServerPolicy, TickReport,
};
pub use transport::{error::TransportError, MessageBus, SceneMembership};
pub use types::{HostType, ObjectId, PeerId, SceneId, Tick};
pub use world::{
    authority::is_controlling_for,
    component::{
        diff_mask::DiffMask,
        network_transform::{NetworkTransform, TransformState},
    },
    delta::{DeltaReader, DeltaRecord, DeltaWriter},
    registration_tracker::{FlushReport, RegistrationTracker},
    registry::ObjectRegistry,
    replicated_object::ReplicatedObject,
    world_type::WorldMutType,
};
pub use writer_pool::{PooledWriter, WriterPool};
