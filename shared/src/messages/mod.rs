mod packets;

pub use packets::{DeltaPacket, PacketKind, RegistrationPacket, ReplicationPacket};
