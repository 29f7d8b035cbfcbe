use replicant_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::types::{ObjectId, SceneId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PacketKind {
    Delta,
    Registration,
}

/// Changed state of one or more objects, framed by the delta codec
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeltaPacket {
    pub scene: SceneId,
    pub payload: Vec<u8>,
}

impl DeltaPacket {
    pub fn new(scene: SceneId, payload: Vec<u8>) -> Self {
        Self { scene, payload }
    }
}

/// Objects the receiving client should start tracking, in announcement order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationPacket {
    pub scene: SceneId,
    pub ids: Vec<ObjectId>,
}

impl RegistrationPacket {
    pub fn new(scene: SceneId, ids: Vec<ObjectId>) -> Self {
        Self { scene, ids }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplicationPacket {
    Delta(DeltaPacket),
    Registration(RegistrationPacket),
}

impl ReplicationPacket {
    pub fn kind(&self) -> PacketKind {
        match self {
            ReplicationPacket::Delta(_) => PacketKind::Delta,
            ReplicationPacket::Registration(_) => PacketKind::Registration,
        }
    }

    pub fn scene(&self) -> SceneId {
        match self {
            ReplicationPacket::Delta(packet) => packet.scene,
            ReplicationPacket::Registration(packet) => packet.scene,
        }
    }
}

impl From<DeltaPacket> for ReplicationPacket {
    fn from(packet: DeltaPacket) -> Self {
        ReplicationPacket::Delta(packet)
    }
}

impl From<RegistrationPacket> for ReplicationPacket {
    fn from(packet: RegistrationPacket) -> Self {
        ReplicationPacket::Registration(packet)
    }
}

// Serde

impl Serde for DeltaPacket {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.scene.ser(writer);
        self.payload.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let scene = SceneId::de(reader)?;
        let payload = Vec::<u8>::de(reader)?;
        Ok(Self { scene, payload })
    }

    fn bit_length(&self) -> u32 {
        self.scene.bit_length() + self.payload.bit_length()
    }
}

impl Serde for RegistrationPacket {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.scene.ser(writer);
        self.ids.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let scene = SceneId::de(reader)?;
        let ids = Vec::<ObjectId>::de(reader)?;
        Ok(Self { scene, ids })
    }

    fn bit_length(&self) -> u32 {
        self.scene.bit_length() + self.ids.bit_length()
    }
}

impl Serde for ReplicationPacket {
    fn ser(&self, writer: &mut dyn BitWrite) {
        match self {
            ReplicationPacket::Delta(packet) => {
                writer.write_bit(false);
                packet.ser(writer);
            }
            ReplicationPacket::Registration(packet) => {
                writer.write_bit(true);
                packet.ser(writer);
            }
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        if reader.read_bit()? {
            Ok(ReplicationPacket::Registration(RegistrationPacket::de(reader)?))
        } else {
            Ok(ReplicationPacket::Delta(DeltaPacket::de(reader)?))
        }
    }

    fn bit_length(&self) -> u32 {
        1 + match self {
            ReplicationPacket::Delta(packet) => packet.bit_length(),
            ReplicationPacket::Registration(packet) => packet.bit_length(),
        }
    }
}
