use std::fmt;

use replicant_serde::{BitReader, BitWrite, Serde, SerdeErr, UnsignedVariableInteger};

pub type Tick = u16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostType {
    Server,
    Client,
}

impl HostType {
    pub fn invert(self) -> Self {
        match self {
            HostType::Server => HostType::Client,
            HostType::Client => HostType::Server,
        }
    }

    pub fn is_server(&self) -> bool {
        *self == HostType::Server
    }
}

/// Scopes every packet & lookup to one simulation partition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(u32);

impl SceneId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Stable key of a replicated object within a Scene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Identifies a participant. `PeerId::SERVER` stands for the authoritative hub.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeerId(u16);

impl PeerId {
    pub const SERVER: PeerId = PeerId(0);

    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    pub fn is_server(&self) -> bool {
        *self == Self::SERVER
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_server() {
            write!(f, "Server")
        } else {
            write!(f, "Peer({})", self.0)
        }
    }
}

// Serde

macro_rules! impl_serde_for_id {
    ($name:ident, $inner:ty) => {
        impl Serde for $name {
            fn ser(&self, writer: &mut dyn BitWrite) {
                UnsignedVariableInteger::<7>::new(self.0).ser(writer);
            }

            fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
                let value = UnsignedVariableInteger::<7>::de(reader)?;
                let Ok(inner) = <$inner>::try_from(value.get()) else {
                    return Err(SerdeErr::InvalidValue {
                        type_name: stringify!($name),
                    });
                };
                Ok(Self(inner))
            }

            fn bit_length(&self) -> u32 {
                UnsignedVariableInteger::<7>::new(self.0).bit_length()
            }
        }
    };
}

impl_serde_for_id!(SceneId, u32);
impl_serde_for_id!(ObjectId, u32);
impl_serde_for_id!(PeerId, u16);
