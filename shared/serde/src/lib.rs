//! # Replicant Serde
//! Bit-level reading & writing used for replication payloads.

mod bit_reader;
mod bit_writer;
mod error;
mod impls;
mod integer;
mod serde;

pub use bit_reader::BitReader;
pub use bit_writer::{BitWrite, BitWriter};
pub use error::SerdeErr;
pub use integer::{
    Bounded, SerdeInteger, SerdeIntegerConversion, SignedInteger, SignedVariableInteger,
    UnsignedInteger, UnsignedVariableInteger,
};
pub use serde::{ConstBitLength, Serde};
