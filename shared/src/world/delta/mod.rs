//! Framing of Delta packet payloads.
//!
//! A payload is a run of records, each `[1][ObjectId][bit length][object bits]`,
//! closed by a single `[0]`. The object bits are whatever the object's
//! `write_delta` produced; the length prefix lets a receiver skip records it
//! must not or cannot apply.

mod delta_reader;
mod delta_writer;

pub use delta_reader::{DeltaReader, DeltaRecord};
pub use delta_writer::DeltaWriter;

use replicant_serde::UnsignedVariableInteger;

pub(crate) type RecordLength = UnsignedVariableInteger<9>;
