use log::trace;

use replicant_serde::{BitWrite, Serde};

use crate::{
    types::ObjectId,
    world::{delta::RecordLength, replicated_object::ReplicatedObject},
    writer_pool::{PooledWriter, WriterPool},
};

/// Builds the payload of one Delta packet for one recipient
pub struct DeltaWriter<'p> {
    pool: &'p WriterPool,
    output: PooledWriter<'p>,
    records: usize,
}

impl<'p> DeltaWriter<'p> {
    pub fn new(pool: &'p WriterPool) -> Self {
        Self {
            pool,
            output: pool.acquire(),
            records: 0,
        }
    }

    /// Asks `object` for its delta and appends it as a record.
    /// Returns what the object's `write_delta` returned.
    pub fn write_object(&mut self, object_id: ObjectId, object: &mut dyn ReplicatedObject) -> bool {
        let mut scratch = self.pool.acquire();
        let written = object.write_delta(&mut *scratch);
        if !written || scratch.is_empty() {
            return written;
        }

        trace!("DeltaWriter: {:?} wrote {} bits", object_id, scratch.bits_written());
        self.output.write_bit(true);
        object_id.ser(&mut *self.output);
        RecordLength::new(scratch.bits_written()).ser(&mut *self.output);
        self.output.append(&scratch);
        self.records += 1;
        true
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Closes the payload. None if no record was written.
    pub fn finish(mut self) -> Option<Vec<u8>> {
        if self.records == 0 {
            return None;
        }
        self.output.write_bit(false);
        Some(self.output.to_bytes())
    }
}
