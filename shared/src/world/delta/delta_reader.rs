use replicant_serde::{BitReader, Serde, SerdeErr};

use crate::{types::ObjectId, world::delta::RecordLength};

/// One object's section of a Delta payload
pub struct DeltaRecord<'b> {
    pub object_id: ObjectId,
    pub reader: BitReader<'b>,
}

/// Walks the records of a Delta payload
pub struct DeltaReader<'b> {
    reader: BitReader<'b>,
    finished: bool,
}

impl<'b> DeltaReader<'b> {
    pub fn new(payload: &'b [u8]) -> Self {
        Self {
            reader: BitReader::new(payload),
            finished: false,
        }
    }

    /// The next record, None after the closing bit.
    /// An error means the payload ended inside a record or before its close.
    pub fn next_record(&mut self) -> Result<Option<DeltaRecord<'b>>, SerdeErr> {
        if self.finished {
            return Ok(None);
        }
        if !bool::de(&mut self.reader)? {
            self.finished = true;
            return Ok(None);
        }

        let object_id = ObjectId::de(&mut self.reader)?;
        let length: u32 = RecordLength::de(&mut self.reader)?.to();
        let reader = self.reader.sub_reader(length)?;

        Ok(Some(DeltaRecord { object_id, reader }))
    }
}
