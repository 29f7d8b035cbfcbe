use replicant_serde::{BitReader, BitWrite, SerdeErr};

/// A fixed-width set of "changed" flags, one per replicated field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffMask {
    mask: Vec<u8>,
    bits: u8,
}

impl DiffMask {
    /// Create a new DiffMask able to hold `bits` flags
    pub fn new(bits: u8) -> Self {
        let bytes = (bits as usize).div_ceil(8);
        Self {
            mask: vec![0; bytes],
            bits,
        }
    }

    pub fn bit_count(&self) -> u8 {
        self.bits
    }

    pub fn bit(&self, index: u8) -> Option<bool> {
        if index >= self.bits {
            return None;
        }
        let byte = self.mask[(index / 8) as usize];
        Some(byte >> (index % 8) & 1 != 0)
    }

    pub fn set_bit(&mut self, index: u8, value: bool) {
        if index >= self.bits {
            return;
        }
        let byte = &mut self.mask[(index / 8) as usize];
        let flag = 1 << (index % 8);
        if value {
            *byte |= flag;
        } else {
            *byte &= !flag;
        }
    }

    pub fn clear(&mut self) {
        self.mask.iter_mut().for_each(|byte| *byte = 0);
    }

    pub fn is_clear(&self) -> bool {
        self.mask.iter().all(|byte| *byte == 0)
    }

    pub fn or(&mut self, other: &DiffMask) {
        for (byte, other_byte) in self.mask.iter_mut().zip(other.mask.iter()) {
            *byte |= other_byte;
        }
    }

    pub fn ser(&self, writer: &mut dyn BitWrite) {
        for index in 0..self.bits {
            writer.write_bit(self.bit(index).unwrap_or(false));
        }
    }

    pub fn de(reader: &mut BitReader, bits: u8) -> Result<Self, SerdeErr> {
        let mut output = Self::new(bits);
        for index in 0..bits {
            output.set_bit(index, reader.read_bit()?);
        }
        Ok(output)
    }
}
