use crate::error::SerdeErr;

/// Reads bits packed by a BitWriter.
/// A reader may be bounded to fewer bits than its buffer holds, which is how
/// a length-prefixed section is handed to code that must not read past it.
pub struct BitReader<'b> {
    buffer: &'b [u8],
    cursor: u32,
    end: u32,
}

impl<'b> BitReader<'b> {
    /// Buffers longer than `u32::MAX` bits are only read up to that bound
    pub fn new(buffer: &'b [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            end: bit_capacity(buffer.len()),
        }
    }

    pub fn bits_remaining(&self) -> u32 {
        self.end - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.end
    }

    pub fn read_bit(&mut self) -> Result<bool, SerdeErr> {
        if self.cursor >= self.end {
            return Err(SerdeErr::Exhausted {
                needed: 1,
                remaining: 0,
            });
        }
        let byte = self.buffer[(self.cursor / 8) as usize];
        let bit = byte >> (self.cursor % 8) & 1 != 0;
        self.cursor += 1;
        Ok(bit)
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        self.ensure(8)?;
        let mut output = 0;
        for index in 0..8 {
            if self.read_bit()? {
                output |= 1 << index;
            }
        }
        Ok(output)
    }

    /// Splits off the next `bits` bits into a bounded reader and advances past them
    pub fn sub_reader(&mut self, bits: u32) -> Result<BitReader<'b>, SerdeErr> {
        self.ensure(bits)?;
        let sub = BitReader {
            buffer: self.buffer,
            cursor: self.cursor,
            end: self.cursor + bits,
        };
        self.cursor += bits;
        Ok(sub)
    }

    pub fn skip_bits(&mut self, bits: u32) -> Result<(), SerdeErr> {
        self.ensure(bits)?;
        self.cursor += bits;
        Ok(())
    }

    fn ensure(&self, bits: u32) -> Result<(), SerdeErr> {
        let remaining = self.bits_remaining();
        if bits > remaining {
            return Err(SerdeErr::Exhausted {
                needed: bits,
                remaining,
            });
        }
        Ok(())
    }
}

fn bit_capacity(bytes: usize) -> u32 {
    u32::try_from(bytes)
        .ok()
        .and_then(|bytes| bytes.checked_mul(8))
        .unwrap_or(u32::MAX)
}
