pub trait BitWrite {
    fn write_bit(&mut self, bit: bool);
    fn write_byte(&mut self, byte: u8);
}

/// A growable BitWrite implementation.
/// Bits are packed LSB first; a BitWriter can be cleared and reused so that
/// pooled writers keep their allocation between ticks.
pub struct BitWriter {
    scratch: u8,
    scratch_index: u8,
    buffer: Vec<u8>,
    bits_written: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            scratch: 0,
            scratch_index: 0,
            buffer: Vec::with_capacity(bytes),
            bits_written: 0,
        }
    }

    /// Forgets everything written while keeping the allocation
    pub fn clear(&mut self) {
        self.scratch = 0;
        self.scratch_index = 0;
        self.buffer.clear();
        self.bits_written = 0;
    }

    pub fn bits_written(&self) -> u32 {
        self.bits_written
    }

    pub fn is_empty(&self) -> bool {
        self.bits_written == 0
    }

    /// Returns the bit at `index`, in write order
    pub fn bit_at(&self, index: u32) -> Option<bool> {
        if index >= self.bits_written {
            return None;
        }
        let byte_index = (index / 8) as usize;
        if byte_index < self.buffer.len() {
            return Some(self.buffer[byte_index] >> (index % 8) & 1 != 0);
        }
        // still in scratch, most recent bit is the lowest
        let scratch_offset = index % 8;
        let shift = self.scratch_index - 1 - scratch_offset as u8;
        Some(self.scratch >> shift & 1 != 0)
    }

    /// Copies every bit written to `other` onto the end of this writer
    pub fn append(&mut self, other: &BitWriter) {
        for index in 0..other.bits_written {
            if let Some(bit) = other.bit_at(index) {
                self.write_bit(bit);
            }
        }
    }

    /// Copies out the bytes written so far, padding the last byte with zeros
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(self.buffer.len() + 1);
        output.extend_from_slice(&self.buffer);
        if self.scratch_index > 0 {
            output.push((self.scratch << (8 - self.scratch_index)).reverse_bits());
        }
        output
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BitWrite for BitWriter {
    fn write_bit(&mut self, bit: bool) {
        self.scratch <<= 1;

        if bit {
            self.scratch |= 1;
        }

        self.scratch_index += 1;
        self.bits_written += 1;

        if self.scratch_index >= 8 {
            self.buffer.push(self.scratch.reverse_bits());
            self.scratch_index = 0;
            self.scratch = 0;
        }
    }

    fn write_byte(&mut self, byte: u8) {
        let mut temp = byte;
        for _ in 0..8 {
            self.write_bit(temp & 1 != 0);
            temp >>= 1;
        }
    }
}
