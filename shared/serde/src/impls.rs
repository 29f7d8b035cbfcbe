use crate::{
    bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr, serde::Serde, ConstBitLength,
    UnsignedVariableInteger,
};

// Unit

impl Serde for () {
    fn ser(&self, _: &mut dyn BitWrite) {}

    fn de(_: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(())
    }

    fn bit_length(&self) -> u32 {
        0
    }
}

// Bool

impl Serde for bool {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_bit(*self);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        reader.read_bit()
    }

    fn bit_length(&self) -> u32 {
        1
    }
}

impl ConstBitLength for bool {
    fn const_bit_length() -> u32 {
        1
    }
}

// Integers

macro_rules! impl_serde_for_integer {
    ($t:ty, $bytes:expr) => {
        impl Serde for $t {
            fn ser(&self, writer: &mut dyn BitWrite) {
                for byte in self.to_le_bytes() {
                    writer.write_byte(byte);
                }
            }

            fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
                let mut bytes = [0_u8; $bytes];
                for byte in bytes.iter_mut() {
                    *byte = reader.read_byte()?;
                }
                Ok(<$t>::from_le_bytes(bytes))
            }

            fn bit_length(&self) -> u32 {
                <Self as ConstBitLength>::const_bit_length()
            }
        }

        impl ConstBitLength for $t {
            fn const_bit_length() -> u32 {
                $bytes * 8
            }
        }
    };
}

impl_serde_for_integer!(u8, 1);
impl_serde_for_integer!(u16, 2);
impl_serde_for_integer!(u32, 4);
impl_serde_for_integer!(u64, 8);
impl_serde_for_integer!(i32, 4);

// Floats

impl Serde for f32 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.to_bits().ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(f32::from_bits(u32::de(reader)?))
    }

    fn bit_length(&self) -> u32 {
        32
    }
}

impl ConstBitLength for f32 {
    fn const_bit_length() -> u32 {
        32
    }
}

// Option

impl<T: Serde> Serde for Option<T> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        match self {
            Some(value) => {
                writer.write_bit(true);
                value.ser(writer);
            }
            None => {
                writer.write_bit(false);
            }
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        if reader.read_bit()? {
            Ok(Some(T::de(reader)?))
        } else {
            Ok(None)
        }
    }

    fn bit_length(&self) -> u32 {
        match self {
            Some(value) => 1 + value.bit_length(),
            None => 1,
        }
    }
}

// Vec

impl<T: Serde> Serde for Vec<T> {
    /// Writes at most `u32::MAX` items, the most the length prefix can carry
    fn ser(&self, writer: &mut dyn BitWrite) {
        let length = encoded_length(self.len());
        UnsignedVariableInteger::<5>::new(length).ser(writer);
        for item in self.iter().take(length as usize) {
            item.ser(writer);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let length: usize = UnsignedVariableInteger::<5>::de(reader)?.to();
        // each item takes at least a bit, so a length longer than what is left is garbage
        if length > reader.bits_remaining() as usize {
            return Err(SerdeErr::InvalidValue { type_name: "Vec" });
        }
        let mut output = Vec::with_capacity(length);
        for _ in 0..length {
            output.push(T::de(reader)?);
        }
        Ok(output)
    }

    fn bit_length(&self) -> u32 {
        let length = encoded_length(self.len());
        let header = UnsignedVariableInteger::<5>::new(length).bit_length();
        self.iter()
            .take(length as usize)
            .fold(header, |acc, item| acc.saturating_add(item.bit_length()))
    }
}

fn encoded_length(length: usize) -> u32 {
    u32::try_from(length).unwrap_or(u32::MAX)
}

// Fixed arrays

impl<T: Serde, const N: usize> Serde for [T; N] {
    fn ser(&self, writer: &mut dyn BitWrite) {
        for item in self {
            item.ser(writer);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::de(reader)?);
        }
        items
            .try_into()
            .map_err(|_| SerdeErr::InvalidValue { type_name: "array" })
    }

    fn bit_length(&self) -> u32 {
        self.iter().map(Serde::bit_length).sum()
    }
}
