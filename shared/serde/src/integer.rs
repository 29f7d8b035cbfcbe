use crate::{
    bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr, serde::Serde, ConstBitLength,
};

pub trait SerdeIntegerConversion<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> {
    fn from(value: &SerdeInteger<SIGNED, VARIABLE, BITS>) -> Self;
}

pub type UnsignedInteger<const BITS: u8> = SerdeInteger<false, false, BITS>;
pub type SignedInteger<const BITS: u8> = SerdeInteger<true, false, BITS>;
pub type UnsignedVariableInteger<const BITS: u8> = SerdeInteger<false, true, BITS>;
pub type SignedVariableInteger<const BITS: u8> = SerdeInteger<true, true, BITS>;

// The const-generic wrapper delegates to a plain inner type, to keep monomorphized code small.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SerdeInteger<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> {
    inner: SerdeIntegerInner,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
struct SerdeIntegerInner {
    value: i64,
    signed: bool,
    variable: bool,
    bits: u8,
}

impl SerdeIntegerInner {
    fn new(signed: bool, variable: bool, bits: u8, value: i64) -> Self {
        if bits == 0 || bits > 63 {
            panic!("integer bit width must be within 1..=63, got {}", bits);
        }
        if !signed && value < 0 {
            panic!("can't encode a negative number with an Unsigned Integer!");
        }
        if !variable {
            let max_value: u64 = 1_u64 << bits;
            if value.unsigned_abs() >= max_value {
                panic!(
                    "with {} bits, can't encode number with magnitude of {} or more",
                    bits, max_value
                );
            }
        }

        Self {
            value,
            signed,
            variable,
            bits,
        }
    }

    fn ser(&self, writer: &mut dyn BitWrite) {
        let negative = self.value < 0;
        if self.signed {
            writer.write_bit(negative);
        }
        let mut magnitude: u64 = self.value.unsigned_abs();

        if self.variable {
            loop {
                let proceed = magnitude >= 1_u64 << self.bits;
                writer.write_bit(proceed);
                for _ in 0..self.bits {
                    writer.write_bit(magnitude & 1 != 0);
                    magnitude >>= 1;
                }
                if !proceed {
                    return;
                }
            }
        } else {
            for _ in 0..self.bits {
                writer.write_bit(magnitude & 1 != 0);
                magnitude >>= 1;
            }
        }
    }

    fn de(reader: &mut BitReader, signed: bool, variable: bool, bits: u8) -> Result<Self, SerdeErr> {
        let negative = if signed { reader.read_bit()? } else { false };

        let mut magnitude: u64 = 0;
        let mut shift: u32 = 0;

        loop {
            let proceed = if variable { reader.read_bit()? } else { false };
            for _ in 0..bits {
                if reader.read_bit()? {
                    if shift >= 63 {
                        return Err(SerdeErr::InvalidValue {
                            type_name: "SerdeInteger",
                        });
                    }
                    magnitude |= 1 << shift;
                }
                shift += 1;
            }
            if !proceed {
                break;
            }
        }

        let value = magnitude as i64;
        Ok(Self {
            value: if negative { -value } else { value },
            signed,
            variable,
            bits,
        })
    }

    fn bit_length(&self) -> u32 {
        let mut output: u32 = 0;
        if self.signed {
            output += 1;
        }
        if self.variable {
            let mut magnitude = self.value.unsigned_abs();
            loop {
                let proceed = magnitude >= 1_u64 << self.bits;
                output += 1 + self.bits as u32;
                magnitude >>= self.bits;
                if !proceed {
                    break;
                }
            }
        } else {
            output += self.bits as u32;
        }
        output
    }
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> SerdeInteger<SIGNED, VARIABLE, BITS> {
    pub fn new<T: Into<i64>>(value: T) -> Self {
        Self {
            inner: SerdeIntegerInner::new(SIGNED, VARIABLE, BITS, value.into()),
        }
    }

    pub fn get(&self) -> i64 {
        self.inner.value
    }

    pub fn to<T: SerdeIntegerConversion<SIGNED, VARIABLE, BITS>>(&self) -> T {
        T::from(self)
    }
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> Serde
    for SerdeInteger<SIGNED, VARIABLE, BITS>
{
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.inner.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let inner = SerdeIntegerInner::de(reader, SIGNED, VARIABLE, BITS)?;
        Ok(Self { inner })
    }

    fn bit_length(&self) -> u32 {
        self.inner.bit_length()
    }
}

impl<const SIGNED: bool, const BITS: u8> ConstBitLength for SerdeInteger<SIGNED, false, BITS> {
    fn const_bit_length() -> u32 {
        let sign_bit = if SIGNED { 1 } else { 0 };
        sign_bit + BITS as u32
    }
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8, T: Into<i64>> From<T>
    for SerdeInteger<SIGNED, VARIABLE, BITS>
{
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

// Only reachable with a value read off the wire, so an out-of-range value saturates
// instead of panicking.
impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8, T: TryFrom<i64> + Bounded>
    SerdeIntegerConversion<SIGNED, VARIABLE, BITS> for T
{
    fn from(value: &SerdeInteger<SIGNED, VARIABLE, BITS>) -> Self {
        let raw = value.get();
        T::try_from(raw).unwrap_or_else(|_| if raw < 0 { T::MIN } else { T::MAX })
    }
}

pub trait Bounded {
    const MIN: Self;
    const MAX: Self;
}

macro_rules! impl_bounded {
    ($($t:ty),*) => {
        $(impl Bounded for $t {
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;
        })*
    };
}

impl_bounded!(u8, u16, u32, u64, usize, i8, i16, i32, i64);
