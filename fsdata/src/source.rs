//! Raw offset access
//!
//! [`RawOffsetSource`] is the seam between the core and whatever session
//! talks to the simulator. The core only ever asks for typed values by
//! address; opening, refreshing and reconnecting the session is the
//! implementor's business.
//!
//! [`OffsetMemory`] is an in-memory little-endian image of the whole offset
//! area. It backs the replay tool and the tests.

use crate::types::{Address, FsDataError, Result};
use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

/// Size of the simulator's offset area in bytes
pub const OFFSET_AREA_SIZE: usize = 0x1_0000;

/// Typed access to simulator offsets
///
/// Every read may fail with [`FsDataError::ReadFailure`]. Implementations
/// must not retry inside a read; a failed read is reported and the caller
/// moves on.
pub trait RawOffsetSource {
    /// Read a signed little-endian integer of `width` bytes (1, 2, 4 or 8),
    /// sign-extended to 64 bits
    fn read_int(&self, address: Address, width: usize) -> Result<i64>;

    /// Read a floating fraction of `width` bytes (4 = f32, 8 = f64)
    fn read_fixed(&self, address: Address, width: usize) -> Result<f64>;

    /// Read `width` bytes as a bit-field
    fn read_bits(&self, address: Address, width: usize) -> Result<BitField>;

    /// Read a NUL-terminated string stored in `length` bytes
    fn read_string(&self, address: Address, length: usize) -> Result<String>;

    fn read_i16(&self, address: Address) -> Result<i16> {
        self.read_int(address, 2).map(|v| v as i16)
    }

    fn read_u16(&self, address: Address) -> Result<u16> {
        self.read_int(address, 2).map(|v| v as u16)
    }

    fn read_i32(&self, address: Address) -> Result<i32> {
        self.read_int(address, 4).map(|v| v as i32)
    }

    fn read_i64(&self, address: Address) -> Result<i64> {
        self.read_int(address, 8)
    }

    fn read_f64(&self, address: Address) -> Result<f64> {
        self.read_fixed(address, 8)
    }
}

/// A raw bit-field read from the offset area
///
/// Bit 0 is the least significant bit of the first byte.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitField {
    bytes: Vec<u8>,
}

impl BitField {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Number of bits available
    pub fn len(&self) -> usize {
        self.bytes.len() * 8
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Value of one bit; bits past the end read as clear
    pub fn bit(&self, index: usize) -> bool {
        let byte_idx = index / 8;
        let bit_in_byte = index % 8;

        self.bytes
            .get(byte_idx)
            .map(|byte| (byte >> bit_in_byte) & 0x01 == 1)
            .unwrap_or(false)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// A typed value to store into an [`OffsetMemory`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawValue {
    I8(i8),
    I16(i16),
    U16(u16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    /// Raw bytes, e.g. a bit-field
    Bytes(Vec<u8>),
    /// Text, written NUL-terminated
    Str(String),
}

impl RawValue {
    /// Number of bytes this value occupies
    pub fn width(&self) -> usize {
        match self {
            RawValue::I8(_) => 1,
            RawValue::I16(_) | RawValue::U16(_) => 2,
            RawValue::I32(_) | RawValue::F32(_) => 4,
            RawValue::I64(_) | RawValue::F64(_) => 8,
            RawValue::Bytes(b) => b.len(),
            RawValue::Str(s) => s.len() + 1,
        }
    }
}

/// In-memory image of the offset area
#[derive(Debug, Clone)]
pub struct OffsetMemory {
    bytes: Vec<u8>,
}

impl OffsetMemory {
    /// Create a zero-filled offset area
    pub fn new() -> Self {
        Self {
            bytes: vec![0; OFFSET_AREA_SIZE],
        }
    }

    fn range(address: Address, len: usize) -> Result<std::ops::Range<usize>> {
        let start = address as usize;
        let end = start + len;
        if end > OFFSET_AREA_SIZE {
            return Err(FsDataError::read(
                address,
                format!("{} bytes exceed the offset area", len),
            ));
        }
        Ok(start..end)
    }

    fn slice(&self, address: Address, len: usize) -> Result<&[u8]> {
        Ok(&self.bytes[Self::range(address, len)?])
    }

    fn slice_mut(&mut self, address: Address, len: usize) -> Result<&mut [u8]> {
        let range = Self::range(address, len)?;
        Ok(&mut self.bytes[range])
    }

    /// Store a typed value at an address
    pub fn write(&mut self, address: Address, value: &RawValue) -> Result<()> {
        let buf = self.slice_mut(address, value.width())?;

        match value {
            RawValue::I8(v) => buf[0] = *v as u8,
            RawValue::I16(v) => LittleEndian::write_i16(buf, *v),
            RawValue::U16(v) => LittleEndian::write_u16(buf, *v),
            RawValue::I32(v) => LittleEndian::write_i32(buf, *v),
            RawValue::I64(v) => LittleEndian::write_i64(buf, *v),
            RawValue::F32(v) => LittleEndian::write_f32(buf, *v),
            RawValue::F64(v) => LittleEndian::write_f64(buf, *v),
            RawValue::Bytes(b) => buf.copy_from_slice(b),
            RawValue::Str(s) => {
                let (text, nul) = buf.split_at_mut(s.len());
                text.copy_from_slice(s.as_bytes());
                nul[0] = 0;
            }
        }

        log::trace!("Offset 0x{:04X} <- {:?}", address, value);
        Ok(())
    }

    pub fn write_i16(&mut self, address: Address, value: i16) -> Result<()> {
        self.write(address, &RawValue::I16(value))
    }

    pub fn write_u16(&mut self, address: Address, value: u16) -> Result<()> {
        self.write(address, &RawValue::U16(value))
    }

    pub fn write_i32(&mut self, address: Address, value: i32) -> Result<()> {
        self.write(address, &RawValue::I32(value))
    }

    pub fn write_i64(&mut self, address: Address, value: i64) -> Result<()> {
        self.write(address, &RawValue::I64(value))
    }

    pub fn write_f64(&mut self, address: Address, value: f64) -> Result<()> {
        self.write(address, &RawValue::F64(value))
    }

    /// Store text into a fixed-length field, zero-padding the remainder
    pub fn write_str(&mut self, address: Address, length: usize, value: &str) -> Result<()> {
        let buf = self.slice_mut(address, length)?;
        buf.fill(0);
        let n = value.len().min(length.saturating_sub(1));
        buf[..n].copy_from_slice(&value.as_bytes()[..n]);
        Ok(())
    }

    /// Zero the whole area
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }
}

impl Default for OffsetMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl RawOffsetSource for OffsetMemory {
    fn read_int(&self, address: Address, width: usize) -> Result<i64> {
        let buf = self.slice(address, width)?;
        match width {
            1 => Ok(buf[0] as i8 as i64),
            2 => Ok(LittleEndian::read_i16(buf) as i64),
            4 => Ok(LittleEndian::read_i32(buf) as i64),
            8 => Ok(LittleEndian::read_i64(buf)),
            _ => Err(FsDataError::read(
                address,
                format!("unsupported integer width {}", width),
            )),
        }
    }

    fn read_fixed(&self, address: Address, width: usize) -> Result<f64> {
        let buf = self.slice(address, width)?;
        match width {
            4 => Ok(LittleEndian::read_f32(buf) as f64),
            8 => Ok(LittleEndian::read_f64(buf)),
            _ => Err(FsDataError::read(
                address,
                format!("unsupported fraction width {}", width),
            )),
        }
    }

    fn read_bits(&self, address: Address, width: usize) -> Result<BitField> {
        Ok(BitField::new(self.slice(address, width)?.to_vec()))
    }

    fn read_string(&self, address: Address, length: usize) -> Result<String> {
        let buf = self.slice(address, length)?;
        let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
        Ok(String::from_utf8_lossy(&buf[..end]).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widths_sign_extend() {
        let mut mem = OffsetMemory::new();
        mem.write_i16(0x0100, -2).unwrap();
        mem.write_i32(0x0200, -70_000).unwrap();

        assert_eq!(mem.read_int(0x0100, 2).unwrap(), -2);
        assert_eq!(mem.read_u16(0x0100).unwrap(), 0xFFFE);
        assert_eq!(mem.read_i32(0x0200).unwrap(), -70_000);
        assert!(mem.read_int(0x0100, 3).is_err());
    }

    #[test]
    fn test_little_endian_layout() {
        let mut mem = OffsetMemory::new();
        mem.write(0x0010, &RawValue::Bytes(vec![0xAB, 0xCD])).unwrap();
        assert_eq!(mem.read_u16(0x0010).unwrap(), 0xCDAB);
    }

    #[test]
    fn test_fraction_reads() {
        let mut mem = OffsetMemory::new();
        mem.write_f64(0x34B0, 1234.5).unwrap();
        mem.write(0x0040, &RawValue::F32(0.25)).unwrap();

        assert_eq!(mem.read_f64(0x34B0).unwrap(), 1234.5);
        assert_eq!(mem.read_fixed(0x0040, 4).unwrap(), 0.25);
    }

    #[test]
    fn test_bit_field() {
        let mut mem = OffsetMemory::new();
        mem.write(0x0D0C, &RawValue::Bytes(vec![0b0000_0101, 0b0000_0010])).unwrap();

        let bits = mem.read_bits(0x0D0C, 2).unwrap();
        assert_eq!(bits.len(), 16);
        assert!(bits.bit(0));
        assert!(!bits.bit(1));
        assert!(bits.bit(2));
        assert!(bits.bit(9));
        assert!(!bits.bit(40));
    }

    #[test]
    fn test_strings_stop_at_nul() {
        let mut mem = OffsetMemory::new();
        mem.write_str(0x3000, 6, "LAX").unwrap();
        assert_eq!(mem.read_string(0x3000, 6).unwrap(), "LAX");

        mem.write_str(0x3000, 6, "TOOLONGIDENT").unwrap();
        assert_eq!(mem.read_string(0x3000, 6).unwrap(), "TOOLO");

        assert_eq!(mem.read_string(0x4000, 6).unwrap(), "");
    }

    #[test]
    fn test_reads_past_the_end_fail() {
        let mem = OffsetMemory::new();
        let err = mem.read_int(0xFFFF, 4).unwrap_err();
        assert!(err.is_read_failure());
    }
}
