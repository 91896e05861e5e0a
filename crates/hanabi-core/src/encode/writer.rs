//! Cursor over one section of the output buffer.
//!
//! Encoders never compute offsets: they ask the writer for fields of a
//! declared width, in order. `finish` checks that the section was consumed
//! exactly.

use crate::encode::layout::Section;
use crate::error::EncodeError;

#[derive(Debug)]
pub struct SectionWriter<'a> {
    section: Section,
    buf: &'a mut [f32],
    offset: usize,
}

impl<'a> SectionWriter<'a> {
    /// `buf` must be exactly the section's range and zero-filled.
    pub fn new(section: Section, buf: &'a mut [f32]) -> Self {
        Self {
            section,
            buf,
            offset: 0,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Claims the next `width` entries.
    pub fn field(&mut self, width: usize) -> Result<&mut [f32], EncodeError> {
        let start = self.offset;
        let end = start + width;
        if end > self.buf.len() {
            return Err(EncodeError::FieldOverflow {
                section: self.section,
                offset: start,
                width,
                len: self.buf.len(),
            });
        }
        self.offset = end;
        Ok(&mut self.buf[start..end])
    }

    /// Leaves a field of `width` entries at zero.
    pub fn skip(&mut self, width: usize) -> Result<(), EncodeError> {
        self.field(width).map(|_| ())
    }

    pub fn one_hot(&mut self, width: usize, index: usize) -> Result<(), EncodeError> {
        self.ensure_fits(index + 1, width, index)?;
        self.field(width)?[index] = 1.0;
        Ok(())
    }

    /// One-hot when `index` is present, an all-zero field otherwise.
    pub fn optional_one_hot(&mut self, width: usize, index: Option<usize>) -> Result<(), EncodeError> {
        match index {
            Some(index) => self.one_hot(width, index),
            None => self.skip(width),
        }
    }

    /// First `value` entries set.
    pub fn thermometer(&mut self, width: usize, value: usize) -> Result<(), EncodeError> {
        self.ensure_fits(value, width, value)?;
        self.field(width)?[..value].fill(1.0);
        Ok(())
    }

    /// Entry `i` set when bit `i` of `mask` is set.
    pub fn bitmask(&mut self, width: usize, mask: u32) -> Result<(), EncodeError> {
        let used_bits = (u32::BITS - mask.leading_zeros()) as usize;
        self.ensure_fits(used_bits, width, mask as usize)?;
        let field = self.field(width)?;
        for (bit, entry) in field.iter_mut().enumerate() {
            if mask & (1 << bit) != 0 {
                *entry = 1.0;
            }
        }
        Ok(())
    }

    /// Copies `values` into the next field.
    pub fn values(&mut self, values: &[f32]) -> Result<(), EncodeError> {
        self.field(values.len())?.copy_from_slice(values);
        Ok(())
    }

    /// Number of entries written; fails unless the section is exactly full.
    pub fn finish(self) -> Result<usize, EncodeError> {
        if self.offset != self.buf.len() {
            return Err(EncodeError::LayoutMismatch {
                section: self.section,
                expected: self.buf.len(),
                written: self.offset,
            });
        }
        Ok(self.offset)
    }

    fn ensure_fits(&self, needed: usize, width: usize, value: usize) -> Result<(), EncodeError> {
        if needed > width {
            return Err(EncodeError::ValueOutOfRange {
                section: self.section,
                value,
                width,
            });
        }
        Ok(())
    }
}

/// Decodes a thermometer field: the number of leading set entries.
pub fn thermometer_value(field: &[f32]) -> usize {
    field.iter().take_while(|&&entry| entry == 1.0).count()
}
