//! Byte-addressable data memory.
//!
//! This module provides the flat memory buffer backing the emulated machine's
//! data region. It performs the following:
//! 1. **Storage:** A fixed-size, zero-initialized byte buffer allocated once per run.
//! 2. **Defensive reads:** Out-of-range byte reads return 0 instead of faulting.
//! 3. **Raw access:** Width-sized little-endian loads and stores at internal offsets.
//!
//! Offsets here are *not* architectural addresses. The valid architectural
//! data range is `[instr_upper, instr_upper + size)` — the data region is
//! based at the instruction region's upper bound, with no separate data-base
//! address — and the processor translates an architectural address to an
//! offset by subtracting `instr_upper` before calling in. Bounds enforcement
//! of architectural addresses is the processor's job; this module only
//! guarantees that a stray offset cannot panic.

/// Flat, fixed-size data memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: Vec<u8>,
}

impl Memory {
    /// Allocates `size` bytes of zeroed memory.
    pub fn new(size: u64) -> Self {
        Self {
            bytes: vec![0; size as usize],
        }
    }

    /// Size of the buffer in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Reads the byte at `offset`, or 0 when `offset` is at or past the end.
    pub fn byte(&self, offset: u64) -> u8 {
        usize::try_from(offset)
            .ok()
            .and_then(|i| self.bytes.get(i).copied())
            .unwrap_or(0)
    }

    /// Reads a `width`-byte little-endian value starting at `offset`.
    ///
    /// `width` is 1, 2, 4, or 8. Bytes past the end of the buffer read as 0.
    pub fn load_le(&self, offset: u64, width: u64) -> u64 {
        let mut value = 0u64;
        for i in 0..width {
            value |= u64::from(self.byte(offset.wrapping_add(i))) << (8 * i);
        }
        value
    }

    /// Stores the low `width` bytes of `value` little-endian at `offset`.
    ///
    /// `width` is 1, 2, 4, or 8; the value is truncated to the access width.
    /// Bytes falling past the end of the buffer are dropped.
    pub fn store_le(&mut self, offset: u64, width: u64, value: u64) {
        for i in 0..width {
            let Ok(at) = usize::try_from(offset.wrapping_add(i)) else {
                continue;
            };
            if let Some(slot) = self.bytes.get_mut(at) {
                *slot = (value >> (8 * i)) as u8;
            }
        }
    }
}
