//! Data Memory Tests.
//!
//! Verifies zero-initialization, defensive out-of-range reads, and the
//! little-endian raw load/store protocol at every access width.

use rstest::rstest;
use rv64emu_core::core::memory::Memory;

#[test]
fn memory_starts_zeroed() {
    let mem = Memory::new(64);
    assert_eq!(mem.size(), 64);
    for addr in 0..64 {
        assert_eq!(mem.byte(addr), 0);
    }
}

#[test]
fn out_of_range_byte_reads_zero() {
    let mem = Memory::new(16);
    assert_eq!(mem.byte(16), 0);
    assert_eq!(mem.byte(u64::MAX), 0);
}

#[rstest]
#[case::byte(1, 0xAB)]
#[case::half(2, 0xABCD)]
#[case::word(4, 0xDEAD_BEEF)]
#[case::doubleword(8, 0x0123_4567_89AB_CDEF)]
fn store_load_round_trip(#[case] width: u64, #[case] value: u64) {
    let mut mem = Memory::new(32);
    mem.store_le(8, width, value);
    assert_eq!(mem.load_le(8, width), value);
}

#[test]
fn stores_truncate_to_access_width() {
    let mut mem = Memory::new(16);
    mem.store_le(0, 1, 0x1FF);
    assert_eq!(mem.byte(0), 0xFF);
    assert_eq!(mem.byte(1), 0, "truncated high bits must not spill");
}

#[test]
fn stored_bytes_are_little_endian() {
    let mut mem = Memory::new(16);
    mem.store_le(4, 4, 0x1122_3344);
    assert_eq!(mem.byte(4), 0x44);
    assert_eq!(mem.byte(5), 0x33);
    assert_eq!(mem.byte(6), 0x22);
    assert_eq!(mem.byte(7), 0x11);
}

#[test]
fn narrow_store_leaves_neighbors_alone() {
    let mut mem = Memory::new(16);
    mem.store_le(0, 8, u64::MAX);
    mem.store_le(2, 2, 0);
    assert_eq!(mem.load_le(0, 8), 0xFFFF_FFFF_0000_FFFF);
}

#[test]
fn zero_sized_memory_reads_zero() {
    let mem = Memory::new(0);
    assert_eq!(mem.size(), 0);
    assert_eq!(mem.byte(0), 0);
    assert_eq!(mem.load_le(0, 8), 0);
}
