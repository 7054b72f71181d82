extern crate std;

use alloc::vec;
use core::alloc::Layout;

use super::{Arena, REGION_DEFAULT_CAPACITY, WORD};

// =============================================================================
// Region growth
// =============================================================================

#[test]
fn no_region_until_first_alloc() {
    let arena = Arena::new();
    assert_eq!(arena.region_count(), 0);
    assert_eq!(arena.first_region_ptr(), None);

    arena.alloc(1_u8);
    assert_eq!(arena.region_count(), 1);
    assert_eq!(arena.capacity_bytes(), REGION_DEFAULT_CAPACITY * WORD);
}

#[test]
fn sizes_round_up_to_words() {
    let arena = Arena::new();
    arena.alloc(1_u8);
    assert_eq!(arena.allocated_bytes(), WORD);
    arena.alloc_bytes(&[0; WORD + 1]);
    assert_eq!(arena.allocated_bytes(), 3 * WORD);
}

#[test]
fn appends_region_when_full() {
    let arena = Arena::with_region_capacity(2);
    arena.alloc(1_u64);
    arena.alloc(2_u64);
    assert_eq!(arena.region_count(), 1);

    arena.alloc(3_u64);
    assert_eq!(arena.region_count(), 2);
}

#[test]
fn oversized_request_gets_its_own_region() {
    let arena = Arena::with_region_capacity(4);
    let big = arena.alloc_bytes_zeroed(100 * WORD);
    assert_eq!(big.len(), 100 * WORD);
    assert!(big.iter().all(|b| *b == 0));
    assert_eq!(arena.capacity_bytes(), 100 * WORD);
}

#[test]
fn over_aligned_layout() {
    let arena = Arena::with_region_capacity(4);
    arena.alloc(1_u8);
    let layout = Layout::from_size_align(64, 64).unwrap();
    let ptr = arena.alloc_layout(layout);
    assert_eq!(ptr.as_ptr().addr() % 64, 0);
}

// =============================================================================
// Reset and rewind
// =============================================================================

#[test]
fn reset_reuses_first_region() {
    let mut arena = Arena::new();
    let first = arena.alloc(7_u64) as *mut u64;
    let base = arena.first_region_ptr();

    arena.reset();
    assert_eq!(arena.allocated_bytes(), 0);

    let again = arena.alloc(9_u64) as *mut u64;
    assert_eq!(first, again);
    assert_eq!(arena.first_region_ptr(), base);
}

#[test]
fn reset_moves_cursor_to_first_region() {
    let mut arena = Arena::with_region_capacity(1);
    arena.alloc(1_u64);
    arena.alloc(2_u64);
    arena.alloc(3_u64);
    assert_eq!(arena.region_count(), 3);

    arena.reset();
    arena.alloc(4_u64);
    arena.alloc(5_u64);
    arena.alloc(6_u64);
    assert_eq!(arena.region_count(), 3, "reset must reuse existing regions");
}

#[test]
fn rewind_to_snapshot() {
    let mut arena = Arena::with_region_capacity(2);
    arena.alloc(1_u64);
    let snapshot = arena.snapshot();
    let kept = arena.allocated_bytes();

    arena.alloc(2_u64);
    arena.alloc(3_u64);
    arena.alloc(4_u64);
    assert!(arena.allocated_bytes() > kept);

    arena.rewind(snapshot);
    assert_eq!(arena.allocated_bytes(), kept);
}

#[test]
fn rewind_empty_arena() {
    let mut arena = Arena::new();
    let snapshot = arena.snapshot();
    arena.rewind(snapshot);
    assert_eq!(arena.region_count(), 0);
}

// =============================================================================
// Release
// =============================================================================

#[test]
fn release_frees_regions() {
    let mut arena = Arena::new();
    arena.alloc(1_u32);
    arena.release();
    assert!(arena.is_released());
    assert_eq!(arena.region_count(), 0);
}

#[test]
#[should_panic(expected = "arena used after release")]
fn alloc_after_release_panics() {
    let mut arena = Arena::new();
    arena.release();
    arena.alloc(1_u32);
}

// =============================================================================
// Slices
// =============================================================================

#[test]
fn slice_fill_iter() {
    let arena = Arena::new();
    let slice = arena.alloc_slice_fill_iter((1..5).map(|i| i * 10));
    assert_eq!(slice, &[10, 20, 30, 40]);
}

#[test]
fn empty_slices() {
    let arena = Arena::new();
    let empty: &mut [u64] = arena.alloc_slice_copy(&[]);
    assert!(empty.is_empty());
    assert_eq!(arena.alloc_str(""), "");
}

#[test]
fn allocations_do_not_overlap() {
    let arena = Arena::with_region_capacity(3);
    let blocks: std::vec::Vec<&mut [u8]> = (0..20_u8)
        .map(|i| arena.alloc_bytes(&vec![i; (i as usize % 5) + 1]))
        .collect();
    for (i, block) in blocks.iter().enumerate() {
        assert!(block.iter().all(|b| *b == i as u8));
    }
}
