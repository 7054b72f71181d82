//! Region-chained bump arena.
//!
//! An [`Arena`] owns a chain of fixed-capacity regions and bump-allocates
//! out of them. Blocks are never freed one by one: the whole arena is
//! [reset](Arena::reset), [rewound](Arena::rewind) or
//! [released](Arena::release) at once.
//!
//! ```text
//! begin                         cursor
//!   │                             │
//!   ▼                             ▼
//! [region 0: count/capacity] ─▶ [region 1] ─▶ [region 2]
//! ```
//!
//! Allocation walks forward from the cursor until a region with enough room
//! is found, appending a new region of `max(region_capacity, request)` words
//! when the chain is exhausted.
//!
//! # Example
//!
//! ```
//! use blacksquid_arena::Arena;
//!
//! let mut arena = Arena::new();
//! let n = arena.alloc(42_i64);
//! assert_eq!(*n, 42);
//!
//! let s = arena.alloc_str("hello");
//! assert_eq!(s, "hello");
//!
//! // Every block is gone after a reset; the memory stays with the arena.
//! arena.reset();
//! assert_eq!(arena.allocated_bytes(), 0);
//! ```
//!
//! # Gotchas
//!
//! - **No drop**: `Drop` is never run for values placed in the arena.
//! - **Not zeroed**: fresh blocks hold whatever the region held before.
//!   Use [`Arena::alloc_bytes_zeroed`] when zeroed memory is needed.

#![no_std]
#![allow(clippy::mut_from_ref)]

extern crate alloc;

mod allocator;
mod error;
mod region;

use alloc::alloc::handle_alloc_error;
use alloc::vec::Vec;
use core::alloc::Layout;
use core::cell::{Cell, RefCell};
use core::fmt;
use core::ptr::NonNull;

pub use error::AllocError;

use region::Region;

/// Allocation granularity in bytes. Every block starts on a word boundary
/// and occupies a whole number of words.
pub const WORD: usize = core::mem::size_of::<usize>();

/// Capacity, in words, of a region created for an ordinary request.
pub const REGION_DEFAULT_CAPACITY: usize = 8 * 1024;

/// A growable chain of bump-allocated regions.
///
/// Allocation goes through `&self` and returns references tied to the
/// borrow of the arena, so nothing allocated here can outlive it. Bulk
/// operations ([`reset`](Self::reset), [`rewind`](Self::rewind),
/// [`release`](Self::release)) take `&mut self`, which statically proves
/// that no such reference is still alive.
pub struct Arena {
    regions: RefCell<Vec<Region>>,
    cursor: Cell<usize>,
    region_capacity: usize,
    released: bool,
}

/// A position in an arena's region chain, see [`Arena::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    region: usize,
    count: usize,
}

impl Arena {
    /// Create an empty arena. No memory is reserved until the first allocation.
    pub fn new() -> Self {
        Self::with_region_capacity(REGION_DEFAULT_CAPACITY)
    }

    /// Create an empty arena whose regions hold `words` words by default.
    ///
    /// Requests larger than that still get a region of their own size.
    pub fn with_region_capacity(words: usize) -> Self {
        Self {
            regions: RefCell::new(Vec::new()),
            cursor: Cell::new(0),
            region_capacity: words.max(1),
            released: false,
        }
    }

    /// Default region capacity in words.
    pub fn region_capacity(&self) -> usize {
        self.region_capacity
    }

    /// Allocate an uninitialized block for `layout`.
    pub fn try_alloc_layout(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        assert!(!self.released, "arena used after release");

        let mut regions = self.regions.borrow_mut();
        if regions.is_empty() {
            let capacity = self.region_capacity.max(Region::words_for(layout)?);
            regions.push(Region::new(capacity)?);
            self.cursor.set(0);
        }

        let mut index = self.cursor.get();
        loop {
            if let Some(ptr) = regions[index].bump(layout) {
                self.cursor.set(index);
                return Ok(ptr);
            }
            if index + 1 == regions.len() {
                break;
            }
            index += 1;
        }

        let capacity = self.region_capacity.max(Region::words_for(layout)?);
        let mut region = Region::new(capacity)?;
        let ptr = region
            .bump(layout)
            .ok_or_else(|| AllocError::from_layout(layout))?;
        regions.push(region);
        self.cursor.set(regions.len() - 1);

        tracing::debug!(
            regions = regions.len(),
            capacity_words = capacity,
            "appended arena region"
        );
        Ok(ptr)
    }

    /// Allocate an uninitialized block for `layout`, aborting through
    /// [`handle_alloc_error`] on failure.
    pub fn alloc_layout(&self, layout: Layout) -> NonNull<u8> {
        self.try_alloc_layout(layout)
            .unwrap_or_else(|_| handle_alloc_error(layout))
    }

    /// Move `value` into the arena.
    pub fn try_alloc<T>(&self, value: T) -> Result<&mut T, AllocError> {
        let ptr = self.try_alloc_layout(Layout::new::<T>())?.cast::<T>();
        // SAFETY: `ptr` is valid for writes of `T`, properly aligned, and not
        // aliased by any other live allocation.
        unsafe {
            ptr.as_ptr().write(value);
            Ok(&mut *ptr.as_ptr())
        }
    }

    /// Move `value` into the arena.
    pub fn alloc<T>(&self, value: T) -> &mut T {
        let ptr = self.alloc_layout(Layout::new::<T>()).cast::<T>();
        // SAFETY: as in `try_alloc`.
        unsafe {
            ptr.as_ptr().write(value);
            &mut *ptr.as_ptr()
        }
    }

    /// Copy `src` into a new arena slice.
    pub fn try_alloc_slice_copy<T: Copy>(&self, src: &[T]) -> Result<&mut [T], AllocError> {
        let layout = Layout::for_value(src);
        let ptr = self.try_alloc_layout(layout)?.cast::<T>();
        // SAFETY: the block is large enough and aligned for `src.len()` values of
        // `T`, and cannot overlap `src`, which lives outside the fresh block.
        unsafe {
            core::ptr::copy_nonoverlapping(src.as_ptr(), ptr.as_ptr(), src.len());
            Ok(core::slice::from_raw_parts_mut(ptr.as_ptr(), src.len()))
        }
    }

    /// Copy `src` into a new arena slice.
    pub fn alloc_slice_copy<T: Copy>(&self, src: &[T]) -> &mut [T] {
        self.try_alloc_slice_copy(src)
            .unwrap_or_else(|_| handle_alloc_error(Layout::for_value(src)))
    }

    /// Collect an exact-size iterator into a new arena slice.
    ///
    /// # Panics
    ///
    /// Panics if the iterator yields fewer items than it reported.
    pub fn try_alloc_slice_fill_iter<T, I>(&self, iter: I) -> Result<&mut [T], AllocError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let mut iter = iter.into_iter();
        let len = iter.len();
        let layout = Layout::array::<T>(len)
            .map_err(|_| AllocError::new(len.saturating_mul(size_of::<T>()), align_of::<T>()))?;
        let ptr = self.try_alloc_layout(layout)?.cast::<T>();

        for i in 0..len {
            let Some(item) = iter.next() else {
                panic!("ExactSizeIterator reported {len} items but yielded {i}");
            };
            // SAFETY: `i < len` and the block holds `len` values of `T`.
            unsafe { ptr.as_ptr().add(i).write(item) };
        }

        // SAFETY: all `len` slots were initialized above.
        Ok(unsafe { core::slice::from_raw_parts_mut(ptr.as_ptr(), len) })
    }

    /// Collect an exact-size iterator into a new arena slice.
    pub fn alloc_slice_fill_iter<T, I>(&self, iter: I) -> &mut [T]
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let len = iter.len();
        self.try_alloc_slice_fill_iter(iter).unwrap_or_else(|_| {
            handle_alloc_error(Layout::array::<T>(len).unwrap_or(Layout::new::<T>()))
        })
    }

    /// Copy `bytes` into the arena.
    pub fn alloc_bytes(&self, bytes: &[u8]) -> &mut [u8] {
        self.alloc_slice_copy(bytes)
    }

    /// Allocate `len` zeroed bytes.
    pub fn try_alloc_bytes_zeroed(&self, len: usize) -> Result<&mut [u8], AllocError> {
        let layout = Layout::array::<u8>(len).map_err(|_| AllocError::new(len, 1))?;
        let ptr = self.try_alloc_layout(layout)?;
        // SAFETY: the block is valid for `len` bytes of writes.
        unsafe {
            ptr.as_ptr().write_bytes(0, len);
            Ok(core::slice::from_raw_parts_mut(ptr.as_ptr(), len))
        }
    }

    /// Allocate `len` zeroed bytes.
    pub fn alloc_bytes_zeroed(&self, len: usize) -> &mut [u8] {
        self.try_alloc_bytes_zeroed(len).unwrap_or_else(|_| {
            handle_alloc_error(Layout::array::<u8>(len).unwrap_or(Layout::new::<u8>()))
        })
    }

    /// Copy a string slice into the arena.
    pub fn alloc_str(&self, value: &str) -> &mut str {
        let bytes = self.alloc_bytes(value.as_bytes());
        // SAFETY: the bytes were copied verbatim from a valid `&str`.
        unsafe { core::str::from_utf8_unchecked_mut(bytes) }
    }

    /// Rewind every region to empty and move the cursor back to the first one.
    ///
    /// Backing memory is kept, so the next allocations reuse the same regions.
    pub fn reset(&mut self) {
        assert!(!self.released, "arena used after release");
        let regions = self.regions.get_mut();
        for region in regions.iter_mut() {
            region.set_count(0);
        }
        self.cursor.set(0);
        tracing::debug!(regions = regions.len(), "arena reset");
    }

    /// Free every region. The arena must not be used afterwards; any further
    /// allocation panics.
    pub fn release(&mut self) {
        let regions = self.regions.get_mut();
        tracing::debug!(regions = regions.len(), "arena released");
        regions.clear();
        regions.shrink_to_fit();
        self.cursor.set(0);
        self.released = true;
    }

    /// Whether [`release`](Self::release) has been called.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Remember the current allocation position.
    pub fn snapshot(&self) -> Snapshot {
        let regions = self.regions.borrow();
        let region = self.cursor.get();
        let count = regions.get(region).map_or(0, Region::count);
        Snapshot { region, count }
    }

    /// Roll allocation back to `snapshot`: the cursor region returns to the
    /// remembered count and every later region is emptied.
    ///
    /// # Panics
    ///
    /// Panics if the snapshot does not describe a position in this arena.
    pub fn rewind(&mut self, snapshot: Snapshot) {
        assert!(!self.released, "arena used after release");
        let regions = self.regions.get_mut();
        if regions.is_empty() {
            assert!(
                snapshot == Snapshot { region: 0, count: 0 },
                "snapshot from a different arena"
            );
            return;
        }
        assert!(
            snapshot.region < regions.len()
                && snapshot.count <= regions[snapshot.region].capacity(),
            "snapshot from a different arena"
        );

        regions[snapshot.region].set_count(snapshot.count);
        for region in regions.iter_mut().skip(snapshot.region + 1) {
            region.set_count(0);
        }
        self.cursor.set(snapshot.region);
        tracing::debug!(
            region = snapshot.region,
            count_words = snapshot.count,
            "arena rewound"
        );
    }

    /// Number of regions in the chain.
    pub fn region_count(&self) -> usize {
        self.regions.borrow().len()
    }

    /// Start address of the first region, if any region exists.
    pub fn first_region_ptr(&self) -> Option<NonNull<u8>> {
        self.regions.borrow().first().map(Region::base)
    }

    /// Bytes currently handed out, padding included.
    pub fn allocated_bytes(&self) -> usize {
        self.regions
            .borrow()
            .iter()
            .map(|r| r.count() * WORD)
            .sum()
    }

    /// Bytes reserved by all regions.
    pub fn capacity_bytes(&self) -> usize {
        self.regions
            .borrow()
            .iter()
            .map(|r| r.capacity() * WORD)
            .sum()
    }

    /// Try to extend the most recent block in place.
    pub(crate) fn grow_in_place(&self, ptr: NonNull<u8>, old: Layout, new: Layout) -> bool {
        if ptr.as_ptr().addr() % new.align() != 0 {
            return false;
        }
        let mut regions = self.regions.borrow_mut();
        let cursor = self.cursor.get();
        regions
            .get_mut(cursor)
            .is_some_and(|region| region.grow_in_place(ptr, old.size(), new.size()))
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("regions", &self.region_count())
            .field("cursor", &self.cursor.get())
            .field("allocated_bytes", &self.allocated_bytes())
            .field("capacity_bytes", &self.capacity_bytes())
            .field("released", &self.released)
            .finish()
    }
}

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
static_assertions::const_assert_eq!(WORD, 8);

#[cfg(test)]
mod tests;
