//! A single fixed-capacity block of word-aligned storage.

use alloc::alloc::{Layout, alloc, dealloc};
use core::ptr::NonNull;

use crate::{AllocError, WORD};

/// One link of an arena's region chain.
///
/// `capacity` and `count` are measured in words. Memory handed out from a
/// region is never zeroed and never individually freed.
pub(crate) struct Region {
    data: NonNull<usize>,
    capacity: usize,
    count: usize,
}

impl Region {
    /// Allocate a region able to hold `capacity` words.
    pub(crate) fn new(capacity: usize) -> Result<Self, AllocError> {
        let capacity = capacity.max(1);
        let layout = Layout::array::<usize>(capacity)
            .map_err(|_| AllocError::new(capacity.saturating_mul(WORD), WORD))?;

        // SAFETY: `layout` has a non-zero size because `capacity >= 1`.
        let ptr = unsafe { alloc(layout) };
        let data = NonNull::new(ptr.cast::<usize>())
            .ok_or_else(|| AllocError::new(layout.size(), layout.align()))?;

        tracing::trace!(capacity_words = capacity, "allocated arena region");

        Ok(Self {
            data,
            capacity,
            count: 0,
        })
    }

    /// Number of words a fresh region needs so that `layout` is guaranteed to fit,
    /// whatever padding its alignment requires.
    pub(crate) fn words_for(layout: Layout) -> Result<usize, AllocError> {
        let padding = layout.align().saturating_sub(WORD);
        let bytes = layout
            .size()
            .checked_add(padding)
            .ok_or_else(|| AllocError::from_layout(layout))?;
        Ok(bytes.div_ceil(WORD).max(1))
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn set_count(&mut self, count: usize) {
        debug_assert!(count <= self.capacity, "region count past capacity");
        self.count = count;
    }

    pub(crate) fn base(&self) -> NonNull<u8> {
        self.data.cast()
    }

    /// Byte offset of `ptr` inside this region, if it points into it.
    fn offset_of(&self, ptr: NonNull<u8>) -> Option<usize> {
        let base = self.base().as_ptr().addr();
        let addr = ptr.as_ptr().addr();
        let end = base + self.capacity * WORD;
        (base..=end).contains(&addr).then(|| addr - base)
    }

    /// Bump-allocate `layout` at the current offset.
    ///
    /// Returns `None` without touching the region when the block does not fit.
    pub(crate) fn bump(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        let base = self.base().as_ptr();
        let start = self.count * WORD;
        let misalign = (base.addr() + start) % layout.align();
        let padding = (layout.align() - misalign) % layout.align();

        let offset = start.checked_add(padding)?;
        let end = offset.checked_add(layout.size())?;
        let end_words = end.div_ceil(WORD);
        if end_words > self.capacity {
            return None;
        }

        self.count = end_words;
        // SAFETY: `offset <= end <= capacity * WORD`, so the pointer stays inside
        // (or one past the end of) this region's allocation.
        Some(unsafe { NonNull::new_unchecked(base.add(offset)) })
    }

    /// Extend the block at `ptr` from `old_size` to `new_size` bytes without
    /// moving it. Only the most recent block of the region can grow.
    pub(crate) fn grow_in_place(
        &mut self,
        ptr: NonNull<u8>,
        old_size: usize,
        new_size: usize,
    ) -> bool {
        let Some(offset) = self.offset_of(ptr) else {
            return false;
        };
        let Some(old_end) = offset.checked_add(old_size) else {
            return false;
        };
        if old_end.div_ceil(WORD) != self.count {
            return false;
        }
        let Some(new_end) = offset.checked_add(new_size) else {
            return false;
        };
        let new_words = new_end.div_ceil(WORD);
        if new_words > self.capacity {
            return false;
        }
        self.count = new_words.max(self.count);
        true
    }
}

impl Drop for Region {
    fn drop(&mut self) {
        // `capacity` was accepted by `Layout::array` when the region was created.
        if let Ok(layout) = Layout::array::<usize>(self.capacity) {
            // SAFETY: `data` was returned by `alloc` with exactly this layout.
            unsafe { dealloc(self.data.as_ptr().cast(), layout) };
        }
    }
}
