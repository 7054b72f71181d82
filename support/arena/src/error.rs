use core::alloc::Layout;

use thiserror::Error;

/// The backing allocator refused to hand out a new region, or the request
/// cannot be represented at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("arena allocation of {size} bytes (align {align}) failed")]
pub struct AllocError {
    size: usize,
    align: usize,
}

impl AllocError {
    /// Describe a failed request of `size` bytes with alignment `align`.
    pub fn new(size: usize, align: usize) -> Self {
        Self { size, align }
    }

    /// Describe a failed request for `layout`.
    pub fn from_layout(layout: Layout) -> Self {
        Self::new(layout.size(), layout.align())
    }

    /// Size in bytes of the request that failed.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Alignment of the request that failed.
    pub fn align(&self) -> usize {
        self.align
    }
}
