//! [`Allocator`] implementation, so arena memory can back `allocator_api2`
//! collections and any third-party code that accepts an injected allocator.
//!
//! ```
//! use allocator_api2::vec::Vec;
//! use blacksquid_arena::Arena;
//!
//! let arena = Arena::new();
//! let mut bytes = Vec::new_in(&arena);
//! bytes.extend_from_slice(b"hello");
//! assert_eq!(bytes.as_slice(), b"hello");
//! ```

use allocator_api2::alloc::{AllocError, Allocator, Layout};
use core::ptr::NonNull;

use crate::Arena;

// SAFETY: blocks returned by `allocate` stay valid until the arena is reset,
// rewound or released, all of which need `&mut Arena` and therefore cannot
// happen while a collection still borrows the arena as its allocator.
unsafe impl Allocator for Arena {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        let ptr = self.try_alloc_layout(layout).map_err(|_| AllocError)?;
        Ok(NonNull::slice_from_raw_parts(ptr, layout.size()))
    }

    unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {
        // Blocks are reclaimed in bulk.
    }

    unsafe fn grow(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, AllocError> {
        if self.grow_in_place(ptr, old_layout, new_layout) {
            return Ok(NonNull::slice_from_raw_parts(ptr, new_layout.size()));
        }

        let new = self.allocate(new_layout)?;
        // SAFETY: the caller guarantees `ptr` is valid for `old_layout.size()`
        // bytes; the new block is fresh, at least that large, and disjoint.
        unsafe {
            core::ptr::copy_nonoverlapping(
                ptr.as_ptr(),
                new.cast::<u8>().as_ptr(),
                old_layout.size(),
            );
        }
        Ok(new)
    }
}
