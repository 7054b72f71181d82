use core::fmt;

use allocator_api2::vec::Vec;
use blacksquid_arena::Arena;

use super::list::scratch_for;
use super::{List, Value};
use crate::error::{Error, Result};

/// A fixed-length, contiguous sequence of values.
#[derive(Clone, Copy, Default)]
pub struct Array<'a> {
    items: &'a [Value<'a>],
}

impl<'a> Array<'a> {
    /// Copy `items` into `arena`.
    pub fn new(arena: &'a Arena, items: &[Value<'a>]) -> Self {
        Array {
            items: arena.alloc_slice_copy(items),
        }
    }

    /// An array of `len` values, the `i`-th produced by `f(i)`.
    pub fn from_fn<F>(arena: &'a Arena, len: usize, f: F) -> Self
    where
        F: FnMut(usize) -> Value<'a>,
    {
        Array {
            items: arena.alloc_slice_fill_iter((0..len).map(f)),
        }
    }

    /// An array holding the elements of `list` in order.
    pub fn from_list(arena: &'a Arena, list: List<'a>) -> Self {
        let len = list.len();
        let scratch = scratch_for(len);
        let mut values = Vec::with_capacity_in(len, &scratch);
        values.extend(list.iter());
        Self::new(arena, &values)
    }

    pub fn to_list(self, arena: &'a Arena) -> List<'a> {
        List::from_values(arena, self.items.iter().copied())
    }

    pub fn as_slice(self) -> &'a [Value<'a>] {
        self.items
    }

    pub fn len(self) -> usize {
        self.items.len()
    }

    pub fn is_empty(self) -> bool {
        self.items.is_empty()
    }

    pub fn get(self, index: usize) -> Result<Value<'a>> {
        self.items
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                index,
                len: self.len(),
            })
    }

    pub fn iter(self) -> core::iter::Copied<core::slice::Iter<'a, Value<'a>>> {
        self.items.iter().copied()
    }

    /// `len` elements starting at `start`, sharing storage with `self`.
    pub fn slice(self, start: usize, len: usize) -> Result<Array<'a>> {
        let end = start.saturating_add(len);
        match self.items.get(start..end) {
            Some(items) => Ok(Array { items }),
            None => Err(Error::RangeOutOfBounds {
                start,
                end,
                len: self.len(),
            }),
        }
    }

    pub fn reverse(self, arena: &'a Arena) -> Array<'a> {
        Array {
            items: arena.alloc_slice_fill_iter(self.items.iter().rev().copied()),
        }
    }

    /// The elements of `self` followed by those of `other`.
    pub fn append(self, arena: &'a Arena, other: Array<'a>) -> Array<'a> {
        let split = self.len();
        Self::from_fn(arena, split + other.len(), |i| match i.checked_sub(split) {
            None => self.items[i],
            Some(j) => other.items[j],
        })
    }

    /// Fresh storage over the same elements.
    pub fn copy(self, arena: &'a Arena) -> Array<'a> {
        Self::new(arena, self.items)
    }
}

impl<'a> IntoIterator for Array<'a> {
    type Item = Value<'a>;
    type IntoIter = core::iter::Copied<core::slice::Iter<'a, Value<'a>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for Array<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl fmt::Debug for Array<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items).finish()
    }
}
