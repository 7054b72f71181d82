//! Immutable singly linked lists.
//!
//! Every operation that produces a list builds it in an arena passed by the
//! caller. Intermediate buffers needed along the way (collecting a prefix,
//! the working copy of a sort) live in a scratch arena that is dropped
//! before the operation returns, so the destination arena only ever
//! receives the cells of the result.

use core::cmp::Ordering;
use core::fmt;

use allocator_api2::vec::Vec;
use blacksquid_arena::{Arena, WORD};

use super::{Array, Value};
use crate::error::{Error, Result};

/// A handle to the first cell of a list. The empty list is a dedicated
/// terminator cell allocated by [`List::nil`].
#[derive(Clone, Copy)]
pub struct List<'a> {
    node: &'a Node<'a>,
}

#[derive(Clone, Copy)]
enum Node<'a> {
    Nil,
    Cons(Value<'a>, &'a Node<'a>),
}

/// A scratch arena whose first region fits a buffer of `len` values.
pub(crate) fn scratch_for(len: usize) -> Arena {
    Arena::with_region_capacity((len * size_of::<Value<'_>>()).div_ceil(WORD))
}

/// Position and value of the first minimum under `cmp`.
fn min_position<'a, I, F>(values: I, cmp: &mut F) -> Option<(usize, Value<'a>)>
where
    I: IntoIterator<Item = Value<'a>>,
    F: FnMut(&Value<'a>, &Value<'a>) -> Ordering,
{
    let mut best: Option<(usize, Value<'a>)> = None;
    for (index, value) in values.into_iter().enumerate() {
        match best {
            Some((_, current)) if cmp(&value, &current) != Ordering::Less => {}
            _ => best = Some((index, value)),
        }
    }
    best
}

impl<'a> List<'a> {
    /// The empty list.
    pub fn nil(arena: &'a Arena) -> Self {
        List {
            node: arena.alloc(Node::Nil),
        }
    }

    /// A new list with `value` in front of `rest`. `rest` is shared, not copied.
    pub fn cons(arena: &'a Arena, value: Value<'a>, rest: List<'a>) -> Self {
        List {
            node: arena.alloc(Node::Cons(value, rest.node)),
        }
    }

    /// Build a list holding `values` in iteration order.
    pub fn from_values<I>(arena: &'a Arena, values: I) -> Self
    where
        I: IntoIterator<Item = Value<'a>>,
        I::IntoIter: DoubleEndedIterator,
    {
        values
            .into_iter()
            .rev()
            .fold(Self::nil(arena), |rest, value| Self::cons(arena, value, rest))
    }

    /// Whether both handles point at the same cell.
    pub fn ptr_eq(self, other: List<'_>) -> bool {
        core::ptr::addr_eq(self.node, other.node)
    }

    pub fn is_nil(self) -> bool {
        matches!(self.node, Node::Nil)
    }

    pub fn head(self) -> Option<Value<'a>> {
        match *self.node {
            Node::Nil => None,
            Node::Cons(head, _) => Some(head),
        }
    }

    /// Everything after the head, or `None` for the empty list.
    pub fn rest(self) -> Option<List<'a>> {
        match *self.node {
            Node::Nil => None,
            Node::Cons(_, rest) => Some(List { node: rest }),
        }
    }

    /// Iterate from the head. The list itself is untouched, so iteration can
    /// be restarted any number of times.
    pub fn iter(self) -> ListIter<'a> {
        ListIter { node: self.node }
    }

    pub fn len(self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(self) -> bool {
        self.is_nil()
    }

    pub fn get(self, index: usize) -> Result<Value<'a>> {
        self.iter()
            .nth(index)
            .ok_or_else(|| Error::IndexOutOfBounds {
                index,
                len: self.len(),
            })
    }

    pub fn reverse(self, arena: &'a Arena) -> List<'a> {
        self.iter()
            .fold(Self::nil(arena), |rest, value| Self::cons(arena, value, rest))
    }

    /// The elements of `self` followed by those of `other`, in fresh cells.
    pub fn append(self, arena: &'a Arena, other: List<'a>) -> List<'a> {
        let len = self.len() + other.len();
        let scratch = scratch_for(len);
        let mut values = Vec::with_capacity_in(len, &scratch);
        values.extend(self.iter());
        values.extend(other.iter());
        Self::from_values(arena, values.iter().copied())
    }

    /// A fresh spine over the same elements.
    pub fn copy(self, arena: &'a Arena) -> List<'a> {
        self.take(arena, usize::MAX)
    }

    /// The first `n` elements, or all of them when the list is shorter.
    pub fn take(self, arena: &'a Arena, n: usize) -> List<'a> {
        let count = n.min(self.len());
        let scratch = scratch_for(count);
        let mut values = Vec::with_capacity_in(count, &scratch);
        values.extend(self.iter().take(n));
        Self::from_values(arena, values.iter().copied())
    }

    /// The elements for which `keep` returns true, in their original order.
    pub fn filter<F>(self, arena: &'a Arena, mut keep: F) -> List<'a>
    where
        F: FnMut(&Value<'a>) -> bool,
    {
        let scratch = scratch_for(self.len());
        let mut values = Vec::new_in(&scratch);
        values.extend(self.iter().filter(|v| keep(v)));
        Self::from_values(arena, values.iter().copied())
    }

    /// Apply `f` to every element, collecting the results into `arena`.
    pub fn map<'b, F>(self, arena: &'b Arena, f: F) -> List<'b>
    where
        F: FnMut(Value<'a>) -> Value<'b>,
    {
        let scratch = scratch_for(self.len());
        let mut values: Vec<Value<'b>, &Arena> = Vec::new_in(&scratch);
        values.extend(self.iter().map(f));
        List::from_values(arena, values.iter().copied())
    }

    pub fn for_each<F>(self, f: F)
    where
        F: FnMut(Value<'a>),
    {
        self.iter().for_each(f);
    }

    /// The smallest element under `cmp`. Among equal elements the earliest wins.
    pub fn min_by<F>(self, mut cmp: F) -> Option<Value<'a>>
    where
        F: FnMut(&Value<'a>, &Value<'a>) -> Ordering,
    {
        min_position(self.iter(), &mut cmp).map(|(_, value)| value)
    }

    /// The smallest element under `cmp`, and the list without it.
    ///
    /// `self` is not modified: the cells before the minimum are rebuilt in
    /// `arena` and the cells after it are shared.
    pub fn min_and_remove<F>(self, arena: &'a Arena, mut cmp: F) -> Option<(Value<'a>, List<'a>)>
    where
        F: FnMut(&Value<'a>, &Value<'a>) -> Ordering,
    {
        let (index, min) = min_position(self.iter(), &mut cmp)?;

        let mut tail = self;
        for _ in 0..=index {
            tail = tail.rest()?;
        }

        let scratch = scratch_for(index);
        let mut prefix = Vec::with_capacity_in(index, &scratch);
        prefix.extend(self.iter().take(index));
        let rest = prefix
            .iter()
            .rev()
            .fold(tail, |rest, value| Self::cons(arena, *value, rest));
        Some((min, rest))
    }

    /// Stable selection sort under `cmp`.
    ///
    /// Each step is [`min_and_remove`](Self::min_and_remove) on a private
    /// working copy: the earliest minimum is taken out and appended to the
    /// result. The working copy and the accumulator live in a scratch arena;
    /// only the sorted result is built in `arena`.
    pub fn sort_by<F>(self, arena: &'a Arena, mut cmp: F) -> List<'a>
    where
        F: FnMut(&Value<'a>, &Value<'a>) -> Ordering,
    {
        let len = self.len();
        let scratch = scratch_for(2 * len);
        let mut pending = Vec::with_capacity_in(len, &scratch);
        pending.extend(self.iter());
        let mut sorted = Vec::with_capacity_in(len, &scratch);

        while let Some((index, min)) = min_position(pending.iter().copied(), &mut cmp) {
            pending.remove(index);
            sorted.push(min);
        }

        tracing::trace!(len, "sorted list");
        Self::from_values(arena, sorted.iter().copied())
    }

    pub fn to_array(self, arena: &'a Arena) -> Array<'a> {
        Array::from_list(arena, self)
    }
}

impl<'a> IntoIterator for List<'a> {
    type Item = Value<'a>;
    type IntoIter = ListIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of a [`List`].
#[derive(Clone)]
pub struct ListIter<'a> {
    node: &'a Node<'a>,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = Value<'a>;

    fn next(&mut self) -> Option<Value<'a>> {
        match *self.node {
            Node::Nil => None,
            Node::Cons(head, rest) => {
                self.node = rest;
                Some(head)
            }
        }
    }
}

impl core::iter::FusedIterator for ListIter<'_> {}

impl PartialEq for List<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl fmt::Debug for List<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
