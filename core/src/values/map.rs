//! Persistent string-keyed maps.
//!
//! A map is a 4-ary hash trie. Each key is hashed once; the top two bits of
//! the hash pick a child of the root, the next two bits a child of that
//! node, and so on. Every node except the root holds exactly one entry, so
//! a key lives in the first node along its probe path that is either empty
//! or already holds that key.
//!
//! Inserting never mutates an existing node. [`Map::upsert`] copies the
//! nodes along the probe path and returns a new root, leaving every earlier
//! version of the map intact and sharing all untouched subtrees with it.

use alloc::string::String;
use core::fmt;

use allocator_api2::vec::Vec;
use blacksquid_arena::Arena;
use smallvec::SmallVec;

use super::list::scratch_for;
use super::{List, Str, Value};
use crate::error::{Error, Result};

const FANOUT: usize = 4;

/// Probe paths deeper than this spill the stack buffer onto the heap.
const INLINE_DEPTH: usize = 16;

fn hash(key: &[u8]) -> u64 {
    let mut h: u64 = 0x100;
    for &b in key {
        h ^= u64::from(b);
        h = h.wrapping_mul(1111111111111111111);
    }
    h
}

/// Child slot selected by the top two bits of the remaining hash.
fn slot(h: u64) -> usize {
    (h >> 62) as usize
}

#[derive(Clone, Copy)]
struct MapNode<'a> {
    /// `None` only for the root.
    entry: Option<(Str<'a>, Value<'a>)>,
    children: [Option<&'a MapNode<'a>>; FANOUT],
}

impl MapNode<'_> {
    fn holds(&self, key: &[u8]) -> bool {
        self.entry.is_some_and(|(k, _)| k.as_bytes() == key)
    }
}

/// An immutable map from byte-string keys to values.
#[derive(Clone, Copy)]
pub struct Map<'a> {
    root: &'a MapNode<'a>,
}

impl<'a> Map<'a> {
    /// The empty map.
    pub fn new(arena: &'a Arena) -> Self {
        Map {
            root: arena.alloc(MapNode {
                entry: None,
                children: [None; FANOUT],
            }),
        }
    }

    /// Build a map from `(key, value)` pairs. Later pairs win over earlier
    /// ones with the same key.
    pub fn from_pairs<'k, I>(arena: &'a Arena, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'k str, Value<'a>)>,
    {
        pairs.into_iter().fold(Self::new(arena), |map, (key, value)| {
            map.upsert(arena, Str::new(arena, key), value)
        })
    }

    /// A map equal to `self` except that `key` maps to `value`.
    ///
    /// Only the nodes on the probe path for `key` are copied into `arena`.
    /// `self` is unchanged.
    pub fn upsert(self, arena: &'a Arena, key: Str<'a>, value: Value<'a>) -> Map<'a> {
        let mut path: SmallVec<[(&'a MapNode<'a>, usize); INLINE_DEPTH]> = SmallVec::new();
        let mut node = self.root;
        let mut h = hash(key.as_bytes());

        let replacement = loop {
            let index = slot(h);
            path.push((node, index));
            match node.children[index] {
                Some(child) if child.holds(key.as_bytes()) => {
                    break MapNode {
                        entry: child.entry.map(|(k, _)| (k, value)),
                        children: child.children,
                    };
                }
                Some(child) => {
                    node = child;
                    h <<= 2;
                }
                None => {
                    break MapNode {
                        entry: Some((key, value)),
                        children: [None; FANOUT],
                    };
                }
            }
        };

        let mut rebuilt: &'a MapNode<'a> = arena.alloc(replacement);
        while let Some((parent, index)) = path.pop() {
            let mut copy = *parent;
            copy.children[index] = Some(rebuilt);
            rebuilt = arena.alloc(copy);
        }
        Map { root: rebuilt }
    }

    /// The value stored under `key`.
    pub fn get(self, key: &[u8]) -> Option<Value<'a>> {
        let mut node = self.root;
        let mut h = hash(key);
        loop {
            let child = node.children[slot(h)]?;
            if child.holds(key) {
                return child.entry.map(|(_, value)| value);
            }
            node = child;
            h <<= 2;
        }
    }

    /// Like [`get`](Self::get), failing with [`Error::NotFound`].
    pub fn lookup(self, key: &str) -> Result<Value<'a>> {
        self.get(key.as_bytes()).ok_or_else(|| Error::NotFound {
            key: String::from(key),
        })
    }

    pub fn contains_key(self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    pub fn len(self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(self) -> bool {
        self.root.children.iter().all(Option::is_none)
    }

    /// Every entry, in pre-order over the trie: a node before its children,
    /// children in slot order.
    pub fn entries(self) -> Entries<'a> {
        let mut stack = SmallVec::new();
        stack.extend(self.root.children.iter().rev().flatten().copied());
        Entries { stack }
    }

    /// The keys, in the same order as [`entries`](Self::entries).
    pub fn keys(self, arena: &'a Arena) -> List<'a> {
        let keys = self.entries().map(|(key, _)| Value::Str(key));
        let scratch = scratch_for(self.len());
        let mut buffer = Vec::new_in(&scratch);
        buffer.extend(keys);
        List::from_values(arena, buffer.iter().copied())
    }
}

/// Pre-order iterator over the entries of a [`Map`].
#[derive(Clone)]
pub struct Entries<'a> {
    stack: SmallVec<[&'a MapNode<'a>; INLINE_DEPTH]>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (Str<'a>, Value<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.stack.pop()?;
            self.stack
                .extend(node.children.iter().rev().flatten().copied());
            if let Some(entry) = node.entry {
                return Some(entry);
            }
        }
    }
}

/// Maps are equal when they hold the same keys with equal values,
/// regardless of trie shape.
impl PartialEq for Map<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries()
                .all(|(key, value)| other.get(key.as_bytes()) == Some(value))
    }
}

impl fmt::Debug for Map<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}
