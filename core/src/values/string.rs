use core::fmt;

use blacksquid_arena::{AllocError, Arena};

use super::{Kind, List, Value};
use crate::error::{Error, Result};

/// An immutable byte string.
///
/// The length is explicit and the bytes are not required to be UTF-8 or
/// NUL-free. Operations that return a sub-range alias the original storage;
/// operations that build new text take the arena to build it in.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Str<'a> {
    bytes: &'a [u8],
}

impl<'a> Str<'a> {
    /// Copy `text` into `arena`.
    pub fn new(arena: &'a Arena, text: &str) -> Self {
        Self::from_bytes(arena, text.as_bytes())
    }

    /// Copy `bytes` into `arena`.
    pub fn from_bytes(arena: &'a Arena, bytes: &[u8]) -> Self {
        Str {
            bytes: arena.alloc_bytes(bytes),
        }
    }

    pub fn try_from_bytes(arena: &'a Arena, bytes: &[u8]) -> Result<Self, AllocError> {
        Ok(Str {
            bytes: arena.try_alloc_slice_copy(bytes)?,
        })
    }

    /// View bytes that already live long enough. Nothing is copied.
    pub const fn borrowed(bytes: &'a [u8]) -> Self {
        Str { bytes }
    }

    pub fn as_bytes(self) -> &'a [u8] {
        self.bytes
    }

    /// The text as `&str`, if it is valid UTF-8.
    pub fn to_str(self) -> Option<&'a str> {
        core::str::from_utf8(self.bytes).ok()
    }

    pub fn len(self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(self) -> bool {
        self.bytes.is_empty()
    }

    pub fn byte_at(self, index: usize) -> Result<u8> {
        self.bytes.get(index).copied().ok_or(Error::IndexOutOfBounds {
            index,
            len: self.len(),
        })
    }

    /// Bytes `start..end`, sharing storage with `self`.
    pub fn substring(self, start: usize, end: usize) -> Result<Str<'a>> {
        match self.bytes.get(start..end) {
            Some(bytes) => Ok(Str { bytes }),
            None => Err(Error::RangeOutOfBounds {
                start,
                end,
                len: self.len(),
            }),
        }
    }

    /// `self` followed by `other`, in fresh storage.
    pub fn concat<'b>(self, arena: &'b Arena, other: Str<'_>) -> Str<'b> {
        let out = arena.alloc_bytes_zeroed(self.len() + other.len());
        let (head, tail) = out.split_at_mut(self.len());
        head.copy_from_slice(self.bytes);
        tail.copy_from_slice(other.bytes);
        Str { bytes: out }
    }

    /// The bytes in reverse order, in fresh storage.
    pub fn reverse<'b>(self, arena: &'b Arena) -> Str<'b> {
        Str {
            bytes: arena.alloc_slice_fill_iter(self.bytes.iter().rev().copied()),
        }
    }

    pub fn copy<'b>(self, arena: &'b Arena) -> Str<'b> {
        Str::from_bytes(arena, self.bytes)
    }

    /// A copy of the bytes followed by a single `0`, for handing to APIs that
    /// expect NUL-terminated text. The terminator is not part of any `Str`.
    pub fn nul_terminated<'b>(self, arena: &'b Arena) -> &'b [u8] {
        let out = arena.alloc_bytes_zeroed(self.len() + 1);
        out[..self.len()].copy_from_slice(self.bytes);
        out
    }

    /// Fields separated by `delimiter`. Empty fields are kept, so `n`
    /// delimiters always produce `n + 1` fields. Fields alias `self`.
    pub fn split(self, arena: &'a Arena, delimiter: u8) -> List<'a> {
        let fields = self
            .bytes
            .split(move |b| *b == delimiter)
            .map(|field| Value::Str(Str { bytes: field }));
        List::from_values(arena, fields)
    }

    /// Fields separated by runs of any byte in `delimiters`. Empty fields are
    /// dropped, including those before a leading or after a trailing run.
    pub fn split_any(self, arena: &'a Arena, delimiters: &[u8]) -> List<'a> {
        let fields = self
            .bytes
            .split(|b| delimiters.contains(b))
            .filter(|field| !field.is_empty())
            .map(|field| Value::Str(Str { bytes: field }));
        List::from_values(arena, fields)
    }

    /// One [`Value::Byte`] per byte.
    pub fn to_list(self, arena: &'a Arena) -> List<'a> {
        List::from_values(arena, self.bytes.iter().map(|b| Value::Byte(*b)))
    }

    /// Concatenate a list of [`Value::Byte`]s.
    pub fn from_list(arena: &'a Arena, list: List<'_>) -> Result<Str<'a>> {
        if let Some(other) = list.iter().find(|v| v.as_byte().is_none()) {
            return Err(other.mismatch(Kind::Byte));
        }
        let bytes = arena.try_alloc_bytes_zeroed(list.len())?;
        for (slot, value) in bytes.iter_mut().zip(list.iter()) {
            *slot = value.as_byte().unwrap_or_default();
        }
        Ok(Str { bytes })
    }
}

impl PartialEq<str> for Str<'_> {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for Str<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<[u8]> for Str<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes == other
    }
}

impl fmt::Debug for Str<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.bytes.escape_ascii())
    }
}

/// Invalid UTF-8 is shown as U+FFFD.
impl fmt::Display for Str<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.bytes.utf8_chunks() {
            f.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                f.write_str("\u{FFFD}")?;
            }
        }
        Ok(())
    }
}
