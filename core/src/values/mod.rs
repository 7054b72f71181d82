//! The tagged value model.
//!
//! A [`Value`] is a small `Copy` handle: scalars are stored inline, while
//! strings and aggregates point into the arena that produced them. Handles
//! are never mutated in place, so the same value may appear inside any
//! number of lists, arrays and maps at once.

mod array;
mod custom;
mod list;
mod map;
mod string;

#[cfg(test)]
mod array_test;
#[cfg(test)]
mod value_test;

use core::cmp::Ordering;
use core::fmt;

use allocator_api2::vec::Vec;
use blacksquid_arena::Arena;

use crate::error::{Error, Result};

pub use array::Array;
pub use custom::Custom;
pub use list::{List, ListIter};
pub use map::{Entries, Map};
pub use string::Str;

/// A dynamically tagged value.
#[derive(Clone, Copy)]
pub enum Value<'a> {
    Byte(u8),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(Str<'a>),
    Array(Array<'a>),
    List(List<'a>),
    Map(Map<'a>),
    Custom(Custom<'a>),
}

#[cfg(target_pointer_width = "64")]
static_assertions::assert_eq_size!(Value<'static>, [usize; 3]);

/// The tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Byte,
    Int,
    UInt,
    Float,
    Str,
    Array,
    List,
    Map,
    Custom,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Byte => "byte",
            Kind::Int => "int",
            Kind::UInt => "uint",
            Kind::Float => "float",
            Kind::Str => "string",
            Kind::Array => "array",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::Custom => "custom",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'a> Value<'a> {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Byte(_) => Kind::Byte,
            Value::Int(_) => Kind::Int,
            Value::UInt(_) => Kind::UInt,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::Array(_) => Kind::Array,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
            Value::Custom(_) => Kind::Custom,
        }
    }

    /// True for everything except arrays, lists and maps.
    pub fn is_atom(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::List(_) | Value::Map(_))
    }

    pub fn as_byte(&self) -> Option<u8> {
        match *self {
            Value::Byte(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match *self {
            Value::UInt(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match *self {
            Value::Float(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<Str<'a>> {
        match *self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<Array<'a>> {
        match *self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<List<'a>> {
        match *self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<Map<'a>> {
        match *self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_custom(&self) -> Option<Custom<'a>> {
        match *self {
            Value::Custom(c) => Some(c),
            _ => None,
        }
    }

    /// Error describing that `self` was found where a `expected` value was required.
    pub fn mismatch(&self, expected: Kind) -> Error {
        Error::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    /// Copy the value and everything it references into `arena`.
    ///
    /// The result shares no storage with `self`, so the source arena may be
    /// reset or released afterwards.
    pub fn deep_copy<'b>(self, arena: &'b Arena) -> Value<'b> {
        match self {
            Value::Byte(b) => Value::Byte(b),
            Value::Int(n) => Value::Int(n),
            Value::UInt(n) => Value::UInt(n),
            Value::Float(x) => Value::Float(x),
            Value::Str(s) => Value::Str(s.copy(arena)),
            Value::Custom(c) => Value::Custom(c.deep_copy(arena)),
            Value::Array(a) => {
                Value::Array(Array::from_fn(arena, a.len(), |i| a.as_slice()[i].deep_copy(arena)))
            }
            Value::List(l) => {
                let len = l.len();
                let scratch = list::scratch_for(len);
                let mut copied: Vec<Value<'b>, &Arena> = Vec::with_capacity_in(len, &scratch);
                copied.extend(l.iter().map(|v| v.deep_copy(arena)));
                Value::List(List::from_values(arena, copied.iter().copied()))
            }
            Value::Map(m) => {
                // Pre-order insertion rebuilds the same trie shape.
                let copy = m.entries().fold(Map::new(arena), |acc, (k, v)| {
                    acc.upsert(arena, k.copy(arena), v.deep_copy(arena))
                });
                Value::Map(copy)
            }
        }
    }
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            // NaN != NaN
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Custom(a), Value::Custom(b)) => a == b,
            _ => false,
        }
    }
}

/// Values of the same scalar kind, or two strings, are ordered; anything
/// else is unordered.
impl PartialOrd for Value<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Byte(a), Value::Byte(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
            (Value::UInt(a), Value::UInt(b)) => a.partial_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Str(a), Value::Str(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Byte(b) => write!(f, "Byte({b:#04x})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::UInt(n) => write!(f, "UInt({n})"),
            Value::Float(x) => write!(f, "Float({x:?})"),
            Value::Str(s) => fmt::Debug::fmt(s, f),
            Value::Array(a) => fmt::Debug::fmt(a, f),
            Value::List(l) => fmt::Debug::fmt(l, f),
            Value::Map(m) => fmt::Debug::fmt(m, f),
            Value::Custom(c) => fmt::Debug::fmt(c, f),
        }
    }
}

/// Same text the template renderer produces for the value.
impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::template::display_value(*self, f)
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<$ty> for Value<'a> {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    u8 => Byte,
    i64 => Int,
    u64 => UInt,
    f64 => Float,
    Str<'a> => Str,
    Array<'a> => Array,
    List<'a> => List,
    Map<'a> => Map,
    Custom<'a> => Custom,
}

impl<'a> TryFrom<Value<'a>> for i64 {
    type Error = Error;

    fn try_from(value: Value<'a>) -> Result<Self> {
        value.as_int().ok_or_else(|| value.mismatch(Kind::Int))
    }
}

impl<'a> TryFrom<Value<'a>> for Str<'a> {
    type Error = Error;

    fn try_from(value: Value<'a>) -> Result<Self> {
        value.as_str().ok_or_else(|| value.mismatch(Kind::Str))
    }
}
