use core::any::Any;
use core::fmt;

use blacksquid_arena::Arena;

/// An opaque, caller-defined payload stored in the arena.
///
/// A payload is either a typed value, recoverable with
/// [`downcast_ref`](Self::downcast_ref), or a plain run of bytes.
/// Equality is identity: two handles are equal when they point at the
/// same payload.
#[derive(Clone, Copy)]
pub struct Custom<'a> {
    slot: &'a Slot<'a>,
}

#[derive(Clone, Copy)]
enum Slot<'a> {
    Typed(&'a dyn Payload),
    Bytes(&'a [u8]),
}

/// Object-safe view of a typed payload.
trait Payload: Any {
    fn payload_any(&self) -> &dyn Any;
    fn payload_size(&self) -> usize;
    fn duplicate_into<'b>(&self, arena: &'b Arena) -> &'b dyn Payload;
}

/// `Copy` keeps payloads free of drop glue, since the arena never runs
/// destructors, and lets them be duplicated into another arena.
impl<T: Any + Copy> Payload for T {
    fn payload_any(&self) -> &dyn Any {
        self
    }

    fn payload_size(&self) -> usize {
        size_of::<T>()
    }

    fn duplicate_into<'b>(&self, arena: &'b Arena) -> &'b dyn Payload {
        arena.alloc(*self)
    }
}

impl<'a> Custom<'a> {
    /// Move `value` into the arena.
    pub fn new<T: Any + Copy>(arena: &'a Arena, value: T) -> Self {
        let payload: &'a dyn Payload = arena.alloc(value);
        Self::from_slot(arena, Slot::Typed(payload))
    }

    /// Copy `bytes` into the arena as an untyped payload.
    pub fn bytes(arena: &'a Arena, bytes: &[u8]) -> Self {
        let bytes: &'a [u8] = arena.alloc_bytes(bytes);
        Self::from_slot(arena, Slot::Bytes(bytes))
    }

    fn from_slot(arena: &'a Arena, slot: Slot<'a>) -> Self {
        Custom {
            slot: arena.alloc(slot),
        }
    }

    /// The payload as a `T`, if it was created from a `T`.
    pub fn downcast_ref<T: Any>(self) -> Option<&'a T> {
        match *self.slot {
            Slot::Typed(payload) => payload.payload_any().downcast_ref(),
            Slot::Bytes(_) => None,
        }
    }

    /// The payload of a handle created with [`bytes`](Self::bytes).
    pub fn as_bytes(self) -> Option<&'a [u8]> {
        match *self.slot {
            Slot::Typed(_) => None,
            Slot::Bytes(bytes) => Some(bytes),
        }
    }

    pub fn size(self) -> usize {
        match *self.slot {
            Slot::Typed(payload) => payload.payload_size(),
            Slot::Bytes(bytes) => bytes.len(),
        }
    }

    /// Address of the payload, for display.
    pub fn addr(self) -> usize {
        match *self.slot {
            Slot::Typed(payload) => core::ptr::from_ref(payload).cast::<u8>().addr(),
            Slot::Bytes(bytes) => bytes.as_ptr().addr(),
        }
    }

    /// Duplicate the payload into `arena`.
    pub fn deep_copy<'b>(self, arena: &'b Arena) -> Custom<'b> {
        let slot = match *self.slot {
            Slot::Typed(payload) => Slot::Typed(payload.duplicate_into(arena)),
            Slot::Bytes(bytes) => Slot::Bytes(arena.alloc_bytes(bytes)),
        };
        Custom::from_slot(arena, slot)
    }
}

impl PartialEq for Custom<'_> {
    fn eq(&self, other: &Self) -> bool {
        Custom::addr(*self) == Custom::addr(*other) && Custom::size(*self) == Custom::size(*other)
    }
}

impl fmt::Debug for Custom<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Custom([{}]:{:#x})", Custom::size(*self), Custom::addr(*self))
    }
}
