use blacksquid_arena::Arena;
use pretty_assertions::assert_eq;

use crate::{Array, Error, List, Value};

fn ints<'a>(arena: &'a Arena, values: &[i64]) -> Array<'a> {
    Array::from_fn(arena, values.len(), |i| Value::Int(values[i]))
}

fn to_ints(array: Array<'_>) -> Vec<i64> {
    array.iter().map(|v| v.as_int().expect("int")).collect()
}

#[test]
fn from_fn_and_get() {
    let arena = Arena::new();
    let squares = Array::from_fn(&arena, 4, |i| Value::UInt((i * i) as u64));
    assert_eq!(squares.len(), 4);
    assert_eq!(squares.get(3), Ok(Value::UInt(9)));
    assert_eq!(squares.get(4), Err(Error::IndexOutOfBounds { index: 4, len: 4 }));
}

#[test]
fn empty_array() {
    let arena = Arena::new();
    let empty = Array::new(&arena, &[]);
    assert!(empty.is_empty());
    assert_eq!(empty, Array::default());
    assert!(empty.to_list(&arena).is_nil());
}

#[test]
fn list_round_trip() {
    let arena = Arena::new();
    let list = List::from_values(&arena, [Value::Int(1), Value::Byte(2), Value::Float(3.0)]);
    let array = Array::from_list(&arena, list);

    assert_eq!(array.as_slice(), &[Value::Int(1), Value::Byte(2), Value::Float(3.0)]);
    assert_eq!(array.to_list(&arena), list);
    assert_eq!(list.to_array(&arena), array);
}

#[test]
fn reverse() {
    let arena = Arena::new();
    let array = ints(&arena, &[1, 2, 3]);
    assert_eq!(to_ints(array.reverse(&arena)), [3, 2, 1]);
    assert_eq!(to_ints(array), [1, 2, 3]);
}

#[test]
fn append_sums_lengths() {
    let arena = Arena::new();
    let joined = ints(&arena, &[1, 2]).append(&arena, ints(&arena, &[3]));
    assert_eq!(to_ints(joined), [1, 2, 3]);

    let empty = Array::new(&arena, &[]);
    assert_eq!(to_ints(empty.append(&arena, joined)), [1, 2, 3]);
    assert_eq!(to_ints(joined.append(&arena, empty)), [1, 2, 3]);
}

#[test]
fn slice_aliases_parent() {
    let arena = Arena::new();
    let array = ints(&arena, &[10, 20, 30, 40]);
    let middle = array.slice(1, 2).unwrap();

    assert_eq!(to_ints(middle), [20, 30]);
    assert_eq!(middle.as_slice().as_ptr(), array.as_slice()[1..].as_ptr());
}

#[test]
fn slice_out_of_range() {
    let arena = Arena::new();
    let array = ints(&arena, &[1, 2, 3]);

    assert_eq!(
        array.slice(2, 2),
        Err(Error::RangeOutOfBounds {
            start: 2,
            end: 4,
            len: 3
        })
    );
    assert!(array.slice(usize::MAX, 1).is_err());
    assert!(array.slice(3, 0).unwrap().is_empty());
}

#[test]
fn copy_has_fresh_storage() {
    let arena = Arena::new();
    let array = ints(&arena, &[5, 6]);
    let copy = array.copy(&arena);

    assert_eq!(copy, array);
    assert_ne!(copy.as_slice().as_ptr(), array.as_slice().as_ptr());
}
