use blacksquid_arena::Arena;
use pretty_assertions::assert_eq;

use crate::{Array, Custom, Error, Kind, List, Map, Str, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

#[test]
fn kinds() {
    let arena = Arena::new();
    let cases = [
        (Value::Byte(1), Kind::Byte),
        (Value::Int(-1), Kind::Int),
        (Value::UInt(1), Kind::UInt),
        (Value::Float(1.5), Kind::Float),
        (Value::Str(Str::new(&arena, "s")), Kind::Str),
        (Value::Array(Array::new(&arena, &[])), Kind::Array),
        (Value::List(List::nil(&arena)), Kind::List),
        (Value::Map(Map::new(&arena)), Kind::Map),
        (Value::Custom(Custom::bytes(&arena, b"raw")), Kind::Custom),
    ];
    for (value, kind) in cases {
        assert_eq!(value.kind(), kind);
    }
}

#[test]
fn atoms() {
    let arena = Arena::new();
    assert!(Value::Int(0).is_atom());
    assert!(Value::Str(Str::new(&arena, "")).is_atom());
    assert!(Value::Custom(Custom::new(&arena, 7_u8)).is_atom());
    assert!(!Value::List(List::nil(&arena)).is_atom());
    assert!(!Value::Array(Array::new(&arena, &[])).is_atom());
    assert!(!Value::Map(Map::new(&arena)).is_atom());
}

#[test]
fn accessors_check_the_tag() {
    assert_eq!(Value::Int(5).as_int(), Some(5));
    assert_eq!(Value::Int(5).as_uint(), None);
    assert_eq!(Value::UInt(5).as_int(), None);
    assert_eq!(Value::Byte(b'a').as_byte(), Some(b'a'));
    assert_eq!(Value::Float(2.5).as_float(), Some(2.5));
}

#[test]
fn try_from_reports_mismatch() {
    let arena = Arena::new();
    let s = Value::Str(Str::new(&arena, "x"));
    assert_eq!(
        i64::try_from(s),
        Err(Error::TypeMismatch {
            expected: Kind::Int,
            found: Kind::Str
        })
    );
    assert_eq!(i64::try_from(Value::from(3_i64)), Ok(3));
}

#[test]
fn numeric_kinds_do_not_mix() {
    assert_ne!(Value::Int(1), Value::UInt(1));
    assert_ne!(Value::Int(1), Value::Float(1.0));
    assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    assert_eq!(Value::Int(1).partial_cmp(&Value::UInt(0)), None);
    assert!(Value::Int(-1) < Value::Int(0));
}

#[test]
fn structural_equality() {
    let arena = Arena::new();
    let a = List::from_values(&arena, [Value::Int(1), Value::Str(Str::new(&arena, "x"))]);
    let b = List::from_values(&arena, [Value::Int(1), Value::Str(Str::new(&arena, "x"))]);
    assert_eq!(Value::List(a), Value::List(b));
    assert_ne!(Value::List(a), Value::Array(a.to_array(&arena)));
}

// =============================================================================
// Custom payloads
// =============================================================================

#[test]
fn custom_downcast() {
    let arena = Arena::new();
    let custom = Custom::new(&arena, Point { x: 1, y: -2 });

    assert_eq!(custom.downcast_ref::<Point>(), Some(&Point { x: 1, y: -2 }));
    assert_eq!(custom.downcast_ref::<u64>(), None);
    assert_eq!(custom.as_bytes(), None);
    assert_eq!(custom.size(), size_of::<Point>());
}

#[test]
fn custom_bytes() {
    let arena = Arena::new();
    let custom = Custom::bytes(&arena, b"\x01\x02\x03");
    assert_eq!(custom.as_bytes(), Some(&b"\x01\x02\x03"[..]));
    assert_eq!(custom.downcast_ref::<[u8; 3]>(), None);
    assert_eq!(custom.size(), 3);
}

#[test]
fn custom_equality_is_identity() {
    let arena = Arena::new();
    let a = Custom::new(&arena, 5_u32);
    let b = Custom::new(&arena, 5_u32);
    assert_eq!(a, a);
    assert_ne!(a, b);
}

fn counters<'a>(arena: &'a Arena) -> (Custom<'a>, Custom<'a>) {
    let first = Custom::new(arena, 9_u32);
    (first, Custom::new(arena, 9_u32))
}

#[test]
fn custom_compares_and_prints_from_a_borrowed_arena() {
    let arena = Arena::new();
    let (first, second) = counters(&arena);

    assert_eq!(first, first);
    assert_ne!(first, second);
    assert_eq!(
        format!("{first:?}"),
        format!("Custom([4]:{:#x})", first.addr())
    );
}

// =============================================================================
// Deep copy
// =============================================================================

#[test]
fn deep_copy_survives_source_reset() {
    let target = Arena::new();
    let mut source = Arena::new();

    let copy = {
        let inner = List::from_values(&source, [Value::Int(1), Value::Str(Str::new(&source, "two"))]);
        let map = Map::from_pairs(&source, [("list", Value::List(inner)), ("n", Value::UInt(3))]);
        let point = Value::Custom(Custom::new(&source, Point { x: 4, y: 5 }));
        let array = Array::new(&source, &[Value::Map(map), point, Value::Byte(b'z')]);
        Value::Array(array).deep_copy(&target)
    };
    source.reset();
    source.alloc_bytes(&[0xaa; 4096]);

    let array = copy.as_array().unwrap();
    let map = array.get(0).unwrap().as_map().unwrap();
    assert_eq!(map.lookup("n"), Ok(Value::UInt(3)));
    let inner = map.lookup("list").unwrap().as_list().unwrap();
    assert_eq!(inner.get(1).unwrap().as_str().unwrap(), "two");
    let point = array.get(1).unwrap().as_custom().unwrap();
    assert_eq!(point.downcast_ref::<Point>(), Some(&Point { x: 4, y: 5 }));
    assert_eq!(array.get(2), Ok(Value::Byte(b'z')));
}

#[test]
fn deep_copy_keeps_map_order() {
    let source = Arena::new();
    let target = Arena::new();
    let map = Map::from_pairs(
        &source,
        [("a", Value::Int(1)), ("b", Value::Int(2)), ("c", Value::Int(3))],
    );
    let copy = Value::Map(map).deep_copy(&target).as_map().unwrap();

    let order = |m: Map<'_>| m.entries().map(|(k, _)| k.to_string()).collect::<Vec<_>>();
    assert_eq!(order(copy), order(map));
    assert_eq!(copy, map);
}

// =============================================================================
// Formatting
// =============================================================================

#[test]
fn display_uses_renderer() {
    let arena = Arena::new();
    let list = List::from_values(&arena, [Value::Int(1), Value::Float(0.5)]);
    assert_eq!(Value::List(list).to_string(), "( 1 0.500000 )");
    assert_eq!(Value::Int(-7).to_string(), "-7");
}

#[test]
fn display_has_no_depth_cap() {
    let arena = Arena::new();
    let mut nested = List::nil(&arena);
    for _ in 0..300 {
        nested = List::cons(&arena, Value::List(nested), List::nil(&arena));
    }
    let expected = format!("{}( ){}", "( ".repeat(300), " )".repeat(300));
    assert_eq!(Value::List(nested).to_string(), expected);
}

#[test]
fn debug_is_structural() {
    let arena = Arena::new();
    let list = List::from_values(&arena, [Value::Int(1), Value::Str(Str::new(&arena, "a"))]);
    assert_eq!(format!("{:?}", Value::List(list)), "[Int(1), \"a\"]");
    assert_eq!(format!("{:?}", Value::Byte(10)), "Byte(0x0a)");
}
