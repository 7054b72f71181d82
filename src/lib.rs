//! Blacksquid: arena-resident values and a template renderer.
//!
//! # Overview
//!
//! Every value lives in an [`Arena`], a chain of word-aligned regions that is
//! reset or released as a whole. On top of it sit:
//!
//! - immutable lists, arrays and byte strings,
//! - a persistent hash-trie [`Map`] with a stable enumeration order,
//! - a printf-style [`format`] and a `{{name}}` [`Template`] renderer.
//!
//! # Quick Start
//!
//! ```
//! use blacksquid::{Arena, List, Map, RenderOptions, Str, Template, Value};
//!
//! let arena = Arena::new();
//! let xs = List::from_values(&arena, [Value::Int(1), Value::Int(2), Value::Int(3)]);
//! let values = Map::from_pairs(
//!     &arena,
//!     [("name", Value::Str(Str::new(&arena, "Blacksquid"))), ("xs", Value::List(xs))],
//! );
//!
//! let template = Template::parse("{{name}} counts {{xs}}")?;
//! let out = template.render(&arena, values, &RenderOptions::default())?;
//! assert_eq!(out, "Blacksquid counts ( 1 2 3 )");
//! # Ok::<(), blacksquid::Error>(())
//! ```
//!
//! # Arenas and lifetimes
//!
//! Values borrow from the arena that holds them. [`Arena::reset`] takes
//! `&mut self`, so the compiler rejects any value still alive across a reset:
//!
//! ```compile_fail
//! use blacksquid::{Arena, Str};
//!
//! let mut arena = Arena::new();
//! let s = Str::new(&arena, "gone");
//! arena.reset();
//! println!("{s}");
//! ```
//!
//! To keep a value past a reset, [`Value::deep_copy`] it into another arena
//! first.

pub mod error_renderer;
pub use error_renderer::{CharSet, RenderConfig, render_error, render_error_to};

pub use blacksquid_arena::{AllocError, Arena, REGION_DEFAULT_CAPACITY, Snapshot, WORD};
pub use blacksquid_core::{
    Array, Custom, Error, Kind, List, Map, MissingKey, RenderOptions, RenderOptionsOverride,
    Result, Segment, Str, Template, Value, format, render,
};
pub use blacksquid_core::{error, template, values};
