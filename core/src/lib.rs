//! Arena-resident values, collection engines and template rendering.
//!
//! Every value lives in a [`blacksquid_arena::Arena`] and borrows from it, so
//! the borrow checker guarantees nothing outlives the arena that holds it.
//!
//! ```
//! use blacksquid_arena::Arena;
//! use blacksquid_core::{Map, RenderOptions, Str, Value, render};
//!
//! let arena = Arena::new();
//! let values = Map::new(&arena)
//!     .upsert(&arena, Str::new(&arena, "name"), Value::Str(Str::new(&arena, "Blacksquid")))
//!     .upsert(&arena, Str::new(&arena, "n"), Value::Int(3));
//!
//! let out = render(&arena, "Hello {{name}}, you have {{n}} items", values, &RenderOptions::default())?;
//! assert_eq!(out, "Hello Blacksquid, you have 3 items");
//! # Ok::<(), blacksquid_core::Error>(())
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod error;
pub mod format;
pub mod template;
pub mod values;


pub use blacksquid_arena::{AllocError, Arena};
pub use error::{Error, Result};
pub use format::format;
pub use template::{MissingKey, RenderOptions, RenderOptionsOverride, Segment, Template, render};
pub use values::{Array, Custom, Kind, List, Map, Str, Value};
