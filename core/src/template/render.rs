//! Textual rendering of values.

use core::fmt::{self, Write};

use allocator_api2::vec::Vec;
use blacksquid_arena::{AllocError, Arena};

use crate::error::{Error, Result};
use crate::values::{Str, Value};

/// Appends the rendering of values to a byte buffer.
pub(crate) struct Renderer<'o, 's> {
    out: &'o mut Vec<u8, &'s Arena>,
    max_depth: usize,
}

impl<'o, 's> Renderer<'o, 's> {
    pub(crate) fn new(out: &'o mut Vec<u8, &'s Arena>, max_depth: usize) -> Self {
        Self { out, max_depth }
    }

    pub(crate) fn bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.out
            .try_reserve(bytes.len())
            .map_err(|_| AllocError::new(bytes.len(), 1))?;
        self.out.extend_from_slice(bytes);
        Ok(())
    }

    pub(crate) fn value(&mut self, value: Value<'_>) -> Result<()> {
        self.nested(value, 0)
    }

    /// `depth` is the number of aggregates enclosing `value`.
    fn nested(&mut self, value: Value<'_>, depth: usize) -> Result<()> {
        if !value.is_atom() && depth >= self.max_depth {
            return Err(Error::DepthExceeded {
                max_depth: self.max_depth,
            });
        }

        match value {
            Value::Byte(b) => self.bytes(&[b]),
            Value::Int(n) => self.text(format_args!("{n}")),
            Value::UInt(n) => self.text(format_args!("{n}")),
            Value::Float(x) => self.text(format_args!("{x:.6}")),
            Value::Str(s) => self.bytes(s.as_bytes()),
            Value::Custom(c) => self.text(format_args!("[{}]:0x{:x}", c.size(), c.addr())),
            Value::Array(array) => {
                self.text(format_args!("[{}]{{", array.len()))?;
                for item in array {
                    self.bytes(b" ")?;
                    self.nested(item, depth + 1)?;
                }
                self.bytes(b" }")
            }
            Value::List(list) => {
                self.bytes(b"(")?;
                for item in list {
                    self.bytes(b" ")?;
                    self.nested(item, depth + 1)?;
                }
                self.bytes(b" )")
            }
            Value::Map(map) => {
                self.bytes(b"{")?;
                for (i, (key, item)) in map.entries().enumerate() {
                    if i > 0 {
                        self.bytes(b" ")?;
                    }
                    self.bytes(b":")?;
                    self.bytes(key.as_bytes())?;
                    self.bytes(b" ")?;
                    self.nested(item, depth + 1)?;
                }
                self.bytes(b"}")
            }
        }
    }

    fn text(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        let mut writer = ByteWriter {
            out: &mut *self.out,
            failed: None,
        };
        match writer.write_fmt(args) {
            Ok(()) => Ok(()),
            Err(_) => Err(writer.failed.unwrap_or(AllocError::new(0, 1)).into()),
        }
    }
}

/// `fmt::Write` over the output buffer. A write only fails when the buffer
/// cannot grow, and the failed request is remembered.
struct ByteWriter<'v, 's> {
    out: &'v mut Vec<u8, &'s Arena>,
    failed: Option<AllocError>,
}

impl Write for ByteWriter<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.out.try_reserve(s.len()).is_err() {
            self.failed = Some(AllocError::new(s.len(), 1));
            return Err(fmt::Error);
        }
        self.out.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

/// Words reserved up front for `Display` output.
const DISPLAY_SCRATCH_WORDS: usize = 64;

/// `Display` for [`Value`]: render into a scratch buffer, then write it out
/// lossily. There is no depth cap here; only an allocation failure in the
/// scratch arena surfaces as `fmt::Error`.
pub(crate) fn display_value(value: Value<'_>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let scratch = Arena::with_region_capacity(DISPLAY_SCRATCH_WORDS);
    let mut out = Vec::new_in(&scratch);
    Renderer::new(&mut out, usize::MAX)
        .value(value)
        .map_err(|_| fmt::Error)?;
    fmt::Display::fmt(&Str::borrowed(&out), f)
}
