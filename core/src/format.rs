//! A small printf-style formatter producing arena strings.
//!
//! Supported conversions:
//!
//! | Directive | Argument          | Output                               |
//! |-----------|-------------------|--------------------------------------|
//! | `%d` `%i` | `Int`             | signed decimal                       |
//! | `%u`      | `UInt`            | unsigned decimal                     |
//! | `%x`      | `Int` or `UInt`   | lowercase hex (two's complement)     |
//! | `%f`      | `Float`           | fixed point, 6 digits or `%.Nf`      |
//! | `%s`      | `Str`             | the bytes verbatim                   |
//! | `%c`      | `Byte`            | the byte itself                      |
//! | `%%`      | none              | a literal `%`                        |
//!
//! The output is measured first and then written into a single allocation
//! of exactly that size.

use core::fmt::{self, Write};

use blacksquid_arena::Arena;

use crate::error::{Error, Result};
use crate::values::{Kind, Str, Value};

/// Expand `pattern` with `args` into a new string in `arena`.
///
/// Every argument must be consumed by exactly one conversion.
///
/// ```
/// use blacksquid_arena::Arena;
/// use blacksquid_core::{Str, Value, format};
///
/// let arena = Arena::new();
/// let name = Value::Str(Str::new(&arena, "squid"));
/// let out = format(&arena, "%s has %d arms", &[name, Value::Int(10)])?;
/// assert_eq!(out, "squid has 10 arms");
/// # Ok::<(), blacksquid_core::Error>(())
/// ```
pub fn format<'a>(arena: &'a Arena, pattern: &str, args: &[Value<'_>]) -> Result<Str<'a>> {
    let mut counter = Counter { len: 0 };
    expand(pattern.as_bytes(), args, &mut counter)?;

    let buf = arena.try_alloc_bytes_zeroed(counter.len)?;
    let mut cursor = Cursor { buf, pos: 0 };
    expand(pattern.as_bytes(), args, &mut cursor)?;
    debug_assert_eq!(cursor.pos, cursor.buf.len());

    let Cursor { buf, .. } = cursor;
    Ok(Str::borrowed(buf))
}

/// Byte-oriented output shared by the measuring and the writing pass.
trait Sink: Write {
    fn put(&mut self, bytes: &[u8]) -> fmt::Result;
}

struct Counter {
    len: usize,
}

impl Write for Counter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put(s.as_bytes())
    }
}

impl Sink for Counter {
    fn put(&mut self, bytes: &[u8]) -> fmt::Result {
        self.len += bytes.len();
        Ok(())
    }
}

struct Cursor<'b> {
    buf: &'b mut [u8],
    pos: usize,
}

impl Write for Cursor<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put(s.as_bytes())
    }
}

impl Sink for Cursor<'_> {
    fn put(&mut self, bytes: &[u8]) -> fmt::Result {
        let end = self.pos + bytes.len();
        let dst = self.buf.get_mut(self.pos..end).ok_or(fmt::Error)?;
        dst.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }
}

const DEFAULT_PRECISION: usize = 6;
/// Widest precision `core::fmt` accepts.
const MAX_PRECISION: usize = u16::MAX as usize;

fn expand<S: Sink>(pattern: &[u8], args: &[Value<'_>], out: &mut S) -> Result<()> {
    let overflow = |offset| Error::Format {
        offset,
        message: "output does not fit the measured buffer",
    };

    let mut args = args.iter();
    let mut pos = 0;
    while pos < pattern.len() {
        let Some(found) = pattern[pos..].iter().position(|b| *b == b'%') else {
            out.put(&pattern[pos..]).map_err(|_| overflow(pos))?;
            break;
        };
        let start = pos + found;
        out.put(&pattern[pos..start]).map_err(|_| overflow(pos))?;

        let (directive, next) = parse_directive(pattern, start)?;
        pos = next;

        if directive.conversion == b'%' {
            out.put(b"%").map_err(|_| overflow(start))?;
            continue;
        }
        let arg = args.next().ok_or(Error::Format {
            offset: start,
            message: "missing argument",
        })?;
        convert(directive, *arg, out).map_err(|err| match err {
            ConvertError::Mismatch(expected) => arg.mismatch(expected),
            ConvertError::Write => overflow(start),
        })?;
    }

    if args.next().is_some() {
        return Err(Error::Format {
            offset: pattern.len(),
            message: "too many arguments",
        });
    }
    Ok(())
}

#[derive(Clone, Copy)]
struct Directive {
    conversion: u8,
    precision: Option<usize>,
}

/// Parse the directive starting at the `%` at `start`. Returns the directive
/// and the offset just past it.
fn parse_directive(pattern: &[u8], start: usize) -> Result<(Directive, usize)> {
    let mut pos = start + 1;
    let mut precision = None;

    if pattern.get(pos) == Some(&b'.') {
        pos += 1;
        let digits = pattern[pos..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return Err(Error::Format {
                offset: start,
                message: "precision without digits",
            });
        }
        let value = pattern[pos..pos + digits]
            .iter()
            .try_fold(0_usize, |acc, d| acc.checked_mul(10)?.checked_add(usize::from(d - b'0')))
            .filter(|&value| value <= MAX_PRECISION)
            .ok_or(Error::Format {
                offset: start,
                message: "precision too large",
            })?;
        precision = Some(value);
        pos += digits;
    }

    let Some(&conversion) = pattern.get(pos) else {
        return Err(Error::Format {
            offset: start,
            message: "incomplete conversion",
        });
    };
    if !matches!(conversion, b'd' | b'i' | b'u' | b'x' | b'f' | b's' | b'c' | b'%') {
        return Err(Error::Format {
            offset: start,
            message: "unknown conversion",
        });
    }
    if precision.is_some() && conversion != b'f' {
        return Err(Error::Format {
            offset: start,
            message: "precision is only valid for %f",
        });
    }
    Ok((
        Directive {
            conversion,
            precision,
        },
        pos + 1,
    ))
}

enum ConvertError {
    Mismatch(Kind),
    Write,
}

impl From<fmt::Error> for ConvertError {
    fn from(_: fmt::Error) -> Self {
        ConvertError::Write
    }
}

fn convert<S: Sink>(
    directive: Directive,
    arg: Value<'_>,
    out: &mut S,
) -> core::result::Result<(), ConvertError> {
    match (directive.conversion, arg) {
        (b'd' | b'i', Value::Int(n)) => write!(out, "{n}")?,
        (b'd' | b'i', _) => return Err(ConvertError::Mismatch(Kind::Int)),
        (b'u', Value::UInt(n)) => write!(out, "{n}")?,
        (b'u', _) => return Err(ConvertError::Mismatch(Kind::UInt)),
        (b'x', Value::Int(n)) => write!(out, "{n:x}")?,
        (b'x', Value::UInt(n)) => write!(out, "{n:x}")?,
        (b'x', _) => return Err(ConvertError::Mismatch(Kind::Int)),
        (b'f', Value::Float(x)) => {
            let precision = directive.precision.unwrap_or(DEFAULT_PRECISION);
            write!(out, "{x:.precision$}")?
        }
        (b'f', _) => return Err(ConvertError::Mismatch(Kind::Float)),
        (b's', Value::Str(s)) => out.put(s.as_bytes())?,
        (b's', _) => return Err(ConvertError::Mismatch(Kind::Str)),
        (b'c', Value::Byte(b)) => out.put(&[b])?,
        (b'c', _) => return Err(ConvertError::Mismatch(Kind::Byte)),
        _ => unreachable!("conversion validated by parse_directive"),
    }
    Ok(())
}
