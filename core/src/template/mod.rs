//! `{{name}}` templates.
//!
//! Text outside placeholders is copied verbatim, including a `}}` that does
//! not close anything. The bytes between `{{` and the next `}}` are the
//! placeholder key; they are looked up in a [`Map`] and the value found is
//! rendered in place:
//!
//! | Value      | Rendering                              |
//! |------------|----------------------------------------|
//! | `Int`      | `-42`                                  |
//! | `UInt`     | `42`                                   |
//! | `Float`    | `3.140000`                             |
//! | `Byte`     | the byte itself                        |
//! | `Str`      | the bytes verbatim                     |
//! | `Array`    | `[3]{ 1 2 3 }`                         |
//! | `List`     | `( 1 2 3 )`                            |
//! | `Map`      | `{:key value :other value}`            |
//! | `Custom`   | `[size]:0xaddress`                     |
//!
//! Rendering goes into a scratch buffer and is copied to the destination
//! arena only once it has succeeded, so a failed render leaves nothing
//! behind.

mod options;
mod render;


use alloc::string::String;
use alloc::vec::Vec;

use blacksquid_arena::Arena;

use crate::error::{Error, Result};
use crate::values::{Map, Str};

pub use options::{MissingKey, RenderOptions, RenderOptionsOverride};
pub(crate) use render::display_value;
use render::Renderer;

const OPEN: &[u8] = b"{{";
const CLOSE: &[u8] = b"}}";

/// One piece of a parsed template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    Literal(&'t [u8]),
    /// `offset` is the position of the opening `{{` in the source.
    Placeholder { key: &'t [u8], offset: usize },
}

/// A parsed template, reusable across renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'t> {
    source: &'t [u8],
    segments: Vec<Segment<'t>>,
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

impl<'t> Template<'t> {
    pub fn parse(source: &'t str) -> Result<Self> {
        Self::parse_bytes(source.as_bytes())
    }

    /// Split `source` into literals and placeholders.
    ///
    /// Fails with [`Error::TemplateSyntax`] at the offset of a `{{` that has
    /// no matching `}}`.
    pub fn parse_bytes(source: &'t [u8]) -> Result<Self> {
        let mut segments = Vec::new();
        let mut pos = 0;

        while let Some(found) = find(&source[pos..], OPEN) {
            let open = pos + found;
            if open > pos {
                segments.push(Segment::Literal(&source[pos..open]));
            }

            let key_start = open + OPEN.len();
            let Some(len) = find(&source[key_start..], CLOSE) else {
                return Err(Error::TemplateSyntax {
                    offset: open,
                    message: "unterminated placeholder",
                });
            };
            segments.push(Segment::Placeholder {
                key: &source[key_start..key_start + len],
                offset: open,
            });
            pos = key_start + len + CLOSE.len();
        }

        if pos < source.len() {
            segments.push(Segment::Literal(&source[pos..]));
        }
        Ok(Template { source, segments })
    }

    pub fn source(&self) -> &'t [u8] {
        self.source
    }

    pub fn segments(&self) -> &[Segment<'t>] {
        &self.segments
    }

    /// Placeholder keys in order of appearance, repeats included.
    pub fn keys(&self) -> impl Iterator<Item = &'t [u8]> + '_ {
        self.segments.iter().filter_map(|segment| match *segment {
            Segment::Placeholder { key, .. } => Some(key),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute `values` into the template, producing a string in `arena`.
    pub fn render<'a>(
        &self,
        arena: &'a Arena,
        values: Map<'_>,
        options: &RenderOptions,
    ) -> Result<Str<'a>> {
        let scratch = Arena::new();
        let mut out = allocator_api2::vec::Vec::with_capacity_in(self.source.len(), &scratch);
        let mut renderer = Renderer::new(&mut out, options.max_depth);

        for segment in &self.segments {
            match *segment {
                Segment::Literal(bytes) => renderer.bytes(bytes)?,
                Segment::Placeholder { key, offset } => match values.get(key) {
                    Some(value) => renderer.value(value)?,
                    None => match options.missing_key {
                        MissingKey::Skip => {
                            tracing::debug!(key = %Str::borrowed(key), offset, "skipping unresolved placeholder");
                        }
                        MissingKey::Keep => {
                            renderer.bytes(OPEN)?;
                            renderer.bytes(key)?;
                            renderer.bytes(CLOSE)?;
                        }
                        MissingKey::Error => {
                            return Err(Error::MissingKey {
                                key: String::from_utf8_lossy(key).into_owned(),
                                offset,
                            });
                        }
                    },
                },
            }
        }

        Ok(Str::try_from_bytes(arena, &out)?)
    }
}

/// Parse `template` and render it once.
pub fn render<'a>(
    arena: &'a Arena,
    template: &str,
    values: Map<'_>,
    options: &RenderOptions,
) -> Result<Str<'a>> {
    Template::parse(template)?.render(arena, values, options)
}
