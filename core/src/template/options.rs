/// What to do with a placeholder whose key is not in the value map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MissingKey {
    /// Render nothing.
    #[default]
    Skip,
    /// Emit the placeholder unchanged, braces included.
    Keep,
    /// Fail the render with [`Error::MissingKey`](crate::Error::MissingKey).
    Error,
}

/// Options controlling [`Template::render`](super::Template::render).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub missing_key: MissingKey,
    /// How many aggregates may enclose one another. A top-level array, list
    /// or map is at depth 1.
    pub max_depth: usize,
}

impl RenderOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    /// Apply every field that is set in `overrides`.
    pub fn override_with(&mut self, overrides: &RenderOptionsOverride) {
        if let Some(missing_key) = overrides.missing_key {
            self.missing_key = missing_key;
        }
        if let Some(max_depth) = overrides.max_depth {
            self.max_depth = max_depth;
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            missing_key: MissingKey::default(),
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// A partial [`RenderOptions`]: `None` fields keep the base value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptionsOverride {
    pub missing_key: Option<MissingKey>,
    pub max_depth: Option<usize>,
}
