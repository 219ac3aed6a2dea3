use core::fmt;
use core::num::NonZeroU32;

/// Stable identifier of an ingredient, unique within a mix and kept across edits.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<IngredientId>` to be pointer-optimized and
///   matches the catalog numbering, which starts at 1
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct IngredientId(NonZeroU32);

impl IngredientId {
    /// `None` for 0.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// Create an id from a 0-based index by storing index+1.
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// The id following the largest in `ids`, or 1 for an empty set.
    pub fn next_after<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = IngredientId>,
    {
        match ids.into_iter().max() {
            Some(max) => Self(max.0.saturating_add(1)),
            None => Self(NonZeroU32::MIN),
        }
    }
}

impl fmt::Debug for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IngredientId({})", self.get())
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Identifier of an enzyme product, e.g. `phytase-standard`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EnzymeId(String);

impl EnzymeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EnzymeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnzymeId({})", self.0)
    }
}

impl fmt::Display for EnzymeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EnzymeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
