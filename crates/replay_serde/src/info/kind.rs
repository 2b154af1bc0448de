use core::fmt;

/// The container category of a type.
///
/// Dispatch in the codec is driven by this: lists and maps get their own
/// tagged wire shapes, everything else is a leaf handled by serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    List,
    Map,
    Leaf,
}

impl ReflectKind {
    /// Returns the lower-case name used in messages.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Map => "map",
            Self::Leaf => "leaf",
        }
    }
}

impl fmt::Display for ReflectKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
