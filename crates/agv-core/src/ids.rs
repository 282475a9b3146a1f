//! Strongly typed identifier wrappers for arena-stored entities.
//!
//! Control points, segments, and vehicles all live in arena `Vec`s (or
//! id-keyed maps) owned by the network and the engine; everything else holds
//! these compact handles instead of references.  All ids are
//! `Copy + Ord + Hash` so they work as map keys without ceremony.  The inner
//! integer is `pub` for direct arena indexing, but callers should prefer the
//! `.index()` helper.

use std::fmt;

/// Generate a typed id wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid id".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as an arena index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a control point.  16-bit: the target scale is ~15,000 nodes,
    /// and the on-disk routing record packs three of these into 6 bytes.
    pub struct PointId(u16);
}

typed_id! {
    /// Index of a directed path segment in the network arena.
    pub struct SegmentId(u32);
}

typed_id! {
    /// Handle of a vehicle registered with the movement engine.
    pub struct VehicleId(u32);
}
