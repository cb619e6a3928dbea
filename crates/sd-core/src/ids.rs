//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Ordering matters: the scheduler
//! walks vehicles in ascending `VehicleId` order, so "first encountered" is
//! reproducible across runs.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn raw(self) -> $inner {
                self.0
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> $name {
                $name(raw)
            }
        }
    };
}

typed_id! {
    /// Identity of a track-side object (siding or platform).
    pub struct AnchorId(u64);
}

typed_id! {
    /// Identity of a live vehicle instance.
    pub struct VehicleId(u64);
}

typed_id! {
    /// Identity of the depot a siding is associated with.
    pub struct DepotId(u32);
}

impl VehicleId {
    /// The canonical "home" vehicle of a siding shares the siding's identity.
    #[inline]
    pub fn home(siding: AnchorId) -> VehicleId {
        VehicleId(siding.0)
    }

    /// `true` if this is the home vehicle of `siding`.
    #[inline]
    pub fn is_home_of(self, siding: AnchorId) -> bool {
        self.0 == siding.0
    }
}
