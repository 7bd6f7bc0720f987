//! Shared identifier types.
//!
//! Ids are plain integers wrapped in newtypes so a profile id can never be
//! passed where an opening id is expected. Ordering is derived because every
//! deterministic tie-break in the engine falls back to ascending id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulated season year (e.g. 2031).
pub type Year = u16;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            pub fn next(self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $prefix, self.0)
            }
        }
    };
}

id_type!(
    /// A tracked person (coach, scout, executive).
    ProfileId,
    "profile"
);
id_type!(
    /// A franchise. Team data itself lives outside this crate.
    TeamId,
    "team"
);
id_type!(OpeningId, "opening");
id_type!(ApplicationId, "application");
id_type!(OfferId, "offer");
