//! Strongly-typed identifiers for the Quay content layer.
//!
//! Modules, loading contexts, and runtime instances all carry UUID-backed
//! identities. Keeping them as distinct types prevents a context id from
//! ever being used where a module id is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an identifier from a specific UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// The nil (all zeros) identifier.
            pub fn nil() -> Self {
                Self(Uuid::nil())
            }

            /// Get the underlying UUID.
            pub fn uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id! {
    /// Identity of an installed module. The synthetic self-module uses
    /// [`ModuleId::nil`].
    ModuleId
}

define_id! {
    /// Identity of a module loading context.
    ContextId
}

define_id! {
    /// Identity of a runtime instance registered with the scheme registry.
    RuntimeId
}
