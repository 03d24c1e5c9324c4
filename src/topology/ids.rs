//! `PathId` / `TopologyId`: strong, zero-cost handles for stored entities
//!
//! Both wrap the raw integer primary key used by the network and the
//! topology store. Keeping them distinct prevents a topology identifier
//! from being looked up as a path (and vice versa).
//!
//! On the wire, clients send identifiers either as JSON integers or as
//! numeric strings; [`parse_id_value`] accepts both.

use std::fmt;

use serde_json::Value;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw identifier.
            #[inline]
            pub const fn new(raw: u64) -> Self {
                $name(raw)
            }

            /// Returns the raw identifier.
            #[inline]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                $name(raw)
            }
        }
    };
}

define_id!(
    /// Identifier of a path segment in the network.
    PathId
);

define_id!(
    /// Identifier of a stored topology.
    TopologyId
);

/// Reads an identifier from a JSON integer or a numeric string.
///
/// Returns `None` for anything else (floats, negative numbers, text).
pub fn parse_id_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}


#[cfg(test)]
mod abi_tests {
    use super::*;
    use static_assertions::{assert_eq_align, assert_eq_size};

    #[test]
    fn size_matches_u64() {
        assert_eq_size!(PathId, u64);
        assert_eq_size!(TopologyId, u64);
    }

    #[test]
    fn alignment_matches_u64() {
        assert_eq_align!(PathId, u64);
    }
}
