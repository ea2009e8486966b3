#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Errors reported by lookups and constructors.
pub mod error;

/// A key-value map over the chained `HashTable`.
///
/// This module provides a `HashMap` that hashes keys with a configurable
/// hasher builder and stores `(K, V)` pairs in the underlying table.
pub mod hash_map;

/// The raw separate-chaining table, addressed by precomputed hashes.
pub mod hash_table;

/// A `String`-to-`String` map with strict removal and bulk upsert.
pub mod strict_map;

mod hash_map_proptest;

pub use error::Error;
pub use error::Result;
pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_table::HashTable;
pub use strict_map::StrictMap;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// Hasher builder used when none is named: foldhash's randomly seeded
        /// fast hasher.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// Hasher builder used when none is named: the standard library's
        /// randomly seeded SipHash.
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        compile_error!("enable the `foldhash` or `std` feature to provide a default hasher");
    }
}
