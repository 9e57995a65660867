//! Constants used throughout the atomtree library.
//!
//! Field names of the account records kept by [`accounts`](crate::accounts).

/// Account field holding the owner's age.
pub const AGE: &str = "age";

/// Account field holding the pets node, keyed by species.
pub const PETS: &str = "pets";
