//! A small account registry kept in one [`Atom`].
//!
//! The state is a [`Node`] mapping an account name to its record:
//!
//! ```text
//! {"braden": {"age": 22, "pets": {"bird": {"name": "Dante", "age": 13, "color": "red"}}}}
//! ```
//!
//! Each operation is a single `swap` whose update function is one of the
//! node operations, so concurrent callers never lose each other's changes.
//! There is no validation: creating an existing account overwrites it and
//! deleting a missing one does nothing.
//!
//! ```
//! use atomtree::{Atom, Node, accounts, node};
//!
//! let state = Atom::new(Node::new());
//! accounts::create_account(&state, "braden", 22)?;
//! accounts::add_pet(&state, "braden", "bird", node! { "name" => "Dante" })?;
//! assert_eq!(
//!     accounts::pet(&state, "braden", "bird").and_then(|p| p.get_as::<String>("name")),
//!     Some("Dante".to_string()),
//! );
//!
//! accounts::delete_account(&state, "braden")?;
//! assert!(state.read().is_empty());
//! # Ok::<(), atomtree::Error>(())
//! ```

use std::sync::Arc;

use crate::{
    Result,
    atom::Atom,
    constants::{AGE, PETS},
    node::{self, Node, Value},
    path,
};

/// Creates (or overwrites) the account `name` with the given age.
pub fn create_account(state: &Atom<Node>, name: &str, age: i64) -> Result<Arc<Node>> {
    tracing::debug!(account = name, age, "Creating account");
    state.swap(|accounts| accounts.assoc(name, crate::node! { AGE => age }))
}

/// Removes the account `name`; a missing account is ignored.
pub fn delete_account(state: &Atom<Node>, name: &str) -> Result<Arc<Node>> {
    tracing::debug!(account = name, "Deleting account");
    state.swap(|accounts| accounts.dissoc(name))
}

/// Stores `pet_info` under the account's pets, keyed by `species`.
///
/// The account and its pets node are created if they do not exist yet.
pub fn add_pet(
    state: &Atom<Node>,
    name: &str,
    species: &str,
    pet_info: Node,
) -> Result<Arc<Node>> {
    tracing::debug!(account = name, species, "Adding pet");
    state.swap(|accounts| accounts.assoc_in(path![name, PETS, species], pet_info.clone()))
}

/// Removes the pet of the given species from the account.
///
/// An account without a pets node is left as it is, and a missing account
/// stays missing.
pub fn remove_pet(state: &Atom<Node>, name: &str, species: &str) -> Result<Arc<Node>> {
    tracing::debug!(account = name, species, "Removing pet");
    let pets = path![name, PETS];
    state.swap(|accounts| {
        if accounts.get_in(&pets).is_none() {
            return accounts.clone();
        }
        accounts.update_in(&pets, node::without(species))
    })
}

/// Increments the account's age, saturating at `i64::MAX`. A missing age
/// counts as zero.
pub fn celebrate_birthday(state: &Atom<Node>, name: &str) -> Result<Arc<Node>> {
    state.swap(|accounts| {
        accounts.update_in(path![name, AGE], |age| {
            Value::Int(age.and_then(Value::as_int).unwrap_or(0).saturating_add(1))
        })
    })
}

/// Returns the account record for `name`, if any.
pub fn account(state: &Atom<Node>, name: &str) -> Option<Node> {
    state.read().get(name).and_then(Value::as_node).cloned()
}

/// Returns the pet record of the given species, if any.
pub fn pet(state: &Atom<Node>, name: &str, species: &str) -> Option<Node> {
    state
        .read()
        .get_in(path![name, PETS, species])
        .and_then(Value::as_node)
        .cloned()
}
