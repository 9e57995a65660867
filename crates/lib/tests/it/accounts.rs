//! Account service tests
//!
//! Runs the account and pet lifecycle against a shared atom and checks the
//! resulting state as JSON.

use std::{sync::Arc, thread};

use atomtree::{Atom, accounts, node};
use serde_json::json;

use crate::helpers::*;

// ===== LIFECYCLE =====

#[test]
fn test_account_lifecycle() {
    let state = empty_state();

    accounts::create_account(&state, "braden", 22).unwrap();
    assert_json_eq(&state.read(), json!({"braden": {"age": 22}}));

    accounts::add_pet(&state, "braden", "bird", dante()).unwrap();
    assert_json_eq(
        &state.read(),
        json!({
            "braden": {
                "age": 22,
                "pets": {"bird": {"name": "Dante", "age": 13, "color": "red"}}
            }
        }),
    );

    accounts::delete_account(&state, "braden").unwrap();
    assert_json_eq(&state.read(), json!({}));
}

#[test]
fn test_operations_return_new_state() {
    let state = empty_state();

    let after = accounts::create_account(&state, "alex", 30).unwrap();
    assert!(Arc::ptr_eq(&after, &state.read()));
    assert_eq!(after.get_in_as::<i64>("alex.age"), Some(30));
}

#[test]
fn test_create_account_overwrites_existing() {
    let state = empty_state();
    accounts::create_account(&state, "braden", 22).unwrap();
    accounts::add_pet(&state, "braden", "bird", dante()).unwrap();

    accounts::create_account(&state, "braden", 40).unwrap();

    assert_json_eq(&state.read(), json!({"braden": {"age": 40}}));
}

#[test]
fn test_delete_missing_account_is_noop() {
    let state = empty_state();
    accounts::create_account(&state, "alex", 30).unwrap();

    accounts::delete_account(&state, "nobody").unwrap();

    assert_json_eq(&state.read(), json!({"alex": {"age": 30}}));
}

// ===== PETS =====

#[test]
fn test_add_pet_to_missing_account_creates_it() {
    let state = empty_state();

    accounts::add_pet(&state, "sam", "dog", node! { "name" => "Rex" }).unwrap();

    assert_json_eq(&state.read(), json!({"sam": {"pets": {"dog": {"name": "Rex"}}}}));
}

#[test]
fn test_add_pet_keeps_other_pets() {
    let state = Atom::new(sample_tree());

    accounts::add_pet(&state, "braden", "dog", node! { "name" => "Rex" }).unwrap();

    let pets = node_at(&state.read(), "braden.pets").clone();
    assert_eq!(pets.len(), 3);
    assert_eq!(accounts::pet(&state, "braden", "bird"), Some(dante()));
}

#[test]
fn test_remove_pet() {
    let state = Atom::new(sample_tree());

    accounts::remove_pet(&state, "braden", "bird").unwrap();

    assert_eq!(accounts::pet(&state, "braden", "bird"), None);
    assert!(accounts::pet(&state, "braden", "cat").is_some());
    assert_eq!(state.read().get_in_as::<i64>("braden.age"), Some(22));
}

#[test]
fn test_remove_pet_from_account_without_pets() {
    let state = Atom::new(sample_tree());
    let before = state.read();

    accounts::remove_pet(&state, "alex", "bird").unwrap();

    assert_eq!(state.read(), before);
    assert_eq!(accounts::account(&state, "alex"), Some(node! { "age" => 30 }));
}

#[test]
fn test_remove_pet_from_missing_account_is_noop() {
    let state = empty_state();

    accounts::remove_pet(&state, "ghost", "bird").unwrap();

    assert_json_eq(&state.read(), json!({}));
    assert_eq!(accounts::account(&state, "ghost"), None);
}

// ===== BIRTHDAYS AND READS =====

#[test]
fn test_celebrate_birthday() {
    let state = Atom::new(sample_tree());

    accounts::celebrate_birthday(&state, "braden").unwrap();
    accounts::celebrate_birthday(&state, "braden").unwrap();

    assert_eq!(state.read().get_in_as::<i64>("braden.age"), Some(24));
    // Other accounts are untouched
    let original = sample_tree();
    assert_eq!(node_at(&state.read(), "alex"), node_at(&original, "alex"));
}

#[test]
fn test_celebrate_birthday_without_age_starts_at_one() {
    let state = empty_state();
    accounts::add_pet(&state, "sam", "dog", node! { "name" => "Rex" }).unwrap();

    accounts::celebrate_birthday(&state, "sam").unwrap();

    assert_eq!(state.read().get_in_as::<i64>("sam.age"), Some(1));
}

#[test]
fn test_celebrate_birthday_saturates() {
    let state = empty_state();
    accounts::create_account(&state, "methuselah", i64::MAX).unwrap();

    accounts::celebrate_birthday(&state, "methuselah").unwrap();

    assert_eq!(state.read().get_in_as::<i64>("methuselah.age"), Some(i64::MAX));
}

#[test]
fn test_account_and_pet_reads() {
    let state = Atom::new(sample_tree());

    assert_eq!(accounts::account(&state, "alex"), Some(node! { "age" => 30 }));
    assert_eq!(accounts::account(&state, "nobody"), None);
    assert_eq!(accounts::pet(&state, "alex", "bird"), None);
    assert_eq!(
        accounts::pet(&state, "braden", "cat").and_then(|cat| cat.get_as::<String>("name")),
        Some("Mochi".to_string()),
    );
}

// ===== CONCURRENCY =====

#[test]
fn test_concurrent_account_changes_are_all_applied() {
    let state = Arc::new(empty_state());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let state = Arc::clone(&state);
            thread::spawn(move || {
                let name = format!("user-{i}");
                accounts::create_account(&state, &name, 20).unwrap();
                for _ in 0..10 {
                    accounts::celebrate_birthday(&state, &name).unwrap();
                }
                accounts::add_pet(&state, &name, "fish", node! { "name" => "Bubbles" }).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let tree = state.read();
    assert_eq!(tree.len(), 8);
    for i in 0..8 {
        let account = accounts::account(&state, &format!("user-{i}")).unwrap();
        assert_eq!(account.get_as::<i64>("age"), Some(30));
        assert!(account.get_in("pets.fish").is_some());
    }
}
