//! Sequential Atom behaviour.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use atomtree::{Atom, Error, Node, atom::AtomError, node};
use serde::de::Error as _;

// ===== READ / RESET / SWAP =====

#[test]
fn test_swap_then_reset() {
    let cell = Atom::new(1);

    let swapped = cell.swap(|n| n + 1).unwrap();
    assert_eq!(*swapped, 2);
    assert_eq!(*cell.read(), 2);

    let reset = cell.reset(1).unwrap();
    assert_eq!(*reset, 1);
    assert_eq!(*cell.read(), 1);
}

#[test]
fn test_swap_with_extra_arguments() {
    let cell = Atom::new(10);
    let (by, times) = (3, 2);
    cell.swap(|n| (n + by) * times).unwrap();
    assert_eq!(*cell.read(), 26);
}

#[test]
fn test_read_snapshot_is_stable() {
    let cell = Atom::new(node! { "a" => 1 });
    let before = cell.read();

    cell.swap(|n| n.assoc("a", 2)).unwrap();

    assert_eq!(before.get_as::<i64>("a"), Some(1));
    assert_eq!(cell.read().get_as::<i64>("a"), Some(2));
}

#[test]
fn test_swap_vals_and_reset_vals() {
    let cell = Atom::new(5);

    let (old, new) = cell.swap_vals(|n| n * 2).unwrap();
    assert_eq!((*old, *new), (5, 10));

    let (old, new) = cell.reset_vals(0).unwrap();
    assert_eq!((*old, *new), (10, 0));
}

#[test]
fn test_compare_and_set() {
    let cell = Atom::new(1);
    let seen = cell.read();

    assert!(cell.compare_and_set(&seen, 2).unwrap());
    assert_eq!(*cell.read(), 2);

    // `seen` is stale now
    assert!(!cell.compare_and_set(&seen, 3).unwrap());
    assert_eq!(*cell.read(), 2);
}

#[test]
fn test_compare_and_set_uses_identity_not_equality() {
    let cell = Atom::new(1);
    let lookalike = Arc::new(1);
    assert!(!cell.compare_and_set(&lookalike, 2).unwrap());
    assert_eq!(*cell.read(), 1);
}

// ===== FAILURES =====

#[test]
fn test_try_swap_error_propagates_unchanged_and_keeps_value() {
    #[derive(Debug, PartialEq)]
    enum Bump {
        Overflow,
        Rejected,
    }

    impl From<AtomError> for Bump {
        fn from(_: AtomError) -> Self {
            Bump::Rejected
        }
    }

    let cell = Atom::new(u8::MAX);
    let result = cell.try_swap(|n| n.checked_add(1).ok_or(Bump::Overflow));

    assert_eq!(result.unwrap_err(), Bump::Overflow);
    assert_eq!(*cell.read(), u8::MAX);
}

#[test]
fn test_try_swap_with_crate_error() {
    let cell = Atom::new(node! { "count" => "many" });
    let result = cell.try_swap(|n| {
        let count = n.get_as::<i64>("count").ok_or_else(|| {
            Error::from(atomtree::node::NodeError::TypeMismatch {
                expected: "int".to_string(),
                actual: "text".to_string(),
            })
        })?;
        Ok::<_, Error>(n.assoc("count", count + 1))
    });

    assert!(result.unwrap_err().is_type_error());
    assert_eq!(cell.read().get_as::<&str>("count"), Some("many"));
}

// ===== VALIDATORS =====

#[test]
fn test_validator_rejects_update() {
    let cell = Atom::with_validator(0, |n: &i32| *n >= 0).unwrap();

    cell.swap(|n| n + 5).unwrap();
    let err = cell.swap(|n| n - 10).unwrap_err();

    assert!(err.is_validation_error());
    assert_eq!(err.module(), "atom");
    assert_eq!(*cell.read(), 5);

    assert!(cell.reset(-1).unwrap_err().is_validation_error());
    assert!(cell.compare_and_set(&cell.read(), -1).is_err());
    assert_eq!(*cell.read(), 5);
}

#[test]
fn test_validator_must_accept_current_value() {
    assert!(Atom::with_validator(-1, |n: &i32| *n >= 0).is_err());

    let cell = Atom::new(-1);
    assert!(cell.set_validator(|n: &i32| *n >= 0).is_err());
    // No validator was installed, so any value still goes
    cell.reset(-100).unwrap();

    cell.reset(1).unwrap();
    cell.set_validator(|n: &i32| *n >= 0).unwrap();
    assert!(cell.reset(-1).is_err());

    cell.clear_validator();
    cell.reset(-1).unwrap();
    assert_eq!(*cell.read(), -1);
}

#[test]
fn test_validator_over_node_state() {
    let cell = Atom::with_validator(Node::new(), |n: &Node| {
        n.values()
            .filter_map(|v| v.as_node())
            .all(|account| account.contains_key("age"))
    })
    .unwrap();

    cell.swap(|n| n.assoc("braden", node! { "age" => 22 })).unwrap();
    assert!(cell.swap(|n| n.assoc("ghost", node! {})).is_err());
    assert!(!cell.read().contains_key("ghost"));
}

// ===== WATCHES =====

#[test]
fn test_watches_see_old_and_new() {
    let cell = Atom::new(1);
    let log = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&log);
    cell.add_watch("log", move |key, old: &i32, new: &i32| {
        sink.lock().unwrap().push((key.to_string(), *old, *new));
    });

    cell.swap(|n| n + 1).unwrap();
    cell.reset(10).unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec![("log".to_string(), 1, 2), ("log".to_string(), 2, 10)]
    );
}

#[test]
fn test_failed_update_does_not_notify() {
    let cell = Atom::with_validator(0, |n: &i32| *n < 3).unwrap();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    cell.add_watch("count", move |_, _, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    cell.swap(|n| n + 1).unwrap();
    let _ = cell.swap(|n| n + 10);
    let _ = cell.try_swap(|_| Err::<i32, Error>(Error::from(serde_json::Error::custom("boom"))));

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_remove_watch() {
    let cell = Atom::new(0);
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    cell.add_watch("count", move |_, _, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(cell.watch_count(), 1);

    cell.swap(|n| n + 1).unwrap();
    assert!(cell.remove_watch("count"));
    assert!(!cell.remove_watch("count"));
    cell.swap(|n| n + 1).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cell.watch_count(), 0);
}

#[test]
fn test_debug_shows_value() {
    let cell = Atom::new(3);
    assert_eq!(format!("{cell:?}"), "Atom { value: 3, watches: 0 }");
}
