//! Path construction and the keys they produce.

use atomtree::{Key, Node, Path, path};

#[test]
fn test_path_sources_agree() {
    let parsed: Path = "braden.pets.bird".parse().unwrap();
    let from_array = Path::from(["braden", "pets", "bird"]);
    let from_vec = Path::from(vec!["braden".to_string(), "pets".into(), "bird".into()]);
    let built = Path::new().push("braden").push("pets").push("bird");

    assert_eq!(parsed, from_array);
    assert_eq!(parsed, from_vec);
    assert_eq!(parsed, built);
    assert_eq!(parsed, path!["braden", "pets", "bird"]);
}

#[test]
fn test_macro_does_not_split_on_dots() {
    let p = path!["a.b", "c"];
    assert_eq!(p.len(), 2);
    assert_eq!(p.keys()[0], Key::from("a.b"));

    let tree = Node::new().assoc_in(&p, 1);
    assert_eq!(tree.get("a.b").and_then(|v| v.as_node()).map(|n| n.len()), Some(1));
    assert_eq!(tree.get_in("a.b.c"), None);
}

#[test]
fn test_keyword_components() {
    let p: Path = ":user.:name".parse().unwrap();
    assert!(p.iter().all(Key::is_keyword));
    assert_eq!(p.to_string(), ":user.:name");

    let tree = Node::new().assoc_in(&p, "Alice");
    assert_eq!(
        tree.get_in_as::<&str>(path![Key::keyword("user"), Key::keyword("name")]),
        Some("Alice")
    );
    assert_eq!(tree.get_in("user.name"), None);
}

#[test]
fn test_collect_into_path() {
    let p: Path = ["x", "y", "z"].into_iter().collect();
    assert_eq!(p.parent(), Some(path!["x", "y"]));
    assert_eq!(p.last().map(Key::as_str), Some("z"));
}
