use atomtree::{Atom, Node, node};

/// Two people, one of them with two pets.
pub fn sample_tree() -> Node {
    node! {
        "braden" => node! {
            "age" => 22,
            "pets" => node! {
                "bird" => dante(),
                "cat" => node! { "name" => "Mochi", "age" => 3 },
            },
        },
        "alex" => node! { "age" => 30 },
    }
}

/// The pet record used throughout the account scenarios.
pub fn dante() -> Node {
    node! { "name" => "Dante", "age" => 13, "color" => "red" }
}

/// A fresh, empty account state.
pub fn empty_state() -> Atom<Node> {
    Atom::new(Node::new())
}

/// Borrow the node at `path`, panicking with the path if it is missing.
pub fn node_at<'a>(tree: &'a Node, path: &str) -> &'a Node {
    tree.get_in(path)
        .and_then(|v| v.as_node())
        .unwrap_or_else(|| panic!("expected a node at '{path}'"))
}

/// Assert that the node serializes to exactly the given JSON (compared as JSON values).
pub fn assert_json_eq(tree: &Node, expected: serde_json::Value) {
    let actual = serde_json::to_value(tree).expect("node should serialize");
    assert_eq!(actual, expected, "unexpected tree: {tree}");
}
