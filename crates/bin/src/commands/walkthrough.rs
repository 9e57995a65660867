//! Account walkthrough command - drives the account service against a
//! process-wide atom and prints every intermediate state.

use std::sync::{
    Arc, LazyLock,
    atomic::{AtomicUsize, Ordering},
};

use atomtree::{Atom, Node, accounts, node};

use crate::output::{OutputFormat, render_node};

/// The process-wide account state
static ACCOUNTS: LazyLock<Atom<Node>> = LazyLock::new(|| Atom::new(Node::new()));

/// Run the walkthrough command
pub fn run(format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let updates = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&updates);
    ACCOUNTS.add_watch("walkthrough", move |_, _, _| {
        counter.fetch_add(1, Ordering::Relaxed);
    });

    let steps = steps(&ACCOUNTS)?;
    ACCOUNTS.remove_watch("walkthrough");
    tracing::info!(
        updates = updates.load(Ordering::Relaxed),
        "Walkthrough finished"
    );

    match format {
        OutputFormat::Human => {
            let width = steps.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
            for (label, state) in &steps {
                println!("{label:<width$}  {}", render_node(state, format)?);
            }
        }
        OutputFormat::Json => {
            let entries = steps
                .iter()
                .map(|(label, state)| -> Result<_, serde_json::Error> {
                    Ok(serde_json::json!({
                        "step": label,
                        "state": serde_json::to_value(state.as_ref())?,
                    }))
                })
                .collect::<Result<Vec<_>, _>>()?;
            println!("{}", serde_json::to_string(&entries)?);
        }
    }

    Ok(())
}

/// Apply the scenario to `state`, returning the state after each step
fn steps(state: &Atom<Node>) -> atomtree::Result<Vec<(&'static str, Arc<Node>)>> {
    let dante = node! { "name" => "Dante", "age" => 13, "color" => "red" };

    Ok(vec![
        ("start", state.read()),
        (
            "create_account",
            accounts::create_account(state, "braden", 22)?,
        ),
        (
            "add_pet",
            accounts::add_pet(state, "braden", "bird", dante)?,
        ),
        (
            "celebrate_birthday",
            accounts::celebrate_birthday(state, "braden")?,
        ),
        (
            "remove_pet",
            accounts::remove_pet(state, "braden", "bird")?,
        ),
        (
            "delete_account",
            accounts::delete_account(state, "braden")?,
        ),
    ])
}
