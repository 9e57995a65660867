/*! Integration tests for atomtree.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - node: Tests for Node, Value, Key and Path (reads, updates, nested paths, JSON)
 * - atom: Tests for the Atom cell (sequential semantics, validators, watches, contention)
 * - accounts: End-to-end tests for the account registry built on both
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("atomtree=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod accounts;
mod helpers;
