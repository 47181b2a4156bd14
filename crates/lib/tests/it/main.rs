/*! Integration tests for Upkeep.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - update: Tests for the update coordinator, relocator and merger
 * - loader: Tests for loading against storage/codec collaborators
 * - serialization: Tests for the serde representation of document trees
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("upkeep=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
mod loader;
mod serialization;
mod update;
