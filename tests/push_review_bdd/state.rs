//! Scenario state for push review BDD tests.

use std::io;

use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// Descriptions given to the scenario's changesets, in history order.
pub(crate) const DESCRIPTIONS: [&str; 3] = ["Add parser", "Fix parser", "Document parser"];

/// A Tokio runtime paired with the mock review service it drives.
///
/// The server is declared first so it shuts down before its runtime.
pub(crate) struct ServiceHarness {
    pub(crate) server: MockServer,
    pub(crate) runtime: Runtime,
}

impl ServiceHarness {
    /// Starts a mock review service.
    ///
    /// # Errors
    ///
    /// Returns an error when the runtime cannot be created.
    pub(crate) fn start() -> Result<Self, io::Error> {
        let runtime = Runtime::new()?;
        let server = runtime.block_on(MockServer::start());
        Ok(Self { server, runtime })
    }

    /// Returns the JSON bodies of every request the service received.
    pub(crate) fn received_bodies(&self) -> Vec<serde_json::Value> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
            .iter()
            .filter_map(|request| request.body_json::<serde_json::Value>().ok())
            .collect()
    }
}

/// State shared across steps in a push review scenario.
#[derive(ScenarioState, Default)]
pub(crate) struct PushReviewState {
    /// Changeset ids in history order.
    pub(crate) history: Slot<Vec<String>>,
    /// Changeset ids the push transmits.
    pub(crate) outgoing: Slot<Vec<String>>,
    /// A branch other than `main`, as `(name, tip)`.
    pub(crate) branch: Slot<(String, String)>,
    /// Exit code of the push, when it fails.
    pub(crate) push_failure: Slot<i32>,
    /// The mock review service.
    pub(crate) service: Slot<ServiceHarness>,
    /// Process exit code of the run.
    pub(crate) exit_code: Slot<u8>,
    /// Everything written to the output sink.
    pub(crate) output: Slot<String>,
    /// Everything written to the error sink.
    pub(crate) errors: Slot<String>,
}
