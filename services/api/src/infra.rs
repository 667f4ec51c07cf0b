use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use talent_ledger::config::LedgerConfig;
use talent_ledger::recruitment::{sample, LedgerError, Workspace};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Workspace the service starts from: empty, or the sample dataset.
pub(crate) fn initial_workspace(config: &LedgerConfig) -> Result<Workspace, LedgerError> {
    if !config.seed_sample_data {
        return Ok(Workspace::new());
    }
    let workspace = sample::workspace()?;
    info!(
        persons = workspace.all_persons().len(),
        jobs = workspace.all_jobs().len(),
        applications = workspace.all_applications().len(),
        "seeded sample workspace"
    );
    Ok(workspace)
}
