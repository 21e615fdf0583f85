use crate::config::Config;
use crate::review::pipeline::ReportPipeline;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: ReportPipeline,
    pub sessions: SessionStore,
    pub config: Config,
}
