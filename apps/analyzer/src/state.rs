use crate::pipeline::Toolkit;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Analysis handles built once at startup; read-only across requests.
    pub toolkit: Toolkit,
}
