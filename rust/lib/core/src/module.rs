use axum::Router;

/// A service module that contributes HTTP routes.
///
/// The binary entry point collects all modules and merges their
/// routes into a single Router. Routes are mounted at the root, so a
/// module owns its full paths (e.g. `/releases`).
pub trait Module: Send + Sync {
    /// Module name, used for logging.
    fn name(&self) -> &str;

    /// Return the module's routes.
    fn routes(&self) -> Router;
}
