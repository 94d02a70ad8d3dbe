//! HTTP Routes

use std::sync::Arc;

use crate::{ApiError, AppState};

pub mod checks;
pub mod patients;

/// Run `f` on the blocking thread pool.
///
/// Store writes may rewrite the patient file while holding the store lock, which must
/// not happen on a runtime worker thread.
pub(crate) async fn blocking<T, F>(state: &Arc<AppState>, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&AppState) -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || f(&state)).await?
}
