//! Application services - Use case implementations
//!
//! Services accept port dependencies as `Arc<dyn Port>` and own the
//! in-memory state for the running encounter.

pub mod deck_service;
pub mod scenario_notifier;
pub mod scenario_service;

use std::future::Future;
use std::time::Duration;

use crate::application::ports::outbound::LookupError;

pub use deck_service::{DeckService, DeckServiceError, DrawnCard, RoundDraws};
pub use scenario_notifier::ScenarioNotifier;
pub use scenario_service::{ScenarioError, ScenarioService, STATE_KEY};

/// Bound a retrieval request so a lookup that never answers becomes an error
pub(crate) async fn with_timeout<T>(
    limit: Duration,
    request: impl Future<Output = Result<T, LookupError>>,
) -> Result<T, LookupError> {
    tokio::time::timeout(limit, request)
        .await
        .map_err(|_| LookupError::Timeout(limit))?
}
