//! List and detail fetching: ordered multi-endpoint fallback and stale-detail guarding.

use std::future::Future;

use tracing::{debug, warn};

use crate::errors::ClientError;

pub mod selection;

pub use selection::{SelectionGuard, SelectionTicket};

/// Tries each provider in order and returns the first success.
///
/// Providers after the first success are never invoked. When every provider
/// fails, the error from the *last* one attempted is returned and earlier
/// errors are dropped. An empty provider list is `ClientError::NoCandidates`.
pub async fn fetch_first_ok<T, I, F, Fut>(providers: I) -> Result<T, ClientError>
where
    I: IntoIterator<Item = F>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut last_error: Option<ClientError> = None;

    for (attempt, provider) in providers.into_iter().enumerate() {
        match provider().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!("Fallback candidate {} succeeded", attempt + 1);
                }
                return Ok(value);
            }
            Err(e) => {
                warn!("Candidate {} failed: {e}", attempt + 1);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or(ClientError::NoCandidates))
}
