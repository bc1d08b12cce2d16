//! Concurrent retrieval of several assets
//!
//! Each retrieval runs as its own tokio task sharing a cloned
//! [`OrdersClient`](crate::app::OrdersClient). All tasks are awaited; a
//! failing or panicking task does not cancel or hide the others.

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::app::models::{AssetKind, AssetResult};
use crate::app::retriever::AssetRetriever;
use crate::errors::{AppError, Result};

/// Result of one retrieval in a fan-out
#[derive(Debug)]
pub struct FetchOutcome {
    pub kind: AssetKind,
    pub result: Result<AssetResult>,
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run every retrieval concurrently and collect one outcome per retrieval,
/// in the order given
pub async fn fetch_all(retrievers: Vec<AssetRetriever>) -> Vec<FetchOutcome> {
    let mut kinds = Vec::with_capacity(retrievers.len());
    let mut handles = Vec::with_capacity(retrievers.len());

    for retriever in retrievers {
        let kind = retriever.request().kind();
        debug!("Spawning retrieval of {}", kind);
        kinds.push(kind);
        handles.push(tokio::spawn(async move { retriever.get_asset().await }));
    }

    let joined = join_all(handles).await;

    let outcomes: Vec<FetchOutcome> = kinds
        .into_iter()
        .zip(joined)
        .map(|(kind, joined)| {
            let result = match joined {
                Ok(result) => result,
                Err(e) => {
                    warn!("Retrieval of {} panicked: {}", kind, e);
                    Err(AppError::generic(format!("retrieval of {} did not complete: {}", kind, e)))
                }
            };
            FetchOutcome { kind, result }
        })
        .collect();

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    info!(
        "Completed {} retrievals ({} failed)",
        outcomes.len(),
        failed
    );

    outcomes
}
