//! Fixed pool of fetch workers fed by the engine's work channel.

use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::FutureExt;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use super::state::WorkItem;
use crate::download::fetcher::Fetcher;
use crate::download::outcome::Outcome;

/// Work channel receiver shared by all workers.
pub(super) type WorkReceiver = Arc<Mutex<mpsc::Receiver<WorkItem>>>;

/// A finished fetch handed back to the control loop.
#[derive(Debug)]
pub(super) struct Completion {
    pub(super) item: WorkItem,
    pub(super) outcome: Outcome,
}

/// Spawns `count` workers. Each takes items from `work_rx` until the
/// channel closes and sends every result on `result_tx`.
pub(super) fn spawn_workers<F>(
    count: usize,
    fetcher: &Arc<F>,
    output_dir: &Path,
    work_rx: &WorkReceiver,
    result_tx: &mpsc::UnboundedSender<Completion>,
) -> Vec<JoinHandle<()>>
where
    F: Fetcher + ?Sized + 'static,
{
    (0..count)
        .map(|worker_id| {
            tokio::spawn(worker_loop(
                worker_id,
                Arc::clone(fetcher),
                output_dir.to_path_buf(),
                Arc::clone(work_rx),
                result_tx.clone(),
            ))
        })
        .collect()
}

async fn worker_loop<F>(
    worker_id: usize,
    fetcher: Arc<F>,
    output_dir: PathBuf,
    work_rx: WorkReceiver,
    result_tx: mpsc::UnboundedSender<Completion>,
) where
    F: Fetcher + ?Sized,
{
    loop {
        let next = work_rx.lock().await.recv().await;
        let Some(item) = next else {
            trace!(worker_id, "work channel closed");
            break;
        };

        let outcome = fetch_guarded(fetcher.as_ref(), item.url(), &output_dir).await;

        if result_tx.send(Completion { item, outcome }).is_err() {
            trace!(worker_id, "result channel closed");
            break;
        }
    }
}

/// Runs one fetch, turning a panic into a transport failure so the item
/// still reaches the control loop.
async fn fetch_guarded<F>(fetcher: &F, url: &str, output_dir: &Path) -> Outcome
where
    F: Fetcher + ?Sized,
{
    match AssertUnwindSafe(fetcher.fetch(url, output_dir))
        .catch_unwind()
        .await
    {
        Ok(outcome) => outcome,
        Err(_) => {
            warn!(url = %url, "fetch task panicked");
            Outcome::transport("fetch task panicked")
        }
    }
}
