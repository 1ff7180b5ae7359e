//! Bounded-concurrency fetch orchestration with silent retries.
//!
//! A fixed pool of workers drains a pending-job queue and pushes outcomes
//! onto a completion queue. A single coordinator loop decides per outcome
//! whether to re-enqueue (transient fetch failure within budget) or to
//! finalize, which keeps the one-terminal-outcome-per-URL invariant trivial.
//! The only ordering guarantee is on the final result sequence, which
//! always matches the input URL order.

use futures::future::join_all;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::time::{Duration, sleep};

use crate::client::{DeviceProfile, FetchAnalysis};
use crate::core::error::{Result, SpeedcheckError};
use crate::progress::ProgressReporter;
use crate::report::{Report, build_report};

/// One unit of fetch work. Exactly one job per URL exists at any time.
#[derive(Debug)]
struct Job {
    /// Position in the input URL list, and the output slot index
    index: usize,
    url: String,
    /// Attempts performed so far (incremented by the worker)
    attempts: u32,
}

/// Outcome of a single fetch attempt, pushed onto the completion queue.
enum Outcome {
    /// Fetch succeeded and the report was built
    Built(Report),
    /// Fetch succeeded but the response is inconsistent; never retried
    Rejected(SpeedcheckError),
    /// Fetch failed; retryable while the budget lasts
    Failed(SpeedcheckError),
}

/// Drives page analyses for a batch of URLs over a fixed-size worker pool.
#[derive(Debug, Clone)]
pub struct Runner {
    worker_count: usize,
    retry_budget: u32,
    retry_delay: Duration,
    profile: DeviceProfile,
}

impl Runner {
    pub fn new(
        worker_count: usize,
        retry_budget: u32,
        retry_delay: Duration,
        profile: DeviceProfile,
    ) -> Self {
        Self {
            worker_count,
            retry_budget,
            retry_delay,
            profile,
        }
    }

    /// Fetches an analysis for every URL and returns one report per URL, in
    /// input order regardless of completion order.
    ///
    /// Fetch errors are retried silently up to the retry budget. A URL whose
    /// budget is exhausted (or whose response fails to build) yields a
    /// placeholder report with no categories; other URLs are unaffected.
    /// Empty input returns an empty result; zero workers with non-empty
    /// input is a configuration error.
    pub async fn run(
        &self,
        urls: &[String],
        fetcher: Arc<dyn FetchAnalysis>,
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<Report>> {
        if urls.is_empty() {
            return Ok(Vec::new());
        }
        if self.worker_count == 0 {
            return Err(SpeedcheckError::Config(
                "worker count must be positive".to_string(),
            ));
        }

        let (pending_tx, pending_rx) = mpsc::unbounded_channel();
        let (done_tx, mut done_rx) = mpsc::unbounded_channel();

        for (index, url) in urls.iter().enumerate() {
            let job = Job {
                index,
                url: url.clone(),
                attempts: 0,
            };
            // The receiver is alive until the coordinator finishes.
            let _ = pending_tx.send(job);
        }

        let pending_rx = Arc::new(Mutex::new(pending_rx));
        let workers = self.worker_count.min(urls.len());
        let handles: Vec<_> = (0..workers)
            .map(|id| {
                let pending = Arc::clone(&pending_rx);
                let done = done_tx.clone();
                let fetcher = Arc::clone(&fetcher);
                let profile = self.profile;
                let retry_delay = self.retry_delay;
                tokio::spawn(async move {
                    run_worker(id, pending, done, fetcher, profile, retry_delay).await;
                })
            })
            .collect();
        drop(done_tx);

        let mut slots: Vec<Option<Report>> = (0..urls.len()).map(|_| None).collect();
        let mut remaining = urls.len();
        while remaining > 0 {
            let Some((job, outcome)) = done_rx.recv().await else {
                break; // all workers gone; unfinished slots become placeholders
            };
            match outcome {
                Outcome::Built(report) => {
                    debug!("{} done after {} attempt(s)", job.url, job.attempts);
                    slots[job.index] = Some(report);
                    remaining -= 1;
                }
                Outcome::Rejected(err) => {
                    warn!("{}: {err}", job.url);
                    slots[job.index] = Some(Report::failed(job.url));
                    remaining -= 1;
                }
                Outcome::Failed(err) => {
                    if job.attempts <= self.retry_budget {
                        debug!(
                            "{} attempt {} failed, retrying: {err}",
                            job.url, job.attempts
                        );
                        let _ = pending_tx.send(job);
                        continue;
                    }
                    warn!("{} failed after {} attempt(s): {err}", job.url, job.attempts);
                    slots[job.index] = Some(Report::failed(job.url));
                    remaining -= 1;
                }
            }
            if let Some(progress) = progress {
                progress.url_done();
            }
        }

        // Closing the pending queue signals the workers to stop.
        drop(pending_tx);
        join_all(handles).await;

        Ok(urls
            .iter()
            .zip(slots)
            .map(|(url, slot)| slot.unwrap_or_else(|| Report::failed(url.clone())))
            .collect())
    }
}

async fn run_worker(
    id: usize,
    pending: Arc<Mutex<mpsc::UnboundedReceiver<Job>>>,
    done: mpsc::UnboundedSender<(Job, Outcome)>,
    fetcher: Arc<dyn FetchAnalysis>,
    profile: DeviceProfile,
    retry_delay: Duration,
) {
    loop {
        // Hold the lock only while dequeuing so other workers stay busy.
        let job = { pending.lock().await.recv().await };
        let Some(mut job) = job else { break };

        if job.attempts > 0 && !retry_delay.is_zero() {
            sleep(retry_delay).await;
        }
        debug!("worker {id} fetching {} (attempt {})", job.url, job.attempts + 1);

        let outcome = match fetcher.fetch(&job.url, profile).await {
            Ok(raw) => match build_report(&raw) {
                Ok(report) => Outcome::Built(report),
                Err(err) => Outcome::Rejected(err),
            },
            Err(err) => Outcome::Failed(err),
        };
        job.attempts += 1;

        if done.send((job, outcome)).is_err() {
            break; // coordinator is gone
        }
    }
}
