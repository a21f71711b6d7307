use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use hyper::header::HeaderValue;
use hyper::Uri;
use tokio::sync::mpsc;

use crate::client::HttpClient;
use crate::config::TargetConfig;
use crate::outcome::{classify, AttemptOutcome};
use crate::report;
use crate::results::RunResults;

/// Final state of a run, handed to the reporter.
pub struct RunReport {
    pub results: RunResults,
    pub elapsed: Duration,
}

/// Drives exactly `total_requests` attempts with at most `concurrency` in
/// flight. A fixed pool of workers claims attempt tickets from a shared
/// counter, and every outcome funnels through one channel so aggregation and
/// progress output stay on a single drain loop.
pub async fn run(config: &TargetConfig, client: HttpClient) -> Result<RunReport> {
    let uri: Uri = config
        .url
        .parse()
        .with_context(|| format!("invalid target url {:?}", config.url))?;
    let virtual_host = config
        .virtual_host
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()
        .context("virtual host is not a valid header value")?;

    let total = config.total_requests;
    let pool_size = config.concurrency.min(total);
    let started = Instant::now();

    let (outcome_tx, mut outcome_rx) = mpsc::channel(pool_size);
    let tickets = Arc::new(AtomicUsize::new(0));
    let mut workers = Vec::with_capacity(pool_size);
    for _ in 0..pool_size {
        workers.push(tokio::spawn(run_worker(
            client.clone(),
            uri.clone(),
            virtual_host.clone(),
            total,
            Arc::clone(&tickets),
            outcome_tx.clone(),
        )));
    }
    // The drain loop's copy must go, or the channel never closes.
    drop(outcome_tx);

    let mut results = RunResults::new();
    while let Some(outcome) = outcome_rx.recv().await {
        results.record(outcome);
        report::progress(results.completed(), total);
    }
    for worker in workers {
        worker.await.context("failed to join worker")?;
    }

    Ok(RunReport {
        results,
        elapsed: started.elapsed(),
    })
}

/// One pool worker: claim the next unclaimed attempt, run the exchange,
/// report the outcome, repeat. A ticket at or past the total means every
/// attempt is already claimed, so the worker exits.
async fn run_worker(
    client: HttpClient,
    uri: Uri,
    virtual_host: Option<HeaderValue>,
    total: usize,
    tickets: Arc<AtomicUsize>,
    outcomes: mpsc::Sender<AttemptOutcome>,
) {
    while tickets.fetch_add(1, Ordering::Relaxed) < total {
        let outcome = classify(client.get(&uri, virtual_host.as_ref()).await);
        if outcomes.send(outcome).await.is_err() {
            break;
        }
    }
}
