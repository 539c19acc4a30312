use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use indicatif::ProgressBar;
use parking_lot::Mutex;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::analyze::classify;
use crate::config::ScanConfig;
use crate::finding::{ComponentFinding, ComponentId, IsolatedFailure, SitePosture};
use crate::output::clean_reporter::ScanReport;
use crate::probe::Probe;
use crate::url::Url;

/// Shared result sink written by every classification task.
#[derive(Debug, Clone, Default)]
pub struct FindingSink {
    findings: Arc<Mutex<Vec<ComponentFinding>>>,
    failures: Arc<Mutex<Vec<IsolatedFailure>>>,
}

impl FindingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, finding: ComponentFinding) {
        self.findings.lock().push(finding);
    }

    pub fn fail(&self, component: ComponentId, reason: impl Into<String>) {
        self.failures.lock().push(IsolatedFailure { component, reason: reason.into() });
    }

    pub fn len(&self) -> usize {
        self.findings.lock().len() + self.failures.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn drain(&self) -> (Vec<ComponentFinding>, Vec<IsolatedFailure>) {
        (
            std::mem::take(&mut *self.findings.lock()),
            std::mem::take(&mut *self.failures.lock()),
        )
    }
}

fn panic_reason(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("task panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("task panicked: {}", s)
    } else {
        "task panicked".to_string()
    }
}

/// Runs one classification task per catalog entry with a bounded number in flight.
///
/// Permits are taken in catalog order before a task is spawned, so queued
/// entries start first-in first-out as slots free up.
pub struct ScanCoordinator<P: ?Sized> {
    probe: Arc<P>,
    concurrency: usize,
    cancel: CancellationToken,
    progress: Option<ProgressBar>,
}

impl<P> ScanCoordinator<P>
where
    P: Probe + ?Sized + 'static,
{
    pub fn new(probe: Arc<P>, config: &ScanConfig) -> Self {
        Self {
            probe,
            concurrency: config.effective_concurrency(),
            cancel: CancellationToken::new(),
            progress: None,
        }
    }

    /// Stop dispatching new entries once `token` is cancelled. In-flight tasks still finish.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub async fn run(&self, target: &Url, posture: SitePosture, catalog: &[ComponentId]) -> ScanReport {
        let start = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let sink = FindingSink::new();
        let mut handles = FuturesUnordered::new();
        let mut skipped = 0;

        tracing::info!(target = %target, entries = catalog.len(), concurrency = self.concurrency, "starting enumeration");

        for (idx, component) in catalog.iter().enumerate() {
            let permit = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => None,
                permit = semaphore.clone().acquire_owned() => permit.ok(),
            };
            let Some(permit) = permit else {
                skipped = catalog.len() - idx;
                tracing::warn!(skipped, "dispatch stopped");
                break;
            };

            let probe = self.probe.clone();
            let target = target.clone();
            let component = component.clone();
            let name = component.clone();
            let sink_task = sink.clone();
            let progress = self.progress.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let result = AssertUnwindSafe(classify(&target, &component, probe.as_ref()))
                    .catch_unwind()
                    .await;
                match result {
                    Ok(Ok(finding)) => sink_task.push(finding),
                    Ok(Err(e)) => {
                        tracing::warn!(component = %component, error = %e, "classification failed");
                        sink_task.fail(component, e.to_string());
                    }
                    Err(payload) => {
                        let reason = panic_reason(payload.as_ref());
                        tracing::warn!(component = %component, reason = %reason, "classification task isolated");
                        sink_task.fail(component, reason);
                    }
                }
                if let Some(pb) = progress {
                    pb.inc(1);
                }
            });
            handles.push(handle.map(move |res| (name, res)));
        }

        while let Some((component, joined)) = handles.next().await {
            if let Err(e) = joined {
                tracing::warn!(component = %component, error = %e, "classification task lost");
                sink.fail(component, e.to_string());
            }
        }

        let (findings, isolated_failures) = sink.drain();
        tracing::info!(
            findings = findings.len(),
            failures = isolated_failures.len(),
            skipped,
            "enumeration complete"
        );

        ScanReport {
            target: target.clone(),
            posture,
            findings,
            isolated_failures,
            skipped,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }
}
