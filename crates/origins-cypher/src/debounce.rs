//! Trailing-edge debouncer.
//!
//! Every [`Debouncer::submit`] restarts the timer. When `delay` passes with
//! no newer submission, the latest value is forwarded to the output channel
//! and everything submitted before it is dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Clone for Debouncer<T> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the timer task on the current runtime. Settled values are sent
    /// to `out`. The task ends when `cancel` fires, when every `Debouncer`
    /// handle is dropped, or when `out` closes.
    pub fn spawn(delay: Duration, out: mpsc::UnboundedSender<T>, cancel: CancellationToken) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(delay, rx, out, cancel));
        Self { tx }
    }

    /// Queue a value. Returns `false` if the timer task has stopped.
    pub fn submit(&self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }
}

async fn run<T>(
    delay: Duration,
    mut rx: mpsc::UnboundedReceiver<T>,
    out: mpsc::UnboundedSender<T>,
    cancel: CancellationToken,
) {
    let mut pending: Option<T> = None;
    let sleep = tokio::time::sleep(delay);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            msg = rx.recv() => match msg {
                Some(value) => {
                    pending = Some(value);
                    sleep.as_mut().reset(Instant::now() + delay);
                }
                None => break,
            },
            _ = &mut sleep, if pending.is_some() => {
                if let Some(value) = pending.take() {
                    if out.send(value).is_err() {
                        break;
                    }
                }
            }
        }
    }
    tracing::debug!("debouncer stopped");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
