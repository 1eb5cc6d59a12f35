//! Single-shot completion tokens.
//!
//! A phase receives a [`Done`] and must invoke it exactly once. The harness
//! holds the matching [`Signal`] and waits on it. `Done` is consumed by
//! value, so a second invocation does not compile; a token that is dropped
//! without being invoked resolves the signal as [`Failure::Abandoned`],
//! unless it is dropped while its thread unwinds from a panic, which fails
//! the phase as an assertion.

use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::sync::oneshot;
use tracing::debug;

use super::failure::{Failure, Phase};

/// Completion token handed to an asynchronous phase.
#[derive(Debug)]
pub struct Done {
    phase: Phase,
    tx: Option<oneshot::Sender<Result<(), Failure>>>,
}

/// Receiving side of a [`Done`].
#[derive(Debug)]
pub struct Signal {
    phase: Phase,
    rx: oneshot::Receiver<Result<(), Failure>>,
}

impl Done {
    /// Create a token and the signal that observes it.
    pub fn channel(phase: Phase) -> (Done, Signal) {
        let (tx, rx) = oneshot::channel();
        (
            Done {
                phase,
                tx: Some(tx),
            },
            Signal { phase, rx },
        )
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Signal that the phase finished successfully.
    pub fn complete(mut self) {
        debug!(phase = %self.phase, "Completion token invoked");
        self.send(Ok(()));
    }

    /// Signal that the phase finished with a failure.
    pub fn fail(mut self, failure: Failure) {
        debug!(phase = %self.phase, error = %failure, "Completion token failed");
        self.send(Err(failure));
    }

    /// Run callback work on a spawned task.
    ///
    /// `work` receives a token of its own. A panic inside the work fails
    /// this token with the panic message; otherwise whatever the work does
    /// with its token is forwarded here.
    pub fn spawn<F, Fut>(self, work: F)
    where
        F: FnOnce(Done) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (inner, signal) = Done::channel(self.phase);
        let work = work(inner);
        tokio::spawn(async move {
            match AssertUnwindSafe(work).catch_unwind().await {
                Ok(()) => match signal.wait().await {
                    Ok(()) => self.complete(),
                    Err(failure) => self.fail(failure),
                },
                Err(payload) => self.fail(Failure::from_panic(payload)),
            }
        });
    }

    fn send(&mut self, outcome: Result<(), Failure>) {
        if let Some(tx) = self.tx.take() {
            // The harness may have given up on this phase already.
            let _ = tx.send(outcome);
        }
    }
}

impl Drop for Done {
    fn drop(&mut self) {
        if self.tx.is_some() && std::thread::panicking() {
            let message = format!("{} panicked before its completion token was invoked", self.phase);
            self.send(Err(Failure::assertion(message)));
        }
    }
}

impl Signal {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Wait for the token to be invoked.
    pub async fn wait(self) -> Result<(), Failure> {
        match self.rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(Failure::Abandoned { phase: self.phase }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_complete_resolves_signal() {
        let (done, signal) = Done::channel(Phase::Setup);
        done.complete();
        assert_eq!(signal.wait().await, Ok(()));
    }

    #[tokio::test]
    async fn test_fail_carries_failure() {
        let (done, signal) = Done::channel(Phase::Body);
        done.fail(Failure::assertion("entries missing"));
        let err = signal.wait().await.unwrap_err();
        assert_eq!(err, Failure::assertion("entries missing"));
    }

    #[tokio::test]
    async fn test_dropped_token_is_abandoned() {
        let (done, signal) = Done::channel(Phase::Teardown);
        drop(done);
        let err = signal.wait().await.unwrap_err();
        assert_eq!(
            err,
            Failure::Abandoned {
                phase: Phase::Teardown
            }
        );
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_complete_from_spawned_task() {
        let (done, signal) = Done::channel(Phase::Setup);
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            done.complete();
        });
        assert!(signal.wait().await.is_ok());
    }

    #[tokio::test]
    async fn test_token_dropped_while_panicking_is_assertion() {
        let (done, signal) = Done::channel(Phase::Body);
        let unwound = std::panic::catch_unwind(AssertUnwindSafe(move || {
            let _held = done;
            panic!("entries wrong");
        }));
        assert!(unwound.is_err());

        let err = signal.wait().await.unwrap_err();
        assert_eq!(
            err,
            Failure::assertion("body panicked before its completion token was invoked")
        );
    }

    #[tokio::test]
    async fn test_spawn_forwards_completion() {
        let (done, signal) = Done::channel(Phase::Setup);
        done.spawn(|inner| async move {
            tokio::task::yield_now().await;
            inner.complete();
        });
        assert_eq!(signal.wait().await, Ok(()));
    }

    #[tokio::test]
    async fn test_spawn_captures_panic_message() {
        let (done, signal) = Done::channel(Phase::Body);
        done.spawn(|inner| async move {
            tokio::task::yield_now().await;
            let entries: Vec<String> = Vec::new();
            assert_eq!(entries.len(), 99, "entries wrong");
            inner.complete();
        });
        let err = signal.wait().await.unwrap_err();
        assert!(!err.is_timeout());
        assert!(err.to_string().contains("entries wrong"), "{err}");
    }
}
