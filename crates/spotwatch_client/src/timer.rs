use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Owner of deferred one-shot callbacks.
///
/// Every callback scheduled through a scope is cancelled when the scope is
/// cancelled or dropped, so nothing fires after the owning view is gone.
/// Scheduling on a cancelled scope yields an already-cancelled timer.
#[derive(Debug, Default)]
pub struct TimerScope {
    token: CancellationToken,
}

/// Handle to one scheduled callback. Dropping it does not cancel the timer.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    token: CancellationToken,
}

impl TimerHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl TimerScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `callback` once after `delay` unless cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, delay: Duration, callback: F) -> TimerHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let token = self.token.child_token();
        let task_token = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = task_token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if !task_token.is_cancelled() {
                        callback();
                    }
                }
            }
        });
        TimerHandle { token }
    }

    pub fn cancel_all(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for TimerScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
