use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::TwitchError;

/// Cancellation and deadline handle passed into every call.
///
/// Cloning shares the cancellation token. Derived contexts keep the
/// stricter of their parent's deadline and their own.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context cancelled together with `token`.
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            cancel: token,
            deadline: None,
        }
    }

    /// Derive a context that also expires `timeout` from now.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Derive a context that also expires at `deadline`.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        Self {
            cancel: self.cancel.clone(),
            deadline: Some(stricter(self.deadline, deadline)),
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Drive `work` until it completes, the context is cancelled, or the
    /// stricter of the context deadline and `limit` passes.
    pub(crate) async fn run<T, F>(&self, limit: Option<Duration>, work: F) -> Result<T, TwitchError>
    where
        F: Future<Output = Result<T, TwitchError>>,
    {
        let deadline = match limit {
            Some(limit) => Some(stricter(self.deadline, Instant::now() + limit)),
            None => self.deadline,
        };

        let bounded = async {
            match deadline {
                Some(at) => match tokio::time::timeout_at(at, work).await {
                    Ok(result) => result,
                    Err(_) => Err(TwitchError::Timeout),
                },
                None => work.await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(TwitchError::Cancelled),
            result = bounded => result,
        }
    }
}

fn stricter(current: Option<Instant>, candidate: Instant) -> Instant {
    current.map_or(candidate, |current| current.min(candidate))
}
