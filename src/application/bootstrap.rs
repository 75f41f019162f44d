use crate::domain::ports::SessionServiceBox;
use crate::domain::session::{Session, SessionProfile};
use crate::error::{GateError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

/// Cached outcome of the session bootstrap.
#[derive(Debug, Clone)]
pub enum BootstrapState {
    Pending,
    InProgress,
    Ready(Arc<Session>),
    Failed {
        reason: String,
        /// `None` keeps the failure for the rest of the process.
        retry_at: Option<Instant>,
    },
}

impl BootstrapState {
    fn needs_attempt(&self) -> bool {
        match self {
            BootstrapState::Pending => true,
            BootstrapState::Failed {
                retry_at: Some(at), ..
            } => Instant::now() >= *at,
            _ => false,
        }
    }
}

/// Performs the upstream session bootstrap once and shares the result.
///
/// The attempt runs in its own task and publishes its outcome on a watch
/// channel. Callers only wait on that channel, so a caller that goes away
/// mid-bootstrap cannot cancel the attempt or cause a second one. A failure is
/// permanent unless a retry window is configured, in which case the next
/// caller after the window starts one fresh attempt.
pub struct SessionBootstrapper {
    inner: Arc<Inner>,
    settle_delay: Duration,
    retry_after: Option<Duration>,
}

struct Inner {
    service: SessionServiceBox,
    profile: SessionProfile,
    state: watch::Sender<BootstrapState>,
}

impl SessionBootstrapper {
    pub fn new(service: SessionServiceBox, profile: SessionProfile) -> Self {
        let (state, _) = watch::channel(BootstrapState::Pending);
        Self {
            inner: Arc::new(Inner {
                service,
                profile,
                state,
            }),
            settle_delay: Duration::ZERO,
            retry_after: None,
        }
    }

    /// Pause after a successful bootstrap before the session is handed out.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_retry_after(mut self, retry_after: Option<Duration>) -> Self {
        self.retry_after = retry_after;
        self
    }

    pub fn state(&self) -> BootstrapState {
        BootstrapState::clone(&self.inner.state.borrow())
    }

    pub async fn get_session(&self) -> Result<Arc<Session>> {
        let start = self.inner.state.send_if_modified(|state| {
            if state.needs_attempt() {
                *state = BootstrapState::InProgress;
                true
            } else {
                false
            }
        });
        if start {
            Inner::spawn_attempt(&self.inner, self.settle_delay, self.retry_after);
        }

        let mut updates = self.inner.state.subscribe();
        let state = match updates
            .wait_for(|state| !matches!(state, BootstrapState::InProgress))
            .await
        {
            Ok(state) => BootstrapState::clone(&state),
            Err(_) => {
                return Err(GateError::Bootstrap(
                    "session bootstrapper closed".to_string(),
                ));
            }
        };

        match state {
            BootstrapState::Ready(session) => Ok(session),
            BootstrapState::Failed { reason, .. } => Err(GateError::Bootstrap(reason)),
            BootstrapState::Pending | BootstrapState::InProgress => Err(GateError::Bootstrap(
                "session bootstrap did not run".to_string(),
            )),
        }
    }
}

impl Inner {
    fn spawn_attempt(this: &Arc<Self>, settle_delay: Duration, retry_after: Option<Duration>) {
        let inner = Arc::clone(this);
        tokio::spawn(async move {
            let attempt = tokio::spawn({
                let inner = Arc::clone(&inner);
                async move { inner.bootstrap(settle_delay).await }
            });
            let outcome = attempt
                .await
                .unwrap_or_else(|e| Err(format!("bootstrap task failed: {e}")));

            let next = match outcome {
                Ok(session) => BootstrapState::Ready(session),
                Err(reason) => BootstrapState::Failed {
                    reason,
                    retry_at: retry_after.map(|after| Instant::now() + after),
                },
            };
            inner.state.send_replace(next);
        });
    }

    async fn bootstrap(&self, settle_delay: Duration) -> std::result::Result<Arc<Session>, String> {
        let external_user_id = Uuid::new_v4().to_string();
        info!(%external_user_id, "Performing one-time session bootstrap");

        let profile = self.profile.for_user(&external_user_id);
        let mut session = match self.service.create_session(&profile).await {
            Ok(session) => session,
            Err(e) => {
                let reason = match e {
                    GateError::Bootstrap(reason) => reason,
                    other => other.to_string(),
                };
                error!(%reason, "Session bootstrap failed");
                return Err(reason);
            }
        };

        if session.external_user_id.is_empty() {
            session.external_user_id = external_user_id;
        }
        if !settle_delay.is_zero() {
            tokio::time::sleep(settle_delay).await;
        }

        info!(user_uuid = %session.user_uuid, "Session bootstrapped");
        Ok(Arc::new(session))
    }
}
