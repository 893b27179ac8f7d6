use crate::domain::model::{Notification, NotificationPhase, Severity};
use crate::domain::ports::{NotificationPresenter, Notifier};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTimings {
    /// Delay before a created notification becomes visible.
    pub entry_delay: Duration,
    /// How long it stays visible.
    pub display_duration: Duration,
    /// Delay between dismissal and removal from the active set.
    pub exit_duration: Duration,
}

impl Default for NotificationTimings {
    fn default() -> Self {
        Self {
            entry_delay: Duration::from_millis(100),
            display_duration: Duration::from_millis(3000),
            exit_duration: Duration::from_millis(300),
        }
    }
}

impl NotificationTimings {
    pub fn total(&self) -> Duration {
        self.entry_delay + self.display_duration + self.exit_duration
    }
}

/// Timed, self-dismissing notifications.
///
/// Each notification runs its own timer task on the tokio runtime; notifications
/// never interact with or cancel each other. Cloning shares the active set.
#[derive(Clone)]
pub struct NotificationService {
    inner: Arc<Inner>,
}

struct Inner {
    timings: NotificationTimings,
    runtime: Option<Handle>,
    next_id: AtomicU64,
    active: Mutex<Vec<Notification>>,
    presenter: Option<Arc<dyn NotificationPresenter>>,
}

impl NotificationService {
    /// Uses the runtime of the calling context, if there is one.
    pub fn new(timings: NotificationTimings) -> Self {
        Self::build(timings, Handle::try_current().ok(), None)
    }

    pub fn with_runtime(timings: NotificationTimings, runtime: Handle) -> Self {
        Self::build(timings, Some(runtime), None)
    }

    pub fn with_presenter(self, presenter: Arc<dyn NotificationPresenter>) -> Self {
        Self::build(self.inner.timings, self.inner.runtime.clone(), Some(presenter))
    }

    fn build(
        timings: NotificationTimings,
        runtime: Option<Handle>,
        presenter: Option<Arc<dyn NotificationPresenter>>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                timings,
                runtime,
                next_id: AtomicU64::new(1),
                active: Mutex::new(Vec::new()),
                presenter,
            }),
        }
    }

    pub fn timings(&self) -> NotificationTimings {
        self.inner.timings
    }

    /// Starts a notification's lifecycle and returns its id.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let notification = Notification {
            id,
            message: message.into(),
            severity,
            created_at: Utc::now(),
            phase: NotificationPhase::Created,
        };
        tracing::debug!(id, %severity, message = %notification.message, "notification created");

        self.inner.lock_active().push(notification.clone());
        self.inner.present(&notification);

        match &self.inner.runtime {
            Some(runtime) => {
                runtime.spawn(Inner::run_lifecycle(Arc::clone(&self.inner), id));
            }
            None => {
                tracing::warn!(id, "no runtime for notification timers, dismissing immediately");
                self.inner.transition(id, NotificationPhase::Dismissed);
                self.inner.remove(id);
            }
        }
        id
    }

    /// Notifications that have not finished their exit delay yet.
    pub fn active(&self) -> Vec<Notification> {
        self.inner.lock_active().clone()
    }

    pub fn phase_of(&self, id: u64) -> Option<NotificationPhase> {
        self.inner
            .lock_active()
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.phase)
    }
}

impl Notifier for NotificationService {
    fn show(&self, message: &str, severity: Severity) {
        self.notify(message, severity);
    }
}

impl Inner {
    async fn run_lifecycle(inner: Arc<Inner>, id: u64) {
        let timings = inner.timings;

        tokio::time::sleep(timings.entry_delay).await;
        inner.transition(id, NotificationPhase::Visible);

        tokio::time::sleep(timings.display_duration).await;
        inner.transition(id, NotificationPhase::Dismissed);

        tokio::time::sleep(timings.exit_duration).await;
        inner.remove(id);
    }

    fn lock_active(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, id: u64, phase: NotificationPhase) {
        let updated = {
            let mut active = self.lock_active();
            active.iter_mut().find(|n| n.id == id).map(|n| {
                n.phase = phase;
                n.clone()
            })
        };
        if let Some(notification) = updated {
            tracing::debug!(id, ?phase, "notification transition");
            self.present(&notification);
        }
    }

    fn remove(&self, id: u64) {
        self.lock_active().retain(|n| n.id != id);
        tracing::debug!(id, "notification removed");
    }

    fn present(&self, notification: &Notification) {
        if let Some(presenter) = &self.presenter {
            presenter.present(notification);
        }
    }
}
