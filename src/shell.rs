//! The seam between the gate/pipeline logic and whatever surface presents
//! it. Notices, navigation and the delayed post-invalidation redirect are
//! all routed through the `Shell` trait so they can be asserted in tests
//! without a real clock or UI.

use std::sync::Mutex;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::routes::Route;

/// How prominently a notice should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// The navigation/notification surface. Implementations must be cheap to
/// call; none of these operations may fail visibly.
pub trait Shell: Send + Sync {
    /// Show a one-time user-visible notice.
    fn notify(&self, severity: Severity, message: &str);

    /// Move the user to a route immediately.
    fn navigate(&self, route: Route);

    /// Move the user to a route after a delay (used so an explanatory
    /// notice can be read first). Not cancellable once scheduled; scheduling
    /// twice is harmless.
    fn schedule_redirect(&self, route: Route, delay: Duration);
}

/// Shell for the headless binary: notices go to the log, navigation is
/// recorded as the route the embedding UI should show, and delayed
/// redirects really are delayed tasks.
#[derive(Default)]
pub struct ConsoleShell;

impl ConsoleShell {
    pub fn new() -> Self {
        ConsoleShell
    }
}

impl Shell for ConsoleShell {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Success | Severity::Info => info!(notice = message, "notice"),
            Severity::Warning => warn!(notice = message, "notice"),
            Severity::Error => error!(notice = message, "notice"),
        }
    }

    fn navigate(&self, route: Route) {
        info!(path = route.path(), "navigate");
    }

    fn schedule_redirect(&self, route: Route, delay: Duration) {
        info!(path = route.path(), delay_ms = delay.as_millis() as u64, "redirect scheduled");
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            info!(path = route.path(), "navigate");
        });
    }
}

/// One observed shell effect, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    Notice(Severity, String),
    Navigate(Route),
    RedirectScheduled(Route, Duration),
}

/// A shell that records every effect instead of performing it, for
/// deterministic assertions in tests.
#[derive(Default)]
pub struct RecordingShell {
    events: Mutex<Vec<ShellEvent>>,
}

impl RecordingShell {
    pub fn new() -> Self {
        RecordingShell::default()
    }

    pub fn events(&self) -> Vec<ShellEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<(Severity, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ShellEvent::Notice(severity, message) => Some((severity, message)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl Shell for RecordingShell {
    fn notify(&self, severity: Severity, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(ShellEvent::Notice(severity, message.to_string()));
    }

    fn navigate(&self, route: Route) {
        self.events.lock().unwrap().push(ShellEvent::Navigate(route));
    }

    fn schedule_redirect(&self, route: Route, delay: Duration) {
        self.events
            .lock()
            .unwrap()
            .push(ShellEvent::RedirectScheduled(route, delay));
    }
}
