//! Capabilities the hosting shell provides to views: navigation and toasts.

/// Moves the shell to another view (e.g. `/product/{slug}`).
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Shows a transient notification.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
}

/// Default navigator for headless use: records the request in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, path: &str) {
        tracing::info!(path, "navigate");
    }
}

/// Default notifier for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(message, "notification");
    }
}
