//! Terminal notifications

use keepstreak_core::{NotificationPermission, Notifier};
use tracing::debug;

/// Writes notifications to stderr.
///
/// A terminal can always show text, so permission is granted on request.
pub struct TerminalNotifier {
    permission: NotificationPermission,
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self {
            permission: NotificationPermission::Granted,
        }
    }
}

impl Notifier for TerminalNotifier {
    fn permission(&self) -> NotificationPermission {
        self.permission
    }

    fn request_permission(&mut self) -> NotificationPermission {
        self.permission = NotificationPermission::Granted;
        self.permission
    }

    fn notify(&self, title: &str, body: &str) {
        debug!(title, "Sending notification");
        eprintln!("🔔 {}: {}", title, body);
    }
}
