//! Best-effort operator alerting.
//!
//! Fan-out of a message to the configured admin allow list. A failure to
//! reach one admin never blocks the rest, and no failure here is allowed to
//! escape into the user-facing flow that triggered the alert.

use tracing::{error, info, warn};

use crate::store::RecordStore;
use crate::transport::Transport;

/// Deliver an operator alert to every configured admin independently.
/// No retry, no backoff. An empty allow list is a logged no-op.
pub async fn notify_admins(store: &RecordStore, transport: &dyn Transport, message: &str) {
    let admins = match store.try_admins() {
        Ok(admins) => admins,
        Err(e) => {
            error!(error = %e, "cannot load admin allow list, dropping notification");
            return;
        }
    };
    if admins.is_empty() {
        warn!("no admins configured, dropping notification");
        return;
    }

    for admin_id in admins {
        match transport.send_message(admin_id, message, None).await {
            Ok(()) => info!(admin_id, "admin notified"),
            Err(e) => error!(admin_id, error = %e, "failed to notify admin"),
        }
    }
}
