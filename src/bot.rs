use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::config::Config;
use crate::keyboards::Keyboard;
use crate::messages::Messages;
use crate::session::SessionMap;
use crate::slots::SlotPolicy;
use crate::store::RecordStore;
use crate::transport::Transport;

/// Conversation core: record store, localization table, slot policy and the
/// in-flight booking sessions, wired to an outbound transport.
pub struct Bot {
    pub store: RecordStore,
    pub messages: Messages,
    pub slots: SlotPolicy,
    pub sessions: SessionMap,
    pub transport: Arc<dyn Transport>,
}

impl Bot {
    /// Create a new bot from configuration and a transport.
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> std::io::Result<Self> {
        let store = RecordStore::open(&config.data_dir)?;
        let messages = match &config.messages_file {
            Some(path) => Messages::load(path),
            None => Messages::builtin(),
        };
        Ok(Self {
            store,
            messages,
            slots: config.slot_policy(),
            sessions: SessionMap::new(),
            transport,
        })
    }

    /// Deliver a reply, logging delivery failures instead of propagating
    /// them. Every handler replies through this.
    pub(crate) async fn send(
        &self,
        req: Uuid,
        user_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) {
        if let Err(e) = self.transport.send_message(user_id, text, keyboard).await {
            error!(request_id = %req, user_id, error = %e, "failed to deliver reply");
        }
    }
}
