//! Transport seam between the conversation core and the chat runtime.
//!
//! The core is transport-agnostic: any runtime that can deliver inbound
//! events and implement the two outbound primitives can drive it. The
//! console transport here backs local development and the demo REPL.

use async_trait::async_trait;

use crate::keyboards::Keyboard;

/// Inbound event from the chat runtime.
#[derive(Debug, Clone)]
pub enum Event {
    Command {
        name: String,
        user_id: i64,
        args: Vec<String>,
    },
    Text {
        user_id: i64,
        text: String,
    },
    Callback {
        user_id: i64,
        callback_id: String,
        payload: String,
    },
}

/// Errors from outbound delivery.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("delivery to user {user_id} failed: {reason}")]
    Delivery { user_id: i64, reason: String },
    #[error("callback answer failed: {0}")]
    CallbackAnswer(String),
}

/// Outbound primitives the chat runtime must provide.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_message(
        &self,
        user_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<(), TransportError>;

    async fn answer_callback(&self, callback_id: &str) -> Result<(), TransportError>;
}

/// Stdout-backed transport for local development.
pub struct ConsoleTransport;

#[async_trait]
impl Transport for ConsoleTransport {
    async fn send_message(
        &self,
        user_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<(), TransportError> {
        println!("→ [{user_id}] {text}");
        match keyboard {
            Some(Keyboard::Reply(rows)) => {
                for row in rows {
                    println!("   [ {} ]", row.join(" | "));
                }
            }
            Some(Keyboard::Inline(rows)) => {
                for row in rows {
                    let rendered: Vec<String> = row
                        .iter()
                        .map(|b| format!("{} (@{})", b.text, b.payload))
                        .collect();
                    println!("   [ {} ]", rendered.join(" | "));
                }
            }
            None => {}
        }
        Ok(())
    }

    async fn answer_callback(&self, _callback_id: &str) -> Result<(), TransportError> {
        Ok(())
    }
}
