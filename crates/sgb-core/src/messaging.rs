use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    Result,
};

/// Outbound messaging port.
///
/// Telegram is the only implementation today; the core drives it through this
/// trait so the caption flows can be tested against a recording mock.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef>;

    /// Send in-memory JPEG bytes as a photo.
    async fn send_photo(&self, chat_id: ChatId, jpeg: Vec<u8>) -> Result<MessageRef>;

    async fn delete_message(&self, msg: MessageRef) -> Result<()>;
}
