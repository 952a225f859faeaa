use async_trait::async_trait;

use crate::{domain::ChatId, Result};

/// Outbound side of the transport.
///
/// The dispatcher only ever sends plain text to a conversation, so the port
/// is a single operation. Telegram is the first implementation; the shape
/// leaves room for other messengers behind the same interface.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()>;
}
