//! Telegram adapter (teloxide).
//!
//! Implements the core `MessagingPort` over the Telegram Bot API and owns
//! the bot lifecycle: webhook cleanup, the polling loop and graceful
//! shutdown.

use async_trait::async_trait;
use teloxide::prelude::*;
use tokio::time::sleep;

pub mod bot;
pub mod transport;

use sessctl_core::{domain::ChatId, errors::Error, messaging::MessagingPort, Result};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()> {
        // One retry on flood control; everything else is classified, logged
        // and surfaced to the (best-effort) call site.
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match self
                .bot
                .send_message(Self::tg_chat(chat_id), text.to_string())
                .await
            {
                Ok(_) => return Ok(()),
                Err(teloxide::RequestError::RetryAfter(d)) if attempts < MAX_RETRIES => {
                    attempts += 1;
                    sleep(d).await;
                }
                Err(e) => {
                    transport::log_error("send_message", &e);
                    return Err(Error::External(format!("telegram error: {e}")));
                }
            }
        }
    }
}
