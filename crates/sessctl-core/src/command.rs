use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::{
    domain::ChatId, messaging::MessagingPort, report, security::is_authorized,
    session::SessionHandle, Result,
};

/// The closed set of commands the bot understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Report,
    Stop,
    /// Any other `/command`. Plain text is not routed here at all.
    Unknown,
}

impl Command {
    /// Map a bare command name (no leading slash, no `@botname`) onto the
    /// closed set.
    pub fn parse(name: &str) -> Self {
        match name {
            "start" => Self::Start,
            "report" => Self::Report,
            "stop" => Self::Stop,
            _ => Self::Unknown,
        }
    }
}

/// One inbound command: what was asked, who asked, where to reply.
#[derive(Clone, Debug)]
pub struct CommandRequest {
    pub command: Command,
    pub chat_id: ChatId,
    pub username: Option<String>,
}

pub const WELCOME_TEXT: &str = "I am your session control bot\n\
     Recognized actions are:\n\
       - /start (this command)\n\
       - /report (a live report from the session)\n\
       - /stop (force stop the session)";

pub const NOT_AUTHORIZED_TEXT: &str = "You are not authorized to use this service";
pub const ABORT_SET_TEXT: &str = "Session abort set";
pub const UNKNOWN_TEXT: &str = "Sorry I don't understand that command";

/// Routes inbound commands to their effects.
///
/// Owns the in-memory recipient slot: every inbound command records its chat
/// id there before the authorization gate runs, so even rejected senders
/// update who we last heard from. The gate itself always compares against
/// the configured username, never against this slot.
pub struct Dispatcher {
    authorized_username: String,
    session: Arc<SessionHandle>,
    recipient: Mutex<Option<ChatId>>,
}

impl Dispatcher {
    pub fn new(
        authorized_username: impl Into<String>,
        session: Arc<SessionHandle>,
        initial_recipient: Option<ChatId>,
    ) -> Self {
        Self {
            authorized_username: authorized_username.into(),
            session,
            recipient: Mutex::new(initial_recipient),
        }
    }

    /// Last conversation heard from, or the one loaded from a previous run.
    pub fn recipient(&self) -> Option<ChatId> {
        *self.recipient.lock().unwrap()
    }

    pub async fn dispatch(
        &self,
        messenger: &dyn MessagingPort,
        request: CommandRequest,
    ) -> Result<()> {
        *self.recipient.lock().unwrap() = Some(request.chat_id);

        if !is_authorized(request.username.as_deref(), &self.authorized_username) {
            warn!(
                username = request.username.as_deref().unwrap_or("<none>"),
                chat_id = request.chat_id.0,
                "unauthorized access"
            );
            return messenger
                .send_text(request.chat_id, NOT_AUTHORIZED_TEXT)
                .await;
        }

        match request.command {
            Command::Start => messenger.send_text(request.chat_id, WELCOME_TEXT).await,
            Command::Report => {
                let text = report::compose(&self.session.counters(), self.session.run_time());
                messenger.send_text(request.chat_id, &text).await
            }
            Command::Stop => {
                self.session.request_abort();
                messenger.send_text(request.chat_id, ABORT_SET_TEXT).await
            }
            Command::Unknown => messenger.send_text(request.chat_id, UNKNOWN_TEXT).await,
        }
    }
}
