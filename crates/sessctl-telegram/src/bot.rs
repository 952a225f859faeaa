use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use serde::Deserialize;
use teloxide::{
    prelude::*,
    types::{AllowedUpdate, Message, UpdateKind},
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use sessctl_core::{
    command::{Command, CommandRequest, Dispatcher},
    config::{Config, ProxyConfig},
    domain::ChatId,
    messaging::MessagingPort,
    recipient, report,
    session::SessionHandle,
    Error, Result,
};

use crate::{transport, TelegramMessenger};

const POLL_TIMEOUT_SECS: u32 = 30;
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);
const STOP_GRACE: Duration = Duration::from_secs(5);

/// Telegram remote control for one automation session.
///
/// Constructed next to the worker's session handle. `start` brings the
/// listener up concurrently with the worker; `end` tears it down when the
/// run completes or is aborted. The worker never blocks on this component.
pub struct SessionRemote {
    state: Mutex<Option<RemoteState>>,
    listener: tokio::sync::Mutex<Option<Listener>>,
}

struct RemoteState {
    token: String,
    authorized_username: String,
    proxy: Option<ProxyConfig>,
    session: Arc<SessionHandle>,
    dispatcher: Arc<Dispatcher>,
    messenger: Option<Arc<TelegramMessenger>>,
}

struct Listener {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl SessionRemote {
    /// Bind the remote control to a session handle.
    ///
    /// Any recipient identity persisted by a previous run is recalled here,
    /// so the final report can reach the operator even if they never message
    /// the restarted bot.
    pub fn new(config: Config, session: Arc<SessionHandle>) -> Self {
        let initial_recipient = recipient::load(session.log_folder());
        let dispatcher = Arc::new(Dispatcher::new(
            config.authorized_username.clone(),
            session.clone(),
            initial_recipient,
        ));

        Self {
            state: Mutex::new(Some(RemoteState {
                token: config.token,
                authorized_username: config.authorized_username,
                proxy: config.proxy,
                session,
                dispatcher,
                messenger: None,
            })),
            listener: tokio::sync::Mutex::new(None),
        }
    }

    /// Start listening for operator commands.
    ///
    /// Returns `Ok(false)` without touching the transport when a required
    /// configuration value is missing; the worker carries on without remote
    /// control. The session handle itself is required by construction.
    pub async fn start(&self) -> Result<bool> {
        if self.listener.lock().await.is_some() {
            return Ok(true);
        }

        let (token, proxy, dispatcher) = {
            let state = self.state.lock().unwrap();
            let Some(state) = state.as_ref() else {
                warn!("remote control already shut down");
                return Ok(false);
            };
            if state.token.trim().is_empty() {
                warn!("token is not set; remote control disabled");
                return Ok(false);
            }
            if state.authorized_username.trim().is_empty() {
                warn!("authorized username is not set; remote control disabled");
                return Ok(false);
            }
            (
                state.token.clone(),
                state.proxy.clone(),
                state.dispatcher.clone(),
            )
        };

        let client = build_client(proxy.as_ref())?;

        // Telegram answers 409 to long polling while a webhook is set, so a
        // stale registration from another run has to go first.
        clean_webhooks(&client, &token).await;

        let bot = Bot::with_client(token, client);
        let messenger = Arc::new(TelegramMessenger::new(bot.clone()));

        {
            let mut state = self.state.lock().unwrap();
            if let Some(state) = state.as_mut() {
                state.messenger = Some(messenger.clone());
            }
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(poll_updates(bot, dispatcher, messenger, cancel.clone()));
        *self.listener.lock().await = Some(Listener { cancel, handle });

        info!("telegram remote control listening");
        Ok(true)
    }

    /// Tear the remote control down.
    ///
    /// Persists the recipient identity, delivers one final report, stops the
    /// listener with a bounded wait, and clears the credential token and
    /// session references so nothing sensitive stays reachable through this
    /// component. Safe to call more than once.
    pub async fn end(&self) {
        let state = self.state.lock().unwrap().take();
        let listener = self.listener.lock().await.take();

        if let Some(state) = state {
            if let Some(chat_id) = state.dispatcher.recipient() {
                if let Err(e) = recipient::save(state.session.log_folder(), chat_id) {
                    warn!("failed to persist recipient chat id: {e}");
                }
                if let Some(messenger) = &state.messenger {
                    let text =
                        report::compose(&state.session.counters(), state.session.run_time());
                    let _ = messenger.send_text(chat_id, &text).await;
                }
            }
        }

        if let Some(listener) = listener {
            listener.cancel.cancel();
            let mut handle = listener.handle;
            if tokio::time::timeout(STOP_GRACE, &mut handle).await.is_err() {
                // Long poll still in flight; don't hang process exit on it.
                handle.abort();
            }
            info!("telegram remote control stopped");
        }
    }
}

fn build_client(proxy: Option<&ProxyConfig>) -> Result<reqwest::Client> {
    let mut builder = teloxide::net::default_reqwest_settings();

    if let Some(proxy) = proxy {
        let mut p = reqwest::Proxy::all(proxy.proxy_url.as_str())
            .map_err(|e| Error::Config(format!("invalid proxy url: {e}")))?;
        if let (Some(user), Some(pass)) = (&proxy.username, &proxy.password) {
            p = p.basic_auth(user, pass);
        }
        builder = builder.proxy(p);
    }

    builder
        .build()
        .map_err(|e| Error::External(format!("failed to build http client: {e}")))
}

#[derive(Debug, Deserialize)]
struct ApiStatus {
    ok: bool,
}

/// Drop any webhook registration left behind by a previous run.
async fn clean_webhooks(client: &reqwest::Client, token: &str) {
    let url = format!("https://api.telegram.org/bot{token}/deleteWebhook");
    let status = match client.get(&url).send().await {
        Ok(resp) => resp.json::<ApiStatus>().await,
        Err(e) => Err(e),
    };

    match status {
        Ok(ApiStatus { ok: true }) => debug!("webhook cleared"),
        Ok(ApiStatus { ok: false }) => warn!("unable to remove webhook, wrong token?"),
        Err(e) => warn!("unable to remove webhook: {e}"),
    }
}

async fn poll_updates(
    bot: Bot,
    dispatcher: Arc<Dispatcher>,
    messenger: Arc<TelegramMessenger>,
    cancel: CancellationToken,
) {
    let mut offset: i32 = 0;
    info!("starting telegram polling loop");

    loop {
        if cancel.is_cancelled() {
            info!("telegram polling stopped");
            break;
        }

        let result = bot
            .get_updates()
            .offset(offset)
            .timeout(POLL_TIMEOUT_SECS)
            .allowed_updates(vec![AllowedUpdate::Message])
            .await;

        let updates = match result {
            Ok(updates) => updates,
            Err(e) => {
                transport::log_error("get_updates", &e);
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(POLL_ERROR_BACKOFF) => {}
                }
                continue;
            }
        };

        for update in updates {
            offset = update.id + 1;
            let UpdateKind::Message(msg) = update.kind else {
                continue;
            };
            let Some(request) = command_request(&msg) else {
                // Plain text and non-command updates are not routed.
                continue;
            };
            if let Err(e) = dispatcher.dispatch(messenger.as_ref(), request).await {
                debug!("command handling failed: {e}");
            }
        }
    }
}

fn command_request(msg: &Message) -> Option<CommandRequest> {
    let name = parse_command(msg.text()?)?;
    Some(CommandRequest {
        command: Command::parse(&name),
        chat_id: ChatId(msg.chat.id.0),
        username: msg.from().and_then(|u| u.username.clone()),
    })
}

/// Extract the bare command name from `/name@botname args…`.
///
/// Returns `None` for anything that is not a command message.
fn parse_command(text: &str) -> Option<String> {
    let first = text.trim().split_whitespace().next().unwrap_or("");
    let name = first.strip_prefix('/')?;
    let name = name.split('@').next().unwrap_or("").to_lowercase();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
