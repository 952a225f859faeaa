use std::{sync::Arc, time::Duration};

use tracing::{info, warn};

use sessctl_core::{config::Config, session::SessionHandle};
use sessctl_telegram::bot::SessionRemote;

/// How often the worker loop checks its abort flag.
const ABORT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sessctl_core::logging::init("sessctl");

    let cfg = Config::from_env();
    std::fs::create_dir_all(&cfg.session_log_folder)?;

    let session = Arc::new(SessionHandle::new(cfg.session_log_folder.clone()));
    let remote = SessionRemote::new(cfg, session.clone());

    match remote.start().await {
        Ok(true) => {}
        Ok(false) => {
            info!("remote control disabled, nothing to do");
            return Ok(());
        }
        Err(e) => {
            warn!("remote control failed to start: {e}");
            return Ok(());
        }
    }

    // The automation run lives here in a real embedding. This shell only
    // waits at the loop checkpoint where a worker would poll for a
    // requested abort.
    while !session.abort_requested() {
        tokio::time::sleep(ABORT_POLL_INTERVAL).await;
    }

    info!("abort requested, shutting down");
    remote.end().await;
    Ok(())
}
