/// Core error type for the bot.
///
/// The adapter crate maps transport-specific failures into this type so the
/// core can handle them uniformly. Nothing in here is ever fatal to the
/// worker process; the worst case is degraded or absent remote control.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
