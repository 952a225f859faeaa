use teloxide::{ApiError, RequestError};
use tracing::warn;

/// Coarse classification of transport failures.
///
/// Every failure the transport can produce maps onto exactly one kind, and
/// each occurrence is logged once under that kind and then dropped: the
/// listener never dies on a transport error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    BadRequest,
    TimedOut,
    Network,
    ChatMigrated,
    Other,
}

pub fn classify(error: &RequestError) -> ErrorKind {
    match error {
        RequestError::Api(ApiError::NotFound) => ErrorKind::Unauthorized,
        RequestError::Api(_) => ErrorKind::BadRequest,
        RequestError::MigrateToChatId(_) => ErrorKind::ChatMigrated,
        RequestError::Network(e) if e.is_timeout() => ErrorKind::TimedOut,
        RequestError::Network(_) => ErrorKind::Network,
        RequestError::Io(_) => ErrorKind::Network,
        _ => ErrorKind::Other,
    }
}

/// Log a transport failure with its classification and originating context.
pub fn log_error(context: &str, error: &RequestError) {
    warn!(kind = ?classify(error), context, "telegram error: {error}");
}
