use std::{fs, io::Write, path::Path};

use crate::{domain::ChatId, Result};

/// File holding the last-known operator chat id, kept next to the session's
/// own logs so a restarted run can report back without being messaged first.
const CHAT_ID_FILE: &str = "telegram_chat_id.txt";

/// Read a previously persisted chat id.
///
/// A missing, unreadable or unparsable file means "no prior identity" and is
/// never surfaced as an error.
pub fn load(log_folder: &Path) -> Option<ChatId> {
    let raw = fs::read_to_string(log_folder.join(CHAT_ID_FILE)).ok()?;
    raw.trim().parse::<i64>().ok().map(ChatId)
}

/// Persist `chat_id` as a decimal string, overwriting any previous value.
///
/// No locking: exactly one lifecycle instance writes, once, at shutdown.
pub fn save(log_folder: &Path, chat_id: ChatId) -> Result<()> {
    let mut file = fs::File::create(log_folder.join(CHAT_ID_FILE))?;
    write!(file, "{chat_id}")?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tmp_dir(prefix: &str) -> PathBuf {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = PathBuf::from(format!("/tmp/{prefix}-{}-{ts}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn round_trip_preserves_chat_id() {
        let dir = tmp_dir("sessctl-recipient");
        save(&dir, ChatId(377114917)).unwrap();

        assert_eq!(load(&dir), Some(ChatId(377114917)));
        // Byte-for-byte: the file is the plain decimal string.
        let raw = fs::read_to_string(dir.join(CHAT_ID_FILE)).unwrap();
        assert_eq!(raw, "377114917");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn save_overwrites_previous_value() {
        let dir = tmp_dir("sessctl-recipient-ow");
        save(&dir, ChatId(1)).unwrap();
        save(&dir, ChatId(-42)).unwrap();

        assert_eq!(load(&dir), Some(ChatId(-42)));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_file_is_no_prior_identity() {
        let dir = tmp_dir("sessctl-recipient-missing");
        assert_eq!(load(&dir), None);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn garbage_file_is_no_prior_identity() {
        let dir = tmp_dir("sessctl-recipient-garbage");
        fs::write(dir.join(CHAT_ID_FILE), "not a number").unwrap();
        assert_eq!(load(&dir), None);
        let _ = fs::remove_dir_all(dir);
    }
}
