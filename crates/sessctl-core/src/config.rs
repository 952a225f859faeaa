use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Typed configuration for the remote-control bot.
///
/// Construction never fails: required values are checked when the bot is
/// started, so a misconfigured bot degrades to "no remote control" instead
/// of taking the worker down with it.
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub token: String,
    pub authorized_username: String,
    pub proxy: Option<ProxyConfig>,
    pub session_log_folder: PathBuf,
}

/// Optional network proxy for the transport client.
#[derive(Clone, Debug)]
pub struct ProxyConfig {
    pub proxy_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        load_dotenv_if_present(Path::new(".env"));

        let token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        let authorized_username = env_str("TELEGRAM_AUTHORIZED_USERNAME").unwrap_or_default();

        let proxy = env_str("PROXY_URL")
            .and_then(non_empty)
            .map(|proxy_url| ProxyConfig {
                proxy_url,
                username: env_str("PROXY_USERNAME").and_then(non_empty),
                password: env_str("PROXY_PASSWORD").and_then(non_empty),
            });

        let session_log_folder =
            env_path("SESSION_LOG_FOLDER").unwrap_or_else(|| PathBuf::from("/tmp/sessctl"));

        Self {
            token,
            authorized_username,
            proxy,
            session_log_folder,
        }
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).map(PathBuf::from)
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_env_file(lines: &str) -> PathBuf {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let path = PathBuf::from(format!("/tmp/sessctl-env-{}-{ts}", std::process::id()));
        fs::write(&path, lines).unwrap();
        path
    }

    #[test]
    fn dotenv_strips_quotes_and_skips_comments() {
        let path = tmp_env_file(
            "# comment\nSESSCTL_TEST_QUOTED=\"hello world\"\nSESSCTL_TEST_PLAIN=plain\n",
        );
        load_dotenv_if_present(&path);

        assert_eq!(env::var("SESSCTL_TEST_QUOTED").unwrap(), "hello world");
        assert_eq!(env::var("SESSCTL_TEST_PLAIN").unwrap(), "plain");

        let _ = fs::remove_file(path);
    }

    #[test]
    fn dotenv_does_not_override_existing_env() {
        env::set_var("SESSCTL_TEST_EXISTING", "from-env");
        let path = tmp_env_file("SESSCTL_TEST_EXISTING=from-file\n");
        load_dotenv_if_present(&path);

        assert_eq!(env::var("SESSCTL_TEST_EXISTING").unwrap(), "from-env");

        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_dotenv_is_ignored() {
        load_dotenv_if_present(Path::new("/tmp/sessctl-does-not-exist.env"));
    }
}
