use anyhow::{Result, bail};
use std::{env, fmt, path::PathBuf, time::Duration};

/// Runtime configuration (from environment with sensible defaults)
#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    // Environment variable: UNSPLASH_ACCESS_KEY. Without it images are skipped.
    pub unsplash_access_key: Option<String>,
    pub data_dir: PathBuf,
    pub messages_dir: PathBuf,
    pub fetch_timeout: Duration,
    pub translate_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field(
                "unsplash_access_key",
                &self.unsplash_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("data_dir", &self.data_dir)
            .field("messages_dir", &self.messages_dir)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("translate_timeout", &self.translate_timeout)
            .finish()
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn positive_secs<F>(lookup: &F, key: &str, default: u64) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let secs = match non_empty(lookup(key)) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(v) => v,
            Err(_) => bail!("Invalid configuration: {} ({}) must be a positive integer.", key, raw),
        },
        None => default,
    };
    if secs == 0 {
        bail!("Invalid configuration: {} must be a positive integer.", key);
    }
    Ok(Duration::from_secs(secs))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup. A missing bot token is fatal.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(bot_token) = non_empty(lookup("TELEGRAM_BOT_TOKEN")) else {
            bail!("set TELEGRAM_BOT_TOKEN env variable");
        };
        Ok(Self {
            bot_token,
            unsplash_access_key: non_empty(lookup("UNSPLASH_ACCESS_KEY")),
            data_dir: non_empty(lookup("DATA_DIR"))
                .unwrap_or_else(|| "user_data".to_string())
                .into(),
            messages_dir: non_empty(lookup("MESSAGES_DIR"))
                .unwrap_or_else(|| "messages".to_string())
                .into(),
            fetch_timeout: positive_secs(&lookup, "FETCH_TIMEOUT_SECS", 6)?,
            translate_timeout: positive_secs(&lookup, "TRANSLATE_TIMEOUT_SECS", 10)?,
        })
    }
}
