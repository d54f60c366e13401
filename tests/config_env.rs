use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use moodbot::Config;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_when_only_token_is_set() {
    let cfg = Config::from_vars(lookup(&[("TELEGRAM_BOT_TOKEN", "123:abc")])).unwrap();
    assert_eq!(cfg.bot_token, "123:abc");
    assert_eq!(cfg.unsplash_access_key, None);
    assert_eq!(cfg.data_dir, PathBuf::from("user_data"));
    assert_eq!(cfg.messages_dir, PathBuf::from("messages"));
    assert_eq!(cfg.fetch_timeout, Duration::from_secs(6));
    assert_eq!(cfg.translate_timeout, Duration::from_secs(10));
}

#[test]
fn missing_or_blank_token_is_fatal() {
    assert!(Config::from_vars(lookup(&[])).is_err());
    let err = Config::from_vars(lookup(&[("TELEGRAM_BOT_TOKEN", "  ")])).unwrap_err();
    assert!(err.to_string().contains("TELEGRAM_BOT_TOKEN"), "err: {}", err);
}

#[test]
fn overrides_are_read() {
    let cfg = Config::from_vars(lookup(&[
        ("TELEGRAM_BOT_TOKEN", "t"),
        ("UNSPLASH_ACCESS_KEY", "key"),
        ("DATA_DIR", "/var/lib/moodbot"),
        ("FETCH_TIMEOUT_SECS", "5"),
        ("TRANSLATE_TIMEOUT_SECS", "8"),
    ]))
    .unwrap();
    assert_eq!(cfg.unsplash_access_key.as_deref(), Some("key"));
    assert_eq!(cfg.data_dir, PathBuf::from("/var/lib/moodbot"));
    assert_eq!(cfg.fetch_timeout, Duration::from_secs(5));
    assert_eq!(cfg.translate_timeout, Duration::from_secs(8));
}

#[test]
fn zero_or_garbage_timeouts_are_rejected() {
    assert!(Config::from_vars(lookup(&[("TELEGRAM_BOT_TOKEN", "t"), ("FETCH_TIMEOUT_SECS", "0")])).is_err());
    assert!(
        Config::from_vars(lookup(&[("TELEGRAM_BOT_TOKEN", "t"), ("TRANSLATE_TIMEOUT_SECS", "soon")]))
            .is_err()
    );
}

#[test]
fn debug_output_hides_secrets() {
    let cfg = Config::from_vars(lookup(&[
        ("TELEGRAM_BOT_TOKEN", "123:supersecret"),
        ("UNSPLASH_ACCESS_KEY", "unsplash-secret"),
    ]))
    .unwrap();
    let shown = format!("{:?}", cfg);
    assert!(!shown.contains("supersecret"), "debug was: {}", shown);
    assert!(!shown.contains("unsplash-secret"), "debug was: {}", shown);
}
