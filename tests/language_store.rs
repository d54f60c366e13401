use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use moodbot::language::{LanguagePreference, PREFERENCES_FILE};
use moodbot::{Language, LanguageStore, supported_languages};

fn temp_data_dir(name: &str) -> PathBuf {
    let pid = std::process::id();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("moodbot_{}_{}_{}", name, pid, nanos));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[tokio::test]
async fn unset_user_defaults_to_english() {
    let dir = temp_data_dir("lang_default");
    let store = LanguageStore::open(&dir);
    assert_eq!(store.get(7).await, Language::En);
    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn last_write_wins_and_survives_reload() {
    let dir = temp_data_dir("lang_reload");
    {
        let store = LanguageStore::open(&dir);
        store.set(42, Language::Hi).await.unwrap();
        store.set(42, Language::Ta).await.unwrap();
        store.set(7, Language::Hi).await.unwrap();
        assert_eq!(store.get(42).await, Language::Ta);
    }

    // simulate restart
    let reloaded = LanguageStore::open(&dir);
    assert_eq!(reloaded.get(42).await, Language::Ta);
    assert_eq!(reloaded.get(7).await, Language::Hi);
    assert_eq!(reloaded.get(1).await, Language::En);

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn file_is_an_array_of_user_language_rows() {
    let dir = temp_data_dir("lang_format");
    let store = LanguageStore::open(&dir);
    store.set(2, Language::Ta).await.unwrap();
    store.set(1, Language::En).await.unwrap();

    let raw = fs::read_to_string(dir.join(PREFERENCES_FILE)).unwrap();
    let rows: Vec<LanguagePreference> = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        rows,
        vec![
            LanguagePreference { user_id: 1, language: Language::En },
            LanguagePreference { user_id: 2, language: Language::Ta },
        ]
    );
    assert!(raw.contains("\"language\": \"ta\""), "raw was: {}", raw);

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn malformed_file_starts_empty() {
    let dir = temp_data_dir("lang_malformed");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(PREFERENCES_FILE), "[{\"user_id\": 1, \"language\":").unwrap();

    let store = LanguageStore::open(&dir);
    assert_eq!(store.get(1).await, Language::En);

    // the next write replaces the bad file
    store.set(1, Language::Hi).await.unwrap();
    let reloaded = LanguageStore::open(&dir);
    assert_eq!(reloaded.get(1).await, Language::Hi);

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn failed_write_keeps_in_memory_value() {
    let dir = temp_data_dir("lang_write_fail");
    let store = LanguageStore::open(&dir);
    // a directory where the file should be makes the rename fail
    fs::create_dir_all(store.path()).unwrap();

    assert!(store.set(5, Language::Ta).await.is_err());
    assert_eq!(store.get(5).await, Language::Ta);

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn concurrent_sets_for_distinct_users_all_land() {
    let dir = temp_data_dir("lang_concurrent");
    let store = Arc::new(LanguageStore::open(&dir));

    let mut handles = Vec::new();
    for user in 0..20i64 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let lang = if user % 2 == 0 { Language::Hi } else { Language::Ta };
            store.set(user, lang).await.unwrap();
        }));
    }
    for h in handles {
        h.await.unwrap();
    }

    let reloaded = LanguageStore::open(&dir);
    for user in 0..20i64 {
        let expected = if user % 2 == 0 { Language::Hi } else { Language::Ta };
        assert_eq!(reloaded.get(user).await, expected, "user {}", user);
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn supported_languages_has_three_labelled_entries() {
    let langs = supported_languages();
    assert_eq!(langs.len(), 3);
    let codes: Vec<&str> = langs.iter().map(|(l, _)| l.code()).collect();
    assert_eq!(codes, vec!["en", "hi", "ta"]);
    assert!(langs.iter().all(|(_, label)| !label.trim().is_empty()));
}

#[test]
fn parses_only_known_codes() {
    assert_eq!(Language::from_code("hi"), Some(Language::Hi));
    assert_eq!(Language::from_code("TA"), Some(Language::Ta));
    assert_eq!(Language::from_code("it"), None);
}
