use std::fs;
use std::path::Path;

use moodbot::{Language, format_with, load_all_messages};

#[test]
fn messages_dir_loads_all_known_languages() {
    // list files under messages/
    let dir = Path::new("messages");
    let mut expected = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for e in entries.flatten() {
            if let Some(fname) = e.file_name().to_str() {
                if let Some(stem) = fname.strip_suffix(".json") {
                    if let Some(lang) = Language::from_code(stem) {
                        expected.push(lang);
                    }
                }
            }
        }
    }

    let map = load_all_messages(dir);
    for lang in expected {
        assert!(map.contains_key(&lang), "messages map missing language: {}", lang.code());
    }
}

#[test]
fn missing_dir_still_yields_english() {
    let map = load_all_messages(Path::new("definitely/not/a/messages/dir"));
    assert_eq!(map.len(), 1);
    assert!(map.contains_key(&Language::En));
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let pid = std::process::id();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("moodbot_messages_{}_{}", pid, nanos));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("hi.json"), "{ \"mood_prompt\": ").unwrap();
    fs::write(dir.join("xx.json"), "{}").unwrap();

    let map = load_all_messages(&dir);
    let hi = map.get(&Language::Hi).expect("hi falls back to defaults");
    assert_eq!(hi.mood_prompt, "What's your mood today?");
    assert_eq!(map.len(), 2);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn format_with_replaces_placeholders() {
    let out = format_with("⭐ Your Favorites ({count} saved)", &[("count", "3")]);
    assert_eq!(out, "⭐ Your Favorites (3 saved)");
    assert_eq!(format_with("no {placeholders}", &[]), "no {placeholders}");
}
