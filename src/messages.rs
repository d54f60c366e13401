use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

use crate::language::Language;

/// Messages container loaded from JSON files per language
#[derive(Clone, Debug, Deserialize)]
pub struct Messages {
    pub mood_prompt: String,
    pub mood_fun: String,
    pub mood_inspiring: String,
    pub mood_motivating: String,
    pub mood_casual: String,
    pub help: String,
    pub working: String,
    pub fetch_failed: String,
    pub surprise_prefix: String,
    pub surprise_failed: String,
    pub no_favorites: String,
    pub favorites_header: String,
    pub remove_button: String,
    pub language_prompt: String,
    pub current_language: String,
    pub language_save_failed: String,
    pub unknown_action: String,
}

/// Load a Messages struct from a given JSON file path, falling back to defaults
pub fn load_messages_file(path: &Path, lang: Language) -> Messages {
    match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
            tracing::warn!(
                "failed to parse {}: {}. Falling back to defaults.",
                path.display(),
                e
            );
            default_messages(lang)
        }),
        Err(e) => {
            tracing::warn!(
                "failed to read {}: {}. Falling back to defaults.",
                path.display(),
                e
            );
            default_messages(lang)
        }
    }
}

/// Built-in messages. Only English ships in the binary; other languages come
/// from `messages/<code>.json` or from translating these.
pub fn default_messages(_lang: Language) -> Messages {
    Messages {
        mood_prompt: "What's your mood today?".to_string(),
        mood_fun: "Fun".to_string(),
        mood_inspiring: "Inspiring".to_string(),
        mood_motivating: "Motivating".to_string(),
        mood_casual: "Casual".to_string(),
        help: "🤖 MoodBot Commands:\n\n\
               /start - Choose your mood and get personalized content\n\
               /surprise - Get completely random content (jokes, quotes, or facts)\n\
               /favorites - View and manage your saved favorites\n\
               /language - Change your language preference\n\
               /help - Show this help message\n\n\
               How it works:\n\
               • Use /start to select from mood categories (Fun, Inspiring, Motivating, Casual)\n\
               • Use /surprise for random content from any category\n\
               • Vote on content with 👍 or 👎 buttons\n\
               • Save content you love with the ⭐ favorite button\n\
               • Each mood comes with matching images from Unsplash\n\n\
               Enjoy your mood-boosting content! 🎉"
            .to_string(),
        working: "Working on it...".to_string(),
        fetch_failed: "Sorry, couldn't fetch content right now. Try again.".to_string(),
        surprise_prefix: "🎲 SURPRISE! ".to_string(),
        surprise_failed: "🎲 Surprise! Something unexpected happened - I couldn't fetch content right now. Try again!".to_string(),
        no_favorites: "⭐ You haven't saved any favorites yet!\n\nUse the ⭐ button on content you like to save it here.".to_string(),
        favorites_header: "⭐ Your Favorites ({count} saved)".to_string(),
        remove_button: "🗑️ Remove".to_string(),
        language_prompt: "🌍 Choose your preferred language / अपनी भाषा चुनें / உங்கள் மொழியைத் தேர்ந்தெடுக்கவும்:".to_string(),
        current_language: "Current language: {language}".to_string(),
        language_save_failed: "Error saving language preference".to_string(),
        unknown_action: "Unknown action".to_string(),
    }
}

/// Load every `*.json` file from `dir` whose stem is a known language code.
/// Files which fail to parse fall back to defaults for that language.
pub fn load_all_messages(dir: &Path) -> HashMap<Language, Messages> {
    let mut map = HashMap::new();
    if let Ok(entries) = dir.read_dir() {
        for entry in entries.flatten() {
            let Ok(fname) = entry.file_name().into_string() else {
                continue;
            };
            if !fname.to_lowercase().ends_with(".json") {
                continue;
            }
            let stem = &fname[..fname.len() - ".json".len()];
            match Language::from_code(stem) {
                Some(lang) => {
                    map.insert(lang, load_messages_file(&entry.path(), lang));
                }
                None => tracing::warn!("skipping unknown language file: {}", fname),
            }
        }
    }
    map.entry(Language::En)
        .or_insert_with(|| default_messages(Language::En));
    map
}

/// Simple template formatter: replace `{key}` with `value` for each pair in `pairs`.
pub fn format_with(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut s = template.to_string();
    for (k, v) in pairs {
        s = s.replace(&format!("{{{}}}", k), v);
    }
    s
}
