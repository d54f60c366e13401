use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use tokio::sync::RwLock;

use crate::{
    error::StoreError,
    persist::{load_json, save_json},
};

pub const PREFERENCES_FILE: &str = "language_preferences.json";

/// Supported languages
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Ta,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Hi, Language::Ta];

    /// Parse a short language tag (e.g. "hi") into `Language`.
    pub fn from_code(s: &str) -> Option<Language> {
        match s.to_lowercase().as_str() {
            "en" => Some(Language::En),
            "hi" => Some(Language::Hi),
            "ta" => Some(Language::Ta),
            _ => None,
        }
    }

    /// Return the short tag for a Language variant (e.g. Language::En -> "en").
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Ta => "ta",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English 🇺🇸",
            Language::Hi => "हिंदी 🇮🇳",
            Language::Ta => "தமிழ் 🇮🇳",
        }
    }

    /// Confirmation shown after switching, written in the new language.
    pub fn confirmation(self) -> &'static str {
        match self {
            Language::En => "✅ Language set to English!",
            Language::Hi => "✅ भाषा हिंदी में सेट की गई!",
            Language::Ta => "✅ மொழி தமிழில் அமைக்கப்பட்டது!",
        }
    }
}

/// Fixed set of selectable languages with their display labels.
pub fn supported_languages() -> Vec<(Language, &'static str)> {
    Language::ALL.iter().map(|&l| (l, l.label())).collect()
}

/// One row of `language_preferences.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePreference {
    pub user_id: i64,
    pub language: Language,
}

/// Per-user language preference, mirrored to a single shared file.
pub struct LanguageStore {
    path: PathBuf,
    preferences: RwLock<HashMap<i64, Language>>,
}

impl LanguageStore {
    /// Open the store under `data_dir`, loading any existing preferences file.
    pub fn open(data_dir: &Path) -> Self {
        if let Err(e) = fs::create_dir_all(data_dir) {
            tracing::warn!("could not create data dir {}: {}", data_dir.display(), e);
        }
        let path = data_dir.join(PREFERENCES_FILE);
        let rows: Vec<LanguagePreference> = load_json(&path);
        let preferences = rows.into_iter().map(|p| (p.user_id, p.language)).collect();
        Self {
            path,
            preferences: RwLock::new(preferences),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store `language` for `user_id` and rewrite the preferences file. A write
    /// failure is returned but the in-memory value is kept.
    pub async fn set(&self, user_id: i64, language: Language) -> Result<(), StoreError> {
        let mut lock = self.preferences.write().await;
        lock.insert(user_id, language);

        let mut rows: Vec<LanguagePreference> = lock
            .iter()
            .map(|(&user_id, &language)| LanguagePreference { user_id, language })
            .collect();
        rows.sort_by_key(|p| p.user_id);
        save_json(&self.path, &rows).inspect_err(|e| {
            tracing::error!("error saving language preferences: {}", e);
        })
    }

    /// Stored language for `user_id`, English when none was chosen.
    pub async fn get(&self, user_id: i64) -> Language {
        self.preferences
            .read()
            .await
            .get(&user_id)
            .copied()
            .unwrap_or_default()
    }
}
