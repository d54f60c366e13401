use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use tokio::sync::RwLock;

use crate::persist::{load_json, now_unix, save_json};

pub const FAVORITE_PREFIX: &str = "favorite_";
pub const FAVORITE_ADD: &str = "favorite_add";
pub const FAVORITE_REMOVE_PREFIX: &str = "favorite_remove_";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    Quote,
    Joke,
    Fact,
    Image,
    #[default]
    General,
}

/// A saved piece of content, as stored in `user_<id>_favorites.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: FavoriteKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub punchline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub saved_at: i64,
}

/// Fields supplied when saving a favorite; id and timestamp are assigned by the store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewFavorite {
    pub kind: FavoriteKind,
    pub content: String,
    pub author: Option<String>,
    pub setup: Option<String>,
    pub punchline: Option<String>,
    pub image_url: Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.is_empty())
}

/// Rebuild a structured favorite from the text of a sent message.
///
/// An em-dash marks a quote attribution; a blank line splits a joke into setup
/// and punchline unless the message is a surprise; anything else is a fact.
/// Multi-paragraph or ambiguous text is not handled any better than that.
pub fn classify_text(text: &str) -> NewFavorite {
    if let Some((content, author)) = text.split_once('—') {
        return NewFavorite {
            kind: FavoriteKind::Quote,
            content: content.trim().to_string(),
            author: Some(author.trim().to_string()),
            ..Default::default()
        };
    }
    if !text.contains("SURPRISE") {
        if let Some((setup, punchline)) = text.split_once("\n\n") {
            let setup = setup.trim().to_string();
            let punchline = punchline.trim().to_string();
            return NewFavorite {
                kind: FavoriteKind::Joke,
                content: format!("{} {}", setup, punchline),
                setup: Some(setup),
                punchline: Some(punchline),
                ..Default::default()
            };
        }
    }
    NewFavorite {
        kind: FavoriteKind::Fact,
        content: text.to_string(),
        ..Default::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FavoriteAction {
    Add,
    Remove(String),
}

/// Whether a callback payload is a favorite action.
pub fn is_favorite_marker(data: &str) -> bool {
    data.len() > FAVORITE_PREFIX.len() && data.starts_with(FAVORITE_PREFIX)
}

pub fn parse_favorite_payload(data: &str) -> Option<FavoriteAction> {
    if data == FAVORITE_ADD {
        return Some(FavoriteAction::Add);
    }
    match data.strip_prefix(FAVORITE_REMOVE_PREFIX) {
        Some(id) if !id.is_empty() => Some(FavoriteAction::Remove(id.to_string())),
        _ => None,
    }
}

pub fn remove_payload(favorite_id: &str) -> String {
    format!("{}{}", FAVORITE_REMOVE_PREFIX, favorite_id)
}

/// 8 lowercase hex characters from 4 random bytes.
fn generate_id() -> String {
    let bytes: [u8; 4] = rand::random();
    hex::encode(bytes)
}

/// Per-user favorites, one JSON file per user, cached in memory on first use.
///
/// One lock covers the whole cache, so operations for different users
/// serialize against each other even though their files are independent.
/// Cache entries are never evicted.
pub struct FavoriteStore {
    data_dir: PathBuf,
    cache: RwLock<HashMap<i64, Vec<Favorite>>>,
}

impl FavoriteStore {
    pub fn open(data_dir: &Path) -> Self {
        if let Err(e) = fs::create_dir_all(data_dir) {
            tracing::warn!("could not create data dir {}: {}", data_dir.display(), e);
        }
        Self {
            data_dir: data_dir.to_path_buf(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn user_file(&self, user_id: i64) -> PathBuf {
        self.data_dir
            .join(format!("user_{}_favorites.json", user_id))
    }

    fn load_user(&self, user_id: i64) -> Vec<Favorite> {
        tracing::debug!("loading favorites for user {}", user_id);
        load_json(&self.user_file(user_id))
    }

    fn persist(&self, user_id: i64, list: &[Favorite]) {
        if let Err(e) = save_json(&self.user_file(user_id), list) {
            tracing::error!("error saving favorites for user {}: {}", user_id, e);
        }
    }

    /// Save a new favorite and return its id. A failed write is logged; the
    /// favorite stays in memory.
    pub async fn add(&self, user_id: i64, new: NewFavorite) -> String {
        let id = generate_id();
        let favorite = Favorite {
            id: id.clone(),
            user_id,
            kind: new.kind,
            content: new.content,
            author: non_empty(new.author),
            setup: non_empty(new.setup),
            punchline: non_empty(new.punchline),
            image_url: non_empty(new.image_url),
            saved_at: now_unix(),
        };

        let mut lock = self.cache.write().await;
        let list = lock
            .entry(user_id)
            .or_insert_with(|| self.load_user(user_id));
        list.push(favorite);
        self.persist(user_id, list);
        id
    }

    /// Remove the favorite with `favorite_id`. Returns whether one was found.
    pub async fn remove(&self, user_id: i64, favorite_id: &str) -> bool {
        let mut lock = self.cache.write().await;
        let list = lock
            .entry(user_id)
            .or_insert_with(|| self.load_user(user_id));
        let Some(pos) = list.iter().position(|f| f.id == favorite_id) else {
            return false;
        };
        list.remove(pos);
        self.persist(user_id, list);
        true
    }

    /// Copy of the user's favorites in the order they were saved.
    pub async fn list(&self, user_id: i64) -> Vec<Favorite> {
        {
            let lock = self.cache.read().await;
            if let Some(list) = lock.get(&user_id) {
                return list.clone();
            }
        }
        let mut lock = self.cache.write().await;
        lock.entry(user_id)
            .or_insert_with(|| self.load_user(user_id))
            .clone()
    }

    pub async fn count(&self, user_id: i64) -> usize {
        {
            let lock = self.cache.read().await;
            if let Some(list) = lock.get(&user_id) {
                return list.len();
            }
        }
        let mut lock = self.cache.write().await;
        lock.entry(user_id)
            .or_insert_with(|| self.load_user(user_id))
            .len()
    }

    /// Route a raw favorite payload. `source_text` is the text of the message
    /// the button was attached to and is only read for `favorite_add`.
    pub async fn dispatch(&self, data: &str, user_id: i64, source_text: &str) -> String {
        match parse_favorite_payload(data) {
            Some(FavoriteAction::Add) => {
                let id = self.add(user_id, classify_text(source_text)).await;
                format!("Added to favorites! (ID: {})", id)
            }
            Some(FavoriteAction::Remove(id)) => {
                if self.remove(user_id, &id).await {
                    "Removed from favorites!".to_string()
                } else {
                    "Favorite not found.".to_string()
                }
            }
            None => "Unknown favorite action.".to_string(),
        }
    }
}
