use anyhow::Result;
use dotenvy::dotenv;
use std::{collections::HashMap, sync::Arc};
use teloxide::prelude::*;

pub mod callback;
pub mod config;
pub mod content;
pub mod error;
pub mod favorites;
pub mod handlers;
pub mod keyboards;
pub mod language;
pub mod messages;
pub mod mood;
pub mod persist;
pub mod translation;
pub mod votes;

pub use callback::{CallbackAction, decode};
pub use config::Config;
pub use error::{FetchError, StoreError};
pub use favorites::{Favorite, FavoriteKind, FavoriteStore, NewFavorite, classify_text, is_favorite_marker};
pub use language::{Language, LanguageStore, supported_languages};
pub use messages::{Messages, default_messages, format_with, load_all_messages};
pub use votes::{VoteDirection, VoteStore, is_vote_marker};

use content::ContentClient;
use translation::Translator;

/// Everything a handler needs, built once at startup and shared behind an `Arc`.
pub struct App {
    pub config: Config,
    pub votes: VoteStore,
    pub favorites: FavoriteStore,
    pub languages: LanguageStore,
    pub content: ContentClient,
    pub translator: Translator,
    pub messages: HashMap<Language, Messages>,
}

pub type SharedApp = Arc<App>;

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let content = ContentClient::new(config.fetch_timeout, config.unsplash_access_key.clone())?;
        let translator = Translator::new(config.translate_timeout)?;
        if config.unsplash_access_key.is_none() {
            tracing::warn!("UNSPLASH_ACCESS_KEY not set; content will be sent without images");
        }
        Ok(Self {
            votes: VoteStore::new(),
            favorites: FavoriteStore::open(&config.data_dir),
            languages: LanguageStore::open(&config.data_dir),
            messages: load_all_messages(&config.messages_dir),
            content,
            translator,
            config,
        })
    }

    /// UI string for `lang`. Languages without a messages file get the English
    /// string translated, or the English string itself if translation fails.
    pub async fn text(&self, lang: Language, pick: fn(&Messages) -> &String) -> String {
        if let Some(m) = self.messages.get(&lang) {
            return pick(m).clone();
        }
        let english = match self.messages.get(&Language::En) {
            Some(m) => pick(m).clone(),
            None => pick(&default_messages(Language::En)).clone(),
        };
        self.translator.translate_or_original(&english, lang).await
    }
}

/// Run the bot: load config, build the stores and start polling. Separated
/// from `main` so integration tests can import the library.
pub async fn run_bot() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("starting with {:?}", config);

    let bot = Bot::new(config.bot_token.clone());
    let app: SharedApp = Arc::new(App::new(config)?);

    Dispatcher::builder(bot, handlers::schema())
        .dependencies(dptree::deps![app])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
