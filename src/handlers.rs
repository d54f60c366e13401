use anyhow::Result;
use teloxide::{
    dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler},
    payloads::{AnswerCallbackQuerySetters, SendMessageSetters, SendPhotoSetters},
    prelude::*,
    types::{InlineKeyboardMarkup, InputFile},
    utils::command::BotCommands,
};

use crate::{
    App, SharedApp,
    callback::{self, CallbackAction},
    favorites::{Favorite, FavoriteKind},
    keyboards::{language_keyboard, mood_keyboard, remove_keyboard, vote_keyboard},
    language::Language,
    messages::format_with,
    mood::{Mood, SURPRISE_CONTENT_TYPE, SURPRISE_FALLBACK_QUERY, pick_surprise},
    persist::now_unix,
    translation::decorate,
};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "MoodBot commands:")]
pub enum Command {
    #[command(description = "choose your mood and get personalized content")]
    Start,
    #[command(description = "get completely random content (jokes, quotes, or facts)")]
    Surprise,
    #[command(description = "view and manage your saved favorites")]
    Favorites,
    #[command(description = "change your language preference")]
    Language,
    #[command(description = "show this help message")]
    Help,
}

/// Dispatcher tree: known commands, any other message, then button presses.
pub fn schema() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(on_command),
        )
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback))
}

async fn on_command(bot: Bot, msg: Message, cmd: Command, app: SharedApp) -> ResponseResult<()> {
    if let Err(err) = handle_command(&bot, &msg, cmd, &app).await {
        tracing::error!("command handler error: {:?}", err);
    }
    respond(())
}

async fn on_message(bot: Bot, msg: Message, app: SharedApp) -> ResponseResult<()> {
    // unknown commands get the help text; plain chatter is ignored
    if msg.text().is_some_and(|t| t.trim().starts_with('/')) {
        if let Err(err) = send_help(&bot, msg.chat.id, sender_id(&msg), &app).await {
            tracing::error!("help handler error: {:?}", err);
        }
    }
    respond(())
}

async fn on_callback(bot: Bot, q: CallbackQuery, app: SharedApp) -> ResponseResult<()> {
    if let Err(err) = handle_callback(&bot, &q, &app).await {
        tracing::error!("callback handler error: {:?}", err);
    }
    respond(())
}

fn sender_id(msg: &Message) -> i64 {
    msg.from
        .as_ref()
        .map(|u| u.id.0 as i64)
        .unwrap_or(msg.chat.id.0)
}

async fn handle_command(bot: &Bot, msg: &Message, cmd: Command, app: &App) -> Result<()> {
    let chat_id = msg.chat.id;
    let user_id = sender_id(msg);
    tracing::info!("command {:?} chat={} user={}", cmd, chat_id.0, user_id);
    match cmd {
        Command::Start => {
            let lang = app.languages.get(user_id).await;
            send_mood_keyboard(bot, chat_id, lang, app).await
        }
        Command::Surprise => handle_surprise(bot, chat_id, user_id, app).await,
        Command::Favorites => send_favorites(bot, chat_id, user_id, app).await,
        Command::Language => send_language_keyboard(bot, chat_id, user_id, app).await,
        Command::Help => send_help(bot, chat_id, user_id, app).await,
    }
}

async fn answer(bot: &Bot, q: &CallbackQuery, text: impl Into<String>) -> Result<()> {
    bot.answer_callback_query(q.id.clone()).text(text).await?;
    Ok(())
}

async fn handle_callback(bot: &Bot, q: &CallbackQuery, app: &App) -> Result<()> {
    let Some(data) = q.data.as_deref() else {
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };
    let user_id = q.from.id.0 as i64;
    let chat_id = q
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(user_id));

    match callback::decode(data) {
        CallbackAction::Vote(_) | CallbackAction::InvalidVote => {
            let ack = app.votes.handle_callback(data, user_id).await;
            answer(bot, q, ack).await
        }
        CallbackAction::FavoriteAdd
        | CallbackAction::FavoriteRemove(_)
        | CallbackAction::UnknownFavorite => {
            let source = q
                .message
                .as_ref()
                .and_then(|m| m.regular_message())
                .and_then(|m| m.text().or_else(|| m.caption()))
                .unwrap_or_default();
            let reply = app.favorites.dispatch(data, user_id, source).await;
            answer(bot, q, reply).await
        }
        CallbackAction::Language(lang) => {
            let reply = match app.languages.set(user_id, lang).await {
                Ok(()) => lang.confirmation().to_string(),
                Err(_) => app.text(lang, |m| &m.language_save_failed).await,
            };
            answer(bot, q, reply).await
        }
        CallbackAction::UnknownLanguage => answer(bot, q, "Unknown language selection").await,
        CallbackAction::Mood(mood) => {
            let lang = app.languages.get(user_id).await;
            answer(bot, q, app.text(lang, |m| &m.working).await).await?;
            handle_mood(bot, chat_id, lang, mood, app).await
        }
        CallbackAction::Unknown(raw) => {
            tracing::warn!("unknown callback payload {:?} from user {}", raw, user_id);
            let lang = app.languages.get(user_id).await;
            answer(bot, q, app.text(lang, |m| &m.unknown_action).await).await
        }
    }
}

async fn send_mood_keyboard(bot: &Bot, chat_id: ChatId, lang: Language, app: &App) -> Result<()> {
    let prompt = app.text(lang, |m| &m.mood_prompt).await;
    let labels = [
        app.text(lang, |m| &m.mood_fun).await,
        app.text(lang, |m| &m.mood_inspiring).await,
        app.text(lang, |m| &m.mood_motivating).await,
        app.text(lang, |m| &m.mood_casual).await,
    ];
    bot.send_message(chat_id, prompt)
        .reply_markup(mood_keyboard(labels))
        .await?;
    Ok(())
}

async fn send_help(bot: &Bot, chat_id: ChatId, user_id: i64, app: &App) -> Result<()> {
    let lang = app.languages.get(user_id).await;
    let help = app.text(lang, |m| &m.help).await;
    bot.send_message(chat_id, help).await?;
    Ok(())
}

async fn handle_mood(bot: &Bot, chat_id: ChatId, lang: Language, mood: Mood, app: &App) -> Result<()> {
    let fetched = match app.content.fetch(mood.source()).await {
        Err(e) if mood == Mood::Fun => {
            tracing::warn!("joke fetch failed, trying a fact: {}", e);
            app.content.fact().await
        }
        other => other,
    };
    let text = match fetched {
        Ok(body) => app.translator.translate_or_original(&body, lang).await,
        Err(e) => {
            tracing::warn!("content fetch for {} failed: {}", mood.name(), e);
            app.text(lang, |m| &m.fetch_failed).await
        }
    };
    let text = decorate(&text, lang);

    send_content(bot, chat_id, text, mood.image_query(), mood.name(), app).await?;
    send_mood_keyboard(bot, chat_id, lang, app).await
}

async fn handle_surprise(bot: &Bot, chat_id: ChatId, user_id: i64, app: &App) -> Result<()> {
    let lang = app.languages.get(user_id).await;
    let category = pick_surprise();
    let mut image_query = category.image_query;

    let fetched = match app.content.fetch(category.source).await {
        Ok(body) => Ok(body),
        Err(e) => {
            tracing::warn!("surprise {} failed, falling back to a fact: {}", category.name, e);
            image_query = SURPRISE_FALLBACK_QUERY;
            app.content.fact().await
        }
    };
    let text = match fetched {
        Ok(body) => {
            let prefix = app.text(lang, |m| &m.surprise_prefix).await;
            let body = app.translator.translate_or_original(&body, lang).await;
            format!("{}{}", prefix, body)
        }
        Err(e) => {
            tracing::warn!("surprise fallback failed: {}", e);
            app.text(lang, |m| &m.surprise_failed).await
        }
    };

    send_content(bot, chat_id, text, image_query, SURPRISE_CONTENT_TYPE, app).await
}

/// Send `text` as a photo caption when an image can be fetched, otherwise (or
/// if the photo send fails) as a plain message. Both carry the vote keyboard.
async fn send_content(
    bot: &Bot,
    chat_id: ChatId,
    text: String,
    image_query: &str,
    content_type: &str,
    app: &App,
) -> Result<()> {
    let keyboard = vote_keyboard(content_type, now_unix());

    match app.content.image(image_query).await {
        Ok(url) => {
            let sent = bot
                .send_photo(chat_id, InputFile::url(url))
                .caption(text.clone())
                .reply_markup(keyboard.clone())
                .await;
            match sent {
                Ok(_) => return Ok(()),
                Err(e) => tracing::warn!("photo send failed, sending text: {}", e),
            }
        }
        Err(e) => tracing::debug!("no image for {}: {}", image_query, e),
    }

    bot.send_message(chat_id, text).reply_markup(keyboard).await?;
    Ok(())
}

/// Plain-text rendering of one saved favorite, numbered from 1.
pub fn render_favorite(index: usize, fav: &Favorite) -> String {
    match fav.kind {
        FavoriteKind::Quote => format!(
            "💡 Quote #{}\n\n{}\n\n— {}",
            index,
            fav.content,
            fav.author.as_deref().unwrap_or_default()
        ),
        FavoriteKind::Joke => format!(
            "😄 Joke #{}\n\n{}\n\n{}",
            index,
            fav.setup.as_deref().unwrap_or(&fav.content),
            fav.punchline.as_deref().unwrap_or_default()
        ),
        FavoriteKind::Fact => format!("🧠 Fact #{}\n\n{}", index, fav.content),
        FavoriteKind::Image => format!("🖼️ Image #{}\n\n{}", index, fav.content),
        FavoriteKind::General => format!("📄 Content #{}\n\n{}", index, fav.content),
    }
}

async fn send_favorites(bot: &Bot, chat_id: ChatId, user_id: i64, app: &App) -> Result<()> {
    let lang = app.languages.get(user_id).await;
    let count = app.favorites.count(user_id).await;
    if count == 0 {
        let text = app.text(lang, |m| &m.no_favorites).await;
        bot.send_message(chat_id, text).await?;
        return Ok(());
    }

    let header = app.text(lang, |m| &m.favorites_header).await;
    bot.send_message(chat_id, format_with(&header, &[("count", &count.to_string())]))
        .await?;

    let remove_label = app.text(lang, |m| &m.remove_button).await;
    for (i, fav) in app.favorites.list(user_id).await.iter().enumerate() {
        let text = render_favorite(i + 1, fav);
        let keyboard = remove_keyboard(&remove_label, &fav.id);
        if fav.kind == FavoriteKind::Image {
            if let Some(url) = fav
                .image_url
                .as_deref()
                .and_then(|u| reqwest::Url::parse(u).ok())
            {
                let sent = bot
                    .send_photo(chat_id, InputFile::url(url))
                    .caption(text.clone())
                    .reply_markup(keyboard.clone())
                    .await;
                if sent.is_ok() {
                    continue;
                }
            }
        }
        send_with_keyboard(bot, chat_id, text, keyboard).await?;
    }
    Ok(())
}

async fn send_with_keyboard(
    bot: &Bot,
    chat_id: ChatId,
    text: String,
    keyboard: InlineKeyboardMarkup,
) -> Result<()> {
    bot.send_message(chat_id, text).reply_markup(keyboard).await?;
    Ok(())
}

async fn send_language_keyboard(bot: &Bot, chat_id: ChatId, user_id: i64, app: &App) -> Result<()> {
    let current = app.languages.get(user_id).await;
    match language_keyboard(current) {
        Some(keyboard) => {
            let prompt = app.text(current, |m| &m.language_prompt).await;
            send_with_keyboard(bot, chat_id, prompt, keyboard).await
        }
        None => {
            let template = app.text(current, |m| &m.current_language).await;
            let text = format_with(&template, &[("language", current.label())]);
            bot.send_message(chat_id, text).await?;
            Ok(())
        }
    }
}
