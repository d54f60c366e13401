use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::{
    callback::language_payload,
    favorites::{FAVORITE_ADD, remove_payload},
    language::Language,
    mood::Mood,
    votes::{VoteDirection, vote_payload},
};

/// 👍 / 👎 / ⭐ row attached to every piece of content.
pub fn vote_keyboard(content_type: &str, message_id: i64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback(
            "👍",
            vote_payload(content_type, message_id, VoteDirection::Up),
        ),
        InlineKeyboardButton::callback(
            "👎",
            vote_payload(content_type, message_id, VoteDirection::Down),
        ),
        InlineKeyboardButton::callback("⭐", FAVORITE_ADD),
    ]])
}

/// 2x2 mood grid; `labels` are the localized mood names in `Mood::ALL` order.
pub fn mood_keyboard(labels: [String; 4]) -> InlineKeyboardMarkup {
    let buttons: Vec<InlineKeyboardButton> = Mood::ALL
        .iter()
        .zip(labels)
        .map(|(mood, label)| {
            InlineKeyboardButton::callback(format!("{} {}", label, mood.emoji()), mood.name())
        })
        .collect();
    InlineKeyboardMarkup::new(buttons.chunks(2).map(|row| row.to_vec()))
}

/// One button per language other than `current`, or `None` if nothing is left.
pub fn language_keyboard(current: Language) -> Option<InlineKeyboardMarkup> {
    let rows: Vec<Vec<InlineKeyboardButton>> = Language::ALL
        .iter()
        .filter(|&&l| l != current)
        .map(|&l| vec![InlineKeyboardButton::callback(l.label(), language_payload(l))])
        .collect();
    if rows.is_empty() {
        None
    } else {
        Some(InlineKeyboardMarkup::new(rows))
    }
}

pub fn remove_keyboard(label: &str, favorite_id: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        label.to_string(),
        remove_payload(favorite_id),
    )]])
}
