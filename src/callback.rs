use crate::{
    favorites::{FavoriteAction, is_favorite_marker, parse_favorite_payload},
    language::Language,
    mood::Mood,
    votes::{VoteAction, is_vote_marker, parse_vote_payload},
};

pub const LANGUAGE_PREFIX: &str = "lang_";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackAction {
    Vote(VoteAction),
    InvalidVote,
    FavoriteAdd,
    FavoriteRemove(String),
    UnknownFavorite,
    Language(Language),
    UnknownLanguage,
    Mood(Mood),
    Unknown(String),
}

pub fn language_payload(lang: Language) -> String {
    format!("{}{}", LANGUAGE_PREFIX, lang.code())
}

/// Classify a raw payload. Votes are checked first, then favorites, then
/// language selection, then moods.
pub fn decode(data: &str) -> CallbackAction {
    if is_vote_marker(data) {
        return match parse_vote_payload(data) {
            Some(action) => CallbackAction::Vote(action),
            None => CallbackAction::InvalidVote,
        };
    }
    if is_favorite_marker(data) {
        return match parse_favorite_payload(data) {
            Some(FavoriteAction::Add) => CallbackAction::FavoriteAdd,
            Some(FavoriteAction::Remove(id)) => CallbackAction::FavoriteRemove(id),
            None => CallbackAction::UnknownFavorite,
        };
    }
    if let Some(code) = data.strip_prefix(LANGUAGE_PREFIX) {
        return match Language::from_code(code) {
            Some(lang) if code == lang.code() => CallbackAction::Language(lang),
            _ => CallbackAction::UnknownLanguage,
        };
    }
    match Mood::from_callback(data) {
        Some(mood) => CallbackAction::Mood(mood),
        None => CallbackAction::Unknown(data.to_string()),
    }
}
