use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{error::FetchError, language::Language};

pub const MYMEMORY_URL: &str = "https://api.mymemory.translated.net/get";

/// Longest input, in characters, sent to the translation API.
pub const MAX_TRANSLATE_CHARS: usize = 500;

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(default, rename = "translatedText")]
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: ResponseData,
    #[serde(default, rename = "responseStatus")]
    response_status: serde_json::Value,
}

/// Cut `text` to `MAX_TRANSLATE_CHARS` characters, marking the cut with `...`.
pub fn truncate_for_translation(text: &str) -> String {
    match text.char_indices().nth(MAX_TRANSLATE_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Prefix a flag for the non-English languages.
pub fn decorate(text: &str, lang: Language) -> String {
    match lang {
        Language::Hi | Language::Ta => format!("🇮🇳 {}", text),
        Language::En => text.to_string(),
    }
}

fn extract_translation(resp: MyMemoryResponse) -> Result<String, FetchError> {
    // responseStatus arrives as either a number or a numeric string
    let status = match &resp.response_status {
        serde_json::Value::Number(n) => n.as_i64().unwrap_or(0),
        serde_json::Value::String(s) => s.parse().unwrap_or(0),
        _ => 0,
    };
    if status != 200 {
        return Err(FetchError::Translation(status));
    }
    if resp.response_data.translated_text.is_empty() {
        return Err(FetchError::Empty("mymemory"));
    }
    Ok(resp.response_data.translated_text)
}

/// English-to-X translation through the MyMemory API.
#[derive(Clone)]
pub struct Translator {
    client: Client,
}

impl Translator {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub async fn translate(&self, text: &str, target: Language) -> Result<String, FetchError> {
        if target == Language::En {
            return Ok(text.to_string());
        }
        let text = truncate_for_translation(text);
        let langpair = format!("en|{}", target.code());
        let resp = self
            .client
            .get(MYMEMORY_URL)
            .query(&[("q", text.as_str()), ("langpair", langpair.as_str())])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(FetchError::Status {
                service: "mymemory",
                status: resp.status(),
            });
        }
        extract_translation(resp.json().await?)
    }

    /// Translate, falling back to the untranslated text on any failure.
    pub async fn translate_or_original(&self, text: &str, target: Language) -> String {
        match self.translate(text, target).await {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!("translation to {} failed: {}", target.code(), e);
                text.to_string()
            }
        }
    }
}
