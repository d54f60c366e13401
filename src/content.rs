use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{error::FetchError, mood::Source};

pub const ZEN_QUOTES_URL: &str = "https://zenquotes.io/api/random";
pub const JOKE_URL: &str = "https://official-joke-api.appspot.com/jokes/random";
pub const FACT_URL: &str = "https://uselessfacts.jsph.pl/api/v2/facts/random?language=en";
pub const UNSPLASH_RANDOM_URL: &str = "https://api.unsplash.com/photos/random";

#[derive(Debug, Deserialize)]
pub struct ZenQuote {
    pub q: String,
    pub a: String,
}

#[derive(Debug, Deserialize)]
pub struct Joke {
    #[serde(default)]
    pub setup: String,
    #[serde(default)]
    pub punchline: String,
}

#[derive(Debug, Deserialize)]
pub struct Fact {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct UnsplashUrls {
    #[serde(default)]
    pub regular: String,
    #[serde(default)]
    pub small: String,
}

#[derive(Debug, Deserialize)]
pub struct UnsplashImage {
    pub urls: UnsplashUrls,
}

/// Render the first quote as `“text” — author`.
pub fn format_quote(quotes: &[ZenQuote]) -> Result<String, FetchError> {
    let q = quotes.first().ok_or(FetchError::Empty("zenquotes"))?;
    Ok(format!("“{}” — {}", q.q, q.a))
}

pub fn format_joke(joke: &Joke) -> Result<String, FetchError> {
    if joke.setup.is_empty() && joke.punchline.is_empty() {
        return Err(FetchError::Empty("joke api"));
    }
    Ok(format!("{}\n\n{}", joke.setup, joke.punchline))
}

pub fn format_fact(fact: Fact) -> Result<String, FetchError> {
    if fact.text.trim().is_empty() {
        return Err(FetchError::Empty("useless facts"));
    }
    Ok(fact.text)
}

/// HTTP client for the content APIs. Cheap to clone.
#[derive(Clone)]
pub struct ContentClient {
    client: Client,
    image_key: Option<String>,
}

impl ContentClient {
    pub fn new(timeout: Duration, image_key: Option<String>) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, image_key })
    }

    async fn get_json<T>(&self, service: &'static str, url: &str) -> Result<T, FetchError>
    where
        T: serde::de::DeserializeOwned,
    {
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(FetchError::Status {
                service,
                status: resp.status(),
            });
        }
        Ok(resp.json::<T>().await?)
    }

    pub async fn quote(&self) -> Result<String, FetchError> {
        let quotes: Vec<ZenQuote> = self.get_json("zenquotes", ZEN_QUOTES_URL).await?;
        format_quote(&quotes)
    }

    pub async fn joke(&self) -> Result<String, FetchError> {
        let joke: Joke = self.get_json("joke api", JOKE_URL).await?;
        format_joke(&joke)
    }

    pub async fn fact(&self) -> Result<String, FetchError> {
        let fact: Fact = self.get_json("useless facts", FACT_URL).await?;
        format_fact(fact)
    }

    pub async fn fetch(&self, source: Source) -> Result<String, FetchError> {
        match source {
            Source::Joke => self.joke().await,
            Source::Quote => self.quote().await,
            Source::Fact => self.fact().await,
        }
    }

    /// URL of a random image matching `query`.
    pub async fn image(&self, query: &str) -> Result<reqwest::Url, FetchError> {
        let key = self
            .image_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(FetchError::MissingImageKey)?;
        let resp = self
            .client
            .get(UNSPLASH_RANDOM_URL)
            .query(&[("query", query), ("client_id", key)])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(FetchError::Status {
                service: "unsplash",
                status: resp.status(),
            });
        }
        let img: UnsplashImage = resp.json().await?;
        if img.urls.small.is_empty() {
            return Err(FetchError::Empty("unsplash"));
        }
        reqwest::Url::parse(&img.urls.small).map_err(|_| FetchError::InvalidUrl(img.urls.small))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_uses_first_entry_and_em_dash() {
        let quotes: Vec<ZenQuote> =
            serde_json::from_str(r#"[{"q":"Stay hungry.","a":"Steve Jobs","h":"<b>x</b>"}]"#)
                .unwrap();
        assert_eq!(format_quote(&quotes).unwrap(), "“Stay hungry.” — Steve Jobs");
    }

    #[test]
    fn empty_quote_list_is_an_error() {
        assert!(matches!(format_quote(&[]), Err(FetchError::Empty(_))));
    }

    #[test]
    fn joke_is_split_by_blank_line() {
        let joke: Joke = serde_json::from_str(
            r#"{"id":1,"type":"general","setup":"Knock knock.","punchline":"Who's there?"}"#,
        )
        .unwrap();
        assert_eq!(format_joke(&joke).unwrap(), "Knock knock.\n\nWho's there?");
    }

    #[test]
    fn blank_fact_is_an_error() {
        let fact: Fact = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(format_fact(fact).is_err());
    }

    #[tokio::test]
    async fn image_without_key_fails_without_a_request() {
        let client = ContentClient::new(Duration::from_secs(1), None).unwrap();
        let err = client.image("nature").await.unwrap_err();
        assert!(matches!(err, FetchError::MissingImageKey));

        let client = ContentClient::new(Duration::from_secs(1), Some(String::new())).unwrap();
        assert!(matches!(
            client.image("nature").await,
            Err(FetchError::MissingImageKey)
        ));
    }
}
