use rand::seq::SliceRandom;

/// Moods offered on the /start keyboard. The callback payload is the mood name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mood {
    Fun,
    Inspiring,
    Motivating,
    Casual,
}

/// Which third-party source a piece of content comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Joke,
    Quote,
    Fact,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Fun, Mood::Inspiring, Mood::Motivating, Mood::Casual];

    pub fn from_callback(data: &str) -> Option<Mood> {
        match data {
            "fun" => Some(Mood::Fun),
            "inspiring" => Some(Mood::Inspiring),
            "motivating" => Some(Mood::Motivating),
            "casual" => Some(Mood::Casual),
            _ => None,
        }
    }

    /// Callback payload and vote content type.
    pub fn name(self) -> &'static str {
        match self {
            Mood::Fun => "fun",
            Mood::Inspiring => "inspiring",
            Mood::Motivating => "motivating",
            Mood::Casual => "casual",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Fun => "🎉",
            Mood::Inspiring => "💡",
            Mood::Motivating => "💪",
            Mood::Casual => "😌",
        }
    }

    pub fn image_query(self) -> &'static str {
        match self {
            Mood::Fun => "funny",
            Mood::Inspiring => "inspiration",
            Mood::Motivating => "motivation",
            Mood::Casual => "nature",
        }
    }

    /// Primary source for the mood; `Fun` falls back to a fact on failure.
    pub fn source(self) -> Source {
        match self {
            Mood::Fun => Source::Joke,
            Mood::Inspiring | Mood::Motivating => Source::Quote,
            Mood::Casual => Source::Fact,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurpriseCategory {
    pub name: &'static str,
    pub source: Source,
    pub image_query: &'static str,
}

pub const SURPRISE_CATEGORIES: [SurpriseCategory; 5] = [
    SurpriseCategory { name: "fun", source: Source::Joke, image_query: "funny" },
    SurpriseCategory { name: "inspiring", source: Source::Quote, image_query: "inspiration" },
    SurpriseCategory { name: "motivating", source: Source::Quote, image_query: "motivation" },
    SurpriseCategory { name: "casual", source: Source::Fact, image_query: "nature" },
    SurpriseCategory { name: "random_fact", source: Source::Fact, image_query: "surprise" },
];

/// Image query used when a surprise falls back to a plain fact.
pub const SURPRISE_FALLBACK_QUERY: &str = "random";

/// Vote content type for /surprise messages.
pub const SURPRISE_CONTENT_TYPE: &str = "surprise";

pub fn pick_surprise() -> SurpriseCategory {
    let mut rng = rand::thread_rng();
    *SURPRISE_CATEGORIES
        .choose(&mut rng)
        .unwrap_or(&SURPRISE_CATEGORIES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_names_round_trip() {
        for mood in Mood::ALL {
            assert_eq!(Mood::from_callback(mood.name()), Some(mood));
        }
        assert_eq!(Mood::from_callback("Fun"), None);
        assert_eq!(Mood::from_callback("surprise"), None);
    }

    #[test]
    fn surprise_categories_line_up_with_moods() {
        for mood in Mood::ALL {
            let cat = SURPRISE_CATEGORIES
                .iter()
                .find(|c| c.name == mood.name())
                .expect("every mood is a surprise category");
            assert_eq!(cat.source, mood.source());
            assert_eq!(cat.image_query, mood.image_query());
        }
    }

    #[test]
    fn pick_surprise_stays_in_the_table() {
        for _ in 0..50 {
            assert!(SURPRISE_CATEGORIES.contains(&pick_surprise()));
        }
    }
}
