use rand::seq::IndexedRandom;
use tracing::{debug, warn};

use crate::error::LookupError;
use crate::games::hangman::game::Language;

pub const DEFAULT_WORD_URL: &str = "https://random-word-api.herokuapp.com/word?number=1";

/// Word used when the remote source cannot be reached. The game is still
/// playable with it.
pub const FETCH_FAILED_WORD: &str = "error";

static SPANISH_WORDS: [&str; 10] = [
    "amor", "perro", "gato", "casa", "libro", "sol", "luna", "estrella", "ciudad", "mundo",
];

static FRENCH_WORDS: [&str; 10] = [
    "amour", "chien", "chat", "maison", "livre", "soleil", "lune", "étoile", "ville", "monde",
];

/// Built-in word list, or `None` for languages served remotely.
pub fn static_words(language: Language) -> Option<&'static [&'static str]> {
    match language {
        Language::English => None,
        Language::Spanish => Some(SPANISH_WORDS.as_slice()),
        Language::French => Some(FRENCH_WORDS.as_slice()),
    }
}

/// Picks uniformly from the built-in list.
pub fn pick_static(language: Language) -> Option<&'static str> {
    static_words(language)?.choose(&mut rand::rng()).copied()
}

/// First usable word of a `["word"]` payload, lowercased.
pub fn parse_word_payload(words: &[String]) -> Result<String, LookupError> {
    words
        .first()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .ok_or(LookupError::Empty)
}

#[derive(Debug, Clone)]
pub struct WordProvider {
    client: reqwest::Client,
    word_url: String,
}

impl WordProvider {
    pub fn new(client: reqwest::Client, word_url: impl Into<String>) -> Self {
        Self { client, word_url: word_url.into() }
    }

    /// Never fails: a broken remote source yields [`FETCH_FAILED_WORD`].
    pub async fn next_word(&self, language: Language) -> String {
        if let Some(word) = pick_static(language) {
            debug!(%language, "picked word from built-in list");
            return word.to_string();
        }
        match self.fetch_remote().await {
            Ok(word) => word,
            Err(error) => {
                warn!(%error, url = %self.word_url, "word fetch failed, using fallback word");
                FETCH_FAILED_WORD.to_string()
            }
        }
    }

    async fn fetch_remote(&self) -> Result<String, LookupError> {
        let words: Vec<String> = self
            .client
            .get(&self.word_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        parse_word_payload(&words)
    }
}
