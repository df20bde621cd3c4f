use rust_embed::Embed;
use serde::Deserialize;
use thiserror::Error;

use crate::language::Language;

#[derive(Embed)]
#[folder = "assets/words/"]
struct WordAssets;

#[derive(Embed)]
#[folder = "assets/quotes/"]
struct QuoteAssets;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("no {kind} bundled for language '{language}'")]
    Missing { kind: &'static str, language: String },
    #[error("failed to decode {kind} for '{language}'")]
    Decode {
        kind: &'static str,
        language: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{kind} list for '{language}' is empty")]
    Empty { kind: &'static str, language: String },
}

/// Word list used by the words and time modes.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WordCorpus {
    #[serde(default)]
    pub language: Language,
    pub words: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Quote {
    pub text: String,
}

/// Quote list used by the quote mode.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct QuoteCorpus {
    #[serde(default)]
    pub language: Language,
    pub quotes: Vec<Quote>,
}

impl WordCorpus {
    pub fn new(language: Language, words: Vec<String>) -> Self {
        Self { language, words }
    }

    pub fn load(language: &Language) -> Result<Self, CorpusError> {
        let raw = read_asset::<WordAssets>("words", language)?;
        Self::from_json(language, &raw)
    }

    pub fn from_json(language: &Language, json: &str) -> Result<Self, CorpusError> {
        let mut corpus: WordCorpus =
            serde_json::from_str(json).map_err(|source| CorpusError::Decode {
                kind: "words",
                language: language.to_string(),
                source,
            })?;
        corpus.words.retain(|w| !w.trim().is_empty());
        if corpus.words.is_empty() {
            return Err(CorpusError::Empty {
                kind: "words",
                language: language.to_string(),
            });
        }
        corpus.language = language.clone();
        Ok(corpus)
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl QuoteCorpus {
    pub fn new(language: Language, quotes: Vec<Quote>) -> Self {
        Self { language, quotes }
    }

    pub fn load(language: &Language) -> Result<Self, CorpusError> {
        let raw = read_asset::<QuoteAssets>("quotes", language)?;
        Self::from_json(language, &raw)
    }

    pub fn from_json(language: &Language, json: &str) -> Result<Self, CorpusError> {
        let mut corpus: QuoteCorpus =
            serde_json::from_str(json).map_err(|source| CorpusError::Decode {
                kind: "quotes",
                language: language.to_string(),
                source,
            })?;
        if corpus.quotes.is_empty() {
            return Err(CorpusError::Empty {
                kind: "quotes",
                language: language.to_string(),
            });
        }
        corpus.language = language.clone();
        Ok(corpus)
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

fn read_asset<A: Embed>(kind: &'static str, language: &Language) -> Result<String, CorpusError> {
    let filename = format!("{}.json", language.as_str());
    let missing = || CorpusError::Missing {
        kind,
        language: language.to_string(),
    };
    let file = A::get(&filename).ok_or_else(missing)?;
    let content = std::str::from_utf8(file.data.as_ref()).map_err(|_| missing())?;
    tracing::debug!(kind, language = %language, bytes = content.len(), "loaded corpus asset");
    Ok(content.to_string())
}
