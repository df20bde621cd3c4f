use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::corpus::{QuoteCorpus, WordCorpus};
use crate::language::Language;

/// Session flavour as selected on the command line or in the config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    #[default]
    Quote,
    Words,
    Time,
}

impl ModeKind {
    pub const ALL: [ModeKind; 3] = [ModeKind::Quote, ModeKind::Words, ModeKind::Time];

    pub fn as_str(self) -> &'static str {
        match self {
            ModeKind::Quote => "quote",
            ModeKind::Words => "words",
            ModeKind::Time => "time",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ModeKind::Quote => "Type a randomly chosen quote",
            ModeKind::Words => "Type a fixed number of random words",
            ModeKind::Time => "Type as many words as possible before the timer runs out",
        }
    }

    /// Whether the session can end before the target is typed out.
    pub fn supports_force_finish(self) -> bool {
        matches!(self, ModeKind::Words | ModeKind::Time)
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mode together with the corpus it draws from.
#[derive(Clone, Debug)]
pub enum Mode {
    Quote(Arc<QuoteCorpus>),
    Words {
        corpus: Arc<WordCorpus>,
        count: usize,
    },
    Time {
        corpus: Arc<WordCorpus>,
        duration: Duration,
    },
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Quote(_) => ModeKind::Quote,
            Mode::Words { .. } => ModeKind::Words,
            Mode::Time { .. } => ModeKind::Time,
        }
    }

    pub fn language(&self) -> &Language {
        match self {
            Mode::Quote(corpus) => &corpus.language,
            Mode::Words { corpus, .. } | Mode::Time { corpus, .. } => &corpus.language,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names_round_trip_through_serde() {
        for kind in ModeKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            let back: ModeKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_value_enum_names_match() {
        for kind in ModeKind::ALL {
            assert_eq!(ModeKind::from_str(kind.as_str(), false), Ok(kind));
        }
    }

    #[test]
    fn test_force_finish_support() {
        assert!(!ModeKind::Quote.supports_force_finish());
        assert!(ModeKind::Words.supports_force_finish());
        assert!(ModeKind::Time.supports_force_finish());
    }

    #[test]
    fn test_mode_language() {
        let corpus = Arc::new(WordCorpus::new(Language::new("code_go"), vec!["func".into()]));
        let mode = Mode::Words { corpus, count: 10 };
        assert_eq!(mode.kind(), ModeKind::Words);
        assert_eq!(mode.language().as_str(), "code_go");
    }
}
