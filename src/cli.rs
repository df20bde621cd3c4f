use std::time::Duration;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::config::Config;
use crate::generator::GenerateOptions;
use crate::language::{Language, LanguageError};
use crate::session::mode::ModeKind;

pub const DURATION_CHOICES: [u64; 4] = [15, 30, 60, 120];
pub const WORD_COUNT_CHOICES: [usize; 4] = [10, 25, 50, 100];

#[derive(Parser, Debug)]
#[command(
    name = "typetest",
    version,
    about = "Terminal typing speed test with quote, word-count and timed modes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(short, long, value_enum, help = "Test mode")]
    pub mode: Option<ModeKind>,

    #[arg(short, long, help = "Language of the words or quotes (see `languages`)")]
    pub language: Option<String>,

    #[arg(short, long, help = "Seconds for time mode (15, 30, 60, 120)")]
    pub duration: Option<u64>,

    #[arg(short, long, help = "Number of words for words mode (10, 25, 50, 100)")]
    pub word_count: Option<usize>,

    #[arg(short, long, help = "Add punctuation (words and time modes)")]
    pub punctuation: bool,

    #[arg(short, long, help = "Add numbers (words and time modes)")]
    pub numbers: bool,

    #[arg(short, long, help = "Theme name")]
    pub theme: Option<String>,

    #[arg(long, help = "Seed for reproducible text")]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// List supported languages
    #[command(visible_aliases = ["list-languages", "langs"])]
    Languages,
    /// List test modes
    #[command(visible_alias = "list-modes")]
    Modes,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("--duration is only valid in time mode (current mode: {0})")]
    DurationOutsideTimeMode(ModeKind),
    #[error("--word-count is only valid in words mode (current mode: {0})")]
    WordCountOutsideWordsMode(ModeKind),
    #[error("--{flag} is only valid in words or time mode (current mode: {mode})")]
    ExtrasInQuoteMode { flag: &'static str, mode: ModeKind },
    #[error("invalid duration {0}s, expected one of 15, 30, 60, 120")]
    InvalidDuration(u64),
    #[error("invalid word count {0}, expected one of 10, 25, 50, 100")]
    InvalidWordCount(usize),
    #[error(transparent)]
    Language(#[from] LanguageError),
}

/// Fully resolved settings for one run: CLI flags layered over the config file.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSettings {
    pub mode: ModeKind,
    pub language: Language,
    pub duration: Duration,
    pub word_count: usize,
    pub options: GenerateOptions,
    pub theme: String,
    pub seed: Option<u64>,
    pub tick_rate: Duration,
    pub newline_indicator: String,
}

impl Cli {
    pub fn resolve(&self, config: &Config) -> Result<RunSettings, CliError> {
        let mode = self.mode.unwrap_or(config.mode);

        if self.duration.is_some() && mode != ModeKind::Time {
            return Err(CliError::DurationOutsideTimeMode(mode));
        }
        if self.word_count.is_some() && mode != ModeKind::Words {
            return Err(CliError::WordCountOutsideWordsMode(mode));
        }

        // merged values: config entries face the same allowed sets as flags
        let duration = self.duration.unwrap_or(config.duration);
        if mode == ModeKind::Time && !DURATION_CHOICES.contains(&duration) {
            return Err(CliError::InvalidDuration(duration));
        }
        let word_count = self.word_count.unwrap_or(config.word_count);
        if mode == ModeKind::Words && !WORD_COUNT_CHOICES.contains(&word_count) {
            return Err(CliError::InvalidWordCount(word_count));
        }
        if mode == ModeKind::Quote {
            if self.punctuation {
                return Err(CliError::ExtrasInQuoteMode {
                    flag: "punctuation",
                    mode,
                });
            }
            if self.numbers {
                return Err(CliError::ExtrasInQuoteMode {
                    flag: "numbers",
                    mode,
                });
            }
        }

        let language = Language::parse(self.language.as_deref().unwrap_or(&config.language))?;
        let extras = mode != ModeKind::Quote;

        Ok(RunSettings {
            mode,
            language,
            duration: Duration::from_secs(duration),
            word_count,
            options: GenerateOptions {
                numbers: extras && (self.numbers || config.numbers),
                punctuation: extras && (self.punctuation || config.punctuation),
            },
            theme: self.theme.clone().unwrap_or_else(|| config.theme.clone()),
            seed: self.seed,
            tick_rate: Duration::from_millis(config.tick_interval_ms.max(1)),
            newline_indicator: config.newline_indicator.clone(),
        })
    }
}
