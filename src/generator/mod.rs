pub mod capitalize;
pub mod numbers;
pub mod punctuate;

use rand::Rng;

use crate::corpus::WordCorpus;
use crate::generator::numbers::{MAX_NUMBER_LEN, random_number, should_insert_number};
use crate::generator::punctuate::{WordContext, punctuate_word};

/// Extras layered over plain sampled words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    pub numbers: bool,
    pub punctuation: bool,
}

/// Samples `count` words uniformly (with replacement) and joins them with single spaces.
///
/// Numbers are substituted before punctuation, so a number can still pick up a comma
/// or terminator. Each word is punctuated against the previous word as finalized.
pub fn generate<R: Rng>(
    corpus: &WordCorpus,
    count: usize,
    options: &GenerateOptions,
    rng: &mut R,
) -> String {
    if corpus.is_empty() || count == 0 {
        return String::new();
    }

    let mut words: Vec<String> = Vec::new();
    for index in 0..count {
        let mut word = corpus.words[rng.gen_range(0..corpus.words.len())].clone();

        if options.numbers && should_insert_number(rng) {
            word = random_number(rng, MAX_NUMBER_LEN);
        }

        if options.punctuation {
            let ctx = WordContext {
                language: &corpus.language,
                previous: words.last().map(String::as_str).unwrap_or(""),
                index,
                count,
            };
            word = punctuate_word(&word, &ctx, rng);
        }

        words.push(word);
    }

    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn corpus(language: &str, words: &[&str]) -> WordCorpus {
        WordCorpus::new(
            Language::new(language),
            words.iter().map(|w| w.to_string()).collect(),
        )
    }

    #[test]
    fn test_plain_words_come_from_corpus() {
        let corpus = corpus("english", &["alpha", "beta", "gamma"]);
        let mut rng = SmallRng::seed_from_u64(42);
        let text = generate(&corpus, 25, &GenerateOptions::default(), &mut rng);
        let tokens: Vec<&str> = text.split(' ').collect();
        assert_eq!(tokens.len(), 25);
        assert!(tokens.iter().all(|t| corpus.words.iter().any(|w| w == t)));
    }

    #[test]
    fn test_empty_inputs_give_empty_text() {
        let mut rng = SmallRng::seed_from_u64(42);
        let empty = corpus("english", &[]);
        assert_eq!(generate(&empty, 10, &GenerateOptions::default(), &mut rng), "");

        let words = corpus("english", &["one"]);
        assert_eq!(generate(&words, 0, &GenerateOptions::default(), &mut rng), "");
    }

    #[test]
    fn test_same_seed_same_text() {
        let corpus = corpus("english", &["a", "b", "c", "d", "e", "f"]);
        let options = GenerateOptions {
            numbers: true,
            punctuation: true,
        };
        let first = generate(&corpus, 40, &options, &mut SmallRng::seed_from_u64(5));
        let second = generate(&corpus, 40, &options, &mut SmallRng::seed_from_u64(5));
        assert_eq!(first, second);
    }

    #[test]
    fn test_numbers_option_inserts_digits() {
        let corpus = corpus("english", &["word"]);
        let options = GenerateOptions {
            numbers: true,
            punctuation: false,
        };
        let mut rng = SmallRng::seed_from_u64(8);
        let text = generate(&corpus, 300, &options, &mut rng);
        let numeric = text
            .split(' ')
            .filter(|t| t.chars().all(|c| c.is_ascii_digit()))
            .count();
        assert!(numeric > 0);
        assert!(text.split(' ').all(|t| t == "word" || t.chars().all(|c| c.is_ascii_digit())));
    }

    #[test]
    fn test_punctuated_text_starts_capitalized_and_ends_terminated() {
        let corpus = corpus("english", &["quick", "brown", "fox"]);
        let options = GenerateOptions {
            numbers: false,
            punctuation: true,
        };
        for seed in 0..20 {
            let text = generate(&corpus, 12, &options, &mut SmallRng::seed_from_u64(seed));
            let last = text.chars().last().unwrap();
            assert!(['.', '?', '!'].contains(&last), "{text}");
            assert_eq!(text.split(' ').count(), 12);
        }
    }

    #[test]
    fn test_code_punctuation_stays_lowercase() {
        let corpus = corpus("code_go", &["func", "return"]);
        let options = GenerateOptions {
            numbers: false,
            punctuation: true,
        };
        let text = generate(&corpus, 30, &options, &mut SmallRng::seed_from_u64(3));
        assert!(!text.chars().any(|c| c.is_ascii_uppercase()));
    }
}
