use rand::Rng;

use crate::generator::capitalize::{capitalize_first_letter, starts_sentence};
use crate::language::Language;

const BRACKETS: &[(char, char)] = &[('(', ')'), ('{', '}'), ('[', ']'), ('<', '>')];

const CODE_BASE: &[&str] = &["{", "}", "[", "]", "(", ")", ";", "=", "+", "%", "/"];

const CODE_JS: &[&str] = &["{", "}", "[", "]", "(", ")", ";", "=", "+", "%", "/", "`"];

const CODE_C_FAMILY: &[&str] = &[
    "{", "}", "[", "]", "(", ")", ";", "=", "+", "%", "/", "/*", "*/", "//", "!=", "==", "<=",
    ">=", "||", "&&", "<<", ">>", "%=", "&=", "*=", "++", "+=", "--", "-=", "/=", "^=", "|=",
];

/// Where a word sits in the sequence being punctuated.
#[derive(Clone, Copy, Debug)]
pub struct WordContext<'a> {
    pub language: &'a Language,
    /// Previous word after its own punctuation pass; empty for the first word.
    pub previous: &'a str,
    pub index: usize,
    pub count: usize,
}

impl WordContext<'_> {
    pub fn last_char(&self) -> Option<char> {
        self.previous.chars().last()
    }

    fn previous_ends_with(&self, marks: &[char]) -> bool {
        self.last_char().is_some_and(|ch| marks.contains(&ch))
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.count
    }
}

/// One branch of the punctuation cascade.
///
/// Every rule reached makes its own draw; the first rule whose draw and guard both
/// pass, or that is forced, transforms the word and ends the cascade.
pub struct Rule {
    pub name: &'static str,
    pub probability: f64,
    pub guard: fn(&WordContext) -> bool,
    pub forced: fn(&WordContext) -> bool,
    pub apply: fn(&str, &WordContext, &mut dyn rand::RngCore) -> String,
}

pub static RULES: &[Rule] = &[
    Rule {
        name: "terminator",
        probability: 0.10,
        guard: |ctx| !ctx.previous_ends_with(&['.', ',']) && ctx.index + 2 != ctx.count,
        forced: |ctx| ctx.is_last(),
        apply: add_sentence_ending,
    },
    Rule {
        name: "comma",
        probability: 0.20,
        guard: |ctx| !ctx.previous_ends_with(&[',']),
        forced: never,
        apply: |word, ctx, _| add_suffix(word, ctx, ',', '，'),
    },
    Rule {
        name: "double_quotes",
        probability: 0.01,
        guard: after_clause,
        forced: never,
        apply: |word, _, _| format!("\"{word}\""),
    },
    Rule {
        name: "single_quotes",
        probability: 0.011,
        guard: after_clause,
        forced: never,
        apply: |word, _, _| format!("'{word}'"),
    },
    Rule {
        name: "brackets",
        probability: 0.012,
        guard: after_clause,
        forced: never,
        apply: add_brackets,
    },
    Rule {
        name: "colon",
        probability: 0.013,
        guard: |ctx| !ctx.previous_ends_with(&[',', '.', ';', ':']),
        forced: never,
        apply: |word, ctx, _| add_suffix(word, ctx, ':', '：'),
    },
    Rule {
        name: "dash",
        probability: 0.014,
        guard: |ctx| after_clause(ctx) && ctx.previous != "-",
        forced: never,
        apply: |_, _, _| "-".to_string(),
    },
    Rule {
        name: "semicolon",
        probability: 0.015,
        guard: |ctx| !ctx.previous_ends_with(&[',', '.', ';']),
        forced: never,
        apply: |word, ctx, _| add_suffix(word, ctx, ';', '；'),
    },
    Rule {
        name: "code_symbol",
        probability: 0.25,
        guard: |ctx| ctx.language.is_code(),
        forced: never,
        apply: code_symbol,
    },
];

fn never(_: &WordContext) -> bool {
    false
}

fn after_clause(ctx: &WordContext) -> bool {
    !ctx.previous_ends_with(&[',', '.'])
}

/// Walks the cascade and returns the rule that fires, if any.
pub fn select_rule<R: Rng + ?Sized>(ctx: &WordContext, rng: &mut R) -> Option<&'static Rule> {
    RULES.iter().find(|rule| {
        let drawn = rng.gen_bool(rule.probability) && (rule.guard)(ctx);
        drawn || (rule.forced)(ctx)
    })
}

/// Capitalizes sentence starts (natural languages only) and runs the cascade once.
pub fn punctuate_word<R: Rng>(word: &str, ctx: &WordContext, rng: &mut R) -> String {
    if word.is_empty() {
        return String::new();
    }

    let mut word = word.to_string();
    if !ctx.language.is_code() && (ctx.index == 0 || starts_sentence(ctx.last_char())) {
        word = capitalize_first_letter(&word);
    }

    match select_rule(ctx, rng) {
        Some(rule) => (rule.apply)(&word, ctx, rng),
        None => word,
    }
}

fn add_sentence_ending(word: &str, ctx: &WordContext, rng: &mut dyn rand::RngCore) -> String {
    let roll: f64 = rng.gen_range(0.0..1.0);
    let marks = if ctx.language.is_chinese() {
        ['。', '？', '！']
    } else {
        ['.', '?', '!']
    };
    let mark = if roll <= 0.8 {
        marks[0]
    } else if roll <= 0.9 {
        marks[1]
    } else {
        marks[2]
    };
    format!("{word}{mark}")
}

fn add_suffix(word: &str, ctx: &WordContext, ascii: char, full_width: char) -> String {
    let mark = if ctx.language.is_chinese() { full_width } else { ascii };
    format!("{word}{mark}")
}

fn add_brackets(word: &str, ctx: &WordContext, rng: &mut dyn rand::RngCore) -> String {
    let (open, close) = if ctx.language.is_code() {
        BRACKETS[rng.gen_range(0..BRACKETS.len())]
    } else if ctx.language.is_chinese() {
        ('（', '）')
    } else {
        ('(', ')')
    };
    format!("{open}{word}{close}")
}

fn code_symbol(_: &str, ctx: &WordContext, rng: &mut dyn rand::RngCore) -> String {
    let symbols = if ctx.language.is_c_family() {
        CODE_C_FAMILY
    } else if ctx.language.uses_backtick() {
        CODE_JS
    } else {
        CODE_BASE
    };
    symbols[rng.gen_range(0..symbols.len())].to_string()
}
