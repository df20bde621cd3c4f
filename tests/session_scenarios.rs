use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;

use typetest::corpus::{QuoteCorpus, WordCorpus};
use typetest::engine::clock::SessionClock;
use typetest::engine::render::Role;
use typetest::generator::{GenerateOptions, generate};
use typetest::language::Language;
use typetest::session::controller::{TIME_EXTEND_THRESHOLD, TIME_MIN_WORDS};
use typetest::session::{Controller, Mode, Progress, SessionEvent, SessionState, TimeFigure};

fn english_words() -> Arc<WordCorpus> {
    Arc::new(WordCorpus::load(&Language::new("english")).unwrap())
}

fn seeded(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

fn type_chars(controller: &mut Controller, buffer: &mut String, text: &str, now: Instant) {
    for ch in text.chars() {
        buffer.push(ch);
        controller.update(SessionEvent::Insert(ch), buffer, now);
    }
}

#[test]
fn timed_session_stays_ahead_of_the_typist_and_ends_on_the_deadline() {
    let mut controller = Controller::new(
        Mode::Time {
            corpus: english_words(),
            duration: Duration::from_secs(60),
        },
        GenerateOptions::default(),
        seeded(11),
    );
    assert!(controller.target().split_whitespace().count() >= TIME_MIN_WORDS);

    let t0 = Instant::now();
    let mut buffer = String::new();
    let initial_len = controller.target().chars().count();

    // type most of the initial target; the remainder must never drop to the threshold
    let goal = initial_len - TIME_EXTEND_THRESHOLD / 2;
    let mut typed = 0;
    while typed < goal {
        let next = controller.target().chars().nth(typed).unwrap();
        buffer.push(next);
        let effects = controller.update(SessionEvent::Insert(next), &mut buffer, t0);
        assert!(effects.request_tick);
        typed += 1;
        let untyped = controller.target().chars().count() - controller.typed().chars().count();
        assert!(untyped > TIME_EXTEND_THRESHOLD);
    }
    assert!(controller.target().chars().count() > initial_len);

    let mut now = t0;
    let mut ticks = 0;
    loop {
        now += Duration::from_millis(100);
        let effects = controller.update(SessionEvent::Tick, &mut buffer, now);
        ticks += 1;
        if effects.finished {
            assert!(!effects.request_tick);
            break;
        }
        assert!(effects.request_tick);
    }
    assert_eq!(ticks, 600);
    assert_eq!(controller.state(), SessionState::Finished);

    let frame = controller.frame(now);
    assert_eq!(frame.time, TimeFigure::Remaining(Duration::ZERO));
    assert!(matches!(frame.progress, Progress::Words(n) if n > 0));
    let result = controller.result().unwrap();
    let expected = controller.typed().split_whitespace().count() as f64;
    assert!((result.wpm - expected).abs() < 1e-6, "one minute session: wpm == words typed");
}

#[test]
fn quote_session_completes_and_restarts() {
    let quotes = Arc::new(QuoteCorpus::load(&Language::new("english")).unwrap());
    let mut controller = Controller::new(Mode::Quote(quotes), GenerateOptions::default(), seeded(2));
    let target = controller.target().to_string();
    assert!(!target.is_empty());

    let t0 = Instant::now();
    let mut buffer = String::new();
    let (head, tail) = target.split_at(target.char_indices().nth(1).unwrap().0);
    type_chars(&mut controller, &mut buffer, head, t0);

    let frame = controller.frame(t0);
    assert!(!frame.model.has_role(Role::Incorrect));
    assert_eq!(frame.model.cursor, Some(1));

    type_chars(&mut controller, &mut buffer, tail, t0 + Duration::from_secs(30));
    assert!(controller.is_finished());
    let frame = controller.frame(t0 + Duration::from_secs(90));
    assert!(frame.finished);
    assert_eq!(frame.final_wpm, Some(controller.result().unwrap().wpm));
    assert_eq!(frame.time, TimeFigure::Elapsed(Duration::from_secs(30)));

    controller.update(SessionEvent::Restart, &mut buffer, t0);
    assert_eq!(controller.state(), SessionState::Idle);
    assert!(buffer.is_empty());
}

#[test]
fn word_session_with_force_finish_measures_typed_text() {
    let mut controller = Controller::new(
        Mode::Words {
            corpus: english_words(),
            count: 25,
        },
        GenerateOptions {
            numbers: true,
            punctuation: true,
        },
        seeded(5),
    );
    let first_words: Vec<&str> = controller.target().split(' ').take(5).collect();
    let typed = first_words.join(" ");

    let t0 = Instant::now();
    let mut buffer = String::new();
    type_chars(&mut controller, &mut buffer, &typed, t0);
    let effects = controller.update(SessionEvent::ForceFinish, &mut buffer, t0 + Duration::from_secs(60));

    assert!(effects.finished);
    let result = controller.result().unwrap();
    assert!(result.partial);
    assert!((result.wpm - 5.0).abs() < 1e-9);
}

#[test]
fn code_quote_accepts_spaces_for_tabs_and_auto_indents() {
    let quotes = Arc::new(QuoteCorpus::new(
        Language::new("code_go"),
        vec![typetest::corpus::Quote {
            text: "func f() {\n\treturn\n}".to_string(),
        }],
    ));
    let mut controller = Controller::new(Mode::Quote(quotes), GenerateOptions::default(), seeded(1));
    let t0 = Instant::now();
    let mut buffer = String::new();

    type_chars(&mut controller, &mut buffer, "func f() {", t0);
    buffer.push('\n');
    let effects = controller.update(SessionEvent::Insert('\n'), &mut buffer, t0);
    assert_eq!(effects.auto_indent.as_deref(), Some("\t"));

    // replace the inserted tab with four spaces: still equivalent
    buffer.pop();
    controller.update(SessionEvent::Delete, &mut buffer, t0);
    type_chars(&mut controller, &mut buffer, "    return\n}", t0);
    assert!(controller.is_finished());

    let frame = controller.frame(t0);
    assert!(frame.model.text().contains('\u{21b5}'));
}

#[test]
fn empty_corpus_is_tolerated() {
    let empty = Arc::new(WordCorpus::new(Language::new("english"), Vec::new()));
    let mut controller = Controller::new(
        Mode::Words {
            corpus: empty,
            count: 10,
        },
        GenerateOptions::default(),
        seeded(1),
    );
    let t0 = Instant::now();
    let mut buffer = String::new();
    type_chars(&mut controller, &mut buffer, "anything", t0);
    assert!(!controller.is_finished());
    let frame = controller.frame(t0);
    assert!(frame.model.has_role(Role::Incorrect));
}

#[test]
fn fixed_seed_punctuation_is_reproducible_and_terminated() {
    let corpus = english_words();
    let options = GenerateOptions {
        numbers: false,
        punctuation: true,
    };
    for seed in 0..10 {
        let first = generate(&corpus, 30, &options, &mut seeded(seed));
        let second = generate(&corpus, 30, &options, &mut seeded(seed));
        assert_eq!(first, second);
        assert!(first.ends_with(['.', '?', '!']), "{first}");
        assert!(first.chars().next().unwrap().is_uppercase() || !first.starts_with(char::is_alphabetic));
    }
}

#[test]
fn clock_reports_five_wpm_for_five_words_in_a_minute() {
    let t0 = Instant::now();
    let mut clock = SessionClock::new();
    clock.start(t0);
    let wpm = clock.finish(t0 + Duration::from_secs(60), "one two three four five");
    assert!((wpm - 5.0).abs() < 1e-9);
    assert_eq!(clock.finish(t0 + Duration::from_secs(120), "x"), wpm);
    assert_eq!(clock.current_wpm(t0 + Duration::from_secs(600), "whatever"), wpm);
}
