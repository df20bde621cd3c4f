use std::time::{Duration, Instant};

use rand::Rng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::engine::clock::{SessionClock, word_count};
use crate::engine::normalize::{auto_indent, normalize};
use crate::engine::render::{self, DEFAULT_NEWLINE_INDICATOR, RenderModel};
use crate::generator::{GenerateOptions, generate};
use crate::language::Language;
use crate::session::buffer::TextBuffer;
use crate::session::countdown::Countdown;
use crate::session::mode::{Mode, ModeKind};
use crate::session::result::SessionResult;

/// Used when a timed session is configured with a zero duration.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(60);
/// Words generated per second of a timed session, before the floor applies.
pub const TIME_WORDS_PER_SECOND: u64 = 6;
pub const TIME_MIN_WORDS: usize = 120;
/// Upper bound on the initial timed target; longer sessions rely on extension.
pub const TIME_MAX_WORDS: usize = 720;
/// Words appended each time a timed target runs low.
pub const TIME_CHUNK_WORDS: usize = 40;
/// Untyped characters at or below which a timed target is extended.
pub const TIME_EXTEND_THRESHOLD: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The buffer gained a character (already applied by the caller).
    Insert(char),
    /// The buffer lost text (already applied by the caller).
    Delete,
    Resize(u16),
    Tick,
    Restart,
    ForceFinish,
    Quit,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    Finished,
}

/// What the caller has to do after an event was processed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Effects {
    /// Schedule another tick.
    pub request_tick: bool,
    /// Indentation that was appended to the buffer.
    pub auto_indent: Option<String>,
    /// The session finished while handling this event.
    pub finished: bool,
    pub quit: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Chars { typed: usize, total: usize },
    Words(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeFigure {
    Elapsed(Duration),
    Remaining(Duration),
}

/// Everything the front end needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub model: RenderModel,
    pub progress: Progress,
    /// Live WPM, `None` until the first keystroke.
    pub wpm: Option<f64>,
    pub time: TimeFigure,
    pub finished: bool,
    pub final_wpm: Option<f64>,
}

/// Drives one typing session: owns the target, the clock and the countdown, and
/// reacts to events against an externally owned text buffer.
pub struct Controller {
    mode: Mode,
    options: GenerateOptions,
    rng: SmallRng,
    newline_indicator: Option<String>,
    target: String,
    typed: String,
    clock: SessionClock,
    countdown: Option<Countdown>,
    state: SessionState,
    width: u16,
    result: Option<SessionResult>,
}

impl Controller {
    pub fn new(mode: Mode, options: GenerateOptions, rng: SmallRng) -> Self {
        let mode = match mode {
            Mode::Time { corpus, duration } if duration.is_zero() => Mode::Time {
                corpus,
                duration: DEFAULT_DURATION,
            },
            other => other,
        };
        let countdown = match &mode {
            Mode::Time { duration, .. } => Some(Countdown::new(*duration)),
            _ => None,
        };
        let newline_indicator = mode
            .language()
            .is_code()
            .then(|| DEFAULT_NEWLINE_INDICATOR.to_string());

        let mut controller = Self {
            mode,
            options,
            rng,
            newline_indicator,
            target: String::new(),
            typed: String::new(),
            clock: SessionClock::new(),
            countdown,
            state: SessionState::Idle,
            width: 0,
            result: None,
        };
        controller.target = controller.initial_target();
        info!(
            mode = %controller.kind(),
            language = %controller.language(),
            chars = controller.target.chars().count(),
            "session created"
        );
        if controller.target.is_empty() {
            info!("empty target, session cannot complete");
        }
        controller
    }

    /// Overrides the newline marker. Ignored for natural-language targets.
    pub fn with_newline_indicator(mut self, indicator: &str) -> Self {
        if self.language().is_code() {
            self.newline_indicator = (!indicator.is_empty()).then(|| indicator.to_string());
        }
        self
    }

    /// Applies one event. `Quit` and `Resize` are honoured in every state; `Restart` only
    /// when Finished; input, `Tick` and `ForceFinish` are ignored once Finished. `Tick` and
    /// `ForceFinish` only act while Running.
    pub fn update<B: TextBuffer>(
        &mut self,
        event: SessionEvent,
        buffer: &mut B,
        now: Instant,
    ) -> Effects {
        let mut effects = Effects::default();

        match event {
            SessionEvent::Quit => effects.quit = true,
            SessionEvent::Resize(width) => self.width = width,
            SessionEvent::Restart => self.restart(buffer),
            _ if self.state == SessionState::Finished => {
                debug!(?event, "ignored after finish");
            }
            SessionEvent::Insert(ch) => self.on_input(Some(ch), buffer, now, &mut effects),
            SessionEvent::Delete => self.on_input(None, buffer, now, &mut effects),
            SessionEvent::Tick => self.on_tick(now, &mut effects),
            SessionEvent::ForceFinish => self.on_force_finish(now, &mut effects),
        }

        effects.request_tick = self.wants_tick();
        effects
    }

    pub fn frame(&self, now: Instant) -> Frame {
        let finished = self.is_finished();
        let model = render::build(
            &self.target,
            &self.typed,
            finished,
            self.newline_indicator.as_deref(),
        );
        let progress = match self.kind() {
            ModeKind::Time => Progress::Words(self.typed.split_whitespace().count()),
            _ => Progress::Chars {
                typed: self.typed.chars().count(),
                total: self.target.chars().count(),
            },
        };
        let time = match &self.countdown {
            Some(countdown) => TimeFigure::Remaining(countdown.remaining()),
            None => TimeFigure::Elapsed(self.clock.elapsed(now)),
        };

        Frame {
            model,
            progress,
            wpm: self
                .clock
                .is_started()
                .then(|| self.clock.current_wpm(now, &self.typed)),
            time,
            finished,
            final_wpm: finished.then(|| self.clock.wpm()),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    pub fn kind(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn language(&self) -> &Language {
        self.mode.language()
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// The typed text as compared against the target.
    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    pub fn newline_indicator(&self) -> Option<&str> {
        self.newline_indicator.as_deref()
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    fn on_input<B: TextBuffer>(
        &mut self,
        inserted: Option<char>,
        buffer: &mut B,
        now: Instant,
        effects: &mut Effects,
    ) {
        let mut typed = self.effective(buffer.value());

        if inserted == Some('\n') && self.language().is_code() {
            if let Some(indent) = auto_indent(&self.typed, &typed, &self.target) {
                debug!(width = indent.len(), "auto-indent");
                buffer.insert_text(&indent);
                typed = self.effective(buffer.value());
                effects.auto_indent = Some(indent);
            }
        }
        self.typed = typed;

        if self.state == SessionState::Idle && !self.typed.is_empty() {
            self.begin(now);
        }
        if self.state != SessionState::Running {
            return;
        }

        if self.kind() == ModeKind::Time {
            self.extend_target();
        } else if !self.target.is_empty() && self.typed == self.target {
            let basis = self.target.clone();
            self.finish(now, &basis, false, effects);
        }
    }

    fn on_tick(&mut self, now: Instant, effects: &mut Effects) {
        if self.state != SessionState::Running {
            return;
        }
        let expired = self
            .countdown
            .as_mut()
            .is_some_and(|countdown| countdown.tick(now));
        if expired {
            let basis = self.typed.clone();
            self.finish(now, &basis, false, effects);
        }
    }

    fn on_force_finish(&mut self, now: Instant, effects: &mut Effects) {
        if self.state != SessionState::Running || !self.kind().supports_force_finish() {
            debug!(state = ?self.state, mode = %self.kind(), "force finish ignored");
            return;
        }
        let basis = self.typed.clone();
        self.finish(now, &basis, true, effects);
    }

    fn begin(&mut self, now: Instant) {
        self.clock.start(now);
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.start(now);
        }
        self.state = SessionState::Running;
        info!(mode = %self.kind(), "session started");
    }

    fn finish(&mut self, now: Instant, basis: &str, partial: bool, effects: &mut Effects) {
        let wpm = self.clock.finish(now, basis);
        self.state = SessionState::Finished;
        effects.finished = true;

        let result = SessionResult {
            mode: self.kind(),
            language: self.language().clone(),
            wpm,
            elapsed: self.clock.elapsed(now),
            words: word_count(basis),
            chars: self.typed.chars().count(),
            partial,
        };
        info!(
            mode = %result.mode,
            wpm = result.wpm,
            elapsed_ms = result.elapsed.as_millis() as u64,
            partial,
            "session finished"
        );
        self.result = Some(result);
    }

    fn restart<B: TextBuffer>(&mut self, buffer: &mut B) {
        if self.state != SessionState::Finished {
            debug!(state = ?self.state, "restart ignored");
            return;
        }
        buffer.clear();
        self.typed.clear();
        self.clock.reset();
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.reset();
        }
        self.result = None;
        self.state = SessionState::Idle;
        self.target = self.initial_target();
        info!(chars = self.target.chars().count(), "session restarted");
    }

    fn wants_tick(&self) -> bool {
        self.kind() == ModeKind::Time && self.state == SessionState::Running
    }

    fn effective(&self, raw: &str) -> String {
        if self.language().is_code() {
            normalize(raw, &self.target)
        } else {
            raw.to_string()
        }
    }

    fn initial_target(&mut self) -> String {
        match &self.mode {
            Mode::Quote(corpus) => {
                if corpus.quotes.is_empty() {
                    return String::new();
                }
                let index = self.rng.gen_range(0..corpus.quotes.len());
                corpus.quotes[index].text.clone()
            }
            Mode::Words { corpus, count } => {
                generate(corpus, *count, &self.options, &mut self.rng)
            }
            Mode::Time { corpus, duration } => {
                generate(corpus, initial_time_words(*duration), &self.options, &mut self.rng)
            }
        }
    }

    /// Appends chunks until the untyped remainder is above the threshold.
    fn extend_target(&mut self) {
        let Mode::Time { corpus, .. } = &self.mode else {
            return;
        };
        let typed = self.typed.chars().count();
        let mut total = self.target.chars().count();

        while total.saturating_sub(typed) <= TIME_EXTEND_THRESHOLD {
            let chunk = generate(corpus, TIME_CHUNK_WORDS, &self.options, &mut self.rng);
            if chunk.is_empty() {
                break;
            }
            self.target = format!("{} {}", self.target, chunk).trim().to_string();
            total = self.target.chars().count();
            debug!(chars = total, "target extended");
        }
    }
}

/// Initial word count for a timed session: six words per second, between 120 and 720.
pub fn initial_time_words(duration: Duration) -> usize {
    let estimate = duration.as_secs().saturating_mul(TIME_WORDS_PER_SECOND);
    usize::try_from(estimate)
        .unwrap_or(usize::MAX)
        .clamp(TIME_MIN_WORDS, TIME_MAX_WORDS)
}
