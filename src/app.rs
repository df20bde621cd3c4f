use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::cli::RunSettings;
use crate::corpus::{CorpusError, QuoteCorpus, WordCorpus};
use crate::session::result::SessionResult;
use crate::session::{Controller, Effects, Frame, Mode, ModeKind, SessionEvent, SessionState};
use crate::ui::components::header::Header;
use crate::ui::line_input::{Edit, LineInput};
use crate::ui::theme::Theme;

pub struct App {
    pub controller: Controller,
    pub input: LineInput,
    pub theme: Theme,
    pub settings: RunSettings,
    pub should_quit: bool,
}

impl App {
    pub fn new(settings: RunSettings, theme: Theme) -> Result<Self, CorpusError> {
        let mode = build_mode(&settings)?;
        let rng = match settings.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let controller = Controller::new(mode, settings.options, rng)
            .with_newline_indicator(&settings.newline_indicator);

        Ok(Self {
            controller,
            input: LineInput::new(),
            theme,
            settings,
            should_quit: false,
        })
    }

    /// Maps a key press to a session event and applies it.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Effects {
        // Only process Press events; ignore Repeat/Release
        if key.kind != KeyEventKind::Press {
            return self.idle_effects();
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let event = match key.code {
            KeyCode::Esc => Some(SessionEvent::Quit),
            KeyCode::Char('c') if ctrl => Some(SessionEvent::Quit),
            KeyCode::Char('f') if ctrl => Some(SessionEvent::ForceFinish),
            KeyCode::Enter if self.controller.is_finished() => Some(SessionEvent::Restart),
            _ if self.controller.is_finished() => None,
            _ => self.input.handle(key).map(|edit| match edit {
                Edit::Inserted(ch) => SessionEvent::Insert(ch),
                Edit::Deleted => SessionEvent::Delete,
            }),
        };

        match event {
            Some(event) => self.handle_event(event, now),
            None => self.idle_effects(),
        }
    }

    pub fn handle_event(&mut self, event: SessionEvent, now: Instant) -> Effects {
        let effects = self.controller.update(event, &mut self.input, now);
        if effects.quit {
            self.should_quit = true;
        }
        effects
    }

    pub fn frame(&self, now: Instant) -> Frame {
        self.controller.frame(now)
    }

    pub fn result(&self) -> Option<&SessionResult> {
        self.controller.result()
    }

    pub fn header(&self) -> Header<'_> {
        let detail = match self.settings.mode {
            ModeKind::Quote => None,
            ModeKind::Words => Some(format!("{} words", self.settings.word_count)),
            ModeKind::Time => self
                .controller
                .countdown()
                .map(|countdown| format!("{}s", countdown.total().as_secs())),
        };
        Header {
            mode: self.settings.mode,
            detail,
            language: self.controller.language(),
            options: self.settings.options,
            theme: &self.theme,
        }
    }

    /// Effects for a key that produced no event: keep the current tick request.
    fn idle_effects(&self) -> Effects {
        Effects {
            request_tick: self.controller.kind() == ModeKind::Time
                && self.controller.state() == SessionState::Running,
            ..Effects::default()
        }
    }
}

/// Loads the corpus the selected mode needs.
pub fn build_mode(settings: &RunSettings) -> Result<Mode, CorpusError> {
    Ok(match settings.mode {
        ModeKind::Quote => Mode::Quote(Arc::new(QuoteCorpus::load(&settings.language)?)),
        ModeKind::Words => Mode::Words {
            corpus: Arc::new(WordCorpus::load(&settings.language)?),
            count: settings.word_count,
        },
        ModeKind::Time => Mode::Time {
            corpus: Arc::new(WordCorpus::load(&settings.language)?),
            duration: settings.duration,
        },
    })
}
