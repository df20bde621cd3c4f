use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::session::result::format_duration;
use crate::session::{Frame, Progress, TimeFigure};
use crate::ui::theme::Theme;

/// Progress, live WPM and time for the running session.
pub struct StatsBar<'a> {
    frame: &'a Frame,
    theme: &'a Theme,
}

impl<'a> StatsBar<'a> {
    pub fn new(frame: &'a Frame, theme: &'a Theme) -> Self {
        Self { frame, theme }
    }
}

pub fn progress_text(progress: Progress) -> String {
    match progress {
        Progress::Chars { typed, total } => format!("{typed}/{total}"),
        Progress::Words(words) => format!("{words} words"),
    }
}

pub fn wpm_text(wpm: Option<f64>) -> String {
    match wpm {
        Some(wpm) => format!("{wpm:.2}"),
        None => "--".to_string(),
    }
}

pub fn time_text(time: TimeFigure) -> String {
    match time {
        TimeFigure::Elapsed(elapsed) => format_duration(elapsed),
        TimeFigure::Remaining(remaining) => {
            // a partial second still left counts as a whole one
            format_duration(remaining + std::time::Duration::from_nanos(999_999_999))
        }
    }
}

impl Widget for StatsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = self.theme.label_style();
        let value = Style::default()
            .fg(self.theme.chrome.value.color())
            .add_modifier(Modifier::BOLD);

        let time_label = match self.frame.time {
            TimeFigure::Elapsed(_) => "Time ",
            TimeFigure::Remaining(_) => "Left ",
        };

        let line = Line::from(vec![
            Span::styled("Progress ", label),
            Span::styled(progress_text(self.frame.progress), value),
            Span::styled("  WPM ", label),
            Span::styled(wpm_text(self.frame.wpm), value),
            Span::styled(format!("  {time_label}"), label),
            Span::styled(time_text(self.frame.time), value),
        ]);

        Paragraph::new(line).render(area, buf);
    }
}
