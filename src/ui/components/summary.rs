use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::session::result::SessionResult;
use crate::ui::theme::Theme;

/// Completion line shown in place of the live stats once a session is over.
pub struct Summary<'a> {
    result: &'a SessionResult,
    theme: &'a Theme,
}

impl<'a> Summary<'a> {
    pub fn new(result: &'a SessionResult, theme: &'a Theme) -> Self {
        Self { result, theme }
    }
}

impl Widget for Summary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(
            self.result.to_string(),
            Style::default()
                .fg(self.theme.chrome.success.color())
                .add_modifier(Modifier::BOLD),
        )];
        if self.result.partial {
            spans.push(Span::styled(
                " (ended early)",
                self.theme.label_style(),
            ));
        }

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
